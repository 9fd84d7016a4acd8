//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::auth_handler;
use crate::domain::UserResponse;

/// OpenAPI documentation for the Accounts API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User registration and login API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(auth_handler::register, auth_handler::login),
    components(
        schemas(
            UserResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
        )
    ),
    tags(
        (name = "Authentication", description = "User registration and login")
    )
)]
pub struct ApiDoc;
