use utoipa::OpenApi;
use userbase_core::ErrorResponse;

use crate::modules::users::model::{CreateUserDto, UpdateUserDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
    ),
    components(schemas(User, CreateUserDto, UpdateUserDto, ErrorResponse)),
    tags(
        (name = "Users", description = "User management endpoints")
    ),
    info(
        title = "Userbase API",
        version = "0.1.0",
        description = "User management REST API with pluggable storage and password hashing"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
    }
}
