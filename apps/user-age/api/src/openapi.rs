use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Age API",
        description = "Stores users with a date of birth and reports their age in whole years"
    ),
    nest((path = "/users", api = domain_users::ApiDoc))
)]
pub struct ApiDoc;
