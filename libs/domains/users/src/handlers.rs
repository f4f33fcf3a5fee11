use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::age::{Clock, SystemClock};
use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(UserResponse, CreateUser, UpdateUser, ErrorResponse)),
    tags((name = TAG, description = "User management with computed age"))
)]
pub struct ApiDoc;

/// Handler state: the service plus the clock ages are computed against
pub struct UsersState<R: UserRepository> {
    service: Arc<UserService<R>>,
    clock: Arc<dyn Clock>,
}

impl<R: UserRepository> Clone for UsersState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Create the user router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    router_with_clock(service, Arc::new(SystemClock))
}

/// Same as [`router`] with an explicit clock for age computation
pub fn router_with_clock<R: UserRepository + 'static>(
    service: UserService<R>,
    clock: Arc<dyn Clock>,
) -> Router {
    let state = UsersState {
        service: Arc::new(service),
        clock,
    };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(state)
}

/// List all users with their current age
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "Users in ascending id order", body = Vec<UserResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(state): State<UsersState<R>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = state.service.list_users().await?;
    // one reference instant for the whole page
    let now = state.clock.now();

    Ok(Json(
        users
            .into_iter()
            .map(|user| UserResponse::with_age(user, now))
            .collect(),
    ))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body or invalid input", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::new(user))))
}

/// Get a user by id, including their current age
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    IdPath(id): IdPath,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.get_user(id).await?;
    Ok(Json(UserResponse::with_age(user, state.clock.now())))
}

/// Replace a user's name and date of birth
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Bad id, malformed body or invalid input", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserResponse>> {
    let user = state.service.update_user(id, input).await?;
    Ok(Json(UserResponse::new(user)))
}

/// Delete a user
///
/// Deleting an id that does not exist also answers 204.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted or already absent"),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    IdPath(id): IdPath,
) -> UserResult<StatusCode> {
    state.service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
