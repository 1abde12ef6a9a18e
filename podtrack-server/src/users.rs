use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json,
};
use podtrack_db::{Database, NewUser, PrimaryKey, UpdatedUser};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewUserSchema, UpdateUserSchema, ValidatedJson},
    serialized::{ToSerialized, User},
    util::random_string,
    Router,
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, body = Vec<User>)
    )
)]
pub(crate) async fn list_users(State(context): State<ServerContext>) -> ServerResult<Json<Vec<User>>> {
    let users = context.database.list_users().await?;

    Ok(Json(users.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = NewUserSchema,
    responses(
        (status = 201, body = User),
        (status = 400, description = "Request body is missing fields or invalid")
    )
)]
pub(crate) async fn create_user(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewUserSchema>,
) -> ServerResult<impl IntoResponse> {
    let user = context
        .database
        .create_user(NewUser {
            name: body.name,
            email: body.email,
            password: body.password,
            salt: random_string(16),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.to_serialized())))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    responses(
        (status = 200, body = User),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn user(
    State(context): State<ServerContext>,
    Path(user_id): Path<PrimaryKey>,
) -> ServerResult<Json<User>> {
    let user = context.database.user_by_id(user_id).await?;

    Ok(Json(user.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    request_body = UpdateUserSchema,
    responses(
        (status = 200, body = User),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn update_user(
    State(context): State<ServerContext>,
    Path(user_id): Path<PrimaryKey>,
    ValidatedJson(body): ValidatedJson<UpdateUserSchema>,
) -> ServerResult<Json<User>> {
    let user = context
        .database
        .update_user(UpdatedUser {
            id: user_id,
            name: body.name,
            email: body.email,
        })
        .await?;

    Ok(Json(user.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    responses(
        (status = 204, description = "User was deleted"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn delete_user(
    State(context): State<ServerContext>,
    Path(user_id): Path<PrimaryKey>,
) -> ServerResult<impl IntoResponse> {
    context.database.delete_user(user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/", post(create_user))
        .route("/:id", get(user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}
