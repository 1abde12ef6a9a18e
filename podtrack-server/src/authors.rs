use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json,
};
use podtrack_db::{Database, NewAuthor, PrimaryKey, UpdatedAuthor};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewAuthorSchema, UpdateAuthorSchema, ValidatedJson},
    serialized::{Author, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, body = Vec<Author>)
    )
)]
pub(crate) async fn list_authors(State(context): State<ServerContext>) -> ServerResult<Json<Vec<Author>>> {
    let authors = context.database.list_authors().await?;

    Ok(Json(authors.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = NewAuthorSchema,
    responses(
        (status = 201, body = Author),
        (status = 400, description = "Request body is missing fields or invalid")
    )
)]
pub(crate) async fn create_author(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewAuthorSchema>,
) -> ServerResult<impl IntoResponse> {
    let author = context
        .database
        .create_author(NewAuthor {
            name: body.name,
            email: body.email,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(author.to_serialized())))
}

#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    responses(
        (status = 200, body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub(crate) async fn author(
    State(context): State<ServerContext>,
    Path(author_id): Path<PrimaryKey>,
) -> ServerResult<Json<Author>> {
    let author = context.database.author_by_id(author_id).await?;

    Ok(Json(author.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    request_body = UpdateAuthorSchema,
    responses(
        (status = 200, body = Author),
        (status = 404, description = "Author not found")
    )
)]
pub(crate) async fn update_author(
    State(context): State<ServerContext>,
    Path(author_id): Path<PrimaryKey>,
    ValidatedJson(body): ValidatedJson<UpdateAuthorSchema>,
) -> ServerResult<Json<Author>> {
    let author = context
        .database
        .update_author(UpdatedAuthor {
            id: author_id,
            name: body.name,
            email: body.email,
        })
        .await?;

    Ok(Json(author.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    responses(
        (status = 204, description = "Author was deleted"),
        (status = 404, description = "Author not found")
    )
)]
pub(crate) async fn delete_author(
    State(context): State<ServerContext>,
    Path(author_id): Path<PrimaryKey>,
) -> ServerResult<impl IntoResponse> {
    context.database.delete_author(author_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_authors))
        .route("/", post(create_author))
        .route("/:id", get(author))
        .route("/:id", put(update_author))
        .route("/:id", delete(delete_author))
}
