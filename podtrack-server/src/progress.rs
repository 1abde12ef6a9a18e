use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json,
};
use podtrack_db::{Database, NewProgress, PrimaryKey, UpdatedProgress};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewProgressSchema, UpdateProgressSchema, ValidatedJson},
    serialized::{Progress, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/progress",
    tag = "progress",
    responses(
        (status = 200, body = Vec<Progress>)
    )
)]
pub(crate) async fn list_progress(State(context): State<ServerContext>) -> ServerResult<Json<Vec<Progress>>> {
    let progress = context.database.list_progress().await?;

    Ok(Json(progress.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/progress",
    tag = "progress",
    request_body = NewProgressSchema,
    responses(
        (status = 201, body = Progress),
        (status = 400, description = "Request body is missing fields or invalid"),
        (status = 404, description = "User or podcast not found")
    )
)]
pub(crate) async fn create_progress(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewProgressSchema>,
) -> ServerResult<impl IntoResponse> {
    let progress = context
        .database
        .create_progress(NewProgress {
            user_id: body.user_id,
            podcast_id: body.podcast_id,
            progress: body.progress,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(progress.to_serialized())))
}

#[utoipa::path(
    get,
    path = "/progress/{id}",
    tag = "progress",
    responses(
        (status = 200, body = Progress),
        (status = 404, description = "Progress not found")
    )
)]
pub(crate) async fn progress(
    State(context): State<ServerContext>,
    Path(progress_id): Path<PrimaryKey>,
) -> ServerResult<Json<Progress>> {
    let progress = context.database.progress_by_id(progress_id).await?;

    Ok(Json(progress.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/progress/{user_id}/{podcast_id}",
    tag = "progress",
    responses(
        (status = 200, body = Progress),
        (status = 404, description = "Progress not found")
    )
)]
pub(crate) async fn progress_by_user_and_podcast(
    State(context): State<ServerContext>,
    Path((user_id, podcast_id)): Path<(PrimaryKey, PrimaryKey)>,
) -> ServerResult<Json<Progress>> {
    let progress = context
        .database
        .progress_by_user_and_podcast(user_id, podcast_id)
        .await?;

    Ok(Json(progress.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/progress/{user_id}/{podcast_id}",
    tag = "progress",
    request_body = UpdateProgressSchema,
    responses(
        (status = 200, body = Progress),
        (status = 404, description = "Progress not found")
    )
)]
pub(crate) async fn update_progress(
    State(context): State<ServerContext>,
    Path((user_id, podcast_id)): Path<(PrimaryKey, PrimaryKey)>,
    ValidatedJson(body): ValidatedJson<UpdateProgressSchema>,
) -> ServerResult<Json<Progress>> {
    let progress = context
        .database
        .update_progress(UpdatedProgress {
            user_id,
            podcast_id,
            progress: body.progress,
        })
        .await?;

    Ok(Json(progress.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/progress/{id}",
    tag = "progress",
    responses(
        (status = 204, description = "Progress was deleted"),
        (status = 404, description = "Progress not found")
    )
)]
pub(crate) async fn delete_progress(
    State(context): State<ServerContext>,
    Path(progress_id): Path<PrimaryKey>,
) -> ServerResult<impl IntoResponse> {
    context.database.delete_progress(progress_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_progress))
        .route("/", post(create_progress))
        .route("/:id", get(progress))
        .route("/:id", delete(delete_progress))
        .route("/:user_id/:podcast_id", get(progress_by_user_and_podcast))
        .route("/:user_id/:podcast_id", put(update_progress))
}
