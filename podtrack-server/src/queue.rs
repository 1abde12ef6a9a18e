use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json,
};
use podtrack_db::{Database, NewQueueEntry, PrimaryKey, UpdatedQueueEntry};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewQueueEntrySchema, UpdateQueueEntrySchema, ValidatedJson},
    serialized::{QueueEntry, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/queue",
    tag = "queue",
    responses(
        (status = 200, body = Vec<QueueEntry>)
    )
)]
pub(crate) async fn list_queue(State(context): State<ServerContext>) -> ServerResult<Json<Vec<QueueEntry>>> {
    let entries = context.database.list_queue().await?;

    Ok(Json(entries.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/queue",
    tag = "queue",
    request_body = NewQueueEntrySchema,
    responses(
        (status = 201, body = QueueEntry),
        (status = 400, description = "Request body is missing fields or invalid"),
        (status = 404, description = "User or podcast not found")
    )
)]
pub(crate) async fn add_to_queue(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewQueueEntrySchema>,
) -> ServerResult<impl IntoResponse> {
    let entry = context
        .database
        .create_queue_entry(NewQueueEntry {
            user_id: body.user_id,
            podcast_id: body.podcast_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry.to_serialized())))
}

#[utoipa::path(
    get,
    path = "/queue/{id}",
    tag = "queue",
    responses(
        (status = 200, body = QueueEntry),
        (status = 404, description = "Queue entry not found")
    )
)]
pub(crate) async fn queue_entry(
    State(context): State<ServerContext>,
    Path(entry_id): Path<PrimaryKey>,
) -> ServerResult<Json<QueueEntry>> {
    let entry = context.database.queue_entry_by_id(entry_id).await?;

    Ok(Json(entry.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/queue/{id}",
    tag = "queue",
    request_body = UpdateQueueEntrySchema,
    responses(
        (status = 200, body = QueueEntry),
        (status = 404, description = "Queue entry or supplied reference not found")
    )
)]
pub(crate) async fn update_queue_entry(
    State(context): State<ServerContext>,
    Path(entry_id): Path<PrimaryKey>,
    ValidatedJson(body): ValidatedJson<UpdateQueueEntrySchema>,
) -> ServerResult<Json<QueueEntry>> {
    let entry = context
        .database
        .update_queue_entry(UpdatedQueueEntry {
            id: entry_id,
            user_id: body.user_id,
            podcast_id: body.podcast_id,
        })
        .await?;

    Ok(Json(entry.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/queue/{id}",
    tag = "queue",
    responses(
        (status = 204, description = "Queue entry was deleted"),
        (status = 404, description = "Queue entry not found")
    )
)]
pub(crate) async fn delete_queue_entry(
    State(context): State<ServerContext>,
    Path(entry_id): Path<PrimaryKey>,
) -> ServerResult<impl IntoResponse> {
    context.database.delete_queue_entry(entry_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_queue))
        .route("/", post(add_to_queue))
        .route("/:id", get(queue_entry))
        .route("/:id", put(update_queue_entry))
        .route("/:id", delete(delete_queue_entry))
}
