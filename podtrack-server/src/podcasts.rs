use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json,
};
use podtrack_db::{Database, NewPodcast, PrimaryKey, UpdatedPodcast};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewPodcastSchema, UpdatePodcastSchema, ValidatedJson},
    serialized::{Podcast, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/podcasts",
    tag = "podcasts",
    responses(
        (status = 200, body = Vec<Podcast>)
    )
)]
pub(crate) async fn list_podcasts(State(context): State<ServerContext>) -> ServerResult<Json<Vec<Podcast>>> {
    let podcasts = context.database.list_podcasts().await?;

    Ok(Json(podcasts.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/podcasts",
    tag = "podcasts",
    request_body = NewPodcastSchema,
    responses(
        (status = 201, body = Podcast),
        (status = 400, description = "Request body is missing fields or invalid"),
        (status = 404, description = "Author not found")
    )
)]
pub(crate) async fn create_podcast(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewPodcastSchema>,
) -> ServerResult<impl IntoResponse> {
    let podcast = context
        .database
        .create_podcast(NewPodcast {
            name: body.name,
            author_id: body.author_id,
            description: body.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(podcast.to_serialized())))
}

#[utoipa::path(
    get,
    path = "/podcasts/{id}",
    tag = "podcasts",
    responses(
        (status = 200, body = Podcast),
        (status = 404, description = "Podcast not found")
    )
)]
pub(crate) async fn podcast(
    State(context): State<ServerContext>,
    Path(podcast_id): Path<PrimaryKey>,
) -> ServerResult<Json<Podcast>> {
    let podcast = context.database.podcast_by_id(podcast_id).await?;

    Ok(Json(podcast.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/podcasts/{id}",
    tag = "podcasts",
    request_body = UpdatePodcastSchema,
    responses(
        (status = 200, body = Podcast),
        (status = 404, description = "Podcast or supplied author not found")
    )
)]
pub(crate) async fn update_podcast(
    State(context): State<ServerContext>,
    Path(podcast_id): Path<PrimaryKey>,
    ValidatedJson(body): ValidatedJson<UpdatePodcastSchema>,
) -> ServerResult<Json<Podcast>> {
    let podcast = context
        .database
        .update_podcast(UpdatedPodcast {
            id: podcast_id,
            name: body.name,
            author_id: body.author_id,
            description: body.description,
        })
        .await?;

    Ok(Json(podcast.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/podcasts/{id}",
    tag = "podcasts",
    responses(
        (status = 204, description = "Podcast was deleted"),
        (status = 404, description = "Podcast not found")
    )
)]
pub(crate) async fn delete_podcast(
    State(context): State<ServerContext>,
    Path(podcast_id): Path<PrimaryKey>,
) -> ServerResult<impl IntoResponse> {
    context.database.delete_podcast(podcast_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_podcasts))
        .route("/", post(create_podcast))
        .route("/:id", get(podcast))
        .route("/:id", put(update_podcast))
        .route("/:id", delete(delete_podcast))
}
