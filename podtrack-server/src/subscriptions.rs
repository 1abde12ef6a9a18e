use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json,
};
use podtrack_db::{Database, NewSubscription, PrimaryKey, UpdatedSubscription};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewSubscriptionSchema, UpdateSubscriptionSchema, ValidatedJson},
    serialized::{Subscription, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/subscriptions",
    tag = "subscriptions",
    responses(
        (status = 200, body = Vec<Subscription>)
    )
)]
pub(crate) async fn list_subscriptions(
    State(context): State<ServerContext>,
) -> ServerResult<Json<Vec<Subscription>>> {
    let subscriptions = context.database.list_subscriptions().await?;

    Ok(Json(subscriptions.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/subscriptions",
    tag = "subscriptions",
    request_body = NewSubscriptionSchema,
    responses(
        (status = 201, body = Subscription),
        (status = 400, description = "Request body is missing fields or invalid"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn create_subscription(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewSubscriptionSchema>,
) -> ServerResult<impl IntoResponse> {
    let subscription = context
        .database
        .create_subscription(NewSubscription {
            title: body.title,
            description: body.description,
            language: body.language,
            pub_date: body.pub_date,
            user_id: body.user_id,
            image_url: body.image_url,
            url: body.url,
            author_name: body.author_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(subscription.to_serialized())))
}

#[utoipa::path(
    get,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    responses(
        (status = 200, body = Subscription),
        (status = 404, description = "Subscription not found")
    )
)]
pub(crate) async fn subscription(
    State(context): State<ServerContext>,
    Path(subscription_id): Path<PrimaryKey>,
) -> ServerResult<Json<Subscription>> {
    let subscription = context.database.subscription_by_id(subscription_id).await?;

    Ok(Json(subscription.to_serialized()))
}

#[utoipa::path(
    put,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    request_body = UpdateSubscriptionSchema,
    responses(
        (status = 200, body = Subscription),
        (status = 404, description = "Subscription not found")
    )
)]
pub(crate) async fn update_subscription(
    State(context): State<ServerContext>,
    Path(subscription_id): Path<PrimaryKey>,
    ValidatedJson(body): ValidatedJson<UpdateSubscriptionSchema>,
) -> ServerResult<Json<Subscription>> {
    let subscription = context
        .database
        .update_subscription(UpdatedSubscription {
            id: subscription_id,
            title: body.title,
            description: body.description,
            language: body.language,
            pub_date: body.pub_date,
            image_url: body.image_url,
            url: body.url,
            author_name: body.author_name,
        })
        .await?;

    Ok(Json(subscription.to_serialized()))
}

#[utoipa::path(
    delete,
    path = "/subscriptions/{id}",
    tag = "subscriptions",
    responses(
        (status = 204, description = "Subscription was deleted"),
        (status = 404, description = "Subscription not found")
    )
)]
pub(crate) async fn delete_subscription(
    State(context): State<ServerContext>,
    Path(subscription_id): Path<PrimaryKey>,
) -> ServerResult<impl IntoResponse> {
    context.database.delete_subscription(subscription_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_subscriptions))
        .route("/", post(create_subscription))
        .route("/:id", get(subscription))
        .route("/:id", put(update_subscription))
        .route("/:id", delete(delete_subscription))
}
