use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;
use utoipauto::utoipauto;

#[utoipauto(paths = "./podtrack-server/src")]
#[derive(OpenApi)]
#[openapi(info(
    description = "podtrack-server exposes the podcast subscription and tracking REST API"
))]
pub struct ApiDoc;

pub async fn docs() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
