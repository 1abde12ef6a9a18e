//! Typed request bodies for every route, validated before they reach
//! the database layer.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use podtrack_db::PrimaryKey;
use serde::{de::DeserializeOwned, Deserialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::errors::ServerError;

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUserSchema {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email, length(max = 50))]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub password: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserSchema {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(email, length(max = 50))]
    pub email: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAuthorSchema {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email, length(max = 50))]
    pub email: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAuthorSchema {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(email, length(max = 50))]
    pub email: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPodcastSchema {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub author_id: PrimaryKey,
    #[validate(length(min = 1))]
    pub description: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePodcastSchema {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    pub author_id: Option<PrimaryKey>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewProgressSchema {
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
    /// How far through the podcast the user is, in percent
    #[validate(range(min = 0, max = 100))]
    pub progress: i64,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProgressSchema {
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i64>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewQueueEntrySchema {
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateQueueEntrySchema {
    pub user_id: Option<PrimaryKey>,
    pub podcast_id: Option<PrimaryKey>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSubscriptionSchema {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub language: Option<String>,
    #[validate(length(max = 50))]
    pub pub_date: Option<String>,
    pub user_id: PrimaryKey,
    #[validate(url, length(max = 200))]
    pub image_url: Option<String>,
    #[validate(url, length(max = 200))]
    pub url: String,
    #[validate(length(max = 100))]
    pub author_name: Option<String>,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSubscriptionSchema {
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub language: Option<String>,
    #[validate(length(max = 50))]
    pub pub_date: Option<String>,
    #[validate(url, length(max = 200))]
    pub image_url: Option<String>,
    #[validate(url, length(max = 200))]
    pub url: Option<String>,
    #[validate(length(max = 100))]
    pub author_name: Option<String>,
}

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extracted_json: Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e| ServerError::BadRequest(e.body_text()))?;

        extracted_json
            .0
            .validate()
            .map_err(|e| ServerError::BadRequest(e.to_string()))?;

        Ok(Self(extracted_json.0))
    }
}
