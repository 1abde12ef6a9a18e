use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// The type used for primary keys in the database.
pub type PrimaryKey = i64;

/// A podtrack account
#[derive(Debug, Clone, FromRow)]
pub struct UserData {
    pub id: PrimaryKey,
    pub name: String,
    pub email: String,
    /// Stored but never exposed over the API
    pub password: String,
    /// Reserved for password hashing, generated at creation
    pub salt: String,
}

/// A podcast author
#[derive(Debug, Clone, FromRow)]
pub struct AuthorData {
    pub id: PrimaryKey,
    pub name: String,
    pub email: String,
}

/// A podcast in the catalog
#[derive(Debug, Clone, FromRow)]
pub struct PodcastData {
    pub id: PrimaryKey,
    pub name: String,
    /// The author this podcast belongs to
    pub author_id: PrimaryKey,
    pub description: String,
    /// Assigned by the server when the podcast is created
    pub created_at: DateTime<Utc>,
}

/// How far a user has gotten through a podcast, in percent
#[derive(Debug, Clone, FromRow)]
pub struct ProgressData {
    pub id: PrimaryKey,
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
    pub progress: i64,
}

/// A podcast queued up for a user
#[derive(Debug, Clone, FromRow)]
pub struct QueueEntryData {
    pub id: PrimaryKey,
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
}

/// A feed a user is subscribed to
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionData {
    pub id: PrimaryKey,
    pub title: String,
    pub description: Option<String>,
    pub language: Option<String>,
    /// Kept as the plain string the feed reported it as
    pub pub_date: Option<String>,
    pub user_id: PrimaryKey,
    /// Assigned by the server when the subscription is created
    pub subscribed_on: DateTime<Utc>,
    pub image_url: Option<String>,
    pub url: String,
    pub author_name: Option<String>,
}
