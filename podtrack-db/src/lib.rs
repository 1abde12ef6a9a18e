use async_trait::async_trait;
use thiserror::Error;

mod data;
pub use data::*;

mod sqlite;
pub use sqlite::*;

pub type Result<T> = std::result::Result<T, DatabaseError>;
pub type BoxedDatabase = Box<dyn Database>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// An unknown or internal error happened with the database
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    /// A resource in the database doesn't exist
    #[error("{resource}:{identifier} doesn't exist")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
}

/// Helper trait to reduce boilerplate
pub trait IntoDatabaseError {
    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError;
    fn any(self) -> DatabaseError;
}

/// Represents a type that can fetch and store podtrack data in a database
#[async_trait]
pub trait Database: Send + Sync {
    async fn user_by_id(&self, user_id: PrimaryKey) -> Result<UserData>;
    async fn list_users(&self) -> Result<Vec<UserData>>;
    async fn create_user(&self, new_user: NewUser) -> Result<UserData>;
    async fn update_user(&self, updated_user: UpdatedUser) -> Result<UserData>;
    async fn delete_user(&self, user_id: PrimaryKey) -> Result<()>;

    async fn author_by_id(&self, author_id: PrimaryKey) -> Result<AuthorData>;
    async fn list_authors(&self) -> Result<Vec<AuthorData>>;
    async fn create_author(&self, new_author: NewAuthor) -> Result<AuthorData>;
    async fn update_author(&self, updated_author: UpdatedAuthor) -> Result<AuthorData>;
    async fn delete_author(&self, author_id: PrimaryKey) -> Result<()>;

    async fn podcast_by_id(&self, podcast_id: PrimaryKey) -> Result<PodcastData>;
    async fn list_podcasts(&self) -> Result<Vec<PodcastData>>;
    async fn create_podcast(&self, new_podcast: NewPodcast) -> Result<PodcastData>;
    async fn update_podcast(&self, updated_podcast: UpdatedPodcast) -> Result<PodcastData>;
    async fn delete_podcast(&self, podcast_id: PrimaryKey) -> Result<()>;

    async fn progress_by_id(&self, progress_id: PrimaryKey) -> Result<ProgressData>;
    async fn progress_by_user_and_podcast(
        &self,
        user_id: PrimaryKey,
        podcast_id: PrimaryKey,
    ) -> Result<ProgressData>;
    async fn list_progress(&self) -> Result<Vec<ProgressData>>;
    async fn create_progress(&self, new_progress: NewProgress) -> Result<ProgressData>;
    async fn update_progress(&self, updated_progress: UpdatedProgress) -> Result<ProgressData>;
    async fn delete_progress(&self, progress_id: PrimaryKey) -> Result<()>;

    async fn queue_entry_by_id(&self, entry_id: PrimaryKey) -> Result<QueueEntryData>;
    async fn list_queue(&self) -> Result<Vec<QueueEntryData>>;
    async fn create_queue_entry(&self, new_entry: NewQueueEntry) -> Result<QueueEntryData>;
    async fn update_queue_entry(&self, updated_entry: UpdatedQueueEntry)
        -> Result<QueueEntryData>;
    async fn delete_queue_entry(&self, entry_id: PrimaryKey) -> Result<()>;

    async fn subscription_by_id(&self, subscription_id: PrimaryKey) -> Result<SubscriptionData>;
    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionData>>;
    async fn create_subscription(
        &self,
        new_subscription: NewSubscription,
    ) -> Result<SubscriptionData>;
    async fn update_subscription(
        &self,
        updated_subscription: UpdatedSubscription,
    ) -> Result<SubscriptionData>;
    async fn delete_subscription(&self, subscription_id: PrimaryKey) -> Result<()>;
}

#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub salt: String,
}

#[derive(Debug)]
pub struct UpdatedUser {
    pub id: PrimaryKey,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
}

#[derive(Debug)]
pub struct UpdatedAuthor {
    pub id: PrimaryKey,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct NewPodcast {
    pub name: String,
    /// The author of the new podcast, which must exist
    pub author_id: PrimaryKey,
    pub description: String,
}

#[derive(Debug)]
pub struct UpdatedPodcast {
    pub id: PrimaryKey,
    pub name: Option<String>,
    pub author_id: Option<PrimaryKey>,
    pub description: Option<String>,
}

#[derive(Debug)]
pub struct NewProgress {
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
    pub progress: i64,
}

#[derive(Debug)]
pub struct UpdatedProgress {
    /// Progress records are addressed by the pair of rows they reference
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
    pub progress: Option<i64>,
}

#[derive(Debug)]
pub struct NewQueueEntry {
    pub user_id: PrimaryKey,
    pub podcast_id: PrimaryKey,
}

#[derive(Debug)]
pub struct UpdatedQueueEntry {
    pub id: PrimaryKey,
    pub user_id: Option<PrimaryKey>,
    pub podcast_id: Option<PrimaryKey>,
}

#[derive(Debug)]
pub struct NewSubscription {
    pub title: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub pub_date: Option<String>,
    /// The subscribing user, which must exist
    pub user_id: PrimaryKey,
    pub image_url: Option<String>,
    pub url: String,
    pub author_name: Option<String>,
}

#[derive(Debug)]
pub struct UpdatedSubscription {
    pub id: PrimaryKey,
    pub title: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub pub_date: Option<String>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub author_name: Option<String>,
}
