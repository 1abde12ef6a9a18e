use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError, Sqlite, SqlitePool, Transaction,
};

use crate::{
    AuthorData, Database, DatabaseError, IntoDatabaseError, NewAuthor, NewPodcast, NewProgress,
    NewQueueEntry, NewSubscription, NewUser, PodcastData, PrimaryKey, ProgressData, QueueEntryData,
    Result, SubscriptionData, UpdatedAuthor, UpdatedPodcast, UpdatedProgress, UpdatedQueueEntry,
    UpdatedSubscription, UpdatedUser, UserData,
};

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL,
        salt TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS podcasts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        author_id INTEGER NOT NULL,
        description TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS progress (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        podcast_id INTEGER NOT NULL,
        progress INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS queue_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        podcast_id INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS subscriptions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        language TEXT,
        pub_date TEXT,
        user_id INTEGER NOT NULL,
        subscribed_on TEXT NOT NULL,
        image_url TEXT,
        url TEXT NOT NULL,
        author_name TEXT
    )",
];

/// A sqlite database implementation for podtrack
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| e.any())?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| e.any())?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Creates a database backed by memory, which is lost when dropped.
    /// The pool is pinned to a single connection, since every sqlite
    /// memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| e.any())?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    async fn migrate(&self) -> Result<()> {
        debug!("Applying database schema");

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| e.any())?;
        }

        Ok(())
    }
}

/// Ensures a referenced row exists before a write that depends on it,
/// within the same transaction as the write itself.
async fn ensure_exists(
    tx: &mut Transaction<'_, Sqlite>,
    table: &'static str,
    resource: &'static str,
    id: PrimaryKey,
) -> Result<()> {
    let sql = format!("SELECT id FROM {table} WHERE id = ?");

    sqlx::query(&sql)
        .bind(id)
        .fetch_one(&mut **tx)
        .await
        .map(|_| ())
        .map_err(|e| e.not_found_or(resource, "id"))
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn user_by_id(&self, user_id: PrimaryKey) -> Result<UserData> {
        sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("User", "id"))
    }

    async fn list_users(&self) -> Result<Vec<UserData>> {
        sqlx::query_as("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<UserData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let user: UserData = sqlx::query_as(
            "INSERT INTO users (name, email, password, salt) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(new_user.name)
        .bind(new_user.email)
        .bind(new_user.password)
        .bind(new_user.salt)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(user)
    }

    async fn update_user(&self, updated_user: UpdatedUser) -> Result<UserData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let user: UserData = sqlx::query_as("SELECT * FROM users WHERE id = ?")
            .bind(updated_user.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| e.not_found_or("User", "id"))?;

        let user: UserData =
            sqlx::query_as("UPDATE users SET name = ?, email = ? WHERE id = ? RETURNING *")
                .bind(updated_user.name.unwrap_or(user.name))
                .bind(updated_user.email.unwrap_or(user.email))
                .bind(updated_user.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(user)
    }

    async fn delete_user(&self, user_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "users", "User", user_id).await?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }

    async fn author_by_id(&self, author_id: PrimaryKey) -> Result<AuthorData> {
        sqlx::query_as("SELECT * FROM authors WHERE id = ?")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("Author", "id"))
    }

    async fn list_authors(&self) -> Result<Vec<AuthorData>> {
        sqlx::query_as("SELECT * FROM authors")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_author(&self, new_author: NewAuthor) -> Result<AuthorData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let author: AuthorData =
            sqlx::query_as("INSERT INTO authors (name, email) VALUES (?, ?) RETURNING *")
                .bind(new_author.name)
                .bind(new_author.email)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(author)
    }

    async fn update_author(&self, updated_author: UpdatedAuthor) -> Result<AuthorData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let author: AuthorData = sqlx::query_as("SELECT * FROM authors WHERE id = ?")
            .bind(updated_author.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| e.not_found_or("Author", "id"))?;

        let author: AuthorData =
            sqlx::query_as("UPDATE authors SET name = ?, email = ? WHERE id = ? RETURNING *")
                .bind(updated_author.name.unwrap_or(author.name))
                .bind(updated_author.email.unwrap_or(author.email))
                .bind(updated_author.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(author)
    }

    async fn delete_author(&self, author_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "authors", "Author", author_id).await?;

        sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(author_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }

    async fn podcast_by_id(&self, podcast_id: PrimaryKey) -> Result<PodcastData> {
        sqlx::query_as("SELECT * FROM podcasts WHERE id = ?")
            .bind(podcast_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("Podcast", "id"))
    }

    async fn list_podcasts(&self) -> Result<Vec<PodcastData>> {
        sqlx::query_as("SELECT * FROM podcasts")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_podcast(&self, new_podcast: NewPodcast) -> Result<PodcastData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "authors", "Author", new_podcast.author_id).await?;

        let podcast: PodcastData = sqlx::query_as(
            "INSERT INTO podcasts (name, author_id, description, created_at)
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(new_podcast.name)
        .bind(new_podcast.author_id)
        .bind(new_podcast.description)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(podcast)
    }

    async fn update_podcast(&self, updated_podcast: UpdatedPodcast) -> Result<PodcastData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let podcast: PodcastData = sqlx::query_as("SELECT * FROM podcasts WHERE id = ?")
            .bind(updated_podcast.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| e.not_found_or("Podcast", "id"))?;

        if let Some(author_id) = updated_podcast.author_id {
            ensure_exists(&mut tx, "authors", "Author", author_id).await?;
        }

        let podcast: PodcastData = sqlx::query_as(
            "UPDATE podcasts SET name = ?, author_id = ?, description = ?
             WHERE id = ? RETURNING *",
        )
        .bind(updated_podcast.name.unwrap_or(podcast.name))
        .bind(updated_podcast.author_id.unwrap_or(podcast.author_id))
        .bind(updated_podcast.description.unwrap_or(podcast.description))
        .bind(updated_podcast.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(podcast)
    }

    async fn delete_podcast(&self, podcast_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "podcasts", "Podcast", podcast_id).await?;

        sqlx::query("DELETE FROM podcasts WHERE id = ?")
            .bind(podcast_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }

    async fn progress_by_id(&self, progress_id: PrimaryKey) -> Result<ProgressData> {
        sqlx::query_as("SELECT * FROM progress WHERE id = ?")
            .bind(progress_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("Progress", "id"))
    }

    async fn progress_by_user_and_podcast(
        &self,
        user_id: PrimaryKey,
        podcast_id: PrimaryKey,
    ) -> Result<ProgressData> {
        sqlx::query_as("SELECT * FROM progress WHERE user_id = ? AND podcast_id = ?")
            .bind(user_id)
            .bind(podcast_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("Progress", "user_id:podcast_id"))
    }

    async fn list_progress(&self) -> Result<Vec<ProgressData>> {
        sqlx::query_as("SELECT * FROM progress")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_progress(&self, new_progress: NewProgress) -> Result<ProgressData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "users", "User", new_progress.user_id).await?;
        ensure_exists(&mut tx, "podcasts", "Podcast", new_progress.podcast_id).await?;

        let progress: ProgressData = sqlx::query_as(
            "INSERT INTO progress (user_id, podcast_id, progress) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(new_progress.user_id)
        .bind(new_progress.podcast_id)
        .bind(new_progress.progress)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(progress)
    }

    async fn update_progress(&self, updated_progress: UpdatedProgress) -> Result<ProgressData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let progress: ProgressData =
            sqlx::query_as("SELECT * FROM progress WHERE user_id = ? AND podcast_id = ?")
                .bind(updated_progress.user_id)
                .bind(updated_progress.podcast_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| e.not_found_or("Progress", "user_id:podcast_id"))?;

        let progress: ProgressData =
            sqlx::query_as("UPDATE progress SET progress = ? WHERE id = ? RETURNING *")
                .bind(updated_progress.progress.unwrap_or(progress.progress))
                .bind(progress.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(progress)
    }

    async fn delete_progress(&self, progress_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "progress", "Progress", progress_id).await?;

        sqlx::query("DELETE FROM progress WHERE id = ?")
            .bind(progress_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }

    async fn queue_entry_by_id(&self, entry_id: PrimaryKey) -> Result<QueueEntryData> {
        sqlx::query_as("SELECT * FROM queue_entries WHERE id = ?")
            .bind(entry_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("Queue entry", "id"))
    }

    async fn list_queue(&self) -> Result<Vec<QueueEntryData>> {
        sqlx::query_as("SELECT * FROM queue_entries")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_queue_entry(&self, new_entry: NewQueueEntry) -> Result<QueueEntryData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "users", "User", new_entry.user_id).await?;
        ensure_exists(&mut tx, "podcasts", "Podcast", new_entry.podcast_id).await?;

        let entry: QueueEntryData = sqlx::query_as(
            "INSERT INTO queue_entries (user_id, podcast_id) VALUES (?, ?) RETURNING *",
        )
        .bind(new_entry.user_id)
        .bind(new_entry.podcast_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(entry)
    }

    async fn update_queue_entry(
        &self,
        updated_entry: UpdatedQueueEntry,
    ) -> Result<QueueEntryData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let entry: QueueEntryData = sqlx::query_as("SELECT * FROM queue_entries WHERE id = ?")
            .bind(updated_entry.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| e.not_found_or("Queue entry", "id"))?;

        if let Some(user_id) = updated_entry.user_id {
            ensure_exists(&mut tx, "users", "User", user_id).await?;
        }

        if let Some(podcast_id) = updated_entry.podcast_id {
            ensure_exists(&mut tx, "podcasts", "Podcast", podcast_id).await?;
        }

        let entry: QueueEntryData = sqlx::query_as(
            "UPDATE queue_entries SET user_id = ?, podcast_id = ? WHERE id = ? RETURNING *",
        )
        .bind(updated_entry.user_id.unwrap_or(entry.user_id))
        .bind(updated_entry.podcast_id.unwrap_or(entry.podcast_id))
        .bind(updated_entry.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(entry)
    }

    async fn delete_queue_entry(&self, entry_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "queue_entries", "Queue entry", entry_id).await?;

        sqlx::query("DELETE FROM queue_entries WHERE id = ?")
            .bind(entry_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }

    async fn subscription_by_id(&self, subscription_id: PrimaryKey) -> Result<SubscriptionData> {
        sqlx::query_as("SELECT * FROM subscriptions WHERE id = ?")
            .bind(subscription_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("Subscription", "id"))
    }

    async fn list_subscriptions(&self) -> Result<Vec<SubscriptionData>> {
        sqlx::query_as("SELECT * FROM subscriptions")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_subscription(
        &self,
        new_subscription: NewSubscription,
    ) -> Result<SubscriptionData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "users", "User", new_subscription.user_id).await?;

        let subscription: SubscriptionData = sqlx::query_as(
            "INSERT INTO subscriptions
                (title, description, language, pub_date, user_id, subscribed_on,
                 image_url, url, author_name)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(new_subscription.title)
        .bind(new_subscription.description)
        .bind(new_subscription.language)
        .bind(new_subscription.pub_date)
        .bind(new_subscription.user_id)
        .bind(Utc::now())
        .bind(new_subscription.image_url)
        .bind(new_subscription.url)
        .bind(new_subscription.author_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(subscription)
    }

    async fn update_subscription(
        &self,
        updated_subscription: UpdatedSubscription,
    ) -> Result<SubscriptionData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let subscription: SubscriptionData =
            sqlx::query_as("SELECT * FROM subscriptions WHERE id = ?")
                .bind(updated_subscription.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| e.not_found_or("Subscription", "id"))?;

        let subscription: SubscriptionData = sqlx::query_as(
            "UPDATE subscriptions SET
                title = ?, description = ?, language = ?, pub_date = ?,
                image_url = ?, url = ?, author_name = ?
             WHERE id = ? RETURNING *",
        )
        .bind(updated_subscription.title.unwrap_or(subscription.title))
        .bind(updated_subscription.description.or(subscription.description))
        .bind(updated_subscription.language.or(subscription.language))
        .bind(updated_subscription.pub_date.or(subscription.pub_date))
        .bind(updated_subscription.image_url.or(subscription.image_url))
        .bind(updated_subscription.url.unwrap_or(subscription.url))
        .bind(updated_subscription.author_name.or(subscription.author_name))
        .bind(updated_subscription.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;
        Ok(subscription)
    }

    async fn delete_subscription(&self, subscription_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        ensure_exists(&mut tx, "subscriptions", "Subscription", subscription_id).await?;

        sqlx::query("DELETE FROM subscriptions WHERE id = ?")
            .bind(subscription_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }
}

impl IntoDatabaseError for SqlxError {
    fn any(self) -> DatabaseError {
        DatabaseError::Internal(Box::new(self))
    }

    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError {
        match self {
            SqlxError::RowNotFound => DatabaseError::NotFound {
                resource,
                identifier,
            },
            e => Self::any(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Database, DatabaseError};

    async fn database() -> SqliteDatabase {
        SqliteDatabase::in_memory().await.expect("database opens")
    }

    async fn seed_user(db: &SqliteDatabase) -> UserData {
        db.create_user(NewUser {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            password: "hunter2".to_string(),
            salt: "pepper".to_string(),
        })
        .await
        .expect("user is created")
    }

    async fn seed_podcast(db: &SqliteDatabase) -> PodcastData {
        let author = db
            .create_author(NewAuthor {
                name: "Beth".to_string(),
                email: "b@x.com".to_string(),
            })
            .await
            .expect("author is created");

        db.create_podcast(NewPodcast {
            name: "My Podcast".to_string(),
            author_id: author.id,
            description: "A podcast about technology".to_string(),
        })
        .await
        .expect("podcast is created")
    }

    fn is_not_found<T: std::fmt::Debug>(result: Result<T>) -> bool {
        matches!(result, Err(DatabaseError::NotFound { .. }))
    }

    #[tokio::test]
    async fn create_and_fetch_user() {
        let db = database().await;
        let user = seed_user(&db).await;

        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "a@x.com");

        let fetched = db.user_by_id(user.id).await.expect("user exists");
        assert_eq!(fetched.id, user.id);
        assert_eq!(fetched.name, "Ann");

        let all = db.list_users().await.expect("users are listed");
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let db = database().await;
        let user = seed_user(&db).await;

        let updated = db
            .update_user(UpdatedUser {
                id: user.id,
                name: None,
                email: Some("new@x.com".to_string()),
            })
            .await
            .expect("user is updated");

        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.email, "new@x.com");

        // An empty update is a no-op
        let unchanged = db
            .update_user(UpdatedUser {
                id: user.id,
                name: None,
                email: None,
            })
            .await
            .expect("user is updated");

        assert_eq!(unchanged.name, "Ann");
        assert_eq!(unchanged.email, "new@x.com");
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let db = database().await;

        assert!(is_not_found(db.user_by_id(999).await));
        assert!(is_not_found(db.podcast_by_id(999).await));
        assert!(is_not_found(db.delete_author(999).await));
        assert!(is_not_found(
            db.update_user(UpdatedUser {
                id: 999,
                name: Some("Nobody".to_string()),
                email: None,
            })
            .await
        ));
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let db = database().await;
        let user = seed_user(&db).await;

        db.delete_user(user.id).await.expect("user is deleted");
        assert!(is_not_found(db.user_by_id(user.id).await));
        assert!(is_not_found(db.delete_user(user.id).await));
    }

    #[tokio::test]
    async fn podcast_requires_existing_author() {
        let db = database().await;

        let result = db
            .create_podcast(NewPodcast {
                name: "Orphan".to_string(),
                author_id: 42,
                description: "No author".to_string(),
            })
            .await;

        assert!(is_not_found(result));
        assert!(db.list_podcasts().await.expect("podcasts list").is_empty());
    }

    #[tokio::test]
    async fn progress_requires_existing_references() {
        let db = database().await;
        let user = seed_user(&db).await;

        let result = db
            .create_progress(NewProgress {
                user_id: user.id,
                podcast_id: 42,
                progress: 30,
            })
            .await;

        assert!(is_not_found(result));
        assert!(db.list_progress().await.expect("progress list").is_empty());
    }

    #[tokio::test]
    async fn progress_composite_lookup_and_update() {
        let db = database().await;
        let user = seed_user(&db).await;
        let podcast = seed_podcast(&db).await;

        let created = db
            .create_progress(NewProgress {
                user_id: user.id,
                podcast_id: podcast.id,
                progress: 30,
            })
            .await
            .expect("progress is created");

        let found = db
            .progress_by_user_and_podcast(user.id, podcast.id)
            .await
            .expect("progress is found");
        assert_eq!(found.id, created.id);
        assert_eq!(found.progress, 30);

        let updated = db
            .update_progress(UpdatedProgress {
                user_id: user.id,
                podcast_id: podcast.id,
                progress: Some(75),
            })
            .await
            .expect("progress is updated");
        assert_eq!(updated.progress, 75);

        assert!(is_not_found(
            db.progress_by_user_and_podcast(user.id, 999).await
        ));
    }

    #[tokio::test]
    async fn queue_entry_crud() {
        let db = database().await;
        let user = seed_user(&db).await;
        let podcast = seed_podcast(&db).await;

        let entry = db
            .create_queue_entry(NewQueueEntry {
                user_id: user.id,
                podcast_id: podcast.id,
            })
            .await
            .expect("entry is created");

        assert_eq!(entry.user_id, user.id);
        assert_eq!(entry.podcast_id, podcast.id);

        // Updating to a missing podcast is rejected and changes nothing
        let result = db
            .update_queue_entry(UpdatedQueueEntry {
                id: entry.id,
                user_id: None,
                podcast_id: Some(999),
            })
            .await;
        assert!(is_not_found(result));

        let unchanged = db
            .queue_entry_by_id(entry.id)
            .await
            .expect("entry still exists");
        assert_eq!(unchanged.podcast_id, podcast.id);

        db.delete_queue_entry(entry.id)
            .await
            .expect("entry is deleted");
        assert!(db.list_queue().await.expect("queue list").is_empty());
    }

    #[tokio::test]
    async fn subscription_crud() {
        let db = database().await;
        let user = seed_user(&db).await;

        let subscription = db
            .create_subscription(NewSubscription {
                title: "Tech Weekly".to_string(),
                description: None,
                language: Some("en".to_string()),
                pub_date: None,
                user_id: user.id,
                image_url: None,
                url: "https://example.com/feed.xml".to_string(),
                author_name: None,
            })
            .await
            .expect("subscription is created");

        assert_eq!(subscription.title, "Tech Weekly");
        assert_eq!(subscription.user_id, user.id);

        let updated = db
            .update_subscription(UpdatedSubscription {
                id: subscription.id,
                title: None,
                description: Some("All things tech".to_string()),
                language: None,
                pub_date: None,
                image_url: None,
                url: None,
                author_name: None,
            })
            .await
            .expect("subscription is updated");

        assert_eq!(updated.title, "Tech Weekly");
        assert_eq!(updated.description.as_deref(), Some("All things tech"));
        assert_eq!(updated.subscribed_on, subscription.subscribed_on);

        // Subscriptions may not reference a missing user
        let result = db
            .create_subscription(NewSubscription {
                title: "Nobody's Feed".to_string(),
                description: None,
                language: None,
                pub_date: None,
                user_id: 999,
                image_url: None,
                url: "https://example.com/none.xml".to_string(),
                author_name: None,
            })
            .await;
        assert!(is_not_found(result));

        db.delete_subscription(subscription.id)
            .await
            .expect("subscription is deleted");
        assert!(db
            .list_subscriptions()
            .await
            .expect("subscription list")
            .is_empty());
    }
}
