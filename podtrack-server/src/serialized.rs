//! All schemas that are exposed from endpoints are defined here
//! along with the [ToSerialized] impls

use chrono::{DateTime, Utc};
use podtrack_db::{
    AuthorData, PodcastData, PrimaryKey, ProgressData, QueueEntryData, SubscriptionData, UserData,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct User {
    id: PrimaryKey,
    name: String,
    email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Author {
    id: PrimaryKey,
    name: String,
    email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Podcast {
    id: PrimaryKey,
    name: String,
    author_id: PrimaryKey,
    description: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Progress {
    id: PrimaryKey,
    user_id: PrimaryKey,
    podcast_id: PrimaryKey,
    progress: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueueEntry {
    id: PrimaryKey,
    user_id: PrimaryKey,
    podcast_id: PrimaryKey,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Subscription {
    id: PrimaryKey,
    title: String,
    description: Option<String>,
    language: Option<String>,
    pub_date: Option<String>,
    user_id: PrimaryKey,
    subscribed_on: DateTime<Utc>,
    image_url: Option<String>,
    url: String,
    author_name: Option<String>,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl<I, O> ToSerialized<Vec<O>> for Vec<I>
where
    I: ToSerialized<O>,
    O: Serialize,
{
    fn to_serialized(&self) -> Vec<O> {
        self.iter().map(|x| x.to_serialized()).collect()
    }
}

impl ToSerialized<User> for UserData {
    fn to_serialized(&self) -> User {
        // Note: password and salt are deliberately left out
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl ToSerialized<Author> for AuthorData {
    fn to_serialized(&self) -> Author {
        Author {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl ToSerialized<Podcast> for PodcastData {
    fn to_serialized(&self) -> Podcast {
        Podcast {
            id: self.id,
            name: self.name.clone(),
            author_id: self.author_id,
            description: self.description.clone(),
            created_at: self.created_at,
        }
    }
}

impl ToSerialized<Progress> for ProgressData {
    fn to_serialized(&self) -> Progress {
        Progress {
            id: self.id,
            user_id: self.user_id,
            podcast_id: self.podcast_id,
            progress: self.progress,
        }
    }
}

impl ToSerialized<QueueEntry> for QueueEntryData {
    fn to_serialized(&self) -> QueueEntry {
        QueueEntry {
            id: self.id,
            user_id: self.user_id,
            podcast_id: self.podcast_id,
        }
    }
}

impl ToSerialized<Subscription> for SubscriptionData {
    fn to_serialized(&self) -> Subscription {
        Subscription {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            pub_date: self.pub_date.clone(),
            user_id: self.user_id,
            subscribed_on: self.subscribed_on,
            image_url: self.image_url.clone(),
            url: self.url.clone(),
            author_name: self.author_name.clone(),
        }
    }
}
