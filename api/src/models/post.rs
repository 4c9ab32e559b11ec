use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub group_id: Option<Uuid>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Insertion order, assigned by `PostStore`. Breaks `created_at` ties.
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl Post {
    pub fn new(author_id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text: text.into(),
            group_id: None,
            image: None,
            created_at: Utc::now(),
            seq: 0,
        }
    }
}
