use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - an article published under a blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub blog_id: Uuid,
    pub blog_name: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post under the given blog.
    ///
    /// `blog_name` is a snapshot of the blog's name at this moment; it is
    /// never recomputed, so later blog renames or deletes do not propagate.
    pub fn new(draft: PostDraft, blog_id: Uuid, blog_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            short_description: draft.short_description,
            content: draft.content,
            blog_id,
            blog_name,
            created_at: Utc::now(),
        }
    }
}

/// Validated, trimmed post payload. Produced by the validation chain; the
/// only shape field data takes on its way to persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub short_description: String,
    pub content: String,
    /// Raw identifier string as submitted; resolved against the blog
    /// directory at creation time. Updates ignore it.
    pub blog_id: String,
}

/// The fields an update is allowed to touch. `blog_id`, `blog_name` and
/// `created_at` are write-once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPatch {
    pub title: String,
    pub short_description: String,
    pub content: String,
}

impl From<&PostDraft> for PostPatch {
    fn from(draft: &PostDraft) -> Self {
        Self {
            title: draft.title.clone(),
            short_description: draft.short_description.clone(),
            content: draft.content.clone(),
        }
    }
}
