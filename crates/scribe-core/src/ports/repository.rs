use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::pagination::PageWindow;
use crate::domain::{Blog, Post, PostPatch};
use crate::error::RepoError;

/// Posts collection access.
///
/// Implementations are injected capabilities; nothing in the domain layer
/// reaches for a global connection. "No match" outcomes on update and delete
/// are values, not errors.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Persist a new post and return it as stored.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Overwrite the mutable fields of the matching post. Returns whether
    /// exactly one record was matched.
    async fn update(&self, id: Uuid, patch: &PostPatch) -> Result<bool, RepoError>;

    /// Returns whether exactly one record was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Remove every post unconditionally. Intended for test/reset workflows.
    async fn delete_all(&self) -> Result<(), RepoError>;

    /// Total number of posts in the collection.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Fetch one sorted window of the collection.
    async fn find_page(&self, window: &PageWindow) -> Result<Vec<Post>, RepoError>;
}

/// Read-only view of the blogs collection, which is owned by the blogs
/// access layer. The posts layer only ever asks "does this blog exist, and
/// what is its name".
#[async_trait]
pub trait BlogDirectory: Send + Sync {
    async fn find_blog_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError>;
}
