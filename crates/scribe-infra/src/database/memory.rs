//! In-memory repository implementations - used as fallback when no database
//! is configured, and as test doubles for exercising the service layer
//! without a live store.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::pagination::{PageWindow, PostSortField, SortDirection};
use scribe_core::domain::{Blog, Post, PostPatch};
use scribe_core::error::RepoError;
use scribe_core::ports::{BlogDirectory, PostRepository};

/// In-memory posts store using a HashMap with async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Post, b: &Post, field: PostSortField) -> Ordering {
    match field {
        PostSortField::Title => a.title.cmp(&b.title),
        PostSortField::ShortDescription => a.short_description.cmp(&b.short_description),
        PostSortField::Content => a.content.cmp(&b.content),
        PostSortField::BlogId => a.blog_id.cmp(&b.blog_id),
        PostSortField::BlogName => a.blog_name.cmp(&b.blog_name),
        PostSortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        // Creation order stands in for the store's natural order.
        posts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("post already exists".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, patch: &PostPatch) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        match store.get_mut(&id) {
            Some(post) => {
                post.title = patch.title.clone();
                post.short_description = patch.short_description.clone();
                post.content = patch.content.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.clear();
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.len() as u64)
    }

    async fn find_page(&self, window: &PageWindow) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.values().cloned().collect();
        posts.sort_by(|a, b| compare(a, b, window.sort_by));
        if window.direction == SortDirection::Descending {
            posts.reverse();
        }
        Ok(posts
            .into_iter()
            .skip(window.skip as usize)
            .take(window.limit as usize)
            .collect())
    }
}

/// In-memory blog directory. Blogs are seeded with [`put`](Self::put), since
/// the posts layer itself never creates them.
pub struct InMemoryBlogDirectory {
    store: RwLock<HashMap<Uuid, Blog>>,
}

impl InMemoryBlogDirectory {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub async fn put(&self, blog: Blog) {
        let mut store = self.store.write().await;
        store.insert(blog.id, blog);
    }
}

impl Default for InMemoryBlogDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogDirectory for InMemoryBlogDirectory {
    async fn find_blog_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use scribe_core::domain::PostDraft;

    use super::*;

    fn post(title: &str, offset_secs: i64) -> Post {
        let draft = PostDraft {
            title: title.to_owned(),
            short_description: "short".to_owned(),
            content: "content".to_owned(),
            blog_id: String::new(),
        };
        let mut post = Post::new(draft, Uuid::new_v4(), "blog".to_owned());
        post.created_at = Utc::now() + Duration::seconds(offset_secs);
        post
    }

    #[tokio::test]
    async fn insert_then_find_by_id() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(post("a", 0)).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_constraint_violation() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(post("a", 0)).await.unwrap();

        let err = repo.insert(created).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn update_reports_match_and_leaves_immutable_fields() {
        let repo = InMemoryPostRepository::new();
        let created = repo.insert(post("a", 0)).await.unwrap();

        let patch = PostPatch {
            title: "b".to_owned(),
            short_description: "new short".to_owned(),
            content: "new content".to_owned(),
        };
        assert!(repo.update(created.id, &patch).await.unwrap());
        assert!(!repo.update(Uuid::new_v4(), &patch).await.unwrap());

        let updated = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(updated.title, "b");
        assert_eq!(updated.blog_name, created.blog_name);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn delete_all_clears_the_store() {
        let repo = InMemoryPostRepository::new();
        for i in 0..3 {
            repo.insert(post("p", i)).await.unwrap();
        }

        repo.delete_all().await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_page_sorts_and_windows() {
        let repo = InMemoryPostRepository::new();
        for i in 0..5 {
            repo.insert(post(&format!("t{i}"), i)).await.unwrap();
        }

        let window = PageWindow {
            skip: 1,
            limit: 2,
            sort_by: PostSortField::CreatedAt,
            direction: SortDirection::Descending,
        };
        let page = repo.find_page(&window).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].title, "t3");
        assert_eq!(page[1].title, "t2");
    }

    #[tokio::test]
    async fn find_page_sorts_by_title() {
        let repo = InMemoryPostRepository::new();
        for title in ["banana", "apple", "cherry"] {
            repo.insert(post(title, 0)).await.unwrap();
        }

        let window = PageWindow {
            skip: 0,
            limit: 10,
            sort_by: PostSortField::Title,
            direction: SortDirection::Ascending,
        };
        let page = repo.find_page(&window).await.unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["apple", "banana", "cherry"]);
    }

    #[tokio::test]
    async fn blog_directory_lookup() {
        let blogs = InMemoryBlogDirectory::new();
        let blog = Blog {
            id: Uuid::new_v4(),
            name: "tech".to_owned(),
        };
        blogs.put(blog.clone()).await;

        assert_eq!(blogs.find_blog_by_id(blog.id).await.unwrap(), Some(blog));
        assert_eq!(blogs.find_blog_by_id(Uuid::new_v4()).await.unwrap(), None);
    }
}
