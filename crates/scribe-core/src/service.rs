//! Posts access layer - CRUD and paginated listing over injected storage
//! capabilities.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::pagination::{Page, PageRequest};
use crate::domain::{Post, PostDraft, PostPatch};
use crate::error::DomainError;
use crate::ports::{BlogDirectory, PostRepository};

/// Parse an inbound identifier string. Malformed identifiers are reported
/// as `InvalidIdentifier`, which the boundary maps to a not-found outcome
/// rather than an internal error.
pub fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id).map_err(|_| DomainError::InvalidIdentifier(id.to_owned()))
}

/// CRUD and listing operations over the posts collection.
#[derive(Clone)]
pub struct PostsService {
    posts: Arc<dyn PostRepository>,
    blogs: Arc<dyn BlogDirectory>,
}

impl PostsService {
    pub fn new(posts: Arc<dyn PostRepository>, blogs: Arc<dyn BlogDirectory>) -> Self {
        Self { posts, blogs }
    }

    pub async fn find_all_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_all().await?)
    }

    pub async fn find_post_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let id = parse_id(id)?;
        Ok(self.posts.find_by_id(id).await?)
    }

    /// Create a post under the blog named by `draft.blog_id`.
    ///
    /// Returns `None` when the blog does not resolve; the validation chain
    /// is expected to have rejected that case already, so this layer treats
    /// it as a quiet no-op rather than an error. The existence lookup and
    /// the insert are separate statements - a blog deleted in between still
    /// yields a post carrying its last observed name.
    pub async fn create_post(&self, draft: PostDraft) -> Result<Option<Post>, DomainError> {
        let Ok(blog_id) = Uuid::parse_str(&draft.blog_id) else {
            return Ok(None);
        };
        let Some(blog) = self.blogs.find_blog_by_id(blog_id).await? else {
            return Ok(None);
        };

        let post = Post::new(draft, blog.id, blog.name);
        Ok(Some(self.posts.insert(post).await?))
    }

    /// Overwrite `title`, `short_description` and `content` of the matching
    /// post. Returns whether a record was matched.
    pub async fn update_post(&self, id: &str, draft: PostDraft) -> Result<bool, DomainError> {
        let id = parse_id(id)?;
        let patch = PostPatch::from(&draft);
        Ok(self.posts.update(id, &patch).await?)
    }

    pub async fn delete_post_by_id(&self, id: &str) -> Result<bool, DomainError> {
        let id = parse_id(id)?;
        Ok(self.posts.delete_by_id(id).await?)
    }

    pub async fn delete_all_posts(&self) -> Result<(), DomainError> {
        Ok(self.posts.delete_all().await?)
    }

    /// Windowed, sorted listing with count metadata.
    ///
    /// The total is a separate full count of the collection, so a page
    /// beyond the end yields empty `items` alongside the real `pagesCount`.
    pub async fn paging_find_posts(&self, request: PageRequest) -> Result<Page<Post>, DomainError> {
        let items = self.posts.find_page(&request.window()).await?;
        let total_count = self.posts.count().await?;

        Ok(Page {
            pages_count: request.pages_count(total_count),
            page: request.page,
            page_size: request.page_size,
            total_count,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::Blog;
    use crate::domain::pagination::{PageWindow, SortDirection};
    use crate::error::RepoError;

    /// Test double over a Vec. Windowed reads sort by creation time, the
    /// only field these tests page over.
    #[derive(Default)]
    struct MemPosts(Mutex<Vec<Post>>);

    #[async_trait]
    impl PostRepository for MemPosts {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
            Ok(self.0.lock().unwrap().iter().find(|p| p.id == id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            self.0.lock().unwrap().push(post.clone());
            Ok(post)
        }

        async fn update(&self, id: Uuid, patch: &PostPatch) -> Result<bool, RepoError> {
            let mut posts = self.0.lock().unwrap();
            match posts.iter_mut().find(|p| p.id == id) {
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
            let mut posts = self.0.lock().unwrap();
            let before = posts.len();
            posts.retain(|p| p.id != id);
            Ok(posts.len() < before)
        }

        async fn delete_all(&self) -> Result<(), RepoError> {
            self.0.lock().unwrap().clear();
            Ok(())
        }

        async fn count(&self) -> Result<u64, RepoError> {
            Ok(self.0.lock().unwrap().len() as u64)
        }

        async fn find_page(&self, window: &PageWindow) -> Result<Vec<Post>, RepoError> {
            let mut posts = self.0.lock().unwrap().clone();
            posts.sort_by(|a, b| a.created_at.cmp(&b.created_at));
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

    #[derive(Default)]
    struct MemBlogs(Mutex<HashMap<Uuid, Blog>>);

    #[async_trait]
    impl BlogDirectory for MemBlogs {
        async fn find_blog_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
            Ok(self.0.lock().unwrap().get(&id).cloned())
        }
    }

    fn service_with_blog() -> (PostsService, Blog) {
        let blog = Blog {
            id: Uuid::new_v4(),
            name: "tech".to_owned(),
        };
        let blogs = MemBlogs::default();
        blogs.0.lock().unwrap().insert(blog.id, blog.clone());
        let service = PostsService::new(Arc::new(MemPosts::default()), Arc::new(blogs));
        (service, blog)
    }

    fn draft(blog_id: &str) -> PostDraft {
        PostDraft {
            title: "Title".to_owned(),
            short_description: "Short".to_owned(),
            content: "Content".to_owned(),
            blog_id: blog_id.to_owned(),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trip() {
        let (service, blog) = service_with_blog();

        let created = service
            .create_post(draft(&blog.id.to_string()))
            .await
            .unwrap()
            .unwrap();
        let found = service
            .find_post_by_id(&created.id.to_string())
            .await
            .unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn create_snapshots_blog_name() {
        let (service, blog) = service_with_blog();

        let created = service
            .create_post(draft(&blog.id.to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.blog_id, blog.id);
        assert_eq!(created.blog_name, "tech");
    }

    #[tokio::test]
    async fn create_against_unknown_blog_is_a_no_op() {
        let (service, _) = service_with_blog();

        let missing = service
            .create_post(draft(&Uuid::new_v4().to_string()))
            .await
            .unwrap();
        assert!(missing.is_none());

        let malformed = service.create_post(draft("not-an-id")).await.unwrap();
        assert!(malformed.is_none());

        assert!(service.find_all_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_changes_only_the_mutable_fields() {
        let (service, blog) = service_with_blog();
        let created = service
            .create_post(draft(&blog.id.to_string()))
            .await
            .unwrap()
            .unwrap();

        let mut new_data = draft(&blog.id.to_string());
        new_data.title = "New title".to_owned();
        new_data.short_description = "New short".to_owned();
        new_data.content = "New content".to_owned();

        let matched = service
            .update_post(&created.id.to_string(), new_data)
            .await
            .unwrap();
        assert!(matched);

        let updated = service
            .find_post_by_id(&created.id.to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.short_description, "New short");
        assert_eq!(updated.content, "New content");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.blog_id, created.blog_id);
        assert_eq!(updated.blog_name, created.blog_name);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_report_no_match_as_false() {
        let (service, blog) = service_with_blog();
        let unknown = Uuid::new_v4().to_string();

        assert!(
            !service
                .update_post(&unknown, draft(&blog.id.to_string()))
                .await
                .unwrap()
        );
        assert!(!service.delete_post_by_id(&unknown).await.unwrap());
    }

    #[tokio::test]
    async fn delete_then_find_yields_absence() {
        let (service, blog) = service_with_blog();
        let created = service
            .create_post(draft(&blog.id.to_string()))
            .await
            .unwrap()
            .unwrap();
        let id = created.id.to_string();

        assert!(service.delete_post_by_id(&id).await.unwrap());
        assert_eq!(service.find_post_by_id(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_all_empties_the_collection() {
        let (service, blog) = service_with_blog();
        for _ in 0..3 {
            service
                .create_post(draft(&blog.id.to_string()))
                .await
                .unwrap();
        }

        service.delete_all_posts().await.unwrap();
        assert!(service.find_all_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_id_is_invalid_identifier() {
        let (service, _) = service_with_blog();
        let err = service.find_post_by_id("oops").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier(_)));
    }

    async fn seed_posts(service: &PostsService, blog: &Blog, n: i64) {
        for i in 0..n {
            let mut post = Post::new(
                draft(&blog.id.to_string()),
                blog.id,
                blog.name.clone(),
            );
            post.created_at = Utc::now() + Duration::seconds(i);
            service.posts.insert(post).await.unwrap();
        }
    }

    #[tokio::test]
    async fn paging_windows_fifteen_posts() {
        let (service, blog) = service_with_blog();
        seed_posts(&service, &blog, 15).await;

        let page1 = service
            .paging_find_posts(PageRequest::from_raw(Some("1"), Some("10"), None, None))
            .await
            .unwrap();
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page1.pages_count, 2);
        assert_eq!(page1.total_count, 15);
        assert_eq!(page1.page, 1);
        assert_eq!(page1.page_size, 10);

        let page2 = service
            .paging_find_posts(PageRequest::from_raw(Some("2"), Some("10"), None, None))
            .await
            .unwrap();
        assert_eq!(page2.items.len(), 5);

        let page3 = service
            .paging_find_posts(PageRequest::from_raw(Some("3"), Some("10"), None, None))
            .await
            .unwrap();
        assert!(page3.items.is_empty());
        assert_eq!(page3.pages_count, 2);
    }

    #[tokio::test]
    async fn descending_sort_is_non_increasing() {
        let (service, blog) = service_with_blog();
        seed_posts(&service, &blog, 5).await;

        let page = service
            .paging_find_posts(PageRequest::from_raw(
                None,
                None,
                Some("createdAt"),
                Some("desc"),
            ))
            .await
            .unwrap();

        for pair in page.items.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }
}
