//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{BlogDirectory, PostRepository};
use scribe_core::service::PostsService;
use scribe_infra::database::memory::{InMemoryBlogDirectory, InMemoryPostRepository};
use scribe_infra::database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
use scribe_infra::database::{PostgresBlogDirectory, PostgresPostRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostsService,
    /// Blog lookup capability, used by the creation-time existence check.
    pub blogs: Arc<dyn BlogDirectory>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (db, posts_repo, blogs): (
            Option<Arc<DatabaseConnections>>,
            Arc<dyn PostRepository>,
            Arc<dyn BlogDirectory>,
        ) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let posts = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                        let blogs = Arc::new(PostgresBlogDirectory::new(conn.main.clone()));
                        (Some(conn), posts, blogs)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (
                            None,
                            Arc::new(InMemoryPostRepository::new()),
                            Arc::new(InMemoryBlogDirectory::new()),
                        )
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (
                    None,
                    Arc::new(InMemoryPostRepository::new()),
                    Arc::new(InMemoryBlogDirectory::new()),
                )
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, posts_repo, blogs): (
            Option<Arc<DatabaseConnections>>,
            Arc<dyn PostRepository>,
            Arc<dyn BlogDirectory>,
        ) = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
            (
                None,
                Arc::new(InMemoryPostRepository::new()),
                Arc::new(InMemoryBlogDirectory::new()),
            )
        };

        tracing::info!("Application state initialized");

        Self {
            posts: PostsService::new(posts_repo, blogs.clone()),
            blogs,
            db,
        }
    }
}
