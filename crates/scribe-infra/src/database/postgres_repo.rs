//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use uuid::Uuid;

use scribe_core::domain::pagination::{PageWindow, PostSortField, SortDirection};
use scribe_core::domain::{Blog, Post, PostPatch};
use scribe_core::error::RepoError;
use scribe_core::ports::{BlogDirectory, PostRepository};

use super::entity::blog::Entity as BlogEntity;
use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL posts repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn sort_column(field: PostSortField) -> post::Column {
    match field {
        PostSortField::Title => post::Column::Title,
        PostSortField::ShortDescription => post::Column::ShortDescription,
        PostSortField::Content => post::Column::Content,
        PostSortField::BlogId => post::Column::BlogId,
        PostSortField::BlogName => post::Column::BlogName,
        PostSortField::CreatedAt => post::Column::CreatedAt,
    }
}

fn sort_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Ascending => Order::Asc,
        SortDirection::Descending => Order::Desc,
    }
}

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find().all(&self.db).await.map_err(query_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(model.map(Into::into))
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = post.into();
        let model = active.insert(&self.db).await.map_err(|e| {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        })?;
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, patch: &PostPatch) -> Result<bool, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Title, Expr::value(patch.title.clone()))
            .col_expr(
                post::Column::ShortDescription,
                Expr::value(patch.short_description.clone()),
            )
            .col_expr(post::Column::Content, Expr::value(patch.content.clone()))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected == 1)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn delete_all(&self) -> Result<(), RepoError> {
        PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find().count(&self.db).await.map_err(query_err)
    }

    async fn find_page(&self, window: &PageWindow) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .order_by(sort_column(window.sort_by), sort_order(window.direction))
            .offset(window.skip)
            .limit(window.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// Read-only lookup into the blogs collection.
pub struct PostgresBlogDirectory {
    db: DbConn,
}

impl PostgresBlogDirectory {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogDirectory for PostgresBlogDirectory {
    async fn find_blog_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
        tracing::debug!(blog_id = %id, "Looking up blog");

        let model = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(model.map(Into::into))
    }
}
