//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    // No foreign key to blogs: blog_id/blog_name are a creation-time
    // snapshot and posts outlive their blog.
    pub blog_id: Uuid,
    pub blog_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Post.
impl From<Model> for scribe_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            short_description: model.short_description,
            content: model.content,
            blog_id: model.blog_id,
            blog_name: model.blog_name,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from domain Post to SeaORM ActiveModel.
impl From<scribe_core::domain::Post> for ActiveModel {
    fn from(post: scribe_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            short_description: Set(post.short_description),
            content: Set(post.content),
            blog_id: Set(post.blog_id),
            blog_name: Set(post.blog_name),
            created_at: Set(post.created_at.into()),
        }
    }
}
