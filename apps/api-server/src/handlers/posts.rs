//! Posts resource handlers.

use actix_web::{HttpResponse, web};

use scribe_core::DomainError;
use scribe_core::domain::Post;
use scribe_core::domain::pagination::{Page, PageRequest};
use scribe_core::validation::{check_blog_exists, validate_post_input};
use scribe_shared::dto::{PageQuery, Paginated, PostInput, PostView};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_view(post: Post) -> PostView {
    PostView {
        id: post.id.to_string(),
        title: post.title,
        short_description: post.short_description,
        content: post.content,
        blog_id: post.blog_id.to_string(),
        blog_name: post.blog_name,
        created_at: post.created_at.to_rfc3339(),
    }
}

fn to_paginated(page: Page<Post>) -> Paginated<PostView> {
    let page = page.map(to_view);
    Paginated {
        pages_count: page.pages_count,
        page: page.page,
        page_size: page.page_size,
        total_count: page.total_count,
        items: page.items,
    }
}

/// GET /api/posts - paginated listing.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let request = PageRequest::from_raw(
        q.page_number.as_deref(),
        q.page_size.as_deref(),
        q.sort_by.as_deref(),
        q.sort_direction.as_deref(),
    );

    let page = state.posts.paging_find_posts(request).await?;
    Ok(HttpResponse::Ok().json(to_paginated(page)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    let draft = validate_post_input(&req.title, &req.short_description, &req.content, &req.blog_id)
        .map_err(DomainError::Validation)?;
    check_blog_exists(state.blogs.as_ref(), &draft.blog_id).await?;

    match state.posts.create_post(draft).await? {
        Some(post) => Ok(HttpResponse::Created().json(to_view(post))),
        // The blog vanished between the existence check and the insert.
        None => Err(AppError::NotFound("blog no longer exists".to_string())),
    }
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.find_post_by_id(&id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(to_view(post))),
        None => Err(AppError::NotFound(format!("post {} not found", id))),
    }
}

/// PUT /api/posts/{id}
///
/// Update validation runs the field checks only; `blogId` is never revised,
/// so no existence check happens here.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let draft = validate_post_input(&req.title, &req.short_description, &req.content, &req.blog_id)
        .map_err(DomainError::Validation)?;

    if state.posts.update_post(&id, draft).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("post {} not found", id)))
    }
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    if state.posts.delete_post_by_id(&id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(AppError::NotFound(format!("post {} not found", id)))
    }
}

/// DELETE /api/testing/all-data - wipes the posts collection.
///
/// Reset surface for test workflows, not production traffic.
pub async fn delete_all_data(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    state.posts.delete_all_posts().await?;
    Ok(HttpResponse::NoContent().finish())
}
