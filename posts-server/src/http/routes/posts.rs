//! Post endpoints
//!
//! `GET /posts` lists with pagination, category filter and keyword search;
//! `/posts/{id}` fetches, replaces and deletes single posts.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{PostFilter, PostRepo};
use crate::http::error::{ApiError, Operation};
use crate::http::extractors::{ValidPost, ValidPostId, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination, Post};

/// Query parameters for the listing.
///
/// Kept as raw strings: bad `page`/`limit` values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub keyword: Option<String>,
}

/// Listing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsResponse {
    pub total_posts: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub limit: u32,
    pub posts: Vec<Post>,
    pub next_page: Option<u32>,
}

impl From<Paginated<Post>> for ListPostsResponse {
    fn from(page: Paginated<Post>) -> Self {
        Self {
            total_posts: page.total,
            total_pages: page.total_pages(),
            current_page: page.page,
            limit: page.limit,
            next_page: page.next_page(),
            posts: page.items,
        }
    }
}

/// Single post response
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub data: Post,
}

/// Confirmation for writes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /posts - list posts, newest first
async fn list_posts(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<ListPostsParams>,
) -> Result<Json<ListPostsResponse>, ApiError> {
    let filter = PostFilter::from_raw(params.category.as_deref(), params.keyword.as_deref())?;
    let page = Pagination::from_raw(params.page.as_deref(), params.limit.as_deref());

    let result = PostRepo::new(&state.pool)
        .list(&filter, page)
        .await
        .map_err(ApiError::db(Operation::Read))?;

    Ok(Json(ListPostsResponse::from(result)))
}

/// GET /posts/{id} - get a single post
async fn get_post(
    State(state): State<Arc<AppState>>,
    ValidPostId(id): ValidPostId,
) -> Result<Json<PostResponse>, ApiError> {
    let post = PostRepo::new(&state.pool)
        .get(id)
        .await
        .map_err(ApiError::db(Operation::Read))?;

    Ok(Json(PostResponse { data: post }))
}

/// POST /posts - create a new post
async fn create_post(
    State(state): State<Arc<AppState>>,
    ValidPost(post): ValidPost,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = PostRepo::new(&state.pool)
        .create(&post)
        .await
        .map_err(ApiError::db(Operation::Create))?;

    tracing::info!(post_id = id, "created post");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Created post successfully",
        }),
    ))
}

/// PUT /posts/{id} - replace every field of a post
async fn update_post(
    State(state): State<Arc<AppState>>,
    ValidPostId(id): ValidPostId,
    ValidPost(post): ValidPost,
) -> Result<Json<MessageResponse>, ApiError> {
    PostRepo::new(&state.pool)
        .update(id, &post)
        .await
        .map_err(ApiError::db(Operation::Update))?;

    tracing::info!(post_id = id.get(), "updated post");
    Ok(Json(MessageResponse {
        message: "Updated post successfully",
    }))
}

/// DELETE /posts/{id} - delete a post
async fn delete_post(
    State(state): State<Arc<AppState>>,
    ValidPostId(id): ValidPostId,
) -> Result<Json<MessageResponse>, ApiError> {
    PostRepo::new(&state.pool)
        .delete(id)
        .await
        .map_err(ApiError::db(Operation::Delete))?;

    tracing::info!(post_id = id.get(), "deleted post");
    Ok(Json(MessageResponse {
        message: "Deleted post successfully",
    }))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}
