//! `/api/v1/books` handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bookshelf_store::{Author, Book, NewBook};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub publication_date: String,
    pub author: AuthorSummary,
    pub created_at: String,
    pub updated_at: String,
}

impl BookResponse {
    pub fn from_parts(book: &Book, author: &Author) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            description: book.description.clone(),
            publication_date: book.publication_date.format(DATE_FORMAT).to_string(),
            author: AuthorSummary {
                id: author.id,
                name: author.full_name(),
            },
            created_at: book.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: book.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

/// GET /api/v1/books — paginated list with embedded author summaries.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    let books = state.books.list_with_authors(page, limit).await?;
    let total = state.books.count().await?;
    let pages = (total as u64).div_ceil(u64::from(limit));

    let data: Vec<BookResponse> = books
        .iter()
        .map(|(book, author)| BookResponse::from_parts(book, author))
        .collect();

    Ok(Json(json!({
        "data": data,
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "pages": pages,
        }
    })))
}

/// GET /api/v1/books/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .books
        .find(id)
        .await?
        .ok_or(ApiError::NotFound("Book"))?;
    let author = state
        .authors
        .find(book.author_id)
        .await?
        .ok_or(ApiError::NotFound("Author"))?;
    Ok(Json(BookResponse::from_parts(&book, &author)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: String,
    pub description: Option<String>,
    pub publication_date: String,
    pub author_id: i64,
}

/// POST /api/v1/books
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateBook>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let publication_date = parse_date(&payload.publication_date)?;
    if state.authors.find(payload.author_id).await?.is_none() {
        return Err(ApiError::NotFound("Author"));
    }

    let book = state
        .books
        .insert(&NewBook {
            title: payload.title,
            description: payload.description,
            publication_date,
            author_id: payload.author_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": book.id, "message": "Book created successfully" })),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub title: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<String>,
    pub author_id: Option<i64>,
}

/// PUT /api/v1/books/{id} — partial update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBook>,
) -> Result<Json<Value>, ApiError> {
    let publication_date = payload
        .publication_date
        .as_deref()
        .map(parse_date)
        .transpose()?;

    if let Some(author_id) = payload.author_id {
        if state.authors.find(author_id).await?.is_none() {
            return Err(ApiError::NotFound("Author"));
        }
    }

    state
        .books
        .update(
            id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            publication_date,
            payload.author_id,
        )
        .await?;

    Ok(Json(json!({ "message": "Book updated successfully" })))
}

/// DELETE /api/v1/books/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.books.delete(id).await?;
    Ok(Json(json!({ "message": "Book deleted successfully" })))
}
