//! `/api/v1/authors` handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bookshelf_store::{Author, NewAuthor};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

impl From<&Author> for AuthorResponse {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            birth_date: author.birth_date.format("%Y-%m-%d").to_string(),
        }
    }
}

fn parse_birth_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(format!(
            "Invalid birthDate '{value}', expected YYYY-MM-DD"
        ))
    })
}

/// GET /api/v1/authors
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AuthorResponse>>, ApiError> {
    let authors = state.authors.list_all().await?;
    Ok(Json(authors.iter().map(AuthorResponse::from).collect()))
}

/// GET /api/v1/authors/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let author = state
        .authors
        .find(id)
        .await?
        .ok_or(ApiError::NotFound("Author"))?;
    Ok(Json(AuthorResponse::from(&author)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthor {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

/// POST /api/v1/authors
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateAuthor>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let birth_date = parse_birth_date(&payload.birth_date)?;
    let author = state
        .authors
        .insert(&NewAuthor {
            first_name: payload.first_name,
            last_name: payload.last_name,
            birth_date,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": author.id, "message": "Author created successfully" })),
    ))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
}

/// PUT /api/v1/authors/{id} — partial update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAuthor>,
) -> Result<Json<Value>, ApiError> {
    let birth_date = payload
        .birth_date
        .as_deref()
        .map(parse_birth_date)
        .transpose()?;

    state
        .authors
        .update(
            id,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            birth_date,
        )
        .await?;

    Ok(Json(json!({ "message": "Author updated successfully" })))
}

/// DELETE /api/v1/authors/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    state.authors.delete(id).await?;
    Ok(Json(json!({ "message": "Author deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn author_response_is_camel_case() {
        let author = Author {
            id: 9,
            first_name: "J.K.".to_string(),
            last_name: "Rowling".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1965, 7, 31).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(AuthorResponse::from(&author)).unwrap();
        assert_eq!(value["firstName"], "J.K.");
        assert_eq!(value["birthDate"], "1965-07-31");
    }

    #[test]
    fn unparsable_birth_date_is_a_bad_request() {
        assert!(parse_birth_date("1965-07-31").is_ok());
        let err = parse_birth_date("31.07.1965").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
