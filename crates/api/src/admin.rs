//! Server-rendered admin pages for books.
//!
//! Minimal HTML, rendered inline. Every interpolated value goes through
//! `escape_html`; titles and descriptions are user-controlled text.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use bookshelf_store::{Author, Book, NewBook};
use chrono::NaiveDate;
use serde::Deserialize;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/books", get(index).post(create))
        .route("/admin/books/new", get(new_form))
        .route("/admin/books/:id/edit", get(edit_form))
        .route("/admin/books/:id", post(update))
        .route("/admin/books/:id/delete", post(remove))
}

/// Escape text for embedding in HTML element or attribute content.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><title>{}</title></head><body>{}</body></html>",
        escape_html(title),
        body
    ))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let books = state.books.list_with_authors(1, 100).await?;

    let mut rows = String::new();
    for (book, author) in &books {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"/admin/books/{}/edit\">edit</a> \
             <form method=\"post\" action=\"/admin/books/{}/delete\" style=\"display:inline\">\
             <button type=\"submit\">delete</button></form></td></tr>",
            book.id,
            escape_html(&book.title),
            escape_html(&author.full_name()),
            book.publication_date.format("%Y-%m-%d"),
            book.id,
            book.id,
        ));
    }

    let body = format!(
        "<h1>Books</h1><p><a href=\"/admin/books/new\">New book</a></p>\
         <table><tr><th>Id</th><th>Title</th><th>Author</th><th>Published</th><th></th></tr>{rows}</table>"
    );
    Ok(page("Books", &body))
}

fn author_options(authors: &[Author], selected: Option<i64>) -> String {
    authors
        .iter()
        .map(|author| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                author.id,
                if selected == Some(author.id) {
                    " selected"
                } else {
                    ""
                },
                escape_html(&author.full_name()),
            )
        })
        .collect()
}

fn book_form(action: &str, book: Option<&Book>, authors: &[Author]) -> String {
    let title = book.map(|b| escape_html(&b.title)).unwrap_or_default();
    let description = book
        .and_then(|b| b.description.as_deref())
        .map(escape_html)
        .unwrap_or_default();
    let date = book
        .map(|b| b.publication_date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        "<form method=\"post\" action=\"{action}\">\
         <p><label>Title <input name=\"title\" value=\"{title}\" required></label></p>\
         <p><label>Description <textarea name=\"description\">{description}</textarea></label></p>\
         <p><label>Publication date <input name=\"publication_date\" value=\"{date}\" placeholder=\"YYYY-MM-DD\" required></label></p>\
         <p><label>Author <select name=\"author_id\">{options}</select></label></p>\
         <p><button type=\"submit\">Save</button> <a href=\"/admin/books\">Back</a></p>\
         </form>",
        options = author_options(authors, book.map(|b| b.author_id)),
    )
}

async fn new_form(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let authors = state.authors.list_all().await?;
    let body = format!("<h1>New book</h1>{}", book_form("/admin/books", None, &authors));
    Ok(page("New book", &body))
}

async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ApiError> {
    let book = state
        .books
        .find(id)
        .await?
        .ok_or(ApiError::NotFound("Book"))?;
    let authors = state.authors.list_all().await?;
    let body = format!(
        "<h1>Edit book {}</h1>{}",
        book.id,
        book_form(&format!("/admin/books/{}", book.id), Some(&book), &authors),
    );
    Ok(page("Edit book", &body))
}

#[derive(Deserialize)]
pub struct BookForm {
    pub title: String,
    pub description: String,
    pub publication_date: String,
    pub author_id: i64,
}

fn parse_form_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{value}', expected YYYY-MM-DD")))
}

async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, ApiError> {
    let publication_date = parse_form_date(&form.publication_date)?;
    if state.authors.find(form.author_id).await?.is_none() {
        return Err(ApiError::NotFound("Author"));
    }
    state
        .books
        .insert(&NewBook {
            title: form.title,
            description: (!form.description.is_empty()).then_some(form.description),
            publication_date,
            author_id: form.author_id,
        })
        .await?;
    Ok(Redirect::to("/admin/books"))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<BookForm>,
) -> Result<Redirect, ApiError> {
    let publication_date = parse_form_date(&form.publication_date)?;
    if state.authors.find(form.author_id).await?.is_none() {
        return Err(ApiError::NotFound("Author"));
    }
    let description = (!form.description.is_empty()).then_some(form.description.as_str());
    state
        .books
        .update(
            id,
            Some(&form.title),
            description,
            Some(publication_date),
            Some(form.author_id),
        )
        .await?;
    Ok(Redirect::to("/admin/books"))
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    state.books.delete(id).await?;
    Ok(Redirect::to("/admin/books"))
}
