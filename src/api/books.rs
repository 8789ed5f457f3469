//! Book (catalog) endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{Action, AppError, AppResult},
    models::book::{Book, BookFilter, BookPayload, BookQuery, BookSummary},
    AppState,
};

use super::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBook {
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: Book,
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = CreatedBook),
        (status = 400, description = "Missing name or readPage greater than pageCount"),
        (status = 500, description = "Book could not be stored")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedBook>>)> {
    let Json(payload) = payload?;

    let book_id = state
        .services
        .catalog
        .create(payload)
        .map_err(|e| AppError::from_catalog(Action::Create, e))?;

    let response =
        ApiResponse::success(CreatedBook { book_id }).with_message("Buku berhasil ditambahkan");
    Ok((StatusCode::CREATED, Json(response)))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Summaries of the matching books", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<ApiResponse<BookList>>> {
    let Query(pairs) = pairs?;
    let filter = BookFilter::from(BookQuery::from_pairs(pairs));

    let books = state
        .services
        .catalog
        .query(&filter)
        .map_err(|e| AppError::from_catalog(Action::List, e))?;

    Ok(Json(ApiResponse::success(BookList { books })))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BookDetail>>> {
    let book = state
        .services
        .catalog
        .get_by_id(&id)
        .map_err(|e| AppError::from_catalog(Action::Get, e))?;

    Ok(Json(ApiResponse::success(BookDetail { book })))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Missing name or readPage greater than pageCount"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    let Json(payload) = payload?;

    state
        .services
        .catalog
        .update_by_id(&id, payload)
        .map_err(|e| AppError::from_catalog(Action::Update, e))?;

    Ok(Json(ApiResponse::done("Buku berhasil diperbarui")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .services
        .catalog
        .delete_by_id(&id)
        .map_err(|e| AppError::from_catalog(Action::Delete, e))?;

    Ok(Json(ApiResponse::done("Buku berhasil dihapus")))
}
