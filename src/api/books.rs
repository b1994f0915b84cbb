//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookPayload, BookQuery, BookShort},
        envelope::{Envelope, ResponseStatus},
    },
};

/// Payload of a successful add
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookIdData {
    pub book_id: String,
}

/// Payload of a list
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookShort>,
}

/// Payload of a single-book read
#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// Add a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book added; `data` holds the new id", body = BookIdData),
        (status = 400, description = "Missing name, readPage above pageCount or malformed body"),
        (status = 500, description = "Book could not be added")
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<(StatusCode, Json<Envelope<BookIdData>>)> {
    let book_id = state.services.catalog.add_book(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(BookIdData { book_id }).with_message("Book added successfully")),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books as `{id, name, publisher}`", body = BookListData)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, AppError>,
) -> Json<Envelope<BookListData>> {
    let query = BookQuery::from_pairs(pairs);
    let books = state.services.catalog.list_books(&query).await;
    Json(Envelope::success(BookListData { books }))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Full book record", body = BookData),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<BookData>>> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(Json(Envelope::success(BookData { book })))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Missing name, readPage above pageCount or malformed body"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    WithRejection(Json(payload), _): WithRejection<Json<BookPayload>, AppError>,
) -> AppResult<Json<Envelope<()>>> {
    state.services.catalog.update_book(&id, payload).await?;
    Ok(Json(Envelope::message(
        ResponseStatus::Success,
        "Book updated successfully",
    )))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<()>>> {
    state.services.catalog.delete_book(&id).await?;
    Ok(Json(Envelope::message(
        ResponseStatus::Success,
        "Book deleted successfully",
    )))
}
