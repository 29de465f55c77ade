use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Multipart, Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use models::news;
use serde_json::{Map, Value};
use service::news::ListNewsQuery;
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::NewsForm;
use crate::state::ServerState;

type NewsResult<T> = Result<T, JsonApiError>;

#[utoipa::path(
    get, path = "/news", tag = "news",
    params(
        ("page" = Option<i64>, Query, description = "1-based page number, default 1"),
        ("limit" = Option<i64>, Query, description = "Page size, 1..=100, default 10"),
        ("category" = Option<String>, Query, description = "Case-insensitive substring of categories"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring of title, description or snippet")
    ),
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::NewsItemDoc]),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Database Error", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListNewsQuery>, QueryRejection>,
) -> NewsResult<Json<Vec<news::Model>>> {
    let Query(q) = query?;
    let items = state.news.list(q).await?;
    info!(count = items.len(), "list news");
    Ok(Json(items))
}

#[utoipa::path(
    get, path = "/news/{id}", tag = "news",
    params(("id" = i32, Path, description = "News id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::NewsItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> NewsResult<Json<news::Model>> {
    let Path(id) = id?;
    Ok(Json(state.news.get(id).await?))
}

#[utoipa::path(
    post, path = "/news", tag = "news",
    request_body(content = crate::openapi::NewsFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::NewsItemDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 502, description = "Upload Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> NewsResult<(StatusCode, Json<news::Model>)> {
    let (input, image) = NewsForm::collect(multipart?).await?.into_create();
    let created = state.news.create(input, image).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/news/{id}", tag = "news",
    params(("id" = i32, Path, description = "News id")),
    request_body(content = crate::openapi::NewsFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::NewsItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc),
        (status = 502, description = "Upload Failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> NewsResult<Json<news::Model>> {
    let Path(id) = id?;
    let (input, image) = NewsForm::collect(multipart?).await?.into_update();
    Ok(Json(state.news.update(id, input, image).await?))
}

#[utoipa::path(
    patch, path = "/news/{id}", tag = "news",
    params(("id" = i32, Path, description = "News id")),
    request_body = crate::openapi::NewsPatchDoc,
    responses(
        (status = 200, description = "Patched", body = crate::openapi::NewsItemDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn patch(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> NewsResult<Json<news::Model>> {
    let Path(id) = id?;
    let Json(body) = body?;
    Ok(Json(state.news.patch(id, body).await?))
}

#[utoipa::path(
    delete, path = "/news/{id}", tag = "news",
    params(("id" = i32, Path, description = "News id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> NewsResult<StatusCode> {
    let Path(id) = id?;
    state.news.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
