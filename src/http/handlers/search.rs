//! Search handlers
//!
//! `POST /api/search` is served by one of two handlers, chosen at startup
//! from the configured [`SearchMode`](crate::config::SearchMode):
//!
//! - [`passthrough_search`] relays the raw upload to the upstream API
//!   (form fields `file` and optional `caption`).
//! - [`catalog_search`] answers from the mock catalog
//!   (form fields `image` and optional `page`).

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use super::AppState;
use crate::catalog::{parse_page, CatalogError};
use crate::http::types::{CatalogSearchResponse, ErrorResponse, PROXY_ERROR_HEADER};
use crate::upload::UploadedImage;

/// Pass-through search: forward the body verbatim, mirror status and JSON.
pub async fn passthrough_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    debug!("HTTP pass-through search: {} bytes", body.len());

    match state.upstream.forward(content_type, body).await {
        Ok(reply) => {
            let status = match StatusCode::from_u16(reply.status) {
                Ok(status) => status,
                Err(_) => {
                    error!("Upstream returned unrepresentable status {}", reply.status);
                    return proxy_failure_response("upstream-invalid-status");
                }
            };
            if !status.is_success() {
                warn!("Upstream search returned {}", status);
            }
            (status, Json(reply.body)).into_response()
        }
        Err(e) => {
            error!("Upstream search failed: {}", e);
            proxy_failure_response(e.kind())
        }
    }
}

fn proxy_failure_response(kind: &'static str) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        [(PROXY_ERROR_HEADER, kind)],
        Json(ErrorResponse::new("Search service is unavailable. Please try again later.")),
    )
        .into_response()
}

/// Fields read from a catalog search form
struct CatalogForm {
    image: Option<UploadedImage>,
    page: u32,
}

fn multipart_error(e: MultipartError) -> CatalogError {
    // Uploads past the body limit are oversized images, not malformed forms
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        CatalogError::TooLarge(None)
    } else {
        CatalogError::Multipart(e.body_text())
    }
}

async fn read_catalog_form(mut multipart: Multipart) -> Result<CatalogForm, CatalogError> {
    let mut image = None;
    let mut page = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => {
                let mime = field.content_type().unwrap_or_default().to_string();
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                image = Some(UploadedImage::new(bytes, mime, file_name));
            }
            Some("page") => {
                page = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    Ok(CatalogForm {
        image,
        page: parse_page(page.as_deref()),
    })
}

fn catalog_error_response(e: CatalogError) -> Response {
    warn!("Catalog search rejected: {}", e);
    let message = match &e {
        // Keep multipart parser details out of the response
        CatalogError::Multipart(_) => "Invalid multipart request".to_string(),
        other => other.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message))).into_response()
}

/// Mock catalog search: validate the image and return one page of listings.
pub async fn catalog_search(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            warn!("Catalog search without multipart body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Expected a multipart/form-data body")),
            )
                .into_response();
        }
    };

    let form = match read_catalog_form(multipart).await {
        Ok(form) => form,
        Err(e) => return catalog_error_response(e),
    };

    debug!(
        "HTTP catalog search: page={}, image={}",
        form.page,
        form.image.as_ref().map(|i| i.size()).unwrap_or(0)
    );

    match state.catalog.search(form.image.as_ref(), form.page).await {
        Ok(page) => (StatusCode::OK, Json(CatalogSearchResponse::from(page))).into_response(),
        Err(e) => catalog_error_response(e),
    }
}
