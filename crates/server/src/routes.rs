//! HTTP route registration and handlers
//!
//! Thin wiring around the domain use cases: multipart intake, status-code
//! mapping, content negotiation, and the redirect rule for out-of-range
//! listing pages.

use axum::{
    Json, Router,
    extract::{Multipart, Path as UrlPath, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use imagestream_domain::usecases::{PageSelection, SubmitError, paginate};
use imagestream_domain::{SubmitRequest, UploadedFile, urls};

use crate::negotiate::should_render_json;
use crate::state::AppState;
use crate::views;

/// Build the application router. `image_dir` is served under the configured
/// public image root so stored assets resolve at their public URLs.
pub fn router(state: AppState, image_dir: &Path) -> Router {
    let image_route = format!(
        "/{}",
        urls::strip_leading_slash(urls::strip_trailing_slash(&state.site.public_image_root))
    );

    Router::new()
        .route("/", get(index).post(save))
        .route("/page/{page}", get(index_page))
        .route("/post/{id}", get(entry))
        .route("/form", get(form))
        .nest_service(&image_route, ServeDir::new(image_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST / - run one submission through the pipeline.
///
/// Responses are always JSON, matching the legacy service: the literal
/// negotiation table would misread multipart bodies as HTML requests.
async fn save(State(state): State<AppState>, multipart: Multipart) -> Response {
    let request = match read_submission(multipart, &state.site.upload_dir).await {
        Ok(request) => request,
        Err(error) => {
            tracing::error!(error = %error, "Failed to read submission request");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.pipeline.submit(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(SubmitError::UploadMissing) => StatusCode::NOT_FOUND.into_response(),
        Err(error) => (StatusCode::BAD_REQUEST, Json(error.to_string())).into_response(),
    }
}

/// Pull the file and message fields out of the multipart body, spooling the
/// file to the upload directory. An empty file is passed through unspooled
/// so the pipeline can reject it without a filesystem write.
async fn read_submission(
    mut multipart: Multipart,
    upload_dir: &Path,
) -> anyhow::Result<SubmitRequest> {
    let mut upload = None;
    let mut message = String::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("displayImage") => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await?;

                let temp_path = if data.is_empty() {
                    std::path::PathBuf::new()
                } else {
                    let temp_path = upload_dir.join(format!("upload-{}", Uuid::new_v4()));
                    tokio::fs::write(&temp_path, &data).await?;
                    temp_path
                };

                upload = Some(UploadedFile {
                    temp_path,
                    original_name,
                    content_type,
                    size: data.len() as u64,
                });
            }
            Some("message") => message = field.text().await?,
            _ => {}
        }
    }

    Ok(SubmitRequest { upload, message })
}

/// GET / - first listing page
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    render_listing(&state, 1, &headers).await
}

/// GET /page/{page}
async fn index_page(
    State(state): State<AppState>,
    UrlPath(page): UrlPath<usize>,
    headers: HeaderMap,
) -> Response {
    render_listing(&state, page, &headers).await
}

async fn render_listing(state: &AppState, requested_page: usize, headers: &HeaderMap) -> Response {
    let do_render_json = should_render_json(headers);

    let articles = match state.repository.list().await {
        Ok(articles) => articles,
        Err(error) => {
            tracing::error!(error = %error, "Error loading article listing");
            return if do_render_json {
                (StatusCode::BAD_REQUEST, Json(error.to_string())).into_response()
            } else {
                (
                    StatusCode::BAD_REQUEST,
                    Html(views::error_page(&error.to_string())),
                )
                    .into_response()
            };
        }
    };

    match paginate(articles, requested_page, state.site.post_limit) {
        PageSelection::RedirectToFirst => Redirect::to("/page/1").into_response(),
        PageSelection::Page(view) => {
            if do_render_json {
                Json(&view.entries).into_response()
            } else {
                let image_urls: Vec<String> = view
                    .entries
                    .iter()
                    .map(|article| {
                        urls::image_url(
                            &state.site.base_url,
                            &state.site.public_image_root,
                            &article.image_name,
                        )
                    })
                    .collect();
                Html(views::index_page(&view, &image_urls)).into_response()
            }
        }
    }
}

/// GET /post/{id} - single entry.
///
/// A malformed id answers 404 like an unknown one; the legacy service let
/// it fall through to the generic 500 handler instead.
async fn entry(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let do_render_json = should_render_json(&headers);

    let Ok(id) = Uuid::parse_str(&id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.repository.find_by_id(id).await {
        Err(error) => {
            tracing::warn!(article_id = %id, error = %error, "Error loading article");
            (StatusCode::BAD_REQUEST, Json(error.to_string())).into_response()
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        // A record without image metadata is treated as missing.
        Ok(Some(article)) if article.image_type.is_empty() => {
            StatusCode::NOT_FOUND.into_response()
        }
        Ok(Some(article)) => {
            if do_render_json {
                Json(article).into_response()
            } else {
                let post_url = urls::post_url(&state.site.base_url, &article.id);
                let share_url = if article.short_url.is_empty() {
                    post_url.clone()
                } else {
                    article.short_url.clone()
                };
                let image_url = urls::image_url(
                    &state.site.base_url,
                    &state.site.public_image_root,
                    &article.image_name,
                );
                Html(views::entry_page(&article, &image_url, &post_url, &share_url))
                    .into_response()
            }
        }
    }
}

/// GET /form - manual upload form, for testing only
async fn form(State(state): State<AppState>) -> Response {
    if state.site.debug_enabled {
        Html(views::form_page()).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            "Move along, nothing to see here.",
        )
            .into_response()
    }
}
