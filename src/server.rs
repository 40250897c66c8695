use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tempfile::NamedTempFile;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::page_range::parse_page_spec;
use crate::pdf::PdfDocument;

const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/pdf/extract", post(extract))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let upload_dir = config.upload_dir();
    let output_dir = config.output_dir();

    // Both directories must exist before the listener starts accepting.
    std::fs::create_dir_all(&upload_dir)?;
    std::fs::create_dir_all(&output_dir)?;

    let app = router(AppState {
        upload_dir,
        output_dir,
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("shutdown signal received");
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Accept a PDF upload and a page spec, respond with the extracted PDF.
///
/// Both temp files are owned by `NamedTempFile` handles, so they are removed
/// when the request ends, on the error paths included.
async fn extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut page_spec: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("document.pdf").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
                upload = Some((filename, bytes.to_vec()));
            }
            "pageNumber" => {
                let spec = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
                page_spec = Some(spec);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("A PDF file is required.".to_string()))?;
    let spec =
        page_spec.ok_or_else(|| AppError::BadRequest("Page numbers are required.".to_string()))?;

    tracing::debug!(file = %filename, bytes = bytes.len(), "received upload");

    // Spool the upload to disk under the uploads directory.
    let mut source_file = NamedTempFile::new_in(&state.upload_dir)?;
    source_file.write_all(&bytes)?;
    source_file.flush()?;

    if !source_file.path().exists() {
        return Err(AppError::MissingUpload);
    }

    let source_bytes = std::fs::read(source_file.path())?;
    let source = PdfDocument::from_bytes(&source_bytes)?;
    let total_pages = source.page_count();
    tracing::debug!(total_pages, "loaded source document");

    let indices = parse_page_spec(&spec, total_pages)?;
    tracing::debug!(pages = indices.len(), "extracting pages");

    let mut result = source.extract_pages(&indices)?;
    let result_bytes = PdfDocument::save_to_bytes(&mut result)?;

    // Stage the output under its own randomized name so concurrent requests
    // never collide.
    let mut output_file = tempfile::Builder::new()
        .suffix("_extracted.pdf")
        .tempfile_in(&state.output_dir)?;
    output_file.write_all(&result_bytes)?;
    output_file.flush()?;

    let body = std::fs::read(output_file.path()).map_err(AppError::Transfer)?;

    let stem = Path::new(&filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(header::CONTENT_LENGTH, body.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}_extracted.pdf\"", stem),
        )
        .body(Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}
