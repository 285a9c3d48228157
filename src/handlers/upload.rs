use std::path::Path;

use axum::extract::{Json, Multipart, State};
use axum_extra::extract::WithRejection;
use tokio::fs;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::response::{ApiResponse, UploadedFile},
    state::AppState,
    utils::files::PUBLIC_UPLOAD_PREFIX,
};

/// Multipart field carrying the file, and the error when it is absent.
#[derive(Debug, Clone, Copy)]
pub struct UploadKind {
    pub field: &'static str,
    pub missing_message: &'static str,
}

pub const IMAGE_UPLOAD: UploadKind = UploadKind {
    field: "image",
    missing_message: "No file uploaded",
};

pub const VIDEO_UPLOAD: UploadKind = UploadKind {
    field: "video",
    missing_message: "No video file uploaded",
};

// POST /api/upload
pub async fn upload_image_handler(
    State(state): State<AppState>,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> Result<Json<ApiResponse<UploadedFile>>, AppError> {
    store_upload(&state.config.upload_dir, multipart, IMAGE_UPLOAD).await
}

// POST /api/upload-video
pub async fn upload_video_handler(
    State(state): State<AppState>,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> Result<Json<ApiResponse<UploadedFile>>, AppError> {
    store_upload(&state.config.upload_dir, multipart, VIDEO_UPLOAD).await
}

// Content type and size are not checked; only the transport body limit applies
async fn store_upload(
    upload_dir: &Path,
    mut multipart: Multipart,
    kind: UploadKind,
) -> Result<Json<ApiResponse<UploadedFile>>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(kind.field) {
            continue;
        }
        // A text part under the file's name is not a file
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let filename = unique_filename(kind.field, &original_name);
        let data = field.bytes().await?;

        fs::create_dir_all(upload_dir).await?;
        let target = upload_dir.join(&filename);
        fs::write(&target, &data).await?;
        tracing::info!(
            file = %target.display(),
            original = %original_name,
            bytes = data.len(),
            "stored upload"
        );

        let path = format!("{PUBLIC_UPLOAD_PREFIX}/{filename}");
        return Ok(Json(ApiResponse::ok(UploadedFile { filename, path })));
    }

    Err(AppError::validation(kind.missing_message))
}

/// `<field>-<uuid>.<original extension>`; no extension when the original has none.
pub fn unique_filename(field: &str, original_name: &str) -> String {
    let token = Uuid::new_v4().simple();
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{field}-{token}.{ext}"),
        None => format!("{field}-{token}"),
    }
}
