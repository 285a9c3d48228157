use std::path::{Component, Path, PathBuf};

/// Public URL prefix the upload directory is served under.
pub const PUBLIC_UPLOAD_PREFIX: &str = "/uploads";

/// Maps a stored public path (`/uploads/x.mp4`) back to a file inside `upload_dir`.
///
/// Returns `None` for paths outside the upload prefix or that try to climb out of it.
pub fn resolve_public_path(upload_dir: &Path, public_path: &str) -> Option<PathBuf> {
    let relative = public_path
        .strip_prefix(PUBLIC_UPLOAD_PREFIX)?
        .strip_prefix('/')?;
    if relative.is_empty() {
        return None;
    }

    let relative = Path::new(relative);
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(upload_dir.join(relative))
}

/// Best-effort removal of uploaded files. Failures are logged and never returned.
pub async fn remove_public_files(upload_dir: &Path, public_paths: &[&str]) {
    for public_path in public_paths {
        let Some(file) = resolve_public_path(upload_dir, public_path) else {
            tracing::warn!(path = %public_path, "not an upload path, leaving it alone");
            continue;
        };

        match tokio::fs::remove_file(&file).await {
            Ok(()) => tracing::info!(file = %file.display(), "deleted uploaded file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(file = %file.display(), "uploaded file already gone")
            }
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "could not delete uploaded file")
            }
        }
    }
}
