//! `edit` command handler.

use socialnexus::{
    ContentGenerator, GeminiClient, ImagePayload, NexusConfig, NexusResult, PostError,
    PostErrorKind, StorageError, StorageErrorKind,
};
use std::path::Path;
use tracing::info;

/// Apply a text instruction to an image file and write the result.
pub async fn edit_image(
    config: &NexusConfig,
    image: &Path,
    prompt: &str,
    out: &Path,
) -> NexusResult<()> {
    if prompt.trim().is_empty() {
        return Err(PostError::new(PostErrorKind::EmptyEditPrompt).into());
    }

    let bytes = std::fs::read(image).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", image.display(), e)))
    })?;
    let source = ImagePayload::from_bytes(mime_for_path(image), &bytes);

    let client = GeminiClient::new(config.gemini.clone())?;
    let edited = client.edit_image(&source, prompt).await?;

    let decoded = edited
        .decode()
        .map_err(|e| StorageError::new(StorageErrorKind::InvalidImage(e.to_string())))?;
    std::fs::write(out, decoded).map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!("{}: {}", out.display(), e)))
    })?;

    info!(out = %out.display(), mime_type = %edited.mime_type(), "Edited image written");
    println!("Wrote {}", out.display());
    Ok(())
}

fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/png",
    }
}
