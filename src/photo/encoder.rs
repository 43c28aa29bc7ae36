use crate::core::{NotesError, Result};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Raw image bytes submitted for attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoSource {
    pub bytes: Vec<u8>,
    /// Declared media type; sniffed from the bytes when absent.
    pub media_type: Option<String>,
}

impl PhotoSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Reads an image file; the media type is taken from the extension.
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            NotesError::IoError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        let media_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(media_type_for_extension);
        Ok(Self {
            bytes,
            media_type: media_type.map(str::to_string),
        })
    }

    pub fn resolved_media_type(&self) -> &str {
        self.media_type
            .as_deref()
            .or_else(|| sniff_media_type(&self.bytes))
            .unwrap_or(FALLBACK_MEDIA_TYPE)
    }
}

/// Turns image bytes into a string usable directly as an image reference.
#[async_trait]
pub trait PhotoEncoder: Send + Sync {
    async fn encode(&self, source: PhotoSource) -> Result<String>;
}

/// Encodes to `data:<type>;base64,<payload>` on the blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUrlEncoder;

#[async_trait]
impl PhotoEncoder for DataUrlEncoder {
    async fn encode(&self, source: PhotoSource) -> Result<String> {
        if source.bytes.is_empty() {
            return Err(NotesError::PhotoConversion("image is empty".to_string()));
        }
        tokio::task::spawn_blocking(move || to_data_url(&source))
            .await
            .map_err(|e| NotesError::PhotoConversion(format!("encoder task failed: {}", e)))
    }
}

pub fn to_data_url(source: &PhotoSource) -> String {
    format!(
        "data:{};base64,{}",
        source.resolved_media_type(),
        STANDARD.encode(&source.bytes)
    )
}

/// Detects common image formats from their leading bytes.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}

fn media_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
