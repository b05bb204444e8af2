//! 画像ファイルの取込み
//!
//! MIMEタイプは内容から判定し、判定できなければ拡張子で推定する。

use crate::error::{EvidenceAiError, Result};
use evidence_ai_common::{import_file, ImagePayload};
use image::ImageFormat;
use std::path::Path;

/// 内容と拡張子からMIMEタイプを推定
pub fn guess_mime_type(bytes: &[u8], path: &Path) -> String {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type().to_string();
    }

    match ImageFormat::from_path(path) {
        Ok(format) => format.to_mime_type().to_string(),
        Err(_) => match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "txt" => "text/plain".to_string(),
            Some(ext) if ext == "pdf" => "application/pdf".to_string(),
            _ => "application/octet-stream".to_string(),
        },
    }
}

/// 画像ファイルを読み込む
///
/// 画像以外は `CaptureError::UnsupportedType`
pub fn import_path(path: &Path) -> Result<ImagePayload> {
    if !path.exists() {
        return Err(EvidenceAiError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| EvidenceAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    let mime_type = guess_mime_type(&bytes, path);
    tracing::debug!(path = %path.display(), mime = %mime_type, "importing evidence file");

    Ok(import_file(bytes, &mime_type)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_guess_from_content() {
        // 拡張子より内容を優先
        assert_eq!(guess_mime_type(&PNG_SIGNATURE, Path::new("shot.jpg")), "image/png");
        assert_eq!(guess_mime_type(&[0xFF, 0xD8, 0xFF, 0xE0], Path::new("x.bin")), "image/jpeg");
    }

    #[test]
    fn test_guess_from_extension() {
        assert_eq!(guess_mime_type(b"", Path::new("empty.webp")), "image/webp");
        assert_eq!(guess_mime_type(b"hello", Path::new("notes.txt")), "text/plain");
        assert_eq!(guess_mime_type(b"hello", Path::new("blob")), "application/octet-stream");
    }
}
