//! 画像ペイロード
//!
//! カメラ撮影・ファイル取込みの結果をバイト列+MIMEタイプで保持し、
//! Data URL / Base64 との相互変換を行う。

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub const JPEG_MIME: &str = "image/jpeg";

/// 画像データ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// リクエスト送信用のBase64文字列
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `<img src>` 用のData URL
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Data URLから復元
    ///
    /// # Arguments
    /// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        if !data_url.starts_with("data:") {
            return Err(Error::Payload("Data URLではありません".into()));
        }
        let encoded = extract_base64_from_data_url(data_url)
            .ok_or_else(|| Error::Payload("Base64部分が見つかりません".into()))?;
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::Payload(format!("Base64デコード失敗: {}", e)))?;
        Ok(Self::new(bytes, extract_mime_type_from_data_url(data_url)))
    }
}

/// 画像のMIMEタイプか判定（"image/xxx"）
pub fn is_image_mime(mime_type: &str) -> bool {
    let mime = mime_type.trim().to_ascii_lowercase();
    mime.strip_prefix("image/")
        .map(|subtype| !subtype.is_empty())
        .unwrap_or(false)
}

/// Data URLからBase64データ部分を抽出
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出
///
/// # Returns
/// MIMEタイプ（例: "image/jpeg"）、抽出失敗時は"image/jpeg"をデフォルトとして返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or(JPEG_MIME)
}
