//! カメラ取込みとファイル取込み
//!
//! カメラのメディアストリームは `CaptureSession` が所有し、
//! 停止・撮影成功・ファイル取込み・破棄のいずれでも必ず解放される。

use crate::error::CaptureError;
use crate::payload::{ImagePayload, is_image_mime};
use async_trait::async_trait;

/// カメラデバイス（外部コラボレータ）
#[async_trait(?Send)]
pub trait CameraDevice {
    type Stream: MediaStream;

    /// 背面(environment)カメラの映像を要求する
    async fn open_environment_stream(&self) -> Result<Self::Stream, CaptureError>;
}

/// ライブ映像ストリーム
pub trait MediaStream {
    /// 映像サイズ（準備前はNone）
    fn video_dimensions(&self) -> Option<(u32, u32)>;

    /// 現在のフレームをJPEGで取得
    fn snapshot_jpeg(&self) -> Result<ImagePayload, CaptureError>;

    /// すべてのトラックを停止
    fn stop_tracks(&mut self);
}

/// 撮影セッション
pub struct CaptureSession<S: MediaStream> {
    stream: Option<S>,
}

impl<S: MediaStream> CaptureSession<S> {
    pub fn new(stream: S) -> Self {
        Self { stream: Some(stream) }
    }

    pub fn stream(&self) -> Option<&S> {
        self.stream.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    /// ストリームを解放（何度呼んでもよい）
    pub fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_tracks();
            tracing::debug!("camera stream released");
        }
    }
}

impl<S: MediaStream> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// カメラを起動してセッションを返す
///
/// 権限拒否・デバイスなしは `CaptureError::DeviceUnavailable`
pub async fn start_camera<D>(device: &D) -> Result<CaptureSession<D::Stream>, CaptureError>
where
    D: CameraDevice + ?Sized,
{
    match device.open_environment_stream().await {
        Ok(stream) => {
            tracing::info!("camera stream acquired");
            Ok(CaptureSession::new(stream))
        }
        Err(e) => {
            tracing::warn!("camera unavailable: {}", e);
            Err(e)
        }
    }
}

/// ファイル取込み（画像MIMEのみ受け付ける）
pub fn import_file(bytes: Vec<u8>, mime_type: &str) -> Result<ImagePayload, CaptureError> {
    if !is_image_mime(mime_type) {
        return Err(CaptureError::UnsupportedType(mime_type.to_string()));
    }
    Ok(ImagePayload::new(bytes, mime_type.trim().to_ascii_lowercase()))
}

/// 撮影セッションの管理（同時に開けるのは1つまで）
pub struct CaptureManager<S: MediaStream> {
    session: Option<CaptureSession<S>>,
}

impl<S: MediaStream> Default for CaptureManager<S> {
    fn default() -> Self {
        Self { session: None }
    }
}

impl<S: MediaStream> CaptureManager<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.session.as_ref().map(|s| s.is_live()).unwrap_or(false)
    }

    pub fn session(&self) -> Option<&CaptureSession<S>> {
        self.session.as_ref()
    }

    /// 新しいセッションを保持する。既存のセッションは先に解放する
    pub fn open(&mut self, session: CaptureSession<S>) {
        self.stop_camera();
        self.session = Some(session);
    }

    /// 許可待ちの間に解析が始まっていたら、届いたセッションは即解放する
    ///
    /// 保持した場合は true
    pub fn open_unless_busy(&mut self, mut session: CaptureSession<S>, busy: bool) -> bool {
        if busy {
            tracing::debug!("camera granted during analysis, releasing");
            session.release();
            return false;
        }
        self.open(session);
        true
    }

    /// カメラ停止（セッションがなくても安全）
    pub fn stop_camera(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
        }
    }

    /// 現在のフレームを撮影してセッションを終了する
    ///
    /// 映像サイズが未確定なら `NoFrameAvailable` を返し、セッションは維持する
    pub fn capture_frame(&mut self) -> Result<ImagePayload, CaptureError> {
        let stream = self
            .session
            .as_ref()
            .and_then(|s| s.stream())
            .ok_or(CaptureError::NoFrameAvailable)?;

        match stream.video_dimensions() {
            Some((w, h)) if w > 0 && h > 0 => {}
            _ => return Err(CaptureError::NoFrameAvailable),
        }

        let image = stream.snapshot_jpeg()?;
        self.stop_camera();
        Ok(image)
    }

    /// ファイル取込み。成功時は開いているセッションを終了する
    pub fn import_file(&mut self, bytes: Vec<u8>, mime_type: &str) -> Result<ImagePayload, CaptureError> {
        let image = import_file(bytes, mime_type)?;
        self.stop_camera();
        Ok(image)
    }
}
