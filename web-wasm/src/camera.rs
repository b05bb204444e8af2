//! getUserMedia によるカメラ実装

use crate::browser::js_error_message;
use async_trait::async_trait;
use evidence_ai_common::payload::JPEG_MIME;
use evidence_ai_common::{CameraDevice, CaptureError, ImagePayload, MediaStream};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStreamConstraints};

/// 背面カメラ
pub struct WebCamera;

#[async_trait(?Send)]
impl CameraDevice for WebCamera {
    type Stream = WebStream;

    async fn open_environment_stream(&self) -> Result<WebStream, CaptureError> {
        let unavailable = |e: JsValue| CaptureError::DeviceUnavailable(js_error_message(&e));

        let window = web_sys::window()
            .ok_or_else(|| CaptureError::DeviceUnavailable("no window".into()))?;
        let devices = window.navigator().media_devices().map_err(unavailable)?;

        // { video: { facingMode: "environment" } }
        let video = js_sys::Object::new();
        js_sys::Reflect::set(&video, &"facingMode".into(), &"environment".into()).map_err(unavailable)?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(unavailable)?;
        let stream: web_sys::MediaStream = JsFuture::from(promise)
            .await
            .map_err(unavailable)?
            .dyn_into()
            .map_err(unavailable)?;

        WebStream::new(stream)
    }
}

/// カメラ映像と、それを再生する video 要素
pub struct WebStream {
    stream: web_sys::MediaStream,
    video: HtmlVideoElement,
}

impl WebStream {
    fn new(stream: web_sys::MediaStream) -> Result<Self, CaptureError> {
        let video: HtmlVideoElement = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("video").ok())
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| CaptureError::DeviceUnavailable("cannot create video element".into()))?;

        video.set_autoplay(true);
        video.set_muted(true);
        let _ = video.set_attribute("playsinline", "");
        video.set_class_name("scanner-video");
        video.set_src_object(Some(&stream));

        Ok(Self { stream, video })
    }

    /// オーバーレイに差し込む video 要素
    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaStream for WebStream {
    fn video_dimensions(&self) -> Option<(u32, u32)> {
        let (w, h) = (self.video.video_width(), self.video.video_height());
        (w > 0 && h > 0).then_some((w, h))
    }

    fn snapshot_jpeg(&self) -> Result<ImagePayload, CaptureError> {
        let (width, height) = self.video_dimensions().ok_or(CaptureError::NoFrameAvailable)?;

        let canvas: HtmlCanvasElement = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.create_element("canvas").ok())
            .and_then(|el| el.dyn_into().ok())
            .ok_or(CaptureError::NoFrameAvailable)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into().ok())
            .ok_or(CaptureError::NoFrameAvailable)?;
        context
            .draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(|_| CaptureError::NoFrameAvailable)?;

        let data_url = canvas
            .to_data_url_with_type(JPEG_MIME)
            .map_err(|_| CaptureError::NoFrameAvailable)?;
        ImagePayload::from_data_url(&data_url).map_err(|e| {
            tracing::error!("snapshot decode failed: {}", e);
            CaptureError::NoFrameAvailable
        })
    }

    fn stop_tracks(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
        self.video.remove();
    }
}
