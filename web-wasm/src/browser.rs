//! ブラウザAPIの薄いラッパー（時刻・クリップボード・印刷・振動・ファイル読込）

use async_trait::async_trait;
use evidence_ai_common::{CaseId, Clipboard, ClipboardError, ResultStamper};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

/// 主要操作時の振動パターン(ms)
pub const HAPTIC_PATTERN: [u32; 3] = [10, 30, 10];

/// 現在時刻（エポックミリ秒）
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// JsValue のエラーを文字列化
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

/// 振動（非対応端末では何もしない）
pub fn trigger_haptic() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let pattern = js_sys::Array::new();
    for ms in HAPTIC_PATTERN {
        pattern.push(&JsValue::from(ms));
    }
    let _ = window.navigator().vibrate_with_pattern(&pattern);
}

/// 印刷ダイアログを開く
pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            tracing::error!("print failed: {}", js_error_message(&e));
        }
    }
}

/// 乱数 [0, 1) をケースIDのビット列に変換
pub fn case_bits(random: f64) -> u32 {
    (random.clamp(0.0, 1.0) * 4_294_967_296.0) as u32
}

/// ブラウザのロケール時刻と Math.random によるケースID
pub struct BrowserStamper;

impl ResultStamper for BrowserStamper {
    fn timestamp(&self) -> String {
        js_sys::Date::new_0()
            .to_locale_string("en-US", &JsValue::UNDEFINED)
            .into()
    }

    fn case_id(&self) -> CaseId {
        CaseId::from_bits(case_bits(js_sys::Math::random()))
    }
}

/// navigator.clipboard
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let window = web_sys::window().ok_or_else(|| ClipboardError("no window".into()))?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError(js_error_message(&e)))
    }
}

/// 選択されたファイルの中身を読む
pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error_message(&e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
