//! クリップボード書き込みと「コピー済み」表示
//!
//! 表示フラグはコピー成功から2秒間だけ立つ。時刻は呼び出し側が渡す
//! （ブラウザでは Date.now()、テストでは任意の値）。

use crate::error::ClipboardError;
use async_trait::async_trait;

/// コピー済み表示を維持する時間
pub const COPY_FEEDBACK_MS: u64 = 2_000;

/// クリップボード（外部コラボレータ、書き込みのみ）
#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// コピー済みフラグ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    copied_at_ms: Option<u64>,
}

impl CopyFeedback {
    /// コピー成功を記録（呼ぶたびに2秒のタイマーをリセット）
    pub fn mark_copied(&mut self, now_ms: u64) {
        self.copied_at_ms = Some(now_ms);
    }

    pub fn is_copied(&self, now_ms: u64) -> bool {
        self.expires_at()
            .map(|expires| now_ms < expires)
            .unwrap_or(false)
    }

    /// フラグが消える時刻
    pub fn expires_at(&self) -> Option<u64> {
        self.copied_at_ms.map(|t| t.saturating_add(COPY_FEEDBACK_MS))
    }

    pub fn clear(&mut self) {
        self.copied_at_ms = None;
    }
}

/// テキストをコピーし、成功時のみフラグを更新する
///
/// 失敗はログに残すだけで、フラグはそのまま
pub async fn copy_text<C>(
    clipboard: &C,
    feedback: &mut CopyFeedback,
    text: &str,
    now_ms: u64,
) -> Result<(), ClipboardError>
where
    C: Clipboard + ?Sized,
{
    match clipboard.write_text(text).await {
        Ok(()) => {
            feedback.mark_copied(now_ms);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to copy: {}", e);
            Err(e)
        }
    }
}
