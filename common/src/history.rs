//! セッション内の解析履歴（新しい順、上限なし、永続化なし）

use crate::types::EvidenceResult;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: VecDeque<Arc<EvidenceResult>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先頭（最新）に追加
    pub fn append(&mut self, result: Arc<EvidenceResult>) {
        self.entries.push_front(result);
    }

    /// 新しい順の一覧
    pub fn list(&self) -> Vec<Arc<EvidenceResult>> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<EvidenceResult>> {
        self.entries.iter()
    }

    /// 一覧上の位置で取得（0 = 最新）
    pub fn select(&self, index: usize) -> Option<Arc<EvidenceResult>> {
        self.entries.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
