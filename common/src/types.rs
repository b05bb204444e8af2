//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - EvidenceResult: 1回の解析で得られる正規化済みの結果
//! - TrustLevel / Complaints: 外部サービスが返す信頼度と苦情文テンプレート
//! - Language / Settings: UI言語設定

use crate::payload::ImagePayload;
use serde::{Deserialize, Serialize};
use std::fmt;

/// UI・出力言語
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// プロンプトに埋め込む言語名
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
        }
    }

    /// 設定画面に表示するネイティブ表記
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "ENGLISH",
            Language::Hi => "हिन्दी",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::En,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "hi" | "hindi" => Some(Language::Hi),
            _ => None,
        }
    }
}

/// 設定（セッション内のみ保持）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
}

/// 信頼度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrustLevel {
    Low,
    Medium,
    High,
}

impl TrustLevel {
    pub const ALL: [TrustLevel; 3] = [TrustLevel::Low, TrustLevel::Medium, TrustLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::Low => "LOW",
            TrustLevel::Medium => "MEDIUM",
            TrustLevel::High => "HIGH",
        }
    }

    /// ラベル文字列から変換（大文字小文字は区別しない）
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(label))
    }

    /// スコアから想定されるレベル
    ///
    /// 表示上のヒント専用。サービスが返したレベルはそのまま採用し、
    /// この値で上書き・検証はしない。
    pub fn expected_for(score: u8) -> Self {
        match score {
            70..=u8::MAX => TrustLevel::High,
            40..=69 => TrustLevel::Medium,
            _ => TrustLevel::Low,
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 苦情文の提出先カテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplaintKind {
    #[default]
    Cyber,
    Bank,
    Consumer,
}

impl ComplaintKind {
    pub const ALL: [ComplaintKind; 3] = [ComplaintKind::Cyber, ComplaintKind::Bank, ComplaintKind::Consumer];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintKind::Cyber => "cyber",
            ComplaintKind::Bank => "bank",
            ComplaintKind::Consumer => "consumer",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

/// 苦情文テンプレート（キーは言語に関係なく固定3種）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaints {
    pub cyber: String,
    pub bank: String,
    pub consumer: String,
}

impl Complaints {
    pub fn get(&self, kind: ComplaintKind) -> &str {
        match kind {
            ComplaintKind::Cyber => &self.cyber,
            ComplaintKind::Bank => &self.bank,
            ComplaintKind::Consumer => &self.consumer,
        }
    }
}

/// ケースID（"MARK-" + 16進8桁）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    pub const PREFIX: &'static str = "MARK-";

    /// 32bitの乱数からIDを生成
    pub fn from_bits(bits: u32) -> Self {
        Self(format!("{}{:08X}", Self::PREFIX, bits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 形式チェック: 接頭辞 + 大文字16進8桁
    pub fn is_well_formed(value: &str) -> bool {
        value
            .strip_prefix(Self::PREFIX)
            .map(|hex| {
                hex.len() == 8
                    && hex.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
            })
            .unwrap_or(false)
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 証拠解析結果
///
/// 解析成功1回につき1件生成され、以後は変更しない。
/// trust_score と trust_level は外部サービスの値をそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceResult {
    pub platform: String,
    pub date: String,
    pub summary: String,
    pub trust_score: u8,
    pub trust_level: TrustLevel,
    pub key_points: Vec<String>,
    pub complaints: Complaints,

    /// 元画像（JSON出力には含めない）
    #[serde(skip)]
    pub image: ImagePayload,

    /// クライアント側で付与した日時
    pub timestamp: String,

    /// クライアント側で付与したケースID
    pub hash: CaseId,
}

impl EvidenceResult {
    pub fn complaint(&self, kind: ComplaintKind) -> &str {
        self.complaints.get(kind)
    }

    /// 履歴一覧の見出し
    pub fn headline(&self) -> String {
        format!("{} AUDIT", self.platform.to_uppercase())
    }

    /// スコアとレベルが想定と一致するか（表示用）
    pub fn levels_agree(&self) -> bool {
        TrustLevel::expected_for(self.trust_score) == self.trust_level
    }
}
