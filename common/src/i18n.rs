//! 表示ラベル辞書（英語/ヒンディー語）

use crate::types::Language;

/// 画面ラベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub dashboard: &'static str,
    pub vault: &'static str,
    pub settings: &'static str,
    pub camera: &'static str,
    pub upload: &'static str,
    pub btn_download: &'static str,
    pub disclaimer: &'static str,
    pub guide: &'static str,
}

const EN: Labels = Labels {
    title: "J.A.R.V.I.S.",
    subtitle: "Just A Rather Intelligent System",
    dashboard: "SYSTEM HUD",
    vault: "INTEL VAULT",
    settings: "CONFIG",
    camera: "SCANNER",
    upload: "UPLINK",
    btn_download: "EXPORT INTEL",
    disclaimer: "STARK INDUSTRIES SECURE PROTOCOL",
    guide: "SYSTEM DIAGNOSTICS",
};

const HI: Labels = Labels {
    title: "जाार्विस",
    subtitle: "इंटेलिजेंट सिस्टम",
    dashboard: "सिस्टम HUD",
    vault: "इंटेल वॉल्ट",
    settings: "कॉन्फ़िगर",
    camera: "स्कैनर",
    upload: "अपलिंक",
    btn_download: "PDF एक्सपोर्ट",
    disclaimer: "स्टार्क इंडस्ट्रीज सुरक्षित प्रोटोकॉल",
    guide: "सिस्टम डायग्नोस्टिक्स",
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::En => &EN,
            Language::Hi => &HI,
        }
    }
}
