//! Evidence AI CLI
//!
//! 証拠画像をGeminiで解析し、信頼度・要点・苦情文ドラフトを表示する。

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod importer;
pub mod session;
pub mod stamper;
