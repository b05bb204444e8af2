//! 対話セッション
//!
//! Web版と同じ `Controller` を端末から操作する。
//! 画像パスを渡すと解析し、結果は履歴に積まれる。

use crate::error::{EvidenceAiError, Result};
use crate::importer::import_path;
use dialoguer::Input;
use evidence_ai_common::{
    analyze, render_text_report, AnalysisService, ComplaintKind, Controller, Language, ResultStamper,
    Settings, Tab, ViewEvent, ViewState,
};
use std::path::{Path, PathBuf};

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// 画像を解析
    Analyze(PathBuf),
    /// 履歴を表示
    History,
    /// 履歴のN番目（1始まり）を開く
    Open(usize),
    /// 表示する苦情文を切替
    Complaint(ComplaintKind),
    /// 言語を切替
    ToggleLanguage,
    /// 表示中の結果をテキストで保存
    Export(PathBuf),
    /// ダッシュボードへ戻る
    Back,
    Help,
    Quit,
}

const HELP: &str = "操作: a <画像> 解析 / h 履歴 / o <番号> 開く / c <cyber|bank|consumer> 苦情文 / l 言語切替 / e <パス> 保存 / b 戻る / q 終了";

/// 入力行をアクションに変換（不明な入力は None）
pub fn parse_session_command(input: &str) -> Option<SessionAction> {
    let trimmed = input.trim();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (trimmed, ""),
    };

    match (command, arg) {
        ("a", path) if !path.is_empty() => Some(SessionAction::Analyze(PathBuf::from(path))),
        ("h", "") => Some(SessionAction::History),
        ("o", n) => n.parse::<usize>().ok().filter(|&n| n > 0).map(SessionAction::Open),
        ("c", key) => ComplaintKind::from_key(key).map(SessionAction::Complaint),
        ("l", "") => Some(SessionAction::ToggleLanguage),
        ("e", path) if !path.is_empty() => Some(SessionAction::Export(PathBuf::from(path))),
        ("b", "") => Some(SessionAction::Back),
        ("?", "") | ("help", "") => Some(SessionAction::Help),
        ("q", "") | ("Q", "") => Some(SessionAction::Quit),
        _ => None,
    }
}

/// 解析サービスと状態をまとめたセッション
pub struct Session<S, T> {
    controller: Controller,
    service: S,
    stamper: T,
}

impl<S: AnalysisService, T: ResultStamper> Session<S, T> {
    /// スプラッシュを経ずにダッシュボードから開始する
    pub fn new(service: S, stamper: T, language: Language) -> Self {
        let mut controller = Controller::with_settings(Settings { language });
        controller.transition(ViewEvent::AppReady);
        Self {
            controller,
            service,
            stamper,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// 画像を取り込んで解析する
    ///
    /// 取込み・解析の失敗は通知として残り、画面はダッシュボードに戻る。
    /// ファイルが読めない場合のみエラーを返す。
    pub async fn analyze_path(&mut self, path: &Path) -> Result<ViewState> {
        let image = match import_path(path) {
            Ok(image) => image,
            Err(EvidenceAiError::Capture(e)) => {
                self.controller.report_capture_error(&e);
                return Ok(self.controller.view());
            }
            Err(e) => return Err(e),
        };

        let Some(token) = self.controller.begin_analysis() else {
            return Ok(self.controller.view());
        };

        let outcome = analyze(&self.service, &self.stamper, image, self.controller.language()).await;
        Ok(self.controller.finish_analysis(token, outcome))
    }

    /// 履歴のN番目（1始まり）を開く
    pub fn open(&mut self, position: usize) -> ViewState {
        self.controller.transition(ViewEvent::SelectTab(Tab::History));
        match position.checked_sub(1) {
            Some(index) => self.controller.transition(ViewEvent::OpenResult(index)),
            None => self.controller.view(),
        }
    }

    pub fn select_complaint(&mut self, kind: ComplaintKind) {
        self.controller.select_complaint(kind);
    }

    pub fn toggle_language(&mut self) -> Language {
        self.controller.toggle_language()
    }

    pub fn back(&mut self) -> ViewState {
        self.controller.transition(ViewEvent::DismissResult);
        self.controller.transition(ViewEvent::SelectTab(Tab::Dashboard))
    }

    /// 表示中の結果のレポート
    pub fn current_report(&self) -> Option<String> {
        self.controller
            .current()
            .map(|r| render_text_report(r, self.controller.complaint(), self.controller.labels()))
    }

    /// 表示中の結果をファイルに保存
    pub fn export(&self, path: &Path) -> Result<bool> {
        match self.current_report() {
            Some(report) => {
                std::fs::write(path, report)?;
                tracing::info!(path = %path.display(), "report exported");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 履歴一覧（新しい順、番号は1始まり）
    pub fn history_lines(&self) -> Vec<String> {
        self.controller
            .history()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                format!(
                    "{:>3}. {} | {}% {} | {} | {}",
                    i + 1,
                    r.headline(),
                    r.trust_score,
                    r.trust_level,
                    r.hash,
                    r.timestamp
                )
            })
            .collect()
    }

    fn take_notice(&mut self) -> Option<String> {
        let message = self.controller.notice().map(|n| n.message.clone());
        self.controller.dismiss_notice();
        message
    }
}

/// 対話ループ
pub async fn run_interactive_session<S, T>(mut session: Session<S, T>) -> Result<()>
where
    S: AnalysisService,
    T: ResultStamper,
{
    let labels = session.controller().labels();
    println!("🛰  {} // {}", labels.title, labels.subtitle);
    println!("---");
    println!("{}", HELP);
    println!("---\n");

    loop {
        let input: String = Input::new()
            .with_prompt(session.controller().view().as_str())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| EvidenceAiError::Prompt(e.to_string()))?;

        let Some(action) = parse_session_command(&input) else {
            if !input.trim().is_empty() {
                println!("  不明な操作です (? でヘルプ)");
            }
            continue;
        };

        match action {
            SessionAction::Analyze(path) => {
                println!("  解析中: {}", path.display());
                match session.analyze_path(&path).await {
                    Ok(ViewState::Result) => {
                        if let Some(report) = session.current_report() {
                            println!("\n{}", report);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => println!("  ✗ {}", e),
                }
            }
            SessionAction::History => {
                session.controller.transition(ViewEvent::SelectTab(Tab::History));
                let lines = session.history_lines();
                if lines.is_empty() {
                    println!("  履歴はありません");
                }
                for line in lines {
                    println!("{}", line);
                }
            }
            SessionAction::Open(position) => {
                if session.open(position) == ViewState::Result {
                    if let Some(report) = session.current_report() {
                        println!("\n{}", report);
                    }
                } else {
                    println!("  {}番の履歴はありません", position);
                }
            }
            SessionAction::Complaint(kind) => {
                session.select_complaint(kind);
                match session.controller().current_complaint_text() {
                    Some(text) => println!("\n[{}]\n{}\n", kind.as_str().to_uppercase(), text),
                    None => println!("  表示中の結果がありません"),
                }
            }
            SessionAction::ToggleLanguage => {
                let language = session.toggle_language();
                println!("  言語: {}", language.display_name());
            }
            SessionAction::Export(path) => match session.export(&path) {
                Ok(true) => println!("  ✔ 保存しました: {}", path.display()),
                Ok(false) => println!("  表示中の結果がありません"),
                Err(e) => println!("  ✗ {}", e),
            },
            SessionAction::Back => {
                session.back();
            }
            SessionAction::Help => println!("{}", HELP),
            SessionAction::Quit => break,
        }

        if let Some(message) = session.take_notice() {
            println!("  ⚠ {}", message);
        }
    }

    println!("セッションを終了します（履歴は保存されません）");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_command() {
        assert_eq!(
            parse_session_command("a  ./shot one.png "),
            Some(SessionAction::Analyze(PathBuf::from("./shot one.png")))
        );
        assert_eq!(parse_session_command("h"), Some(SessionAction::History));
        assert_eq!(parse_session_command("o 2"), Some(SessionAction::Open(2)));
        assert_eq!(
            parse_session_command("c consumer"),
            Some(SessionAction::Complaint(ComplaintKind::Consumer))
        );
        assert_eq!(parse_session_command("l"), Some(SessionAction::ToggleLanguage));
        assert_eq!(parse_session_command("q"), Some(SessionAction::Quit));
    }

    #[test]
    fn test_parse_session_command_invalid() {
        assert_eq!(parse_session_command(""), None);
        assert_eq!(parse_session_command("a"), None);
        assert_eq!(parse_session_command("o 0"), None);
        assert_eq!(parse_session_command("o x"), None);
        assert_eq!(parse_session_command("c police"), None);
        assert_eq!(parse_session_command("h extra"), None);
    }
}
