//! 画面状態コントローラ
//!
//! アプリ全体の状態（現在の画面・履歴・表示中の結果・設定）を1つの構造体で持ち、
//! イベントごとの遷移表に従って画面を切り替える。
//!
//! | イベント | 遷移元 | 遷移先 |
//! |---|---|---|
//! | AppReady | Splash | Dashboard |
//! | StartAnalysis | Analyzing以外 | Analyzing |
//! | AnalysisSucceeded | Analyzing（トークン一致） | Result |
//! | AnalysisFailed | Analyzing（トークン一致） | Dashboard |
//! | SelectTab | Analyzing以外 | 指定タブ |
//! | OpenResult | History | Result |
//! | DismissResult | Result | Dashboard |
//! | AbandonAnalysis | Analyzing | Dashboard |
//! | Tick | Analyzing | Analyzing（ステップ進行） |
//!
//! 表にない組み合わせは何もしない。

use crate::clipboard::CopyFeedback;
use crate::error::{AnalysisError, CaptureError, ClipboardError};
use crate::history::HistoryStore;
use crate::i18n::Labels;
use crate::types::{ComplaintKind, EvidenceResult, Language, Settings};
use std::sync::Arc;

/// スプラッシュ表示時間
pub const SPLASH_DURATION_MS: u32 = 3_000;

/// 解析中ステップの更新間隔
pub const STEP_INTERVAL_MS: u32 = 1_000;

/// 解析中に表示するステップ（演出のみ、完了判定には使わない）
pub const ANALYSIS_STEPS: [&str; 5] = [
    "BOOTING SYSTEM CORES...",
    "ACCESSING STARK MAINFRAME...",
    "EXTRACTING OPTICAL DATA...",
    "DECRYPTING METADATA STRINGS...",
    "GENERATING NEURAL SUMMARY...",
];

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewState {
    #[default]
    Splash,
    Dashboard,
    Analyzing,
    Result,
    History,
    Settings,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Splash => "splash",
            ViewState::Dashboard => "dashboard",
            ViewState::Analyzing => "analyzing",
            ViewState::Result => "result",
            ViewState::History => "history",
            ViewState::Settings => "settings",
        }
    }
}

/// ナビゲーションバーから選べる画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Dashboard,
    History,
    Settings,
}

impl From<Tab> for ViewState {
    fn from(tab: Tab) -> Self {
        match tab {
            Tab::Dashboard => ViewState::Dashboard,
            Tab::History => ViewState::History,
            Tab::Settings => ViewState::Settings,
        }
    }
}

/// 解析リクエストの世代トークン
///
/// 古いリクエストの応答が新しい画面状態を上書きしないよう、
/// 応答適用時に現在の世代と照合する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// 画面遷移イベント
#[derive(Debug, Clone)]
pub enum ViewEvent {
    AppReady,
    StartAnalysis,
    AnalysisSucceeded { token: RequestToken, result: EvidenceResult },
    AnalysisFailed { token: RequestToken, error: AnalysisError },
    SelectTab(Tab),
    OpenResult(usize),
    DismissResult,
    AbandonAnalysis,
    Tick,
}

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Capture,
    Analysis,
    Clipboard,
}

/// 画面を塞がない通知（トースト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// アプリケーション状態
#[derive(Debug, Clone, Default)]
pub struct Controller {
    view: ViewState,
    system_online: bool,
    step: usize,
    generation: u64,
    in_flight: Option<RequestToken>,
    current: Option<Arc<EvidenceResult>>,
    history: HistoryStore,
    settings: Settings,
    complaint: ComplaintKind,
    copy: CopyFeedback,
    notice: Option<Notice>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn system_online(&self) -> bool {
        self.system_online
    }

    pub fn is_analyzing(&self) -> bool {
        self.view == ViewState::Analyzing
    }

    pub fn analysis_step(&self) -> usize {
        self.step
    }

    pub fn analysis_step_label(&self) -> &'static str {
        ANALYSIS_STEPS[self.step.min(ANALYSIS_STEPS.len() - 1)]
    }

    pub fn current(&self) -> Option<&Arc<EvidenceResult>> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_language(self.settings.language)
    }

    pub fn complaint(&self) -> ComplaintKind {
        self.complaint
    }

    /// 表示中の結果の、選択中カテゴリの苦情文
    pub fn current_complaint_text(&self) -> Option<&str> {
        self.current.as_deref().map(|r| r.complaint(self.complaint))
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn copy_feedback(&self) -> CopyFeedback {
        self.copy
    }

    pub fn is_copied(&self, now_ms: u64) -> bool {
        self.copy.is_copied(now_ms)
    }

    /// 解析中リクエストのトークン
    ///
    /// `ViewEvent::StartAnalysis` で開始した場合、応答イベントにはこの値を載せる
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// イベントを適用して遷移後の画面を返す
    pub fn transition(&mut self, event: ViewEvent) -> ViewState {
        match event {
            ViewEvent::AppReady => {
                if self.view == ViewState::Splash {
                    self.view = ViewState::Dashboard;
                    self.system_online = true;
                }
            }
            ViewEvent::StartAnalysis => {
                self.begin_analysis();
            }
            ViewEvent::AnalysisSucceeded { token, result } => {
                self.finish_analysis(token, Ok(result));
            }
            ViewEvent::AnalysisFailed { token, error } => {
                self.finish_analysis(token, Err(error));
            }
            ViewEvent::SelectTab(tab) => {
                if self.view != ViewState::Analyzing {
                    self.view = tab.into();
                }
            }
            ViewEvent::OpenResult(index) => {
                if self.view == ViewState::History {
                    if let Some(result) = self.history.select(index) {
                        self.show_result(result);
                    }
                }
            }
            ViewEvent::DismissResult => {
                if self.view == ViewState::Result {
                    self.view = ViewState::Dashboard;
                }
            }
            ViewEvent::AbandonAnalysis => {
                if self.view == ViewState::Analyzing {
                    tracing::info!("analysis abandoned, late response will be discarded");
                    self.in_flight = None;
                    self.view = ViewState::Dashboard;
                }
            }
            ViewEvent::Tick => {
                if self.view == ViewState::Analyzing && self.step + 1 < ANALYSIS_STEPS.len() {
                    self.step += 1;
                }
            }
        }
        self.view
    }

    /// 解析開始。すでに解析中なら何もせず None を返す
    ///
    /// 返したトークンを持つ応答だけが `finish_analysis` で適用される
    pub fn begin_analysis(&mut self) -> Option<RequestToken> {
        if self.view == ViewState::Analyzing {
            tracing::debug!("analysis already in flight, trigger ignored");
            return None;
        }
        self.generation += 1;
        let token = RequestToken(self.generation);
        self.in_flight = Some(token);
        self.view = ViewState::Analyzing;
        self.step = 0;
        self.notice = None;
        Some(token)
    }

    /// 解析結果を適用する。古いトークンの応答は破棄する
    pub fn finish_analysis(
        &mut self,
        token: RequestToken,
        outcome: Result<EvidenceResult, AnalysisError>,
    ) -> ViewState {
        if self.view != ViewState::Analyzing || self.in_flight != Some(token) {
            tracing::debug!(?token, "stale analysis outcome discarded");
            return self.view;
        }
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                self.history.append(result.clone());
                self.show_result(result);
            }
            Err(error) => {
                tracing::warn!("analysis failed: {}", error);
                self.view = ViewState::Dashboard;
                self.notice = Some(Notice {
                    kind: NoticeKind::Analysis,
                    message: analysis_failure_message(&error),
                });
            }
        }
        self.view
    }

    fn show_result(&mut self, result: Arc<EvidenceResult>) {
        self.current = Some(result);
        self.complaint = ComplaintKind::default();
        self.copy.clear();
        self.view = ViewState::Result;
    }

    pub fn select_complaint(&mut self, kind: ComplaintKind) {
        self.complaint = kind;
    }

    pub fn toggle_language(&mut self) -> Language {
        self.settings.language = self.settings.language.toggled();
        self.settings.language
    }

    /// カメラ・ファイル取込みの失敗を通知する（画面は変えない）
    pub fn report_capture_error(&mut self, error: &CaptureError) {
        let message = match error {
            CaptureError::DeviceUnavailable(_) => "Holographic Scanner Offline: Check Permissions".to_string(),
            CaptureError::UnsupportedType(mime) => format!("Unsupported uplink format: {}", mime),
            CaptureError::NoFrameAvailable => "Scanner warming up: no frame yet".to_string(),
        };
        self.notice = Some(Notice {
            kind: NoticeKind::Capture,
            message,
        });
    }

    pub fn set_copy_feedback(&mut self, feedback: CopyFeedback) {
        self.copy = feedback;
    }

    pub fn report_copy_failure(&mut self, error: &ClipboardError) {
        self.notice = Some(Notice {
            kind: NoticeKind::Clipboard,
            message: error.to_string(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

fn analysis_failure_message(error: &AnalysisError) -> String {
    match error {
        AnalysisError::Network(_) => "Uplink failed: analysis service unreachable".to_string(),
        AnalysisError::MalformedResponse(_) => "Analysis returned unreadable intel".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analyze;
    use crate::pipeline::test_support::{FixedStamper, ScriptedService, SAMPLE_RESPONSE};
    use crate::payload::ImagePayload;
    use crate::types::{CaseId, Complaints, TrustLevel};
    use futures::executor::block_on;

    fn sample_result(platform: &str) -> EvidenceResult {
        EvidenceResult {
            platform: platform.to_string(),
            date: String::new(),
            summary: "summary".to_string(),
            trust_score: 10,
            trust_level: TrustLevel::Low,
            key_points: vec![],
            complaints: Complaints {
                cyber: "c1".to_string(),
                bank: "c2".to_string(),
                consumer: "c3".to_string(),
            },
            image: ImagePayload::default(),
            timestamp: "now".to_string(),
            hash: CaseId::from_bits(1),
        }
    }

    fn ready() -> Controller {
        let mut controller = Controller::new();
        controller.transition(ViewEvent::AppReady);
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::new();
        assert_eq!(controller.view(), ViewState::Splash);
        assert!(!controller.system_online());
        assert!(controller.history().is_empty());
    }

    #[test]
    fn test_app_ready() {
        let mut controller = Controller::new();
        assert_eq!(controller.transition(ViewEvent::AppReady), ViewState::Dashboard);
        assert!(controller.system_online());

        // スプラッシュ以外では無視
        controller.transition(ViewEvent::SelectTab(Tab::History));
        assert_eq!(controller.transition(ViewEvent::AppReady), ViewState::History);
    }

    #[test]
    fn test_select_tab_sequences() {
        let tabs = [Tab::Dashboard, Tab::History, Tab::Settings];
        let mut controller = ready();

        for first in tabs {
            for second in tabs {
                assert_eq!(controller.transition(ViewEvent::SelectTab(first)), first.into());
                assert_eq!(controller.transition(ViewEvent::SelectTab(second)), second.into());
                assert_eq!(controller.view(), ViewState::from(second));
            }
        }
    }

    #[test]
    fn test_select_tab_ignored_while_analyzing() {
        let mut controller = ready();
        controller.begin_analysis().unwrap();
        assert_eq!(controller.transition(ViewEvent::SelectTab(Tab::Settings)), ViewState::Analyzing);
    }

    #[test]
    fn test_start_analysis_reentrant_is_noop() {
        let mut controller = ready();
        let service = ScriptedService::ok(SAMPLE_RESPONSE);

        let dispatch = |controller: &mut Controller| {
            if let Some(token) = controller.begin_analysis() {
                let outcome = block_on(analyze(&service, &FixedStamper, ImagePayload::default(), Language::En));
                Some((token, outcome))
            } else {
                None
            }
        };

        let first = dispatch(&mut controller);
        assert!(first.is_some());
        assert!(dispatch(&mut controller).is_none());
        assert_eq!(controller.transition(ViewEvent::StartAnalysis), ViewState::Analyzing);
        assert_eq!(service.calls.get(), 1);

        let (token, outcome) = first.unwrap();
        assert_eq!(controller.finish_analysis(token, outcome), ViewState::Result);
    }

    #[test]
    fn test_event_driven_start_to_result() {
        let mut controller = ready();
        assert!(controller.pending_token().is_none());

        assert_eq!(controller.transition(ViewEvent::StartAnalysis), ViewState::Analyzing);
        let token = controller.pending_token().unwrap();

        let view = controller.transition(ViewEvent::AnalysisSucceeded {
            token,
            result: sample_result("Telegram"),
        });
        assert_eq!(view, ViewState::Result);
        assert!(controller.pending_token().is_none());
        assert_eq!(controller.current().unwrap().platform, "Telegram");
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_event_driven_start_to_failure() {
        let mut controller = ready();
        controller.transition(ViewEvent::StartAnalysis);
        let token = controller.pending_token().unwrap();

        let view = controller.transition(ViewEvent::AnalysisFailed {
            token,
            error: AnalysisError::Network("offline".into()),
        });
        assert_eq!(view, ViewState::Dashboard);
        assert!(controller.pending_token().is_none());
        assert_eq!(controller.transition(ViewEvent::SelectTab(Tab::History)), ViewState::History);
    }

    #[test]
    fn test_abandon_clears_pending_token() {
        let mut controller = ready();
        controller.transition(ViewEvent::StartAnalysis);
        controller.transition(ViewEvent::AbandonAnalysis);
        assert!(controller.pending_token().is_none());
    }

    #[test]
    fn test_start_analysis_resets_step() {
        let mut controller = ready();
        let token = controller.begin_analysis().unwrap();
        controller.transition(ViewEvent::Tick);
        controller.transition(ViewEvent::Tick);
        assert_eq!(controller.analysis_step(), 2);

        controller.finish_analysis(token, Err(AnalysisError::Network("offline".into())));
        controller.begin_analysis().unwrap();
        assert_eq!(controller.analysis_step(), 0);
        assert_eq!(controller.analysis_step_label(), "BOOTING SYSTEM CORES...");
    }

    #[test]
    fn test_tick_saturates_at_final_stage() {
        let mut controller = ready();
        controller.begin_analysis().unwrap();
        for _ in 0..20 {
            controller.transition(ViewEvent::Tick);
        }
        assert_eq!(controller.analysis_step(), 4);
        assert_eq!(controller.analysis_step_label(), "GENERATING NEURAL SUMMARY...");
    }

    #[test]
    fn test_tick_outside_analysis_ignored() {
        let mut controller = ready();
        controller.transition(ViewEvent::Tick);
        assert_eq!(controller.analysis_step(), 0);
        assert_eq!(controller.view(), ViewState::Dashboard);
    }

    #[test]
    fn test_analysis_succeeded() {
        let mut controller = ready();
        let token = controller.begin_analysis().unwrap();

        let view = controller.transition(ViewEvent::AnalysisSucceeded {
            token,
            result: sample_result("UPI"),
        });

        assert_eq!(view, ViewState::Result);
        assert_eq!(controller.history().len(), 1);
        let current = controller.current().unwrap();
        assert_eq!(current.platform, "UPI");
        assert!(Arc::ptr_eq(current, &controller.history().select(0).unwrap()));
        assert_eq!(controller.current_complaint_text(), Some("c1"));
    }

    #[test]
    fn test_analysis_failed_returns_to_dashboard_with_notice() {
        let mut controller = ready();
        let token = controller.begin_analysis().unwrap();

        let view = controller.transition(ViewEvent::AnalysisFailed {
            token,
            error: AnalysisError::MalformedResponse("missing".into()),
        });

        assert_eq!(view, ViewState::Dashboard);
        assert!(controller.history().is_empty());
        assert_eq!(controller.notice().map(|n| n.kind), Some(NoticeKind::Analysis));

        controller.dismiss_notice();
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_stale_outcome_discarded_after_abandon() {
        let mut controller = ready();
        let stale = controller.begin_analysis().unwrap();
        assert_eq!(controller.transition(ViewEvent::AbandonAnalysis), ViewState::Dashboard);

        controller.transition(ViewEvent::SelectTab(Tab::Settings));
        let view = controller.finish_analysis(stale, Ok(sample_result("late")));

        assert_eq!(view, ViewState::Settings);
        assert!(controller.history().is_empty());
        assert!(controller.current().is_none());
    }

    #[test]
    fn test_stale_token_does_not_complete_newer_request() {
        let mut controller = ready();
        let stale = controller.begin_analysis().unwrap();
        controller.transition(ViewEvent::AbandonAnalysis);
        let fresh = controller.begin_analysis().unwrap();
        assert_ne!(stale, fresh);

        assert_eq!(controller.finish_analysis(stale, Ok(sample_result("old"))), ViewState::Analyzing);
        assert_eq!(controller.finish_analysis(fresh, Ok(sample_result("new"))), ViewState::Result);
        assert_eq!(controller.current().unwrap().platform, "new");
        assert_eq!(controller.history().len(), 1);
    }

    #[test]
    fn test_open_result_from_history() {
        let mut controller = ready();
        for name in ["first", "second"] {
            let token = controller.begin_analysis().unwrap();
            controller.finish_analysis(token, Ok(sample_result(name)));
        }
        controller.select_complaint(ComplaintKind::Bank);

        // History以外からは開けない
        controller.transition(ViewEvent::DismissResult);
        assert_eq!(controller.transition(ViewEvent::OpenResult(1)), ViewState::Dashboard);

        controller.transition(ViewEvent::SelectTab(Tab::History));
        assert_eq!(controller.transition(ViewEvent::OpenResult(1)), ViewState::Result);
        assert_eq!(controller.current().unwrap().platform, "first");
        assert_eq!(controller.complaint(), ComplaintKind::Cyber);
    }

    #[test]
    fn test_open_result_out_of_range() {
        let mut controller = ready();
        controller.transition(ViewEvent::SelectTab(Tab::History));
        assert_eq!(controller.transition(ViewEvent::OpenResult(0)), ViewState::History);
    }

    #[test]
    fn test_dismiss_result_only_from_result() {
        let mut controller = ready();
        controller.transition(ViewEvent::SelectTab(Tab::Settings));
        assert_eq!(controller.transition(ViewEvent::DismissResult), ViewState::Settings);
    }

    #[test]
    fn test_capture_error_keeps_view() {
        let mut controller = ready();
        controller.report_capture_error(&CaptureError::DeviceUnavailable("denied".into()));
        assert_eq!(controller.view(), ViewState::Dashboard);
        assert_eq!(
            controller.notice().unwrap().message,
            "Holographic Scanner Offline: Check Permissions"
        );
    }

    #[test]
    fn test_language_toggle_changes_labels() {
        let mut controller = Controller::with_settings(Settings { language: Language::Hi });
        assert_eq!(controller.labels().btn_download, "PDF एक्सपोर्ट");
        assert_eq!(controller.toggle_language(), Language::En);
        assert_eq!(controller.labels().btn_download, "EXPORT INTEL");
    }

    #[test]
    fn test_copy_feedback_cleared_on_new_result() {
        let mut controller = ready();
        let token = controller.begin_analysis().unwrap();
        controller.finish_analysis(token, Ok(sample_result("a")));

        let mut feedback = controller.copy_feedback();
        feedback.mark_copied(1_000);
        controller.set_copy_feedback(feedback);
        assert!(controller.is_copied(2_000));
        assert!(!controller.is_copied(3_000));

        controller.transition(ViewEvent::SelectTab(Tab::History));
        controller.transition(ViewEvent::OpenResult(0));
        assert!(!controller.is_copied(1_500));
    }

    #[test]
    fn test_scenario_png_upload_to_result() {
        let mut controller = ready();
        let image = crate::capture::import_file(vec![0x89, 0x50, 0x4E, 0x47], "image/png").unwrap();
        let service = ScriptedService::ok(SAMPLE_RESPONSE);

        let token = controller.begin_analysis().unwrap();
        let outcome = block_on(analyze(&service, &FixedStamper, image, controller.language()));
        let view = controller.finish_analysis(token, outcome);

        assert_eq!(view, ViewState::Result);
        assert_eq!(service.calls.get(), 1);
        let result = controller.current().unwrap();
        assert_eq!(result.platform, "X");
        assert_eq!(result.trust_score, 72);
        assert_eq!(result.trust_level, TrustLevel::Medium);
        assert_eq!(result.summary, "s");
        assert_eq!(result.key_points, vec!["a".to_string()]);
        assert_eq!(result.complaints.cyber, "c1");
        assert_eq!(result.complaints.bank, "c2");
        assert_eq!(result.complaints.consumer, "c3");
        assert!(!result.timestamp.is_empty());
        assert!(CaseId::is_well_formed(result.hash.as_str()));
    }

    #[test]
    fn test_scenario_text_upload_rejected_before_dispatch() {
        let mut controller = ready();
        let service = ScriptedService::ok(SAMPLE_RESPONSE);

        match crate::capture::import_file(b"hello".to_vec(), "text/plain") {
            Ok(image) => {
                let token = controller.begin_analysis().unwrap();
                let outcome = block_on(analyze(&service, &FixedStamper, image, Language::En));
                controller.finish_analysis(token, outcome);
            }
            Err(error) => {
                assert_eq!(error, CaptureError::UnsupportedType("text/plain".into()));
                controller.report_capture_error(&error);
            }
        }

        assert_eq!(service.calls.get(), 0);
        assert_eq!(controller.view(), ViewState::Dashboard);
        assert_eq!(controller.notice().unwrap().kind, NoticeKind::Capture);
    }

    #[test]
    fn test_malformed_response_leaves_history_unchanged() {
        let mut controller = ready();
        let service = ScriptedService::ok("not json at all");

        let token = controller.begin_analysis().unwrap();
        let outcome = block_on(analyze(&service, &FixedStamper, ImagePayload::default(), Language::En));
        assert!(matches!(outcome, Err(AnalysisError::MalformedResponse(_))));

        assert_eq!(controller.finish_analysis(token, outcome), ViewState::Dashboard);
        assert!(controller.history().is_empty());
    }
}
