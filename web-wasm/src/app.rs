//! メインアプリケーションコンポーネント
//!
//! 画面状態は `Controller` 1つを RwSignal で保持する。
//! カメラのストリームは Send でないため StoredValue(local) に分けて持つ。

use crate::api::gemini::GeminiFetchClient;
use crate::browser::{self, BrowserClipboard, BrowserStamper};
use crate::camera::{WebCamera, WebStream};
use crate::components::{
    analyzing::Analyzing,
    dashboard::Dashboard,
    header::Header,
    history_list::HistoryList,
    nav_bar::NavBar,
    result_view::ResultView,
    scanner_overlay::ScannerOverlay,
    settings_panel::SettingsPanel,
    splash::Splash,
    toast::Toast,
};
use evidence_ai_common::clipboard::COPY_FEEDBACK_MS;
use evidence_ai_common::controller::{SPLASH_DURATION_MS, STEP_INTERVAL_MS};
use evidence_ai_common::{
    analyze, copy_text, start_camera, CaptureError, CaptureManager, ComplaintKind, Controller,
    ImagePayload, Tab, ViewEvent, ViewState,
};
use gloo::timers::callback::{Interval, Timeout};
use leptos::html::{Div, Input};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let controller = RwSignal::new(Controller::new());
    let capture = StoredValue::new_local(CaptureManager::<WebStream>::new());
    let ticker = StoredValue::new_local(None::<Interval>);
    let (camera_open, set_camera_open) = signal(false);
    let (api_key, set_api_key) = signal(String::new());
    let clock = RwSignal::new(browser::now_ms());

    let file_input: NodeRef<Input> = NodeRef::new();
    let video_slot: NodeRef<Div> = NodeRef::new();

    let view_state = Memo::new(move |_| controller.with(|c| c.view()));
    let analyzing = Memo::new(move |_| controller.with(|c| c.is_analyzing()));
    let labels = Signal::derive(move || controller.with(|c| c.labels()));
    let online = Signal::derive(move || controller.with(|c| c.system_online()));
    let language = Signal::derive(move || controller.with(|c| c.language()));
    let complaint = Signal::derive(move || controller.with(|c| c.complaint()));
    let notice = Signal::derive(move || controller.with(|c| c.notice().cloned()));
    let step_label = Signal::derive(move || controller.with(|c| c.analysis_step_label()));
    let history = Signal::derive(move || controller.with(|c| c.history().list()));
    let history_count = Signal::derive(move || controller.with(|c| c.history().len()));
    let current = Memo::new(move |_| controller.with(|c| c.current().cloned()));
    let has_api_key = Signal::derive(move || !api_key.with(|k| k.is_empty()));
    let copied = Signal::derive(move || {
        let now = clock.get();
        controller.with(|c| c.is_copied(now))
    });

    // スプラッシュ → ダッシュボード
    Timeout::new(SPLASH_DURATION_MS, move || {
        controller.update(|c| {
            c.transition(ViewEvent::AppReady);
        });
        tracing::info!("system online");
    })
    .forget();

    // 解析中のみステップ表示を進める（解析終了で Interval を破棄）
    Effect::new(move |_| {
        if analyzing.get() {
            let interval = Interval::new(STEP_INTERVAL_MS, move || {
                controller.update(|c| {
                    c.transition(ViewEvent::Tick);
                });
            });
            ticker.set_value(Some(interval));
        } else {
            ticker.set_value(None);
        }
    });

    // カメラが開いたら video 要素をオーバーレイに差し込む
    Effect::new(move |_| {
        if !camera_open.get() {
            return;
        }
        if let Some(slot) = video_slot.get() {
            capture.with_value(|manager| {
                if let Some(stream) = manager.session().and_then(|s| s.stream()) {
                    let _ = slot.append_child(stream.video());
                }
            });
        }
    });

    let close_camera = move || {
        capture.update_value(|m| m.stop_camera());
        set_camera_open.set(false);
    };

    let report_capture_error = move |error: CaptureError| {
        tracing::warn!("capture failed: {}", error);
        controller.update(|c| c.report_capture_error(&error));
    };

    // 解析開始（解析中なら何もしない）
    let run_analysis = move |image: ImagePayload| {
        close_camera();

        let key = api_key.get_untracked();
        if key.is_empty() {
            controller.update(|c| {
                c.transition(ViewEvent::SelectTab(Tab::Settings));
            });
            return;
        }

        let Some(token) = controller.try_update(|c| c.begin_analysis()).flatten() else {
            return;
        };
        let language = controller.with_untracked(|c| c.language());
        let client = GeminiFetchClient::new(key);

        spawn_local(async move {
            let outcome = analyze(&client, &BrowserStamper, image, language).await;
            controller.update(|c| {
                c.finish_analysis(token, outcome);
            });
        });
    };

    let on_scan = move |_: ()| {
        browser::trigger_haptic();
        if controller.with_untracked(|c| c.is_analyzing()) {
            return;
        }
        spawn_local(async move {
            match start_camera(&WebCamera).await {
                Ok(session) => {
                    // 許可ダイアログ中にアップロードで解析が始まった場合
                    let busy = controller.with_untracked(|c| c.is_analyzing());
                    if capture.try_update_value(|m| m.open_unless_busy(session, busy)) == Some(true) {
                        set_camera_open.set(true);
                    }
                }
                Err(e) => report_capture_error(e),
            }
        });
    };

    let on_capture = move |_: ()| {
        browser::trigger_haptic();
        match capture.try_update_value(|m| m.capture_frame()) {
            Some(Ok(image)) => run_analysis(image),
            Some(Err(e)) => report_capture_error(e),
            None => {}
        }
    };

    let on_upload = move |_: ()| {
        browser::trigger_haptic();
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let on_file_selected = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // 同じファイルを続けて選べるように
        input.set_value("");

        let mime_type = file.type_();
        spawn_local(async move {
            match browser::read_file_bytes(&file).await {
                Ok(bytes) => match capture.try_update_value(|m| m.import_file(bytes, &mime_type)) {
                    Some(Ok(image)) => run_analysis(image),
                    Some(Err(e)) => report_capture_error(e),
                    None => {}
                },
                Err(e) => tracing::error!("file read failed: {}", e),
            }
        });
    };

    let on_tab = move |tab: Tab| {
        close_camera();
        controller.update(|c| {
            c.transition(ViewEvent::SelectTab(tab));
        });
    };

    let on_abandon = move |_: ()| {
        controller.update(|c| {
            c.transition(ViewEvent::AbandonAnalysis);
        });
    };

    let on_open_result = move |index: usize| {
        browser::trigger_haptic();
        controller.update(|c| {
            c.transition(ViewEvent::OpenResult(index));
        });
    };

    let on_close_result = move |_: ()| {
        controller.update(|c| {
            c.transition(ViewEvent::DismissResult);
        });
    };

    let on_export = move |_: ()| {
        browser::trigger_haptic();
        browser::print_page();
    };

    let on_select_complaint = move |kind: ComplaintKind| {
        browser::trigger_haptic();
        controller.update(|c| c.select_complaint(kind));
    };

    let on_copy = move |text: String| {
        browser::trigger_haptic();
        spawn_local(async move {
            let mut feedback = controller.with_untracked(|c| c.copy_feedback());
            let now = browser::now_ms();
            match copy_text(&BrowserClipboard, &mut feedback, &text, now).await {
                Ok(()) => {
                    controller.update(|c| c.set_copy_feedback(feedback));
                    clock.set(now);
                    // 2秒後に表示を戻すため時計を進める
                    Timeout::new(COPY_FEEDBACK_MS as u32, move || {
                        let _ = clock.try_set(browser::now_ms());
                    })
                    .forget();
                }
                Err(e) => controller.update(|c| c.report_copy_failure(&e)),
            }
        });
    };

    let on_toggle_language = move |_: ()| {
        browser::trigger_haptic();
        controller.update(|c| {
            c.toggle_language();
        });
    };

    let on_dismiss_notice = move |_: ()| {
        controller.update(|c| c.dismiss_notice());
    };

    view! {
        <div class="app">
            <div class="hud-grid-bg" />

            <Header labels=labels online=online />

            <main class="viewport">
                {move || match view_state.get() {
                    ViewState::Splash => view! { <Splash labels=labels /> }.into_any(),
                    ViewState::Dashboard => view! {
                        <Dashboard
                            labels=labels
                            history_count=history_count
                            has_api_key=has_api_key
                            on_scan=on_scan
                            on_upload=on_upload
                        />
                    }.into_any(),
                    ViewState::Analyzing => view! {
                        <Analyzing step_label=step_label on_abandon=on_abandon />
                    }.into_any(),
                    ViewState::Result => match current.get() {
                        Some(result) => view! {
                            <ResultView
                                result=result
                                labels=labels
                                complaint=complaint
                                copied=copied
                                on_close=on_close_result
                                on_export=on_export
                                on_select_complaint=on_select_complaint
                                on_copy=on_copy
                            />
                        }.into_any(),
                        None => ().into_any(),
                    },
                    ViewState::History => view! {
                        <HistoryList labels=labels entries=history on_open=on_open_result />
                    }.into_any(),
                    ViewState::Settings => view! {
                        <SettingsPanel
                            labels=labels
                            api_key=api_key
                            set_api_key=set_api_key
                            language=language
                            on_toggle_language=on_toggle_language
                        />
                    }.into_any(),
                }}
            </main>

            <input
                type="file"
                accept="image/*"
                class="hidden-input"
                node_ref=file_input
                on:change=on_file_selected
            />

            <Show when=move || view_state.get() != ViewState::Splash>
                <NavBar
                    view_state=Signal::from(view_state)
                    camera_open=camera_open
                    on_tab=on_tab
                    on_upload=on_upload
                    on_scan=on_scan
                />
            </Show>

            <Show when=move || camera_open.get()>
                <ScannerOverlay
                    video_slot=video_slot
                    on_capture=on_capture
                    on_close=move |_: ()| close_camera()
                />
            </Show>

            <Toast notice=notice on_dismiss=on_dismiss_notice />
        </div>
    }
}
