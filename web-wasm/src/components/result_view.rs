//! 解析結果画面
//!
//! ケースID・要約・元画像・要点と、提出先ごとの苦情文ドラフトを表示する。

use evidence_ai_common::{trust_hint, ComplaintKind, EvidenceResult, Labels, TrustLevel};
use leptos::prelude::*;
use std::sync::Arc;

fn trust_class(level: TrustLevel) -> &'static str {
    match level {
        TrustLevel::Low => "trust trust-low",
        TrustLevel::Medium => "trust trust-medium",
        TrustLevel::High => "trust trust-high",
    }
}

fn score_width(score: u8) -> String {
    format!("width: {}%", score.min(100))
}

#[component]
pub fn ResultView<FC, FE, FS, FY>(
    result: Arc<EvidenceResult>,
    labels: Signal<&'static Labels>,
    complaint: Signal<ComplaintKind>,
    copied: Signal<bool>,
    on_close: FC,
    on_export: FE,
    on_select_complaint: FS,
    on_copy: FY,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FE: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(ComplaintKind) + 'static + Clone + Send + Sync,
    FY: Fn(String) + 'static + Clone + Send + Sync,
{
    let key_points = result
        .key_points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            view! {
                <div class="key-point">
                    <span class="key-point-index">{format!("[{}]", i + 1)}</span>
                    <span>{point.clone()}</span>
                </div>
            }
        })
        .collect_view();

    let tabs = ComplaintKind::ALL
        .into_iter()
        .map(|kind| {
            let on_select_complaint = on_select_complaint.clone();
            view! {
                <button
                    class=move || if complaint.get() == kind { "tab-btn active" } else { "tab-btn" }
                    on:click=move |_| on_select_complaint(kind)
                >
                    {format!("SEC: {}", kind.as_str())}
                </button>
            }
        })
        .collect_view();

    let draft = {
        let result = result.clone();
        move || result.complaint(complaint.get()).to_string()
    };

    let copy_current = {
        let result = result.clone();
        move |_: leptos::ev::MouseEvent| on_copy(result.complaint(complaint.get_untracked()).to_string())
    };

    view! {
        <div class="result">
            <div class="result-toolbar no-print">
                <button class="btn-icon" on:click=move |_| on_close(())>"×"</button>
                <button class="btn btn-primary btn-small" on:click=move |_| on_export(())>
                    {move || labels.get().btn_download}
                </button>
            </div>

            <div class="result-card">
                <h2 class="case-log">{format!("CASE LOG: {}", result.hash)}</h2>
                <p class="case-meta">{format!("TIMESTAMP: {}", result.timestamp)}</p>
                <p class="case-meta">{format!("PLATFORM: {}", result.platform)}</p>
                {(!result.date.is_empty()).then(|| view! {
                    <p class="case-meta">{format!("DATE: {}", result.date)}</p>
                })}

                <div class=trust_class(result.trust_level)>
                    <div class="trust-bar">
                        <div class="trust-fill" style=score_width(result.trust_score) />
                    </div>
                    <span class="trust-label">
                        {format!("TRUST {}% // {}", result.trust_score, result.trust_level)}
                    </span>
                    {trust_hint(&result).map(|hint| view! {
                        <span class="trust-hint">{format!("⚠ {}", hint)}</span>
                    })}
                </div>

                <blockquote class="summary">{format!("\"{}\"", result.summary)}</blockquote>

                <div class="evidence-image">
                    <img src=result.image.to_data_url() />
                </div>

                <div class="key-points">{key_points}</div>
            </div>

            <div class="complaint-card">
                <div class="complaint-tabs no-print">{tabs}</div>
                <div class="complaint-body">
                    <button
                        class=move || if copied.get() { "btn-copy copied no-print" } else { "btn-copy no-print" }
                        on:click=copy_current
                    >
                        {move || if copied.get() { "COPIED" } else { "COPY" }}
                    </button>
                    <pre class="complaint-draft">{draft}</pre>
                </div>
            </div>

            <p class="disclaimer">{move || labels.get().disclaimer}</p>
        </div>
    }
}
