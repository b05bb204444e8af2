//! 通知トースト

use evidence_ai_common::{Notice, NoticeKind};
use leptos::prelude::*;

fn kind_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Capture => "toast toast-capture",
        NoticeKind::Analysis => "toast toast-analysis",
        NoticeKind::Clipboard => "toast toast-clipboard",
    }
}

#[component]
pub fn Toast<F>(notice: Signal<Option<Notice>>, on_dismiss: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    move || {
        let on_dismiss = on_dismiss.clone();
        notice.get().map(|notice| {
            view! {
                <div class=kind_class(notice.kind) role="alert">
                    <span class="toast-message">{notice.message}</span>
                    <button class="toast-close" on:click=move |_| on_dismiss(())>"×"</button>
                </div>
            }
        })
    }
}
