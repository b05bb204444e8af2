//! ヘッダーコンポーネント

use evidence_ai_common::Labels;
use leptos::prelude::*;

#[component]
pub fn Header(labels: Signal<&'static Labels>, online: Signal<bool>) -> impl IntoView {
    view! {
        <header class="header no-print">
            <div class="header-badge">"◉"</div>
            <div class="header-title">
                <span class="title">{move || labels.get().title}</span>
                <span class="status">
                    {move || if online.get() { "Mark 1.5 // Online" } else { "Mark 1.5 // Booting" }}
                </span>
            </div>
        </header>
    }
}
