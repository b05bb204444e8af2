//! 起動画面

use evidence_ai_common::Labels;
use leptos::prelude::*;

#[component]
pub fn Splash(labels: Signal<&'static Labels>) -> impl IntoView {
    view! {
        <div class="splash">
            <div class="splash-ring">
                <div class="splash-ring-inner" />
                <div class="splash-core">"CPU"</div>
            </div>
            <h1 class="splash-title">{move || labels.get().title}</h1>
            <p class="splash-subtitle">{move || labels.get().subtitle}</p>
        </div>
    }
}
