//! 解析中画面

use leptos::prelude::*;

#[component]
pub fn Analyzing<F>(step_label: Signal<&'static str>, on_abandon: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="analyzing">
            <div class="analyzing-spinner" />
            <h3 class="analyzing-title">"DECRYPTING..."</h3>
            <p class="analyzing-step">{move || step_label.get()}</p>
            <button class="btn btn-tertiary btn-small" on:click=move |_| on_abandon(())>
                "ABORT"
            </button>
        </div>
    }
}
