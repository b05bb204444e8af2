//! 設定パネルコンポーネント

use evidence_ai_common::{Labels, Language};
use leptos::prelude::*;

#[component]
pub fn SettingsPanel<FL>(
    labels: Signal<&'static Labels>,
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
    language: Signal<Language>,
    on_toggle_language: FL,
) -> impl IntoView
where
    FL: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="settings-panel">
            <h2 class="screen-title">{move || labels.get().settings}</h2>

            <button class="config-item" on:click=move |_| on_toggle_language(())>
                <span class="config-title">"UI LANGUAGE"</span>
                <span class="config-value">{move || language.get().display_name()}</span>
            </button>

            <div class="config-item">
                <span class="config-title">"STARK TUNNEL"</span>
                <span class="config-value">"SECURE"</span>
            </div>

            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="API Keyを入力..."
                    autocomplete="off"
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        set_api_key.set(event_target_value(&ev).trim().to_string());
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "APIキーを取得 →"
                </a>
                <p class="text-muted">"Kept in memory for this session only."</p>
            </div>

            <p class="disclaimer">{move || labels.get().guide}</p>
        </div>
    }
}
