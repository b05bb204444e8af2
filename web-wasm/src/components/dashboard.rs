//! ダッシュボード（撮影・アップロードの入口）

use evidence_ai_common::Labels;
use leptos::prelude::*;

#[component]
pub fn Dashboard<FS, FU>(
    labels: Signal<&'static Labels>,
    history_count: Signal<usize>,
    has_api_key: Signal<bool>,
    on_scan: FS,
    on_upload: FU,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone + Send + Sync,
    FU: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="dashboard">
            <div class="hud-card hud-card-wide">
                <h2 class="hud-heading">"Neural Link Active."</h2>
                <p class="hud-caption">"Environment analysis protocol initiated."</p>
                <Show when=move || !has_api_key.get()>
                    <p class="text-muted">"Gemini API key required: open CONFIG to link the uplink."</p>
                </Show>
                <div class="hud-actions">
                    <button class="btn btn-primary" on:click=move |_| on_scan(())>
                        {move || labels.get().camera}
                    </button>
                    <button class="btn btn-secondary" on:click=move |_| on_upload(())>
                        {move || labels.get().upload}
                    </button>
                </div>
            </div>

            <div class="hud-grid">
                <div class="hud-card">
                    <span class="hud-label">"INTEL LOGS"</span>
                    <span class="hud-value">{move || history_count.get()}</span>
                </div>
                <div class="hud-card">
                    <span class="hud-label">"CORE TEMP"</span>
                    <span class="hud-value">"42°C"</span>
                </div>
            </div>

            <div class="system-feed">
                <h3 class="feed-heading">"System Feed"</h3>
                <div class="log-entry"><span>"JARVIS Core initialized..."</span><span class="log-time">"00:01"</span></div>
                <div class="log-entry"><span>"Stark VPN encrypted tunnel active."</span><span class="log-time">"00:03"</span></div>
            </div>
        </div>
    }
}
