//! 下部ナビゲーション

use evidence_ai_common::{Tab, ViewState};
use leptos::prelude::*;

fn nav_class(active: bool) -> &'static str {
    if active {
        "nav-btn active"
    } else {
        "nav-btn"
    }
}

#[component]
pub fn NavBar<FT, FU, FS>(
    view_state: Signal<ViewState>,
    camera_open: ReadSignal<bool>,
    on_tab: FT,
    on_upload: FU,
    on_scan: FS,
) -> impl IntoView
where
    FT: Fn(Tab) + 'static + Clone + Send + Sync,
    FU: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    let tab_button = move |tab: Tab, label: &'static str| {
        let on_tab = on_tab.clone();
        view! {
            <button
                class=move || nav_class(view_state.get() == ViewState::from(tab))
                on:click=move |_| on_tab(tab)
            >
                {label}
            </button>
        }
    };

    view! {
        <nav class="nav-bar no-print">
            {tab_button(Tab::Dashboard, "HOME")}
            {tab_button(Tab::History, "INTEL")}
            <div class="nav-fab-slot">
                <button class="nav-fab arc-pulse" on:click=move |_| on_upload(())>"⇪"</button>
            </div>
            <button class=move || nav_class(camera_open.get()) on:click=move |_| on_scan(())>
                "SCAN"
            </button>
            {tab_button(Tab::Settings, "CFG")}
        </nav>
    }
}
