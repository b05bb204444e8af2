//! カメラ撮影オーバーレイ
//!
//! video 要素はカメラ側で生成し、`video_slot` に差し込まれる。

use leptos::html::Div;
use leptos::prelude::*;

#[component]
pub fn ScannerOverlay<FC, FX>(video_slot: NodeRef<Div>, on_capture: FC, on_close: FX) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FX: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="scanner-overlay no-print">
            <div class="scanner-top">
                <button class="btn-icon" on:click=move |_| on_close(())>"×"</button>
            </div>
            <div class="scanner-viewport" node_ref=video_slot />
            <div class="scanner-bottom">
                <button class="shutter" on:click=move |_| on_capture(())>
                    <div class="shutter-inner" />
                </button>
            </div>
        </div>
    }
}
