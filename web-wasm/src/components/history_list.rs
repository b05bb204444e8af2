//! 履歴一覧

use evidence_ai_common::{EvidenceResult, Labels};
use leptos::prelude::*;
use std::sync::Arc;

#[component]
pub fn HistoryList<F>(
    labels: Signal<&'static Labels>,
    entries: Signal<Vec<Arc<EvidenceResult>>>,
    on_open: F,
) -> impl IntoView
where
    F: Fn(usize) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="history">
            <h2 class="screen-title">{move || labels.get().vault}</h2>
            <Show
                when=move || !entries.with(|e| e.is_empty())
                fallback=|| view! { <p class="text-muted">"No intel archived this session."</p> }
            >
                <div class="history-list">
                    {
                        let on_open = on_open.clone();
                        move || {
                            entries
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, entry)| {
                                    let on_open = on_open.clone();
                                    view! {
                                        <div class="history-item" on:click=move |_| on_open(index)>
                                            <img class="history-thumb" src=entry.image.to_data_url() />
                                            <div class="history-meta">
                                                <p class="history-headline">{entry.headline()}</p>
                                                <p class="history-sub">{format!("{} // {}", entry.hash, entry.timestamp)}</p>
                                            </div>
                                            <span class="chevron">"›"</span>
                                        </div>
                                    }
                                })
                                .collect_view()
                        }
                    }
                </div>
            </Show>
        </div>
    }
}
