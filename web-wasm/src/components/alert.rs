//! 通知バナー（3秒で自動的に閉じる）

use std::time::Duration;

use bid_writer_common::notice::{Notice, AUTO_DISMISS_MS};
use leptos::prelude::*;

#[component]
pub fn Alert(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let timer = StoredValue::new(None::<TimeoutHandle>);

    // 新しい通知が出るたびにタイマーを張り直す
    Effect::new(move |_| {
        let shown = notice.with(Option::is_some);
        if let Some(handle) = timer.get_value() {
            handle.clear();
        }
        if shown {
            let handle = set_timeout_with_handle(
                move || notice.set(None),
                Duration::from_millis(AUTO_DISMISS_MS as u64),
            )
            .ok();
            timer.set_value(handle);
        }
    });

    on_cleanup(move || {
        if let Some(handle) = timer.try_get_value().flatten() {
            handle.clear();
        }
    });

    move || {
        notice.get().map(|n| {
            view! {
                <div class=format!("alert alert-{}", n.kind.as_str()) role="alert">
                    <div class="alert-icon">{if n.is_error() { "✕" } else { "✓" }}</div>
                    <div class="alert-body">
                        <h3 class="alert-title">{n.title.clone()}</h3>
                        <p class="alert-message">{n.message.clone()}</p>
                    </div>
                    <button class="alert-close" on:click=move |_| notice.set(None)>"×"</button>
                </div>
            }
        })
    }
}
