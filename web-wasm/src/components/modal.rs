//! 確認モーダル
//!
//! 閉じた後も 600ms はDOMに残し、フェードアウトさせる。

use std::time::Duration;

use leptos::prelude::*;

/// CSSトランジションと合わせる
const CLOSE_TRANSITION_MS: u64 = 600;

#[component]
pub fn ConfirmModal<C, F>(
    #[prop(into)] is_open: Signal<bool>,
    title: &'static str,
    message: &'static str,
    button_text: &'static str,
    #[prop(default = "red")] button_color: &'static str,
    #[prop(into)] loading: Signal<bool>,
    on_close: C,
    on_confirm: F,
) -> impl IntoView
where
    C: Fn() + 'static + Clone + Send + Sync,
    F: Fn() + 'static + Clone + Send + Sync,
{
    let (mounted, set_mounted) = signal(is_open.get_untracked());
    let timer = StoredValue::new(None::<TimeoutHandle>);

    Effect::new(move |_| {
        if let Some(handle) = timer.get_value() {
            handle.clear();
        }
        if is_open.get() {
            set_mounted.set(true);
        } else {
            let handle = set_timeout_with_handle(
                move || set_mounted.set(false),
                Duration::from_millis(CLOSE_TRANSITION_MS),
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

    view! {
        <Show when=move || mounted.get()>
            <div class=move || {
                if is_open.get() { "modal-backdrop open" } else { "modal-backdrop closing" }
            }>
                <div class="modal-panel">
                    <button class="modal-close" on:click={
                        let on_close = on_close.clone();
                        move |_| on_close()
                    }>"×"</button>
                    <h2 class="modal-title">{title}</h2>
                    <p class="modal-message">{message}</p>
                    <button
                        class=format!("btn-confirm btn-{}", button_color)
                        disabled=move || loading.get()
                        on:click={
                            let on_confirm = on_confirm.clone();
                            move |_| on_confirm()
                        }
                    >
                        <Show when=move || loading.get() fallback=move || button_text>
                            <span class="spinner" role="status" aria-label="loading"></span>
                            <span class="spinner-text">"加载中..."</span>
                        </Show>
                    </button>
                </div>
            </div>
        </Show>
    }
}
