//! 送信ボタン（読み込み中はスピナー表示で無効化）

use leptos::prelude::*;

#[component]
pub fn SubmitButton(
    text: &'static str,
    #[prop(into)] loading: Signal<bool>,
    #[prop(optional, into)] disabled: Option<Signal<bool>>,
    #[prop(default = "blue")] color: &'static str,
) -> impl IntoView {
    let is_disabled = move || loading.get() || disabled.map(|d| d.get()).unwrap_or(false);

    view! {
        <button
            type="submit"
            class=move || {
                let mut classes = vec!["btn-submit".to_string(), format!("btn-{}", color)];
                if is_disabled() {
                    classes.push("disabled".to_string());
                }
                classes.join(" ")
            }
            disabled=is_disabled
        >
            <Show when=move || loading.get() fallback=move || text>
                <span class="spinner" role="status" aria-label="loading"></span>
                <span class="spinner-text">"加载中..."</span>
            </Show>
        </button>
    }
}
