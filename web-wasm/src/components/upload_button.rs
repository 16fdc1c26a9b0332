//! ファイル選択ボタン（拡張子・サイズを検証してから渡す）

use bid_writer_common::notice::Notice;
use bid_writer_common::upload::{Screened, UploadPolicy};
use leptos::prelude::*;
use web_sys::{File, HtmlInputElement};

use crate::components::alert::Alert;

/// FileList → Vec<File>
pub fn collect_files(input: &HtmlInputElement) -> Vec<File> {
    input
        .files()
        .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

pub fn describe(file: &File) -> (String, u64) {
    (file.name(), file.size() as u64)
}

#[component]
pub fn UploadButton<F>(
    text: &'static str,
    #[prop(optional)] policy: Option<UploadPolicy>,
    #[prop(into)] loading: Signal<bool>,
    #[prop(optional)] multiple: bool,
    on_files: F,
) -> impl IntoView
where
    F: Fn(Vec<File>) + 'static,
{
    let policy = policy.unwrap_or_default();
    let accept = policy.accept_attr();
    let error = RwSignal::new(None::<Notice>);

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = collect_files(&input);
        if files.is_empty() {
            return;
        }
        let screened = policy.screen(files, describe);
        if screened.clears_input() {
            input.set_value("");
        }
        match screened {
            Screened::Accepted(files) => on_files(files),
            Screened::Rejected(err) => error.set(Some(Notice::error("错误", err.to_string()))),
        }
    };

    view! {
        <label class=move || if loading.get() { "upload-button loading" } else { "upload-button" }>
            <Show
                when=move || loading.get()
                fallback=move || view! {
                    <span class="upload-icon">"⇪"</span>
                    <span class="upload-text">{text}</span>
                }
            >
                <span class="spinner" role="status" aria-label="loading"></span>
                <span class="spinner-text">"加载中..."</span>
            </Show>
            <input
                type="file"
                class="sr-only"
                accept=accept
                multiple=multiple
                disabled=move || loading.get()
                on:change=on_change
            />
        </label>
        <Alert notice=error />
    }
}
