//! 文書のドラッグ&ドロップアップロード
//!
//! 受け付けたら即 `/upload/multiple-files` に送り、サーバー側パスを親に渡す。
//! 1ファイルのみ。削除すると空の配列を渡す。

use bid_writer_common::upload::{DocumentSlot, Screened, UploadPolicy};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, File, HtmlInputElement};

use crate::api::ApiClient;
use crate::components::upload_button::{collect_files, describe};

#[component]
pub fn DropUpload<F>(text: &'static str, client: ApiClient, on_change: F) -> impl IntoView
where
    F: Fn(Vec<String>) + 'static + Clone + Send + Sync,
{
    let policy = StoredValue::new(UploadPolicy::documents());
    let slot = RwSignal::new(DocumentSlot::Empty);
    let (is_dragover, set_is_dragover) = signal(false);

    let handle_files = {
        let on_change = on_change.clone();
        move |files: Vec<File>| {
            if files.is_empty() || !slot.with_untracked(DocumentSlot::accepts_files) {
                return;
            }
            let file = match policy.with_value(|p| p.screen(files, describe)) {
                Screened::Accepted(mut files) => files.remove(0),
                Screened::Rejected(err) => {
                    slot.update(|s| {
                        s.reject(err.to_string());
                    });
                    return;
                }
            };

            let name = file.name();
            slot.update(|s| {
                s.start(name);
            });
            let client = client.clone();
            let on_change = on_change.clone();
            spawn_local(async move {
                let paths = match client.upload_files(vec![file]).await {
                    Ok(paths) => {
                        log::info!("document uploaded: {:?}", paths);
                        Some(paths)
                    }
                    Err(e) => {
                        log::error!("document upload failed: {}", e);
                        None
                    }
                };
                if let Some(Some(paths)) = slot.try_update(|s| s.finish(paths)) {
                    on_change(paths);
                }
            });
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);
            let files = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                .unwrap_or_default();
            handle_files(files);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let files = collect_files(&input);
        input.set_value("");
        handle_files(files);
    };

    let on_remove = move |_| {
        log::info!("document removed");
        if let Some(paths) = slot.try_update(DocumentSlot::remove) {
            on_change(paths);
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "drop-upload dragover" } else { "drop-upload" }
            on:drop=on_drop
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_is_dragover.set(true);
            }
            on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
        >
            {move || match slot.get() {
                DocumentSlot::Empty => view! {
                    <label class="drop-idle">
                        <span>{text}</span>
                        <input
                            type="file"
                            class="sr-only"
                            accept=policy.with_value(UploadPolicy::accept_attr)
                            on:change=on_input_change.clone()
                        />
                    </label>
                }.into_any(),
                DocumentSlot::Uploading(name) => view! {
                    <div class="drop-file processing">
                        <span class="file-name">{name}</span>
                        <span class="file-status">"上传中..."</span>
                    </div>
                }.into_any(),
                DocumentSlot::Uploaded(name) => view! {
                    <div class="drop-file done">
                        <span class="file-name">{name}</span>
                        <span class="file-status">"上传完毕"</span>
                        <button class="file-remove" on:click=on_remove.clone()>"×"</button>
                    </div>
                }.into_any(),
                DocumentSlot::Failed { name, message } => view! {
                    <div class="drop-file failed">
                        <span class="file-name">{name}</span>
                        <span class="file-status">{message}</span>
                        <button class="file-remove" on:click=on_remove.clone()>"×"</button>
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
