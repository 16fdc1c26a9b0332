//! 印章管理パネル（魔法印章ページの右側）
//!
//! 状態遷移は `StampManager` に任せ、ここでは返ってきた `StampOutcome`
//! （削除API・再取得・親への選択通知）を実行するだけ。

use bid_writer_common::api::StampImage;
use bid_writer_common::notice::Notice;
use bid_writer_common::stamp_manager::{StampCommand, StampManager, StampOutcome, StampSelection};
use bid_writer_common::upload::UploadPolicy;
use bid_writer_common::workflow::resolve_output_url;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::api::ApiClient;
use crate::components::alert::Alert;
use crate::components::modal::ConfirmModal;
use crate::components::upload_button::UploadButton;
use crate::storage::use_session;

#[derive(Clone)]
struct StampActions<F> {
    manager: RwSignal<StampManager>,
    notice: RwSignal<Option<Notice>>,
    client: ApiClient,
    on_select: F,
}

impl<F> StampActions<F>
where
    F: Fn(StampSelection) + Clone + 'static,
{
    fn dispatch(&self, command: StampCommand) {
        let (outcomes, notice) = self
            .manager
            .try_update(|m| (m.apply(command), m.take_notice()))
            .unwrap_or_default();
        if notice.is_some() {
            self.notice.set(notice);
        }

        for outcome in outcomes {
            match outcome {
                StampOutcome::SelectionChanged(selection) => {
                    let (id, path) = selection.as_callback_args();
                    log::debug!("stamp selection: {} {}", id, path);
                    (self.on_select)(selection);
                }
                StampOutcome::Delete(ids) => self.delete(ids),
                StampOutcome::Refetch => self.refetch(),
            }
        }
    }

    fn refetch(&self) {
        let actions = self.clone();
        spawn_local(async move {
            let command = match actions.client.list_stamps().await {
                Ok(images) => {
                    log::info!("loaded {} stamps", images.len());
                    StampCommand::Loaded(images)
                }
                Err(e) => {
                    log::error!("stamp list failed: {}", e);
                    StampCommand::LoadFailed
                }
            };
            actions.dispatch(command);
        });
    }

    fn delete(&self, ids: Vec<i64>) {
        let actions = self.clone();
        spawn_local(async move {
            let ok = match actions.client.delete_stamps(&ids).await {
                Ok(()) => true,
                Err(e) => {
                    log::error!("stamp delete failed: {}", e);
                    false
                }
            };
            actions.dispatch(StampCommand::DeleteFinished { ok });
        });
    }

    fn upload(&self, images: Vec<File>) {
        if self.manager.with_untracked(StampManager::is_uploading) {
            return;
        }
        self.dispatch(StampCommand::UploadStarted);
        let actions = self.clone();
        spawn_local(async move {
            let ok = match actions.client.upload_stamps(images).await {
                Ok(()) => true,
                Err(e) => {
                    log::error!("stamp upload failed: {}", e);
                    false
                }
            };
            actions.dispatch(StampCommand::UploadFinished { ok });
        });
    }
}

fn tile_class(manager: &StampManager, image: &StampImage) -> &'static str {
    if manager.is_batch_mode() {
        if manager.is_marked_for_delete(image.id) {
            "stamp-tile marked"
        } else {
            "stamp-tile"
        }
    } else if manager.selected_id() == Some(image.id) {
        "stamp-tile selected"
    } else {
        "stamp-tile"
    }
}

#[component]
pub fn StampManage<F>(client: ApiClient, on_select: F) -> impl IntoView
where
    F: Fn(StampSelection) + 'static + Clone + Send + Sync,
{
    let session = use_session();
    let signed_in = session.is_authenticated();
    let actions = StampActions {
        manager: RwSignal::new(StampManager::new()),
        notice: RwSignal::new(None::<Notice>),
        client,
        on_select,
    };
    let manager = actions.manager;
    let base_url = actions.client.base_url().to_string();

    if signed_in {
        actions.refetch();
    } else {
        log::info!("not signed in; stamp list skipped");
    }

    let uploading = Signal::derive(move || manager.with(StampManager::is_uploading));
    let deleting = Signal::derive(move || manager.with(StampManager::is_deleting));
    let modal_open = Signal::derive(move || manager.with(StampManager::is_modal_open));
    let batch_mode = move || manager.with(StampManager::is_batch_mode);

    let grid = {
        let actions = actions.clone();
        move || {
            let tiles = manager.with(|m| {
                m.images()
                    .iter()
                    .enumerate()
                    .map(|(index, image)| {
                        (index, tile_class(m, image), resolve_output_url(&base_url, &image.path))
                    })
                    .collect::<Vec<_>>()
            });
            if tiles.is_empty() {
                return view! {
                    <p class="stamp-empty">"你的印章将上传到这里，快去上传吧 ！"</p>
                }
                .into_any();
            }
            tiles
                .into_iter()
                .map(|(index, class, src)| {
                    let actions = actions.clone();
                    view! {
                        <button
                            type="button"
                            class=class
                            on:click=move |_| actions.dispatch(StampCommand::Click(index))
                        >
                            <img src=src alt="印章" />
                        </button>
                    }
                })
                .collect_view()
                .into_any()
        }
    };

    let on_files = {
        let actions = actions.clone();
        move |files: Vec<File>| actions.upload(files)
    };
    let on_batch = {
        let actions = actions.clone();
        move |_| actions.dispatch(StampCommand::EnterBatch)
    };
    let on_cancel = {
        let actions = actions.clone();
        move |_| actions.dispatch(StampCommand::CancelBatch)
    };
    let on_request_delete = {
        let actions = actions.clone();
        move |_| actions.dispatch(StampCommand::RequestDelete)
    };
    let on_close = {
        let actions = actions.clone();
        move || actions.dispatch(StampCommand::CloseModal)
    };
    let on_confirm = {
        let actions = actions.clone();
        move || actions.dispatch(StampCommand::ConfirmDelete)
    };

    if !signed_in {
        return view! {
            <div class="stamp-panel">
                <p class="stamp-login-hint">"印章管理,请先登录"</p>
            </div>
        }
        .into_any();
    }

    view! {
        <Alert notice=actions.notice />
        <div class="stamp-panel">
            <div class="stamp-toolbar">
                <h3>"印章管理"</h3>
                <div class="stamp-actions">
                    <UploadButton
                        text="上传印章"
                        policy=UploadPolicy::stamp_images()
                        loading=uploading
                        multiple=true
                        on_files=on_files
                    />
                    <Show
                        when=batch_mode
                        fallback=move || view! {
                            <button type="button" class="stamp-batch" on:click=on_batch.clone()>"选择"</button>
                        }
                    >
                        <button type="button" class="stamp-cancel" on:click=on_cancel.clone()>"取消"</button>
                        <button type="button" class="stamp-delete" on:click=on_request_delete.clone()>"删除"</button>
                    </Show>
                </div>
            </div>

            <div class="stamp-grid">{grid}</div>
        </div>

        <ConfirmModal
            is_open=modal_open
            title="确认删除 !"
            message="你是否确认要删除已选择的印章"
            button_text="删除"
            loading=deleting
            on_close=on_close
            on_confirm=on_confirm
        />
    }
    .into_any()
}
