//! 魔法印章（左: 文書と盖章パラメータ / 右: 印章選択）

use bid_writer_common::notice::Notice;
use bid_writer_common::stamp_manager::StampSelection;
use bid_writer_common::workflow::{StampType, StampWorkflow, WorkflowEvent, WorkflowPhase};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::components::alert::Alert;
use crate::components::drop_upload::DropUpload;
use crate::components::header::Header;
use crate::components::input::InputFloatingLabel;
use crate::components::split_container::SplitContainer;
use crate::components::submit_button::SubmitButton;
use crate::download::download_output;
use crate::pages::stamp_manage::StampManage;
use crate::storage::use_session;

/// 数値欄（解釈できなければ 0 として扱い、送信不可にする）
fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[component]
pub fn MagicStamp() -> impl IntoView {
    let client = ApiClient::new(use_session());
    let workflow = RwSignal::new(StampWorkflow::new());
    let notice = RwSignal::new(None::<Notice>);
    let (width_text, set_width_text) = signal(String::new());
    let (offset_text, set_offset_text) = signal(String::new());

    let apply = move |event: WorkflowEvent| {
        workflow.update(|wf| {
            wf.apply(event);
        });
    };

    let submitting = Signal::derive(move || workflow.with(|wf| wf.phase().is_submitting()));
    let not_ready = Signal::derive(move || workflow.with(|wf| !wf.phase().can_submit()));

    let on_submit = {
        let client = client.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let submitted = workflow.try_update(|wf| wf.submit());
            let request = match submitted {
                Some(Ok(request)) => request,
                Some(Err(e)) => {
                    notice.set(Some(Notice::error("错误", e.to_string())));
                    return;
                }
                None => return,
            };

            let client = client.clone();
            spawn_local(async move {
                let result = match client.smart_stamp(&request).await {
                    Ok(output_path) => download_output(&client, &output_path)
                        .await
                        .map(|_| output_path),
                    Err(e) => Err(e),
                };
                match result {
                    Ok(output_path) => {
                        apply(WorkflowEvent::Completed { output_path });
                        notice.set(Some(Notice::success("盖章成功", "文件已开始下载")));
                    }
                    Err(message) => {
                        apply(WorkflowEvent::Failed { message });
                        notice.set(Some(Notice::error("盖章失败", "盖章失败，请重试")));
                    }
                }
            });
        }
    };

    let left = {
        let client = client.clone();
        move || {
            let on_submit = on_submit.clone();
            let on_documents = move |paths: Vec<String>| {
                if paths.is_empty() {
                    apply(WorkflowEvent::DocumentsCleared);
                } else {
                    apply(WorkflowEvent::DocumentsStaged(paths));
                }
            };
            let type_options = StampType::ALL
                .iter()
                .map(|stamp_type| {
                    let stamp_type = *stamp_type;
                    view! {
                        <label class="radio-option">
                            <input
                                type="radio"
                                name="stamp-type"
                                value=stamp_type.as_wire()
                                prop:checked=move || workflow.with(|wf| wf.stamp_type() == Some(stamp_type))
                                on:change=move |_| apply(WorkflowEvent::TypeChanged(Some(stamp_type)))
                            />
                            <span>{stamp_type.label()}</span>
                        </label>
                    }
                })
                .collect_view();

            view! {
                <form class="stamp-form" on:submit=on_submit>
                    <h3>"上传文件"</h3>
                    <DropUpload
                        text="点击或拖拽文件到这里上传"
                        client=client.clone()
                        on_change=on_documents
                    />

                    <h3>"盖章参数"</h3>
                    <div class="stamp-params">
                        <InputFloatingLabel
                            label="印章宽度"
                            input_type="number"
                            value=width_text
                            on_input=move |raw: String| {
                                apply(WorkflowEvent::WidthChanged(parse_number(&raw)));
                                set_width_text.set(raw);
                            }
                        />
                        <InputFloatingLabel
                            label="偏移量"
                            input_type="number"
                            value=offset_text
                            on_input=move |raw: String| {
                                apply(WorkflowEvent::OffsetChanged(parse_number(&raw)));
                                set_offset_text.set(raw);
                            }
                        />
                    </div>

                    <h3>"盖章类型"</h3>
                    <div class="radio-group">{type_options}</div>

                    <p class="stamp-hint">
                        {move || workflow.with(|wf| match wf.phase() {
                            WorkflowPhase::Failed { .. } => "上次盖章失败，可以重新提交".to_string(),
                            _ => wf.missing().map(|m| m.message().to_string()).unwrap_or_default(),
                        })}
                    </p>

                    <SubmitButton text="生成" loading=submitting disabled=not_ready />
                </form>
            }
        }
    };

    let right = move || {
        let on_select = move |selection: StampSelection| {
            apply(WorkflowEvent::StampSelected(selection.path().map(str::to_string)));
        };
        view! { <StampManage client=client.clone() on_select=on_select /> }
    };

    view! {
        <Alert notice=notice />
        <Header />
        <div class="magic-stamp">
            <SplitContainer left=left right=right />
        </div>
    }
}
