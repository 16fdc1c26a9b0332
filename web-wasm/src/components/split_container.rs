//! 左右分割コンテナ
//!
//! 分割線をドラッグ（マウス・タッチ・ペン）または矢印キーで動かす。
//! 狭くなった側はぼかしを掛けて中身を隠す。

use bid_writer_common::split::{SplitEvent, SplitState, KEYBOARD_STEP};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::{KeyboardEvent, PointerEvent};

fn viewport_width() -> f64 {
    gloo::utils::window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::INFINITY)
}

/// ドラッグ中は body のカーソルと文字選択を切り替える
fn set_body_dragging(dragging: bool) {
    let style = gloo::utils::body().style();
    let (cursor, select) = if dragging {
        ("col-resize", "none")
    } else {
        ("default", "auto")
    };
    for (name, value) in [("cursor", cursor), ("user-select", select)] {
        if let Err(e) = style.set_property(name, value) {
            log::warn!("failed to set body {}: {:?}", name, e);
        }
    }
}

#[component]
pub fn SplitContainer(#[prop(into)] left: ViewFn, #[prop(into)] right: ViewFn) -> impl IntoView {
    let state = RwSignal::new(SplitState::new(viewport_width()));
    let container = NodeRef::<html::Div>::new();

    let apply = move |event: SplitEvent| {
        let mut changed = false;
        state.update(|s| changed = s.apply(event));
        if changed {
            set_body_dragging(state.with_untracked(SplitState::is_dragging));
        }
    };

    let move_handle = window_event_listener(ev::pointermove, move |e: PointerEvent| {
        if !state.with_untracked(SplitState::is_dragging) {
            return;
        }
        if let Some(el) = container.get_untracked() {
            let rect = el.get_bounding_client_rect();
            apply(SplitEvent::PointerMove {
                client_x: e.client_x() as f64,
                container_left: rect.left(),
                container_width: rect.width(),
            });
        }
    });
    let up_handle = window_event_listener(ev::pointerup, move |_: PointerEvent| {
        apply(SplitEvent::PointerUp);
    });
    let cancel_handle = window_event_listener(ev::pointercancel, move |_: PointerEvent| {
        apply(SplitEvent::PointerCancel);
    });
    let resize_handle = window_event_listener(ev::resize, move |_| {
        apply(SplitEvent::Resize { viewport_width: viewport_width() });
    });

    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
        cancel_handle.remove();
        resize_handle.remove();
        set_body_dragging(false);
    });

    let on_keydown = move |e: KeyboardEvent| {
        let delta = match e.key().as_str() {
            "ArrowLeft" => -KEYBOARD_STEP,
            "ArrowRight" => KEYBOARD_STEP,
            _ => return,
        };
        e.prevent_default();
        apply(SplitEvent::Nudge { delta });
    };

    view! {
        <div class="split-container" node_ref=container>
            <div class="split-pane" style=move || format!("width: {}%", state.with(SplitState::left_width))>
                <Show when=move || state.with(SplitState::left_blurred)>
                    <div class="split-blur"><div class="split-blur-text">"内容已隐藏"</div></div>
                </Show>
                <div class=move || if state.with(SplitState::left_blurred) { "split-content invisible" } else { "split-content" }>
                    {left.run()}
                </div>
            </div>

            <div
                class="split-divider"
                role="separator"
                aria-orientation="vertical"
                tabindex="0"
                aria-valuemin="20"
                aria-valuemax="80"
                aria-valuenow=move || format!("{:.0}", state.with(SplitState::position))
                on:pointerdown=move |e: PointerEvent| {
                    e.prevent_default();
                    apply(SplitEvent::PointerDown);
                }
                on:keydown=on_keydown
            >
                <div class="split-divider-line"></div>
                <div class="split-divider-handle"></div>
            </div>

            <div class="split-pane" style=move || format!("width: {}%", state.with(SplitState::right_width))>
                <Show when=move || state.with(SplitState::right_blurred)>
                    <div class="split-blur"><div class="split-blur-text">"内容已隐藏"</div></div>
                </Show>
                <div class=move || if state.with(SplitState::right_blurred) { "split-content invisible" } else { "split-content" }>
                    {right.run()}
                </div>
            </div>
        </div>
    }
}
