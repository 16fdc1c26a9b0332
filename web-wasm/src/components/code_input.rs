//! 6桁の認証コード入力

use bid_writer_common::verification::{CodeInput, CODE_LENGTH};
use leptos::html;
use leptos::prelude::*;
use web_sys::KeyboardEvent;

#[component]
pub fn CodeInputBoxes(code: RwSignal<CodeInput>) -> impl IntoView {
    let refs: Vec<NodeRef<html::Input>> = (0..CODE_LENGTH).map(|_| NodeRef::new()).collect();
    let refs = StoredValue::new(refs);

    let focus = move |index: Option<usize>| {
        if let Some(el) = index.and_then(|i| refs.with_value(|r| r.get(i).and_then(|n| n.get_untracked()))) {
            if let Err(e) = el.focus() {
                log::warn!("failed to focus code box: {:?}", e);
            }
        }
    };

    (0..CODE_LENGTH)
        .map(|index| {
            let node = refs.with_value(|r| r[index]);
            view! {
                <input
                    node_ref=node
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    class="code-box"
                    prop:value=move || code.with(|c| c.slots()[index].clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        let mut next = None;
                        code.update(|c| {
                            // 6文字まとめて来たら貼り付けとみなす
                            next = if value.chars().count() >= CODE_LENGTH {
                                c.paste(&value)
                            } else {
                                c.set(index, &value)
                            };
                        });
                        focus(next);
                    }
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Backspace" {
                            focus(code.with_untracked(|c| c.backspace(index)));
                        }
                    }
                />
            }
        })
        .collect_view()
}
