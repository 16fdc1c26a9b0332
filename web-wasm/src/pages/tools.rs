//! 魔法工具箱（ツール一覧）

use bid_writer_common::notice::Notice;
use bid_writer_common::site::{Tool, TOOLS};
use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::components::alert::Alert;
use crate::components::header::Header;

#[component]
pub fn Tools() -> impl IntoView {
    let notice = RwSignal::new(None::<Notice>);

    let card = move |tool: Tool| {
        let href = tool.route.map(|r| r.path()).unwrap_or("#");
        let on_click = move |ev: MouseEvent| {
            if tool.route.is_none() {
                ev.prevent_default();
                notice.set(Some(Notice::coming_soon()));
            }
        };
        view! {
            <a href=href class="tool-card" on:click=on_click>
                <img src=tool.image alt=tool.title class="tool-image" />
                <div class="tool-body">
                    <h3 class="tool-title">{tool.title}</h3>
                    <p class="tool-description">{tool.description}</p>
                </div>
            </a>
        }
    };

    view! {
        <Alert notice=notice />
        <Header />
        <div class="tools-page">
            <div class="page-heading">
                <h2>"魔法工具箱"</h2>
                <p>"一站式标书工具，让繁琐的标书制作变得简单高效"</p>
            </div>
            <div class="tool-grid">
                {TOOLS.iter().map(|tool| card(*tool)).collect_view()}
            </div>
        </div>
    }
}
