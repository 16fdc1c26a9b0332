//! トップページ

use std::time::Duration;

use bid_writer_common::site::{Route, FADE_IN_DELAY_MS, HERO_TITLE};
use leptos::prelude::*;

use crate::components::background::Background;
use crate::components::header::Header;

#[component]
pub fn Landing() -> impl IntoView {
    let (visible, set_visible) = signal(false);

    // マウント直後はまだ透明。少し待ってからフェードイン
    if let Ok(handle) = set_timeout_with_handle(
        move || set_visible.set(true),
        Duration::from_millis(FADE_IN_DELAY_MS as u64),
    ) {
        on_cleanup(move || handle.clear());
    }

    view! {
        <div class="landing">
            <Background />
            <Header />
            <main
                class="hero"
                class:hero-visible=move || visible.get()
            >
                <h1 class="hero-title">{HERO_TITLE}</h1>
                <p class="hero-subtitle">"AI 驱动的标书工具，一键盖章，智能排版，让标书制作更轻松。"</p>
                <div class="hero-actions">
                    <a href=Route::Tools.path() class="hero-cta">"开始使用"</a>
                    <a href=Route::Pricing.path() class="hero-secondary">"查看价格 →"</a>
                </div>
            </main>
        </div>
    }
}
