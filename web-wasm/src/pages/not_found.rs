use bid_writer_common::site::Route;
use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <main class="not-found">
            <p class="not-found-code">"404"</p>
            <h1>"页面不存在"</h1>
            <p>"抱歉，我们找不到您要访问的页面。"</p>
            <a href=Route::Home.path() class="hero-cta">"返回首页"</a>
        </main>
    }
}
