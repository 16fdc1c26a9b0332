//! ルートコンポーネント（パスでページを切り替える）

use bid_writer_common::site::Route;
use bid_writer_common::verification::VerificationKind;
use leptos::prelude::*;

use crate::components::prefetch::PrefetchLinks;
use crate::pages::{
    forgot_password::ForgotPassword, landing::Landing, login::Login, magic_stamp::MagicStamp,
    not_found::NotFound, pricing::Pricing, sign_up::SignUp, tools::Tools, verify::Verify,
};
use crate::storage::provide_session;

/// ページ遷移（フルロード）
pub fn navigate(route: Route) {
    if let Err(e) = gloo::utils::window().location().set_href(route.path()) {
        log::error!("navigation to {} failed: {:?}", route.path(), e);
    }
}

/// 現在のページ
pub fn current_route() -> Route {
    let path = gloo::utils::window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string());
    Route::from_path(&path)
}

#[component]
pub fn App() -> impl IntoView {
    provide_session();
    let route = current_route();
    log::debug!("route: {:?}", route);

    let page = match route {
        Route::Home => view! { <Landing /> }.into_any(),
        Route::Login => view! { <Login /> }.into_any(),
        Route::SignUp => view! { <SignUp /> }.into_any(),
        Route::SignUpVerify => view! { <Verify kind=VerificationKind::Register /> }.into_any(),
        Route::ForgotPassword => view! { <ForgotPassword /> }.into_any(),
        Route::ForgotPasswordVerify => {
            view! { <Verify kind=VerificationKind::ResetPassword /> }.into_any()
        }
        Route::MagicStamp => view! { <MagicStamp /> }.into_any(),
        Route::Tools => view! { <Tools /> }.into_any(),
        Route::Pricing => view! { <Pricing /> }.into_any(),
        Route::NotFound => view! { <NotFound /> }.into_any(),
    };

    view! {
        <PrefetchLinks current=route />
        {page}
    }
}
