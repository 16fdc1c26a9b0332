//! ヘッダー（ナビ・ログイン状態・モバイルメニュー）

use bid_writer_common::notice::Notice;
use bid_writer_common::site::{NavItem, Route, NAVIGATION};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::MouseEvent;

use crate::api::ApiClient;
use crate::app::navigate;
use crate::components::alert::Alert;
use crate::storage::use_session;

fn nav_href(item: &NavItem) -> &'static str {
    item.route.map(|r| r.path()).unwrap_or("#")
}

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let email = RwSignal::new(session.current().map(|s| s.email));
    let notice = RwSignal::new(None::<Notice>);
    let (menu_open, set_menu_open) = signal(false);

    let on_nav_click = move |item: NavItem| {
        move |ev: MouseEvent| {
            if item.is_coming_soon() {
                ev.prevent_default();
                notice.set(Some(Notice::coming_soon()));
            }
        }
    };

    let on_logout = {
        let session = session.clone();
        move |_| {
            let session = session.clone();
            spawn_local(async move {
                // バックエンドの結果に関わらずローカルのセッションは消す
                if let Err(e) = ApiClient::new(session.clone()).logout().await {
                    log::warn!("logout request failed: {}", e);
                }
                if let Err(e) = session.sign_out() {
                    log::error!("failed to clear session: {}", e);
                }
                email.set(None);
                navigate(Route::Home);
            });
        }
    };

    let nav_links = move |class: &'static str| {
        NAVIGATION
            .iter()
            .map(|item| {
                let item = *item;
                view! {
                    <a href=nav_href(&item) class=class on:click=on_nav_click(item)>
                        {item.name}
                    </a>
                }
            })
            .collect_view()
    };

    let account = move |mobile: bool| {
        let on_logout = on_logout.clone();
        move || match email.get() {
            Some(address) => view! {
                <span class="account-email">{address}</span>
                <button class="account-logout" on:click=on_logout.clone()>"退出登录"</button>
            }
            .into_any(),
            None => view! {
                <a href=Route::Login.path() class=if mobile { "mobile-link" } else { "account-login" }>"登录"</a>
                <a href=Route::SignUp.path() class="account-signup">"免费注册"</a>
            }
            .into_any(),
        }
    };

    let account_mobile = account.clone();

    view! {
        <Alert notice=notice />
        <header class="site-header">
            <nav aria-label="Global" class="site-nav">
                <div class="nav-logo">
                    <a href=Route::Home.path()>
                        <span class="sr-only">"Bid Writer"</span>
                        <img alt="" src="/img/logo/logo-all-white.png" />
                    </a>
                </div>

                <div class="nav-menu-toggle">
                    <button type="button" on:click=move |_| set_menu_open.set(true)>
                        <span class="sr-only">"Open main menu"</span>
                        "☰"
                    </button>
                </div>

                <div class="nav-links">{nav_links("nav-link")}</div>

                <div class="nav-account">{account(false)}</div>
            </nav>

            <Show when=move || menu_open.get()>
                <div class="mobile-menu">
                    <div class="mobile-menu-header">
                        <a href=Route::Home.path()>
                            <span class="sr-only">"Bid Writer"</span>
                            <img alt="" src="/img/logo/logo-only-white.png" />
                        </a>
                        <button type="button" on:click=move |_| set_menu_open.set(false)>
                            <span class="sr-only">"Close menu"</span>
                            "×"
                        </button>
                    </div>
                    <div class="mobile-menu-links">{nav_links("mobile-link")}</div>
                    <div class="mobile-menu-account">{account_mobile(true)}</div>
                </div>
            </Show>
        </header>
    }
}
