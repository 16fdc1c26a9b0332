//! ログインページ

use std::time::Duration;

use bid_writer_common::notice::Notice;
use bid_writer_common::site::{Route, REDIRECT_DELAY_MS};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::app::navigate;
use crate::components::alert::Alert;
use crate::components::submit_button::SubmitButton;
use crate::storage::use_session;

const LOGIN_FAILED: &str = "登录失败，请检查您的邮箱和密码";

#[component]
pub fn Login() -> impl IntoView {
    let session = use_session();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (error_message, set_error_message) = signal(String::new());
    let notice = RwSignal::new(None::<Notice>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_loading.set(true);
        set_error_message.set(String::new());

        let session = session.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            let client = ApiClient::new(session.clone());
            match client.login(&email, &password).await {
                Ok(login) => match session.sign_in(&login.access_token, &email) {
                    Ok(_) => {
                        notice.set(Some(Notice::success("登录成功", "你已成功登录，即将返回主页...")));
                        set_timeout(
                            || navigate(Route::Home),
                            Duration::from_millis(REDIRECT_DELAY_MS as u64),
                        );
                    }
                    Err(e) => {
                        log::error!("failed to store session: {}", e);
                        set_error_message.set(LOGIN_FAILED.to_string());
                    }
                },
                Err(e) => {
                    log::warn!("login failed: {}", e);
                    set_error_message.set(LOGIN_FAILED.to_string());
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <Alert notice=notice />
        <div class="auth-page">
            <div class="auth-header">
                <img class="auth-logo" src="/img/logo/logo-only-white.png" alt="Bid Writer" />
                <h2>"登录您的账户"</h2>
            </div>

            <div class="auth-card">
                <form class="auth-form" on:submit=on_submit>
                    <div class="field">
                        <label for="email">"邮箱地址"</label>
                        <input
                            id="email"
                            name="email"
                            type="email"
                            required
                            autocomplete="email"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>

                    <div class="field">
                        <div class="field-label-row">
                            <label for="password">"密码"</label>
                            <a href=Route::ForgotPassword.path() class="field-link">"忘记密码？"</a>
                        </div>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            required
                            autocomplete="current-password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>

                    <Show when=move || !error_message.get().is_empty()>
                        <p class="form-error">{move || error_message.get()}</p>
                    </Show>

                    <SubmitButton text="登录" loading=loading />
                </form>

                <p class="auth-footer">
                    "还没有账户？ "
                    <a href=Route::SignUp.path()>"免费注册"</a>
                </p>
            </div>
        </div>
    }
}
