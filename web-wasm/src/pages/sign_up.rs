//! 新規登録（認証コード送信まで）

use std::time::Duration;

use bid_writer_common::notice::Notice;
use bid_writer_common::site::{Route, REDIRECT_DELAY_MS};
use bid_writer_common::verification::{VerificationKind, RESEND_COOLDOWN_SECS};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::app::navigate;
use crate::components::alert::Alert;
use crate::components::submit_button::SubmitButton;
use crate::storage::use_session;

const SEND_FAILED: &str = "发送验证码失败，请检查您的邮箱";

#[component]
pub fn SignUp() -> impl IntoView {
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
            match client.send_code(VerificationKind::Register, &email).await {
                Ok(()) => {
                    let stored = session
                        .begin_registration(&email, &password)
                        .and_then(|_| session.save_countdown(RESEND_COOLDOWN_SECS));
                    if let Err(e) = stored {
                        log::error!("failed to store registration: {}", e);
                    }
                    notice.set(Some(VerificationKind::code_sent()));
                    set_timeout(
                        || navigate(Route::SignUpVerify),
                        Duration::from_millis(REDIRECT_DELAY_MS as u64),
                    );
                }
                Err(e) => {
                    log::warn!("register code failed: {}", e);
                    set_error_message.set(SEND_FAILED.to_string());
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
                <h2>"创建您的账户"</h2>
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
                        <label for="password">"密码"</label>
                        <input
                            id="password"
                            name="password"
                            type="password"
                            required
                            autocomplete="new-password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>

                    <Show when=move || !error_message.get().is_empty()>
                        <p class="form-error">{move || error_message.get()}</p>
                    </Show>

                    <SubmitButton text="发送验证码" loading=loading />
                </form>

                <p class="auth-footer">
                    "已有账户？ "
                    <a href=Route::Login.path()>"登录"</a>
                </p>
            </div>
        </div>
    }
}
