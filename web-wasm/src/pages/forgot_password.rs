//! パスワード再設定（認証コード送信まで）

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

#[component]
pub fn ForgotPassword() -> impl IntoView {
    let session = use_session();
    let (email, set_email) = signal(session.reset_email().unwrap_or_default());
    let (loading, set_loading) = signal(false);
    let notice = RwSignal::new(None::<Notice>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        if let Err(e) = session.begin_password_reset(&email) {
            log::error!("failed to store reset email: {}", e);
        }
        set_loading.set(true);

        let session = session.clone();
        spawn_local(async move {
            let client = ApiClient::new(session.clone());
            match client.send_code(VerificationKind::ResetPassword, &email).await {
                Ok(()) => {
                    if let Err(e) = session.save_countdown(RESEND_COOLDOWN_SECS) {
                        log::error!("failed to store countdown: {}", e);
                    }
                    notice.set(Some(VerificationKind::code_sent()));
                    set_timeout(
                        || navigate(Route::ForgotPasswordVerify),
                        Duration::from_millis(REDIRECT_DELAY_MS as u64),
                    );
                }
                Err(e) => {
                    log::warn!("reset code failed: {}", e);
                    notice.set(Some(VerificationKind::code_send_failed()));
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
                <h2>"重新设置你的密码"</h2>
                <p class="auth-subtitle">"我们将向您的邮箱发送验证码"</p>
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

                    <SubmitButton text="发送验证码" loading=loading />
                </form>

                <p class="auth-footer">
                    <a href=Route::Login.path()>"返回登录"</a>
                </p>
            </div>
        </div>
    }
}
