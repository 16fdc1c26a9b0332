//! 認証コード入力（新規登録 / パスワード再設定）
//!
//! 再送ボタンのカウントダウンは毎秒 localStorage の `countdown` に書き戻すので、
//! 再読込しても残り秒数から再開する。

use std::time::Duration;

use bid_writer_common::notice::Notice;
use bid_writer_common::site::{Route, REDIRECT_DELAY_MS};
use bid_writer_common::verification::{CodeInput, ResendCooldown, VerificationKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::app::navigate;
use crate::components::alert::Alert;
use crate::components::code_input::CodeInputBoxes;
use crate::components::submit_button::SubmitButton;
use crate::storage::{use_session, BrowserSession};

fn heading(kind: VerificationKind) -> &'static str {
    match kind {
        VerificationKind::Register => "验证您的邮箱",
        VerificationKind::ResetPassword => "找回密码",
    }
}

fn submit_text(kind: VerificationKind) -> &'static str {
    match kind {
        VerificationKind::Register => "确认并注册",
        VerificationKind::ResetPassword => "确认",
    }
}

fn persist(cooldown: &ResendCooldown, session: &BrowserSession) {
    if let Err(e) = cooldown.persist(session) {
        log::warn!("failed to persist countdown: {}", e);
    }
}

#[component]
pub fn Verify(kind: VerificationKind) -> impl IntoView {
    let session = use_session();
    let email = kind.stored_email(&session).unwrap_or_default();
    let code = RwSignal::new(CodeInput::new());
    let cooldown = RwSignal::new(ResendCooldown::restore(&session));
    let (new_password, set_new_password) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (resending, set_resending) = signal(false);
    let notice = RwSignal::new(None::<Notice>);
    let ticker = StoredValue::new(None::<IntervalHandle>);

    let stop_ticker = move || {
        if let Some(handle) = ticker.get_value() {
            handle.clear();
        }
        ticker.set_value(None);
    };

    let start_ticker = {
        let session = session.clone();
        move || {
            stop_ticker();
            let session = session.clone();
            let tick = move || {
                let mut running = true;
                cooldown.update(|c| {
                    running = c.tick();
                    persist(c, &session);
                });
                if !running {
                    stop_ticker();
                }
            };
            match set_interval_with_handle(tick, Duration::from_secs(1)) {
                Ok(handle) => ticker.set_value(Some(handle)),
                Err(e) => log::error!("failed to start countdown: {:?}", e),
            }
        }
    };

    if !cooldown.get_untracked().can_resend() {
        start_ticker();
    }
    on_cleanup(stop_ticker);

    let on_resend = {
        let session = session.clone();
        let email = email.clone();
        move |_| {
            if resending.get_untracked() || !cooldown.get_untracked().can_resend() {
                return;
            }
            set_resending.set(true);
            let session = session.clone();
            let email = email.clone();
            let start_ticker = start_ticker.clone();
            spawn_local(async move {
                let client = ApiClient::new(session.clone());
                match client.send_code(kind, &email).await {
                    Ok(()) => {
                        cooldown.update(|c| {
                            c.restart();
                            persist(c, &session);
                        });
                        start_ticker();
                        notice.set(Some(VerificationKind::code_sent()));
                    }
                    Err(e) => {
                        log::warn!("resend failed: {}", e);
                        cooldown.update(|c| {
                            c.fail();
                            persist(c, &session);
                        });
                        notice.set(Some(VerificationKind::code_send_failed()));
                    }
                }
                set_resending.set(false);
            });
        }
    };

    let on_submit = {
        let email = email.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if loading.get_untracked() {
                return;
            }
            let entered = code.get_untracked();
            if let Err(e) = kind.validate(&email, &entered) {
                notice.set(Some(Notice::error("错误", e.to_string())));
                return;
            }
            let password = match kind {
                VerificationKind::Register => session
                    .pending_registration()
                    .map(|p| p.password)
                    .unwrap_or_default(),
                VerificationKind::ResetPassword => new_password.get_untracked(),
            };
            set_loading.set(true);

            let session = session.clone();
            let email = email.clone();
            spawn_local(async move {
                let client = ApiClient::new(session.clone());
                match client.verify_code(kind, &email, &entered.code(), &password).await {
                    Ok(()) => {
                        if let Err(e) = kind.finish(&session) {
                            log::warn!("failed to clear verification state: {}", e);
                        }
                        notice.set(Some(kind.succeeded()));
                        set_timeout(
                            || navigate(Route::Home),
                            Duration::from_millis(REDIRECT_DELAY_MS as u64),
                        );
                    }
                    Err(e) => {
                        log::warn!("verification failed: {}", e);
                        notice.set(Some(kind.failed()));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    let shown_email = email.clone();
    let is_reset = kind == VerificationKind::ResetPassword;

    view! {
        <Alert notice=notice />
        <div class="auth-page">
            <div class="auth-header">
                <img class="auth-logo" src="/img/logo/logo-only-white.png" alt="Bid Writer" />
                <h2>{heading(kind)}</h2>
                <p class="auth-subtitle">
                    "验证码已发送至 " <span class="auth-email">{shown_email}</span>
                </p>
            </div>

            <div class="auth-card">
                <form class="auth-form" on:submit=on_submit>
                    <div class="code-row">
                        <CodeInputBoxes code=code />
                    </div>

                    <Show when=move || is_reset>
                        <div class="field">
                            <label for="new-password">"新密码"</label>
                            <input
                                id="new-password"
                                name="new-password"
                                type="password"
                                required
                                autocomplete="new-password"
                                placeholder="请输入你的新密码"
                                prop:value=new_password
                                on:input=move |ev| set_new_password.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>

                    <SubmitButton text=submit_text(kind) loading=loading />
                </form>

                <button
                    type="button"
                    class="resend-button"
                    disabled=move || resending.get() || !cooldown.with(|c| c.can_resend())
                    on:click=on_resend
                >
                    {move || cooldown.with(|c| c.button_label())}
                </button>
            </div>
        </div>
    }
}
