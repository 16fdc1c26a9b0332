//! ログイン・登録・パスワード再設定

use super::{print_notice, spinner};
use crate::client::{CliSession, HttpClient};
use crate::error::Result;
use bid_writer_common::verification::{
    is_valid_email, CodeInput, ResendCooldown, VerificationKind, RESEND_COOLDOWN_SECS,
};
use bid_writer_common::Error;
use dialoguer::{Input, Password};

fn check_email(email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(Error::Validation(format!("邮箱格式不正确: {}", email)).into())
    }
}

fn prompt_password(prompt: &str, confirm: bool) -> Result<String> {
    let mut password = Password::new().with_prompt(prompt);
    if confirm {
        password = password.with_confirmation("再次输入", "两次输入的密码不一致");
    }
    Ok(password.interact()?)
}

pub async fn login(client: &HttpClient, email: &str, password: Option<String>) -> Result<()> {
    let email = email.trim();
    check_email(email)?;
    let password = match password {
        Some(p) => p,
        None => prompt_password("密码", false)?,
    };

    let bar = spinner("登录中...");
    let result = client.login(email, &password).await;
    bar.finish_and_clear();

    let login = result?;
    client.session().sign_in(&login.access_token, email)?;
    println!("✔ 登录成功: {}", email);
    Ok(())
}

/// バックエンドの結果に関わらずローカルのトークンは消す
pub async fn logout(client: &HttpClient) -> Result<()> {
    let session = client.session();
    if !session.is_authenticated() {
        println!("尚未登录");
        return Ok(());
    }
    if let Err(e) = client.logout().await {
        log::warn!("logout request failed: {}", e);
    }
    session.sign_out()?;
    println!("✔ 已退出登录");
    Ok(())
}

pub fn whoami(session: &CliSession) {
    match session.current() {
        Some(current) => println!("{}", current.email),
        None => println!("尚未登录"),
    }
}

pub async fn register(client: &HttpClient, email: &str, password: Option<String>) -> Result<()> {
    let email = email.trim();
    check_email(email)?;
    let password = match password {
        Some(p) => p,
        None => prompt_password("密码", true)?,
    };

    let session = client.session();
    session.begin_registration(email, &password)?;
    send_first_code(client, VerificationKind::Register, email).await?;
    verify_loop(client, VerificationKind::Register, email, &password).await
}

pub async fn forgot_password(client: &HttpClient, email: &str) -> Result<()> {
    let email = email.trim();
    check_email(email)?;

    client.session().begin_password_reset(email)?;
    send_first_code(client, VerificationKind::ResetPassword, email).await?;
    let password = prompt_password("新密码", true)?;
    verify_loop(client, VerificationKind::ResetPassword, email, &password).await
}

async fn send_first_code(client: &HttpClient, kind: VerificationKind, email: &str) -> Result<()> {
    let bar = spinner("发送验证码...");
    let result = client.send_code(kind, email).await;
    bar.finish_and_clear();

    if let Err(e) = result {
        print_notice(&VerificationKind::code_send_failed());
        return Err(e);
    }
    client.session().save_countdown(RESEND_COOLDOWN_SECS)?;
    print_notice(&VerificationKind::code_sent());
    Ok(())
}

/// 保存時刻からの経過を差し引いた再送クールダウン
fn current_cooldown(session: &CliSession) -> ResendCooldown {
    ResendCooldown::new(session.store().remaining_countdown().unwrap_or(0))
}

async fn resend(client: &HttpClient, kind: VerificationKind, email: &str) -> Result<()> {
    let session = client.session();
    let mut cooldown = current_cooldown(session);
    if !cooldown.can_resend() {
        println!("{}", cooldown.button_label());
        return Ok(());
    }

    match client.send_code(kind, email).await {
        Ok(()) => {
            cooldown.restart();
            print_notice(&VerificationKind::code_sent());
        }
        Err(e) => {
            log::warn!("resend failed: {}", e);
            cooldown.fail();
            print_notice(&VerificationKind::code_send_failed());
        }
    }
    cooldown.persist(session)?;
    Ok(())
}

/// コード入力 → 確認。空入力は再送
async fn verify_loop(client: &HttpClient, kind: VerificationKind, email: &str, password: &str) -> Result<()> {
    let session = client.session();
    loop {
        let entered: String = Input::new()
            .with_prompt("验证码（直接回车重新发送）")
            .allow_empty(true)
            .interact_text()?;

        if entered.trim().is_empty() {
            resend(client, kind, email).await?;
            continue;
        }

        let mut code = CodeInput::new();
        code.paste(&entered);
        if let Err(e) = kind.validate(email, &code) {
            eprintln!("✖ {}", e);
            continue;
        }

        let bar = spinner("验证中...");
        let result = client.verify_code(kind, email, &code.code(), password).await;
        bar.finish_and_clear();

        match result {
            Ok(()) => {
                kind.finish(session)?;
                print_notice(&kind.succeeded());
                return Ok(());
            }
            Err(e) => {
                log::warn!("verification failed: {}", e);
                print_notice(&kind.failed());
            }
        }
    }
}
