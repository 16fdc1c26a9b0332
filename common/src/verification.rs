//! メール認証コード（登録・パスワード再設定で共通）
//!
//! - `CodeInput`: 1文字ずつの6マス。入力で次へ、空マスでBackspaceなら前へ
//! - `ResendCooldown`: 再送までの60秒。ストアの `countdown` に保存し再読込後も維持

use lazy_static::lazy_static;
use regex::Regex;

use crate::api::{self, ApiRequest};
use crate::error::{Error, Result};
use crate::notice::Notice;
use crate::session::{SessionContext, SessionStore};

pub const CODE_LENGTH: usize = 6;
pub const RESEND_COOLDOWN_SECS: u32 = 60;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex");
}

/// ざっくりとしたメール形式チェック
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeInput {
    slots: [String; CODE_LENGTH],
}

impl CodeInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// マスに値を入れる。2文字以上は無視。次にフォーカスすべき位置を返す
    pub fn set(&mut self, index: usize, value: &str) -> Option<usize> {
        if index >= CODE_LENGTH || value.chars().count() > 1 {
            return None;
        }
        self.slots[index] = value.to_string();
        if !value.is_empty() && index + 1 < CODE_LENGTH {
            Some(index + 1)
        } else {
            None
        }
    }

    /// Backspace。空マスなら前のマスへ
    pub fn backspace(&self, index: usize) -> Option<usize> {
        match self.slots.get(index) {
            Some(slot) if slot.is_empty() && index > 0 => Some(index - 1),
            _ => None,
        }
    }

    /// 貼り付け（空白を除いた先頭6文字）。最後に埋めたマスを返す
    pub fn paste(&mut self, text: &str) -> Option<usize> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            return None;
        }
        for (slot, ch) in self.slots.iter_mut().zip(chars.iter()) {
            *slot = ch.to_string();
        }
        Some(chars.len().min(CODE_LENGTH) - 1)
    }

    pub fn code(&self) -> String {
        self.slots.concat()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.chars().count() == 1)
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

/// 再送クールダウン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResendCooldown {
    remaining: u32,
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self { remaining: RESEND_COOLDOWN_SECS }
    }
}

impl ResendCooldown {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    /// 保存済みの値から復元（なければ60秒）
    pub fn restore<S: SessionStore>(session: &SessionContext<S>) -> Self {
        session
            .countdown()
            .map(|secs| Self::new(secs.min(RESEND_COOLDOWN_SECS)))
            .unwrap_or_default()
    }

    pub fn persist<S: SessionStore>(&self, session: &SessionContext<S>) -> Result<()> {
        session.save_countdown(self.remaining)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn can_resend(&self) -> bool {
        self.remaining == 0
    }

    /// 1秒経過。まだ動いていれば true
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    /// 再送時
    pub fn restart(&mut self) {
        self.remaining = RESEND_COOLDOWN_SECS;
    }

    /// 再送失敗時はすぐ再試行できるようにする
    pub fn fail(&mut self) {
        self.remaining = 0;
    }

    pub fn button_label(&self) -> String {
        if self.can_resend() {
            "没有收到邮件？重新发送".to_string()
        } else {
            format!("验证码已发送 ({}秒)", self.remaining)
        }
    }
}

/// 認証コードの用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationKind {
    Register,
    ResetPassword,
}

impl VerificationKind {
    pub fn send_code_request<F>(&self, email: &str) -> ApiRequest<F> {
        match self {
            VerificationKind::Register => api::send_register_code(email),
            VerificationKind::ResetPassword => api::send_reset_code(email),
        }
    }

    pub fn verify_request<F>(&self, email: &str, code: &str, password: &str) -> ApiRequest<F> {
        match self {
            VerificationKind::Register => api::verify_registration(email, code, password),
            VerificationKind::ResetPassword => api::reset_password(email, code, password),
        }
    }

    /// 送信前チェック（メール空・コード未完成は通信しない）
    pub fn validate(&self, email: &str, code: &CodeInput) -> Result<()> {
        if email.trim().is_empty() || !code.is_complete() {
            return Err(Error::Validation("请确保输入有效的邮箱和验证码".to_string()));
        }
        Ok(())
    }

    pub fn code_sent() -> Notice {
        Notice::success("验证码已发送", "请检查您的邮箱以获取验证码")
    }

    pub fn code_send_failed() -> Notice {
        Notice::error("发送验证码失败", "请检查您的邮箱以获取验证码")
    }

    pub fn succeeded(&self) -> Notice {
        match self {
            VerificationKind::Register => Notice::success("注册成功", "注册成功，请登录"),
            VerificationKind::ResetPassword => Notice::success("成功", "找回密码成功，请登录"),
        }
    }

    pub fn failed(&self) -> Notice {
        match self {
            VerificationKind::Register => Notice::error("注册失败", "注册失败，请重试"),
            VerificationKind::ResetPassword => Notice::error("失败", "找回密码失败，请重试"),
        }
    }

    /// 保存されている対象メールアドレス
    pub fn stored_email<S: SessionStore>(&self, session: &SessionContext<S>) -> Option<String> {
        match self {
            VerificationKind::Register => session.pending_registration().map(|p| p.email),
            VerificationKind::ResetPassword => session.reset_email(),
        }
    }

    /// 成功後に途中情報を消す
    pub fn finish<S: SessionStore>(&self, session: &SessionContext<S>) -> Result<()> {
        match self {
            VerificationKind::Register => session.finish_registration(),
            VerificationKind::ResetPassword => session.finish_password_reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestBody;
    use crate::session::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_code_input_auto_advance() {
        let mut code = CodeInput::new();
        assert_eq!(code.set(0, "1"), Some(1));
        assert_eq!(code.set(5, "9"), None);
        // 2文字は無視
        assert_eq!(code.set(1, "23"), None);
        assert_eq!(code.slots()[1], "");
        // 空文字はフォーカス移動なし
        assert_eq!(code.set(0, ""), None);
    }

    #[test]
    fn test_code_input_backspace_moves_back_on_empty_slot() {
        let mut code = CodeInput::new();
        code.set(0, "a");
        assert_eq!(code.backspace(1), Some(0));
        assert_eq!(code.backspace(0), None);
        code.set(2, "c");
        assert_eq!(code.backspace(2), None);
    }

    #[test]
    fn test_code_input_complete_and_paste() {
        let mut code = CodeInput::new();
        assert!(!code.is_complete());
        assert_eq!(code.paste("12 34 56 78"), Some(5));
        assert!(code.is_complete());
        assert_eq!(code.code(), "123456");
        code.clear();
        assert_eq!(code.code(), "");
    }

    #[test]
    fn test_cooldown_persists_across_remount() {
        let session = SessionContext::new(MemoryStore::new());
        assert_eq!(ResendCooldown::restore(&session).remaining(), 60);

        let mut cooldown = ResendCooldown::default();
        for _ in 0..15 {
            cooldown.tick();
        }
        cooldown.persist(&session).unwrap();

        let restored = ResendCooldown::restore(&session);
        assert_eq!(restored.remaining(), 45);
    }

    #[test]
    fn test_cooldown_fail_allows_immediate_retry() {
        let mut cooldown = ResendCooldown::new(30);
        assert!(!cooldown.can_resend());
        assert_eq!(cooldown.button_label(), "验证码已发送 (30秒)");
        cooldown.fail();
        assert!(cooldown.can_resend());
        assert_eq!(cooldown.button_label(), "没有收到邮件？重新发送");
        cooldown.restart();
        assert_eq!(cooldown.remaining(), 60);
    }

    #[test]
    fn test_cooldown_tick_stops_at_zero() {
        let mut cooldown = ResendCooldown::new(1);
        assert!(!cooldown.tick());
        assert!(!cooldown.tick());
        assert_eq!(cooldown.remaining(), 0);
    }

    #[test]
    fn test_validate_blocks_incomplete_submission() {
        let mut code = CodeInput::new();
        code.paste("12345");
        let err = VerificationKind::Register.validate("a@b.com", &code).unwrap_err();
        assert_eq!(err.to_string(), "请确保输入有效的邮箱和验证码");

        code.set(5, "6");
        assert!(VerificationKind::Register.validate("", &code).is_err());
        assert!(VerificationKind::Register.validate("a@b.com", &code).is_ok());
    }

    #[test]
    fn test_requests_per_kind() {
        let req: ApiRequest<()> = VerificationKind::ResetPassword.verify_request("a@b.com", "123456", "pw");
        assert_eq!(req.path, "/auth/reset-password/verify");
        assert_eq!(
            req.body,
            RequestBody::Json(json!({"email": "a@b.com", "code": "123456", "password": "pw"}))
        );

        let req: ApiRequest<()> = VerificationKind::Register.send_code_request("a@b.com");
        assert_eq!(req.path, "/auth/register/send-code");
    }

    #[test]
    fn test_finish_clears_flow_keys() {
        let session = SessionContext::new(MemoryStore::new());
        session.begin_password_reset("r@b.com").unwrap();
        assert_eq!(
            VerificationKind::ResetPassword.stored_email(&session).as_deref(),
            Some("r@b.com")
        );
        VerificationKind::ResetPassword.finish(&session).unwrap();
        assert!(VerificationKind::ResetPassword.stored_email(&session).is_none());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email(" user@example.com "));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("no at sign"));
    }
}
