//! セッション管理
//!
//! トークン・メール・登録途中の情報・再送カウントダウンを
//! キー/値ストアに保存する。ストアの実体は注入する：
//! ブラウザは localStorage、CLIはJSONファイル、テストはメモリ。

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

/// 保存キー（ブラウザの localStorage キーと同一）
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const EMAIL: &str = "email";
    pub const REG_PASSWORD: &str = "reg_pwd";
    pub const REG_EMAIL: &str = "reg_email";
    pub const FORGOT_EMAIL: &str = "forgot_pwd_email";
    pub const COUNTDOWN: &str = "countdown";
}

/// 文字列キー/値ストア
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// テスト・一時利用向けのメモリストア
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// ログイン済みセッション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub email: String,
}

/// 登録途中の情報（sign_up → verify）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRegistration {
    pub email: String,
    pub password: String,
}

/// セッションの単一の窓口
#[derive(Debug, Clone)]
pub struct SessionContext<S> {
    store: S,
}

impl<S: SessionStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 現在のセッション（トークンが空なら未ログイン）
    pub fn current(&self) -> Option<Session> {
        let token = self.store.get(keys::TOKEN).filter(|t| !t.is_empty())?;
        let email = self.store.get(keys::EMAIL).unwrap_or_default();
        Some(Session { token, email })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    /// `Authorization` ヘッダー値
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    pub fn sign_in(&self, token: &str, email: &str) -> Result<Session> {
        self.store.set(keys::TOKEN, token)?;
        self.store.set(keys::EMAIL, email)?;
        log::info!("signed in as {}", email);
        Ok(Session {
            token: token.to_string(),
            email: email.to_string(),
        })
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.remove(keys::TOKEN)?;
        self.store.remove(keys::EMAIL)?;
        Ok(())
    }

    // ---- 登録フロー ----

    pub fn begin_registration(&self, email: &str, password: &str) -> Result<()> {
        self.store.set(keys::REG_EMAIL, email)?;
        self.store.set(keys::REG_PASSWORD, password)
    }

    pub fn pending_registration(&self) -> Option<PendingRegistration> {
        let email = self.store.get(keys::REG_EMAIL)?;
        let password = self.store.get(keys::REG_PASSWORD).unwrap_or_default();
        Some(PendingRegistration { email, password })
    }

    pub fn finish_registration(&self) -> Result<()> {
        self.store.remove(keys::REG_PASSWORD)?;
        self.store.remove(keys::REG_EMAIL)
    }

    // ---- パスワード再設定フロー ----

    pub fn begin_password_reset(&self, email: &str) -> Result<()> {
        self.store.set(keys::FORGOT_EMAIL, email)
    }

    pub fn reset_email(&self) -> Option<String> {
        self.store.get(keys::FORGOT_EMAIL)
    }

    pub fn finish_password_reset(&self) -> Result<()> {
        self.store.remove(keys::FORGOT_EMAIL)
    }

    // ---- 再送カウントダウン ----

    pub fn countdown(&self) -> Option<u32> {
        self.store.get(keys::COUNTDOWN)?.trim().parse().ok()
    }

    pub fn save_countdown(&self, seconds: u32) -> Result<()> {
        self.store.set(keys::COUNTDOWN, &seconds.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let ctx = SessionContext::new(MemoryStore::new());
        assert!(!ctx.is_authenticated());

        ctx.sign_in("tok", "user@example.com").unwrap();
        assert_eq!(
            ctx.current(),
            Some(Session { token: "tok".into(), email: "user@example.com".into() })
        );
        assert_eq!(ctx.bearer().as_deref(), Some("Bearer tok"));

        ctx.sign_out().unwrap();
        assert!(ctx.current().is_none());
        assert!(ctx.store().get(keys::EMAIL).is_none());
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let store = MemoryStore::new();
        store.set(keys::TOKEN, "").unwrap();
        let ctx = SessionContext::new(&store);
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_registration_keys_cleared_on_finish() {
        let ctx = SessionContext::new(MemoryStore::new());
        ctx.begin_registration("new@example.com", "pw").unwrap();
        assert_eq!(ctx.pending_registration().unwrap().password, "pw");

        ctx.finish_registration().unwrap();
        assert!(ctx.pending_registration().is_none());
        assert!(ctx.store().get(keys::REG_PASSWORD).is_none());
    }

    #[test]
    fn test_countdown_roundtrip_and_garbage() {
        let ctx = SessionContext::new(MemoryStore::new());
        assert_eq!(ctx.countdown(), None);
        ctx.save_countdown(45).unwrap();
        assert_eq!(ctx.countdown(), Some(45));

        ctx.store().set(keys::COUNTDOWN, "abc").unwrap();
        assert_eq!(ctx.countdown(), None);
    }
}
