//! localStorage をセッションストアとして使う

use bid_writer_common::{Error, Result, SessionContext, SessionStore};
use gloo::storage::{LocalStorage, Storage};
use leptos::prelude::*;

/// 値は JSON ではなく生の文字列で保存する（既存キーとの互換のため）
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl SessionStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}

pub type BrowserSession = SessionContext<BrowserStore>;

pub fn provide_session() {
    provide_context(BrowserSession::new(BrowserStore));
}

pub fn use_session() -> BrowserSession {
    use_context::<BrowserSession>().unwrap_or_else(|| BrowserSession::new(BrowserStore))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use bid_writer_common::session::keys;
    use bid_writer_common::verification::ResendCooldown;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_local_storage_session_round_trip() {
        let session = BrowserSession::new(BrowserStore);
        session.sign_in("tok", "user@example.com").expect("sign in");
        assert_eq!(BrowserStore.get(keys::TOKEN).as_deref(), Some("tok"));
        assert_eq!(session.bearer().as_deref(), Some("Bearer tok"));

        session.sign_out().expect("sign out");
        assert!(BrowserStore.get(keys::TOKEN).is_none());
    }

    #[wasm_bindgen_test]
    fn wasm_countdown_survives_reload() {
        let session = BrowserSession::new(BrowserStore);
        ResendCooldown::new(45).persist(&session).expect("persist");

        // 再読込相当: 新しいコンテキストから復元
        let reloaded = BrowserSession::new(BrowserStore);
        assert_eq!(ResendCooldown::restore(&reloaded).remaining(), 45);
        BrowserStore.remove(keys::COUNTDOWN).expect("cleanup");
    }
}
