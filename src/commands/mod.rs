//! サブコマンドの実装

pub mod auth;
pub mod smart_stamp;
pub mod stamp;
pub mod upload;

use crate::client::CliSession;
use crate::error::{BidWriterError, Result};
use bid_writer_common::notice::Notice;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 通知を1行で表示（エラーは stderr）
pub fn print_notice(notice: &Notice) {
    if notice.is_error() {
        eprintln!("✖ {}: {}", notice.title, notice.message);
    } else {
        println!("✔ {}: {}", notice.title, notice.message);
    }
}

/// 応答待ちのスピナー
pub fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn require_login(session: &CliSession) -> Result<()> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(BidWriterError::NotLoggedIn)
    }
}
