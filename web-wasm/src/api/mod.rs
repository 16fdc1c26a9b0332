//! バックエンドAPI呼び出し（fetch）

pub mod client;

pub use client::ApiClient;
