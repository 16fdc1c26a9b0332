//! ビルド時設定

use bid_writer_common::api::DEFAULT_BASE_URL;

/// バックエンドURL（ビルド時の `BID_WRITER_API_URL`、未設定ならデフォルト）
pub fn api_base_url() -> &'static str {
    option_env!("BID_WRITER_API_URL").unwrap_or(DEFAULT_BASE_URL)
}
