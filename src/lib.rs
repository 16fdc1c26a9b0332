//! Bid Writer コマンドラインクライアント

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod scanner;
pub mod session_file;
