//! UIコンポーネント

pub mod alert;
pub mod background;
pub mod code_input;
pub mod drop_upload;
pub mod header;
pub mod input;
pub mod modal;
pub mod prefetch;
pub mod split_container;
pub mod submit_button;
pub mod upload_button;
