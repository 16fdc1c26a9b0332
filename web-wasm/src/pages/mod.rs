//! ページ

pub mod forgot_password;
pub mod landing;
pub mod login;
pub mod magic_stamp;
pub mod not_found;
pub mod pricing;
pub mod sign_up;
pub mod stamp_manage;
pub mod tools;
pub mod verify;
