//! エラー表示のテスト

use bid_writer::error::BidWriterError;
use bid_writer_common::upload::UploadError;
use bid_writer_common::workflow::WorkflowError;

#[test]
fn test_not_logged_in_hints_login_command() {
    let display = BidWriterError::NotLoggedIn.to_string();
    assert!(display.contains("bid-writer login"));
}

#[test]
fn test_common_errors_are_transparent() {
    let err: BidWriterError = WorkflowError::AlreadySubmitting.into();
    assert_eq!(err.to_string(), "正在盖章，请稍候");

    let err: BidWriterError = UploadError::TooLarge { file_name: "a.pdf".into(), size: 1 }.into();
    assert_eq!(err.to_string(), "文件大小不能超过 300MB");
}

#[test]
fn test_http_status_message_is_available() {
    let err: BidWriterError = bid_writer_common::Error::Http { status: 403, message: String::new() }.into();
    match err {
        BidWriterError::Common(inner) => assert_eq!(inner.status_message(), Some("没有权限访问该资源")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: BidWriterError = io.into();
    assert!(matches!(err, BidWriterError::Io(_)));
    assert!(err.to_string().contains("gone"));
}
