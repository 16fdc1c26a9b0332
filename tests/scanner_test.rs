//! アップロード対象の収集・検証のテスト

use bid_writer::error::BidWriterError;
use bid_writer::scanner;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_png(path: &Path) {
    image::RgbaImage::new(4, 4).save(path).expect("Failed to write png");
}

#[test]
fn test_missing_path() {
    let result = scanner::prepare_uploads(&[PathBuf::from("/nonexistent/path/12345")]);
    assert!(matches!(result, Err(BidWriterError::FileNotFound(_))));
}

#[test]
fn test_empty_folder_has_nothing_to_upload() {
    let dir = tempdir().unwrap();
    let result = scanner::prepare_stamp_images(&[dir.path().to_path_buf()]);
    assert!(matches!(result, Err(BidWriterError::NothingToUpload(_))));
}

#[test]
fn test_disallowed_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let exe = dir.path().join("malware.exe");
    fs::write(&exe, b"MZ").unwrap();

    let err = scanner::prepare_uploads(&[exe]).unwrap_err();
    assert_eq!(err.to_string(), "只支持.png, .jpg, .jpeg, .pdf, .docx格式的文件");
}

#[test]
fn test_stamp_images_are_sniffed() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("seal.png");
    write_png(&real);

    let files = scanner::prepare_stamp_images(&[real.clone()]).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, "seal.png");
    assert_eq!(scanner::sniff_image(&real).unwrap(), (4, 4));

    // 拡張子だけ .png のテキスト
    let fake = dir.path().join("fake.png");
    fs::write(&fake, "hello").unwrap();
    let err = scanner::prepare_stamp_images(&[fake]).unwrap_err();
    assert!(matches!(err, BidWriterError::ImageLoad(_)));
}

#[test]
fn test_document_limit_is_one() {
    let dir = tempdir().unwrap();
    let doc = dir.path().join("bid.pdf");
    fs::write(&doc, b"%PDF-1.4").unwrap();

    let file = scanner::prepare_document(&doc).unwrap();
    assert_eq!(file.file_name, "bid.pdf");
    assert_eq!(file.size, 8);

    fs::write(dir.path().join("appendix.docx"), b"PK").unwrap();
    let err = scanner::prepare_document(dir.path()).unwrap_err();
    assert_eq!(err.to_string(), "最多只能上传 1 个文件");
}
