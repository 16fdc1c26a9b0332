//! アップロード対象の収集と検証
//!
//! フォルダは再帰的に走査し、許可された拡張子のファイルだけ拾う。
//! 直接指定されたファイルは拡張子に関係なく検証にかける（弾かれればエラー）。

use crate::error::{BidWriterError, Result};
use bid_writer_common::upload::{extension_of, UploadPolicy};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl UploadFile {
    fn from_path(path: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size,
        })
    }
}

fn is_allowed(path: &Path, policy: &UploadPolicy) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let ext = extension_of(&name);
    policy.allowed_extensions.iter().any(|e| *e == ext)
}

/// 入力パス（ファイル/フォルダ）からアップロード候補を集める
pub fn collect_files(inputs: &[PathBuf], policy: &UploadPolicy) -> Result<Vec<UploadFile>> {
    let mut files: Vec<UploadFile> = Vec::new();

    for input in inputs {
        if !input.exists() {
            return Err(BidWriterError::FileNotFound(input.display().to_string()));
        }

        if input.is_file() {
            files.push(UploadFile::from_path(input)?);
            continue;
        }

        let mut found: Vec<UploadFile> = Vec::new();
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if is_allowed(path, policy) {
                found.push(UploadFile::from_path(path)?);
            } else {
                log::debug!("skip {}", path.display());
            }
        }
        found.sort_by(|a, b| a.path.cmp(&b.path));
        files.extend(found);
    }

    files.dedup_by(|a, b| a.path == b.path);
    Ok(files)
}

/// 拡張子・サイズ・件数を検証
pub fn validate(files: &[UploadFile], policy: &UploadPolicy) -> Result<()> {
    policy.validate_all(files.iter().map(|f| (f.file_name.as_str(), f.size)))?;
    Ok(())
}

/// 画像として読めるか（ヘッダーを解析して寸法を返す）
pub fn sniff_image(path: &Path) -> Result<(u32, u32)> {
    let reader = image::ImageReader::open(path)?
        .with_guessed_format()
        .map_err(|e| BidWriterError::ImageLoad(format!("{}: {}", path.display(), e)))?;
    if reader.format().is_none() {
        return Err(BidWriterError::ImageLoad(path.display().to_string()));
    }
    reader
        .into_dimensions()
        .map_err(|e| BidWriterError::ImageLoad(format!("{}: {}", path.display(), e)))
}

fn prepare(inputs: &[PathBuf], policy: &UploadPolicy) -> Result<Vec<UploadFile>> {
    let files = collect_files(inputs, policy)?;
    if files.is_empty() {
        let joined: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
        return Err(BidWriterError::NothingToUpload(joined.join(", ")));
    }
    validate(&files, policy)?;
    Ok(files)
}

/// 印章画像（拡張子に加えて中身も確認）
pub fn prepare_stamp_images(inputs: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let files = prepare(inputs, &UploadPolicy::stamp_images())?;
    for file in &files {
        let (width, height) = sniff_image(&file.path)?;
        log::debug!("{}: {}x{}", file.file_name, width, height);
    }
    Ok(files)
}

/// 汎用アップロード
pub fn prepare_uploads(inputs: &[PathBuf]) -> Result<Vec<UploadFile>> {
    prepare(inputs, &UploadPolicy::default())
}

/// 盖章対象の文書（1件）
pub fn prepare_document(input: &Path) -> Result<UploadFile> {
    let mut files = prepare(&[input.to_path_buf()], &UploadPolicy::documents())?;
    Ok(files.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_allowed_case_insensitive() {
        let policy = UploadPolicy::stamp_images();
        assert!(is_allowed(Path::new("a/seal.PNG"), &policy));
        assert!(is_allowed(Path::new("seal.jpeg"), &policy));
        assert!(!is_allowed(Path::new("seal.pdf"), &policy));
        assert!(!is_allowed(Path::new("README"), &policy));
    }

    #[test]
    fn test_collect_recurses_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(nested.join("a.jpg"), b"x").unwrap();
        fs::write(nested.join("notes.txt"), b"x").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &UploadPolicy::stamp_images()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.jpg"]);
    }
}
