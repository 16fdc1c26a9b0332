//! アップロード前のファイル検証
//!
//! 拡張子（小文字化して比較）とサイズのみを見る。
//! 内容の判定はしない（CLI側で画像のみ追加チェックする）。

use thiserror::Error;

/// 300MB
pub const MAX_UPLOAD_BYTES: u64 = 300 * 1024 * 1024;

pub const DEFAULT_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".pdf", ".docx"];
pub const STAMP_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];
pub const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".docx", ".doc"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("只支持{}格式的文件", .allowed.join(", "))]
    UnsupportedType { file_name: String, allowed: Vec<String> },

    #[error("文件大小不能超过 300MB")]
    TooLarge { file_name: String, size: u64 },

    #[error("最多只能上传 {max} 个文件")]
    TooMany { max: usize },
}

/// 許可拡張子とサイズ上限
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub allowed_extensions: Vec<String>,
    pub max_bytes: u64,
    /// 一度に受け付けるファイル数（None は無制限）
    pub max_files: Option<usize>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS)
    }
}

impl UploadPolicy {
    pub fn with_extensions(extensions: &[&str]) -> Self {
        Self {
            allowed_extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            max_bytes: MAX_UPLOAD_BYTES,
            max_files: None,
        }
    }

    /// 印章画像
    pub fn stamp_images() -> Self {
        Self::with_extensions(STAMP_EXTENSIONS)
    }

    /// 盖章対象の文書（1件のみ）
    pub fn documents() -> Self {
        Self {
            max_files: Some(1),
            ..Self::with_extensions(DOCUMENT_EXTENSIONS)
        }
    }

    /// `<input accept>` 用
    pub fn accept_attr(&self) -> String {
        self.allowed_extensions.join(", ")
    }

    pub fn validate(&self, file_name: &str, size: u64) -> Result<(), UploadError> {
        let extension = extension_of(file_name);
        if !self.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(UploadError::UnsupportedType {
                file_name: file_name.to_string(),
                allowed: self.allowed_extensions.clone(),
            });
        }

        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                file_name: file_name.to_string(),
                size,
            });
        }

        Ok(())
    }

    /// 複数ファイルを検証（最初の違反で止める）
    pub fn validate_all<'a, I>(&self, files: I) -> Result<(), UploadError>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let mut count = 0;
        for (name, size) in files {
            self.validate(name, size)?;
            count += 1;
        }
        match self.max_files {
            Some(max) if count > max => Err(UploadError::TooMany { max }),
            _ => Ok(()),
        }
    }
}

/// ファイル選択の判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screened<F> {
    Accepted(Vec<F>),
    Rejected(UploadError),
}

impl<F> Screened<F> {
    /// 拒否時は `<input type=file>` の値を空に戻す
    pub fn clears_input(&self) -> bool {
        matches!(self, Screened::Rejected(_))
    }
}

impl UploadPolicy {
    /// 選択されたファイルをまとめて判定する。`describe` は (ファイル名, バイト数)
    pub fn screen<F, D>(&self, files: Vec<F>, describe: D) -> Screened<F>
    where
        D: Fn(&F) -> (String, u64),
    {
        let described: Vec<(String, u64)> = files.iter().map(&describe).collect();
        match self.validate_all(described.iter().map(|(n, s)| (n.as_str(), *s))) {
            Ok(()) => Screened::Accepted(files),
            Err(err) => {
                log::warn!("upload rejected: {:?}", err);
                Screened::Rejected(err)
            }
        }
    }
}

/// 文書アップロード枠（1ファイル）の状態
///
/// 空き枠にだけ新しいファイルを受け付ける。アップロード済みの文書は
/// 削除するまで置き換わらないので、親に渡した文書と表示は常に一致する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DocumentSlot {
    #[default]
    Empty,
    Uploading(String),
    Uploaded(String),
    /// 失敗した枠は文書を持たない
    Failed { name: String, message: String },
}

impl DocumentSlot {
    pub fn accepts_files(&self) -> bool {
        matches!(self, DocumentSlot::Empty | DocumentSlot::Failed { .. })
    }

    /// 判定で拒否された。枠が埋まっていれば何もしない
    pub fn reject(&mut self, message: impl Into<String>) -> bool {
        if !self.accepts_files() {
            return false;
        }
        *self = DocumentSlot::Failed {
            name: String::new(),
            message: message.into(),
        };
        true
    }

    pub fn start(&mut self, name: impl Into<String>) -> bool {
        if !self.accepts_files() {
            return false;
        }
        *self = DocumentSlot::Uploading(name.into());
        true
    }

    /// 送信結果を反映し、成功時だけ親へ渡すサーバー側パスを返す
    pub fn finish(&mut self, paths: Option<Vec<String>>) -> Option<Vec<String>> {
        let DocumentSlot::Uploading(name) = self else {
            return None;
        };
        let name = std::mem::take(name);
        match paths {
            Some(paths) if !paths.is_empty() => {
                *self = DocumentSlot::Uploaded(name);
                Some(paths)
            }
            _ => {
                *self = DocumentSlot::Failed {
                    name,
                    message: "上传失败".to_string(),
                };
                None
            }
        }
    }

    /// 削除。親には空の配列を渡す
    pub fn remove(&mut self) -> Vec<String> {
        *self = DocumentSlot::Empty;
        Vec::new()
    }
}

/// 最後の `.` 以降を小文字で返す（`.` を含む）。拡張子なしは空文字
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rfind('.')
        .map(|idx| file_name[idx..].to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_exe_under_default_list() {
        let policy = UploadPolicy::default();
        let err = policy.validate("malware.exe", 1024).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "只支持.png, .jpg, .jpeg, .pdf, .docx格式的文件");
    }

    #[test]
    fn test_rejects_301mb_regardless_of_extension() {
        let size = 301 * 1024 * 1024;
        for name in ["big.pdf", "big.png", "BIG.DOCX"] {
            let err = UploadPolicy::default().validate(name, size).unwrap_err();
            assert_eq!(err, UploadError::TooLarge { file_name: name.to_string(), size });
            assert_eq!(err.to_string(), "文件大小不能超过 300MB");
        }
    }

    #[test]
    fn test_exactly_300mb_is_accepted() {
        assert!(UploadPolicy::default().validate("ok.pdf", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(UploadPolicy::stamp_images().validate("SEAL.PNG", 10).is_ok());
        assert!(UploadPolicy::stamp_images().validate("seal.pdf", 10).is_err());
    }

    #[test]
    fn test_no_extension_is_rejected() {
        assert_eq!(extension_of("README"), "");
        assert!(UploadPolicy::default().validate("README", 1).is_err());
    }

    #[test]
    fn test_documents_accept_single_file_only() {
        let policy = UploadPolicy::documents();
        assert!(policy.validate_all([("a.pdf", 1)]).is_ok());
        assert_eq!(
            policy.validate_all([("a.pdf", 1), ("b.docx", 1)]),
            Err(UploadError::TooMany { max: 1 })
        );
    }

    #[test]
    fn test_screen_rejection_clears_input() {
        let screened = UploadPolicy::default()
            .screen(vec!["malware.exe"], |name| (name.to_string(), 10));
        assert!(screened.clears_input());
        assert!(matches!(screened, Screened::Rejected(UploadError::UnsupportedType { .. })));

        let screened = UploadPolicy::default()
            .screen(vec!["bid.pdf"], |name| (name.to_string(), 10));
        assert_eq!(screened, Screened::Accepted(vec!["bid.pdf"]));
        assert!(!screened.clears_input());
    }

    #[test]
    fn test_uploaded_slot_refuses_second_file() {
        let mut slot = DocumentSlot::default();
        assert!(slot.start("a.pdf"));
        assert_eq!(slot.finish(Some(vec!["/files/a.pdf".into()])), Some(vec!["/files/a.pdf".into()]));

        // 埋まっている枠は拒否も開始も受け付けない
        assert!(!slot.reject("只支持.pdf格式的文件"));
        assert!(!slot.start("b.pdf"));
        assert_eq!(slot, DocumentSlot::Uploaded("a.pdf".into()));

        assert!(slot.remove().is_empty());
        assert!(slot.accepts_files());
    }

    #[test]
    fn test_failed_slot_holds_no_document() {
        let mut slot = DocumentSlot::default();
        slot.start("a.pdf");
        assert_eq!(slot.finish(None), None);
        assert!(matches!(&slot, DocumentSlot::Failed { name, .. } if name == "a.pdf"));

        // 失敗後は選び直せる
        assert!(slot.start("b.pdf"));
        assert_eq!(slot.finish(Some(Vec::new())), None);
        assert!(slot.accepts_files());
        assert_eq!(slot.finish(Some(vec!["x".into()])), None);
    }

    #[test]
    fn test_accept_attr() {
        assert_eq!(UploadPolicy::stamp_images().accept_attr(), ".png, .jpg, .jpeg");
    }
}
