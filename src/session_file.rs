//! セッションをJSONファイルに保存するストア
//!
//! 書き込みのたびに全体を読み直して上書きする（1プロセス1コマンドなので十分）。
//! `saved_at` は最後に書き込んだ時刻（UNIX秒）で、再送クールダウンの経過計算に使う。

use bid_writer_common::session::{keys, SessionStore};
use bid_writer_common::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    saved_at: Option<i64>,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<SessionFile> {
        if !self.path.exists() {
            return Ok(SessionFile::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, mut file: SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        file.saved_at = Some(Utc::now().timestamp());
        std::fs::write(&self.path, serde_json::to_string_pretty(&file)?)?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// 最後に保存してからの経過秒数
    pub fn seconds_since_save(&self) -> Option<u64> {
        let saved_at = self.read().ok()?.saved_at?;
        let elapsed = Utc::now().timestamp() - saved_at;
        u64::try_from(elapsed).ok()
    }

    /// 保存済みカウントダウンから経過時間を引いた残り秒数
    pub fn remaining_countdown(&self) -> Option<u32> {
        let stored: u32 = self.get(keys::COUNTDOWN)?.parse().ok()?;
        let elapsed = self.seconds_since_save().unwrap_or(0);
        Some(stored.saturating_sub(u32::try_from(elapsed).unwrap_or(u32::MAX)))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.read() {
            Ok(file) => file.values.get(key).cloned(),
            Err(e) => {
                log::warn!("session file unreadable ({}): {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut file = self.read()?;
        file.values.insert(key.to_string(), value.to_string());
        self.write(file)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut file = self.read()?;
        if file.values.remove(key).is_some() {
            self.write(file)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
