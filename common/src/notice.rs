//! 通知バナー（3秒で自動的に閉じる）

/// 自動で閉じるまでの時間（ミリ秒）
pub const AUTO_DISMISS_MS: u32 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// 未公開機能をクリックしたとき
    pub fn coming_soon() -> Self {
        Self::success("魔法即将降临...", "即将开启探索之旅,敬请期待！")
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
