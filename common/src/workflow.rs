//! 盖章ワークフロー
//!
//! Idle → FileSelected → ParamsValid → Submitting → Succeeded | Failed
//!
//! 入力（文書・印章・幅・オフセット・種別）が変わるたびにフェーズを導出し直す。
//! 送信は `ParamsValid` からのみ可能で、`Submitting` 中の再送信はエラーになる。

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::api::{self, ApiRequest};

/// 盖章種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StampType {
    /// 全部
    Both,
    /// 骑缝章
    Seal,
    /// 印章
    Stamp,
}

impl StampType {
    pub const ALL: [StampType; 3] = [StampType::Both, StampType::Seal, StampType::Stamp];

    /// APIに送る文字列
    pub fn as_wire(&self) -> &'static str {
        match self {
            StampType::Both => "both",
            StampType::Seal => "seal",
            StampType::Stamp => "stamp",
        }
    }

    /// ラジオボタンの表示名
    pub fn label(&self) -> &'static str {
        match self {
            StampType::Both => "全部",
            StampType::Seal => "骑缝章",
            StampType::Stamp => "印章",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for StampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for StampType {
    type Err = String;

    /// `seal` でも `骑缝章` でも受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_wire().eq_ignore_ascii_case(trimmed))
            .or_else(|| Self::from_label(trimmed))
            .ok_or_else(|| format!("unknown stamp type: {}", s))
    }
}

/// 送信に足りない項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Document,
    Stamp,
    Width,
    Offset,
    StampType,
}

impl Missing {
    pub fn message(&self) -> &'static str {
        match self {
            Missing::Document => "请先上传需要盖章的文件",
            Missing::Stamp => "请选择印章",
            Missing::Width => "请输入有效的印章宽度",
            Missing::Offset => "请输入有效的偏移量",
            Missing::StampType => "请选择盖章类型",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("正在盖章，请稍候")]
    AlreadySubmitting,

    #[error("{}", .0.message())]
    NotReady(Missing),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowPhase {
    Idle,
    FileSelected,
    ParamsValid,
    Submitting,
    Succeeded { output_path: String },
    Failed { message: String },
}

impl WorkflowPhase {
    pub fn can_submit(&self) -> bool {
        matches!(self, WorkflowPhase::ParamsValid)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, WorkflowPhase::Submitting)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// アップロード済み文書のサーバー側パス
    DocumentsStaged(Vec<String>),
    DocumentsCleared,
    /// 印章の選択（None は解除）
    StampSelected(Option<String>),
    WidthChanged(f64),
    OffsetChanged(f64),
    TypeChanged(Option<StampType>),
    /// バックエンドが出力パスを返した
    Completed { output_path: String },
    Failed { message: String },
}

/// 送信内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartStampRequest {
    pub input_file: String,
    pub stamp_file: String,
    pub stamp_type: StampType,
}

impl SmartStampRequest {
    pub fn to_api_request<F>(&self) -> ApiRequest<F> {
        api::smart_stamp(&self.input_file, &self.stamp_file, self.stamp_type.as_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Draft {
    documents: Vec<String>,
    stamp_path: Option<String>,
    width: f64,
    offset: f64,
    stamp_type: Option<StampType>,
}

impl Draft {
    fn first_missing(&self) -> Option<Missing> {
        if self.documents.is_empty() {
            Some(Missing::Document)
        } else if self.stamp_path.as_deref().map_or(true, str::is_empty) {
            Some(Missing::Stamp)
        } else if !(self.width.is_finite() && self.width > 0.0) {
            Some(Missing::Width)
        } else if !(self.offset.is_finite() && self.offset > 0.0) {
            Some(Missing::Offset)
        } else if self.stamp_type.is_none() {
            Some(Missing::StampType)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct StampWorkflow {
    draft: Draft,
    phase: WorkflowPhase,
}

impl Default for StampWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl StampWorkflow {
    pub fn new() -> Self {
        Self {
            draft: Draft::default(),
            phase: WorkflowPhase::Idle,
        }
    }

    pub fn phase(&self) -> &WorkflowPhase {
        &self.phase
    }

    pub fn documents(&self) -> &[String] {
        &self.draft.documents
    }

    pub fn stamp_path(&self) -> Option<&str> {
        self.draft.stamp_path.as_deref()
    }

    pub fn stamp_type(&self) -> Option<StampType> {
        self.draft.stamp_type
    }

    pub fn width(&self) -> f64 {
        self.draft.width
    }

    pub fn offset(&self) -> f64 {
        self.draft.offset
    }

    /// 送信できない理由（送信可能なら None）
    pub fn missing(&self) -> Option<Missing> {
        self.draft.first_missing()
    }

    pub fn apply(&mut self, event: WorkflowEvent) -> &WorkflowPhase {
        match event {
            WorkflowEvent::Completed { output_path } => {
                if self.phase.is_submitting() {
                    self.phase = WorkflowPhase::Succeeded { output_path };
                }
                return &self.phase;
            }
            WorkflowEvent::Failed { message } => {
                if self.phase.is_submitting() {
                    log::warn!("smart stamp failed: {}", message);
                    self.phase = WorkflowPhase::Failed { message };
                }
                return &self.phase;
            }
            _ if self.phase.is_submitting() => {
                log::debug!("input ignored while submitting: {:?}", event);
                return &self.phase;
            }
            WorkflowEvent::DocumentsStaged(paths) => self.draft.documents = paths,
            WorkflowEvent::DocumentsCleared => self.draft.documents.clear(),
            WorkflowEvent::StampSelected(path) => self.draft.stamp_path = path,
            WorkflowEvent::WidthChanged(width) => self.draft.width = width,
            WorkflowEvent::OffsetChanged(offset) => self.draft.offset = offset,
            WorkflowEvent::TypeChanged(stamp_type) => self.draft.stamp_type = stamp_type,
        }

        self.phase = self.derive_phase();
        &self.phase
    }

    fn derive_phase(&self) -> WorkflowPhase {
        match self.draft.first_missing() {
            None => WorkflowPhase::ParamsValid,
            Some(Missing::Document) => WorkflowPhase::Idle,
            Some(_) => WorkflowPhase::FileSelected,
        }
    }

    /// 送信を開始し、発行すべき唯一のリクエストを返す
    pub fn submit(&mut self) -> Result<SmartStampRequest, WorkflowError> {
        if self.phase.is_submitting() {
            return Err(WorkflowError::AlreadySubmitting);
        }
        if let Some(missing) = self.draft.first_missing() {
            return Err(WorkflowError::NotReady(missing));
        }

        // first_missing が None なので各値は揃っている
        let (Some(input_file), Some(stamp_file), Some(stamp_type)) = (
            self.draft.documents.first(),
            self.draft.stamp_path.as_ref(),
            self.draft.stamp_type,
        ) else {
            return Err(WorkflowError::NotReady(Missing::Document));
        };

        let request = SmartStampRequest {
            input_file: input_file.clone(),
            stamp_file: stamp_file.clone(),
            stamp_type,
        };
        self.phase = WorkflowPhase::Submitting;
        log::info!(
            "smart stamp: {} with {} ({})",
            request.input_file,
            request.stamp_file,
            request.stamp_type
        );
        Ok(request)
    }
}

/// 出力パスから保存用ファイル名を決める
pub fn download_file_name(output_path: &str) -> String {
    output_path
        .rsplit(['/', '\\'])
        .next()
        .map(|name| name.split(['?', '#']).next().unwrap_or(name))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "stamped_output".to_string())
}

/// 出力パスを取得用URLにする（絶対URLはそのまま）
pub fn resolve_output_url(base_url: &str, output_path: &str) -> String {
    if output_path.starts_with("http://") || output_path.starts_with("https://") {
        return output_path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        output_path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestBody;

    fn ready_workflow(stamp_type: StampType) -> StampWorkflow {
        let mut wf = StampWorkflow::new();
        wf.apply(WorkflowEvent::DocumentsStaged(vec!["uploads/bid.pdf".into()]));
        wf.apply(WorkflowEvent::StampSelected(Some("stamps/1.png".into())));
        wf.apply(WorkflowEvent::WidthChanged(40.0));
        wf.apply(WorkflowEvent::OffsetChanged(10.0));
        wf.apply(WorkflowEvent::TypeChanged(Some(stamp_type)));
        wf
    }

    #[test]
    fn test_stamp_type_mappings() {
        assert_eq!(StampType::from_label("骑缝章"), Some(StampType::Seal));
        assert_eq!(StampType::Seal.as_wire(), "seal");
        assert_eq!(StampType::Both.label(), "全部");
        assert_eq!("stamp".parse::<StampType>(), Ok(StampType::Stamp));
        assert_eq!("印章".parse::<StampType>(), Ok(StampType::Stamp));
        assert!("round".parse::<StampType>().is_err());
    }

    #[test]
    fn test_phases_follow_inputs() {
        let mut wf = StampWorkflow::new();
        assert_eq!(wf.phase(), &WorkflowPhase::Idle);

        wf.apply(WorkflowEvent::StampSelected(Some("stamps/1.png".into())));
        assert_eq!(wf.phase(), &WorkflowPhase::Idle);

        wf.apply(WorkflowEvent::DocumentsStaged(vec!["uploads/a.pdf".into()]));
        assert_eq!(wf.phase(), &WorkflowPhase::FileSelected);
        assert_eq!(wf.missing(), Some(Missing::Width));

        wf.apply(WorkflowEvent::WidthChanged(40.0));
        wf.apply(WorkflowEvent::OffsetChanged(5.0));
        wf.apply(WorkflowEvent::TypeChanged(Some(StampType::Both)));
        assert!(wf.phase().can_submit());

        wf.apply(WorkflowEvent::OffsetChanged(0.0));
        assert_eq!(wf.phase(), &WorkflowPhase::FileSelected);
    }

    #[test]
    fn test_seal_submission_yields_one_request() {
        let mut wf = ready_workflow(StampType::from_label("骑缝章").unwrap());

        let request = wf.submit().unwrap();
        assert_eq!(request.stamp_type.as_wire(), "seal");
        assert_eq!(wf.phase(), &WorkflowPhase::Submitting);

        let api_request: ApiRequest<()> = request.to_api_request();
        assert_eq!(api_request.path, "/stamp/smart-stamp");
        assert_eq!(api_request.query_value("stamp_type"), Some("seal"));
        assert_eq!(api_request.query_value("input_file"), Some("uploads/bid.pdf"));
        assert_eq!(api_request.body, RequestBody::Empty);

        // 二度目は拒否
        assert_eq!(wf.submit(), Err(WorkflowError::AlreadySubmitting));
    }

    #[test]
    fn test_submit_without_params_is_rejected() {
        let mut wf = StampWorkflow::new();
        assert_eq!(wf.submit(), Err(WorkflowError::NotReady(Missing::Document)));

        wf.apply(WorkflowEvent::DocumentsStaged(vec!["a.pdf".into()]));
        let err = wf.submit().unwrap_err();
        assert_eq!(err.to_string(), "请选择印章");
        assert_eq!(wf.phase(), &WorkflowPhase::FileSelected);
    }

    #[test]
    fn test_edits_ignored_while_submitting() {
        let mut wf = ready_workflow(StampType::Stamp);
        wf.submit().unwrap();
        wf.apply(WorkflowEvent::StampSelected(None));
        assert_eq!(wf.phase(), &WorkflowPhase::Submitting);
        assert_eq!(wf.stamp_path(), Some("stamps/1.png"));
    }

    #[test]
    fn test_result_then_edit_allows_resubmit() {
        let mut wf = ready_workflow(StampType::Both);
        wf.submit().unwrap();
        wf.apply(WorkflowEvent::Completed { output_path: "out/bid_stamped.pdf".into() });
        assert_eq!(
            wf.phase(),
            &WorkflowPhase::Succeeded { output_path: "out/bid_stamped.pdf".into() }
        );

        wf.apply(WorkflowEvent::WidthChanged(42.0));
        assert!(wf.phase().can_submit());
        assert!(wf.submit().is_ok());

        wf.apply(WorkflowEvent::Failed { message: "boom".into() });
        assert!(matches!(wf.phase(), WorkflowPhase::Failed { .. }));
    }

    #[test]
    fn test_result_outside_submission_is_ignored() {
        let mut wf = ready_workflow(StampType::Both);
        wf.apply(WorkflowEvent::Completed { output_path: "x".into() });
        assert_eq!(wf.phase(), &WorkflowPhase::ParamsValid);
    }

    #[test]
    fn test_non_finite_width_is_invalid() {
        let mut wf = ready_workflow(StampType::Both);
        wf.apply(WorkflowEvent::WidthChanged(f64::NAN));
        assert_eq!(wf.missing(), Some(Missing::Width));
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(download_file_name("/static/out/bid_stamped.pdf"), "bid_stamped.pdf");
        assert_eq!(download_file_name("C:\\out\\a.docx"), "a.docx");
        assert_eq!(download_file_name("/files/a.pdf?v=2"), "a.pdf");
        assert_eq!(download_file_name("/static/out/"), "stamped_output");
    }

    #[test]
    fn test_resolve_output_url() {
        assert_eq!(
            resolve_output_url("http://0.0.0.0:8000/", "/static/out/a.pdf"),
            "http://0.0.0.0:8000/static/out/a.pdf"
        );
        assert_eq!(
            resolve_output_url("http://0.0.0.0:8000", "static/out/a.pdf"),
            "http://0.0.0.0:8000/static/out/a.pdf"
        );
        assert_eq!(
            resolve_output_url("http://x", "https://cdn.example.com/a.pdf"),
            "https://cdn.example.com/a.pdf"
        );
    }
}
