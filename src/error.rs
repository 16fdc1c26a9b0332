use bid_writer_common::upload::UploadError;
use bid_writer_common::workflow::WorkflowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BidWriterError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("尚未登录，请先执行 `bid-writer login <email>`")]
    NotLoggedIn,

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("不是有效的图片文件: {0}")]
    ImageLoad(String),

    #[error("没有可上传的文件: {0}")]
    NothingToUpload(String),

    #[error("找不到印章: {0}")]
    StampNotFound(i64),

    #[error("HTTP错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("输入错误: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析错误: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] bid_writer_common::Error),
}

impl From<WorkflowError> for BidWriterError {
    fn from(err: WorkflowError) -> Self {
        BidWriterError::Common(err.into())
    }
}

impl From<UploadError> for BidWriterError {
    fn from(err: UploadError) -> Self {
        BidWriterError::Common(err.into())
    }
}

pub type Result<T> = std::result::Result<T, BidWriterError>;
