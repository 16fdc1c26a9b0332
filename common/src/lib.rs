//! Bid Writer Common Library
//!
//! ブラウザ(WASM)とCLIで共有される型・状態機械・リクエスト定義

pub mod api;
pub mod background;
pub mod error;
pub mod notice;
pub mod session;
pub mod site;
pub mod split;
pub mod stamp_manager;
pub mod upload;
pub mod verification;
pub mod workflow;

pub use api::{ApiRequest, ApiResponse, LoginResponse, Method, RequestBody, StampImage};
pub use background::{BackgroundAnimation, NoAnimation};
pub use error::{Error, Result};
pub use notice::{Notice, NoticeKind};
pub use session::{MemoryStore, Session, SessionContext, SessionStore};
pub use site::Route;
pub use split::{SplitEvent, SplitState};
pub use stamp_manager::{StampCommand, StampManager, StampOutcome, StampSelection};
pub use upload::{DocumentSlot, Screened, UploadError, UploadPolicy};
pub use verification::{CodeInput, ResendCooldown, VerificationKind};
pub use workflow::{
    Missing, SmartStampRequest, StampType, StampWorkflow, WorkflowError, WorkflowEvent,
    WorkflowPhase,
};
