//! 盖章（文書アップロード → 印章選択 → 盖章 → ダウンロード）

use super::{require_login, spinner};
use crate::client::HttpClient;
use crate::error::{BidWriterError, Result};
use crate::scanner;
use bid_writer_common::api::StampImage;
use bid_writer_common::workflow::{
    download_file_name, resolve_output_url, SmartStampRequest, StampType, StampWorkflow, WorkflowEvent,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SmartStampArgs {
    pub document: PathBuf,
    pub stamp_id: Option<i64>,
    pub stamp_path: Option<String>,
    pub stamp_type: StampType,
    pub width: f64,
    pub offset: f64,
    pub output: Option<PathBuf>,
}

/// 入力を一通り流し込み、送信するリクエストを得る
pub fn prepare_workflow(
    documents: Vec<String>,
    stamp_path: String,
    stamp_type: StampType,
    width: f64,
    offset: f64,
) -> Result<(StampWorkflow, SmartStampRequest)> {
    let mut workflow = StampWorkflow::new();
    let events = [
        WorkflowEvent::DocumentsStaged(documents),
        WorkflowEvent::StampSelected(Some(stamp_path)),
        WorkflowEvent::WidthChanged(width),
        WorkflowEvent::OffsetChanged(offset),
        WorkflowEvent::TypeChanged(Some(stamp_type)),
    ];
    for event in events {
        workflow.apply(event);
    }
    let request = workflow.submit()?;
    Ok((workflow, request))
}

pub fn find_stamp_path(stamps: &[StampImage], id: i64) -> Result<String> {
    stamps
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.path.clone())
        .ok_or(BidWriterError::StampNotFound(id))
}

/// `--output` 優先。なければ保存先フォルダ + サーバー側のファイル名
pub fn output_destination(output: Option<PathBuf>, download_dir: &Path, server_path: &str) -> PathBuf {
    output.unwrap_or_else(|| download_dir.join(download_file_name(server_path)))
}

pub async fn run(client: &HttpClient, args: SmartStampArgs, download_dir: &Path) -> Result<PathBuf> {
    require_login(client.session())?;

    println!("[1/4] 上传文件...");
    let document = scanner::prepare_document(&args.document)?;
    let bar = spinner("上传中...");
    let uploaded = client.upload_files(vec![document.path.clone()]).await;
    bar.finish_and_clear();
    let uploaded = uploaded?;
    if uploaded.is_empty() {
        return Err(BidWriterError::NothingToUpload(document.file_name));
    }
    println!("✔ {}\n", document.file_name);

    println!("[2/4] 选择印章...");
    let stamp_path = match (args.stamp_path, args.stamp_id) {
        (Some(path), _) => path,
        (None, Some(id)) => find_stamp_path(&client.list_stamps().await?, id)?,
        (None, None) => String::new(),
    };
    let (mut workflow, request) =
        prepare_workflow(uploaded, stamp_path, args.stamp_type, args.width, args.offset)?;
    println!("✔ {} ({})\n", request.stamp_file, request.stamp_type.label());

    println!("[3/4] 盖章中...");
    let bar = spinner("等待服务器处理...");
    let result = client.smart_stamp(&request).await;
    bar.finish_and_clear();
    let output_path = match result {
        Ok(path) => {
            workflow.apply(WorkflowEvent::Completed { output_path: path.clone() });
            path
        }
        Err(e) => {
            workflow.apply(WorkflowEvent::Failed { message: e.to_string() });
            return Err(e);
        }
    };
    println!("✔ {}\n", output_path);

    println!("[4/4] 下载结果...");
    let dest = output_destination(args.output, download_dir, &output_path);
    let url = resolve_output_url(client.base_url(), &output_path);
    let bytes = client.download(&url, &dest).await?;
    println!("✔ 已保存: {} ({} bytes)", dest.display(), bytes);

    println!("\n✅ 盖章完成");
    Ok(dest)
}
