use super::spinner;
use crate::client::HttpClient;
use crate::error::{BidWriterError, Result};
use crate::scanner;
use std::path::PathBuf;

/// 汎用アップロード。サーバー側パスを1行ずつ表示
pub async fn run(client: &HttpClient, inputs: &[PathBuf]) -> Result<Vec<String>> {
    super::require_login(client.session())?;

    let files = scanner::prepare_uploads(inputs)?;
    println!("- {}个文件", files.len());

    let bar = spinner("上传中...");
    let result = client
        .upload_files(files.into_iter().map(|f| f.path).collect())
        .await;
    bar.finish_and_clear();

    let paths = result?;
    if paths.is_empty() {
        return Err(BidWriterError::NothingToUpload("服务器未返回文件路径".into()));
    }
    for path in &paths {
        println!("{}", path);
    }
    println!("✔ 上传完毕");
    Ok(paths)
}
