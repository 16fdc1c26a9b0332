//! 印章の一覧・アップロード・削除
//!
//! 画面と同じ `StampManager` を通して状態を進め、通知もそこから受け取る。

use super::{print_notice, require_login, spinner};
use crate::client::HttpClient;
use crate::error::{BidWriterError, Result};
use crate::scanner;
use bid_writer_common::api::StampImage;
use bid_writer_common::stamp_manager::{StampCommand, StampManager, StampOutcome};
use dialoguer::Confirm;
use std::path::PathBuf;

fn notify(manager: &mut StampManager) {
    if let Some(notice) = manager.take_notice() {
        print_notice(&notice);
    }
}

pub async fn list(client: &HttpClient) -> Result<Vec<StampImage>> {
    require_login(client.session())?;
    let stamps = client.list_stamps().await?;

    if stamps.is_empty() {
        println!("你的印章将上传到这里，快去上传吧 ！");
        return Ok(stamps);
    }
    println!("{:>6}  PATH", "ID");
    for stamp in &stamps {
        println!("{:>6}  {}", stamp.id, stamp.path);
    }
    Ok(stamps)
}

pub async fn upload(client: &HttpClient, inputs: &[PathBuf]) -> Result<()> {
    require_login(client.session())?;
    let files = scanner::prepare_stamp_images(inputs)?;
    for file in &files {
        println!("- {}", file.path.display());
    }

    let mut manager = StampManager::new();
    manager.apply(StampCommand::UploadStarted);

    let bar = spinner("上传中...");
    let result = client
        .upload_stamps(files.into_iter().map(|f| f.path).collect())
        .await;
    bar.finish_and_clear();

    if let Err(e) = &result {
        log::error!("stamp upload failed: {}", e);
    }
    let outcomes = manager.apply(StampCommand::UploadFinished { ok: result.is_ok() });
    notify(&mut manager);

    if outcomes.contains(&StampOutcome::Refetch) {
        list(client).await?;
    }
    result
}

/// 一括削除モードで `ids` を選んで確定した状態を作る
pub fn plan_delete(stamps: Vec<StampImage>, ids: &[i64]) -> Result<(StampManager, Vec<i64>)> {
    let mut manager = StampManager::new();
    manager.apply(StampCommand::Loaded(stamps));
    manager.apply(StampCommand::EnterBatch);

    for id in ids {
        let index = manager
            .images()
            .iter()
            .position(|s| s.id == *id)
            .ok_or(BidWriterError::StampNotFound(*id))?;
        if !manager.is_marked_for_delete(*id) {
            manager.apply(StampCommand::Click(index));
        }
    }

    manager.apply(StampCommand::RequestDelete);
    if let Some(notice) = manager.take_notice() {
        return Err(bid_writer_common::Error::Validation(notice.message).into());
    }

    let ids = manager
        .apply(StampCommand::ConfirmDelete)
        .into_iter()
        .find_map(|outcome| match outcome {
            StampOutcome::Delete(ids) => Some(ids),
            _ => None,
        })
        .unwrap_or_default();
    Ok((manager, ids))
}

pub async fn delete(client: &HttpClient, ids: &[i64], yes: bool) -> Result<()> {
    require_login(client.session())?;
    let stamps = client.list_stamps().await?;
    let (mut manager, ids) = plan_delete(stamps, ids)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("你是否确认要删除已选择的印章 ({}个)", ids.len()))
            .default(false)
            .interact()?;
        if !confirmed {
            manager.apply(StampCommand::CloseModal);
            println!("已取消");
            return Ok(());
        }
    }

    let result = client.delete_stamps(&ids).await;
    if let Err(e) = &result {
        log::error!("stamp delete failed: {}", e);
    }
    manager.apply(StampCommand::DeleteFinished { ok: result.is_ok() });
    notify(&mut manager);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamps() -> Vec<StampImage> {
        (1..=5)
            .map(|id| StampImage { id, path: format!("/stamps/{}.png", id) })
            .collect()
    }

    #[test]
    fn test_plan_delete_marks_each_id_once() {
        let (manager, ids) = plan_delete(stamps(), &[3, 5, 3]).unwrap();
        assert_eq!(ids, vec![3, 5]);
        assert!(manager.is_deleting());
        assert!(manager.is_modal_open());
    }

    #[test]
    fn test_plan_delete_unknown_id() {
        let err = plan_delete(stamps(), &[42]).unwrap_err();
        assert!(matches!(err, BidWriterError::StampNotFound(42)));
    }

    #[test]
    fn test_plan_delete_empty_selection() {
        let err = plan_delete(stamps(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "请选择要删除的印章");
    }
}
