//! 印章管理の状態
//!
//! 通常モード: クリックで1件を選択/解除（親へ通知）
//! 一括削除モード: クリックで削除候補に追加/除外
//!
//! UIイベントを `StampCommand` として受け、ネットワーク呼び出しなど
//! 呼び出し側が行うべき処理を `StampOutcome` で返す。

use crate::api::StampImage;
use crate::notice::Notice;

/// 親コンポーネントへ通知する選択状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampSelection {
    None,
    Selected { id: i64, path: String },
}

impl StampSelection {
    /// 旧来のコールバック形式 `(id, path)`。未選択は `(-1, "")`
    pub fn as_callback_args(&self) -> (i64, &str) {
        match self {
            StampSelection::None => (-1, ""),
            StampSelection::Selected { id, path } => (*id, path.as_str()),
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            StampSelection::None => None,
            StampSelection::Selected { path, .. } => Some(path.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampCommand {
    /// 一覧取得成功
    Loaded(Vec<StampImage>),
    /// 一覧取得失敗（表示は変えない）
    LoadFailed,
    Click(usize),
    EnterBatch,
    CancelBatch,
    /// 削除ボタン（確認モーダルを開く）
    RequestDelete,
    CloseModal,
    /// モーダルで削除を確定
    ConfirmDelete,
    DeleteFinished { ok: bool },
    UploadStarted,
    UploadFinished { ok: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StampOutcome {
    SelectionChanged(StampSelection),
    /// 一括削除APIを呼ぶ
    Delete(Vec<i64>),
    /// 一覧を再取得する
    Refetch,
}

#[derive(Debug, Clone, Default)]
pub struct StampManager {
    images: Vec<StampImage>,
    /// 選択中の印章 id（並び順が変わっても追従する）
    selected: Option<i64>,
    batch_mode: bool,
    pending_delete: Vec<i64>,
    modal_open: bool,
    uploading: bool,
    deleting: bool,
    notice: Option<Notice>,
}

impl StampManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[StampImage] {
        &self.images
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.images.iter().position(|img| img.id == id)
    }

    pub fn is_batch_mode(&self) -> bool {
        self.batch_mode
    }

    pub fn pending_delete(&self) -> &[i64] {
        &self.pending_delete
    }

    pub fn is_marked_for_delete(&self, id: i64) -> bool {
        self.pending_delete.contains(&id)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn selection(&self) -> StampSelection {
        self.selected
            .and_then(|id| self.images.iter().find(|img| img.id == id))
            .map(|img| StampSelection::Selected {
                id: img.id,
                path: img.path.clone(),
            })
            .unwrap_or(StampSelection::None)
    }

    pub fn apply(&mut self, command: StampCommand) -> Vec<StampOutcome> {
        match command {
            StampCommand::Loaded(images) => {
                self.images = images;
                if self.selected.is_some() && self.selected_index().is_none() {
                    self.selected = None;
                    return vec![StampOutcome::SelectionChanged(StampSelection::None)];
                }
                Vec::new()
            }
            StampCommand::LoadFailed => {
                log::error!("failed to load stamp list");
                Vec::new()
            }
            StampCommand::Click(index) => self.click(index),
            StampCommand::EnterBatch => {
                self.batch_mode = true;
                Vec::new()
            }
            StampCommand::CancelBatch => {
                self.exit_batch();
                Vec::new()
            }
            StampCommand::RequestDelete => {
                if self.pending_delete.is_empty() {
                    self.notice = Some(Notice::error("删除失败", "请选择要删除的印章"));
                } else {
                    self.modal_open = true;
                }
                Vec::new()
            }
            StampCommand::CloseModal => {
                self.modal_open = false;
                Vec::new()
            }
            StampCommand::ConfirmDelete => {
                if self.deleting || self.pending_delete.is_empty() {
                    return Vec::new();
                }
                self.deleting = true;
                vec![StampOutcome::Delete(self.pending_delete.clone())]
            }
            StampCommand::DeleteFinished { ok } => self.finish_delete(ok),
            StampCommand::UploadStarted => {
                self.uploading = true;
                Vec::new()
            }
            StampCommand::UploadFinished { ok } => {
                self.uploading = false;
                if ok {
                    self.notice = Some(Notice::success("上传成功", "文件上传成功"));
                    vec![StampOutcome::Refetch]
                } else {
                    self.notice = Some(Notice::error("上传失败", "文件上传失败"));
                    Vec::new()
                }
            }
        }
    }

    fn click(&mut self, index: usize) -> Vec<StampOutcome> {
        let Some(id) = self.images.get(index).map(|img| img.id) else {
            return Vec::new();
        };

        if self.batch_mode {
            if let Some(pos) = self.pending_delete.iter().position(|&p| p == id) {
                self.pending_delete.remove(pos);
            } else {
                self.pending_delete.push(id);
            }
            return Vec::new();
        }

        self.selected = if self.selected == Some(id) { None } else { Some(id) };
        vec![StampOutcome::SelectionChanged(self.selection())]
    }

    fn exit_batch(&mut self) {
        self.batch_mode = false;
        self.pending_delete.clear();
    }

    fn finish_delete(&mut self, ok: bool) -> Vec<StampOutcome> {
        let mut outcomes = Vec::new();
        self.deleting = false;
        if ok {
            self.notice = Some(Notice::success("删除成功", "印章删除成功"));
            outcomes.push(StampOutcome::Refetch);
        } else {
            self.notice = Some(Notice::error("删除失败", "印章删除失败"));
        }

        self.exit_batch();
        self.modal_open = false;
        if self.selected.take().is_some() {
            outcomes.push(StampOutcome::SelectionChanged(StampSelection::None));
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_with(n: i64) -> StampManager {
        let mut manager = StampManager::new();
        let images = (1..=n)
            .map(|id| StampImage { id, path: format!("/stamps/{}.png", id) })
            .collect();
        manager.apply(StampCommand::Loaded(images));
        manager
    }

    #[test]
    fn test_select_then_reclick_deselects() {
        let mut manager = manager_with(5);

        let out = manager.apply(StampCommand::Click(2));
        assert_eq!(
            out,
            vec![StampOutcome::SelectionChanged(StampSelection::Selected {
                id: 3,
                path: "/stamps/3.png".into()
            })]
        );
        assert_eq!(manager.selected_index(), Some(2));

        let out = manager.apply(StampCommand::Click(2));
        assert_eq!(manager.selected_index(), None);
        match &out[..] {
            [StampOutcome::SelectionChanged(sel)] => assert_eq!(sel.as_callback_args(), (-1, "")),
            other => panic!("unexpected outcomes: {:?}", other),
        }
    }

    #[test]
    fn test_select_other_replaces_selection() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::Click(0));
        manager.apply(StampCommand::Click(1));
        assert_eq!(manager.selection().path(), Some("/stamps/2.png"));
    }

    #[test]
    fn test_batch_cancel_clears_without_delete() {
        let mut manager = manager_with(6);
        manager.apply(StampCommand::EnterBatch);
        // id 3 と id 5
        assert!(manager.apply(StampCommand::Click(2)).is_empty());
        assert!(manager.apply(StampCommand::Click(4)).is_empty());
        assert_eq!(manager.pending_delete(), &[3, 5]);

        let out = manager.apply(StampCommand::CancelBatch);
        assert!(out.iter().all(|o| !matches!(o, StampOutcome::Delete(_))));
        assert!(!manager.is_batch_mode());
        assert!(manager.pending_delete().is_empty());
    }

    #[test]
    fn test_batch_click_toggles_membership() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::EnterBatch);
        manager.apply(StampCommand::Click(0));
        manager.apply(StampCommand::Click(0));
        assert!(manager.pending_delete().is_empty());
        // 一括モード中は単一選択に触れない
        assert_eq!(manager.selected_index(), None);
    }

    #[test]
    fn test_request_delete_with_empty_set_shows_error() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::EnterBatch);
        manager.apply(StampCommand::RequestDelete);
        assert!(!manager.is_modal_open());
        let notice = manager.take_notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, "请选择要删除的印章");
    }

    #[test]
    fn test_confirm_delete_flow() {
        let mut manager = manager_with(4);
        manager.apply(StampCommand::Click(1));
        manager.apply(StampCommand::EnterBatch);
        manager.apply(StampCommand::Click(0));
        manager.apply(StampCommand::Click(3));
        manager.apply(StampCommand::RequestDelete);
        assert!(manager.is_modal_open());

        let out = manager.apply(StampCommand::ConfirmDelete);
        assert_eq!(out, vec![StampOutcome::Delete(vec![1, 4])]);
        assert!(manager.is_deleting());
        // 二重確定は無視
        assert!(manager.apply(StampCommand::ConfirmDelete).is_empty());

        let out = manager.apply(StampCommand::DeleteFinished { ok: true });
        assert_eq!(
            out,
            vec![
                StampOutcome::Refetch,
                StampOutcome::SelectionChanged(StampSelection::None)
            ]
        );
        assert!(!manager.is_batch_mode());
        assert!(!manager.is_modal_open());
        assert!(manager.pending_delete().is_empty());
        assert_eq!(manager.take_notice().unwrap().title, "删除成功");
    }

    #[test]
    fn test_failed_delete_keeps_list_and_exits_batch() {
        let mut manager = manager_with(2);
        manager.apply(StampCommand::EnterBatch);
        manager.apply(StampCommand::Click(0));
        manager.apply(StampCommand::ConfirmDelete);
        let out = manager.apply(StampCommand::DeleteFinished { ok: false });
        assert!(out.is_empty());
        assert_eq!(manager.images().len(), 2);
        assert!(!manager.is_batch_mode());
        assert!(manager.take_notice().unwrap().is_error());
    }

    #[test]
    fn test_load_failure_keeps_previous_state() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::Click(2));
        manager.apply(StampCommand::LoadFailed);
        assert_eq!(manager.images().len(), 3);
        assert_eq!(manager.selected_index(), Some(2));
    }

    #[test]
    fn test_shrinking_list_drops_stale_selection() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::Click(2));
        let out = manager.apply(StampCommand::Loaded(vec![StampImage { id: 1, path: "a".into() }]));
        assert_eq!(out, vec![StampOutcome::SelectionChanged(StampSelection::None)]);
    }

    #[test]
    fn test_selection_follows_id_after_reorder() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::Click(1));
        assert_eq!(manager.selected_id(), Some(2));

        let reordered = [3, 1, 2]
            .into_iter()
            .map(|id| StampImage { id, path: format!("/stamps/{}.png", id) })
            .collect();
        let out = manager.apply(StampCommand::Loaded(reordered));
        assert!(out.is_empty());
        assert_eq!(manager.selected_index(), Some(2));
        assert_eq!(
            manager.selection(),
            StampSelection::Selected { id: 2, path: "/stamps/2.png".into() }
        );
    }

    #[test]
    fn test_removed_selection_notifies_parent() {
        let mut manager = manager_with(3);
        manager.apply(StampCommand::Click(0));
        let remaining = vec![
            StampImage { id: 2, path: "/stamps/2.png".into() },
            StampImage { id: 3, path: "/stamps/3.png".into() },
        ];
        let out = manager.apply(StampCommand::Loaded(remaining));
        assert_eq!(out, vec![StampOutcome::SelectionChanged(StampSelection::None)]);
        assert_eq!(manager.selected_id(), None);
    }

    #[test]
    fn test_upload_success_refetches() {
        let mut manager = manager_with(1);
        manager.apply(StampCommand::UploadStarted);
        assert!(manager.is_uploading());
        let out = manager.apply(StampCommand::UploadFinished { ok: true });
        assert_eq!(out, vec![StampOutcome::Refetch]);
        assert!(!manager.is_uploading());
    }
}
