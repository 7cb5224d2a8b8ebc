//! Session Binder: client-side session state machine and local room view.
//!
//! The room view is a local cache of the remote field mapping. It is written
//! from exactly two sources: optimistic local edits (for zero-latency echo)
//! and authoritative subscription snapshots, with the authoritative side
//! always winning on conflict. No other code path mutates it.

use crate::client::error::ClientError;

/// Session lifecycle: `Unjoined -> Joining -> Active -> Left`.
///
/// There is no rename transition; changing the display name is modeled as
/// leaving and rejoining with a new identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unjoined,
    Joining,
    Active,
    Left,
}

/// One field as seen by this client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub text: String,
}

/// Client-side session binder
#[derive(Debug)]
pub struct SessionBinder {
    state: SessionState,
    room_code: String,
    member_name: String,
    room_name: Option<String>,
    my_message: String,
    others: Vec<FieldView>,
    /// Sequence number of the last applied snapshot. Snapshots from
    /// concurrent server-side updates may arrive out of order; anything
    /// older than this is discarded.
    last_seq: u64,
}

impl SessionBinder {
    /// Create a binder in the `Unjoined` state.
    ///
    /// Validates the room code and display name locally, before any network
    /// call; empty values never leave the client.
    pub fn new(room_code: &str, member_name: &str) -> Result<Self, ClientError> {
        let room_code = room_code.trim();
        let member_name = member_name.trim();
        if room_code.is_empty() {
            return Err(ClientError::InvalidInput(
                "room code must not be empty".to_string(),
            ));
        }
        if member_name.is_empty() {
            return Err(ClientError::InvalidInput(
                "display name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            state: SessionState::Unjoined,
            room_code: room_code.to_string(),
            member_name: member_name.to_string(),
            room_name: None,
            my_message: String::new(),
            others: Vec::new(),
            last_seq: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn room_name(&self) -> Option<&str> {
        self.room_name.as_deref()
    }

    pub fn my_message(&self) -> &str {
        &self.my_message
    }

    pub fn others(&self) -> &[FieldView] {
        &self.others
    }

    /// Number of sessions visible in the room, including this one
    pub fn active_member_count(&self) -> usize {
        self.others.len() + 1
    }

    /// `Unjoined -> Joining`: a join request is on the wire.
    pub fn begin_join(&mut self) -> Result<(), ClientError> {
        if self.state != SessionState::Unjoined {
            return Err(ClientError::InvalidTransition(format!(
                "begin_join from {:?}",
                self.state
            )));
        }
        self.state = SessionState::Joining;
        Ok(())
    }

    /// `Joining -> Active`: the server confirmed the room.
    pub fn activate(&mut self, room_name: String) -> Result<(), ClientError> {
        if self.state != SessionState::Joining {
            return Err(ClientError::InvalidTransition(format!(
                "activate from {:?}",
                self.state
            )));
        }
        self.state = SessionState::Active;
        self.room_name = Some(room_name);
        Ok(())
    }

    /// `-> Left`: explicit navigation away or connection loss. Idempotent.
    pub fn leave(&mut self) {
        self.state = SessionState::Left;
    }

    /// Optimistic local edit: update my message immediately, before the
    /// server confirms. The caller is responsible for issuing the write.
    ///
    /// Returns `false` (and changes nothing) unless the session is `Active`.
    pub fn update_my_message(&mut self, text: &str) -> bool {
        if self.state != SessionState::Active {
            return false;
        }
        self.my_message = text.to_string();
        true
    }

    /// Authoritative snapshot from the server: replaces the whole view,
    /// including my own field (the server-confirmed echo wins over any
    /// optimistic edit still in flight).
    ///
    /// `seq` orders snapshots across concurrent server-side updates. A
    /// snapshot older than the last applied one is discarded and `false`
    /// is returned; the caller should skip redrawing in that case.
    pub fn apply_snapshot(&mut self, seq: u64, fields: Vec<FieldView>) -> bool {
        if seq < self.last_seq {
            return false;
        }
        self.last_seq = seq;

        let mut others = Vec::with_capacity(fields.len());
        for field in fields {
            if field.name == self.member_name {
                self.my_message = field.text;
            } else {
                others.push(field);
            }
        }
        others.sort_by(|a, b| a.name.cmp(&b.name));
        self.others = others;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_binder() -> SessionBinder {
        let mut binder = SessionBinder::new("abc1", "alice").unwrap();
        binder.begin_join().unwrap();
        binder.activate("Test".to_string()).unwrap();
        binder
    }

    fn field(name: &str, text: &str) -> FieldView {
        FieldView {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_new_binder_starts_unjoined() {
        // テスト項目: 新規バインダは Unjoined 状態で始まる
        // given (前提条件):

        // when (操作):
        let binder = SessionBinder::new("abc1", "alice").unwrap();

        // then (期待する結果):
        assert_eq!(binder.state(), SessionState::Unjoined);
        assert_eq!(binder.my_message(), "");
        assert!(binder.others().is_empty());
    }

    #[test]
    fn test_new_binder_rejects_empty_code() {
        // テスト項目: 空のルームコードはネットワーク呼び出し前に拒否される
        // given (前提条件):

        // when (操作):
        let result = SessionBinder::new("  ", "alice");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_new_binder_rejects_empty_name() {
        // テスト項目: 空の表示名はネットワーク呼び出し前に拒否される
        // given (前提条件):

        // when (操作):
        let result = SessionBinder::new("abc1", "");

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidInput(_))));
    }

    #[test]
    fn test_full_lifecycle_transitions() {
        // テスト項目: Unjoined -> Joining -> Active -> Left と遷移できる
        // given (前提条件):
        let mut binder = SessionBinder::new("abc1", "alice").unwrap();

        // when (操作) / then (期待する結果):
        binder.begin_join().unwrap();
        assert_eq!(binder.state(), SessionState::Joining);

        binder.activate("Test".to_string()).unwrap();
        assert_eq!(binder.state(), SessionState::Active);
        assert_eq!(binder.room_name(), Some("Test"));

        binder.leave();
        assert_eq!(binder.state(), SessionState::Left);
    }

    #[test]
    fn test_activate_requires_joining_state() {
        // テスト項目: Joining を経ずに activate すると拒否される
        // given (前提条件):
        let mut binder = SessionBinder::new("abc1", "alice").unwrap();

        // when (操作):
        let result = binder.activate("Test".to_string());

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::InvalidTransition(_))));
        assert_eq!(binder.state(), SessionState::Unjoined);
    }

    #[test]
    fn test_leave_is_idempotent() {
        // テスト項目: leave は何度呼んでも Left のまま
        // given (前提条件):
        let mut binder = active_binder();

        // when (操作):
        binder.leave();
        binder.leave();

        // then (期待する結果):
        assert_eq!(binder.state(), SessionState::Left);
    }

    #[test]
    fn test_update_my_message_is_optimistic() {
        // テスト項目: update_my_message は購読確認を待たずローカルへ反映される
        // given (前提条件):
        let mut binder = active_binder();

        // when (操作):
        let accepted = binder.update_my_message("hi");

        // then (期待する結果):
        assert!(accepted);
        assert_eq!(binder.my_message(), "hi");
    }

    #[test]
    fn test_update_my_message_rejected_unless_active() {
        // テスト項目: Active 以外の状態での編集は受け付けない
        // given (前提条件):
        let mut binder = SessionBinder::new("abc1", "alice").unwrap();

        // when (操作):
        let accepted = binder.update_my_message("hi");

        // then (期待する結果):
        assert!(!accepted);
        assert_eq!(binder.my_message(), "");
    }

    #[test]
    fn test_apply_snapshot_separates_own_field_and_sorts_others() {
        // テスト項目: スナップショットで自分のフィールドが分離され、他はソートされる
        // given (前提条件):
        let mut binder = active_binder();

        // when (操作):
        binder.apply_snapshot(1, vec![
            field("charlie", "c"),
            field("alice", "hi"),
            field("bob", ""),
        ]);

        // then (期待する結果):
        assert_eq!(binder.my_message(), "hi");
        assert_eq!(binder.others().len(), 2);
        assert_eq!(binder.others()[0].name, "bob");
        assert_eq!(binder.others()[1].name, "charlie");
        assert_eq!(binder.active_member_count(), 3);
    }

    #[test]
    fn test_authoritative_snapshot_wins_over_optimistic_edit() {
        // テスト項目: 権威スナップショットは楽観的編集を上書きする
        // given (前提条件):
        let mut binder = active_binder();
        binder.update_my_message("typing...");

        // when (操作): サーバ確認済みの値は "" （enter-to-clear 後のエコー）
        binder.apply_snapshot(1, vec![field("alice", "")]);

        // then (期待する結果):
        assert_eq!(binder.my_message(), "");
    }

    #[test]
    fn test_apply_snapshot_replaces_previous_view() {
        // テスト項目: スナップショットは差分ではなく全置換である
        // given (前提条件):
        let mut binder = active_binder();
        binder.apply_snapshot(1, vec![field("alice", "hi"), field("bob", "halo")]);

        // when (操作): bob が切断した後のスナップショット
        binder.apply_snapshot(2, vec![field("alice", "hi")]);

        // then (期待する結果): bob のフィールドは残らない
        assert!(binder.others().is_empty());
        assert_eq!(binder.active_member_count(), 1);
    }

    #[test]
    fn test_stale_snapshot_is_discarded() {
        // テスト項目: 並行更新のスナップショットが逆順で届いても、古い seq の
        //             スナップショットは破棄され、最終ビューが巻き戻らない
        // given (前提条件): 新しい方のスナップショット（bob の "yo" を含む）を
        // 先に適用済み
        let mut binder = active_binder();
        assert!(binder.apply_snapshot(2, vec![field("alice", ""), field("bob", "yo")]));

        // when (操作): 逆順で届いた古いスナップショット（bob が未反映）
        let applied = binder.apply_snapshot(1, vec![field("alice", "")]);

        // then (期待する結果): 破棄され、bob の "yo" は残る
        assert!(!applied);
        assert_eq!(binder.others().len(), 1);
        assert_eq!(binder.others()[0].name, "bob");
        assert_eq!(binder.others()[0].text, "yo");
    }

    #[test]
    fn test_snapshot_with_equal_seq_is_applied() {
        // テスト項目: 同じ seq のスナップショット（join 時の再配信など）は
        //             適用される
        // given (前提条件):
        let mut binder = active_binder();
        binder.apply_snapshot(3, vec![field("alice", "hi")]);

        // when (操作):
        let applied = binder.apply_snapshot(3, vec![field("alice", "hi")]);

        // then (期待する結果):
        assert!(applied);
        assert_eq!(binder.my_message(), "hi");
    }
}
