//! スナップショット構築の純粋ロジック
//!
//! フィールドストアは変更のたびに「ルーム全体のマッピング」を配信する
//! 契約（差分ではない）なので、受信側は毎回このスナップショットから
//! 表示用の順序付きリストを再構築します。副作用を持たない純粋ロジックのみ。

use std::collections::HashMap;

use super::entity::FieldEntry;
use super::value_object::MemberName;

/// 通し番号付きのフィールドスナップショット
///
/// `seq` はルームのフィールドマッピングの変更ごとに増加する番号。
/// スナップショットの取得は書き込みと同一のクリティカルセクションで
/// 行われるため、`seq` の大小がそのまま状態の新旧を表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldsSnapshot {
    pub seq: u64,
    pub entries: Vec<FieldEntry>,
}

/// フィールドマッピングから表示用の順序付きリストを構築する
///
/// # Arguments
///
/// * `fields` - owner name からメッセージ本文へのマッピング
///
/// # Returns
///
/// owner name でソートされたフィールドリスト
pub fn build_field_list(fields: &HashMap<MemberName, String>) -> Vec<FieldEntry> {
    let mut entries: Vec<FieldEntry> = fields
        .iter()
        .map(|(owner, text)| FieldEntry {
            owner: owner.clone(),
            text: text.clone(),
        })
        .collect();

    // Sort by owner name for consistent ordering
    entries.sort_by(|a, b| a.owner.cmp(&b.owner));

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> MemberName {
        MemberName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_build_field_list_with_empty_fields() {
        // テスト項目: フィールドが空の場合、空のリストが返される
        // given (前提条件):
        let fields = HashMap::new();

        // when (操作):
        let result = build_field_list(&fields);

        // then (期待する結果):
        assert_eq!(result.len(), 0);
    }

    #[test]
    fn test_build_field_list_is_sorted_by_owner() {
        // テスト項目: 複数フィールドが owner name でソートされて返される
        // given (前提条件):
        let mut fields = HashMap::new();
        fields.insert(name("charlie"), "c".to_string());
        fields.insert(name("alice"), "a".to_string());
        fields.insert(name("bob"), "b".to_string());

        // when (操作):
        let result = build_field_list(&fields);

        // then (期待する結果):
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].owner, name("alice"));
        assert_eq!(result[0].text, "a");
        assert_eq!(result[1].owner, name("bob"));
        assert_eq!(result[2].owner, name("charlie"));
    }

}
