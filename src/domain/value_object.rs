//! 値オブジェクト定義
//!
//! ルームコード・ルーム名・メンバー名・タイムスタンプの値オブジェクト。
//! 生成時にバリデーションを行い、不正な値はドメイン層に入り込めません。

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// ルームコード（ルームを指す唯一のアドレス、作成後は不変）
///
/// 空文字・空白のみ・内部に空白を含むコードは不正。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomCode(String);

impl RoomCode {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyRoomCode);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidRoomCode(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for RoomCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ルームの表示名（作成者が指定、不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyRoomName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メンバー名（ルーム内でフィールドを指すキー）
///
/// join 時の重複チェックは行わない設計：同名の 2 クライアントは
/// 同じフィールドを黙って共有する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberName(String);

impl MemberName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyMemberName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MemberName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// タイムスタンプ（WIB、ミリ秒単位の Unix time）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_accepts_valid_value() {
        // テスト項目: 正常なルームコードが生成できる
        // given (前提条件):
        let value = "gaming123".to_string();

        // when (操作):
        let result = RoomCode::new(value);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "gaming123");
    }

    #[test]
    fn test_room_code_trims_surrounding_whitespace() {
        // テスト項目: 前後の空白はトリムされる
        // given (前提条件):
        let value = "  abc1  ".to_string();

        // when (操作):
        let result = RoomCode::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "abc1");
    }

    #[test]
    fn test_room_code_rejects_empty_value() {
        // テスト項目: 空のルームコードは拒否される
        // given (前提条件):
        let value = "   ".to_string();

        // when (操作):
        let result = RoomCode::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), DomainError::EmptyRoomCode);
    }

    #[test]
    fn test_room_code_rejects_internal_whitespace() {
        // テスト項目: 内部に空白を含むルームコードは拒否される
        // given (前提条件):
        let value = "abc 1".to_string();

        // when (操作):
        let result = RoomCode::new(value);

        // then (期待する結果):
        assert!(matches!(result, Err(DomainError::InvalidRoomCode(_))));
    }

    #[test]
    fn test_room_name_rejects_empty_value() {
        // テスト項目: 空のルーム名は拒否される
        // given (前提条件):
        let value = "".to_string();

        // when (操作):
        let result = RoomName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), DomainError::EmptyRoomName);
    }

    #[test]
    fn test_member_name_accepts_internal_whitespace() {
        // テスト項目: メンバー名は内部の空白を許容する（表示名のため）
        // given (前提条件):
        let value = "Budi Santoso".to_string();

        // when (操作):
        let result = MemberName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "Budi Santoso");
    }

    #[test]
    fn test_member_name_rejects_empty_value() {
        // テスト項目: 空のメンバー名は拒否される
        // given (前提条件):
        let value = " ".to_string();

        // when (操作):
        let result = MemberName::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), DomainError::EmptyMemberName);
    }

    #[test]
    fn test_timestamp_preserves_value() {
        // テスト項目: タイムスタンプは与えた値をそのまま保持する
        // given (前提条件):
        let millis = 1735689600000;

        // when (操作):
        let timestamp = Timestamp::new(millis);

        // then (期待する結果):
        assert_eq!(timestamp.value(), millis);
    }
}
