// ユーザーレコード
//
// メールアドレスを主キーとする唯一のエンティティ。
// HTTPボディとDynamoDBアイテムの両方で同じ属性名（camelCase）を使う。

use serde::{Deserialize, Serialize};

/// DynamoDBテーブルのパーティションキー属性名
pub const EMAIL_KEY: &str = "email";

/// ユーザーレコード
///
/// 欠落したフィールドは空文字列として扱う。
/// 空のemailは作成時のメール検証、更新時の存在確認で弾かれる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    /// メールアドレス（主キー）
    pub email: String,
    /// 名
    pub first_name: String,
    /// 姓
    pub last_name: String,
}

impl User {
    /// 新しいユーザーレコードを作成
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
