/// ユーザーレコード操作
///
/// UserTableとメール検証を組み合わせて、取得・一覧・作成・更新・削除の
/// ドメイン操作を提供する。各操作は1回のリクエストで完結し状態を持たない。
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{is_valid_email, User};
use crate::infrastructure::{Item, StorageError, UserTable};

/// ユーザー操作のエラー型
///
/// Displayの文字列はそのままHTTPレスポンスのエラーメッセージになる。
/// 原因（ストレージやシリアライズのエラー）はsourceとして保持し、クライアントには返さない。
#[derive(Debug, Error)]
pub enum UserError {
    /// リクエストボディがユーザーレコードとして解釈できない
    #[error("invalid user data")]
    InvalidInput(#[source] serde_json::Error),

    /// メールアドレスの構文が不正
    #[error("invalid email")]
    InvalidEmail,

    /// 指定したメールアドレスのユーザーが存在しない
    #[error("user does not exist")]
    NotFound,

    /// 同じメールアドレスのユーザーが既に存在する
    #[error("user already exists")]
    AlreadyExists,

    /// ユーザーをDynamoDBアイテムに変換できない
    #[error("could not marshal item")]
    Encode(#[source] serde_dynamo::Error),

    /// DynamoDBアイテムをユーザーに変換できない
    #[error("failed to unmarshal record")]
    Decode(#[source] serde_dynamo::Error),

    /// GetItem/Scanの失敗
    #[error("failed to fetch record")]
    Fetch(#[source] StorageError),

    /// PutItemの失敗
    #[error("could not put item")]
    Write(#[source] StorageError),

    /// DeleteItemの失敗
    #[error("could not delete item")]
    Delete(#[source] StorageError),
}

/// ユーザーレコード操作サービス
pub struct UserService<T>
where
    T: UserTable,
{
    /// ユーザーテーブル
    table: T,
}

impl<T> UserService<T>
where
    T: UserTable,
{
    /// 新しいUserServiceを作成
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// 操作対象のテーブルへの参照を取得
    pub fn table(&self) -> &T {
        &self.table
    }

    /// メールアドレスでユーザーを1件取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(User)`
    /// * 存在しない場合は`Err(UserError::NotFound)`
    /// * 取得失敗は`Err(UserError::Fetch)`、変換失敗は`Err(UserError::Decode)`
    pub async fn fetch_one(&self, email: &str) -> Result<User, UserError> {
        let item = self
            .table
            .get_item(email)
            .await
            .map_err(UserError::Fetch)?
            .ok_or(UserError::NotFound)?;

        decode(item)
    }

    /// テーブル全体をスキャンして全ユーザーを取得
    ///
    /// 順序はバックエンド依存。取得するのは最初の1ページのみで、
    /// 続きがある場合は警告ログを出して打ち切る。
    pub async fn fetch_all(&self) -> Result<Vec<User>, UserError> {
        let page = self.table.scan().await.map_err(UserError::Fetch)?;

        if page.truncated {
            warn!(
                table = self.table.table_name(),
                returned = page.items.len(),
                "スキャン結果が1ページを超えたため打ち切り"
            );
        }

        page.items.into_iter().map(decode).collect()
    }

    /// リクエストボディからユーザーを作成
    ///
    /// # 処理フロー
    /// 1. ボディをユーザーとしてパース
    /// 2. メールアドレスを検証
    /// 3. 同じメールアドレスの既存ユーザーを確認
    /// 4. 存在しない場合のみ書き込む条件付きPutで保存
    ///
    /// 3と4の間に別リクエストが同じキーを書き込んだ場合も、
    /// 条件付きPutが失敗して`AlreadyExists`になる。
    pub async fn create(&self, body: &[u8]) -> Result<User, UserError> {
        let user = parse_body(body)?;

        if !is_valid_email(&user.email) {
            return Err(UserError::InvalidEmail);
        }

        match self.fetch_one(&user.email).await {
            Ok(existing) if !existing.email.is_empty() => return Err(UserError::AlreadyExists),
            // 変換できない既存アイテムは条件付きPutで検出する
            Ok(_) | Err(UserError::NotFound) | Err(UserError::Decode(_)) => {}
            Err(err) => return Err(err),
        }

        let item = encode(&user)?;
        self.table
            .put_item_if_absent(item)
            .await
            .map_err(|err| match err {
                StorageError::ConditionalCheckFailed(_) => UserError::AlreadyExists,
                other => UserError::Write(other),
            })?;

        debug!(email = %user.email, "ユーザー作成完了");
        Ok(user)
    }

    /// リクエストボディで既存ユーザーを置き換える
    ///
    /// マージではなく全体の置き換え。存在確認と書き込みはアトミックではない。
    pub async fn update(&self, body: &[u8]) -> Result<User, UserError> {
        let user = parse_body(body)?;

        // 空キーはDynamoDBがValidationExceptionで拒否するため問い合わせない
        if user.email.is_empty() {
            return Err(UserError::NotFound);
        }

        match self.fetch_one(&user.email).await {
            Ok(existing) if !existing.email.is_empty() => {}
            Ok(_) | Err(UserError::NotFound) => return Err(UserError::NotFound),
            Err(err) => return Err(err),
        }

        let item = encode(&user)?;
        self.table.put_item(item).await.map_err(UserError::Write)?;

        debug!(email = %user.email, "ユーザー更新完了");
        Ok(user)
    }

    /// メールアドレスでユーザーを削除
    ///
    /// 存在確認は行わないため、存在しなかった場合も成功する。
    pub async fn delete(&self, email: &str) -> Result<(), UserError> {
        self.table
            .delete_item(email)
            .await
            .map_err(UserError::Delete)?;

        debug!(email = email, "ユーザー削除完了");
        Ok(())
    }
}

fn parse_body(body: &[u8]) -> Result<User, UserError> {
    serde_json::from_slice(body).map_err(UserError::InvalidInput)
}

fn encode(user: &User) -> Result<Item, UserError> {
    serde_dynamo::to_item(user).map_err(UserError::Encode)
}

fn decode(item: Item) -> Result<User, UserError> {
    serde_dynamo::from_item(item).map_err(UserError::Decode)
}
