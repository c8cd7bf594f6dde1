/// ユーザーテーブルへのストレージアクセス
///
/// get/put/delete/scanの4操作（と条件付きput）だけを持つ狭いインターフェース。
/// ドメインロジックはこのトレイト越しにのみDynamoDBへ触れる。
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

use crate::domain::user::EMAIL_KEY;

/// DynamoDBアイテム（属性名 -> 属性値）
pub type Item = HashMap<String, AttributeValue>;

/// ストレージ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    /// DynamoDBからの読み取り（GetItem/Scan）に失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// DynamoDBへの書き込み（PutItem）に失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの削除（DeleteItem）に失敗
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// 条件付き書き込みの条件を満たさなかった（同じキーが既に存在）
    #[error("Conditional check failed: {0}")]
    ConditionalCheckFailed(String),
}

/// Scanの結果（1ページ分）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    /// 取得したアイテム
    pub items: Vec<Item>,
    /// 続きのページが存在する（LastEvaluatedKeyが返された）
    pub truncated: bool,
}

/// ユーザーテーブル操作用トレイト
///
/// 実際のDynamoDB実装とテスト用のインメモリ実装を差し替えられるようにする。
/// キーは常にメールアドレス。
#[async_trait]
pub trait UserTable: Send + Sync {
    /// 操作対象のテーブル名
    fn table_name(&self) -> &str;

    /// キーに完全一致するアイテムを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Item))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(StorageError::ReadError)`
    async fn get_item(&self, email: &str) -> Result<Option<Item>, StorageError>;

    /// アイテムを無条件に書き込む（既存アイテムは置き換え）
    async fn put_item(&self, item: Item) -> Result<(), StorageError>;

    /// 同じキーのアイテムが存在しない場合のみ書き込む
    ///
    /// 既に存在する場合は`Err(StorageError::ConditionalCheckFailed)`
    async fn put_item_if_absent(&self, item: Item) -> Result<(), StorageError>;

    /// キーでアイテムを削除（存在しなかった場合も成功）
    async fn delete_item(&self, email: &str) -> Result<(), StorageError>;

    /// フィルターなしでテーブルをスキャンする（1ページのみ）
    async fn scan(&self) -> Result<ScanPage, StorageError>;
}

/// UserTableのDynamoDB実装
#[derive(Debug, Clone)]
pub struct DynamoUserTable {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// ユーザーテーブル名
    table_name: String,
}

impl DynamoUserTable {
    /// 新しいDynamoUserTableを作成
    ///
    /// # 引数
    /// * `client` - プロセス起動時に一度だけ構築したDynamoDBクライアント
    /// * `table_name` - ユーザーテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn key(email: &str) -> AttributeValue {
        AttributeValue::S(email.to_string())
    }
}

#[async_trait]
impl UserTable for DynamoUserTable {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_item(&self, email: &str) -> Result<Option<Item>, StorageError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(EMAIL_KEY, Self::key(email))
            .send()
            .await
            .map_err(|e| StorageError::ReadError(DisplayErrorContext(&e).to_string()))?;

        Ok(result.item)
    }

    async fn put_item(&self, item: Item) -> Result<(), StorageError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StorageError::WriteError(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn put_item_if_absent(&self, item: Item) -> Result<(), StorageError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", EMAIL_KEY)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                let already_exists = e
                    .as_service_error()
                    .is_some_and(|err| err.is_conditional_check_failed_exception());
                if already_exists {
                    StorageError::ConditionalCheckFailed(message)
                } else {
                    StorageError::WriteError(message)
                }
            })?;

        Ok(())
    }

    async fn delete_item(&self, email: &str) -> Result<(), StorageError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(EMAIL_KEY, Self::key(email))
            .send()
            .await
            .map_err(|e| StorageError::DeleteError(DisplayErrorContext(&e).to_string()))?;

        Ok(())
    }

    async fn scan(&self) -> Result<ScanPage, StorageError> {
        let response = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| StorageError::ReadError(DisplayErrorContext(&e).to_string()))?;

        Ok(ScanPage {
            items: response.items.unwrap_or_default(),
            truncated: response.last_evaluated_key.is_some(),
        })
    }
}
