/// ユーザーAPIの実行時設定
///
/// 環境変数からリージョンとテーブル名を読み込み、
/// DynamoDBクライアントを構築する。
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// リージョン指定用の環境変数名
pub const REGION_ENV: &str = "AWS_REGION";
/// テーブル名指定用の環境変数名
pub const TABLE_ENV: &str = "USERS_TABLE";
/// テーブル名が未指定の場合のデフォルト（既存デプロイのテーブル名）
pub const DEFAULT_TABLE_NAME: &str = "LambdaInGoUser";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Environment variable is empty: {0}")]
    EmptyEnvVar(String),
}

/// ユーザーAPIの設定
#[derive(Debug, Clone, PartialEq)]
pub struct UserApiConfig {
    /// DynamoDB接続先リージョン（未指定ならaws-configのデフォルトチェーン）
    region: Option<String>,
    /// ユーザーテーブル名
    table_name: String,
}

impl UserApiConfig {
    /// 明示的な値で設定を作成（テスト用）
    pub fn new(region: Option<String>, table_name: String) -> Self {
        Self { region, table_name }
    }

    /// プロセスの環境変数から設定を読み込む
    ///
    /// 環境変数:
    /// - AWS_REGION: DynamoDBのリージョン（任意）
    /// - USERS_TABLE: ユーザーテーブル名（任意、デフォルトは`LambdaInGoUser`）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のルックアップ関数から設定を読み込む
    ///
    /// 空文字列のリージョンは未指定として扱う。
    /// テーブル名は設定されているのに空の場合はエラー。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let region = lookup(REGION_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let table_name = match lookup(TABLE_ENV) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyEnvVar(TABLE_ENV.to_string()));
            }
            Some(value) => value.trim().to_string(),
            None => DEFAULT_TABLE_NAME.to_string(),
        };

        Ok(Self { region, table_name })
    }

    /// リージョンを取得
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// AWS設定を読み込みDynamoDBクライアントを作成する
    ///
    /// 認証情報はaws-configのデフォルトチェーンで解決する。
    pub async fn dynamodb_client(&self) -> DynamoDbClient {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let aws_config = loader.load().await;
        DynamoDbClient::new(&aws_config)
    }
}
