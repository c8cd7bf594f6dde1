/// ユーザーCRUD HTTP Lambdaエントリポイント
///
/// API Gateway経由のHTTPリクエストを受け取り、DynamoDBのユーザーテーブルに対する
/// 取得・一覧・作成・更新・削除を行う。
///
/// DynamoDBクライアントはプロセス起動時に一度だけ構築し、
/// 各呼び出しには参照として渡す。
use lambda_http::{run, service_fn, Error, Request};
use tracing::info;
use user_api::application::{UserRequestHandler, UserService};
use user_api::infrastructure::{init_logging, DynamoUserTable, UserApiConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 環境変数から設定を読み込み
    let config = UserApiConfig::from_env()?;
    let client = config.dynamodb_client().await;

    info!(
        region = config.region().unwrap_or("(default)"),
        table = config.table_name(),
        "ユーザーAPI Lambda関数を初期化"
    );

    let table = DynamoUserTable::new(client, config.table_name().to_string());
    let handler = UserRequestHandler::new(UserService::new(table));
    let handler = &handler;

    // Lambda関数を実行
    run(service_fn(move |request: Request| async move {
        Ok::<_, Error>(handler.handle(&request).await)
    }))
    .await
}
