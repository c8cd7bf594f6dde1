/// ユーザーAPIリクエストハンドラー
///
/// HTTPメソッドとemailクエリパラメータから1つのユーザー操作を選び、
/// 結果をJSONレスポンスに整形する。呼び出し間で状態は持たない。
///
/// | メソッド | 条件 | 操作 | 成功 |
/// |---|---|---|---|
/// | GET | emailあり | fetch_one | 200 |
/// | GET | emailなし | fetch_all | 200 |
/// | POST | - | create | 201 |
/// | PUT | - | update | 200 |
/// | DELETE | emailあり | delete | 200 |
///
/// 失敗はエラー種別に関係なく400。DELETEでemailが無い場合も400、
/// それ以外のメソッドは405。
use lambda_http::http::Method;
use lambda_http::{Body, Request, RequestExt, Response};
use tracing::debug;

use crate::application::api_response::EMAIL_REQUIRED_MESSAGE;
use crate::application::{ApiResponse, UserError, UserService};
use crate::infrastructure::UserTable;

/// emailを指定するクエリパラメータ名
pub const EMAIL_PARAM: &str = "email";

/// ユーザーAPIリクエストハンドラー
pub struct UserRequestHandler<T>
where
    T: UserTable,
{
    /// ユーザー操作サービス
    service: UserService<T>,
}

impl<T> UserRequestHandler<T>
where
    T: UserTable,
{
    /// 新しいハンドラーを作成
    pub fn new(service: UserService<T>) -> Self {
        Self { service }
    }

    /// Lambda HTTPリクエストを処理してレスポンスを返す
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let email = request
            .query_string_parameters_ref()
            .and_then(|params| params.first(EMAIL_PARAM));
        let body: &[u8] = request.body();

        debug!(
            method = %request.method(),
            email = email.unwrap_or(""),
            body_length = body.len(),
            table = self.service.table().table_name(),
            "リクエスト受信"
        );

        self.dispatch(request.method(), email, body)
            .await
            .into_response()
    }

    /// メソッドに応じて操作を選択する
    ///
    /// 空文字列のemailは指定なしとして扱う。
    pub async fn dispatch(&self, method: &Method, email: Option<&str>, body: &[u8]) -> ApiResponse {
        let email = email.filter(|e| !e.is_empty());

        match *method {
            Method::GET => match email {
                Some(email) => respond(self.service.fetch_one(email).await, ApiResponse::ok),
                None => respond(self.service.fetch_all().await, ApiResponse::ok),
            },
            Method::POST => respond(self.service.create(body).await, ApiResponse::created),
            Method::PUT => respond(self.service.update(body).await, ApiResponse::ok),
            Method::DELETE => match email {
                Some(email) => respond(self.service.delete(email).await, ApiResponse::ok),
                None => ApiResponse::bad_request(EMAIL_REQUIRED_MESSAGE),
            },
            _ => {
                debug!(method = %method, "未対応のメソッド");
                ApiResponse::method_not_allowed()
            }
        }
    }
}

/// 操作結果をレスポンスに変換する（エラーはすべて400）
fn respond<V>(result: Result<V, UserError>, on_success: fn(&V) -> ApiResponse) -> ApiResponse {
    match result {
        Ok(value) => on_success(&value),
        Err(err) => {
            debug!(error = %err, cause = ?std::error::Error::source(&err), "ユーザー操作失敗");
            ApiResponse::bad_request(&err.to_string())
        }
    }
}
