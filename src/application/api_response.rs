// APIレスポンスエンベロープ
//
// ステータスコードとJSONボディの組を保持し、
// Content-Type: application/json付きのHTTPレスポンスに変換する。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;
use serde_json::{json, Value};

/// 不明なHTTPメソッドに対するエラーメッセージ
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "method not allowed";
/// DELETEでemailクエリパラメータが無い場合のエラーメッセージ
pub const EMAIL_REQUIRED_MESSAGE: &str = "email is required";

/// ステータスコードとJSONボディ
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTPステータスコード
    pub status: StatusCode,
    /// JSONボディ
    pub body: Value,
}

impl ApiResponse {
    /// 任意のステータスとシリアライズ可能な値からレスポンスを作成
    ///
    /// シリアライズに失敗した場合は500とエラーボディを返す。
    pub fn new<T: Serialize>(status: StatusCode, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status, body },
            Err(err) => Self::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("could not encode response: {}", err),
            ),
        }
    }

    /// 200 OK
    pub fn ok<T: Serialize>(body: &T) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// 201 Created
    pub fn created<T: Serialize>(body: &T) -> Self {
        Self::new(StatusCode::CREATED, body)
    }

    /// `{"error": message}`形式のエラーレスポンス
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: &str) -> Self {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    /// 405 Method Not Allowed
    pub fn method_not_allowed() -> Self {
        Self::error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
    }

    /// Lambda HTTPレスポンスに変換
    pub fn into_response(self) -> Response<Body> {
        let mut response = Response::new(Body::Text(self.body.to_string()));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
