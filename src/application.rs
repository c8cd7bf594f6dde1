// アプリケーション層モジュール
pub mod api_response;
pub mod user_request_handler;
pub mod user_service;

// 再エクスポート
pub use api_response::ApiResponse;
pub use user_request_handler::UserRequestHandler;
pub use user_service::{UserError, UserService};
