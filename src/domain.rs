// ドメイン層モジュール
pub mod email_validator;
pub mod user;

// 再エクスポート
pub use email_validator::is_valid_email;
pub use user::User;
