// インフラストラクチャ層モジュール
pub mod config;
pub mod logging;
pub mod user_table;

// 再エクスポート
pub use config::{ConfigError, UserApiConfig};
pub use logging::init_logging;
pub use user_table::{DynamoUserTable, Item, ScanPage, StorageError, UserTable};
