// メールアドレスの構文検証

use std::sync::LazyLock;

use regex::Regex;

/// メールアドレスとして許容する最小長
pub const EMAIL_MIN_LENGTH: usize = 3;
/// メールアドレスとして許容する最大長（RFC 5321のパス長上限）
pub const EMAIL_MAX_LENGTH: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("メールアドレス正規表現のコンパイルに失敗")
});

/// メールアドレスが構文的に妥当かを判定する
///
/// ローカル部とドメイン部を`@`で区切った形式のみを受け付ける。
/// ドメインの実在確認は行わない。
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < EMAIL_MIN_LENGTH || email.len() > EMAIL_MAX_LENGTH {
        return false;
    }
    EMAIL_PATTERN.is_match(email)
}
