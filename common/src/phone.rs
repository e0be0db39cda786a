//! 電話番号の国際表記化

use serde::{Deserialize, Serialize};

/// 国番号のデフォルト（フランス）
pub const DEFAULT_COUNTRY_CODE: &str = "+33";

/// 電話番号の正規化ポリシー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonePolicy {
    /// `+`で始まらない番号に付ける国番号
    pub country_code: String,
}

impl Default for PhonePolicy {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl PhonePolicy {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
        }
    }

    /// 国際表記に変換
    ///
    /// - `+`で始まる: そのまま
    /// - `0`で始まる: 先頭の`0`を国番号に置換
    /// - それ以外: 国番号を前置
    ///
    /// 最後に空白と`.`を全て除去する。
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let prefixed = if raw.starts_with('+') {
            raw.to_string()
        } else if let Some(rest) = raw.strip_prefix('0') {
            format!("{}{}", self.country_code, rest)
        } else {
            format!("{}{}", self.country_code, raw)
        };

        prefixed.chars().filter(|c| *c != ' ' && *c != '.').collect()
    }
}

/// デフォルトポリシー（+33）で正規化
pub fn normalize_phone(raw: &str) -> String {
    PhonePolicy::default().normalize(raw)
}
