use crate::error::{Csv2VcfError, Result};
use csv2vcf_common::{Delimiter, Mode, PhonePolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 未指定なら自動判定
    pub default_delimiter: Option<Delimiter>,
    pub country_code: String,
    pub default_mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_delimiter: None,
            country_code: csv2vcf_common::phone::DEFAULT_COUNTRY_CODE.into(),
            default_mode: Mode::Web,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Csv2VcfError::Config("répertoire personnel introuvable".into()))?;
        Ok(home.join(".config").join("csv2vcf").join("config.json"))
    }

    pub fn phone_policy(&self) -> PhonePolicy {
        PhonePolicy::new(self.country_code.clone())
    }

    pub fn set_country_code(&mut self, code: String) -> Result<()> {
        let code = code.trim().to_string();
        let digits = code.strip_prefix('+').unwrap_or("");
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Csv2VcfError::Config(format!(
                "indicatif invalide : {} (exemple : +33)",
                code
            )));
        }
        self.country_code = code;
        self.save()
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) -> Result<()> {
        self.default_delimiter = Some(delimiter);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.country_code, "+33");
        assert_eq!(config.default_mode, Mode::Web);
        assert!(config.default_delimiter.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_delimiter": "comma"}"#).unwrap();
        assert_eq!(config.default_delimiter, Some(Delimiter::Comma));
        assert_eq!(config.country_code, "+33");
    }

    #[test]
    fn test_phone_policy_from_config() {
        let config = Config {
            country_code: "+32".into(),
            ..Default::default()
        };
        assert_eq!(config.phone_policy().normalize("0470 12 34 56"), "+32470123456");
    }

    #[test]
    fn test_invalid_country_code_rejected() {
        let mut config = Config::default();
        for code in ["33", "+", "+3a", ""] {
            let result = config.set_country_code(code.to_string());
            assert!(matches!(result, Err(Csv2VcfError::Config(_))), "accepted {code}");
        }
        assert_eq!(config.country_code, "+33");
    }
}
