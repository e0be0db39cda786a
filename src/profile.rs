//! 列対応表の保存・読み込み
//!
//! 旧版（フランス語キー: nom_fichier / date_creation / version_app）の
//! 設定ファイルも読み込める。

use crate::error::{Csv2VcfError, Result};
use csv2vcf_common::ColumnMapping;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 列対応表の設定ファイル
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingProfile {
    #[serde(default, alias = "nom_fichier")]
    pub source_file_name: String,
    #[serde(default, alias = "date_creation")]
    pub creation_timestamp: String,
    #[serde(default, alias = "version_app")]
    pub app_version: String,
    pub mappings: BTreeMap<String, String>,
}

impl MappingProfile {
    pub fn new(source_file_name: &str, mapping: &ColumnMapping) -> Self {
        Self {
            source_file_name: source_file_name.to_string(),
            creation_timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            mappings: mapping.to_keyed(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Csv2VcfError::InvalidProfile(format!("JSON invalide ({})", e)))?;

        if value.get("mappings").is_none() {
            return Err(Csv2VcfError::InvalidProfile("mappings manquants".into()));
        }

        serde_json::from_value(value).map_err(|e| Csv2VcfError::InvalidProfile(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Csv2VcfError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 対応表を取り出す（未知のフィールドは警告して無視）
    pub fn mapping(&self) -> ColumnMapping {
        let (mapping, unknown) = ColumnMapping::from_keyed(&self.mappings);
        for key in unknown {
            warn!(key, "ignoring unknown field in mapping profile");
        }
        mapping
    }

    /// `contacts.csv` → `contacts_config.json`
    pub fn default_path_for(csv_path: &Path) -> PathBuf {
        let stem = csv_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("contacts");
        csv_path.with_file_name(format!("{}_config.json", stem))
    }
}
