//! CSV行 → 連絡先の変換
//!
//! 氏名列の使い方（結合列か、名・姓の別列か）はファイルごとに一度だけ決め、
//! 行ごとには判定しない。

use crate::name::{format_name, split_full_name};
use crate::types::{ColumnMapping, ContactRecord, Field, ResolvedContact};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 変換モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 固定エイリアス、氏名は結合列のみ
    Desktop,
    /// 拡張エイリアス、結合列または名・姓の別列
    #[default]
    Web,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desktop" | "bureau" => Ok(Mode::Desktop),
            "web" => Ok(Mode::Web),
            _ => Err(format!("Unknown mode: {}. Use desktop or web", s)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Desktop => write!(f, "desktop"),
            Mode::Web => write!(f, "web"),
        }
    }
}

/// 氏名の取得経路
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingPath {
    /// 「名 姓」の結合列を分割
    Combined(String),
    /// 名・姓の別列（どちらか一方だけでもよい）
    Separate {
        given: Option<String>,
        family: Option<String>,
    },
}

/// ファイル単位で確定した変換計画
#[derive(Debug, Clone)]
pub struct MappingPlan {
    naming: NamingPath,
    mapping: ColumnMapping,
}

impl MappingPlan {
    /// 対応表と実際の列から氏名経路を決める
    ///
    /// 対応表にあってもファイルに存在しない列は数えない。
    /// 氏名経路が作れなければ`None`。
    pub fn resolve(mapping: &ColumnMapping, columns: &[String], mode: Mode) -> Option<Self> {
        let present = |field: Field| {
            mapping
                .get(field)
                .filter(|column| columns.iter().any(|c| c.as_str() == *column))
                .map(str::to_string)
        };

        let naming = if let Some(combined) = present(Field::FullName) {
            NamingPath::Combined(combined)
        } else {
            match mode {
                Mode::Desktop => return None,
                Mode::Web => {
                    let given = present(Field::GivenName);
                    let family = present(Field::FamilyName);
                    if given.is_none() && family.is_none() {
                        return None;
                    }
                    NamingPath::Separate { given, family }
                }
            }
        };

        Some(Self {
            naming,
            mapping: mapping.clone(),
        })
    }

    pub fn naming(&self) -> &NamingPath {
        &self.naming
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    /// 1行を連絡先に変換（氏名が取れなければ`None`でスキップ）
    ///
    /// 電話番号は未加工のまま。正規化はパイプライン側で行う。
    pub fn map_record(&self, record: &ContactRecord) -> Option<ResolvedContact> {
        let (given_name, family_name) = match &self.naming {
            NamingPath::Combined(column) => {
                let full = record.get(Some(column));
                if full.is_empty() {
                    return None;
                }
                split_full_name(&full)
            }
            NamingPath::Separate { given, family } => {
                let given = record.get(given.as_deref());
                let family = record.get(family.as_deref());
                if given.is_empty() && family.is_empty() {
                    return None;
                }
                // 全大文字の姓は組織名などの区別のためそのまま残す
                (format_name(&given, false), format_name(&family, true))
            }
        };

        let cell = |field: Field| record.get(self.mapping.get(field));

        Some(ResolvedContact {
            given_name,
            family_name,
            role: cell(Field::Role),
            phone: cell(Field::Phone),
            email: cell(Field::Email),
            address: cell(Field::Address),
            agent: cell(Field::Agent),
            keywords: cell(Field::Keywords),
            relation: cell(Field::Relation),
        })
    }
}
