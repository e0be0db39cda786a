//! 連絡先変換の型定義
//!
//! CLIと対話モードで共有される型:
//! - Field: 意味的なフィールド（氏名・電話・メールなど）
//! - ColumnMapping: フィールド → CSV列名の対応表
//! - ContactRecord: CSVの1行（列名 → セル値）
//! - ResolvedContact: vCard出力直前の確定済み連絡先

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// 意味的なフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// 「名 姓」を1列にまとめた氏名
    FullName,
    GivenName,
    FamilyName,
    Role,
    Phone,
    Email,
    Address,
    Agent,
    Keywords,
    Relation,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::FullName,
        Field::GivenName,
        Field::FamilyName,
        Field::Role,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::Agent,
        Field::Keywords,
        Field::Relation,
    ];

    /// 設定ファイルで使うキー
    pub fn key(&self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::GivenName => "given_name",
            Field::FamilyName => "family_name",
            Field::Role => "role",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Agent => "agent",
            Field::Keywords => "keywords",
            Field::Relation => "relation",
        }
    }

    /// 氏名系フィールドか
    pub fn is_naming(&self) -> bool {
        matches!(self, Field::FullName | Field::GivenName | Field::FamilyName)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    /// 旧版の設定ファイル（nom / prenom / nom_famille ...）のキーも受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full_name" | "nom" => Ok(Field::FullName),
            "given_name" | "prenom" => Ok(Field::GivenName),
            "family_name" | "nom_famille" => Ok(Field::FamilyName),
            "role" => Ok(Field::Role),
            "phone" | "telephone" => Ok(Field::Phone),
            "email" => Ok(Field::Email),
            "address" | "adresse" => Ok(Field::Address),
            "agent" => Ok(Field::Agent),
            "keywords" | "mots_cle" => Ok(Field::Keywords),
            "relation" => Ok(Field::Relation),
            other => Err(format!("Unknown field: {}", other)),
        }
    }
}

/// フィールド → CSV列名の対応表
///
/// 手動指定・設定ファイル読み込み・エイリアス解決のいずれかで作られる。
/// どのフィールドも欠けていてよい。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<Field, String>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: Field, column: impl Into<String>) {
        self.columns.insert(field, column.into());
    }

    pub fn with(mut self, field: Field, column: impl Into<String>) -> Self {
        self.set(field, column);
        self
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.columns.iter().map(|(field, column)| (*field, column.as_str()))
    }

    /// 上書きマージ（otherが優先）
    pub fn merge(&mut self, other: &ColumnMapping) {
        self.columns.extend(other.columns.clone());
    }

    /// 設定ファイル用のキー付きマップに変換
    pub fn to_keyed(&self) -> BTreeMap<String, String> {
        self.columns
            .iter()
            .map(|(field, column)| (field.key().to_string(), column.clone()))
            .collect()
    }

    /// キー付きマップから復元
    ///
    /// 未知のキーは無視し、第2要素として返す。空の列名も無視する。
    pub fn from_keyed(keyed: &BTreeMap<String, String>) -> (Self, Vec<String>) {
        let mut mapping = Self::new();
        let mut unknown = Vec::new();

        for (key, column) in keyed {
            match key.parse::<Field>() {
                Ok(field) if !column.is_empty() => mapping.set(field, column.clone()),
                Ok(_) => {}
                Err(_) => unknown.push(key.clone()),
            }
        }

        (mapping, unknown)
    }
}

/// CSVの1行（列名 → セル値）
#[derive(Debug, Clone, Default)]
pub struct ContactRecord {
    cells: HashMap<String, String>,
}

impl ContactRecord {
    /// ヘッダーとセルから組み立てる
    ///
    /// 列名が重複する場合は後ろの列が優先。セルが足りない列は空文字になる。
    pub fn from_row(headers: &[String], cells: &[String]) -> Self {
        let mut map = HashMap::with_capacity(headers.len());
        for (index, header) in headers.iter().enumerate() {
            map.insert(header.clone(), cells.get(index).cloned().unwrap_or_default());
        }
        Self { cells: map }
    }

    /// 列の値を安全に取得（前後の空白を除去、欠損・未指定は空文字）
    pub fn get(&self, column: Option<&str>) -> String {
        column
            .and_then(|c| self.cells.get(c))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for ContactRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// 確定済み連絡先（vCard出力の入力）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedContact {
    pub given_name: String,
    pub family_name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub agent: String,
    pub keywords: String,
    pub relation: String,
}

impl ResolvedContact {
    /// 表示名（FN）
    pub fn display_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }
}
