//! 列名エイリアスモジュール
//!
//! CSVヘッダーの表記ゆれ（"Tel" / "Téléphone" / "Mobile" ...）を吸収し、
//! フィールドごとに実際の列名を決定する。

use crate::error::{Error, Result};
use crate::mapper::Mode;
use crate::types::{ColumnMapping, Field};
use std::collections::BTreeMap;
use tracing::warn;

/// フィールド → 候補列名（優先順）の表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAliasTable {
    entries: BTreeMap<Field, Vec<String>>,
}

fn owned(aliases: &[&str]) -> Vec<String> {
    aliases.iter().map(|s| s.to_string()).collect()
}

impl FieldAliasTable {
    /// 組み込みプリセットを取得
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "desktop" | "bureau" => Some(Self::desktop()),
            "web" => Some(Self::web()),
            _ => None,
        }
    }

    /// モード既定のエイリアス表
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Desktop => Self::desktop(),
            Mode::Web => Self::web(),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// 形式: `{"phone": ["Portable", "GSM"], ...}`
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (key, aliases) in raw {
            let field: Field = key.parse().map_err(Error::Parse)?;
            table.entries.insert(field, aliases);
        }
        Ok(table)
    }

    /// デスクトップ版の固定リスト（氏名は結合列のみ）
    pub fn desktop() -> Self {
        let mut table = Self::default();
        table.entries.insert(Field::Role, owned(&["Role", "Rôle", "Fonction"]));
        table.entries.insert(Field::FullName, owned(&["Prénom Nom", "Nom Prénom", "Nom"]));
        table.entries.insert(Field::Phone, owned(&["Téléphone", "Tel", "Tél", "Mobile"]));
        table.entries.insert(Field::Email, owned(&["Mail", "Email", "Courriel"]));
        table.entries.insert(Field::Address, owned(&["Adresse", "Adresse postale"]));
        table.entries.insert(Field::Agent, owned(&["Agent", "Agence"]));
        table
    }

    /// Web版の拡張リスト
    pub fn web() -> Self {
        let mut table = Self::default();
        table.entries.insert(
            Field::FullName,
            owned(&[
                "Prénom Nom", "Nom Prénom", "Nom", "Nom complet", "Fullname",
                "Nom et prénom", "Contact", "Identité",
            ]),
        );
        table.entries.insert(
            Field::GivenName,
            owned(&["Prénom", "Prenom", "First name", "First", "Firstname"]),
        );
        table.entries.insert(
            Field::FamilyName,
            owned(&["NOM", "Nom de famille", "Last name", "Last", "Lastname", "Surname"]),
        );
        table.entries.insert(
            Field::Role,
            owned(&["Role", "Rôle", "Fonction", "Titre", "Poste", "Title", "Job", "Position"]),
        );
        table.entries.insert(
            Field::Phone,
            owned(&[
                "Téléphone", "Tel", "Tél", "Mobile", "Portable", "Phone", "Cellulaire",
                "GSM", "Numéro", "Cell",
            ]),
        );
        table.entries.insert(
            Field::Email,
            owned(&[
                "Mail", "Email", "Courriel", "E-mail", "Adresse mail", "Adresse email",
                "Email address",
            ]),
        );
        table.entries.insert(
            Field::Address,
            owned(&[
                "Adresse", "Adresse postale", "Address", "Localisation", "Domicile",
                "Lieu", "Location",
            ]),
        );
        table.entries.insert(
            Field::Agent,
            owned(&[
                "Agent", "Agence", "Agency", "Représentant", "Representative", "Manager",
                "Responsable",
            ]),
        );
        table.entries.insert(
            Field::Keywords,
            owned(&["Mots clé", "Mots-clés", "Keywords", "Tags", "Catégories", "Thèmes"]),
        );
        table.entries.insert(
            Field::Relation,
            owned(&["Relation", "Lien", "Connexion", "Relationship", "Link", "Contact Type"]),
        );
        table
    }

    /// フィールドの候補列名
    pub fn aliases(&self, field: Field) -> &[String] {
        self.entries.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.keys().copied()
    }

    /// 設定をマージ（フィールド単位で後から追加した設定が優先）
    pub fn merge(&mut self, other: &FieldAliasTable) {
        self.entries.extend(other.entries.clone());
    }
}

/// 候補列名のうち、最初に実在するものを返す（大文字小文字を区別した完全一致）
pub fn resolve_column<'a, S: AsRef<str>>(columns: &'a [String], candidates: &[S]) -> Option<&'a str> {
    candidates.iter().find_map(|candidate| {
        columns
            .iter()
            .find(|column| column.as_str() == candidate.as_ref())
            .map(String::as_str)
    })
}

/// エイリアス表を列一覧に当てはめて対応表を提案
pub fn suggest_mapping(columns: &[String], table: &FieldAliasTable) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for field in table.fields() {
        if let Some(column) = resolve_column(columns, table.aliases(field)) {
            mapping.set(field, column);
        }
    }
    mapping
}

/// 初期版で使われていた標準の対応表
pub fn default_mapping() -> ColumnMapping {
    ColumnMapping::new()
        .with(Field::FullName, "Prénom Nom")
        .with(Field::GivenName, "Prénom")
        .with(Field::FamilyName, "NOM")
        .with(Field::Role, "Rôle")
        .with(Field::Phone, "Téléphone")
        .with(Field::Email, "Email")
        .with(Field::Address, "Adresse")
        .with(Field::Agent, "Agent")
        .with(Field::Keywords, "Mots clé")
        .with(Field::Relation, "Relation")
}

/// プリセットとカスタムJSONファイルからエイリアス表を組み立てる
pub fn build_alias_table(preset: &str, custom: Option<&std::path::Path>) -> Result<FieldAliasTable> {
    let mut table = match FieldAliasTable::from_preset(preset) {
        Some(table) => table,
        None => {
            warn!(preset, "unknown alias preset, falling back to web");
            FieldAliasTable::web()
        }
    };

    if let Some(path) = custom {
        table.merge(&FieldAliasTable::from_file(path)?);
    }

    Ok(table)
}
