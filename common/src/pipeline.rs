//! CSV → VCF 変換パイプライン
//!
//! ## 処理フロー
//! 1. Parse: CSVテキストを列一覧とデータ行に分解
//! 2. Resolve: 対応表を決定（エイリアス解決または指定値）し、上書き指定を適用
//! 3. Validate: 氏名経路があるか確認
//! 4. Transform: 行ごとに 変換 → 電話番号正規化 → vCard出力
//!
//! 列が無い・氏名列が無いといった中断条件はエラーではなく
//! [`Diagnostic`]として空の結果と一緒に返す。

use crate::alias::{suggest_mapping, FieldAliasTable};
use crate::error::Result;
use crate::mapper::{MappingPlan, Mode};
use crate::phone::PhonePolicy;
use crate::reader::{decode_bytes, parse_csv, CsvTable, Delimiter};
use crate::types::{ColumnMapping, ContactRecord};
use crate::vcard::{emit_card, emit_header};
use std::fmt;
use tracing::{debug, info, warn};

/// 対応表の出どころ
#[derive(Debug, Clone)]
pub enum MappingSource {
    /// エイリアス表から自動解決
    Aliases(FieldAliasTable),
    /// 手動指定・設定ファイルの対応表
    Explicit(ColumnMapping),
}

/// 変換1回分の設定
///
/// 呼び出し側が毎回組み立てて渡す。パイプラインは状態を持たない。
#[derive(Debug, Clone)]
pub struct ConversionContext {
    pub mode: Mode,
    pub source: MappingSource,
    /// 解決後の対応表に上書きする指定
    pub overrides: ColumnMapping,
    pub shared_note: Option<String>,
    pub delimiter: Delimiter,
    pub phone: PhonePolicy,
}

impl ConversionContext {
    /// モードに応じたエイリアス表で自動解決する設定
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            source: MappingSource::Aliases(FieldAliasTable::for_mode(mode)),
            overrides: ColumnMapping::new(),
            shared_note: None,
            delimiter: Delimiter::Semicolon,
            phone: PhonePolicy::default(),
        }
    }

    pub fn with_source(mut self, source: MappingSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_mapping(self, mapping: ColumnMapping) -> Self {
        self.with_source(MappingSource::Explicit(mapping))
    }

    pub fn with_overrides(mut self, overrides: ColumnMapping) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.shared_note = note.filter(|n| !n.is_empty());
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_phone_policy(mut self, phone: PhonePolicy) -> Self {
        self.phone = phone;
        self
    }

    /// 列一覧に対して対応表を決定
    pub fn resolve_mapping(&self, columns: &[String]) -> ColumnMapping {
        let mut mapping = match &self.source {
            MappingSource::Aliases(table) => suggest_mapping(columns, table),
            MappingSource::Explicit(mapping) => mapping.clone(),
        };
        mapping.merge(&self.overrides);
        mapping
    }
}

/// 変換中断の理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// ヘッダー行が無い
    NoColumnsDetected,
    /// ヘッダーのみでデータ行が無い
    NoDataRows,
    /// 氏名列（結合列、または名・姓の列）が設定されていない
    NoIdentifyingColumnConfigured { mode: Mode },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NoColumnsDetected => write!(f, "no columns detected in the CSV file"),
            Diagnostic::NoDataRows => write!(f, "the CSV file has a header row but no data rows"),
            Diagnostic::NoIdentifyingColumnConfigured { mode: Mode::Desktop } => {
                write!(f, "no combined name column could be found")
            }
            Diagnostic::NoIdentifyingColumnConfigured { mode: Mode::Web } => {
                write!(f, "neither a combined name column nor a given/family name column is configured")
            }
        }
    }
}

/// 変換結果
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// VCFテキスト（中断時は空）
    pub vcf: String,
    /// 検出した列
    pub columns: Vec<String>,
    /// 使用した対応表
    pub mapping: ColumnMapping,
    pub contacts_written: usize,
    pub rows_skipped: usize,
    pub diagnostic: Option<Diagnostic>,
}

impl ConversionReport {
    fn aborted(columns: Vec<String>, mapping: ColumnMapping, diagnostic: Diagnostic) -> Self {
        warn!(%diagnostic, "conversion aborted");
        Self {
            columns,
            mapping,
            diagnostic: Some(diagnostic),
            ..Default::default()
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// バイト列（BOM付き・Windows-1252も可）を変換
pub fn convert_bytes(bytes: &[u8], ctx: &ConversionContext) -> Result<ConversionReport> {
    convert(&decode_bytes(bytes), ctx)
}

/// CSVテキストを変換
pub fn convert(csv_text: &str, ctx: &ConversionContext) -> Result<ConversionReport> {
    let table = parse_csv(csv_text, ctx.delimiter)?;
    Ok(convert_table(&table, ctx))
}

/// パース済みのCSVを変換
pub fn convert_table(table: &CsvTable, ctx: &ConversionContext) -> ConversionReport {
    if table.has_no_columns() {
        return ConversionReport::aborted(Vec::new(), ColumnMapping::new(), Diagnostic::NoColumnsDetected);
    }

    let columns = table.headers.clone();
    let mapping = ctx.resolve_mapping(&columns);
    info!(mode = %ctx.mode, fields = mapping.len(), "column mapping resolved");
    for (field, column) in mapping.iter() {
        debug!(%field, column, "mapped");
    }

    if table.rows.is_empty() {
        return ConversionReport::aborted(columns, mapping, Diagnostic::NoDataRows);
    }

    let Some(plan) = MappingPlan::resolve(&mapping, &columns, ctx.mode) else {
        return ConversionReport::aborted(
            columns,
            mapping,
            Diagnostic::NoIdentifyingColumnConfigured { mode: ctx.mode },
        );
    };

    let note = ctx.shared_note.as_deref();
    let mut vcf = emit_header(note);
    let mut contacts_written = 0;
    let mut rows_skipped = 0;

    for (index, row) in table.rows.iter().enumerate() {
        let record = ContactRecord::from_row(&table.headers, row);
        let Some(mut contact) = plan.map_record(&record) else {
            debug!(row = index + 1, "row skipped: no name");
            rows_skipped += 1;
            continue;
        };

        contact.phone = ctx.phone.normalize(&contact.phone);
        vcf.push_str(&emit_card(&contact, note));
        contacts_written += 1;
    }

    info!(contacts_written, rows_skipped, "conversion finished");

    ConversionReport {
        vcf,
        columns,
        mapping,
        contacts_written,
        rows_skipped,
        diagnostic: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    const SAMPLE: &str = "Prénom Nom;Rôle;Téléphone\nMichel DUPONT;Réalisateur;0612345678\n";

    #[test]
    fn test_sample_conversion() {
        let report = convert(SAMPLE, &ConversionContext::new(Mode::Desktop)).unwrap();

        assert!(!report.is_aborted());
        assert_eq!(report.contacts_written, 1);
        assert_eq!(
            report.vcf,
            "BEGIN:VCARD\nVERSION:3.0\nN:Dupont;Michel;;;\nFN:Michel Dupont\n\
             TITLE:Réalisateur\nTEL;TYPE=CELL:+33612345678\nEND:VCARD\n\n"
        );
        for absent in ["EMAIL", "ADR", "CATEGORIES", "RELATED", "NOTE", "X-ADDRESSBOOK-NAME"] {
            assert!(!report.vcf.contains(absent), "unexpected {absent}");
        }
    }

    #[test]
    fn test_shared_note() {
        let csv = "Nom;Tel\nMichel DUPONT;01 23 45 67 89\nAnne LE BIHAN;\n;0600000000\n";
        let ctx = ConversionContext::new(Mode::Web).with_note(Some("Tournage".to_string()));
        let report = convert(csv, &ctx).unwrap();

        assert_eq!(report.contacts_written, 2);
        assert_eq!(report.rows_skipped, 1);
        assert!(report.vcf.starts_with("X-ADDRESSBOOK-NAME:Tournage\n\nBEGIN:VCARD\n"));
        assert_eq!(report.vcf.matches("X-ADDRESSBOOK-NAME:").count(), 1);
        assert_eq!(report.vcf.matches("NOTE:Tournage\n").count(), 2);
        assert_eq!(report.vcf.matches("BEGIN:VCARD").count(), 2);
    }

    #[test]
    fn test_duplicate_header_uses_last_column() {
        let csv = "Nom;Tel;Tel\nMichel DUPONT;0111111111;0222222222\n";
        let report = convert(csv, &ConversionContext::new(Mode::Web)).unwrap();

        assert!(report.vcf.contains("TEL;TYPE=CELL:+33222222222\n"));
        assert!(!report.vcf.contains("+33111111111"));
    }

    #[test]
    fn test_contact_count_matches_named_rows() {
        let csv = "Prénom;NOM;Email\nJean;MARTIN;\n;;x@y.fr\n;DURAND;\nLéa;;lea@z.fr\n  ;  ;\n";
        let report = convert(csv, &ConversionContext::new(Mode::Web)).unwrap();
        assert_eq!(report.contacts_written, 3);
        assert_eq!(report.rows_skipped, 2);
        assert!(report.vcf.contains("N:MARTIN;Jean;;;\n"));
        assert!(report.vcf.contains("N:DURAND;;;;\n"));
        assert!(report.vcf.contains("N:;Léa;;;\n"));
    }

    #[test]
    fn test_empty_csv_diagnostic() {
        let report = convert("", &ConversionContext::new(Mode::Web)).unwrap();
        assert_eq!(report.vcf, "");
        assert_eq!(report.diagnostic, Some(Diagnostic::NoColumnsDetected));
    }

    #[test]
    fn test_header_only_csv_diagnostic() {
        let report = convert("Prénom Nom;Tel\n", &ConversionContext::new(Mode::Web)).unwrap();
        assert_eq!(report.vcf, "");
        assert_eq!(report.diagnostic, Some(Diagnostic::NoDataRows));
        assert_eq!(report.contacts_written, 0);
    }

    #[test]
    fn test_no_identifying_column_desktop() {
        // デスクトップ版は名・姓の別列を使わない
        let csv = "Prénom;NOM\nJean;MARTIN\n";
        let report = convert(csv, &ConversionContext::new(Mode::Desktop)).unwrap();
        assert_eq!(report.vcf, "");
        assert_eq!(
            report.diagnostic,
            Some(Diagnostic::NoIdentifyingColumnConfigured { mode: Mode::Desktop })
        );

        let report = convert(csv, &ConversionContext::new(Mode::Web)).unwrap();
        assert!(report.diagnostic.is_none());
        assert_eq!(report.contacts_written, 1);
    }

    #[test]
    fn test_explicit_mapping_with_overrides() {
        let csv = "Contact,Portable,GSM\nMichel DUPONT,06 00 00 00 01,+41 79 000 00 00\n";
        let mapping = ColumnMapping::new()
            .with(Field::FullName, "Contact")
            .with(Field::Phone, "Portable");
        let ctx = ConversionContext::new(Mode::Web)
            .with_delimiter(Delimiter::Comma)
            .with_mapping(mapping)
            .with_overrides(ColumnMapping::new().with(Field::Phone, "GSM"));

        let report = convert(csv, &ctx).unwrap();
        assert!(report.vcf.contains("TEL;TYPE=CELL:+41790000000\n"));
        assert_eq!(report.mapping.get(Field::Phone), Some("GSM"));
    }

    #[test]
    fn test_custom_phone_policy() {
        let ctx = ConversionContext::new(Mode::Desktop).with_phone_policy(PhonePolicy::new("+32"));
        let report = convert(SAMPLE, &ctx).unwrap();
        assert!(report.vcf.contains("TEL;TYPE=CELL:+32612345678\n"));
    }

    #[test]
    fn test_convert_bytes_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(SAMPLE.as_bytes());
        let report = convert_bytes(&bytes, &ConversionContext::new(Mode::Desktop)).unwrap();
        assert_eq!(report.contacts_written, 1);
        assert_eq!(report.columns[0], "Prénom Nom");
    }

    #[test]
    fn test_empty_note_adds_nothing() {
        let ctx = ConversionContext::new(Mode::Desktop).with_note(Some(String::new()));
        let report = convert(SAMPLE, &ctx).unwrap();
        assert!(!report.vcf.contains("NOTE"));
        assert!(!report.vcf.contains("X-ADDRESSBOOK-NAME"));
    }
}
