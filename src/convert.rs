//! ファイル単位の変換
//!
//! CSVファイルを読み、コアで変換し、中断条件をエラーとして返す。
//! 中断時は出力ファイルを作らない。

use crate::error::{Csv2VcfError, Result};
use crate::export::{export_vcf, ExportTarget};
use csv2vcf_common::{convert_bytes, parse_csv, ConversionContext, ConversionReport, CsvTable, Delimiter};
use std::path::Path;

/// CSVファイルをバイト列で読む
pub fn read_csv_bytes(csv_path: &Path) -> Result<Vec<u8>> {
    if !csv_path.exists() {
        return Err(Csv2VcfError::FileNotFound(csv_path.display().to_string()));
    }
    Ok(std::fs::read(csv_path)?)
}

/// 区切り文字が未指定ならヘッダー行から推定
pub fn pick_delimiter(bytes: &[u8], explicit: Option<Delimiter>) -> Delimiter {
    explicit.unwrap_or_else(|| Delimiter::sniff(&csv2vcf_common::decode_bytes(bytes)))
}

/// 列の確認用に読み込む
pub fn load_table(csv_path: &Path, delimiter: Option<Delimiter>) -> Result<(CsvTable, Delimiter)> {
    let bytes = read_csv_bytes(csv_path)?;
    let delimiter = pick_delimiter(&bytes, delimiter);
    let table = parse_csv(&csv2vcf_common::decode_bytes(&bytes), delimiter)?;
    Ok((table, delimiter))
}

/// CSVファイルを変換し、出力先に書き出す
pub fn convert_file(
    csv_path: &Path,
    ctx: &ConversionContext,
    target: &ExportTarget,
) -> Result<ConversionReport> {
    let bytes = read_csv_bytes(csv_path)?;
    let mut report = convert_bytes(&bytes, ctx)?;

    if let Some(diagnostic) = report.diagnostic.take() {
        return Err(diagnostic.into());
    }

    export_vcf(&report.vcf, target)?;
    Ok(report)
}
