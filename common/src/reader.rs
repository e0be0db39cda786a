//! CSV読み込み
//!
//! 区切り文字は `;` `,` タブの3種。先頭のBOMは除去する。
//! UTF-8として不正なバイト列はWindows-1252として読み直す（Excel出力のCSV対策）。

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// 区切り文字
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Semicolon,
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Semicolon => b';',
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }

    /// ヘッダー行で最も多く出現する区切り文字を推定（同数なら `;` `,` タブの順）
    pub fn sniff(text: &str) -> Self {
        let header = text
            .trim_start_matches('\u{feff}')
            .lines()
            .next()
            .unwrap_or("");
        let count = |d: Delimiter| header.bytes().filter(|b| *b == d.as_byte()).count();

        let mut best = Delimiter::Semicolon;
        let mut best_count = count(best);
        for candidate in [Delimiter::Comma, Delimiter::Tab] {
            let n = count(candidate);
            if n > best_count {
                best = candidate;
                best_count = n;
            }
        }
        best
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ";" => return Ok(Delimiter::Semicolon),
            "," => return Ok(Delimiter::Comma),
            "\t" | "\\t" => return Ok(Delimiter::Tab),
            _ => {}
        }
        match s.to_lowercase().as_str() {
            "semicolon" | "point-virgule" => Ok(Delimiter::Semicolon),
            "comma" | "virgule" => Ok(Delimiter::Comma),
            "tab" | "tabulation" => Ok(Delimiter::Tab),
            _ => Err(format!("Unknown delimiter: {}. Use ';', ',' or tab", s)),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Semicolon => write!(f, ";"),
            Delimiter::Comma => write!(f, ","),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

/// 読み込んだCSV（ヘッダーとデータ行）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// 有効な列名が1つもないか
    pub fn has_no_columns(&self) -> bool {
        self.headers.iter().all(|h| h.trim().is_empty())
    }
}

/// バイト列を文字列にデコード
pub fn decode_bytes(bytes: &[u8]) -> String {
    // UTF-8のdecodeはBOMを除去する
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return text.into_owned();
    }

    debug!("input is not valid UTF-8, decoding as windows-1252");
    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    text.into_owned()
}

/// CSVテキストをパース
///
/// 行ごとの列数の違いは許容する（不足分は欠損扱い）。
pub fn parse_csv(text: &str, delimiter: Delimiter) -> Result<CsvTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Error::Parse(format!("row {}: {}", index + 1, e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), %delimiter, "csv parsed");
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_semicolon_with_bom() {
        let text = "\u{feff}Prénom Nom;Rôle\nMichel DUPONT;Réalisateur\n";
        let table = parse_csv(text, Delimiter::Semicolon).unwrap();
        assert_eq!(table.headers, vec!["Prénom Nom", "Rôle"]);
        assert_eq!(table.rows, vec![vec!["Michel DUPONT", "Réalisateur"]]);
    }

    #[test]
    fn test_parse_quoted_delimiter() {
        let text = "Nom,Adresse\n\"Anne LE BIHAN\",\"3 place du Marché, Brest\"\n";
        let table = parse_csv(text, Delimiter::Comma).unwrap();
        assert_eq!(table.rows[0][1], "3 place du Marché, Brest");
    }

    #[test]
    fn test_parse_short_rows_allowed() {
        let text = "Nom\tTel\tEmail\nMichel DUPONT\t0612345678\n";
        let table = parse_csv(text, Delimiter::Tab).unwrap();
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_parse_empty_input() {
        let table = parse_csv("", Delimiter::Semicolon).unwrap();
        assert!(table.has_no_columns());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_decode_utf8_bom() {
        let bytes = b"\xEF\xBB\xBFNom;Tel";
        assert_eq!(decode_bytes(bytes), "Nom;Tel");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "Rôle" (0xF4 = ô)
        let bytes = b"R\xF4le";
        assert_eq!(decode_bytes(bytes), "Rôle");
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(Delimiter::sniff("Nom;Tel;Email\na;b;c"), Delimiter::Semicolon);
        assert_eq!(Delimiter::sniff("Nom,Tel,Email"), Delimiter::Comma);
        assert_eq!(Delimiter::sniff("Nom\tTel"), Delimiter::Tab);
        assert_eq!(Delimiter::sniff("Nom"), Delimiter::Semicolon);
        // 同数なら ; を優先
        assert_eq!(Delimiter::sniff("Nom;Adresse, ville"), Delimiter::Semicolon);
    }

    #[test]
    fn test_delimiter_from_str() {
        assert_eq!(";".parse::<Delimiter>(), Ok(Delimiter::Semicolon));
        assert_eq!("virgule".parse::<Delimiter>(), Ok(Delimiter::Comma));
        assert_eq!("TAB".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert_eq!("\\t".parse::<Delimiter>(), Ok(Delimiter::Tab));
        assert!("|".parse::<Delimiter>().is_err());
    }
}
