//! csv2vcf Common Library
//!
//! CLIと対話モードで共有されるCSV → vCard変換のコア

pub mod types;
pub mod alias;
pub mod error;
pub mod name;
pub mod phone;
pub mod mapper;
pub mod vcard;
pub mod reader;
pub mod pipeline;

pub use types::{ColumnMapping, ContactRecord, Field, ResolvedContact};
pub use alias::{default_mapping, resolve_column, suggest_mapping, FieldAliasTable};
pub use error::{Error, Result};
pub use name::{format_name, split_full_name};
pub use phone::{normalize_phone, PhonePolicy};
pub use mapper::{MappingPlan, Mode, NamingPath};
pub use vcard::{emit_card, emit_header};
pub use reader::{decode_bytes, parse_csv, CsvTable, Delimiter};
pub use pipeline::{convert, convert_bytes, convert_table, ConversionContext, ConversionReport, Diagnostic, MappingSource};
