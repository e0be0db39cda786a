pub mod vcf;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// 出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(PathBuf),
    Stdout,
}

/// CSVと同じ場所・同じ名前で拡張子だけ`.vcf`にしたパス
pub fn default_output_path(csv_path: &Path) -> PathBuf {
    csv_path.with_extension("vcf")
}

/// 出力先を決める
///
/// `output`がディレクトリ（または拡張子なし）ならCSV名で`.vcf`を置く。
pub fn resolve_target(csv_path: &Path, output: Option<&Path>, stdout: bool) -> ExportTarget {
    if stdout {
        return ExportTarget::Stdout;
    }

    match output {
        Some(output) if output.is_dir() || output.extension().is_none() => {
            let file_name = default_output_path(csv_path)
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("contacts.vcf"));
            ExportTarget::File(output.join(file_name))
        }
        Some(output) => ExportTarget::File(output.to_path_buf()),
        None => ExportTarget::File(default_output_path(csv_path)),
    }
}

pub fn export_vcf(vcf: &str, target: &ExportTarget) -> Result<()> {
    match target {
        ExportTarget::File(path) => vcf::write_vcf(vcf, path),
        ExportTarget::Stdout => vcf::write_vcf_to(vcf, &mut std::io::stdout().lock()),
    }
}
