//! VCFファイル書き込み

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_vcf(vcf: &str, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(output_path)?);
    write_vcf_to(vcf, &mut writer)?;
    Ok(())
}

pub fn write_vcf_to<W: Write>(vcf: &str, writer: &mut W) -> Result<()> {
    writer.write_all(vcf.as_bytes())?;
    writer.flush()?;
    Ok(())
}
