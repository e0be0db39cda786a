//! 対話式変換モジュール
//!
//! デスクトップ版と同じ流れ: CSVを選ぶ → 共通メモを入力 → CSVと同じ場所に`.vcf`を作成。
//! エイリアスは固定リスト、氏名は結合列のみ、区切り文字は`;`。

use crate::convert::convert_file;
use crate::export::{default_output_path, ExportTarget};
use anyhow::{bail, Context, Result};
use csv2vcf_common::{ConversionContext, ConversionReport, Delimiter, Mode, PhonePolicy};
use dialoguer::Input;
use std::path::{Path, PathBuf};

const WELCOME: &str = "\
CONVERTISSEUR CSV VERS CONTACTS (VCF)

• Conversion d'un fichier CSV en format VCF (compatible avec l'app Contacts)
• Gestion des champs : Rôle, Nom, Téléphone, Email, Adresse et Agent
• Possibilité d'ajouter une note commune à tous les contacts
• Le fichier VCF sera créé au même endroit que votre fichier CSV
";

/// 入力されたパスを整える（ドラッグ&ドロップ時の引用符を除去）
pub fn clean_path_input(input: &str) -> PathBuf {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);
    PathBuf::from(unquoted)
}

/// デスクトップ版相当の変換設定
pub fn desktop_context(note: Option<String>, phone: PhonePolicy) -> ConversionContext {
    ConversionContext::new(Mode::Desktop)
        .with_delimiter(Delimiter::Semicolon)
        .with_note(note)
        .with_phone_policy(phone)
}

/// 入力済みの値で変換を実行
pub fn convert_desktop(csv_path: &Path, note: Option<String>, phone: PhonePolicy) -> Result<(ConversionReport, PathBuf)> {
    let output = default_output_path(csv_path);
    let ctx = desktop_context(note, phone);
    let report = convert_file(csv_path, &ctx, &ExportTarget::File(output.clone()))
        .with_context(|| format!("conversion de {}", csv_path.display()))?;
    Ok((report, output))
}

/// 対話式で変換
pub fn run_interactive(phone: PhonePolicy) -> Result<()> {
    println!("{}", WELCOME);

    let answer: String = Input::new()
        .with_prompt("Fichier CSV des contacts")
        .interact_text()
        .context("lecture du chemin CSV")?;
    let csv_path = clean_path_input(&answer);

    if !csv_path.is_file() {
        bail!("Vous n'avez pas sélectionné de fichier CSV valide : {}", csv_path.display());
    }

    let note: String = Input::new()
        .with_prompt("Note commune à ajouter à toutes les fiches (laisser vide si non)")
        .allow_empty(true)
        .interact_text()
        .context("lecture de la note commune")?;
    let note = Some(note.trim().to_string()).filter(|n| !n.is_empty());

    println!("Conversion en cours...");
    let (report, output) = convert_desktop(&csv_path, note, phone)?;

    println!("✔ {} contact(s) exporté(s)", report.contacts_written);
    println!("\nLe fichier de contacts a été créé avec succès !");
    println!("Vous le trouverez ici : {}\n", output.display());
    println!("Pour l'importer dans Contacts :");
    println!("  1. Ouvrez l'application Contacts");
    println!("  2. Menu Fichier > Importer");
    println!("  3. Sélectionnez le fichier VCF créé");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Csv2VcfError;
    use tempfile::tempdir;

    #[test]
    fn test_clean_path_input() {
        assert_eq!(clean_path_input("  /tmp/a.csv \n"), PathBuf::from("/tmp/a.csv"));
        assert_eq!(clean_path_input("\"/tmp/mes contacts.csv\""), PathBuf::from("/tmp/mes contacts.csv"));
        assert_eq!(clean_path_input("'/tmp/a.csv'"), PathBuf::from("/tmp/a.csv"));
    }

    #[test]
    fn test_desktop_context() {
        let ctx = desktop_context(Some(String::new()), PhonePolicy::default());
        assert_eq!(ctx.mode, Mode::Desktop);
        assert_eq!(ctx.delimiter, Delimiter::Semicolon);
        assert!(ctx.shared_note.is_none());
    }

    #[test]
    fn test_convert_desktop_writes_next_to_csv() {
        let dir = tempdir().expect("Failed to create temp dir");
        let csv_path = dir.path().join("equipe.csv");
        std::fs::write(&csv_path, "Prénom Nom;Rôle;Tel\nMichel DUPONT;Monteur;06 12 34 56 78\n").unwrap();

        let (report, output) =
            convert_desktop(&csv_path, Some("Tournage".to_string()), PhonePolicy::default()).unwrap();

        assert_eq!(output, dir.path().join("equipe.vcf"));
        assert_eq!(report.contacts_written, 1);
        let vcf = std::fs::read_to_string(&output).unwrap();
        assert!(vcf.starts_with("X-ADDRESSBOOK-NAME:Tournage\n\n"));
        assert!(vcf.contains("TEL;TYPE=CELL:+33612345678\n"));
    }

    #[test]
    fn test_convert_desktop_uses_semicolon() {
        let dir = tempdir().expect("Failed to create temp dir");
        let csv_path = dir.path().join("virgules.csv");
        std::fs::write(&csv_path, "Prénom Nom,Tel\nMichel DUPONT,0612345678\n").unwrap();

        let err = convert_desktop(&csv_path, None, PhonePolicy::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<Csv2VcfError>(), Some(Csv2VcfError::NoNameColumn)));
        assert!(!dir.path().join("virgules.vcf").exists());
    }

    #[test]
    fn test_convert_desktop_rejects_split_columns() {
        let dir = tempdir().expect("Failed to create temp dir");
        let csv_path = dir.path().join("separes.csv");
        std::fs::write(&csv_path, "Prénom;NOM;Tel\nLéa;DURAND;0612345678\n").unwrap();

        let err = convert_desktop(&csv_path, None, PhonePolicy::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<Csv2VcfError>(), Some(Csv2VcfError::NoNameColumn)));
        assert!(format!("{:#}", err).contains("nom/prénom"));
        assert!(!dir.path().join("separes.vcf").exists());
    }
}
