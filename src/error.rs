use csv2vcf_common::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Csv2VcfError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Fichier introuvable : {0}")]
    FileNotFound(String),

    #[error("Fichier de configuration invalide : {0}")]
    InvalidProfile(String),

    #[error("Aucune colonne détectée dans le fichier CSV.")]
    NoColumnsDetected,

    #[error("Le fichier CSV ne contient aucune ligne de contact.")]
    NoDataRows,

    #[error("Impossible de trouver la colonne nom/prénom dans le CSV.")]
    NoNameColumn,

    #[error("Les colonnes pour le nom et le prénom ne sont pas correctement configurées dans le mapping.")]
    NameColumnsNotConfigured,

    #[error("Mode interactif : {0}")]
    Interactive(String),

    #[error("Erreur JSON : {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Erreur IO : {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] csv2vcf_common::Error),
}

impl From<Diagnostic> for Csv2VcfError {
    fn from(diagnostic: Diagnostic) -> Self {
        match diagnostic {
            Diagnostic::NoColumnsDetected => Csv2VcfError::NoColumnsDetected,
            Diagnostic::NoDataRows => Csv2VcfError::NoDataRows,
            Diagnostic::NoIdentifyingColumnConfigured { mode: csv2vcf_common::Mode::Desktop } => {
                Csv2VcfError::NoNameColumn
            }
            Diagnostic::NoIdentifyingColumnConfigured { mode: csv2vcf_common::Mode::Web } => {
                Csv2VcfError::NameColumnsNotConfigured
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Csv2VcfError>;
