use clap::{Parser, Subcommand};
use csv2vcf_common::{Delimiter, Field, Mode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csv2vcf")]
#[command(about = "Convertit un fichier CSV de contacts en carnet d'adresses VCF", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Journalisation détaillée
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convertit un fichier CSV en VCF
    Convert {
        /// Fichier CSV source
        #[arg(required = true)]
        csv: PathBuf,

        /// Fichier VCF ou répertoire de sortie (défaut : à côté du CSV)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Écrit le VCF sur la sortie standard
        #[arg(long, conflicts_with = "output")]
        stdout: bool,

        /// Délimiteur (; , tab) - détecté automatiquement si absent
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Note commune ajoutée à toutes les fiches
        #[arg(short, long)]
        note: Option<String>,

        /// Mode (desktop/web)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Fichier de configuration des colonnes (JSON)
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Utilise la correspondance standard (Prénom Nom, Téléphone, ...)
        #[arg(long, conflicts_with_all = ["profile", "aliases"])]
        default_mapping: bool,

        /// Alias de colonnes personnalisés (JSON)
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Correspondance manuelle, ex. --map phone=Portable
        #[arg(long = "map", value_parser = parse_mapping_override)]
        overrides: Vec<(Field, String)>,
    },

    /// Affiche les colonnes détectées et la correspondance suggérée
    Columns {
        /// Fichier CSV source
        #[arg(required = true)]
        csv: PathBuf,

        /// Délimiteur (; , tab)
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Mode (desktop/web)
        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Enregistre la correspondance des colonnes dans un fichier JSON
    Profile {
        /// Fichier CSV source
        #[arg(required = true)]
        csv: PathBuf,

        /// Fichier de sortie (défaut : <nom>_config.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Délimiteur (; , tab)
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Part de la correspondance standard au lieu de la suggestion
        #[arg(long)]
        default_mapping: bool,

        /// Correspondance manuelle, ex. --map phone=Portable
        #[arg(long = "map", value_parser = parse_mapping_override)]
        overrides: Vec<(Field, String)>,
    },

    /// Conversion guidée (sélection du fichier et de la note)
    Interactive,

    /// Affiche/modifie la configuration
    Config {
        /// Affiche la configuration
        #[arg(long)]
        show: bool,

        /// Indicatif pays par défaut (ex. +33)
        #[arg(long)]
        set_country_code: Option<String>,

        /// Délimiteur par défaut (; , tab)
        #[arg(long)]
        set_delimiter: Option<Delimiter>,
    },
}

/// `champ=Colonne` を解析
pub fn parse_mapping_override(s: &str) -> Result<(Field, String), String> {
    let (key, column) = s
        .split_once('=')
        .ok_or_else(|| format!("format attendu champ=Colonne : {}", s))?;
    let field: Field = key.parse()?;
    if column.is_empty() {
        return Err(format!("nom de colonne vide pour {}", field));
    }
    Ok((field, column.to_string()))
}
