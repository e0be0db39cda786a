use clap::Parser;
use csv2vcf::{cli, config, convert, error, export, interactive, logging, profile};
use cli::{Cli, Commands};
use config::Config;
use csv2vcf_common::{
    alias, default_mapping, suggest_mapping, ColumnMapping, ConversionContext, Field, FieldAliasTable, MappingSource,
};
use error::{Csv2VcfError, Result};
use profile::MappingProfile;

fn overrides_mapping(overrides: &[(Field, String)]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for (field, column) in overrides {
        mapping.set(*field, column.clone());
    }
    mapping
}

fn print_mapping(mapping: &ColumnMapping) {
    for field in Field::ALL {
        match mapping.get(field) {
            Some(column) => println!("  {:<12} → {}", field, column),
            None => println!("  {:<12} → (aucune)", field),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("⚠ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Convert {
            csv,
            output,
            stdout,
            delimiter,
            note,
            mode,
            profile,
            default_mapping: use_default,
            aliases,
            overrides,
        } => {
            if !stdout {
                println!("📇 csv2vcf - conversion\n");
            }

            let bytes = convert::read_csv_bytes(&csv)?;
            let delimiter = convert::pick_delimiter(&bytes, delimiter.or(config.default_delimiter));
            let mode = mode.unwrap_or(config.default_mode);

            let source = if let Some(profile_path) = profile {
                let profile = MappingProfile::load(&profile_path)?;
                if !stdout {
                    println!("- Configuration chargée : {}", profile_path.display());
                }
                MappingSource::Explicit(profile.mapping())
            } else if use_default {
                MappingSource::Explicit(default_mapping())
            } else {
                let table = alias::build_alias_table(&mode.to_string(), aliases.as_deref())?;
                MappingSource::Aliases(table)
            };

            let ctx = ConversionContext::new(mode)
                .with_source(source)
                .with_overrides(overrides_mapping(&overrides))
                .with_delimiter(delimiter)
                .with_note(note)
                .with_phone_policy(config.phone_policy());

            let target = export::resolve_target(&csv, output.as_deref(), stdout);
            let report = convert::convert_file(&csv, &ctx, &target)?;

            if !stdout {
                println!("✔ Colonnes détectées : {}", report.columns.join(", "));
                println!("✔ {} contact(s) exporté(s), {} ligne(s) ignorée(s)", report.contacts_written, report.rows_skipped);
                if let export::ExportTarget::File(path) = &target {
                    println!("✔ Fichier VCF : {}", path.display());
                }
                println!("\n✅ Conversion terminée");
            }
        }

        Commands::Columns { csv, delimiter, mode } => {
            let (table, delimiter) = convert::load_table(&csv, delimiter.or(config.default_delimiter))?;
            if table.has_no_columns() {
                return Err(Csv2VcfError::NoColumnsDetected);
            }

            let mode = mode.unwrap_or(config.default_mode);
            let aliases = FieldAliasTable::for_mode(mode);

            println!("Délimiteur : {}", delimiter);
            println!("Colonnes détectées ({}) :", table.headers.len());
            for header in &table.headers {
                println!("  - {}", header);
            }
            println!("Lignes de données : {}", table.rows.len());
            println!("\nCorrespondance suggérée (mode {}) :", mode);
            print_mapping(&suggest_mapping(&table.headers, &aliases));
        }

        Commands::Profile { csv, output, delimiter, default_mapping: use_default, overrides } => {
            let (table, _) = convert::load_table(&csv, delimiter.or(config.default_delimiter))?;
            if table.has_no_columns() {
                return Err(Csv2VcfError::NoColumnsDetected);
            }

            let mut mapping = if use_default {
                default_mapping()
            } else {
                suggest_mapping(&table.headers, &FieldAliasTable::web())
            };
            mapping.merge(&overrides_mapping(&overrides));

            let file_name = csv
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let profile = MappingProfile::new(&file_name, &mapping);
            let output = output.unwrap_or_else(|| MappingProfile::default_path_for(&csv));
            profile.save(&output)?;

            print_mapping(&mapping);
            println!("\n✔ Configuration enregistrée : {}", output.display());
        }

        Commands::Interactive => {
            interactive::run_interactive(config.phone_policy())
                .map_err(|e| Csv2VcfError::Interactive(format!("{:#}", e)))?;
        }

        Commands::Config { show, set_country_code, set_delimiter } => {
            let mut config = config;

            if let Some(code) = set_country_code {
                config.set_country_code(code)?;
                println!("✔ Indicatif par défaut : {}", config.country_code);
            }

            if let Some(delimiter) = set_delimiter {
                config.set_delimiter(delimiter)?;
                println!("✔ Délimiteur par défaut : {}", delimiter);
            }

            if show {
                println!("Configuration :");
                println!("  Fichier : {}", Config::config_path()?.display());
                println!("  Indicatif : {}", config.country_code);
                println!(
                    "  Délimiteur : {}",
                    config.default_delimiter.map(|d| d.to_string()).unwrap_or_else(|| "automatique".into())
                );
                println!("  Mode : {}", config.default_mode);
            }
        }
    }

    Ok(())
}
