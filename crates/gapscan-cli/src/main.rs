use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{eyre, WrapErr};
use gapscan_core::{
    CfnTemplate, Config, FilePatternSource, PatternCatalog, Scanner, TemplateFinder,
};

mod output;

#[derive(Parser)]
#[command(name = "gapscan")]
#[command(version)]
#[command(about = "Capability coverage analysis for CloudFormation templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan templates and report capability gaps
    Scan {
        /// Template files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Catalogue file (overrides configuration)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// List the capabilities known for a resource type
    Capabilities {
        /// Resource type, e.g. AWS::S3::Bucket
        resource_type: String,

        /// Catalogue file (overrides configuration)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Scan {
            paths,
            catalog,
            format,
        } => scan(&config, &paths, catalog, format),
        Commands::Capabilities {
            resource_type,
            catalog,
        } => capabilities(&config, &resource_type, catalog),
    }
}

fn load_scanner(config: &Config, catalog_flag: Option<PathBuf>) -> color_eyre::Result<Scanner> {
    let catalog_path = catalog_flag.unwrap_or_else(|| PathBuf::from(&config.catalog.path));
    let source = FilePatternSource::load(&catalog_path)
        .wrap_err_with(|| format!("Failed to load catalogue {}", catalog_path.display()))?;
    let catalog = PatternCatalog::from_source(&source)
        .wrap_err_with(|| format!("Failed to build catalogue {}", catalog_path.display()))?;
    if catalog.is_empty() {
        return Err(eyre!(
            "Catalogue {} contains no patterns",
            catalog_path.display()
        ));
    }
    Ok(Scanner::new(catalog))
}

fn scan(
    config: &Config,
    paths: &[PathBuf],
    catalog: Option<PathBuf>,
    format: OutputFormat,
) -> color_eyre::Result<()> {
    let scanner = load_scanner(config, catalog)?;

    let mut templates = Vec::new();
    for path in paths {
        let found = TemplateFinder::with_config(path, config.discovery.clone()).find();
        if found.is_empty() {
            return Err(eyre!("No templates found under {}", path.display()));
        }
        templates.extend(found);
    }

    let mut scans = Vec::new();
    for path in templates {
        let template = CfnTemplate::load(&path)
            .wrap_err_with(|| format!("Failed to load template {}", path.display()))?;
        let resources = scanner
            .scan_template(&template)
            .wrap_err_with(|| format!("Failed to scan {}", path.display()))?;
        scans.push(output::TemplateScan {
            template: path.display().to_string(),
            resources,
        });
    }

    match format {
        OutputFormat::Text => output::render_text(&scans),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scans)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&scans)?),
    }
    Ok(())
}

fn capabilities(
    config: &Config,
    resource_type: &str,
    catalog: Option<PathBuf>,
) -> color_eyre::Result<()> {
    let scanner = load_scanner(config, catalog)?;

    let patterns = scanner
        .catalog()
        .patterns_for(resource_type)
        .ok_or_else(|| eyre!("No capabilities registered for {resource_type}"))?;

    // A capability appears once per known pattern.
    let mut counted: Vec<(&gapscan_core::Capability, usize)> = Vec::new();
    for (capability, _) in patterns {
        match counted.iter_mut().find(|(c, _)| c.id == capability.id) {
            Some((_, count)) => *count += 1,
            None => counted.push((capability, 1)),
        }
    }

    println!("Capabilities for {resource_type}:");
    for (capability, count) in counted {
        if count == 1 {
            println!("  - {} ({})", capability.title, capability.id);
        } else {
            println!(
                "  - {} ({}) - {} alternative patterns",
                capability.title, capability.id, count
            );
        }
    }
    Ok(())
}
