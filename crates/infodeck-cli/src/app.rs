//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;

use infodeck_export::{ExportConfig, ExportFormat, ExportOptions, ExportResult, ExportService};
use infodeck_svg::{
    compatibility_report, normalize, parse_lenient, to_string, CompatibilityReport,
    NormalizeReport, TextSource,
};

/// Config files looked up in the working directory when `--config` is absent
const CONFIG_CANDIDATES: [&str; 2] = ["infodeck.toml", ".infodeck.toml"];

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "infodeck")]
#[command(author, version, about = "Infographic SVGs to editable slides", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export an SVG to svg, png, pdf or pptx
    Export {
        /// Input SVG file
        input: PathBuf,

        /// Target format
        #[arg(short, long)]
        format: ExportFormat,

        /// Managed output directory (overrides the config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output file name inside the output directory
        #[arg(long)]
        filename: Option<String>,

        /// Slide title (pptx)
        #[arg(long)]
        title: Option<String>,

        /// Raster bounding box width in pixels (png)
        #[arg(long)]
        width: Option<u32>,

        /// Raster bounding box height in pixels (png)
        #[arg(long)]
        height: Option<u32>,

        /// Raster scale factor (png)
        #[arg(long)]
        scale: Option<f32>,

        /// Rewrite foreignObject text into native text (svg)
        #[arg(long)]
        normalize_text: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the export result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite foreignObject text into native SVG text
    Normalize {
        /// Input SVG file
        input: PathBuf,

        /// Output SVG file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report whether an SVG survives presentation software
    Check {
        /// Input SVG file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Strict mode: exit with error code if the SVG is incompatible
        #[arg(long)]
        strict: bool,
    },

    /// Delete a previous export
    Cleanup {
        /// Export identifier (file name inside the output directory)
        identifier: String,

        /// Managed output directory (overrides the config)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List export formats
    Formats {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments of the export command
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub input: PathBuf,
    pub format: ExportFormat,
    pub output_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub options: ExportOptions,
}

impl ExportArgs {
    pub fn new(input: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            input: input.into(),
            format,
            output_dir: None,
            config: None,
            options: ExportOptions::default(),
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            input,
            format,
            output_dir,
            filename,
            title,
            width,
            height,
            scale,
            normalize_text,
            config,
            json,
        } => {
            let args = ExportArgs {
                input,
                format,
                output_dir,
                config,
                options: ExportOptions {
                    filename,
                    title,
                    width,
                    height,
                    scale,
                    normalize_text,
                },
            };
            let result = export_command(&args)?;
            print_export_result(&result, json)?;
        }
        Commands::Normalize { input, output } => {
            let report = normalize_command(&input, output.as_deref())?;
            if output.is_some() {
                println!("Normalized {}: {}", input.display(), report);
            }
        }
        Commands::Check {
            input,
            format,
            strict,
        } => {
            let report = check_command(&input, format)?;
            // Exit with error code in strict mode if the document is incompatible
            if strict && !report.compatible {
                std::process::exit(1);
            }
        }
        Commands::Cleanup {
            identifier,
            output_dir,
            config,
        } => {
            if cleanup_command(&identifier, output_dir.as_deref(), config.as_deref())? {
                println!("Removed {}", identifier);
            } else {
                println!("Nothing to remove: {}", identifier);
            }
        }
        Commands::Formats { json } => {
            formats_command(json)?;
        }
    }

    Ok(())
}

/// Execute the export command
pub fn export_command(args: &ExportArgs) -> Result<ExportResult> {
    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let svg = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;

    let service = build_service(args.output_dir.as_deref(), args.config.as_deref())?;
    let result = service
        .export_as(&svg, args.format, &args.options)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
        .with_context(|| {
            format!(
                "Failed to export {} as {}",
                args.input.display(),
                args.format.label()
            )
        })?;

    Ok(result)
}

fn print_export_result(result: &ExportResult, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(result)
            .context("Failed to serialize export result to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    println!("infodeck v{}", infodeck_export::VERSION);
    println!("Exported {}", result.format.label());
    println!("  Output: {}", result.storage_path.display());
    println!("  Identifier: {}", result.identifier);
    println!("  Size: {} bytes", result.size_bytes);
    if let (Some(width), Some(height)) = (result.width, result.height) {
        println!("  Dimensions: {}x{}", width, height);
    }
    Ok(())
}

/// Execute the normalize command
///
/// Writes the normalized markup to `output`, or to stdout when `None`.
pub fn normalize_command(input: &Path, output: Option<&Path>) -> Result<NormalizeReport> {
    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let mut doc = parse_lenient(&content)
        .with_context(|| format!("Failed to parse SVG: {}", input.display()))?;
    let report = normalize(&mut doc);
    let markup = to_string(&doc).context("Failed to serialize normalized SVG")?;

    match output {
        Some(path) => fs::write(path, markup)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => println!("{}", markup),
    }

    Ok(report)
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat) -> Result<CompatibilityReport> {
    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let doc = parse_lenient(&content)
        .with_context(|| format!("Failed to parse SVG: {}", input.display()))?;
    let report = compatibility_report(&doc);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("foreignObject: {}", report.foreign_objects);
            println!("span: {}", report.spans);
            println!("text: {}", report.text_elements);
            println!();

            if report.compatible {
                println!("✓ {} is presentation compatible", input.display());
            } else {
                println!("✗ {} is not presentation compatible", input.display());
                for issue in &report.issues {
                    println!("  - {}", issue);
                }
            }

            if !report.samples.is_empty() {
                println!();
                println!("Text samples:");
                for sample in &report.samples {
                    let source = match sample.source {
                        TextSource::Text => "text",
                        TextSource::ForeignSpan => "span",
                    };
                    println!("  [{}] {}", source, sample.text);
                }
            }
        }
    }

    Ok(report)
}

/// Execute the cleanup command; `false` when there was nothing to remove
pub fn cleanup_command(
    identifier: &str,
    output_dir: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<bool> {
    let service = build_service(output_dir, config_path)?;
    service
        .cleanup(identifier)
        .map_err(|e| anyhow::anyhow!("[{}] {}", e.code(), e))
        .with_context(|| format!("Failed to remove export: {}", identifier))
}

/// Execute the formats command
pub fn formats_command(json: bool) -> Result<()> {
    let service = ExportService::new(ExportConfig::default());
    let available = service.available_formats();

    if json {
        let entries: Vec<_> = ExportFormat::all()
            .iter()
            .map(|format| {
                json!({
                    "format": format.descriptor(),
                    "available": available.contains(format),
                })
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries)
            .context("Failed to serialize formats to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    for format in ExportFormat::all() {
        let marker = if available.contains(format) { "✓" } else { "-" };
        println!(
            "{} {:<5} {:<24} {}",
            marker,
            format.id(),
            format.label(),
            format.description()
        );
    }
    Ok(())
}

fn build_service(output_dir: Option<&Path>, config_path: Option<&Path>) -> Result<ExportService> {
    let mut config = load_config(config_path)?;
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }
    Ok(ExportService::new(config))
}

/// Load configuration from a file, a file in the working directory, or defaults
pub fn load_config(config_path: Option<&Path>) -> Result<ExportConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            ExportConfig::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        }
        None => {
            for candidate in CONFIG_CANDIDATES {
                if Path::new(candidate).exists() {
                    let content = fs::read_to_string(candidate)?;
                    if let Ok(config) = ExportConfig::from_toml_str(&content) {
                        return Ok(config);
                    }
                }
            }
            Ok(ExportConfig::default())
        }
    }
}
