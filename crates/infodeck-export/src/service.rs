//! Export service
//!
//! Dispatches an export request to the strategy for its format and manages
//! the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use infodeck_render::{PdfRenderer, PngRenderer};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;
use crate::request::{ExportOptions, ExportResult};
use crate::strategy::{ExportStrategy, PdfStrategy, PngStrategy, PptxStrategy, SvgStrategy};

/// Export service
///
/// Holds no per-request state: one instance can serve concurrent requests
/// by reference. Output names are unique per request unless the caller
/// chooses the file name.
///
/// # Example
///
/// ```no_run
/// use infodeck_export::{ExportConfig, ExportOptions, ExportService};
///
/// let service = ExportService::new(ExportConfig::default());
/// let svg = std::fs::read_to_string("chart.svg")?;
/// let result = service.export(&svg, "pptx", &ExportOptions::new().with_title("Q1"))?;
/// println!("{} ({} bytes)", result.storage_path.display(), result.size_bytes);
/// # Ok::<(), infodeck_export::ExportError>(())
/// ```
pub struct ExportService {
    config: ExportConfig,
    /// Registered strategies, one per format
    strategies: Vec<Box<dyn ExportStrategy>>,
}

impl ExportService {
    /// Create a service with the built-in strategies
    pub fn new(config: ExportConfig) -> Self {
        let png = PngRenderer::new();
        let strategies: Vec<Box<dyn ExportStrategy>> = vec![
            Box::new(SvgStrategy),
            Box::new(PngStrategy::new(png.clone(), config.raster.clone())),
            Box::new(PdfStrategy::new(PdfRenderer::new())),
            Box::new(PptxStrategy::new(config.slide.clone(), png)),
        ];
        Self { config, strategies }
    }

    /// Create a service with no strategies (for testing)
    pub fn empty(config: ExportConfig) -> Self {
        Self {
            config,
            strategies: Vec::new(),
        }
    }

    /// Register a strategy, replacing any existing one for its format
    pub fn register(&mut self, strategy: Box<dyn ExportStrategy>) {
        let format = strategy.format();
        self.strategies.retain(|s| s.format() != format);
        debug!(%format, "Registered export strategy");
        self.strategies.push(strategy);
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Managed output directory
    pub fn output_dir(&self) -> &Path {
        &self.config.output.dir
    }

    /// Formats whose backend is compiled in
    pub fn available_formats(&self) -> Vec<ExportFormat> {
        ExportFormat::all()
            .iter()
            .copied()
            .filter(|f| self.strategy(*f).is_some_and(|s| s.is_available()))
            .collect()
    }

    fn strategy(&self, format: ExportFormat) -> Option<&dyn ExportStrategy> {
        self.strategies
            .iter()
            .find(|s| s.format() == format)
            .map(|s| s.as_ref())
    }

    /// Export `svg` to the format named by `format`
    ///
    /// An unknown format fails with [`ExportError::UnsupportedFormat`] before
    /// anything is read or written.
    pub fn export(&self, svg: &str, format: &str, options: &ExportOptions) -> Result<ExportResult> {
        let format: ExportFormat = format.parse()?;
        self.export_as(svg, format, options)
    }

    /// Export `svg` to `format`
    pub fn export_as(
        &self,
        svg: &str,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let strategy = self
            .strategy(format)
            .ok_or_else(|| ExportError::UnsupportedFormat(format.to_string()))?;
        if !strategy.is_available() {
            return Err(ExportError::MissingOptionalDependency(format!(
                "{} export is not available in this build",
                format.label()
            )));
        }
        if svg.trim().is_empty() {
            return Err(ExportError::MalformedDocument("empty document".to_string()));
        }

        let identifier = self.identifier_for(format, options)?;
        fs::create_dir_all(self.output_dir())?;
        let storage_path = self.output_dir().join(&identifier);

        debug!(%format, identifier = %identifier, "Starting export");
        let written = strategy.export(svg, options, &storage_path)?;
        let size_bytes = fs::metadata(&storage_path)?.len();

        info!(
            %format,
            identifier = %identifier,
            size_bytes,
            "Export complete"
        );
        Ok(ExportResult {
            format,
            identifier,
            storage_path,
            size_bytes,
            width: written.width,
            height: written.height,
        })
    }

    /// Output file name for a request
    ///
    /// A caller-supplied name is reduced to its final component and given
    /// the format's extension; otherwise `<stem>-<uuid>.<ext>`.
    fn identifier_for(&self, format: ExportFormat, options: &ExportOptions) -> Result<String> {
        let ext = format.extension();
        match options.filename.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let base = Path::new(name)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| ExportError::InvalidIdentifier(name.to_string()))?;
                let has_ext = Path::new(base)
                    .extension()
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext));
                let identifier = if has_ext {
                    base.to_string()
                } else {
                    format!("{}.{}", base, ext)
                };
                validate_identifier(&identifier)?;
                Ok(identifier)
            }
            _ => Ok(format!(
                "{}-{}.{}",
                self.config.output.stem,
                Uuid::new_v4(),
                ext
            )),
        }
    }

    /// Path of an existing export
    ///
    /// Identifiers are plain file names; anything that could leave the output
    /// directory is rejected.
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        validate_identifier(identifier)?;
        let path = self.output_dir().join(identifier);
        if !path.is_file() {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("export not found: {}", identifier),
            )));
        }
        Ok(path)
    }

    /// Contents of an export as standard base64
    pub fn encode_base64(&self, identifier: &str) -> Result<String> {
        let bytes = fs::read(self.resolve(identifier)?)?;
        Ok(STANDARD.encode(bytes))
    }

    /// Delete an export; `Ok(false)` when it was already gone
    pub fn cleanup(&self, identifier: &str) -> Result<bool> {
        validate_identifier(identifier)?;
        let path = self.output_dir().join(identifier);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(identifier = %identifier, "Removed export");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn validate_identifier(identifier: &str) -> Result<()> {
    let invalid = identifier.is_empty()
        || identifier.starts_with('.')
        || identifier.contains(['/', '\\', '\0'])
        || identifier.contains("..")
        || Path::new(identifier).is_absolute();
    if invalid {
        return Err(ExportError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(())
}
