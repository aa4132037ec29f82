//! CLI Tooling
//!
//! Command-line interface over the dataset catalog. Every command returns
//! its rendered output as a string; `--format json` output is a stable
//! contract for scripts.

use crate::catalog::{Catalog, CatalogSettings};
use crate::config::{ConfigLoader, ResolvedPaths, TabpageConfig};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tooling::format::{
    format_dataset_text, format_list_text, format_page_text, format_schema_text,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Tabpage CLI - upload tabular files and page through them
#[derive(Parser)]
#[command(name = "tabpage")]
#[command(about = "Upload tabular files and page through them with bounded memory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (uploads and metadata live here)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging settings.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Upload a tabular file
    Upload {
        /// File to upload
        path: PathBuf,
        /// Store under this name instead of the file's own name
        #[arg(long)]
        name: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one page of rows
    Page {
        /// Dataset name
        name: String,
        /// Page number, starting at 1
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        page: i64,
        /// Rows per page (defaults to paging.default_page_size)
        #[arg(long)]
        page_size: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the columns of a dataset
    Schema {
        /// Dataset name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List uploaded datasets, newest first
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Copy a stored dataset to a local file
    Download {
        /// Dataset name
        name: String,
        /// Destination path
        #[arg(long)]
        output: PathBuf,
    },
    /// Delete a dataset and its metadata
    Delete {
        /// Dataset name
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::InvalidArgument(format!(
            "unknown output format '{}' (expected 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ApiError::StorageError(crate::error::StorageError::Serialization(e.to_string()))
    })
}

/// CLI context holding the loaded configuration and catalog
pub struct CliContext {
    catalog: Catalog,
    config: TabpageConfig,
    paths: ResolvedPaths,
}

impl CliContext {
    /// Create a new CLI context.
    ///
    /// `data_dir` (the `--data-dir` flag) wins over `storage.data_dir` from
    /// config files and the environment.
    pub fn new(data_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let lookup_dir = data_dir
            .clone()
            .unwrap_or_else(crate::config::paths::default_data_dir);
        let mut config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&lookup_dir)?,
        };
        if let Some(dir) = data_dir {
            config.storage.data_dir = Some(absolute(&dir));
        }

        let paths = config.storage.resolve_paths()?;
        let catalog = Catalog::open(&paths, CatalogSettings::from(&config));

        Ok(Self {
            catalog,
            config,
            paths,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &TabpageConfig {
        &self.config
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Upload { path, name, format } => {
                self.handle_upload(path, name.as_deref(), parse_format(format)?)
            }
            Commands::Page {
                name,
                page,
                page_size,
                format,
            } => {
                let format = parse_format(format)?;
                let page_size = page_size.unwrap_or(self.config.paging.default_page_size);
                let view = self.catalog.get_page(name, *page, page_size)?;
                match format {
                    OutputFormat::Text => Ok(format_page_text(&view)),
                    OutputFormat::Json => to_json(&view),
                }
            }
            Commands::Schema { name, format } => {
                let format = parse_format(format)?;
                let schema = self.catalog.schema(name)?;
                match format {
                    OutputFormat::Text => Ok(format_schema_text(&schema)),
                    OutputFormat::Json => to_json(&schema),
                }
            }
            Commands::List { format } => {
                let format = parse_format(format)?;
                let datasets = self.catalog.list()?;
                match format {
                    OutputFormat::Text => Ok(format_list_text(&datasets)),
                    OutputFormat::Json => to_json(&json!({
                        "total": datasets.len(),
                        "datasets": datasets,
                    })),
                }
            }
            Commands::Download { name, output } => {
                let bytes = self.catalog.download(name)?;
                std::fs::write(output, &bytes).map_err(crate::error::StorageError::IoError)?;
                Ok(format!(
                    "Wrote {} bytes to {}",
                    bytes.len(),
                    output.display()
                ))
            }
            Commands::Delete { name, force } => self.handle_delete(name, *force),
        }
    }

    fn handle_upload(
        &self,
        path: &Path,
        name: Option<&str>,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ApiError::NotFound(format!("file {} does not exist", path.display()))
            }
            _ => ApiError::StorageError(crate::error::StorageError::IoError(e)),
        })?;
        let filename = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ApiError::InvalidArgument(format!(
                        "cannot derive a dataset name from {}",
                        path.display()
                    ))
                })?,
        };

        info!(source = %path.display(), "uploading");
        let dataset = self.catalog.register(&filename, &bytes)?;
        match format {
            OutputFormat::Text => Ok(format_dataset_text(&dataset)),
            OutputFormat::Json => to_json(&dataset),
        }
    }

    fn handle_delete(&self, name: &str, force: bool) -> Result<String, ApiError> {
        if !force {
            use dialoguer::Confirm;
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete dataset '{}'?", name))
                .interact()
                .map_err(|e| ApiError::ConfigError(format!("Failed to get user input: {}", e)))?;

            if !confirmed {
                return Ok("Deletion cancelled".to_string());
            }
        }

        self.catalog.delete(name)?;
        Ok(format!("Deleted dataset: {}", name))
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    dunce::canonicalize(path).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}
