//! Report settings read from `.portfolio-report.toml`.
use crate::error::{Error, Result};
use crate::region::default_regions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".portfolio-report.toml";
const MAX_TRAVERSAL_DEPTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Known regions, in matching order.
    pub regions: Vec<String>,
    /// Rows kept in the top-N ranking reports.
    pub top_n: usize,
    pub currency_symbol: String,
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            regions: default_regions(),
            top_n: 5,
            currency_symbol: "S/".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.regions.iter().all(|r| r.trim().is_empty()) {
            return Err(Error::Config("region list must not be empty".to_string()));
        }
        if self.top_n == 0 {
            return Err(Error::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<ReportConfig> {
    let config: ReportConfig = toml::from_str(contents)
        .map_err(|e| Error::Config(format!("failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file. Unlike discovery, a missing file
/// here is an error.
pub fn load_config_from(path: &Path) -> Result<ReportConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let config = parse_config(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Look for [`CONFIG_FILE_NAME`] in `start` and its ancestors. Falls back to
/// defaults when none is found; a file that exists but is invalid is an
/// error.
pub fn discover_config(start: &Path) -> Result<ReportConfig> {
    let found = start
        .ancestors()
        .take(MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file());
    match found {
        Some(path) => load_config_from(&path),
        None => {
            log::debug!(
                "no {} within {} directories of {}, using defaults",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH,
                start.display()
            );
            Ok(ReportConfig::default())
        }
    }
}
