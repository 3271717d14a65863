//! Configuration types for taxfilter

use crate::bio::catalog::CatalogSchema;
use crate::bio::taxonomy::{TaxonId, DEFAULT_NODES_PROGRESS_INTERVAL};
use crate::core::filter::DEFAULT_FILTER_PROGRESS_INTERVAL;
use crate::TaxFilterError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// NCBI taxon id of Viruses
pub const VIRUSES_TAXID: TaxonId = 10239;
/// NCBI taxon id of cellular organisms
pub const CELLULAR_ORGANISMS_TAXID: TaxonId = 131567;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionConfig {
    /// Roots whose descendants are kept
    #[serde(default = "default_include")]
    pub include: Vec<TaxonId>,
    /// Roots whose descendants are removed again; none unless listed
    #[serde(default)]
    pub exclude: Vec<TaxonId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxonomyConfig {
    /// Path to NCBI `nodes.dmp`
    #[serde(default = "default_nodes")]
    pub nodes: PathBuf,
    #[serde(default = "default_nodes_progress_interval")]
    pub progress_interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    #[serde(default)]
    pub schema: CatalogSchema,
    #[serde(default = "default_filter_progress_interval")]
    pub progress_interval: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

// Default value functions
fn default_include() -> Vec<TaxonId> { vec![VIRUSES_TAXID] }
fn default_exclude() -> Vec<TaxonId> { vec![CELLULAR_ORGANISMS_TAXID] }
fn default_nodes() -> PathBuf { PathBuf::from("nodes.dmp") }
fn default_nodes_progress_interval() -> u64 { DEFAULT_NODES_PROGRESS_INTERVAL }
fn default_filter_progress_interval() -> u64 { DEFAULT_FILTER_PROGRESS_INTERVAL }

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: default_exclude(),
        }
    }
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            nodes: default_nodes(),
            progress_interval: default_nodes_progress_interval(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            schema: CatalogSchema::default(),
            progress_interval: default_filter_progress_interval(),
            limit: None,
        }
    }
}

impl Config {
    /// Reject settings that would make a run meaningless
    pub fn validate(&self) -> Result<(), TaxFilterError> {
        if self.selection.include.is_empty() {
            return Err(TaxFilterError::Config(
                "at least one include taxon is required".to_string(),
            ));
        }
        if self.taxonomy.progress_interval == 0 || self.filter.progress_interval == 0 {
            return Err(TaxFilterError::Config(
                "progress_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, TaxFilterError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| TaxFilterError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| TaxFilterError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), TaxFilterError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| TaxFilterError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
