pub mod seed;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::opportunity::Opportunity;

/// Read-only opportunity catalog, fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    opportunities: Vec<Opportunity>,
}

impl Catalog {
    pub fn new(opportunities: Vec<Opportunity>) -> Self {
        Self { opportunities }
    }

    /// Loads `Opportunity[]` JSON from `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let opportunities: Vec<Opportunity> = serde_json::from_str(&raw).with_context(|| {
            format!("catalog {} is not a valid opportunity list", path.display())
        })?;
        info!(
            "Loaded {} opportunities from {}",
            opportunities.len(),
            path.display()
        );
        Ok(Self::new(opportunities))
    }

    /// The catalog file if one is configured, otherwise the built-in seed with
    /// deadlines relative to `now`.
    pub fn load(path: Option<&Path>, now: DateTime<Utc>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let opportunities = seed::seed_opportunities(now);
                info!("Using built-in catalog ({} opportunities)", opportunities.len());
                Ok(Self::new(opportunities))
            }
        }
    }

    pub fn all(&self) -> &[Opportunity] {
        &self.opportunities
    }

    pub fn find(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }
}
