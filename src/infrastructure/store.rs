//! Portfolio snapshot store
//!
//! Contracts live in a single JSON snapshot file; stages are embedded in
//! each contract. This is deliberately just a file - persistence design is
//! someone else's problem, the engine only needs a snapshot to read.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::Contract;
use crate::error::{FlowcastError, FlowcastResult};

#[derive(Debug, Default, Deserialize)]
struct PortfolioFile {
    #[serde(default)]
    contracts: Vec<Contract>,
}

#[derive(Serialize)]
struct PortfolioFileRef<'a> {
    contracts: &'a [Contract],
}

/// File-backed portfolio of contracts.
pub struct PortfolioStore {
    path: PathBuf,
}

impl PortfolioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> FlowcastResult<Vec<Contract>> {
        if !self.path.exists() {
            return Err(FlowcastError::SnapshotNotFound {
                path: self.path.clone(),
            });
        }
        let raw = fs::read_to_string(&self.path)?;
        let file: PortfolioFile =
            serde_json::from_str(&raw).map_err(|e| FlowcastError::InvalidSnapshot {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(file.contracts)
    }

    pub fn save(&self, contracts: &[Contract]) -> FlowcastResult<()> {
        let json = serde_json::to_string_pretty(&PortfolioFileRef { contracts })?;
        fs::write(&self.path, json + "\n")?;
        Ok(())
    }
}
