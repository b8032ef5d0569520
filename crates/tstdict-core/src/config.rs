//! Compiler configuration

use crate::tst::DEFAULT_TABLE_SIZE;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a compile run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
    /// Buckets in the canonicalization table; must comfortably exceed the node count
    pub table_size: usize,
    /// Emission pass budget; derived from the graph depth when unset
    pub max_emit_passes: Option<usize>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            table_size: DEFAULT_TABLE_SIZE,
            max_emit_passes: None,
        }
    }
}

impl CompileConfig {
    /// Create with a custom table size
    pub fn with_table_size(table_size: usize) -> Result<Self> {
        let config = Self {
            table_size,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.table_size == 0 || self.table_size > u32::MAX as usize {
            return Err(CoreError::Configuration(format!(
                "table size must be between 1 and {}",
                u32::MAX
            )));
        }
        if self.max_emit_passes == Some(0) {
            return Err(CoreError::Configuration(
                "emission pass budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
