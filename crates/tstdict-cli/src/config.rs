//! Converter configuration

use crate::wordlist::WordListFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tstdict_core::CompileConfig;

/// Extension appended to the output path for the human-readable dump
pub const DUMP_EXTENSION: &str = "tst";

/// Configuration for one conversion run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// XML word list to read
    pub input: PathBuf,
    /// Binary dictionary to write
    pub output: PathBuf,
    /// Also write a text dump next to the output
    pub verbose: bool,
    /// Read the image back and compare it with the word list before writing
    pub verify: bool,
    /// Compiler settings
    pub compile: CompileConfig,
    /// Word list filtering
    pub filter: WordListFilter,
}

impl ConverterConfig {
    /// Create a configuration with default compiler and filter settings
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            verbose: false,
            verify: false,
            compile: CompileConfig::default(),
            filter: WordListFilter::default(),
        }
    }

    /// Path of the text dump: the output path with `.tst` appended
    pub fn dump_path(&self) -> PathBuf {
        let mut path = self.output.clone().into_os_string();
        path.push(".");
        path.push(DUMP_EXTENSION);
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_path_appends_extension() {
        let config = ConverterConfig::new("words.xml", "out/main.dict");
        assert_eq!(config.dump_path(), PathBuf::from("out/main.dict.tst"));
    }

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::new("in.xml", "out.dict");
        assert!(!config.verbose);
        assert!(!config.verify);
        assert_eq!(config.compile, CompileConfig::default());
        assert_eq!(config.filter.min_frequency, 2);
    }
}
