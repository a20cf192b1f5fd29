//! Prompt template loading.
//!
//! The two pipeline stages are driven by plain-text system prompts kept on
//! disk so operators can tune them without rebuilding. An empty template is
//! as fatal as a missing one: the model would be running unguided.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Translator system prompt file name.
pub const TRANSLATOR_FILE: &str = "translator.txt";

/// Configurator system prompt file name.
pub const CONFIGURATOR_FILE: &str = "configurator.txt";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Prompt file not found: {0}")]
    NotFound(PathBuf),
    #[error("Prompt file is empty: {0}")]
    Empty(PathBuf),
    #[error("Cannot read prompt file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The loaded prompt pair.
#[derive(Debug, Clone)]
pub struct PromptSet {
    /// System prompt for requirement -> category translation.
    pub translator: String,
    /// System prompt for category -> configuration generation.
    pub configurator: String,
}

impl PromptSet {
    /// Load both templates from a directory. Fails fast, before any model
    /// call can happen.
    pub fn load(dir: &Path) -> Result<Self, PromptError> {
        Ok(Self {
            translator: load_template(&dir.join(TRANSLATOR_FILE))?,
            configurator: load_template(&dir.join(CONFIGURATOR_FILE))?,
        })
    }
}

fn load_template(path: &Path) -> Result<String, PromptError> {
    if !path.exists() {
        return Err(PromptError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| PromptError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PromptError::Empty(path.to_path_buf()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_both_templates() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), TRANSLATOR_FILE, "You are a translator.\n");
        write(dir.path(), CONFIGURATOR_FILE, "You are a configurator.");

        let prompts = PromptSet::load(dir.path()).unwrap();
        assert_eq!(prompts.translator, "You are a translator.");
        assert_eq!(prompts.configurator, "You are a configurator.");
    }

    #[test]
    fn test_missing_translator_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), CONFIGURATOR_FILE, "configurator");

        match PromptSet::load(dir.path()) {
            Err(PromptError::NotFound(path)) => {
                assert!(path.ends_with(TRANSLATOR_FILE));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_only_template_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), TRANSLATOR_FILE, "   \n\t\n");
        write(dir.path(), CONFIGURATOR_FILE, "configurator");

        match PromptSet::load(dir.path()) {
            Err(PromptError::Empty(path)) => {
                assert!(path.ends_with(TRANSLATOR_FILE));
            }
            other => panic!("expected Empty, got {:?}", other),
        }
    }
}
