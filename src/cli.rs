//! Command-line arguments.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;

use crate::config::StorageBackend;

pub const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";

#[derive(Debug, Parser)]
#[command(name = "seq-shortener")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Storage backend [default: in-memory]
    #[arg(long, env = STORAGE_BACKEND_ENV, value_enum)]
    pub storage: Option<StorageBackend>,

    /// Dotenv file to load before reading configuration [default: .env if present]
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

impl Cli {
    /// Loads the dotenv file into the process environment.
    ///
    /// Variables already present in the environment win over the file.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file cannot be read.
    pub fn load_env_file(&self) -> Result<()> {
        match &self.env_file {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load env file {}", path.display()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Ok(())
    }

    /// Resolves the storage backend.
    ///
    /// The flag wins; otherwise `STORAGE_BACKEND` is read again so a value
    /// coming from the dotenv file is honored.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORAGE_BACKEND` names an unknown backend.
    pub fn storage_backend(&self) -> Result<StorageBackend> {
        if let Some(storage) = self.storage {
            return Ok(storage);
        }

        match env::var(STORAGE_BACKEND_ENV) {
            Ok(value) => StorageBackend::from_str(&value, true)
                .map_err(|e| anyhow!("Invalid {STORAGE_BACKEND_ENV}: {e}")),
            Err(_) => Ok(StorageBackend::InMemory),
        }
    }
}
