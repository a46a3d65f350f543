//! One-shot commands behind the `mvtgen` binary.
//!
//! [`execute`] runs one [`Action`] against a [`ConfigurationService`] and writes the result
//! to any writer, so the binary and tests share the same path.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use mvtgen::{ConfigurationService, ServiceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("write output: {0}")]
    Write(#[from] std::io::Error),
    #[error("{0}")]
    Service(#[from] ServiceError),
    #[error("serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// What to do, independent of argument parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Generate (or update, when `existing` is set) and print canonical JSON.
    Generate {
        description: String,
        existing: Option<PathBuf>,
    },
    /// Print `{"valid":..}` for the input; `None` or `-` reads stdin.
    Validate { input: Option<PathBuf> },
    /// Print the model's explanation of the input; `None` or `-` reads stdin.
    Explain { input: Option<PathBuf> },
}

/// Reads `path`, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|source| CliError::Read {
                path: p.display().to_string(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(buf)
        }
    }
}

/// Runs `action`. Returns `Ok(false)` when the command completed but the answer is
/// negative (invalid JSON), so the binary can exit non-zero.
pub async fn execute<W: Write>(
    action: &Action,
    service: &ConfigurationService,
    out: &mut W,
) -> Result<bool, CliError> {
    match action {
        Action::Generate {
            description,
            existing,
        } => {
            let existing = existing
                .as_deref()
                .map(|p| read_input(Some(p)))
                .transpose()?;
            let json = service
                .generate_or_update(description, existing.as_deref())
                .await?;
            writeln!(out, "{}", json)?;
            Ok(true)
        }
        Action::Validate { input } => {
            let text = read_input(input.as_deref())?;
            let result = service.validate_only(&text);
            writeln!(out, "{}", serde_json::to_string(&result)?)?;
            Ok(result.valid)
        }
        Action::Explain { input } => {
            let text = read_input(input.as_deref())?;
            let explanation = service.explain(&text).await?;
            writeln!(out, "{}", explanation.trim_end())?;
            Ok(true)
        }
    }
}
