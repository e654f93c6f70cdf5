//! Script submission: parse a whole script, then hand it to the loop.
//!
//! A script is submitted as one [`Operation::Batch`] so its operations are
//! applied back to back, never interleaved with another producer's. A script
//! that fails to parse submits nothing.

use painter::{LoopError, LoopHandle, Operation, ParseConfig, ParseError, lang};
use tracing::{debug, info};

use super::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("script is not valid UTF-8 at line {line}")]
    Encoding { line: usize },
    #[error(transparent)]
    Loop(#[from] LoopError),
}

impl ScriptError {
    /// Offending 1-based script line, for parse errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse(e) => Some(e.line),
            Self::Encoding { line } => Some(*line),
            Self::Loop(_) => None,
        }
    }
}

impl ErrorCode for ScriptError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) | Self::Encoding { .. } => "E_PARSE",
            Self::Loop(LoopError::Stopped) => "E_STOPPED",
            Self::Loop(_) => "E_LOOP",
        }
    }
}

/// Decode a raw request body as a script.
///
/// # Errors
///
/// Returns [`ScriptError::Encoding`] naming the 1-based line of the first
/// invalid byte.
pub fn decode(body: &[u8]) -> Result<&str, ScriptError> {
    std::str::from_utf8(body).map_err(|e| {
        let valid = body.get(..e.valid_up_to()).unwrap_or_default();
        let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
        ScriptError::Encoding { line }
    })
}

/// Parse `script` and submit it. Returns the number of top-level operations.
///
/// An empty script is accepted and submits nothing.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] for the first bad line and
/// [`ScriptError::Loop`] if the loop no longer accepts work.
pub async fn submit(handle: &LoopHandle, config: &ParseConfig, script: &str) -> Result<usize, ScriptError> {
    let ops = lang::parse(script, config)?;
    let count = ops.len();
    if count == 0 {
        debug!("empty script; nothing submitted");
        return Ok(0);
    }

    handle.post_async(Operation::Batch(ops)).await?;
    info!(operations = count, pending = handle.pending(), "script submitted");
    Ok(count)
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
