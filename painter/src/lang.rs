//! The painter command language.
//!
//! One command per line, whitespace-separated tokens, blank lines skipped:
//!
//! | Command | Operation |
//! |---------|-----------|
//! | `white` / `green` | [`Operation::SetBackground`] |
//! | `update` | [`Operation::MarkReady`] |
//! | `bgrect x1 y1 x2 y2` | [`Operation::SetOverlayRect`] |
//! | `figure x y` | [`Operation::AddShape`] |
//! | `move x y` | [`Operation::MoveShapes`] |
//! | `reset` | [`Operation::Reset`] |
//!
//! Coordinates are resolved to absolute canvas pixels here, according to the
//! configured [`CoordinateMode`], so operations never see relative input.
//! The first bad line rejects the whole script.

#[cfg(test)]
#[path = "lang_test.rs"]
mod lang_test;

use std::fmt;
use std::str::FromStr;

use crate::consts::CANVAS_SIZE;
use crate::op::Operation;
use crate::surface::{Color, Point, Rect, Size};

/// How numeric command arguments are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
    /// Fractions of the canvas extent, typically in `0.0..=1.0`.
    #[default]
    Fraction,
    /// Integer pixel coordinates.
    Absolute,
}

impl CoordinateMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fraction => "fraction",
            Self::Absolute => "absolute",
        }
    }
}

impl fmt::Display for CoordinateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown coordinate mode '{0}' (expected 'fraction' or 'absolute')")]
pub struct UnknownCoordinateMode(pub String);

impl FromStr for CoordinateMode {
    type Err = UnknownCoordinateMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fraction" => Ok(Self::Fraction),
            "absolute" => Ok(Self::Absolute),
            other => Err(UnknownCoordinateMode(other.to_owned())),
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Extent that fractional coordinates scale against.
    pub canvas: Size,
    pub coords: CoordinateMode,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { canvas: CANVAS_SIZE, coords: CoordinateMode::default() }
    }
}

impl ParseConfig {
    #[must_use]
    pub fn with_coords(coords: CoordinateMode) -> Self {
        Self { coords, ..Self::default() }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Why a line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("expected {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },
    #[error("invalid {mode} coordinate '{token}'")]
    InvalidNumber { token: String, mode: CoordinateMode },
}

/// A rejected script line. `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line} '{text}': {kind}")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    pub kind: ParseErrorKind,
}

// =============================================================================
// PARSER
// =============================================================================

/// Parse a whole script into operations, in script order.
///
/// # Errors
///
/// Returns the first [`ParseError`]; no operations are produced in that case.
pub fn parse(script: &str, config: &ParseConfig) -> Result<Vec<Operation>, ParseError> {
    let mut ops = Vec::new();
    for (idx, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let op = parse_line(line, config).map_err(|kind| ParseError { line: idx + 1, text: line.to_owned(), kind })?;
        ops.push(op);
    }
    Ok(ops)
}

/// Parse one non-empty command line.
///
/// # Errors
///
/// Returns the [`ParseErrorKind`] describing why the line is invalid.
pub fn parse_line(line: &str, config: &ParseConfig) -> Result<Operation, ParseErrorKind> {
    let mut tokens = line.split_whitespace();
    let Some(cmd) = tokens.next() else {
        return Err(ParseErrorKind::UnknownCommand(String::new()));
    };
    let args: Vec<&str> = tokens.collect();

    match cmd {
        "white" => no_args(&args, Operation::SetBackground(Color::WHITE)),
        "green" => no_args(&args, Operation::SetBackground(Color::GREEN)),
        "update" => no_args(&args, Operation::MarkReady),
        "reset" => no_args(&args, Operation::Reset),
        "bgrect" => {
            let [x1, y1, x2, y2] = coords::<4>(&args, config)?;
            Ok(Operation::SetOverlayRect(Rect::new(x1, y1, x2, y2)))
        }
        "figure" => {
            let [x, y] = coords::<2>(&args, config)?;
            Ok(Operation::AddShape(Point::new(x, y)))
        }
        "move" => {
            let [x, y] = coords::<2>(&args, config)?;
            Ok(Operation::MoveShapes(Point::new(x, y)))
        }
        other => Err(ParseErrorKind::UnknownCommand(other.to_owned())),
    }
}

fn no_args(args: &[&str], op: Operation) -> Result<Operation, ParseErrorKind> {
    if args.is_empty() {
        Ok(op)
    } else {
        Err(ParseErrorKind::ArgumentCount { expected: 0, found: args.len() })
    }
}

/// Resolve `N` coordinate arguments. Even positions are x, odd positions are y.
fn coords<const N: usize>(args: &[&str], config: &ParseConfig) -> Result<[i32; N], ParseErrorKind> {
    if args.len() != N {
        return Err(ParseErrorKind::ArgumentCount { expected: N, found: args.len() });
    }
    let mut out = [0; N];
    for (i, (slot, token)) in out.iter_mut().zip(args).enumerate() {
        let extent = if i % 2 == 0 { config.canvas.width } else { config.canvas.height };
        *slot = resolve(token, extent, config.coords)?;
    }
    Ok(out)
}

#[allow(clippy::cast_possible_truncation)]
fn resolve(token: &str, extent: u32, mode: CoordinateMode) -> Result<i32, ParseErrorKind> {
    let invalid = || ParseErrorKind::InvalidNumber { token: token.to_owned(), mode };
    match mode {
        CoordinateMode::Fraction => {
            let value = token.parse::<f64>().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            // Truncation toward zero; `as` saturates out-of-range values.
            Ok((value * f64::from(extent)) as i32)
        }
        CoordinateMode::Absolute => token.parse::<i32>().map_err(|_| invalid()),
    }
}
