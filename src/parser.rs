use core::fmt;
use std::cell::{Cell, RefCell};

use thiserror::Error;

use crate::types::{ActiveMode, Resolution};

/// Error type for the status parser
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Unrecognized status line: `{0}`")]
    UnrecognizedLine(String),
    #[error("Invalid mode entry: `{0}`")]
    InvalidModeEntry(String),
}

type Result<T = ()> = std::result::Result<T, ParseError>;

/// Contains the properties of one output as reported by `xrandr --query`
///
/// `active` and `current_mode` use interior mutability so the topology can
/// track applied changes without re-querying. Both are always updated
/// together: a current mode is present exactly when the output is active.
#[derive(Debug)]
pub struct OutputProperties {
    pub name: String,

    pub connected: bool,
    pub active: Cell<bool>,
    pub current_mode: RefCell<Option<ActiveMode>>,

    pub modes: Vec<Resolution>,
}

impl fmt::Display for OutputProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Output {{ name: {}, connected: {}, active: {}, mode: {}, modes: {} }}",
            self.name,
            self.connected,
            self.active.get(),
            self.current_mode
                .borrow()
                .map_or_else(|| "-".to_string(), |mode| mode.to_string()),
            self.modes.len()
        )
    }
}

/// Scanner state while walking the status report line by line
enum ScanState {
    ExpectingHeader,
    InModeBlock,
}

/// Parses the status report of `xrandr --query` into output records
///
/// One record per header line (`<name> connected|disconnected [geometry] ...`),
/// in the order reported. Indented digit-led lines following a header are the
/// mode block of that output; a blank line or a non-digit line ends the block.
pub fn parse_status(text: &str) -> Result<Vec<OutputProperties>> {
    let mut outputs: Vec<OutputProperties> = Vec::new();
    let mut state = ScanState::ExpectingHeader;

    for line in text.lines() {
        let trimmed = line.trim();

        if let ScanState::InModeBlock = state {
            if trimmed.is_empty() {
                state = ScanState::ExpectingHeader;
                continue;
            }
            if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
                let mode = parse_mode_line(trimmed)?;
                if let Some(output) = outputs.last_mut() {
                    output.modes.push(mode);
                }
                continue;
            }
            state = ScanState::ExpectingHeader;
        }

        if trimmed.is_empty() || line.starts_with("Screen ") {
            continue;
        }

        outputs.push(parse_header(trimmed)?);
        state = ScanState::InModeBlock;
    }

    Ok(outputs)
}

/// Parses one output header line
fn parse_header(line: &str) -> Result<OutputProperties> {
    let mut tokens = line.split_whitespace();

    let name = tokens
        .next()
        .ok_or_else(|| ParseError::UnrecognizedLine(line.to_string()))?;
    let connected = match tokens.next() {
        Some("connected") => true,
        Some("disconnected") => false,
        _ => return Err(ParseError::UnrecognizedLine(line.to_string())),
    };

    // The geometry token (`<width>x<height>[+<x>+<y>]`) is present exactly
    // when the output is active. Tokens between the connection state and the
    // geometry (e.g. `primary`) are tolerated.
    let resolution = tokens.find_map(parse_geometry);

    Ok(OutputProperties {
        name: name.to_string(),
        connected,
        active: Cell::new(resolution.is_some()),
        current_mode: RefCell::new(resolution.map(ActiveMode::Mode)),
        modes: Vec::new(),
    })
}

/// Parses one entry of a mode block, e.g. `1920x1080     60.00*+  59.94`
fn parse_mode_line(line: &str) -> Result<Resolution> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::InvalidModeEntry(line.to_string()))?;

    // Interlaced modes are reported as e.g. `1920x1080i`; the suffix is not
    // part of the resolution.
    match leading_resolution(token) {
        Some((resolution, _)) => Ok(resolution),
        None => Err(ParseError::InvalidModeEntry(line.to_string())),
    }
}

/// Matches a token that is an active output geometry (`<w>x<h>` or
/// `<w>x<h>+<x>+<y>`)
fn parse_geometry(token: &str) -> Option<Resolution> {
    let (resolution, rest) = leading_resolution(token)?;
    (rest.is_empty() || rest.starts_with('+')).then_some(resolution)
}

/// Splits a leading `<width>x<height>` off a token, returning the remainder
fn leading_resolution(token: &str) -> Option<(Resolution, &str)> {
    let separator = token.find('x')?;
    let width: u32 = token[..separator].parse().ok()?;

    let rest = &token[separator + 1..];
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits == 0 {
        return None;
    }
    let height: u32 = rest[..digits].parse().ok()?;

    Some((Resolution::new(width, height), &rest[digits..]))
}
