use core::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Contains the resolution of an output
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors that occur while parsing a resolution from a string
#[derive(Error, Debug)]
pub enum ParseResolutionError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("First integer missing")]
    FirstPart,
    #[error("Second integer missing. Expected format: <width>x<height>")]
    SecondPart,
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split('x');
        let width = parts
            .next()
            .ok_or(ParseResolutionError::FirstPart)?
            .parse()?;
        let height = parts
            .next()
            .ok_or(ParseResolutionError::SecondPart)?
            .parse()?;
        Ok(Self::new(width, height))
    }
}

/// The mode currently driving an active output
///
/// Right after an activation the mode negotiated by xrandr is unknown until
/// the next status query, hence `Auto`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ActiveMode {
    Auto,
    Mode(Resolution),
}

impl fmt::Display for ActiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveMode::Auto => write!(f, "auto"),
            ActiveMode::Mode(resolution) => write!(f, "{}", resolution),
        }
    }
}

/// Placement of a newly activated output relative to an already active one
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RelativePosition {
    SameAs,
    LeftOf,
    RightOf,
    Below,
    Above,
}

impl RelativePosition {
    /// Menu order; user-visible, must stay stable across runs
    pub const ALL: [RelativePosition; 5] = [
        RelativePosition::SameAs,
        RelativePosition::LeftOf,
        RelativePosition::RightOf,
        RelativePosition::Below,
        RelativePosition::Above,
    ];

    /// The label shown in the position menu
    pub fn label(self) -> &'static str {
        match self {
            RelativePosition::SameAs => "Same as",
            RelativePosition::LeftOf => "Left of",
            RelativePosition::RightOf => "Right of",
            RelativePosition::Below => "Below",
            RelativePosition::Above => "Above",
        }
    }

    /// The xrandr flag this placement maps to
    pub fn flag(self) -> &'static str {
        match self {
            RelativePosition::SameAs => "--same-as",
            RelativePosition::LeftOf => "--left-of",
            RelativePosition::RightOf => "--right-of",
            RelativePosition::Below => "--below",
            RelativePosition::Above => "--above",
        }
    }
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An action that can be performed on an output
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Activate,
    Deactivate,
    ChangeResolution,
}
