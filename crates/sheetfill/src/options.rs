use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis along which lists and record arrays grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Lists insert rows; record arrays duplicate the trailing column.
    #[default]
    Vertical,
    /// Lists push cells to the right; record arrays replicate a row block.
    Horizontal,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(format!("unknown direction '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstituteOptions {
    /// Duplicate every cell of an exploded column/row block, not only the ones that
    /// reference the record array or hold a `%"constant"%`.
    pub duplicate_all: bool,
    pub direction: Direction,
    /// Blank (or strip) placeholders that resolve to nothing instead of leaving them.
    pub remove_non_existent: bool,
    /// Drop `fit:auto` from every replicated row block except the last one.
    pub strip_repeated_fit: bool,
}

impl Default for SubstituteOptions {
    fn default() -> Self {
        Self {
            duplicate_all: true,
            direction: Direction::Vertical,
            remove_non_existent: false,
            strip_repeated_fit: true,
        }
    }
}

impl SubstituteOptions {
    pub fn with_duplicate_all(mut self, duplicate_all: bool) -> Self {
        self.duplicate_all = duplicate_all;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_remove_non_existent(mut self, remove: bool) -> Self {
        self.remove_non_existent = remove;
        self
    }

    pub fn with_strip_repeated_fit(mut self, strip: bool) -> Self {
        self.strip_repeated_fit = strip;
        self
    }
}
