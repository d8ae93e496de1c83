//! Metro line identifiers.

use std::fmt;

/// Error returned when parsing an unknown line id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown line id: {id}")]
pub struct InvalidLine {
    id: String,
}

/// One of the six Taipei Metro lines.
///
/// Lines form a closed set, fixed at build time. Each has a short storage
/// id (`r`, `bl`, `g`, `o`, `br`, `y`) used as the durable-storage value
/// for the selected route.
///
/// # Examples
///
/// ```
/// use metro_board::domain::Line;
///
/// let red = Line::parse("r").unwrap();
/// assert_eq!(red, Line::Red);
/// assert_eq!(red.id(), "r");
///
/// assert!(Line::parse("purple").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Red,
    Blue,
    Green,
    Orange,
    Brown,
    Yellow,
}

/// All lines, in display order.
pub const ALL_LINES: [Line; 6] = [
    Line::Red,
    Line::Blue,
    Line::Green,
    Line::Orange,
    Line::Brown,
    Line::Yellow,
];

impl Line {
    /// Parse a line from its storage id.
    pub fn parse(id: &str) -> Result<Self, InvalidLine> {
        match id {
            "r" => Ok(Line::Red),
            "bl" => Ok(Line::Blue),
            "g" => Ok(Line::Green),
            "o" => Ok(Line::Orange),
            "br" => Ok(Line::Brown),
            "y" => Ok(Line::Yellow),
            other => Err(InvalidLine {
                id: other.to_string(),
            }),
        }
    }

    /// The short storage id for this line.
    pub fn id(&self) -> &'static str {
        match self {
            Line::Red => "r",
            Line::Blue => "bl",
            Line::Green => "g",
            Line::Orange => "o",
            Line::Brown => "br",
            Line::Yellow => "y",
        }
    }

    /// Human-readable English name.
    pub fn name(&self) -> &'static str {
        match self {
            Line::Red => "Red",
            Line::Blue => "Blue",
            Line::Green => "Green",
            Line::Orange => "Orange",
            Line::Brown => "Brown",
            Line::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
