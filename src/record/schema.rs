//! Field layouts understood by the access-log series.

use std::fmt;

/// Columns written for the `common` layout, in wire order.
pub const COMMON_COLUMNS: [&str; 5] = ["remoteHost", "userName", "query", "status", "bytes"];

/// Columns written for the `combined` layout, in wire order.
pub const COMBINED_COLUMNS: [&str; 9] = [
    "remoteHost",
    "userName",
    "query",
    "status",
    "bytes",
    "virtualHost",
    "method",
    "referer",
    "userAgent",
];

/// Record layout selected by the `pattern` option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LogPattern {
    #[default]
    Common,
    Combined,
}

impl LogPattern {
    /// Resolve a pattern name.
    ///
    /// Only the exact literal `combined` selects [`LogPattern::Combined`];
    /// every other value, including unknown names, selects
    /// [`LogPattern::Common`].
    pub fn from_name(name: &str) -> Self {
        if name == "combined" {
            Self::Combined
        } else {
            Self::Common
        }
    }

    /// Whether `name` is one of the two recognised literals.
    pub fn is_recognised(name: &str) -> bool {
        matches!(name, "common" | "combined")
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Combined => "combined",
        }
    }

    /// Column names for this layout, in wire order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Common => &COMMON_COLUMNS,
            Self::Combined => &COMBINED_COLUMNS,
        }
    }
}

impl fmt::Display for LogPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
