//! Metro line colours.

use std::fmt;

use serde::Serialize;

/// The colour family a metro line belongs to.
///
/// The network groups its seven metro lines into three colour-coded
/// systems. Presentation surfaces use this to tint the line badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineColour {
    /// Lines 10 and 11.
    Blue,
    /// Lines 13 and 14.
    Red,
    /// Lines 17, 18 and 19.
    Green,
    /// Anything else (replacement services, unknown designations).
    Grey,
}

impl LineColour {
    /// Colour for a line designation such as `"13"`.
    pub fn for_designation(designation: &str) -> Self {
        match designation.trim() {
            "10" | "11" => LineColour::Blue,
            "13" | "14" => LineColour::Red,
            "17" | "18" | "19" => LineColour::Green,
            _ => LineColour::Grey,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineColour::Blue => "blue",
            LineColour::Red => "red",
            LineColour::Green => "green",
            LineColour::Grey => "grey",
        }
    }
}

impl fmt::Display for LineColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_lines() {
        assert_eq!(LineColour::for_designation("10"), LineColour::Blue);
        assert_eq!(LineColour::for_designation("11"), LineColour::Blue);
        assert_eq!(LineColour::for_designation("13"), LineColour::Red);
        assert_eq!(LineColour::for_designation("14"), LineColour::Red);
        assert_eq!(LineColour::for_designation("17"), LineColour::Green);
        assert_eq!(LineColour::for_designation("18"), LineColour::Green);
        assert_eq!(LineColour::for_designation("19"), LineColour::Green);
    }

    #[test]
    fn unknown_lines_are_grey() {
        assert_eq!(LineColour::for_designation("12"), LineColour::Grey);
        assert_eq!(LineColour::for_designation(""), LineColour::Grey);
        assert_eq!(LineColour::for_designation("13X"), LineColour::Grey);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&LineColour::Green).unwrap();
        assert_eq!(json, "\"green\"");
        assert_eq!(LineColour::Red.to_string(), "red");
    }
}
