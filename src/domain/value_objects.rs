//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use serde::{Deserialize, Serialize};

/// Geocoding direction selected by the visitor.
///
/// Forward turns a free-text address into coordinates; Reverse turns a
/// coordinate pair into an address. The two modes are mutually exclusive
/// at any point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeocodeMode {
    /// Address → Coordinates
    Forward,
    /// Coordinates → Address
    Reverse,
}

impl GeocodeMode {
    /// Parse a mode from its form value.
    ///
    /// Unknown values fall back to Forward, the mode the page starts in.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "reverse" => Self::Reverse,
            _ => Self::Forward, // fallback
        }
    }

    /// Convert to the string used in form values and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "reverse",
        }
    }

    /// Human-readable label shown in the mode selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Forward => "Forward (Address → Coordinates)",
            Self::Reverse => "Reverse (Coordinates → Address)",
        }
    }

    /// Marker color used when rendering this mode's result.
    pub fn marker_color(&self) -> MarkerColor {
        match self {
            Self::Forward => MarkerColor::Blue,
            Self::Reverse => MarkerColor::Red,
        }
    }
}

impl Default for GeocodeMode {
    fn default() -> Self {
        Self::Forward
    }
}

impl std::fmt::Display for GeocodeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color of the result marker on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerColor {
    /// Used for forward geocoding results
    Blue,
    /// Used for reverse geocoding results
    Red,
}

impl MarkerColor {
    /// Convert to the CSS color name understood by the map renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
