//! Zoom levels for the image view.

use std::fmt;

use crate::error::{Error, Result};

/// Permitted zoom levels in percent, in ascending order.
pub const ZOOM_LEVELS: [u16; 8] = [70, 80, 90, 100, 110, 120, 130, 140];

/// A zoom level guaranteed to be one of [`ZOOM_LEVELS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Zoom(u16);

impl Zoom {
    pub const DEFAULT: Zoom = Zoom(100);
    pub const MIN: Zoom = Zoom(ZOOM_LEVELS[0]);
    pub const MAX: Zoom = Zoom(ZOOM_LEVELS[ZOOM_LEVELS.len() - 1]);

    /// Validate a percentage against the permitted set.
    pub fn new(percent: u16) -> Result<Self> {
        if ZOOM_LEVELS.contains(&percent) {
            Ok(Zoom(percent))
        } else {
            Err(Error::UnknownZoom(percent))
        }
    }

    /// The zoom level at `index` in [`ZOOM_LEVELS`].
    pub fn from_index(index: usize) -> Option<Self> {
        ZOOM_LEVELS.get(index).copied().map(Zoom)
    }

    /// Parse a persisted value such as `"110"`.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<u16>().ok().and_then(|p| Zoom::new(p).ok())
    }

    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        // Construction guarantees membership.
        ZOOM_LEVELS.iter().position(|&l| l == self.0).unwrap_or(0)
    }

    /// Next larger level, or `None` at the top.
    pub fn step_in(self) -> Option<Self> {
        Zoom::from_index(self.index() + 1)
    }

    /// Next smaller level, or `None` at the bottom.
    pub fn step_out(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Zoom::from_index)
    }

    /// All permitted levels in ascending order.
    pub fn all() -> impl Iterator<Item = Zoom> {
        ZOOM_LEVELS.iter().copied().map(Zoom)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom::DEFAULT
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl serde::Serialize for Zoom {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Zoom {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let percent = u16::deserialize(deserializer)?;
        Zoom::new(percent).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rejects_unlisted_levels() {
        assert!(Zoom::new(100).is_ok());
        assert!(matches!(Zoom::new(105), Err(Error::UnknownZoom(105))));
        assert!(Zoom::new(0).is_err());
    }

    #[test]
    fn test_bounds_are_no_ops() {
        assert_eq!(Zoom::MAX.step_in(), None);
        assert_eq!(Zoom::MIN.step_out(), None);
        assert_eq!(Zoom::DEFAULT.step_in(), Some(Zoom(110)));
        assert_eq!(Zoom::DEFAULT.step_out(), Some(Zoom(90)));
    }

    #[test]
    fn test_parse_persisted_value() {
        assert_eq!(Zoom::parse("120"), Some(Zoom(120)));
        assert_eq!(Zoom::parse(" 70 "), Some(Zoom(70)));
        assert_eq!(Zoom::parse("abc"), None);
        assert_eq!(Zoom::parse("75"), None);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Zoom(130).to_string(), "130%");
        assert_eq!(serde_json::to_string(&Zoom(80)).unwrap(), "80");
        assert!(serde_json::from_str::<Zoom>("85").is_err());
    }

    proptest! {
        #[test]
        fn prop_step_in_then_out_returns_to_interior_level(index in 1usize..ZOOM_LEVELS.len() - 1) {
            let zoom = Zoom::from_index(index).unwrap();
            prop_assert_eq!(zoom.step_in().and_then(Zoom::step_out), Some(zoom));
            prop_assert_eq!(zoom.step_out().and_then(Zoom::step_in), Some(zoom));
        }
    }
}
