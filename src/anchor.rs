//! Anchor resolution for decorator placement.
//!
//! One resolver shared by the border, text and watermark compositors, so
//! the nine compass positions behave identically at every call site. An
//! anchor is either symbolic (a [`Position`]) or an absolute coordinate
//! that bypasses the table entirely.

use crate::error::{Error, Result};
use crate::geometry::Dimensions;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The nine symbolic compass positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Top,
    TopRight,
    Right,
    #[default]
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    TopLeft,
    Center,
}

impl Position {
    /// The short compass code (`t`, `tr`, `r`, `br`, `b`, `bl`, `l`, `tl`,
    /// `c`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Top => "t",
            Self::TopRight => "tr",
            Self::Right => "r",
            Self::BottomRight => "br",
            Self::Bottom => "b",
            Self::BottomLeft => "bl",
            Self::Left => "l",
            Self::TopLeft => "tl",
            Self::Center => "c",
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "t" => Ok(Self::Top),
            "tr" => Ok(Self::TopRight),
            "r" => Ok(Self::Right),
            "br" => Ok(Self::BottomRight),
            "b" => Ok(Self::Bottom),
            "bl" => Ok(Self::BottomLeft),
            "l" => Ok(Self::Left),
            "tl" => Ok(Self::TopLeft),
            "c" => Ok(Self::Center),
            other => Err(Error::UnsupportedPosition(other.to_string())),
        }
    }
}

/// A placement reference: symbolic compass position or explicit coordinate.
///
/// Anchors are stateless; they are resolved fresh on every placement call
/// against the current container and decorator footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Symbolic(Position),
    Absolute { x: i64, y: i64 },
}

impl Default for Anchor {
    fn default() -> Self {
        Self::Symbolic(Position::default())
    }
}

impl From<Position> for Anchor {
    fn from(position: Position) -> Self {
        Self::Symbolic(position)
    }
}

/// Resolve an anchor to the top-left origin of a `footprint`-sized box
/// inside `container`.
///
/// `margin` is an inward inset from whichever edges the position touches;
/// centered axes ignore it. Absolute anchors are used verbatim, without
/// clamping — a footprint larger than the container resolves to a negative
/// origin and is clipped visually rather than rejected.
pub fn resolve(
    anchor: Anchor,
    footprint: Dimensions,
    container: Dimensions,
    margin: u32,
) -> (i64, i64) {
    let (x, y) = match anchor {
        Anchor::Absolute { x, y } => (x, y),
        Anchor::Symbolic(position) => {
            let w = i64::from(footprint.width);
            let h = i64::from(footprint.height);
            let cw = i64::from(container.width);
            let ch = i64::from(container.height);
            let m = i64::from(margin);

            let center_x = ((cw - w) as f64 / 2.0).round() as i64;
            let center_y = ((ch - h) as f64 / 2.0).round() as i64;

            match position {
                Position::TopLeft => (m, m),
                Position::Top => (center_x, m),
                Position::TopRight => (cw - w - m, m),
                Position::Right => (cw - w - m, center_y),
                Position::BottomRight => (cw - w - m, ch - h - m),
                Position::Bottom => (center_x, ch - h - m),
                Position::BottomLeft => (m, ch - h - m),
                Position::Left => (m, center_y),
                Position::Center => (center_x, center_y),
            }
        }
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOT: Dimensions = Dimensions::new(50, 20);
    const CONTAINER: Dimensions = Dimensions::new(200, 100);

    #[test]
    fn center_splits_free_space_evenly() {
        let origin = resolve(Anchor::Symbolic(Position::Center), FOOT, CONTAINER, 0);
        assert_eq!(origin, (75, 40));
    }

    #[test]
    fn corner_positions_inset_by_margin() {
        let at = |p| resolve(Anchor::Symbolic(p), FOOT, CONTAINER, 10);
        assert_eq!(at(Position::TopLeft), (10, 10));
        assert_eq!(at(Position::TopRight), (140, 10));
        assert_eq!(at(Position::BottomRight), (140, 70));
        assert_eq!(at(Position::BottomLeft), (10, 70));
    }

    #[test]
    fn edge_positions_center_the_free_axis() {
        let at = |p| resolve(Anchor::Symbolic(p), FOOT, CONTAINER, 10);
        assert_eq!(at(Position::Top), (75, 10));
        assert_eq!(at(Position::Bottom), (75, 70));
        assert_eq!(at(Position::Left), (10, 40));
        assert_eq!(at(Position::Right), (140, 40));
    }

    #[test]
    fn oversized_footprint_yields_negative_origin() {
        let big = Dimensions::new(300, 150);
        let origin = resolve(Anchor::Symbolic(Position::Center), big, CONTAINER, 0);
        assert_eq!(origin, (-50, -25));
    }

    #[test]
    fn absolute_anchor_bypasses_the_table() {
        let origin = resolve(Anchor::Absolute { x: -7, y: 999 }, FOOT, CONTAINER, 25);
        assert_eq!(origin, (-7, 999));
    }

    #[test]
    fn default_anchor_is_bottom_right() {
        assert_eq!(
            Anchor::default(),
            Anchor::Symbolic(Position::BottomRight),
        );
    }

    #[test]
    fn parses_all_nine_codes() {
        for code in ["t", "tr", "r", "br", "b", "bl", "l", "tl", "c"] {
            let position: Position = code.parse().unwrap();
            assert_eq!(position.code(), code);
        }
    }

    #[test]
    fn rejects_unknown_codes() {
        for bad in ["", "x", "top", "TR", "center"] {
            assert!(bad.parse::<Position>().is_err(), "expected error for {bad:?}");
        }
    }
}
