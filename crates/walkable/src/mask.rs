//! Collision-mask text format and stock obstacle shapes.
//!
//! Format
//! - One ring per line: vertices `x,y` separated by whitespace, optionally
//!   led by the tag `mask`. Blank lines are skipped.
//! - Ring orientation carries polarity: a positive signed area adds walkable
//!   floor, a negative one blocks it.
//!
//! ```text
//! mask 0,0 200,0 200,100 0,100
//! 80,40 80,60 120,60 120,40
//! ```

use std::str::FromStr;

use crate::point::Point;
use crate::polygon::Polygon;
use crate::ring::Ring;

/// Octagon approximating a unit circle, oriented as an obstacle.
const CIRCLE: [Point; 8] = [
    Point::new(6, 1),
    Point::new(6, -1),
    Point::new(2, -3),
    Point::new(-2, -3),
    Point::new(-6, -1),
    Point::new(-6, 1),
    Point::new(-2, 3),
    Point::new(2, 3),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaskError {
    #[error("mask parse error: invalid vertex {token:?} (expected `x,y`)")]
    BadPoint { token: String },
    #[error("mask parse error: a ring needs at least 3 vertices (got {count})")]
    TooFewVertices { count: usize },
}

fn parse_point(token: &str) -> Result<Point, MaskError> {
    let bad = || MaskError::BadPoint {
        token: token.to_string(),
    };
    let (x, y) = token.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse::<i32>().map_err(|_| bad())?;
    let y = y.trim().parse::<i32>().map_err(|_| bad())?;
    Ok(Point::new(x, y))
}

impl FromStr for Ring {
    type Err = MaskError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace().peekable();
        tokens.next_if_eq(&"mask");
        let points = tokens.map(parse_point).collect::<Result<Vec<_>, _>>()?;
        if points.len() < 3 {
            return Err(MaskError::TooFewVertices {
                count: points.len(),
            });
        }
        Ok(Ring::new(points))
    }
}

/// Parse a multi-line mask into an unmerged polygon, one ring per non-empty
/// line.
pub fn parse_mask(text: &str) -> Result<Polygon, MaskError> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse::<Ring>)
        .collect::<Result<Vec<_>, _>>()
        .map(Polygon::from_rings)
}

/// Render a ring back to one mask line (without the tag).
pub fn format_ring(ring: &Ring) -> String {
    ring.points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Octagonal obstacle around the origin, scaled by `radius`.
pub fn circle(radius: i32) -> Polygon {
    Polygon::from_rings(vec![CIRCLE.iter().map(|&p| p * radius).collect()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Polarity;

    #[test]
    fn parses_tagged_and_bare_lines() {
        let p = parse_mask("mask 0,0 200,0 200,100 0,100\n\n  80,40 80,60 120,60 120,40\n")
            .unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.polarities(), vec![Polarity::Fill, Polarity::Hole]);
        assert_eq!(p.rings[1].points[2], Point::new(120, 60));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            "0,0 1;1 2,2".parse::<Ring>(),
            Err(MaskError::BadPoint {
                token: "1;1".into()
            })
        );
        assert_eq!(
            "mask 0,0 1,1".parse::<Ring>(),
            Err(MaskError::TooFewVertices { count: 2 })
        );
        assert!(parse_mask("0,0 1,x 2,2").is_err());
        let msg = MaskError::TooFewVertices { count: 1 }.to_string();
        assert!(msg.contains("at least 3"));
    }

    #[test]
    fn format_roundtrips_a_line() {
        let r: Ring = "mask -5,3 7,3 7,-2".parse().unwrap();
        assert_eq!(format_ring(&r), "-5,3 7,3 7,-2");
    }

    #[test]
    fn circle_is_an_obstacle() {
        let c = circle(4);
        assert_eq!(c.len(), 1);
        assert_eq!(c.rings[0].polarity(), Polarity::Hole);
        assert_eq!(c.rings[0].points[0], Point::new(24, 4));
        assert!(c.contains(Point::new(0, 0)));
        assert!(!c.contains(Point::new(25, 0)));
    }
}
