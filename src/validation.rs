use std::fmt::Display;

use nalgebra::Point2;

use crate::error::{Subject, ValidationError};

/// Only finite values count as numbers; NaN and the infinities do not.
pub fn is_number(value: f64) -> bool {
    value.is_finite()
}

pub fn require_name(name: &str, subject: Subject) -> Result<String, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName { subject });
    }
    Ok(name.to_owned())
}

pub fn require_position(coords: &[f64], subject: Subject) -> Result<Point2<f64>, ValidationError> {
    parse_pair(coords).ok_or(ValidationError::MalformedPosition { subject })
}

/// Exactly two finite numbers, or nothing.
pub fn parse_pair(coords: &[f64]) -> Option<Point2<f64>> {
    match *coords {
        [x, y] if is_number(x) && is_number(y) => Some(Point2::new(x, y)),
        _ => None,
    }
}

/// Renders a quantity the way reports and messages expect it: shortest
/// round-trip decimal, no trailing `.0` on integers, and no `-0`.
#[derive(Debug, Clone, Copy)]
pub struct Number(pub f64);

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Formats a point as `x,y`.
pub struct Coordinates<'a>(pub &'a Point2<f64>);

impl Display for Coordinates<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", Number(self.0.x), Number(self.0.y))
    }
}
