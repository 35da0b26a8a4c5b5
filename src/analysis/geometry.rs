//! Two-point line math.
//!
//! A line through two points is either [`Line::Sloped`] or, when both points
//! share an x value, [`Line::Vertical`]. Vertical lines are a real variant,
//! not a large stand-in slope, so callers must handle them.

use serde::Serialize;

use crate::error::GeometryError;

/// A point on the analysed curve, `x` along the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// An infinite line in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Line {
    /// `y = slope * x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl Line {
    /// Line with the given slope passing through `(x0, 0)`.
    pub fn through_x_intercept(slope: f64, x0: f64) -> Self {
        Line::Sloped {
            slope,
            intercept: -slope * x0,
        }
    }

    /// `y` at `x`, `None` for a vertical line.
    pub fn value_at(&self, x: f64) -> Option<f64> {
        match *self {
            Line::Sloped { slope, intercept } => Some(slope * x + intercept),
            Line::Vertical { .. } => None,
        }
    }

    /// Where the line crosses `y = 0`. `None` for horizontal lines.
    pub fn x_intercept(&self) -> Option<f64> {
        match *self {
            Line::Sloped { slope, .. } if slope == 0.0 => None,
            Line::Sloped { slope, intercept } => Some(-intercept / slope),
            Line::Vertical { x } => Some(x),
        }
    }

    /// The single point both lines share.
    pub fn intersection(&self, other: &Line) -> Result<Point, GeometryError> {
        match (*self, *other) {
            (Line::Vertical { .. }, Line::Vertical { .. }) => Err(GeometryError::ParallelLines),
            (Line::Vertical { x }, Line::Sloped { slope, intercept })
            | (Line::Sloped { slope, intercept }, Line::Vertical { x }) => {
                Ok(Point::new(x, slope * x + intercept))
            }
            (
                Line::Sloped { slope: m1, intercept: b1 },
                Line::Sloped { slope: m2, intercept: b2 },
            ) => {
                if m1 == m2 {
                    return Err(GeometryError::ParallelLines);
                }
                let x = (b2 - b1) / (m1 - m2);
                Ok(Point::new(x, m2 * x + b2))
            }
        }
    }
}

/// Line through two points.
///
/// Fails only when the points coincide; equal x with different y gives
/// [`Line::Vertical`].
pub fn slope_intercept(p1: Point, p2: Point) -> Result<Line, GeometryError> {
    if p1.x == p2.x {
        if p1.y == p2.y {
            return Err(GeometryError::CoincidentPoints { x: p1.x, y: p1.y });
        }
        return Ok(Line::Vertical { x: p1.x });
    }
    let slope = (p2.y - p1.y) / (p2.x - p1.x);
    let intercept = p1.y - slope * p1.x;
    Ok(Line::Sloped { slope, intercept })
}

/// Intersection of the line through `first` with the line through `second`.
pub fn intersection_of_lines(first: (Point, Point), second: (Point, Point)) -> Result<Point, GeometryError> {
    let a = slope_intercept(first.0, first.1)?;
    let b = slope_intercept(second.0, second.1)?;
    a.intersection(&b)
}
