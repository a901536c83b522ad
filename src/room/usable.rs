//! Usable floor space left after removing unusable areas

use serde::Serialize;

use super::{Constraint, ConstraintKind, Quality};
use crate::geometry::Rect;

/// Spaces smaller than this (m²) are dropped
const MIN_SPACE_AREA: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsableSpace {
    pub rect: Rect,
    pub area: f64,
    pub quality: Quality,
}

/// Split the room around every unusable-area constraint.
///
/// Each overlapping space is replaced by its left, right, upper and lower
/// residuals. Residuals may overlap one another.
pub fn split(width: f64, length: f64, constraints: &[Constraint]) -> Vec<UsableSpace> {
    let mut spaces = vec![Rect::new(0.0, 0.0, width, length)];

    for constraint in constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::UnusableArea)
    {
        spaces = spaces
            .into_iter()
            .flat_map(|space| {
                if space.intersects(&constraint.rect) {
                    residuals(&space, &constraint.rect)
                } else {
                    vec![space]
                }
            })
            .collect();
    }

    let traffic: Vec<&Rect> = constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::TrafficFlow)
        .map(|c| &c.rect)
        .collect();

    spaces
        .into_iter()
        .filter(|rect| rect.area() >= MIN_SPACE_AREA)
        .map(|rect| {
            let area = rect.area();
            let mut quality = quality_for_area(area);
            if traffic.iter().any(|t| t.intersects(&rect)) {
                quality = quality.downgraded();
            }
            UsableSpace { rect, area, quality }
        })
        .collect()
}

fn quality_for_area(area: f64) -> Quality {
    if area < 1.0 {
        Quality::Poor
    } else if area < 2.0 {
        Quality::Fair
    } else if area < 4.0 {
        Quality::Good
    } else {
        Quality::Excellent
    }
}

fn residuals(space: &Rect, hole: &Rect) -> Vec<Rect> {
    let mut out = Vec::with_capacity(4);
    if hole.x > space.x {
        out.push(Rect::new(space.x, space.y, hole.x - space.x, space.height));
    }
    if hole.right() < space.right() {
        out.push(Rect::new(
            hole.right(),
            space.y,
            space.right() - hole.right(),
            space.height,
        ));
    }
    if hole.y > space.y {
        out.push(Rect::new(space.x, space.y, space.width, hole.y - space.y));
    }
    if hole.bottom() < space.bottom() {
        out.push(Rect::new(
            space.x,
            hole.bottom(),
            space.width,
            space.bottom() - hole.bottom(),
        ));
    }
    out
}
