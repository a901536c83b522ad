//! Spatial constraints derived from fixed room elements

use std::fmt;

use serde::Serialize;

use super::{ElementKind, RoomElement};
use crate::geometry::Rect;

/// Kind of area a constraint marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    UnusableArea,
    TrafficFlow,
    DoorSwing,
    FengShuiIssue,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintKind::UnusableArea => "unusable_area",
            ConstraintKind::TrafficFlow => "traffic_flow",
            ConstraintKind::DoorSwing => "door_swing",
            ConstraintKind::FengShuiIssue => "feng_shui_issue",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub rect: Rect,
    pub description: String,
}

impl Constraint {
    fn new(kind: ConstraintKind, rect: Rect, description: impl Into<String>) -> Self {
        Self {
            kind,
            rect,
            description: description.into(),
        }
    }
}

/// Emit the constraints for each element and merge overlapping ones of the same kind.
///
/// `door_buffer` pads door traffic areas on every side.
pub fn build(elements: &[RoomElement], door_buffer: f64) -> Vec<Constraint> {
    let mut raw = Vec::new();
    for element in elements {
        emit(element, door_buffer, &mut raw);
    }
    merge(raw)
}

fn emit(element: &RoomElement, door_buffer: f64, out: &mut Vec<Constraint>) {
    let r = element.rect;
    match element.kind {
        ElementKind::Wall => out.push(Constraint::new(
            ConstraintKind::UnusableArea,
            r,
            "Wall - cannot place furniture here",
        )),
        ElementKind::Door => {
            out.push(Constraint::new(
                ConstraintKind::TrafficFlow,
                r.expand(door_buffer),
                "Door - keep area clear for traffic",
            ));
            let swing = r.width.max(r.height);
            out.push(Constraint::new(
                ConstraintKind::DoorSwing,
                Rect::new(r.x, r.y, swing, swing),
                "Door swing area",
            ));
        }
        ElementKind::Window => out.push(Constraint::new(
            ConstraintKind::TrafficFlow,
            r,
            "Window - keep area accessible",
        )),
        ElementKind::Fireplace => {
            out.push(Constraint::new(
                ConstraintKind::UnusableArea,
                r,
                "Fireplace - cannot place furniture here",
            ));
            out.push(Constraint::new(
                ConstraintKind::FengShuiIssue,
                Rect::new(r.x - r.width / 2.0, r.y + r.height, r.width * 2.0, r.height),
                "Fireplace front - avoid placing bed/desk in this area",
            ));
        }
        ElementKind::NoFurniture => out.push(Constraint::new(
            ConstraintKind::UnusableArea,
            r,
            "No furniture zone",
        )),
        ElementKind::Closet | ElementKind::Column | ElementKind::Radiator => {
            let name = element.kind.as_str();
            let mut label = name[..1].to_uppercase();
            label.push_str(&name[1..]);
            out.push(Constraint::new(
                ConstraintKind::UnusableArea,
                r,
                format!("{label} - cannot place furniture here"),
            ));
        }
    }
}

/// Merge same-kind constraints until no two of them overlap.
///
/// A merged constraint keeps the description of the earlier one in (x, y)
/// order. Output is sorted by kind, then by position.
fn merge(constraints: Vec<Constraint>) -> Vec<Constraint> {
    let mut groups: Vec<(ConstraintKind, Vec<Constraint>)> = Vec::new();
    for c in constraints {
        match groups.iter_mut().find(|(kind, _)| *kind == c.kind) {
            Some((_, group)) => group.push(c),
            None => groups.push((c.kind, vec![c])),
        }
    }
    groups.sort_by_key(|(kind, _)| *kind);

    let mut merged = Vec::new();
    for (_, mut group) in groups {
        loop {
            sort_by_position(&mut group);
            let pair = overlapping_pair(&group);
            let Some((i, j)) = pair else { break };
            let other = group.remove(j);
            group[i].rect = group[i].rect.union(&other.rect);
        }
        merged.extend(group);
    }
    merged
}

fn sort_by_position(group: &mut [Constraint]) {
    group.sort_by(|a, b| {
        a.rect
            .x
            .total_cmp(&b.rect.x)
            .then(a.rect.y.total_cmp(&b.rect.y))
    });
}

fn overlapping_pair(group: &[Constraint]) -> Option<(usize, usize)> {
    for i in 0..group.len() {
        for j in i + 1..group.len() {
            if group[i].rect.intersects(&group[j].rect) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(kind: ElementKind, x: f64, y: f64, w: f64, h: f64) -> RoomElement {
        RoomElement::new(kind, x, y, w, h)
    }

    #[test]
    fn test_door_emits_traffic_and_swing() {
        let cs = build(&[element(ElementKind::Door, 1.5, 3.5, 1.0, 0.5)], 0.5);
        assert_eq!(cs.len(), 2);
        assert_eq!(cs[0].kind, ConstraintKind::TrafficFlow);
        assert_eq!(cs[0].rect, Rect::new(1.0, 3.0, 2.0, 1.5));
        assert_eq!(cs[1].kind, ConstraintKind::DoorSwing);
        assert_eq!(cs[1].rect, Rect::new(1.5, 3.5, 1.0, 1.0));
    }

    #[test]
    fn test_fireplace_front_issue() {
        let cs = build(&[element(ElementKind::Fireplace, 2.0, 0.0, 1.0, 0.4)], 0.5);
        assert_eq!(cs.len(), 2);
        assert_eq!(cs[0].kind, ConstraintKind::UnusableArea);
        assert_eq!(cs[1].kind, ConstraintKind::FengShuiIssue);
        assert_eq!(cs[1].rect, Rect::new(1.5, 0.4, 2.0, 0.4));
    }

    #[test]
    fn test_column_description_is_capitalized() {
        let cs = build(&[element(ElementKind::Column, 1.0, 1.0, 0.3, 0.3)], 0.5);
        assert_eq!(cs[0].description, "Column - cannot place furniture here");
    }

    #[test]
    fn test_chained_overlaps_merge_fully() {
        // only the union of the first three reaches the last one
        let elements = [
            element(ElementKind::Column, 0.0, 0.0, 1.0, 1.0),
            element(ElementKind::Column, 0.5, 0.5, 1.0, 1.0),
            element(ElementKind::Column, 1.25, 1.25, 1.0, 1.0),
            element(ElementKind::Column, 2.0, 0.0, 0.5, 0.5),
        ];
        let cs = build(&elements, 0.5);
        assert_eq!(cs.len(), 1);
        assert_eq!(cs[0].rect, Rect::new(0.0, 0.0, 2.5, 2.25));
    }

    #[test]
    fn test_no_same_kind_overlap_after_merge() {
        let elements = [
            element(ElementKind::Door, 0.0, 1.0, 0.1, 0.9),
            element(ElementKind::Door, 0.0, 2.0, 0.1, 0.9),
            element(ElementKind::Window, 3.9, 1.0, 0.1, 1.0),
            element(ElementKind::Radiator, 3.0, 1.0, 0.9, 0.2),
            element(ElementKind::Closet, 3.5, 1.1, 0.5, 2.0),
        ];
        let cs = build(&elements, 0.5);
        for (i, a) in cs.iter().enumerate() {
            for b in &cs[i + 1..] {
                if a.kind == b.kind {
                    assert!(!a.rect.intersects(&b.rect), "{a:?} overlaps {b:?}");
                }
            }
        }
    }

    #[test]
    fn test_output_sorted_by_kind() {
        let elements = [
            element(ElementKind::Window, 3.9, 1.0, 0.1, 1.0),
            element(ElementKind::Wall, 0.0, 0.0, 4.0, 0.1),
        ];
        let kinds: Vec<_> = build(&elements, 0.5).iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ConstraintKind::UnusableArea, ConstraintKind::TrafficFlow]);
    }
}
