//! Bagua map: the 3×3 grid of life-area zones laid over the room
//!
//! The canonical assignment is for a room whose top edge faces north. Other
//! orientations use the same grid rotated so the compass direction at the top
//! of the plan lands in the top-middle cell.

use std::fmt;

use serde::Serialize;

use super::Orientation;
use crate::geometry::{Point, Rect};

/// The nine named bagua areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaguaArea {
    Career,
    Knowledge,
    Family,
    Wealth,
    Fame,
    Relationships,
    Children,
    HelpfulPeople,
    Center,
}

impl BaguaArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaguaArea::Career => "career",
            BaguaArea::Knowledge => "knowledge",
            BaguaArea::Family => "family",
            BaguaArea::Wealth => "wealth",
            BaguaArea::Fame => "fame",
            BaguaArea::Relationships => "relationships",
            BaguaArea::Children => "children",
            BaguaArea::HelpfulPeople => "helpful_people",
            BaguaArea::Center => "center",
        }
    }

    /// Element, colours and life area associated with this zone
    fn annotation(&self) -> (FiveElement, &'static [&'static str], &'static str) {
        match self {
            BaguaArea::Career => (FiveElement::Water, &["black", "blue"], "career"),
            BaguaArea::Knowledge => (FiveElement::Earth, &["blue", "green"], "wisdom"),
            BaguaArea::Family => (FiveElement::Wood, &["green"], "family"),
            BaguaArea::Wealth => (FiveElement::Wood, &["purple", "green"], "prosperity"),
            BaguaArea::Fame => (FiveElement::Fire, &["red"], "reputation"),
            BaguaArea::Relationships => {
                (FiveElement::Earth, &["pink", "red", "white"], "love")
            }
            BaguaArea::Children => (FiveElement::Metal, &["white", "grey"], "creativity"),
            BaguaArea::HelpfulPeople => (FiveElement::Metal, &["grey", "white"], "travel"),
            BaguaArea::Center => (FiveElement::Earth, &["yellow", "brown"], "health"),
        }
    }
}

impl fmt::Display for BaguaArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five classical elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FiveElement {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// One ninth of the room with its symbolic annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaguaZone {
    pub area: BaguaArea,
    pub rect: Rect,
    pub element: FiveElement,
    pub life_area: &'static str,
    pub colors: &'static [&'static str],
}

use BaguaArea::*;

const NORTH_GRID: [[BaguaArea; 3]; 3] = [
    [Knowledge, Career, HelpfulPeople],
    [Family, Center, Children],
    [Wealth, Fame, Relationships],
];

const EAST_GRID: [[BaguaArea; 3]; 3] = [
    [Wealth, Family, Knowledge],
    [Fame, Center, Career],
    [Relationships, Children, HelpfulPeople],
];

const SOUTH_GRID: [[BaguaArea; 3]; 3] = [
    [Relationships, Fame, Wealth],
    [Children, Center, Family],
    [HelpfulPeople, Career, Knowledge],
];

const WEST_GRID: [[BaguaArea; 3]; 3] = [
    [HelpfulPeople, Children, Relationships],
    [Career, Center, Fame],
    [Knowledge, Family, Wealth],
];

fn grid_for(orientation: Orientation) -> &'static [[BaguaArea; 3]; 3] {
    match orientation {
        Orientation::N => &NORTH_GRID,
        Orientation::E => &EAST_GRID,
        Orientation::S => &SOUTH_GRID,
        Orientation::W => &WEST_GRID,
    }
}

/// Partition the room into its nine bagua zones, row by row from the top-left
pub fn map(width: f64, length: f64, orientation: Orientation) -> Vec<BaguaZone> {
    let cell_w = width / 3.0;
    let cell_h = length / 3.0;
    let grid = grid_for(orientation);

    let mut zones = Vec::with_capacity(9);
    for (row, areas) in grid.iter().enumerate() {
        for (col, area) in areas.iter().enumerate() {
            let (element, colors, life_area) = area.annotation();
            zones.push(BaguaZone {
                area: *area,
                rect: Rect::new(col as f64 * cell_w, row as f64 * cell_h, cell_w, cell_h),
                element,
                life_area,
                colors,
            });
        }
    }
    zones
}

/// Find the zone containing a point.
///
/// Cells are half-open on their right and bottom edges except along the
/// room's far edges, so every point of the room maps to exactly one zone.
pub fn zone_at(zones: &[BaguaZone], point: Point) -> Option<&BaguaZone> {
    let far_x = zones.iter().map(|z| z.rect.right()).fold(f64::MIN, f64::max);
    let far_y = zones.iter().map(|z| z.rect.bottom()).fold(f64::MIN, f64::max);

    zones.iter().find(|zone| {
        let r = &zone.rect;
        let in_x = point.x >= r.x && (point.x < r.right() || (r.right() >= far_x && point.x <= far_x));
        let in_y =
            point.y >= r.y && (point.y < r.bottom() || (r.bottom() >= far_y && point.y <= far_y));
        in_x && in_y
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(zones: &[BaguaZone]) -> Vec<&'static str> {
        zones.iter().map(|z| z.area.as_str()).collect()
    }

    #[test]
    fn test_north_grid() {
        let zones = map(3.0, 3.0, Orientation::N);
        assert_eq!(
            names(&zones),
            vec![
                "knowledge",
                "career",
                "helpful_people",
                "family",
                "center",
                "children",
                "wealth",
                "fame",
                "relationships"
            ]
        );
    }

    #[test]
    fn test_zones_tile_room() {
        for orientation in [Orientation::N, Orientation::E, Orientation::S, Orientation::W] {
            let zones = map(6.0, 4.5, orientation);
            assert_eq!(zones.len(), 9);
            let total: f64 = zones.iter().map(|z| z.rect.area()).sum();
            assert!((total - 27.0).abs() < 1e-9);
            for (i, a) in zones.iter().enumerate() {
                for b in &zones[i + 1..] {
                    assert!(!a.rect.intersects(&b.rect));
                }
            }
        }
    }

    #[test]
    fn test_each_orientation_uses_all_nine_areas() {
        for orientation in [Orientation::N, Orientation::E, Orientation::S, Orientation::W] {
            let mut areas = names(&map(3.0, 3.0, orientation));
            areas.sort_unstable();
            areas.dedup();
            assert_eq!(areas.len(), 9);
        }
    }

    #[test]
    fn test_center_is_always_middle() {
        for orientation in [Orientation::N, Orientation::E, Orientation::S, Orientation::W] {
            assert_eq!(map(3.0, 3.0, orientation)[4].area, BaguaArea::Center);
        }
    }

    #[test]
    fn test_mapping_is_deterministic() {
        assert_eq!(map(5.0, 4.0, Orientation::E), map(5.0, 4.0, Orientation::E));
    }

    #[test]
    fn test_zone_annotations() {
        let zones = map(3.0, 3.0, Orientation::N);
        let career = zones.iter().find(|z| z.area == BaguaArea::Career).unwrap();
        assert_eq!(career.element, FiveElement::Water);
        assert_eq!(career.colors, &["black", "blue"]);
        let center = &zones[4];
        assert_eq!(center.life_area, "health");
    }

    #[test]
    fn test_zone_at_edges() {
        let zones = map(3.0, 3.0, Orientation::N);
        assert_eq!(zone_at(&zones, Point::new(0.0, 0.0)).unwrap().area, BaguaArea::Knowledge);
        assert_eq!(zone_at(&zones, Point::new(1.0, 1.0)).unwrap().area, BaguaArea::Center);
        assert_eq!(
            zone_at(&zones, Point::new(3.0, 3.0)).unwrap().area,
            BaguaArea::Relationships
        );
        assert!(zone_at(&zones, Point::new(3.5, 1.0)).is_none());
    }
}
