//! Command positions: spots that see the door without lining up with it

use serde::Serialize;

use super::{ElementKind, Quality, RoomElement};
use crate::furniture::FurnitureKind;
use crate::geometry::{plan_bearing, Point, Rect};

/// Offset of the diagonal candidates from the door, as a share of the room size
const DIAGONAL_SHARE: f64 = 0.3;
/// Candidates this close (degrees) to an axis line through the door are rejected
const ALIGNMENT_TOLERANCE: f64 = 10.0;
/// Boundary band, as a share of the room size, that counts as wall support
const BOUNDARY_SHARE: f64 = 0.1;
/// Distance from a wall element's side line that counts as wall support
const WALL_REACH: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandPosition {
    pub point: Point,
    pub quality: Quality,
    pub has_wall_behind: bool,
    /// Index of the generating door among the room's doors
    pub door_index: usize,
    pub suitable_for: Vec<FurnitureKind>,
}

/// Find command positions for every door in the room
pub fn find(elements: &[RoomElement], width: f64, length: f64) -> Vec<CommandPosition> {
    let walls: Vec<&Rect> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Wall)
        .map(|e| &e.rect)
        .collect();
    let room = Rect::new(0.0, 0.0, width, length);
    let dx = width * DIAGONAL_SHARE;
    let dy = length * DIAGONAL_SHARE;

    let mut positions = Vec::new();
    let doors = elements.iter().filter(|e| e.kind == ElementKind::Door);
    for (door_index, door) in doors.enumerate() {
        let door_center = door.rect.center();
        let candidates = [
            Point::new(door_center.x + dx, door_center.y + dy),
            Point::new(door_center.x + dx, door_center.y - dy),
            Point::new(door_center.x - dx, door_center.y + dy),
            Point::new(door_center.x - dx, door_center.y - dy),
        ];

        for point in candidates.into_iter().filter(|p| room.contains(*p)) {
            if is_aligned(door_center, point) {
                log::trace!("command candidate {point:?} aligned with door {door_index}");
                continue;
            }
            let has_wall_behind = has_wall_support(point, &walls, width, length);
            positions.push(CommandPosition {
                point,
                quality: if has_wall_behind {
                    Quality::Excellent
                } else {
                    Quality::Good
                },
                has_wall_behind,
                door_index,
                suitable_for: vec![FurnitureKind::Bed, FurnitureKind::Desk],
            });
        }
    }
    positions
}

/// True when the bearing from the door to the point is near 0/90/180/270°
fn is_aligned(door: Point, point: Point) -> bool {
    let offset = plan_bearing(door, point) % 90.0;
    offset.min(90.0 - offset) < ALIGNMENT_TOLERANCE
}

fn has_wall_support(point: Point, walls: &[&Rect], width: f64, length: f64) -> bool {
    let near_boundary = point.y < length * BOUNDARY_SHARE
        || point.y > length * (1.0 - BOUNDARY_SHARE)
        || point.x < width * BOUNDARY_SHARE
        || point.x > width * (1.0 - BOUNDARY_SHARE);
    if near_boundary {
        return true;
    }

    walls.iter().any(|wall| {
        (point.x - wall.x).abs() < WALL_REACH
            || (point.x - wall.right()).abs() < WALL_REACH
            || (point.y - wall.y).abs() < WALL_REACH
            || (point.y - wall.bottom()).abs() < WALL_REACH
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door(x: f64, y: f64, w: f64, h: f64) -> RoomElement {
        RoomElement::new(ElementKind::Door, x, y, w, h)
    }

    #[test]
    fn test_no_doors_no_positions() {
        assert!(find(&[], 4.0, 4.0).is_empty());
    }

    #[test]
    fn test_south_door_gives_two_positions_north_of_it() {
        let positions = find(&[door(1.5, 3.9, 1.0, 0.1)], 4.0, 4.0);
        assert_eq!(positions.len(), 2);
        for p in &positions {
            assert!(p.point.y < 3.0);
            assert_eq!(p.door_index, 0);
            assert_eq!(p.suitable_for, vec![FurnitureKind::Bed, FurnitureKind::Desk]);
        }
    }

    #[test]
    fn test_wall_support_near_boundary() {
        assert!(has_wall_support(Point::new(0.2, 2.0), &[], 4.0, 4.0));
        assert!(!has_wall_support(Point::new(2.0, 2.0), &[], 4.0, 4.0));
        let wall = Rect::new(1.8, 0.0, 0.1, 4.0);
        assert!(has_wall_support(Point::new(2.0, 2.0), &[&wall], 4.0, 4.0));
    }

    #[test]
    fn test_alignment_uses_circular_distance() {
        let door = Point::new(2.0, 2.0);
        // 355° from the door: just west of due north
        let p = Point::new(2.0 - 0.0875, 1.0);
        assert!(is_aligned(door, p));
        assert!(is_aligned(door, Point::new(3.0, 2.05)));
        assert!(!is_aligned(door, Point::new(3.0, 1.0)));
    }

    #[test]
    fn test_long_thin_room_rejects_shallow_diagonals() {
        // 0.3·1 vs 0.3·10 gives a bearing about 5.7° off the x axis
        let positions = find(&[door(0.0, 0.4, 0.1, 0.2)], 10.0, 1.0);
        assert!(positions.is_empty());
    }
}
