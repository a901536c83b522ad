//! Command-position strategy for beds and desks

use std::cmp::Ordering;

use crate::furniture::{FurnitureItem, FurnitureKind};
use crate::geometry::{Point, Rect};
use crate::room::{CommandPosition, ElementKind, Severity};

use super::builder::{Candidate, LayoutBuilder};
use super::placer::{rotations, PlacementContext};
use super::types::{IssueCode, Rotation, Tradeoff};

/// Place an item on the best free command position
pub fn place(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
) -> Option<Candidate> {
    let analysis = ctx.analysis;
    let all: Vec<&CommandPosition> = analysis.command_positions.iter().collect();
    let suitable: Vec<&CommandPosition> = all
        .iter()
        .copied()
        .filter(|p| p.suitable_for.contains(&item.kind))
        .collect();
    let mut positions = if suitable.is_empty() { all } else { suitable };

    let is_bed = item.kind == FurnitureKind::Bed;
    let windows: Vec<Point> = analysis
        .elements_of(ElementKind::Window)
        .map(|w| w.rect.center())
        .collect();
    let window_distance = |p: &CommandPosition| {
        windows
            .iter()
            .map(|w| w.distance_to(p.point))
            .fold(f64::INFINITY, f64::min)
    };

    positions.sort_by(|a, b| {
        let by_rank = (b.quality, b.has_wall_behind).cmp(&(a.quality, a.has_wall_behind));
        if is_bed && by_rank == Ordering::Equal {
            window_distance(b).total_cmp(&window_distance(a))
        } else {
            by_rank
        }
    });

    let bounds = analysis.bounds();
    for position in positions {
        let first = match (is_bed, ctx.kua) {
            (true, Some(kua)) => {
                kua.preferred_rotation(position.point, analysis.center(), analysis.orientation)
            }
            _ => Rotation::Upright,
        };

        for rotation in rotations(item, first) {
            let (w, h) = item.footprint(rotation.is_quarter());
            let rect = Rect::centered_on(position.point, w, h).shifted_inside(&bounds);
            if !ctx.is_free(&rect, item, builder) {
                continue;
            }

            let mut candidate = Candidate::new(rect, rotation, position.quality)
                .in_command_position(position.has_wall_behind);
            if !position.has_wall_behind {
                candidate = candidate.with_tradeoff(Tradeoff::new(
                    &item.id,
                    IssueCode::NoWallBehind,
                    Severity::Medium,
                    format!("{} is not against a solid wall", item.name),
                    "Add a solid headboard or tall furniture behind it",
                ));
            }
            return Some(candidate);
        }
    }
    None
}
