//! Energy-flow strategy for large pieces such as sofas and tables

use std::cmp::Ordering;

use crate::furniture::FurnitureItem;
use crate::geometry::{segment_intersects_rect, steps_in, Rect};
use crate::room::{Quality, RoomAnalysis, Severity};

use super::builder::{Candidate, LayoutBuilder};
use super::placer::{rotations, Jitter, PlacementContext};
use super::types::{IssueCode, Rotation, Tradeoff};

const MAX_STEP: f64 = 0.5;

struct Cell {
    rect: Rect,
    quality: Quality,
    blocks: bool,
    jitter: f64,
}

fn grid_step(analysis: &RoomAnalysis) -> f64 {
    MAX_STEP.min(analysis.width.min(analysis.length) / 10.0)
}

/// Check if a rectangle sits on any flow path thickened to `thickness`
pub fn blocks_flow(analysis: &RoomAnalysis, rect: &Rect, thickness: f64) -> bool {
    let padded = rect.expand(thickness / 2.0);
    analysis
        .energy_flow
        .paths
        .iter()
        .any(|path| segment_intersects_rect(path.start, path.end, &padded))
}

/// Low-severity note for an item left sitting on a flow path
pub fn blocking_tradeoff(item: &FurnitureItem) -> Tradeoff {
    Tradeoff::new(
        &item.id,
        IssueCode::BlocksEnergyFlow,
        Severity::Low,
        format!("{} may block natural movement through the space", item.name),
        "Consider repositioning for better energy flow or adding a plant nearby",
    )
}

fn cells(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
    rotation: Rotation,
    jitter: &mut Jitter,
) -> Vec<Cell> {
    let analysis = ctx.analysis;
    let (w, h) = item.footprint(rotation.is_quarter());
    let step = grid_step(analysis);
    let columns = steps_in(analysis.width, step);
    let rows = steps_in(analysis.length, step);

    let mut found = Vec::new();
    for i in 0..=columns {
        for j in 0..=rows {
            let rect = Rect::new(i as f64 * step, j as f64 * step, w, h);
            if !ctx.is_free(&rect, item, builder) {
                continue;
            }
            let blocks = blocks_flow(analysis, &rect, ctx.config.flow_thickness);
            if blocks && ctx.strategy.forbids_flow_blocking() {
                continue;
            }
            found.push(Cell {
                rect,
                quality: if blocks { Quality::Fair } else { Quality::Good },
                blocks,
                jitter: jitter.next(),
            });
        }
    }
    found
}

/// Place an item on the grid cell that best keeps energy paths open
pub fn place(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
    jitter: &mut Jitter,
) -> Option<Candidate> {
    for rotation in rotations(item, Rotation::Upright) {
        let mut found = cells(ctx, builder, item, rotation, jitter);
        found.sort_by(|a, b| {
            b.quality
                .cmp(&a.quality)
                .then(a.blocks.cmp(&b.blocks))
                .then(b.jitter.partial_cmp(&a.jitter).unwrap_or(Ordering::Equal))
        });

        let Some(cell) = found.into_iter().next() else {
            continue;
        };
        let mut candidate = Candidate::new(cell.rect, rotation, cell.quality);
        if cell.blocks {
            candidate = candidate.with_tradeoff(blocking_tradeoff(item));
        }
        return Some(candidate);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furniture::FurnitureSelection;
    use crate::layout::placer::test_support::{analysis, items};
    use crate::layout::{LayoutStrategy, PlannerConfig};
    use crate::room::{ElementKind, RoomElement, RoomSpec};

    fn run(room: RoomSpec, strategy: LayoutStrategy, selection: FurnitureSelection) -> Option<Candidate> {
        let analysis = analysis(room);
        let config = PlannerConfig::default();
        let ctx = PlacementContext {
            analysis: &analysis,
            kua: None,
            config: &config,
            strategy,
            life_goal: None,
        };
        let items = items(&[selection]);
        place(&ctx, &LayoutBuilder::new(strategy, None), &items[0], &mut Jitter::off())
    }

    fn doorway() -> RoomSpec {
        RoomSpec::new(4.0, 4.0).with_element(RoomElement::new(ElementKind::Door, 1.5, 3.9, 1.0, 0.1))
    }

    #[test]
    fn test_grid_step() {
        assert_eq!(grid_step(&analysis(RoomSpec::new(10.0, 8.0))), 0.5);
        assert_eq!(grid_step(&analysis(RoomSpec::new(3.0, 4.0))), 0.3);
    }

    #[test]
    fn test_blocks_flow_near_path() {
        let analysis = analysis(doorway());
        // the path runs from (2, 3.95) to (2, 2)
        assert!(blocks_flow(&analysis, &Rect::new(1.5, 2.5, 1.0, 0.5), 0.3));
        assert!(blocks_flow(&analysis, &Rect::new(2.1, 2.5, 1.0, 0.5), 0.3));
        assert!(!blocks_flow(&analysis, &Rect::new(2.5, 2.5, 1.0, 0.5), 0.3));
    }

    #[test]
    fn test_optimal_avoids_paths() {
        let c = run(doorway(), LayoutStrategy::Optimal, FurnitureSelection::new("sofa", 1.5, 0.8)).unwrap();
        assert_eq!(c.quality, Quality::Good);
        assert!(c.tradeoffs.is_empty());
        assert_eq!((c.rect.x, c.rect.y), (0.0, 0.0));
    }

    #[test]
    fn test_space_conscious_accepts_blocking_cell() {
        // a 3.8 m sofa can only sit across the path in a 4 m room
        let c = run(
            RoomSpec::new(4.0, 2.0).with_element(RoomElement::new(ElementKind::Door, 1.5, 1.9, 1.0, 0.1)),
            LayoutStrategy::SpaceConscious,
            FurnitureSelection::new("sofa", 3.8, 1.8),
        )
        .unwrap();
        assert_eq!(c.quality, Quality::Fair);
        assert_eq!(c.tradeoffs[0].issue, IssueCode::BlocksEnergyFlow);
    }

    #[test]
    fn test_optimal_refuses_blocking_cell() {
        let c = run(
            RoomSpec::new(4.0, 2.0).with_element(RoomElement::new(ElementKind::Door, 1.5, 1.9, 1.0, 0.1)),
            LayoutStrategy::Optimal,
            FurnitureSelection::new("sofa", 3.8, 1.8),
        );
        assert!(c.is_none());
    }
}
