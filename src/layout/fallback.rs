//! Fallback stages for items their primary strategy could not place
//!
//! Both stages prefer positions off the energy-flow paths. A position that
//! blocks one is taken only when nothing else fits; it is capped at fair and
//! noted.

use crate::furniture::FurnitureItem;
use crate::geometry::{steps_in, Rect};
use crate::room::{Quality, Severity, UsableSpace};

use super::builder::{Candidate, LayoutBuilder};
use super::flow;
use super::placer::{rotations, PlacementContext};
use super::types::{IssueCode, Rotation, Tradeoff};

const MAX_LAST_RESORT_STEP: f64 = 1.0;

/// Corner and centre positions of a `w × h` footprint inside a space
fn anchors(space: &Rect, w: f64, h: f64) -> [Rect; 5] {
    let (left, top) = (space.x, space.y);
    let (right, bottom) = (space.right() - w, space.bottom() - h);
    [
        Rect::new(left, top, w, h),
        Rect::new(right, top, w, h),
        Rect::new(left, bottom, w, h),
        Rect::new(right, bottom, w, h),
        Rect::centered_on(space.center(), w, h),
    ]
}

/// Try the room's usable spaces, best first
pub fn general(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
) -> Option<Candidate> {
    let mut spaces: Vec<&UsableSpace> = ctx.analysis.usable_spaces.iter().collect();
    spaces.sort_by(|a, b| {
        b.quality
            .cmp(&a.quality)
            .then(b.area.total_cmp(&a.area))
    });

    let found = [false, true].into_iter().find_map(|allow_blocking| {
        spaces.iter().find_map(|space| {
            rotations(item, Rotation::Upright).into_iter().find_map(|rotation| {
                let (w, h) = item.footprint(rotation.is_quarter());
                if w > space.rect.width || h > space.rect.height {
                    return None;
                }
                anchors(&space.rect, w, h)
                    .into_iter()
                    .find(|r| ctx.is_free(r, item, builder) && (allow_blocking || !blocks(ctx, r)))
                    .map(|rect| (rect, rotation, space.quality))
            })
        })
    });

    let (rect, rotation, quality) = found?;
    let candidate = Candidate::new(rect, rotation, quality).with_tradeoff(Tradeoff::new(
        &item.id,
        IssueCode::SuboptimalPlacement,
        Severity::Low,
        format!("{} couldn't be placed in an ideal feng shui position", item.name),
        "Consider element balancing with nearby decor",
    ));
    Some(note_blocking(ctx, item, candidate))
}

/// Scan the whole room on a coarse grid
pub fn last_resort(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
) -> Option<Candidate> {
    let analysis = ctx.analysis;
    let step = MAX_LAST_RESORT_STEP.min(analysis.width.min(analysis.length) / 5.0);
    let columns = steps_in(analysis.width, step);
    let rows = steps_in(analysis.length, step);

    let found = [false, true].into_iter().find_map(|allow_blocking| {
        rotations(item, Rotation::Upright).into_iter().find_map(|rotation| {
            let (w, h) = item.footprint(rotation.is_quarter());
            (0..=columns)
                .flat_map(|i| (0..=rows).map(move |j| (i, j)))
                .map(|(i, j)| Rect::new(i as f64 * step, j as f64 * step, w, h))
                .find(|r| ctx.is_free(r, item, builder) && (allow_blocking || !blocks(ctx, r)))
                .map(|rect| (rect, rotation))
        })
    });

    let (rect, rotation) = found?;
    let candidate = Candidate::new(rect, rotation, Quality::Poor).with_tradeoff(Tradeoff::new(
        &item.id,
        IssueCode::LastResortPlacement,
        Severity::Medium,
        format!("{} is placed in a non-optimal location", item.name),
        "Consider a different furniture arrangement or smaller pieces",
    ));
    Some(note_blocking(ctx, item, candidate))
}

fn blocks(ctx: &PlacementContext<'_>, rect: &Rect) -> bool {
    flow::blocks_flow(ctx.analysis, rect, ctx.config.flow_thickness)
}

/// Downgrade and annotate a candidate that ended up on a flow path
fn note_blocking(ctx: &PlacementContext<'_>, item: &FurnitureItem, mut candidate: Candidate) -> Candidate {
    if !blocks(ctx, &candidate.rect) {
        return candidate;
    }
    candidate.quality = candidate.quality.min(Quality::Fair);
    candidate.with_tradeoff(flow::blocking_tradeoff(item))
}
