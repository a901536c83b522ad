//! Wall strategy for storage pieces that want their back to a wall

use crate::furniture::FurnitureItem;
use crate::geometry::{steps_in, Rect};
use crate::room::{ElementKind, Quality, RoomAnalysis};

use super::builder::{Candidate, LayoutBuilder};
use super::placer::{rotations, Jitter, PlacementContext};
use super::types::{Rotation, WallSide};

/// Score bonus every wall position earns
const WALL_BONUS: f64 = 3.0;
/// Fewest candidate positions tried along one wall
const MIN_STEPS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct WallSegment {
    rect: Rect,
    horizontal: bool,
    side: WallSide,
}

/// Drawn walls, or four virtual walls along the room edges when none are drawn
fn segments(analysis: &RoomAnalysis, thickness: f64) -> Vec<WallSegment> {
    let center = analysis.center();
    let drawn: Vec<WallSegment> = analysis
        .elements_of(ElementKind::Wall)
        .map(|wall| {
            let rect = wall.rect;
            let horizontal = rect.width > rect.height;
            let side = match (horizontal, rect.center()) {
                (true, c) if c.y <= center.y => WallSide::Top,
                (true, _) => WallSide::Bottom,
                (false, c) if c.x <= center.x => WallSide::Left,
                (false, _) => WallSide::Right,
            };
            WallSegment {
                rect,
                horizontal,
                side,
            }
        })
        .collect();
    if !drawn.is_empty() {
        return drawn;
    }

    let (w, l) = (analysis.width, analysis.length);
    vec![
        WallSegment {
            rect: Rect::new(0.0, 0.0, w, thickness),
            horizontal: true,
            side: WallSide::Top,
        },
        WallSegment {
            rect: Rect::new(w - thickness, 0.0, thickness, l),
            horizontal: false,
            side: WallSide::Right,
        },
        WallSegment {
            rect: Rect::new(0.0, l - thickness, w, thickness),
            horizontal: true,
            side: WallSide::Bottom,
        },
        WallSegment {
            rect: Rect::new(0.0, 0.0, thickness, l),
            horizontal: false,
            side: WallSide::Left,
        },
    ]
}

/// Footprints of size `w × h` flush against the wall's inner face, from one
/// end of the wall to the other
fn positions_along(wall: &WallSegment, w: f64, h: f64, step: f64) -> Vec<Rect> {
    let r = wall.rect;
    let (length, along) = if wall.horizontal { (r.width, w) } else { (r.height, h) };
    let steps = MIN_STEPS.max(steps_in(length, step));
    let last = (length - along).max(0.0);

    let mut rects: Vec<Rect> = (0..=steps)
        .map(|i| {
            let offset = (i as f64 * length / steps as f64).min(last);
            match wall.side {
                WallSide::Top => Rect::new(r.x + offset, r.bottom(), w, h),
                WallSide::Bottom => Rect::new(r.x + offset, r.y - h, w, h),
                WallSide::Left => Rect::new(r.right(), r.y + offset, w, h),
                WallSide::Right => Rect::new(r.x - w, r.y + offset, w, h),
            }
        })
        .collect();
    rects.dedup();
    rects
}

fn quality_points(quality: Quality) -> f64 {
    match quality {
        Quality::Excellent => 10.0,
        Quality::Good => 8.0,
        Quality::Fair => 5.0,
        Quality::Poor => 2.0,
    }
}

fn side_quality(ctx: &PlacementContext<'_>, side: WallSide) -> Quality {
    let Some(kua) = ctx.kua else {
        return Quality::Good;
    };
    let direction = side.compass(ctx.analysis.orientation);
    if kua.is_favorable(direction) {
        Quality::Excellent
    } else if kua.is_unfavorable(direction) {
        Quality::Fair
    } else {
        Quality::Good
    }
}

/// Place an item against the best-scoring free wall position
pub fn place(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
    jitter: &mut Jitter,
) -> Option<Candidate> {
    let walls = segments(ctx.analysis, ctx.config.virtual_wall_thickness);

    for rotation in rotations(item, Rotation::Upright) {
        let (w, h) = item.footprint(rotation.is_quarter());
        let mut best: Option<(f64, Candidate)> = None;

        for wall in &walls {
            let quality = side_quality(ctx, wall.side);
            for rect in positions_along(wall, w, h, ctx.config.wall_step) {
                if !ctx.is_free(&rect, item, builder) {
                    continue;
                }
                let score = quality_points(quality) + WALL_BONUS + jitter.next();
                if best.as_ref().map_or(true, |(s, _)| score > *s) {
                    best = Some((
                        score,
                        Candidate::new(rect, rotation, quality).against_wall(wall.side),
                    ));
                }
            }
        }

        if let Some((_, candidate)) = best {
            return Some(candidate);
        }
    }
    None
}
