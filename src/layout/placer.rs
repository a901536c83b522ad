//! Per-strategy furniture placer
//!
//! Every item walks the same ladder of stages: its category's primary
//! strategy, then the general fallback, then a coarse last-resort scan. An
//! item that falls off the end is recorded as unplaced.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::furniture::{FurnitureCategory, FurnitureItem, FurnitureKind};
use crate::geometry::Rect;
use crate::kua::KuaProfile;
use crate::room::{ConstraintKind, ElementKind, RoomAnalysis};

use super::builder::{Candidate, LayoutBuilder};
use super::config::PlannerConfig;
use super::types::{LayoutStrategy, LifeGoal, Rotation};
use super::{command, fallback, flow, lint, small, wall};

/// Read-only inputs shared by every stage
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub analysis: &'a RoomAnalysis,
    pub kua: Option<&'a KuaProfile>,
    pub config: &'a PlannerConfig,
    pub strategy: LayoutStrategy,
    pub life_goal: Option<LifeGoal>,
}

impl<'a> PlacementContext<'a> {
    /// Check if an item could occupy `rect` given what is already placed.
    ///
    /// The rectangle must lie inside the room and clear placed items and
    /// unusable areas; beds must also stay off windows.
    pub fn is_free(&self, rect: &Rect, item: &FurnitureItem, builder: &LayoutBuilder) -> bool {
        if !self.analysis.bounds().contains_rect(rect) {
            return false;
        }
        if builder.overlaps_placed(rect) {
            return false;
        }
        if self
            .analysis
            .constraints_of(ConstraintKind::UnusableArea)
            .any(|c| c.rect.intersects(rect))
        {
            return false;
        }
        if item.kind == FurnitureKind::Bed
            && self
                .analysis
                .elements_of(ElementKind::Window)
                .any(|w| w.rect.intersects(rect))
        {
            return false;
        }
        true
    }

    /// Whether the active strategy biases toward a life goal
    pub fn goal(&self) -> Option<LifeGoal> {
        match self.strategy {
            LayoutStrategy::LifeGoal => self.life_goal,
            _ => None,
        }
    }
}

/// Rotations to try for an item, `first` leading; square items need only one
pub fn rotations(item: &FurnitureItem, first: Rotation) -> Vec<Rotation> {
    if item.width == item.height {
        vec![first]
    } else {
        vec![first, first.other()]
    }
}

/// Small random tie-breaker, active only for the variant strategy
#[derive(Debug)]
pub struct Jitter(Option<StdRng>);

impl Jitter {
    pub fn off() -> Self {
        Self(None)
    }

    pub fn seeded(seed: u64) -> Self {
        Self(Some(StdRng::seed_from_u64(seed)))
    }

    /// A value in `[0, 0.5)`, or zero when off
    pub fn next(&mut self) -> f64 {
        match &mut self.0 {
            Some(rng) => rng.gen_range(0.0..0.5),
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Primary,
    GeneralFallback,
    LastResort,
    Unplaced,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::Primary => Stage::GeneralFallback,
            Stage::GeneralFallback => Stage::LastResort,
            Stage::LastResort | Stage::Unplaced => Stage::Unplaced,
        }
    }
}

/// Places one strategy's furniture; create a fresh one per layout
pub struct FurniturePlacer<'a> {
    ctx: PlacementContext<'a>,
    jitter: Jitter,
}

impl<'a> FurniturePlacer<'a> {
    pub fn new(ctx: PlacementContext<'a>) -> Self {
        let jitter = match ctx.strategy {
            LayoutStrategy::Variant => Jitter::seeded(ctx.config.variant_seed),
            _ => Jitter::off(),
        };
        Self { ctx, jitter }
    }

    /// Place every item and run the bad-placement sweep
    pub fn place_all(mut self, items: &[FurnitureItem]) -> LayoutBuilder {
        let mut builder = LayoutBuilder::new(self.ctx.strategy, self.ctx.life_goal);
        for item in self.ordered(items) {
            builder = self.place_item(builder, item);
        }
        let sweep = lint::sweep(builder.placements(), self.ctx.analysis, self.ctx.config);
        builder.with_tradeoffs(sweep)
    }

    /// Category order, with smaller footprints first under space-conscious
    fn ordered<'i>(&self, items: &'i [FurnitureItem]) -> Vec<&'i FurnitureItem> {
        let mut ordered: Vec<&FurnitureItem> = items.iter().collect();
        if self.ctx.strategy == LayoutStrategy::SpaceConscious {
            ordered.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then(a.area().total_cmp(&b.area()))
            });
        } else {
            ordered.sort_by_key(|item| item.category);
        }
        ordered
    }

    fn place_item(&mut self, builder: LayoutBuilder, item: &FurnitureItem) -> LayoutBuilder {
        let mut stage = Stage::Primary;
        loop {
            let candidate = match stage {
                Stage::Primary => self.primary(&builder, item),
                Stage::GeneralFallback => fallback::general(&self.ctx, &builder, item),
                Stage::LastResort => fallback::last_resort(&self.ctx, &builder, item),
                Stage::Unplaced => {
                    log::debug!("{}: {} could not be placed", self.ctx.strategy, item.id);
                    return builder.unplaced(item);
                }
            };

            if let Some(candidate) = candidate {
                log::debug!(
                    "{}: placed {} at ({:.2}, {:.2}) via {:?}",
                    self.ctx.strategy,
                    item.id,
                    candidate.rect.x,
                    candidate.rect.y,
                    stage
                );
                let zone = self
                    .ctx
                    .analysis
                    .zone_at(candidate.rect.center())
                    .map(|z| z.area);
                return builder.place(item, candidate, zone);
            }
            stage = stage.next();
        }
    }

    fn primary(&mut self, builder: &LayoutBuilder, item: &FurnitureItem) -> Option<Candidate> {
        match item.category {
            FurnitureCategory::Command => command::place(&self.ctx, builder, item),
            FurnitureCategory::Wall => wall::place(&self.ctx, builder, item, &mut self.jitter),
            FurnitureCategory::Large => flow::place(&self.ctx, builder, item, &mut self.jitter),
            FurnitureCategory::Small => small::place(&self.ctx, builder, item, &mut self.jitter),
        }
    }
}
