//! Small-item strategy: companions, energy balancing and bagua targeting
//!
//! Candidates come from three pools. Companion spots sit beside furniture
//! already placed (a nightstand next to a bed), balance spots sit on flagged
//! energy issues, and zone spots cover the bagua areas the item's role calls
//! for. Everything that is free is ranked and the best one wins; a life goal
//! only breaks ties, so companions stay beside their hosts.

use std::cmp::Ordering;

use crate::furniture::{FurnitureItem, FurnitureKind};
use crate::geometry::{steps_in, Point, Rect};
use crate::room::{BaguaArea, EnergyIssueKind, EntrySource, FlowStrength, Quality};

use super::builder::{Candidate, LayoutBuilder};
use super::placer::{Jitter, PlacementContext};
use super::types::{Relationship, Rotation};

/// Offset from a strong door entry to a water feature
const ENTRY_OFFSET: f64 = 1.0;
const MAX_ZONE_STEP: f64 = 0.5;

struct Spot {
    rect: Rect,
    quality: Quality,
    relationship: Option<Relationship>,
    bagua_area: Option<BaguaArea>,
}

impl Spot {
    fn related(rect: Rect, relationship: Relationship) -> Self {
        Self {
            rect,
            quality: Quality::Excellent,
            relationship: Some(relationship),
            bagua_area: None,
        }
    }
}

/// Ranking key, compared descending
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rank {
    quality: Quality,
    priority: u8,
    in_target_zone: bool,
    /// Higher for zones earlier in the goal's list, 0 outside them
    goal_weight: usize,
    intensity: f64,
    jitter: f64,
}

impl Rank {
    fn cmp(&self, other: &Rank) -> Ordering {
        self.quality
            .cmp(&other.quality)
            .then(self.priority.cmp(&other.priority))
            .then(self.in_target_zone.cmp(&other.in_target_zone))
            .then(self.goal_weight.cmp(&other.goal_weight))
            .then(self.intensity.total_cmp(&other.intensity))
            .then(self.jitter.total_cmp(&other.jitter))
    }
}

fn hosts(kind: FurnitureKind) -> &'static [FurnitureKind] {
    match kind {
        FurnitureKind::Nightstand => &[FurnitureKind::Bed],
        FurnitureKind::SideTable => &[FurnitureKind::Sofa],
        FurnitureKind::Lamp => &[FurnitureKind::Desk, FurnitureKind::Sofa, FurnitureKind::Chair],
        _ => &[],
    }
}

fn companion_spots(ctx: &PlacementContext<'_>, builder: &LayoutBuilder, item: &FurnitureItem) -> Vec<Spot> {
    let gap = ctx.config.companion_gap;
    let (w, h) = (item.width, item.height);
    let mut spots = Vec::new();

    for host in builder
        .placements()
        .iter()
        .filter(|p| hosts(item.kind).contains(&p.kind))
    {
        let r = host.rect;
        match item.kind {
            FurnitureKind::Lamp => spots.push(Spot::related(
                Rect::new(r.right() + gap, r.y, w, h),
                Relationship::Lighting,
            )),
            _ => {
                let relationship = if item.kind == FurnitureKind::Nightstand {
                    Relationship::Bedside
                } else {
                    Relationship::Sofaside
                };
                let y = r.y + (r.height - h) / 2.0;
                spots.push(Spot::related(Rect::new(r.x - gap - w, y, w, h), relationship));
                spots.push(Spot::related(Rect::new(r.right() + gap, y, w, h), relationship));
            }
        }
    }
    spots
}

fn balance_spots(ctx: &PlacementContext<'_>, item: &FurnitureItem) -> Vec<Spot> {
    let flow = &ctx.analysis.energy_flow;
    let bounds = ctx.analysis.bounds();
    let (w, h) = (item.width, item.height);

    match item.kind {
        FurnitureKind::Plant => flow
            .issues
            .iter()
            .filter_map(|issue| {
                let relationship = match issue.kind {
                    EnergyIssueKind::SharpCorner => Relationship::BalanceCorner,
                    EnergyIssueKind::StagnantEnergy => Relationship::ActivateEnergy,
                    EnergyIssueKind::DoorAlignment => return None,
                };
                let rect = Rect::centered_on(issue.location, w, h).shifted_inside(&bounds);
                Some(Spot::related(rect, relationship))
            })
            .collect(),
        FurnitureKind::WaterFeature => flow
            .entry_points
            .iter()
            .filter(|e| e.source == EntrySource::Door && e.strength == FlowStrength::Strong)
            .map(|e| {
                let rect = Rect::new(e.point.x + ENTRY_OFFSET, e.point.y + ENTRY_OFFSET, w, h);
                Spot::related(rect, Relationship::EnhanceEntry)
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Grid spots inside each target zone, in target order
fn zone_spots(ctx: &PlacementContext<'_>, item: &FurnitureItem, targets: &[BaguaArea]) -> Vec<Spot> {
    let mut spots = Vec::new();
    let zones = targets
        .iter()
        .filter_map(|area| ctx.analysis.zones.iter().find(|z| z.area == *area));
    for zone in zones {
        let z = zone.rect;
        let step = MAX_ZONE_STEP.min(z.width.min(z.height) / 3.0);
        for i in 0..steps_in(z.width, step) {
            for j in 0..steps_in(z.height, step) {
                let rect = Rect::new(z.x + i as f64 * step, z.y + j as f64 * step, item.width, item.height);
                if !z.contains_rect(&rect) {
                    continue;
                }
                spots.push(Spot {
                    rect,
                    quality: Quality::Good,
                    relationship: None,
                    bagua_area: Some(zone.area),
                });
            }
        }
    }
    spots
}

/// Zones an item's role calls for, goal zones first
fn target_zones(kind: FurnitureKind, goal: &[BaguaArea]) -> Vec<BaguaArea> {
    let by_role: &[BaguaArea] = match kind {
        FurnitureKind::Bed => &[BaguaArea::Relationships, BaguaArea::Center],
        FurnitureKind::Desk => &[BaguaArea::Knowledge, BaguaArea::Career],
        FurnitureKind::Lamp => &[BaguaArea::Fame, BaguaArea::Knowledge],
        FurnitureKind::Plant => &[BaguaArea::Wealth, BaguaArea::Family, BaguaArea::Center],
        _ => &[BaguaArea::Center],
    };
    let mut targets = goal.to_vec();
    for area in by_role {
        if !targets.contains(area) {
            targets.push(*area);
        }
    }
    targets
}

/// Place a small item on the best-ranked free spot
pub fn place(
    ctx: &PlacementContext<'_>,
    builder: &LayoutBuilder,
    item: &FurnitureItem,
    jitter: &mut Jitter,
) -> Option<Candidate> {
    let goal = ctx.goal().map(|g| g.zones()).unwrap_or(&[]);
    let targets = target_zones(item.kind, goal);

    let mut spots = companion_spots(ctx, builder, item);
    spots.extend(balance_spots(ctx, item));
    spots.extend(zone_spots(ctx, item, &targets));

    let area_at = |point: Point| ctx.analysis.zone_at(point).map(|z| z.area);

    let mut ranked: Vec<(Rank, Spot)> = spots
        .into_iter()
        .filter(|s| ctx.is_free(&s.rect, item, builder))
        .map(|s| {
            let center = s.rect.center();
            let area = area_at(center);
            let rank = Rank {
                goal_weight: area
                    .and_then(|a| goal.iter().position(|g| *g == a))
                    .map_or(0, |i| goal.len() - i),
                quality: s.quality,
                priority: s.relationship.map_or(0, |r| r.priority()),
                in_target_zone: area.is_some_and(|a| targets.contains(&a)),
                intensity: ctx.analysis.energy_flow.intensity_at(center),
                jitter: jitter.next(),
            };
            (rank, s)
        })
        .collect();
    ranked.sort_by(|(a, _), (b, _)| b.cmp(a));

    let (_, spot) = ranked.into_iter().next()?;
    let mut candidate = Candidate::new(spot.rect, Rotation::Upright, spot.quality);
    if let Some(relationship) = spot.relationship {
        candidate = candidate.with_relationship(relationship);
    }
    if let Some(area) = spot.bagua_area {
        candidate = candidate.with_bagua_area(area);
    }
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::furniture::FurnitureSelection;
    use crate::layout::placer::test_support::{analysis, items};
    use crate::layout::{LayoutStrategy, LifeGoal, PlannerConfig};
    use crate::room::{ElementKind, RoomAnalysis, RoomElement, RoomSpec};

    fn ctx<'a>(
        analysis: &'a RoomAnalysis,
        config: &'a PlannerConfig,
        strategy: LayoutStrategy,
        life_goal: Option<LifeGoal>,
    ) -> PlacementContext<'a> {
        PlacementContext {
            analysis,
            kua: None,
            config,
            strategy,
            life_goal,
        }
    }

    fn with_bed(bed: Rect) -> LayoutBuilder {
        let items = items(&[FurnitureSelection::new("bed", bed.width, bed.height)]);
        LayoutBuilder::new(LayoutStrategy::Optimal, None).place(
            &items[0],
            Candidate::new(bed, Rotation::Upright, Quality::Good),
            None,
        )
    }

    #[test]
    fn test_target_zones_put_goal_first() {
        let targets = target_zones(FurnitureKind::Plant, LifeGoal::Wealth.zones());
        assert_eq!(
            targets,
            vec![
                BaguaArea::Wealth,
                BaguaArea::Fame,
                BaguaArea::HelpfulPeople,
                BaguaArea::Family,
                BaguaArea::Center,
            ]
        );
        assert_eq!(target_zones(FurnitureKind::Other, &[]), vec![BaguaArea::Center]);
    }

    #[test]
    fn test_nightstand_goes_bedside() {
        let analysis = analysis(RoomSpec::new(4.0, 4.0));
        let config = PlannerConfig::default();
        let ctx = ctx(&analysis, &config, LayoutStrategy::Optimal, None);
        let builder = with_bed(Rect::new(1.0, 1.0, 2.0, 2.0));
        let items = items(&[FurnitureSelection::new("nightstand", 0.4, 0.4)]);

        let c = place(&ctx, &builder, &items[0], &mut Jitter::off()).unwrap();
        assert_eq!(c.relationship, Some(Relationship::Bedside));
        assert_eq!(c.quality, Quality::Excellent);
        assert!((c.rect.y - 1.8).abs() < 1e-9);
        assert!(!c.rect.intersects(&Rect::new(1.0, 1.0, 2.0, 2.0)));
    }

    #[test]
    fn test_plant_balances_sharp_corner() {
        // the path from a door in the top-left corner passes its corner
        let analysis = analysis(
            RoomSpec::new(4.0, 4.0).with_element(RoomElement::new(ElementKind::Door, 0.0, 0.0, 0.2, 0.2)),
        );
        let config = PlannerConfig::default();
        let ctx = ctx(&analysis, &config, LayoutStrategy::Optimal, None);
        let items = items(&[FurnitureSelection::new("plant", 0.3, 0.3)]);

        let c = place(
            &ctx,
            &LayoutBuilder::new(LayoutStrategy::Optimal, None),
            &items[0],
            &mut Jitter::off(),
        )
        .unwrap();
        assert_eq!(c.relationship, Some(Relationship::BalanceCorner));
        assert!(analysis.bounds().contains_rect(&c.rect));
    }

    #[test]
    fn test_zone_spots_stay_inside_zone() {
        let analysis = analysis(RoomSpec::new(3.0, 3.0));
        let config = PlannerConfig::default();
        let ctx = ctx(&analysis, &config, LayoutStrategy::Optimal, None);
        let items = items(&[FurnitureSelection::new("vase", 0.4, 0.4)]);
        let spots = zone_spots(&ctx, &items[0], &[BaguaArea::Center]);
        let center = analysis.zones.iter().find(|z| z.area == BaguaArea::Center).unwrap();
        assert!(!spots.is_empty());
        assert!(spots.iter().all(|s| center.rect.contains_rect(&s.rect)));
    }

    #[test]
    fn test_life_goal_pulls_plant_into_goal_zone() {
        let analysis = analysis(RoomSpec::new(3.0, 3.0));
        let config = PlannerConfig::default();
        let ctx = ctx(&analysis, &config, LayoutStrategy::LifeGoal, Some(LifeGoal::Wealth));
        let items = items(&[FurnitureSelection::new("plant", 0.3, 0.3)]);

        let c = place(
            &ctx,
            &LayoutBuilder::new(LayoutStrategy::LifeGoal, Some(LifeGoal::Wealth)),
            &items[0],
            &mut Jitter::off(),
        )
        .unwrap();
        // wealth leads the goal's zones
        assert_eq!(analysis.zone_at(c.rect.center()).unwrap().area, BaguaArea::Wealth);
    }

    #[test]
    fn test_life_goal_keeps_nightstand_bedside() {
        let analysis = analysis(RoomSpec::new(5.0, 5.0));
        let config = PlannerConfig::default();
        let ctx = ctx(&analysis, &config, LayoutStrategy::LifeGoal, Some(LifeGoal::Wealth));
        let builder = with_bed(Rect::new(1.7, 1.5, 1.6, 2.0));
        let items = items(&[FurnitureSelection::new("nightstand", 0.4, 0.4)]);

        let c = place(&ctx, &builder, &items[0], &mut Jitter::off()).unwrap();
        assert_eq!(c.relationship, Some(Relationship::Bedside));
    }

    #[test]
    fn test_zone_spots_follow_target_order() {
        let analysis = analysis(RoomSpec::new(3.0, 3.0));
        let config = PlannerConfig::default();
        let ctx = ctx(&analysis, &config, LayoutStrategy::Optimal, None);
        let items = items(&[FurnitureSelection::new("vase", 0.4, 0.4)]);
        let spots = zone_spots(&ctx, &items[0], &[BaguaArea::Fame, BaguaArea::Career]);
        assert_eq!(spots.first().and_then(|s| s.bagua_area), Some(BaguaArea::Fame));
        assert_eq!(spots.last().and_then(|s| s.bagua_area), Some(BaguaArea::Career));
    }
}
