//! Three-strategy layout generation

use std::collections::HashMap;

use uuid::Uuid;

use crate::furniture::FurnitureItem;
use crate::kua::KuaProfile;
use crate::room::RoomAnalysis;

use super::config::PlannerConfig;
use super::placer::{FurniturePlacer, PlacementContext};
use super::types::{Layout, LayoutStrategy, LifeGoal};

/// Source of layout ids
pub trait IdGenerator {
    fn next_id(&mut self, strategy: LayoutStrategy) -> String;
}

/// `optimal_1`, `space_conscious_1`, ... counted per strategy
#[derive(Debug, Default)]
pub struct SequentialIds {
    counters: HashMap<LayoutStrategy, u32>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, strategy: LayoutStrategy) -> String {
        let n = self.counters.entry(strategy).or_insert(0);
        *n += 1;
        format!("{}_{}", strategy, n)
    }
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, _strategy: LayoutStrategy) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Strategies run for a request, in output order
pub fn strategies(life_goal: Option<LifeGoal>) -> [LayoutStrategy; 3] {
    let third = match life_goal {
        Some(_) => LayoutStrategy::LifeGoal,
        None => LayoutStrategy::Variant,
    };
    [LayoutStrategy::Optimal, LayoutStrategy::SpaceConscious, third]
}

/// Runs a fresh placer per strategy over one analyzed room
pub struct LayoutGenerator<'a> {
    analysis: &'a RoomAnalysis,
    kua: Option<&'a KuaProfile>,
    config: &'a PlannerConfig,
}

impl<'a> LayoutGenerator<'a> {
    pub fn new(analysis: &'a RoomAnalysis, kua: Option<&'a KuaProfile>, config: &'a PlannerConfig) -> Self {
        Self {
            analysis,
            kua,
            config,
        }
    }

    /// Generate one layout per strategy
    pub fn generate(
        &self,
        items: &[FurnitureItem],
        life_goal: Option<LifeGoal>,
        ids: &mut dyn IdGenerator,
    ) -> Vec<Layout> {
        strategies(life_goal)
            .into_iter()
            .map(|strategy| {
                let ctx = PlacementContext {
                    analysis: self.analysis,
                    kua: self.kua,
                    config: self.config,
                    strategy,
                    life_goal: life_goal.filter(|_| strategy == LayoutStrategy::LifeGoal),
                };
                let layout = FurniturePlacer::new(ctx)
                    .place_all(items)
                    .finish(ids.next_id(strategy));
                log::info!(
                    "{} layout '{}': {} placed, {} trade-off(s), score {}",
                    strategy,
                    layout.id,
                    layout.placements.len(),
                    layout.tradeoffs.len(),
                    layout.score
                );
                layout
            })
            .collect()
    }
}
