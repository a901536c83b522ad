//! Layout accumulator threaded through the placement stages
//!
//! Strategies read a [`LayoutBuilder`] and propose a [`Candidate`]; only the
//! placer folds an accepted candidate back into a new builder.

use crate::furniture::{FurnitureItem, FurnitureKind};
use crate::geometry::Rect;
use crate::room::{BaguaArea, Quality, Severity};

use super::types::{
    IssueCode, Layout, LayoutStrategy, LifeGoal, Placement, Relationship, Rotation, Tradeoff,
    WallSide,
};

/// A proposed position for one item, with the notes it would add
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub rect: Rect,
    pub rotation: Rotation,
    pub quality: Quality,
    pub in_command_position: bool,
    pub against_wall: bool,
    pub bagua_area: Option<BaguaArea>,
    pub relationship: Option<Relationship>,
    pub wall_side: Option<WallSide>,
    pub tradeoffs: Vec<Tradeoff>,
}

impl Candidate {
    pub fn new(rect: Rect, rotation: Rotation, quality: Quality) -> Self {
        Self {
            rect,
            rotation,
            quality,
            in_command_position: false,
            against_wall: false,
            bagua_area: None,
            relationship: None,
            wall_side: None,
            tradeoffs: Vec::new(),
        }
    }

    pub fn in_command_position(mut self, has_wall_behind: bool) -> Self {
        self.in_command_position = true;
        self.against_wall = has_wall_behind;
        self
    }

    pub fn against_wall(mut self, side: WallSide) -> Self {
        self.against_wall = true;
        self.wall_side = Some(side);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn with_bagua_area(mut self, area: BaguaArea) -> Self {
        self.bagua_area = Some(area);
        self
    }

    pub fn with_tradeoff(mut self, tradeoff: Tradeoff) -> Self {
        self.tradeoffs.push(tradeoff);
        self
    }
}

/// Placements and trade-offs collected so far for one strategy
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBuilder {
    strategy: LayoutStrategy,
    life_goal: Option<LifeGoal>,
    placements: Vec<Placement>,
    tradeoffs: Vec<Tradeoff>,
}

impl LayoutBuilder {
    pub fn new(strategy: LayoutStrategy, life_goal: Option<LifeGoal>) -> Self {
        Self {
            strategy,
            life_goal,
            placements: Vec::new(),
            tradeoffs: Vec::new(),
        }
    }

    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    pub fn life_goal(&self) -> Option<LifeGoal> {
        self.life_goal
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn tradeoffs(&self) -> &[Tradeoff] {
        &self.tradeoffs
    }

    /// Placed items of one kind, in placement order
    pub fn placed_of(&self, kind: FurnitureKind) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.kind == kind)
    }

    /// Check if a rectangle overlaps any placed item
    pub fn overlaps_placed(&self, rect: &Rect) -> bool {
        self.placements.iter().any(|p| p.rect.intersects(rect))
    }

    /// Accept a candidate for an item.
    ///
    /// `zone` is used when the candidate does not name its bagua area.
    pub fn place(mut self, item: &FurnitureItem, candidate: Candidate, zone: Option<BaguaArea>) -> Self {
        self.placements.push(Placement {
            item_id: item.id.clone(),
            catalog_id: item.catalog_id.clone(),
            name: item.name.clone(),
            kind: item.kind,
            rect: candidate.rect,
            rotation: candidate.rotation,
            in_command_position: candidate.in_command_position,
            against_wall: candidate.against_wall,
            quality: candidate.quality,
            bagua_area: candidate.bagua_area.or(zone),
            relationship: candidate.relationship,
            wall_side: candidate.wall_side,
        });
        self.tradeoffs.extend(candidate.tradeoffs);
        self
    }

    /// Record that an item could not be placed anywhere
    pub fn unplaced(self, item: &FurnitureItem) -> Self {
        self.with_tradeoff(Tradeoff::new(
            &item.id,
            IssueCode::UnableToPlace,
            Severity::High,
            format!("Not enough space to place {}", item.name),
            "Consider removing some furniture or using smaller pieces",
        ))
    }

    pub fn with_tradeoff(mut self, tradeoff: Tradeoff) -> Self {
        self.tradeoffs.push(tradeoff);
        self
    }

    pub fn with_tradeoffs(mut self, tradeoffs: impl IntoIterator<Item = Tradeoff>) -> Self {
        self.tradeoffs.extend(tradeoffs);
        self
    }

    /// Freeze the accumulated state into a scored layout
    pub fn finish(self, id: String) -> Layout {
        let score = super::score::score(&self.placements, &self.tradeoffs);
        Layout {
            id,
            strategy: self.strategy,
            placements: self.placements,
            tradeoffs: self.tradeoffs,
            score,
            life_goal: self.life_goal,
        }
    }
}

impl From<Layout> for LayoutBuilder {
    fn from(layout: Layout) -> Self {
        Self {
            strategy: layout.strategy,
            life_goal: layout.life_goal,
            placements: layout.placements,
            tradeoffs: layout.tradeoffs,
        }
    }
}
