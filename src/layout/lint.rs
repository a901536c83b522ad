//! Bad-placement sweep and re-validation of edited layouts.
//!
//! The sweep runs once every item has been placed and flags positions that
//! are legal but poor feng shui: beds under windows, furniture crowding a
//! door, desks outside the command position. Edited layouts go through the
//! same sweep after an overlap check.

use serde::Deserialize;

use crate::furniture::FurnitureKind;
use crate::geometry::Rect;
use crate::room::{ElementKind, RoomAnalysis, Severity};

use super::builder::LayoutBuilder;
use super::config::PlannerConfig;
use super::error::PlannerError;
use super::types::{IssueCode, Layout, Placement, Rotation, Tradeoff};

/// A user move of one placed item
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlacementEdit {
    pub item_id: String,
    pub x: f64,
    pub y: f64,
    /// Degrees; 0, 90, 180 or 270
    #[serde(default)]
    pub rotation: u16,
}

impl PlacementEdit {
    pub fn new(item_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            item_id: item_id.into(),
            x,
            y,
            rotation: 0,
        }
    }

    pub fn with_rotation(mut self, degrees: u16) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Run every bad-placement check over a set of placements
pub fn sweep(placements: &[Placement], analysis: &RoomAnalysis, config: &PlannerConfig) -> Vec<Tradeoff> {
    let mut tradeoffs = Vec::new();
    for placement in placements {
        check_bed_under_window(placement, analysis, &mut tradeoffs);
        check_door_clearance(placement, analysis, config.door_clearance, &mut tradeoffs);
        check_desk_command(placement, &mut tradeoffs);
    }
    tradeoffs
}

fn check_bed_under_window(placement: &Placement, analysis: &RoomAnalysis, tradeoffs: &mut Vec<Tradeoff>) {
    if placement.kind != FurnitureKind::Bed {
        return;
    }
    if analysis
        .elements_of(ElementKind::Window)
        .any(|w| w.rect.intersects(&placement.rect))
    {
        tradeoffs.push(Tradeoff::new(
            &placement.item_id,
            IssueCode::BedUnderWindow,
            Severity::High,
            "Bed is positioned under a window, which can cause unstable energy",
            "If possible, move bed to a position with a solid wall behind it",
        ));
    }
}

fn check_door_clearance(
    placement: &Placement,
    analysis: &RoomAnalysis,
    clearance: f64,
    tradeoffs: &mut Vec<Tradeoff>,
) {
    if analysis
        .elements_of(ElementKind::Door)
        .any(|door| door.rect.expand(clearance).intersects(&placement.rect))
    {
        tradeoffs.push(Tradeoff::new(
            &placement.item_id,
            IssueCode::BlocksDoor,
            Severity::Medium,
            format!("{} may block proper door function or energy flow", placement.name),
            "Ensure at least 1m clearance in front of doors",
        ));
    }
}

fn check_desk_command(placement: &Placement, tradeoffs: &mut Vec<Tradeoff>) {
    if placement.kind == FurnitureKind::Desk && !placement.in_command_position {
        tradeoffs.push(Tradeoff::new(
            &placement.item_id,
            IssueCode::DeskNotCommand,
            Severity::Medium,
            "Desk is not in command position, which may reduce productivity",
            "Try to position desk diagonally across from door with solid wall behind",
        ));
    }
}

fn check_overlaps(placements: &[Placement], tradeoffs: &mut Vec<Tradeoff>) {
    for (i, a) in placements.iter().enumerate() {
        for (j, b) in placements.iter().enumerate() {
            if i != j && a.rect.intersects(&b.rect) {
                tradeoffs.push(Tradeoff::new(
                    &a.item_id,
                    IssueCode::FurnitureOverlap,
                    Severity::High,
                    format!("{} overlaps with {}", a.name, b.name),
                    "Move furniture to avoid overlaps",
                ));
            }
        }
    }
}

fn apply(placement: &mut Placement, edit: &PlacementEdit) -> Result<(), PlannerError> {
    let rotation = Rotation::from_degrees(edit.rotation).ok_or_else(|| PlannerError::InvalidRotation {
        item: edit.item_id.clone(),
        degrees: edit.rotation,
    })?;
    let (mut w, mut h) = (placement.rect.width, placement.rect.height);
    if rotation.is_quarter() != placement.rotation.is_quarter() {
        std::mem::swap(&mut w, &mut h);
    }
    placement.rect = Rect::new(edit.x, edit.y, w, h);
    placement.rotation = rotation;
    Ok(())
}

/// Apply user edits to a layout and re-validate it.
///
/// Planner trade-offs are dropped except `unable_to_place`; overlaps and the
/// bad-placement sweep are re-run and the layout is rescored. The id,
/// strategy and life goal carry over.
pub fn modify_layout(
    layout: Layout,
    edits: &[PlacementEdit],
    analysis: &RoomAnalysis,
    config: &PlannerConfig,
) -> Result<Layout, PlannerError> {
    let id = layout.id.clone();
    let mut placements = layout.placements.clone();

    for edit in edits {
        let placement = placements
            .iter_mut()
            .find(|p| p.item_id == edit.item_id)
            .ok_or_else(|| PlannerError::unknown_placement(&edit.item_id, &id))?;
        apply(placement, edit)?;
    }

    let mut tradeoffs: Vec<Tradeoff> = layout
        .tradeoffs
        .iter()
        .filter(|t| t.issue == IssueCode::UnableToPlace)
        .cloned()
        .collect();
    check_overlaps(&placements, &mut tradeoffs);
    tradeoffs.extend(sweep(&placements, analysis, config));

    log::debug!(
        "{}: re-validated after {} edit(s), {} trade-off(s)",
        id,
        edits.len(),
        tradeoffs.len()
    );

    let edited = Layout {
        placements,
        tradeoffs,
        ..layout
    };
    Ok(LayoutBuilder::from(edited).finish(id))
}
