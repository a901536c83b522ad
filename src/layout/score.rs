//! Layout scoring

use std::collections::HashMap;

use crate::room::{Quality, Severity};

use super::types::{Placement, Tradeoff};

const BASE: f64 = 70.0;
const COMMAND_WEIGHT: f64 = 0.15;
const WALL_WEIGHT: f64 = 0.10;
const QUALITY_WEIGHT: f64 = 0.10;

fn penalty(severity: Severity) -> f64 {
    match severity {
        Severity::High => 8.0,
        Severity::Medium => 4.0,
        Severity::Low => 1.0,
    }
}

fn percent(count: usize, total: usize) -> f64 {
    count as f64 * 100.0 / total as f64
}

/// Score a layout on a 0-100 scale.
///
/// Each item is penalized once, by its worst trade-off; trade-offs not tied
/// to an item are penalized individually. An empty layout scores 0.
pub fn score(placements: &[Placement], tradeoffs: &[Tradeoff]) -> u8 {
    if placements.is_empty() {
        return 0;
    }
    let total = placements.len();
    let command = placements.iter().filter(|p| p.in_command_position).count();
    let wall = placements.iter().filter(|p| p.against_wall).count();
    let good = placements
        .iter()
        .filter(|p| p.quality >= Quality::Good)
        .count();

    let mut worst: HashMap<&str, Severity> = HashMap::new();
    let mut loose = 0.0;
    for tradeoff in tradeoffs {
        match &tradeoff.item_id {
            Some(id) => {
                let entry = worst.entry(id.as_str()).or_insert(tradeoff.severity);
                *entry = (*entry).max(tradeoff.severity);
            }
            None => loose += penalty(tradeoff.severity),
        }
    }
    let penalties: f64 = worst.values().copied().map(penalty).sum::<f64>() + loose;

    let raw = BASE
        + COMMAND_WEIGHT * percent(command, total)
        + WALL_WEIGHT * percent(wall, total)
        + QUALITY_WEIGHT * percent(good, total)
        - penalties;
    raw.clamp(0.0, 100.0) as u8
}
