//! Room-type advice returned alongside (or instead of) generated layouts

use serde::Serialize;

use crate::room::{RoomType, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    General,
    Placement,
    Enhancement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub importance: Severity,
}

const fn advice(
    kind: RecommendationKind,
    category: &'static str,
    title: &'static str,
    description: &'static str,
    importance: Severity,
) -> Recommendation {
    Recommendation {
        kind,
        category,
        title,
        description,
        importance,
    }
}

const BEDROOM: &[Recommendation] = &[
    advice(
        RecommendationKind::General,
        "sleep",
        "Optimal sleep environment",
        "For better sleep quality, consider using soft, calming colors like blue, green, or lavender. \
         Avoid electronics near the bed and use blackout curtains.",
        Severity::High,
    ),
    advice(
        RecommendationKind::Placement,
        "bed_placement",
        "Ideal bed placement",
        "Place your bed in the command position (diagonally across from the door, but not directly in \
         line with it) with a solid wall behind it for stability and support.",
        Severity::High,
    ),
];

const OFFICE: &[Recommendation] = &[
    advice(
        RecommendationKind::General,
        "productivity",
        "Enhance productivity",
        "Place inspiring artwork at eye level and use task lighting to improve focus. Keep the desk \
         clear of clutter for better energy flow.",
        Severity::High,
    ),
    advice(
        RecommendationKind::Placement,
        "desk_placement",
        "Ideal desk placement",
        "Position your desk in the command position with a view of the door but not directly in line \
         with it. Ensure your back is to a solid wall for support.",
        Severity::High,
    ),
];

const LIVING_ROOM: &[Recommendation] = &[
    advice(
        RecommendationKind::General,
        "energy_flow",
        "Improve energy flow",
        "Arrange seating to encourage conversation. Use rounded corners on furniture when possible to \
         create better energy flow.",
        Severity::Medium,
    ),
    advice(
        RecommendationKind::Placement,
        "sofa_placement",
        "Ideal sofa placement",
        "Place the main sofa against a solid wall for stability. Arrange seating in a way that allows \
         everyone to see each other easily for better communication.",
        Severity::High,
    ),
];

const GENERAL: &[Recommendation] = &[
    advice(
        RecommendationKind::Enhancement,
        "decluttering",
        "Maintain clear energy with decluttering",
        "Regularly clear clutter to maintain positive energy flow. Keep pathways open and organize \
         storage to prevent energy stagnation.",
        Severity::High,
    ),
    advice(
        RecommendationKind::Enhancement,
        "lighting",
        "Optimize lighting for energy balance",
        "Use layered lighting with a mix of overhead, task, and accent lights. Natural light is best \
         during the day, with warm lighting in the evening for better rest.",
        Severity::Medium,
    ),
    advice(
        RecommendationKind::Enhancement,
        "plants",
        "Add living plants for positive energy",
        "Incorporate healthy plants to improve air quality and add vibrant energy. Place them in areas \
         that need activation or to soften sharp corners.",
        Severity::Medium,
    ),
];

/// Advice for a room type followed by the general items every room gets
pub fn for_room(room_type: Option<RoomType>) -> Vec<Recommendation> {
    let specific: &[Recommendation] = match room_type {
        Some(RoomType::Bedroom) => BEDROOM,
        Some(RoomType::Office) => OFFICE,
        Some(RoomType::LivingRoom) => LIVING_ROOM,
        None => &[],
    };
    specific.iter().chain(GENERAL).cloned().collect()
}
