//! End-to-end planning scenarios

use pretty_assertions::assert_eq;

use fengshui_planner::layout::{IssueCode, Relationship};
use fengshui_planner::room::{BaguaArea, EnergyIssueKind};
use fengshui_planner::{
    plan, ElementKind, FurnitureSelection, Gender, Layout, LayoutStrategy, LifeGoal, Occupant,
    PlanRequest, Quality, Rect, RoomElement, RoomSpec, RoomType, Severity,
};

fn door(x: f64, y: f64, w: f64, h: f64) -> RoomElement {
    RoomElement::new(ElementKind::Door, x, y, w, h)
}

#[test]
fn test_square_bedroom_bed_in_command_position() {
    let room = RoomSpec::new(4.0, 4.0).with_element(door(1.5, 3.9, 1.0, 0.1));
    let request = PlanRequest::new(room).with_furniture(FurnitureSelection::new("queen_bed", 2.0, 2.0));

    let result = plan(&request).unwrap();
    for layout in &result.layouts {
        let bed = layout.placement("queen_bed_1").unwrap();
        assert!(bed.in_command_position, "{}: bed not in command position", layout.id);
        assert!(Rect::new(0.0, 0.0, 4.0, 4.0).contains_rect(&bed.rect));
        // across the room from the door, not in front of it
        assert!(bed.rect.center().y < 3.0);
    }
}

#[test]
fn test_bed_never_overlaps_window() {
    let window = Rect::new(2.0, 1.5, 1.0, 1.0);
    let room = RoomSpec::new(3.0, 3.0)
        .with_element(door(1.0, 2.9, 1.0, 0.1))
        .with_element(RoomElement::new(
            ElementKind::Window,
            window.x,
            window.y,
            window.width,
            window.height,
        ));
    let request = PlanRequest::new(room).with_furniture(FurnitureSelection::new("bed", 1.0, 1.0));

    let result = plan(&request).unwrap();
    for layout in &result.layouts {
        let bed = layout.placement("bed_1").unwrap();
        assert!(!bed.rect.intersects(&window), "{}: bed overlaps window", layout.id);
    }
}

#[test]
fn test_facing_doors_raise_one_alignment_issue() {
    let room = RoomSpec::new(4.0, 4.0)
        .with_element(door(0.0, 2.0, 0.1, 1.0))
        .with_element(door(3.9, 2.0, 0.1, 1.0));

    let result = plan(&PlanRequest::new(room)).unwrap();
    let issues: Vec<_> = result
        .analysis
        .energy_flow
        .issues_of(EnergyIssueKind::DoorAlignment)
        .collect();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::High);
}

#[test]
fn test_wealth_goal_pulls_plant_into_wealth_zone() {
    let request = PlanRequest::new(RoomSpec::new(4.0, 4.0))
        .with_furniture(FurnitureSelection::new("plant", 0.3, 0.3))
        .with_life_goal(LifeGoal::Wealth);

    let result = plan(&request).unwrap();
    let goal = &result.layouts[2];
    assert_eq!(goal.strategy, LayoutStrategy::LifeGoal);
    assert_eq!(goal.life_goal, Some(LifeGoal::Wealth));

    let in_goal_zone = |layout: &Layout| {
        let plant = layout.placement("plant_1").unwrap();
        let zone = result.analysis.zone_at(plant.rect.center()).unwrap().area;
        LifeGoal::Wealth.zones().contains(&zone)
    };
    assert!(in_goal_zone(goal));
    assert!(in_goal_zone(goal) >= in_goal_zone(&result.layouts[0]));

    let plant = goal.placement("plant_1").unwrap();
    let zone = result.analysis.zone_at(plant.rect.center()).unwrap().area;
    assert!(matches!(zone, BaguaArea::Wealth | BaguaArea::Fame), "plant landed in {}", zone);
}

#[test]
fn test_life_goal_keeps_nightstand_beside_bed() {
    let room = RoomSpec::new(5.0, 5.0).with_element(door(2.0, 4.9, 1.0, 0.1));
    let request = PlanRequest::new(room)
        .with_furniture(FurnitureSelection::new("queen_bed", 1.6, 2.0))
        .with_furniture(FurnitureSelection::new("nightstand", 0.4, 0.4))
        .with_life_goal(LifeGoal::Wealth);

    let result = plan(&request).unwrap();
    for layout in &result.layouts {
        let nightstand = layout.placement("nightstand_1").unwrap();
        assert_eq!(nightstand.relationship, Some(Relationship::Bedside), "{}", layout.id);
    }
}

#[test]
fn test_fallback_onto_flow_path_is_recorded() {
    // a 2.8 m sofa in a 3 m room cannot avoid the door's path
    let room = RoomSpec::new(3.0, 2.0).with_element(door(1.0, 1.9, 1.0, 0.1));
    let request = PlanRequest::new(room).with_furniture(FurnitureSelection::new("sofa", 2.8, 1.0));

    let result = plan(&request).unwrap();
    for layout in &result.layouts {
        let sofa = layout.placement("sofa_1").unwrap();
        assert_eq!(sofa.quality, Quality::Fair, "{}", layout.id);
        assert!(
            layout
                .tradeoffs_for("sofa_1")
                .any(|t| t.issue == IssueCode::BlocksEnergyFlow),
            "{}: blocking sofa not recorded",
            layout.id
        );
    }
}

#[test]
fn test_no_goal_yields_variant() {
    let request = PlanRequest::new(RoomSpec::new(4.0, 4.0))
        .with_furniture(FurnitureSelection::new("sofa", 2.0, 0.9));
    let result = plan(&request).unwrap();
    let strategies: Vec<_> = result.layouts.iter().map(|l| l.strategy).collect();
    assert_eq!(
        strategies,
        vec![
            LayoutStrategy::Optimal,
            LayoutStrategy::SpaceConscious,
            LayoutStrategy::Variant,
        ]
    );
    insta::assert_snapshot!(
        result.layouts.iter().map(|l| l.id.as_str()).collect::<Vec<_>>().join("\n"),
        @r"
    optimal_1
    space_conscious_1
    variant_1
    "
    );
}

#[test]
fn test_oversized_item_is_recorded_not_placed() {
    let request = PlanRequest::new(RoomSpec::new(3.0, 3.0))
        .with_furniture(FurnitureSelection::new("wardrobe", 4.0, 0.6))
        .with_furniture(FurnitureSelection::new("chair", 0.6, 0.6));

    let result = plan(&request).unwrap();
    for layout in &result.layouts {
        assert!(layout.placement("wardrobe_1").is_none());
        assert!(layout.placement("chair_1").is_some());
        let unplaced: Vec<_> = layout.tradeoffs_for("wardrobe_1").map(|t| t.severity).collect();
        assert_eq!(unplaced, vec![Severity::High]);
    }
}

#[test]
fn test_kua_profile_from_primary_occupant() {
    let occupant = Occupant {
        gender: Some(Gender::Male),
        birth_year: Some(1985),
        birth_month: Some(6),
        birth_day: Some(1),
        primary: true,
    };
    let request = PlanRequest::new(RoomSpec::new(4.0, 4.0).with_room_type(RoomType::Bedroom))
        .with_occupant(Occupant::default())
        .with_occupant(occupant);

    let result = plan(&request).unwrap();
    assert_eq!(result.kua.map(|k| k.number), Some(2));
}

#[test]
fn test_office_desk_and_lamp() {
    let room = RoomSpec::new(4.0, 3.5)
        .with_room_type(RoomType::Office)
        .with_element(door(0.2, 3.4, 0.9, 0.1));
    let request = PlanRequest::new(room)
        .with_furniture(FurnitureSelection::new("desk", 1.2, 0.6))
        .with_furniture(FurnitureSelection::new("desk_lamp", 0.3, 0.3));

    let result = plan(&request).unwrap();
    let optimal = &result.layouts[0];
    assert!(optimal.placement("desk_1").unwrap().in_command_position);
    let lamp = optimal.placement("desk_lamp_1").unwrap();
    assert!(lamp.relationship.is_some());
}
