//! Energy-flow model: entry points, paths to the room center, and the issues they reveal

use serde::Serialize;

use super::{ElementKind, RoomElement, Severity};
use crate::geometry::{point_segment_distance, steps_in, Point};

/// Doors closer than this on either axis face each other
const DOOR_ALIGNMENT_TOLERANCE: f64 = 0.5;
/// Paths closer than this to a room corner pick up its cutting energy
const SHARP_CORNER_DISTANCE: f64 = 0.5;
/// Points farther than this from every path are stagnant
const STAGNANT_DISTANCE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Door,
    Window,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStrength {
    Moderate,
    Strong,
}

impl FlowStrength {
    /// Relative weight used when sampling flow intensity
    pub fn weight(&self) -> f64 {
        match self {
            FlowStrength::Strong => 2.0,
            FlowStrength::Moderate => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyEntryPoint {
    pub source: EntrySource,
    pub point: Point,
    pub strength: FlowStrength,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyFlowPath {
    pub start: Point,
    pub end: Point,
    pub strength: FlowStrength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyIssueKind {
    DoorAlignment,
    SharpCorner,
    StagnantEnergy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyIssue {
    pub kind: EnergyIssueKind,
    pub location: Point,
    pub severity: Severity,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnergyFlow {
    pub entry_points: Vec<EnergyEntryPoint>,
    pub paths: Vec<EnergyFlowPath>,
    pub issues: Vec<EnergyIssue>,
}

impl EnergyFlow {
    /// Sum of path strengths, each damped by the distance to the path
    pub fn intensity_at(&self, point: Point) -> f64 {
        self.paths
            .iter()
            .map(|p| p.strength.weight() / (1.0 + point_segment_distance(point, p.start, p.end)))
            .sum()
    }

    /// Issues of one kind
    pub fn issues_of(&self, kind: EnergyIssueKind) -> impl Iterator<Item = &EnergyIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }
}

/// Build the flow model for a room
pub fn analyze(elements: &[RoomElement], width: f64, length: f64) -> EnergyFlow {
    let mut entry_points: Vec<EnergyEntryPoint> = elements
        .iter()
        .filter(|e| e.kind == ElementKind::Door)
        .map(|e| EnergyEntryPoint {
            source: EntrySource::Door,
            point: e.rect.center(),
            strength: FlowStrength::Strong,
        })
        .collect();
    entry_points.extend(
        elements
            .iter()
            .filter(|e| e.kind == ElementKind::Window)
            .map(|e| EnergyEntryPoint {
                source: EntrySource::Window,
                point: e.rect.center(),
                strength: FlowStrength::Moderate,
            }),
    );

    if entry_points.is_empty() {
        return EnergyFlow::default();
    }

    let center = Point::new(width / 2.0, length / 2.0);
    let paths: Vec<EnergyFlowPath> = entry_points
        .iter()
        .map(|ep| EnergyFlowPath {
            start: ep.point,
            end: center,
            strength: ep.strength,
        })
        .collect();

    let mut issues = Vec::new();
    door_alignment_issues(&entry_points, &mut issues);
    sharp_corner_issues(&paths, width, length, &mut issues);
    stagnant_issues(&paths, width, length, &mut issues);

    EnergyFlow {
        entry_points,
        paths,
        issues,
    }
}

fn door_alignment_issues(entry_points: &[EnergyEntryPoint], issues: &mut Vec<EnergyIssue>) {
    let doors: Vec<Point> = entry_points
        .iter()
        .filter(|ep| ep.source == EntrySource::Door)
        .map(|ep| ep.point)
        .collect();

    for (i, a) in doors.iter().enumerate() {
        for b in &doors[i + 1..] {
            let aligned = (a.x - b.x).abs() < DOOR_ALIGNMENT_TOLERANCE
                || (a.y - b.y).abs() < DOOR_ALIGNMENT_TOLERANCE;
            if aligned {
                issues.push(EnergyIssue {
                    kind: EnergyIssueKind::DoorAlignment,
                    location: a.midpoint(*b),
                    severity: Severity::High,
                    description: "Doors are directly aligned, creating too rapid energy flow"
                        .to_string(),
                });
            }
        }
    }
}

fn sharp_corner_issues(
    paths: &[EnergyFlowPath],
    width: f64,
    length: f64,
    issues: &mut Vec<EnergyIssue>,
) {
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(0.0, length),
        Point::new(width, length),
    ];
    for path in paths {
        for corner in corners {
            if point_segment_distance(corner, path.start, path.end) < SHARP_CORNER_DISTANCE {
                issues.push(EnergyIssue {
                    kind: EnergyIssueKind::SharpCorner,
                    location: corner,
                    severity: Severity::Medium,
                    description: "Energy flow passes near a sharp corner".to_string(),
                });
            }
        }
    }
}

fn stagnant_issues(paths: &[EnergyFlowPath], width: f64, length: f64, issues: &mut Vec<EnergyIssue>) {
    let step = width.min(length) / 10.0;
    let columns = steps_in(width, step);
    let rows = steps_in(length, step);

    for i in 0..=columns {
        for j in 0..=rows {
            let point = Point::new((i as f64 * step).min(width), (j as f64 * step).min(length));
            let nearest = paths
                .iter()
                .map(|p| point_segment_distance(point, p.start, p.end))
                .fold(f64::INFINITY, f64::min);
            if nearest > STAGNANT_DISTANCE {
                issues.push(EnergyIssue {
                    kind: EnergyIssueKind::StagnantEnergy,
                    location: point,
                    severity: Severity::Low,
                    description: "Area may have stagnant energy (far from flow paths)".to_string(),
                });
            }
        }
    }
}
