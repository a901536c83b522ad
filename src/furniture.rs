//! Furniture selections and the instances the placer works on

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::{PlannerConfig, PlannerError};

/// What a piece of furniture is, resolved once from its catalog id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    Bed,
    Desk,
    Bookcase,
    Dresser,
    Wardrobe,
    Cabinet,
    Sofa,
    Chair,
    Table,
    SideTable,
    Nightstand,
    Lamp,
    Plant,
    WaterFeature,
    Other,
}

/// Catalog-id fragments checked in order; the first hit wins
const KIND_KEYWORDS: &[(&str, FurnitureKind)] = &[
    ("nightstand", FurnitureKind::Nightstand),
    ("night_stand", FurnitureKind::Nightstand),
    ("bedside", FurnitureKind::Nightstand),
    ("lamp", FurnitureKind::Lamp),
    ("light", FurnitureKind::Lamp),
    ("sofa", FurnitureKind::Sofa),
    ("couch", FurnitureKind::Sofa),
    ("bed", FurnitureKind::Bed),
    ("desk", FurnitureKind::Desk),
    ("bookcase", FurnitureKind::Bookcase),
    ("bookshelf", FurnitureKind::Bookcase),
    ("shelf", FurnitureKind::Bookcase),
    ("dresser", FurnitureKind::Dresser),
    ("chest", FurnitureKind::Dresser),
    ("wardrobe", FurnitureKind::Wardrobe),
    ("armoire", FurnitureKind::Wardrobe),
    ("closet", FurnitureKind::Wardrobe),
    ("cabinet", FurnitureKind::Cabinet),
    ("side_table", FurnitureKind::SideTable),
    ("end_table", FurnitureKind::SideTable),
    ("sidetable", FurnitureKind::SideTable),
    ("table", FurnitureKind::Table),
    ("chair", FurnitureKind::Chair),
    ("plant", FurnitureKind::Plant),
    ("fountain", FurnitureKind::WaterFeature),
    ("aquarium", FurnitureKind::WaterFeature),
    ("water", FurnitureKind::WaterFeature),
];

impl FurnitureKind {
    /// Resolve a kind from a catalog id such as `queen_bed` or `floor-lamp`
    pub fn from_catalog_id(catalog_id: &str) -> FurnitureKind {
        let id = catalog_id.to_lowercase().replace(['-', ' '], "_");
        KIND_KEYWORDS
            .iter()
            .find(|(keyword, _)| id.contains(keyword))
            .map(|(_, kind)| *kind)
            .unwrap_or(FurnitureKind::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FurnitureKind::Bed => "bed",
            FurnitureKind::Desk => "desk",
            FurnitureKind::Bookcase => "bookcase",
            FurnitureKind::Dresser => "dresser",
            FurnitureKind::Wardrobe => "wardrobe",
            FurnitureKind::Cabinet => "cabinet",
            FurnitureKind::Sofa => "sofa",
            FurnitureKind::Chair => "chair",
            FurnitureKind::Table => "table",
            FurnitureKind::SideTable => "side_table",
            FurnitureKind::Nightstand => "nightstand",
            FurnitureKind::Lamp => "lamp",
            FurnitureKind::Plant => "plant",
            FurnitureKind::WaterFeature => "water_feature",
            FurnitureKind::Other => "other",
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement category; items are placed in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureCategory {
    Command,
    Wall,
    Large,
    Small,
}

impl FurnitureCategory {
    fn of(kind: FurnitureKind, area: f64, small_item_area: f64) -> FurnitureCategory {
        match kind {
            FurnitureKind::Bed | FurnitureKind::Desk => FurnitureCategory::Command,
            FurnitureKind::Bookcase
            | FurnitureKind::Dresser
            | FurnitureKind::Wardrobe
            | FurnitureKind::Cabinet => FurnitureCategory::Wall,
            _ if area < small_item_area => FurnitureCategory::Small,
            _ => FurnitureCategory::Large,
        }
    }
}

/// One line of the shopping list
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureSelection {
    pub catalog_id: String,
    pub quantity: u32,
    pub width: f64,
    pub height: f64,
    pub name: Option<String>,
    /// Overrides the kind derived from the catalog id
    pub role: Option<FurnitureKind>,
}

impl FurnitureSelection {
    pub fn new(catalog_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            quantity: 1,
            width,
            height,
            name: None,
            role: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: FurnitureKind) -> Self {
        self.role = Some(role);
        self
    }
}

/// A single piece of furniture to place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FurnitureItem {
    pub id: String,
    pub catalog_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub kind: FurnitureKind,
    pub category: FurnitureCategory,
}

impl FurnitureItem {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Footprint for a rotation
    pub fn footprint(&self, quarter_turn: bool) -> (f64, f64) {
        if quarter_turn {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Expand selections into individual items, `quantity` instances each.
///
/// Instance ids are `{catalog_id}_{n}` with `n` counting from 1.
pub fn expand(
    selections: &[FurnitureSelection],
    config: &PlannerConfig,
) -> Result<Vec<FurnitureItem>, PlannerError> {
    let mut items = Vec::new();
    for selection in selections {
        let (w, h) = (selection.width, selection.height);
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(PlannerError::invalid_furniture(
                &selection.catalog_id,
                format!("dimensions must be positive, got {w} x {h}"),
            ));
        }

        let kind = selection
            .role
            .unwrap_or_else(|| FurnitureKind::from_catalog_id(&selection.catalog_id));
        let category = FurnitureCategory::of(kind, w * h, config.small_item_area);
        let name = selection
            .name
            .clone()
            .unwrap_or_else(|| title_case(&selection.catalog_id));

        for n in 1..=selection.quantity {
            items.push(FurnitureItem {
                id: format!("{}_{}", selection.catalog_id, n),
                catalog_id: selection.catalog_id.clone(),
                name: name.clone(),
                width: w,
                height: h,
                kind,
                category,
            });
        }
    }
    Ok(items)
}

fn title_case(id: &str) -> String {
    id.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
