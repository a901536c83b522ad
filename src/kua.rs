//! Kua numbers: personal favorable directions from birth data
//!
//! The kua number follows the solar-year convention (years start on
//! February 4th) and splits occupants into the East and West groups, each
//! with four favorable and four unfavorable compass directions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{plan_bearing, Point};
use crate::layout::Rotation;
use crate::room::Orientation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "m")]
    Male,
    #[serde(alias = "f")]
    Female,
}

/// A person living in the room
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub birth_month: Option<u32>,
    #[serde(default)]
    pub birth_day: Option<u32>,
    #[serde(default)]
    pub primary: bool,
}

impl Occupant {
    pub fn kua_number(&self) -> Option<u8> {
        number(self.gender, self.birth_year, self.birth_month, self.birth_day)
    }
}

/// The eight compass directions, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    const CLOCKWISE: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Nearest of the eight directions to a compass bearing
    pub fn from_bearing(degrees: f64) -> Direction {
        let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % 8;
        Self::CLOCKWISE[index]
    }

    /// Cardinal direction for a number of quarter turns clockwise from north
    pub fn from_quarter_turns(turns: u8) -> Direction {
        Self::CLOCKWISE[usize::from(turns % 4) * 2]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KuaGroup {
    East,
    West,
}

impl KuaGroup {
    pub fn of(number: u8) -> Option<KuaGroup> {
        match number {
            1 | 3 | 4 | 9 => Some(KuaGroup::East),
            2 | 5..=8 => Some(KuaGroup::West),
            _ => None,
        }
    }

    pub fn favorable(&self) -> [Direction; 4] {
        match self {
            KuaGroup::East => EAST_FAVORABLE,
            KuaGroup::West => WEST_FAVORABLE,
        }
    }

    pub fn unfavorable(&self) -> [Direction; 4] {
        match self {
            KuaGroup::East => WEST_FAVORABLE,
            KuaGroup::West => EAST_FAVORABLE,
        }
    }
}

const EAST_FAVORABLE: [Direction; 4] = [Direction::E, Direction::SE, Direction::S, Direction::N];
const WEST_FAVORABLE: [Direction; 4] = [Direction::W, Direction::SW, Direction::NW, Direction::NE];

/// Compute the kua number, or `None` when any input is missing or out of range
pub fn number(
    gender: Option<Gender>,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
) -> Option<u8> {
    let (gender, year, month, day) = (gender?, year?, month?, day?);
    if year <= 0 || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let solar_year = if month == 1 || (month == 2 && day < 4) {
        year - 1
    } else {
        year
    };
    let root = digital_root(solar_year.unsigned_abs());

    let kua = match gender {
        Gender::Male => match 10 - root {
            10 => 1,
            5 => 2,
            k => k,
        },
        Gender::Female => {
            let mut k = root + 5;
            if k > 9 {
                k -= 9;
            }
            if k == 5 {
                8
            } else {
                k
            }
        }
    };
    Some(kua)
}

/// Repeated digit sum down to a single digit
fn digital_root(mut n: u32) -> u8 {
    while n > 9 {
        let mut sum = 0;
        while n > 0 {
            sum += n % 10;
            n /= 10;
        }
        n = sum;
    }
    n as u8
}

/// Kua number and direction sets for the primary occupant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KuaProfile {
    pub number: u8,
    pub group: KuaGroup,
    pub favorable: [Direction; 4],
    pub unfavorable: [Direction; 4],
}

impl KuaProfile {
    pub fn from_number(number: u8) -> Option<Self> {
        let group = KuaGroup::of(number)?;
        Some(Self {
            number,
            group,
            favorable: group.favorable(),
            unfavorable: group.unfavorable(),
        })
    }

    /// Profile of the first primary occupant with complete birth data
    pub fn from_occupants(occupants: &[Occupant]) -> Option<Self> {
        let primary = occupants.iter().find(|o| o.primary)?;
        let profile = primary.kua_number().and_then(Self::from_number);
        if profile.is_none() {
            log::debug!("primary occupant has incomplete birth data; no kua profile");
        }
        profile
    }

    pub fn is_favorable(&self, direction: Direction) -> bool {
        self.favorable.contains(&direction)
    }

    pub fn is_unfavorable(&self, direction: Direction) -> bool {
        self.unfavorable.contains(&direction)
    }

    /// Rotation that turns a piece at `point` toward a favorable direction.
    ///
    /// The compass direction of the point as seen from the room center is
    /// turned by 90°, 180° and 270° until it lands on a favorable one. Only
    /// quarter turns change the footprint, so 180° collapses to upright.
    pub fn preferred_rotation(
        &self,
        point: Point,
        room_center: Point,
        orientation: Orientation,
    ) -> Rotation {
        let bearing = plan_bearing(room_center, point) + orientation.degrees();
        if self.is_favorable(Direction::from_bearing(bearing)) {
            return Rotation::Upright;
        }
        for turn in [90.0, 180.0, 270.0] {
            if self.is_favorable(Direction::from_bearing(bearing + turn)) {
                return if turn == 180.0 {
                    Rotation::Upright
                } else {
                    Rotation::Quarter
                };
            }
        }
        Rotation::Upright
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kua(gender: Gender, year: i32, month: u32, day: u32) -> Option<u8> {
        number(Some(gender), Some(year), Some(month), Some(day))
    }

    #[test]
    fn test_male_kua() {
        // 1985: 1+9+8+5 = 23 -> 5, 10 - 5 = 5 -> 2
        assert_eq!(kua(Gender::Male, 1985, 6, 1), Some(2));
        // 1990: 19 -> 10 -> 1, 10 - 1 = 9
        assert_eq!(kua(Gender::Male, 1990, 6, 1), Some(9));
        // 1998: 27 -> 9, 10 - 9 = 1
        assert_eq!(kua(Gender::Male, 1998, 6, 1), Some(1));
    }

    #[test]
    fn test_female_kua() {
        // 1990: root 1, 1 + 5 = 6
        assert_eq!(kua(Gender::Female, 1990, 6, 1), Some(6));
        // 1998: root 9, 14 - 9 = 5 -> 8
        assert_eq!(kua(Gender::Female, 1998, 6, 1), Some(8));
        // 1985: root 5, 10 - 9 = 1
        assert_eq!(kua(Gender::Female, 1985, 6, 1), Some(1));
    }

    #[test]
    fn test_solar_year_adjustment() {
        // Feb 3rd 1991 counts as 1990
        assert_eq!(kua(Gender::Male, 1991, 2, 3), kua(Gender::Male, 1990, 6, 1));
        assert_eq!(kua(Gender::Male, 1991, 1, 20), kua(Gender::Male, 1990, 6, 1));
        assert_ne!(kua(Gender::Male, 1991, 2, 4), kua(Gender::Male, 1990, 6, 1));
    }

    #[test]
    fn test_missing_data() {
        assert_eq!(number(None, Some(1990), Some(1), Some(1)), None);
        assert_eq!(number(Some(Gender::Male), None, Some(1), Some(1)), None);
        assert_eq!(number(Some(Gender::Male), Some(1990), None, Some(1)), None);
        assert_eq!(number(Some(Gender::Male), Some(1990), Some(1), None), None);
    }

    #[test]
    fn test_groups() {
        for n in [1, 3, 4, 9] {
            assert_eq!(KuaGroup::of(n), Some(KuaGroup::East));
        }
        for n in [2, 5, 6, 7, 8] {
            assert_eq!(KuaGroup::of(n), Some(KuaGroup::West));
        }
        assert_eq!(KuaGroup::of(0), None);
        assert_eq!(KuaGroup::of(10), None);
    }

    #[test]
    fn test_profile_from_first_primary() {
        let occupants = vec![
            Occupant {
                gender: Some(Gender::Female),
                birth_year: Some(1998),
                birth_month: Some(6),
                birth_day: Some(1),
                primary: false,
            },
            Occupant {
                gender: Some(Gender::Male),
                birth_year: Some(1998),
                birth_month: Some(6),
                birth_day: Some(1),
                primary: true,
            },
        ];
        let profile = KuaProfile::from_occupants(&occupants).unwrap();
        assert_eq!(profile.number, 1);
        assert_eq!(profile.group, KuaGroup::East);
        assert!(profile.is_favorable(Direction::SE));
        assert!(profile.is_unfavorable(Direction::NE));
    }

    #[test]
    fn test_no_primary_no_profile() {
        let occupants = vec![Occupant {
            gender: Some(Gender::Male),
            birth_year: Some(1990),
            birth_month: Some(3),
            birth_day: Some(1),
            primary: false,
        }];
        assert!(KuaProfile::from_occupants(&occupants).is_none());
        assert!(KuaProfile::from_occupants(&[]).is_none());
    }

    #[test]
    fn test_direction_from_bearing() {
        assert_eq!(Direction::from_bearing(0.0), Direction::N);
        assert_eq!(Direction::from_bearing(350.0), Direction::N);
        assert_eq!(Direction::from_bearing(100.0), Direction::E);
        assert_eq!(Direction::from_bearing(-45.0), Direction::NW);
        assert_eq!(Direction::from_quarter_turns(3), Direction::W);
    }

    #[test]
    fn test_preferred_rotation() {
        let east = KuaProfile::from_number(1).unwrap();
        let west = KuaProfile::from_number(2).unwrap();
        let center = Point::new(2.0, 2.0);
        let south_side = Point::new(2.0, 3.5);
        // south is favorable for the east group
        assert_eq!(
            east.preferred_rotation(south_side, center, Orientation::N),
            Rotation::Upright
        );
        // for the west group, a quarter turn reaches west
        assert_eq!(
            west.preferred_rotation(south_side, center, Orientation::N),
            Rotation::Quarter
        );
        // northwest corner faces NW, already favorable for the west group
        assert_eq!(
            west.preferred_rotation(Point::new(0.5, 0.5), center, Orientation::N),
            Rotation::Upright
        );
    }
}
