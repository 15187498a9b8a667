//! # Content Tables
//!
//! Pure roll-to-record lookups and the records they produce.
//!
//! No randomness lives in this module: every function is a deterministic
//! mapping from roll ranges to fixed records, and callers supply the rolls.
//! That keeps the rejection-sampling loops in chamber generation trivially
//! testable with a scripted roller.

use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical form of a chamber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Equal-sided rectilinear chamber
    Square,
    /// Rectilinear chamber with distinct length and width
    Rectangle,
    /// Circular chamber, no rectilinear dimensions
    Circular,
    /// Oval chamber, no rectilinear dimensions
    Oval,
    /// Triangular chamber, no rectilinear dimensions
    Triangular,
    /// Irregular cave-like chamber, no rectilinear dimensions
    Unusual,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Square => "square",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circular => "circular",
            ShapeKind::Oval => "oval",
            ShapeKind::Triangular => "triangular",
            ShapeKind::Unusual => "unusual",
        };
        write!(f, "{}", name)
    }
}

/// Shape descriptor resolved from the chamber shape table.
///
/// Only square and rectangle shapes carry a length and width; the other
/// kinds have an area but no rectilinear dimensions, and asking for them
/// fails with [`DelveError::DimensionlessShape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamberShape {
    kind: ShapeKind,
    area: u32,
    exits: u32,
    dims: Option<(u32, u32)>,
}

impl ChamberShape {
    /// The shape kind.
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Floor area in square feet.
    pub fn area(&self) -> u32 {
        self.area
    }

    /// Number of exits this chamber has.
    pub fn exits(&self) -> u32 {
        self.exits
    }

    /// Whether the shape carries a length and width.
    pub fn is_rectangular(&self) -> bool {
        matches!(self.kind, ShapeKind::Square | ShapeKind::Rectangle)
    }

    /// Length in feet.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::DimensionlessShape`] for non-rectilinear kinds.
    pub fn length(&self) -> DelveResult<u32> {
        self.dims
            .map(|(length, _)| length)
            .ok_or(DelveError::DimensionlessShape(self.kind))
    }

    /// Width in feet.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::DimensionlessShape`] for non-rectilinear kinds.
    pub fn width(&self) -> DelveResult<u32> {
        self.dims
            .map(|(_, width)| width)
            .ok_or(DelveError::DimensionlessShape(self.kind))
    }
}

/// The enumerated kind of contents a chamber holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// Nothing of note
    Empty,
    /// One or more monsters, no treasure
    MonsterOnly,
    /// Monsters guarding treasure
    MonsterAndTreasure,
    /// A stairway
    Stairs,
    /// A trap
    Trap,
    /// Unguarded treasure
    Treasure,
}

impl ContentKind {
    /// Whether this category includes monsters in the chamber description.
    pub fn includes_monsters(&self) -> bool {
        matches!(self, ContentKind::MonsterOnly | ContentKind::MonsterAndTreasure)
    }

    /// Whether this category includes treasure in the chamber description.
    pub fn includes_treasure(&self) -> bool {
        matches!(self, ContentKind::Treasure | ContentKind::MonsterAndTreasure)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Empty => "empty",
            ContentKind::MonsterOnly => "monster only",
            ContentKind::MonsterAndTreasure => "monster and treasure",
            ContentKind::Stairs => "stairs",
            ContentKind::Trap => "trap",
            ContentKind::Treasure => "treasure",
        };
        write!(f, "{}", name)
    }
}

/// A monster kind with its population range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    kind: String,
    min: u32,
    max: u32,
}

impl Monster {
    /// Descriptive name of the monster kind.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Minimum number appearing.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Maximum number appearing.
    pub fn max(&self) -> u32 {
        self.max
    }
}

/// Treasure with its container and an optional guardian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    description: String,
    container: String,
    protection: Option<String>,
}

impl Treasure {
    /// Builds treasure from one roll: kind and container both derive from it.
    pub fn from_roll(roll: u32) -> Self {
        Self {
            description: treasure_for(roll),
            container: container_for(roll),
            protection: None,
        }
    }

    /// What the treasure is.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// What the treasure is held in.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Assigns a guardian from the guardian table.
    pub fn set_protection(&mut self, roll: u32) {
        self.protection = Some(guardian_for(roll));
    }

    /// The guardian watching over this treasure.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::NotProtected`] when no guardian was assigned.
    pub fn protection(&self) -> DelveResult<&str> {
        self.protection.as_deref().ok_or(DelveError::NotProtected)
    }
}

/// A trap resolved from the trap table.
///
/// There is no "absent" trap; a default-constructed record is blank and
/// owners gate its visibility with their own flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    description: String,
}

impl Trap {
    /// What the trap does.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// A stairway resolved from the stairs table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stairs {
    description: String,
}

impl Stairs {
    /// Where the stairs lead.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Resolves a chamber shape from a d20 roll plus a d20 exit sub-roll.
///
/// # Examples
///
/// ```
/// use delve::{chamber_shape_for, ShapeKind};
///
/// let shape = chamber_shape_for(1, 10);
/// assert_eq!(shape.kind(), ShapeKind::Square);
/// assert_eq!(shape.area(), 100);
/// assert_eq!(shape.length().unwrap(), 10);
/// ```
pub fn chamber_shape_for(roll: u32, exit_roll: u32) -> ChamberShape {
    let (kind, area, dims) = match roll {
        1..=2 => (ShapeKind::Square, 100, Some((10, 10))),
        3..=4 => (ShapeKind::Square, 400, Some((20, 20))),
        5..=6 => (ShapeKind::Square, 900, Some((30, 30))),
        7..=8 => (ShapeKind::Square, 1600, Some((40, 40))),
        9..=10 => (ShapeKind::Rectangle, 200, Some((10, 20))),
        11..=12 => (ShapeKind::Rectangle, 600, Some((20, 30))),
        13..=14 => (ShapeKind::Rectangle, 1200, Some((30, 40))),
        15 => (ShapeKind::Rectangle, 2000, Some((40, 50))),
        16 => (ShapeKind::Rectangle, 4000, Some((50, 80))),
        17 => (ShapeKind::Circular, 900, None),
        18 => (ShapeKind::Oval, 750, None),
        19 => (ShapeKind::Triangular, 600, None),
        _ => (ShapeKind::Unusual, 1000, None),
    };
    ChamberShape {
        kind,
        area,
        exits: exit_count_for(area, exit_roll),
        dims,
    }
}

/// Exit count sub-table, banded by chamber area.
fn exit_count_for(area: u32, roll: u32) -> u32 {
    if area <= 600 {
        match roll {
            1..=5 => 1,
            6..=10 => 2,
            11..=15 => 3,
            16..=18 => 4,
            _ => 5,
        }
    } else {
        match roll {
            1..=3 => 1,
            4..=8 => 2,
            9..=13 => 3,
            14..=18 => 4,
            _ => 6,
        }
    }
}

/// Resolves a chamber content category from a d20 roll.
///
/// # Examples
///
/// ```
/// use delve::{contents_for, ContentKind};
///
/// assert_eq!(contents_for(15), ContentKind::MonsterAndTreasure);
/// assert_eq!(contents_for(20), ContentKind::Treasure);
/// ```
pub fn contents_for(roll: u32) -> ContentKind {
    match roll {
        1..=12 => ContentKind::Empty,
        13..=14 => ContentKind::MonsterOnly,
        15..=17 => ContentKind::MonsterAndTreasure,
        18 => ContentKind::Stairs,
        19 => ContentKind::Trap,
        _ => ContentKind::Treasure,
    }
}

/// Resolves a monster from a 1..=100 roll.
pub fn monster_for(roll: u32) -> Monster {
    let (kind, min, max) = match roll {
        1..=10 => ("giant rats", 5, 40),
        11..=18 => ("kobolds", 6, 18),
        19..=26 => ("goblins", 4, 16),
        27..=33 => ("giant centipedes", 2, 8),
        34..=41 => ("orcs", 7, 12),
        42..=48 => ("skeletons", 3, 10),
        49..=55 => ("stirges", 3, 12),
        56..=62 => ("zombies", 2, 8),
        63..=69 => ("bandits", 5, 15),
        70..=76 => ("hobgoblins", 2, 8),
        77..=82 => ("giant spiders", 1, 4),
        83..=88 => ("ghouls", 1, 6),
        89..=94 => ("gnolls", 2, 8),
        95..=98 => ("ogres", 1, 2),
        _ => ("young dragons", 1, 1),
    };
    Monster {
        kind: kind.to_string(),
        min,
        max,
    }
}

/// Resolves a treasure kind from a roll.
pub fn treasure_for(roll: u32) -> String {
    let kind = match roll {
        1..=25 => "1000 copper pieces",
        26..=50 => "1000 silver pieces",
        51..=65 => "750 electrum pieces",
        66..=80 => "250 gold pieces",
        81..=90 => "100 platinum pieces",
        91..=94 => "gems",
        95..=97 => "jewellery",
        _ => "a magic item",
    };
    kind.to_string()
}

/// Resolves a treasure container from a roll.
pub fn container_for(roll: u32) -> String {
    let container = match roll {
        1..=4 => "bags",
        5..=8 => "sacks",
        9..=12 => "a small coffer",
        13..=16 => "a chest",
        _ => "a huge chest",
    };
    container.to_string()
}

/// Resolves a trap from a d20 roll.
pub fn trap_for(roll: u32) -> Trap {
    let description = match roll {
        1..=2 => "collapsing ceiling",
        3..=4 => "pit, 10 ft. deep",
        5..=6 => "poison needle",
        7..=8 => "arrow trap",
        9..=10 => "spring blade",
        11..=12 => "sleeping gas",
        13..=14 => "falling block",
        15..=16 => "flooding room",
        17..=18 => "spiked pit",
        _ => "teleporter",
    };
    Trap {
        description: description.to_string(),
    }
}

/// Resolves a stairway from a d20 roll.
pub fn stairs_for(roll: u32) -> Stairs {
    let description = match roll {
        1..=5 => "down one level",
        6..=7 => "down two levels",
        8 => "down three levels",
        9..=10 => "up one level",
        11 => "up to a dead end",
        12 => "down to a dead end",
        13..=14 => "up a chimney one level",
        15..=16 => "down a chimney one level",
        17..=18 => "through a trap door, down one level",
        _ => "up one level then down two levels",
    };
    Stairs {
        description: description.to_string(),
    }
}

/// Resolves a treasure guardian from a d20 roll.
pub fn guardian_for(roll: u32) -> String {
    let guardian = match roll {
        1..=2 => "contact poison on the container",
        3..=4 => "a poison needle in the lock",
        5..=6 => "a guardian skeleton",
        7..=8 => "an animated statue",
        9..=10 => "a gelatinous cube",
        11..=12 => "a giant snake",
        13..=14 => "a glyph of warding",
        15..=16 => "a chained guard beast",
        17..=18 => "a watchful spirit",
        _ => "a stone golem",
    };
    guardian.to_string()
}
