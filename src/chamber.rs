//! # Chamber
//!
//! Room entity with a randomized shape, a content category, and a door per
//! exit. A chamber is fully built at construction through the randomization
//! procedure; afterwards it only changes through the add/remove monster and
//! treasure mutators.

use crate::dice::Roller;
use crate::dungeon::DoorId;
use crate::tables::{
    chamber_shape_for, contents_for, monster_for, stairs_for, trap_for, ChamberShape, ContentKind,
    Monster, Stairs, Trap, Treasure,
};
use crate::{config, DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A dungeon room.
///
/// The primary monster slot is part of fresh generation and is distinct
/// from the mutable monster list; the content category decides which of the
/// always-generated monster/trap/stairs records ever appear in the
/// description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamber {
    shape: ChamberShape,
    contents: ContentKind,
    monster: Monster,
    trap: Trap,
    stairs: Stairs,
    monsters: Vec<Monster>,
    treasures: Vec<Treasure>,
    doors: Vec<DoorId>,
}

impl Chamber {
    /// Generates a chamber from the content tables.
    ///
    /// Roll order:
    /// 1. Shape: pairs of d20s (shape roll, exit sub-roll) until the result
    ///    is square or rectangle with 2..=4 exits. Rejection sampling with
    ///    no attempt bound; the tables guarantee eventual termination.
    /// 2. Contents: d20s until the reserved roll 15 comes up, then resolve
    ///    from that value. Every generated chamber therefore lands on the
    ///    same category; this reproduces the system being modeled and must
    ///    not be "fixed" here.
    /// 3. One d20 consumed for treasure; the treasure is kept only when the
    ///    category includes treasure (kind and container from the same roll).
    /// 4. Primary monster from the percentile composite.
    /// 5. Trap and stairs from one d20 each, regardless of category.
    ///
    /// Doors are not created here; [`crate::Dungeon::spawn_chamber`] creates
    /// and registers one door per exit.
    pub fn generate(roller: &mut dyn Roller) -> Self {
        let mut shape = chamber_shape_for(roller.d20(), roller.d20());
        while !Self::shape_acceptable(&shape) {
            shape = chamber_shape_for(roller.d20(), roller.d20());
        }

        let mut roll = roller.d20();
        while roll != config::RESERVED_CONTENT_ROLL {
            roll = roller.d20();
        }
        let contents = contents_for(roll);

        let treasure_roll = roller.d20();
        let mut treasures = Vec::new();
        if contents.includes_treasure() {
            treasures.push(Treasure::from_roll(treasure_roll));
        }

        let monster = monster_for(roller.percentile());
        let trap = trap_for(roller.d20());
        let stairs = stairs_for(roller.d20());

        Self {
            shape,
            contents,
            monster,
            trap,
            stairs,
            monsters: Vec::new(),
            treasures,
            doors: Vec::new(),
        }
    }

    fn shape_acceptable(shape: &ChamberShape) -> bool {
        shape.is_rectangular()
            && (config::MIN_CHAMBER_EXITS..=config::MAX_CHAMBER_EXITS).contains(&shape.exits())
    }

    /// The chamber's shape descriptor.
    pub fn shape(&self) -> &ChamberShape {
        &self.shape
    }

    /// The chamber's content category.
    pub fn contents(&self) -> ContentKind {
        self.contents
    }

    /// The primary monster slot filled at generation time.
    pub fn primary_monster(&self) -> &Monster {
        &self.monster
    }

    /// The trap resolved at generation time.
    pub fn trap(&self) -> &Trap {
        &self.trap
    }

    /// The stairs resolved at generation time.
    pub fn stairs(&self) -> &Stairs {
        &self.stairs
    }

    /// Length of the chamber in feet.
    ///
    /// # Errors
    ///
    /// Propagates [`DelveError::DimensionlessShape`] for irregular shapes.
    pub fn length(&self) -> DelveResult<u32> {
        self.shape.length()
    }

    /// Width of the chamber in feet.
    ///
    /// # Errors
    ///
    /// Propagates [`DelveError::DimensionlessShape`] for irregular shapes.
    pub fn width(&self) -> DelveResult<u32> {
        self.shape.width()
    }

    /// Registers a door with this chamber. The space side of the
    /// door-to-space relation; the dungeon keeps both sides consistent.
    pub fn register_door(&mut self, door: DoorId) {
        self.doors.push(door);
    }

    /// The doors attached to this chamber, in registration order.
    pub fn doors(&self) -> &[DoorId] {
        &self.doors
    }

    /// Number of doors attached to this chamber.
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// Adds a monster to the chamber.
    pub fn add_monster(&mut self, monster: Monster) {
        self.monsters.push(monster);
    }

    /// Removes the monster at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::IndexOutOfRange`] for invalid indices.
    pub fn remove_monster(&mut self, index: usize) -> DelveResult<Monster> {
        if index < self.monsters.len() {
            Ok(self.monsters.remove(index))
        } else {
            Err(DelveError::IndexOutOfRange {
                index,
                len: self.monsters.len(),
            })
        }
    }

    /// The monsters in the chamber.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Adds a treasure to the chamber.
    pub fn add_treasure(&mut self, treasure: Treasure) {
        self.treasures.push(treasure);
    }

    /// Removes the treasure at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::IndexOutOfRange`] for invalid indices.
    pub fn remove_treasure(&mut self, index: usize) -> DelveResult<Treasure> {
        if index < self.treasures.len() {
            Ok(self.treasures.remove(index))
        } else {
            Err(DelveError::IndexOutOfRange {
                index,
                len: self.treasures.len(),
            })
        }
    }

    /// The treasures in the chamber.
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    /// Builds the chamber description. Recomputed on every call: shape and
    /// area, dimensions (with a fallback line for dimensionless shapes),
    /// exit count, then trap/monster/stairs/treasure lines gated by the
    /// content category.
    pub fn description(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(
            text,
            "The chamber is {} shape and is {} square ft.",
            self.shape.kind(),
            self.shape.area()
        );
        match (self.shape.length(), self.shape.width()) {
            (Ok(length), Ok(width)) => {
                let _ = writeln!(
                    text,
                    "The chamber has a length of {} and a width of {}.",
                    length, width
                );
            }
            _ => {
                let _ = writeln!(text, "The chamber has no length and width.");
            }
        }
        let _ = writeln!(
            text,
            "The number of exits (doors) is/are {}.",
            self.shape.exits()
        );
        if self.contents == ContentKind::Trap {
            let _ = writeln!(text, "The trap is {}.", self.trap.description());
        }
        if self.contents.includes_monsters() {
            for monster in &self.monsters {
                let _ = writeln!(
                    text,
                    "The monsters are {} to {} {}.",
                    monster.min(),
                    monster.max(),
                    monster.kind()
                );
            }
        }
        if self.contents == ContentKind::Stairs {
            let _ = writeln!(text, "The stairs go {}.", self.stairs.description());
        }
        if self.contents.includes_treasure() {
            for treasure in &self.treasures {
                let _ = writeln!(
                    text,
                    "The treasure is {} contained inside {}.",
                    treasure.description(),
                    treasure.container()
                );
                match treasure.protection() {
                    Ok(guard) => {
                        let _ = writeln!(text, "The treasure is guarded by {}.", guard);
                    }
                    Err(_) => {
                        let _ = writeln!(text, "The treasure is not guarded.");
                    }
                }
            }
        }
        text
    }
}
