//! # Passage
//!
//! Corridors: a [`Passage`] is an ordered chain of 10 ft [`PassageSection`]s
//! plus the two boundary doors of the corridor, with monster and treasure
//! lists that are only ever populated by post-generation edits.
//!
//! Door registration on a passage targets the *last* section in the chain,
//! so sections must be appended before the doors meant for them arrive.

use crate::dice::Roller;
use crate::door::Door;
use crate::dungeon::{DoorId, Dungeon};
use crate::tables::{monster_for, Monster, Treasure};
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One 10 ft section of passageway with a table-driven feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageSection {
    description: String,
    monster: Option<Monster>,
    door: Option<DoorId>,
}

impl PassageSection {
    /// Generates a section from the passage feature table.
    ///
    /// `forced` pins the table roll (the generator lays fixed straight
    /// sections this way); `None` consumes a d20 from the roller. Rolls of
    /// 3..=5 and 14..=16 allocate a door in the dungeon arena, 14..=16
    /// forcing it to an archway. A roll of 20 generates a wandering monster
    /// instead of a feature line.
    pub fn generate(
        forced: Option<u32>,
        roller: &mut dyn Roller,
        dungeon: &mut Dungeon,
    ) -> Self {
        let roll = match forced {
            Some(value) => value,
            None => roller.d20(),
        };
        let mut section = Self {
            description: String::new(),
            monster: None,
            door: None,
        };
        match roll {
            1..=2 => section.description = "Passage goes straight for 10 ft.".to_string(),
            3..=5 => {
                section.description = "Passage ends in Door to a Chamber.".to_string();
                section.door = Some(dungeon.insert_door(Door::generate(roller)));
            }
            6..=7 => {
                section.description =
                    "Archway (door) to right (main passage continues straight for 10 ft)."
                        .to_string();
            }
            8..=9 => {
                section.description =
                    "Archway (door) to the left (main passage continues straight for 10 ft)."
                        .to_string();
            }
            10..=11 => {
                section.description =
                    "Passage turns to the left and continues for 10 ft.".to_string();
            }
            12..=13 => {
                section.description =
                    "Passage turns to the right and continues for 10 ft.".to_string();
            }
            14..=16 => {
                section.description = "Passage ends in archway (door) to chamber.".to_string();
                let mut door = Door::generate(roller);
                door.set_archway(true, roller);
                section.door = Some(dungeon.insert_door(door));
            }
            17 => {
                section.description =
                    "Stairs (passage continues straight for 10 ft).".to_string();
            }
            18..=19 => section.description = "Dead End.".to_string(),
            _ => {
                let monster = monster_for(roller.percentile());
                section.set_monster(monster);
            }
        }
        section
    }

    /// Places a wandering monster in this section and rewrites the
    /// description to the composed monster line.
    pub fn set_monster(&mut self, monster: Monster) {
        self.description = format!(
            "Wandering Monster (passage continues straight for 10 ft).\nThe monsters are {} to {} {}.",
            monster.min(),
            monster.max(),
            monster.kind()
        );
        self.monster = Some(monster);
    }

    /// Whether a wandering monster occupies this section.
    pub fn has_monster(&self) -> bool {
        self.monster.is_some()
    }

    /// The wandering monster, if present.
    pub fn monster(&self) -> Option<&Monster> {
        self.monster.as_ref()
    }

    /// Sets the door occupying this section, replacing any previous one.
    pub fn set_door(&mut self, door: DoorId) {
        self.door = Some(door);
    }

    /// The door in this section, if any.
    pub fn door(&self) -> Option<DoorId> {
        self.door
    }

    /// The section's feature line.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An ordered chain of passage sections between two boundary doors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    sections: Vec<PassageSection>,
    bounds: Vec<DoorId>,
    monsters: Vec<Monster>,
    treasures: Vec<Treasure>,
}

impl Passage {
    /// Creates an empty passage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section to the end of the chain.
    pub fn add_section(&mut self, section: PassageSection) {
        self.sections.push(section);
    }

    /// The ordered sections of this passage.
    pub fn sections(&self) -> &[PassageSection] {
        &self.sections
    }

    /// Registers a door with this passage by attaching it to the current
    /// last section, overwriting whatever door was there.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::InvalidState`] when the passage has no
    /// sections yet.
    pub fn register_door(&mut self, door: DoorId) -> DelveResult<()> {
        match self.sections.last_mut() {
            Some(section) => {
                section.set_door(door);
                Ok(())
            }
            None => Err(DelveError::InvalidState(
                "cannot register a door on a passage with no sections".to_string(),
            )),
        }
    }

    /// Records a boundary door of the corridor.
    pub fn add_boundary_door(&mut self, door: DoorId) {
        self.bounds.push(door);
    }

    /// The boundary doors of the corridor.
    pub fn boundary_doors(&self) -> &[DoorId] {
        &self.bounds
    }

    /// Number of boundary doors.
    pub fn door_count(&self) -> usize {
        self.bounds.len()
    }

    /// Adds a monster to the passage.
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

    /// The monsters added to this passage.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Adds a treasure to the passage.
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

    /// The treasures added to this passage.
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    /// Builds the passage description: every section line in order, then
    /// treasure lines, then monster lines. Recomputed on every call.
    pub fn description(&self) -> String {
        let mut text = String::new();
        for section in &self.sections {
            let _ = writeln!(text, "{}", section.description());
        }
        for treasure in &self.treasures {
            let _ = writeln!(
                text,
                "The treasure is {} contained inside {}.",
                treasure.description(),
                treasure.container()
            );
        }
        for monster in &self.monsters {
            let _ = writeln!(
                text,
                "The monsters are {} to {} {}.",
                monster.min(),
                monster.max(),
                monster.kind()
            );
        }
        text
    }
}
