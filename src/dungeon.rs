//! # Dungeon
//!
//! Arena ownership for every generated entity and the door-to-space
//! relation.
//!
//! Chambers, passages, and doors all live in flat collections here and
//! reference each other through stable index handles, so the bidirectional
//! "door joins space / space holds door" relation never turns into an
//! ownership cycle. Both sides of the relation are updated inside one
//! registration call.

use crate::chamber::Chamber;
use crate::dice::Roller;
use crate::door::Door;
use crate::passage::Passage;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// Stable handle to a chamber in the dungeon arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChamberId(usize);

impl ChamberId {
    /// Position of the chamber in the dungeon's chamber collection.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable handle to a passage in the dungeon arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassageId(usize);

impl PassageId {
    /// Position of the passage in the dungeon's passage collection.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Stable handle to a door in the dungeon arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorId(usize);

impl DoorId {
    /// Position of the door in the dungeon's door collection.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A space a door can join: either a chamber or a passage.
///
/// The two variants share the space capability — produce a description and
/// accept a door registration — dispatched by a variant switch on the
/// dungeon rather than dynamic inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceId {
    /// A chamber in the dungeon arena
    Chamber(ChamberId),
    /// A passage in the dungeon arena
    Passage(PassageId),
}

/// Owner of all chambers, passages, and doors in one generated dungeon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dungeon {
    chambers: Vec<Chamber>,
    passages: Vec<Passage>,
    doors: Vec<Door>,
}

impl Dungeon {
    /// Creates an empty dungeon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a chamber and its exit doors.
    ///
    /// The chamber self-randomizes per the content tables, then one door is
    /// generated per exit and registered through [`Dungeon::attach_door`],
    /// so the chamber's door count always equals its exit count.
    pub fn spawn_chamber(&mut self, roller: &mut dyn Roller) -> DelveResult<ChamberId> {
        let chamber = Chamber::generate(roller);
        let exits = chamber.shape().exits();
        let id = ChamberId(self.chambers.len());
        self.chambers.push(chamber);
        for _ in 0..exits {
            let door = self.insert_door(Door::generate(roller));
            self.attach_door(door, SpaceId::Chamber(id))?;
        }
        Ok(id)
    }

    /// Adds a door to the arena.
    pub fn insert_door(&mut self, door: Door) -> DoorId {
        let id = DoorId(self.doors.len());
        self.doors.push(door);
        id
    }

    /// Adds a passage to the arena.
    pub fn insert_passage(&mut self, passage: Passage) -> PassageId {
        let id = PassageId(self.passages.len());
        self.passages.push(passage);
        id
    }

    /// Registers `door` with `space`, updating both sides of the relation
    /// in one call: the door records the space it joins, and the space
    /// records the door per its own registration contract (chambers append
    /// it; passages attach it to their last section).
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::InvalidState`] for a dangling handle or a
    /// passage with no sections; nothing is mutated on error.
    pub fn attach_door(&mut self, door: DoorId, space: SpaceId) -> DelveResult<()> {
        if door.0 >= self.doors.len() {
            return Err(DelveError::InvalidState(format!(
                "door handle {} is not in this dungeon",
                door.0
            )));
        }
        match space {
            SpaceId::Chamber(id) => {
                let chamber = self.chambers.get_mut(id.0).ok_or_else(|| {
                    DelveError::InvalidState(format!(
                        "chamber handle {} is not in this dungeon",
                        id.0
                    ))
                })?;
                chamber.register_door(door);
            }
            SpaceId::Passage(id) => {
                let passage = self.passages.get_mut(id.0).ok_or_else(|| {
                    DelveError::InvalidState(format!(
                        "passage handle {} is not in this dungeon",
                        id.0
                    ))
                })?;
                passage.register_door(door)?;
            }
        }
        self.doors[door.0].record_space(space);
        Ok(())
    }

    /// Registers `door` with two spaces, linking them through the door.
    pub fn link_door(&mut self, door: DoorId, first: SpaceId, second: SpaceId) -> DelveResult<()> {
        self.attach_door(door, first)?;
        self.attach_door(door, second)
    }

    /// The chamber behind a handle.
    pub fn chamber(&self, id: ChamberId) -> Option<&Chamber> {
        self.chambers.get(id.0)
    }

    /// Mutable access to the chamber behind a handle.
    pub fn chamber_mut(&mut self, id: ChamberId) -> Option<&mut Chamber> {
        self.chambers.get_mut(id.0)
    }

    /// The passage behind a handle.
    pub fn passage(&self, id: PassageId) -> Option<&Passage> {
        self.passages.get(id.0)
    }

    /// Mutable access to the passage behind a handle.
    pub fn passage_mut(&mut self, id: PassageId) -> Option<&mut Passage> {
        self.passages.get_mut(id.0)
    }

    /// The door behind a handle.
    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.get(id.0)
    }

    /// Mutable access to the door behind a handle.
    pub fn door_mut(&mut self, id: DoorId) -> Option<&mut Door> {
        self.doors.get_mut(id.0)
    }

    /// Handles of all chambers, in creation order.
    pub fn chamber_ids(&self) -> impl Iterator<Item = ChamberId> {
        (0..self.chambers.len()).map(ChamberId)
    }

    /// Handles of all passages, in creation order.
    pub fn passage_ids(&self) -> impl Iterator<Item = PassageId> {
        (0..self.passages.len()).map(PassageId)
    }

    /// All chambers, in creation order.
    pub fn chambers(&self) -> &[Chamber] {
        &self.chambers
    }

    /// All passages, in creation order.
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// All doors, in creation order.
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Number of chambers.
    pub fn chamber_count(&self) -> usize {
        self.chambers.len()
    }

    /// Number of passages.
    pub fn passage_count(&self) -> usize {
        self.passages.len()
    }

    /// Number of doors.
    pub fn door_count(&self) -> usize {
        self.doors.len()
    }

    /// Description of a space, dispatched by variant.
    ///
    /// # Errors
    ///
    /// Returns [`DelveError::InvalidState`] for a dangling handle.
    pub fn space_description(&self, space: SpaceId) -> DelveResult<String> {
        match space {
            SpaceId::Chamber(id) => self
                .chamber(id)
                .map(Chamber::description)
                .ok_or_else(|| {
                    DelveError::InvalidState(format!(
                        "chamber handle {} is not in this dungeon",
                        id.0
                    ))
                }),
            SpaceId::Passage(id) => self
                .passage(id)
                .map(Passage::description)
                .ok_or_else(|| {
                    DelveError::InvalidState(format!(
                        "passage handle {} is not in this dungeon",
                        id.0
                    ))
                }),
        }
    }
}
