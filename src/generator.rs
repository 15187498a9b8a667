//! # Generator
//!
//! The dungeon pipeline: create chambers, pool their exits, pair every
//! door with a destination chamber, and lay one passage per two paired
//! doors.
//!
//! The pairing is a randomized, greedy, self-loop-avoiding assignment. It
//! guarantees no door leads back to its own chamber, but it makes no
//! symmetry or connectivity promises: a door "leads to" a chamber without
//! that chamber necessarily holding a reverse door.

use crate::dice::{shuffle, Roller};
use crate::door::Door;
use crate::dungeon::{ChamberId, DoorId, Dungeon};
use crate::passage::{Passage, PassageSection};
use crate::DelveResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Orchestrates dungeon generation and owns the result.
///
/// # Examples
///
/// ```
/// use delve::{Generator, SeededRoller};
///
/// let mut roller = SeededRoller::new(42);
/// let mut generator = Generator::new();
/// generator.generate(5, &mut roller).unwrap();
/// assert_eq!(generator.chamber_count(), 5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Generator {
    dungeon: Dungeon,
    slot_pool: Vec<ChamberId>,
    paired: Vec<DoorId>,
    door_targets: HashMap<DoorId, ChamberId>,
}

impl Generator {
    /// Creates a generator with an empty dungeon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the full pipeline: chambers, slot pool, assignment, passages.
    pub fn generate(&mut self, count: usize, roller: &mut dyn Roller) -> DelveResult<()> {
        self.create_chambers(count, roller)?;
        self.build_slot_pool(roller);
        self.assign_chambers();
        self.create_passages(roller);
        info!(
            "generated dungeon: {} chambers, {} doors, {} passages",
            self.chamber_count(),
            self.dungeon.door_count(),
            self.passage_count()
        );
        Ok(())
    }

    /// Creates `count` self-randomized chambers with their exit doors.
    pub fn create_chambers(&mut self, count: usize, roller: &mut dyn Roller) -> DelveResult<()> {
        for _ in 0..count {
            self.dungeon.spawn_chamber(roller)?;
        }
        debug!("created {} chambers", count);
        Ok(())
    }

    /// Builds and shuffles the slot pool: one entry per chamber exit, each
    /// referencing its chamber.
    pub fn build_slot_pool(&mut self, roller: &mut dyn Roller) {
        self.slot_pool.clear();
        let ids: Vec<ChamberId> = self.dungeon.chamber_ids().collect();
        for (id, chamber) in ids.iter().zip(self.dungeon.chambers()) {
            for _ in 0..chamber.door_count() {
                self.slot_pool.push(*id);
            }
        }
        shuffle(&mut self.slot_pool, roller);
        debug!("slot pool holds {} entries", self.slot_pool.len());
    }

    /// Assigns every chamber door a destination chamber from the slot pool.
    ///
    /// Repeatedly scans all chamber doors; each unassigned door takes the
    /// first pool entry belonging to a different chamber, which is removed
    /// from the pool as part of the same step. The outer scan repeats until
    /// the pool empties, or until a full pass makes no progress (a pool
    /// left holding only self-referential entries cannot be drained; those
    /// slots stay unassigned rather than looping forever).
    pub fn assign_chambers(&mut self) {
        let ids: Vec<ChamberId> = self.dungeon.chamber_ids().collect();
        while !self.slot_pool.is_empty() {
            let before = self.slot_pool.len();
            for &owner in &ids {
                let doors: Vec<DoorId> = self
                    .dungeon
                    .chamber(owner)
                    .map(|chamber| chamber.doors().to_vec())
                    .unwrap_or_default();
                for door in doors {
                    if self.door_targets.contains_key(&door) {
                        continue;
                    }
                    if let Some(pos) = self.slot_pool.iter().position(|&slot| slot != owner) {
                        let target = self.slot_pool.remove(pos);
                        self.door_targets.insert(door, target);
                        self.paired.push(door);
                    }
                }
            }
            if self.slot_pool.len() == before {
                warn!(
                    "slot pool stalled with {} self-referential entries left",
                    self.slot_pool.len()
                );
                break;
            }
        }
        debug!("assigned {} doors", self.paired.len());
    }

    /// Builds one passage per two paired doors, in pairing order.
    ///
    /// Every generated passage gets two fresh boundary doors and two fixed
    /// straight 10 ft sections (the section roll is forced, never
    /// randomized here).
    pub fn create_passages(&mut self, roller: &mut dyn Roller) {
        let count = self.paired.len() / 2;
        for _ in 0..count {
            let mut passage = Passage::new();
            let first = self.dungeon.insert_door(Door::generate(roller));
            let second = self.dungeon.insert_door(Door::generate(roller));
            passage.add_boundary_door(first);
            passage.add_boundary_door(second);
            passage.add_section(PassageSection::generate(Some(1), roller, &mut self.dungeon));
            passage.add_section(PassageSection::generate(Some(1), roller, &mut self.dungeon));
            self.dungeon.insert_passage(passage);
        }
        debug!("created {} passages", count);
    }

    /// The generated dungeon.
    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    /// Mutable access to the generated dungeon, for post-generation edits.
    pub fn dungeon_mut(&mut self) -> &mut Dungeon {
        &mut self.dungeon
    }

    /// Number of chambers generated.
    pub fn chamber_count(&self) -> usize {
        self.dungeon.chamber_count()
    }

    /// Number of passages generated.
    pub fn passage_count(&self) -> usize {
        self.dungeon.passage_count()
    }

    /// The chamber a door was paired with, if it was assigned.
    pub fn door_target(&self, door: DoorId) -> Option<ChamberId> {
        self.door_targets.get(&door).copied()
    }

    /// Doors in pairing order.
    pub fn paired_doors(&self) -> &[DoorId] {
        &self.paired
    }

    /// The current slot pool (drained by assignment).
    pub fn slot_pool(&self) -> &[ChamberId] {
        &self.slot_pool
    }

    /// Diagnostic listing of which chamber each door leads to.
    pub fn linked_doors_report(&self) -> String {
        let mut text = String::from("***** LINKED DOORS *****\n");
        for (number, chamber) in self.dungeon.chambers().iter().enumerate() {
            let _ = writeln!(text, "Chamber {}:", number + 1);
            for (slot, door) in chamber.doors().iter().enumerate() {
                match self.door_targets.get(door) {
                    Some(target) => {
                        let _ = writeln!(text, "Door {}: C{}", slot + 1, target.index() + 1);
                    }
                    None => {
                        let _ = writeln!(text, "Door {}: unassigned", slot + 1);
                    }
                }
            }
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{ScriptedRoller, SeededRoller};

    #[test]
    fn test_slot_pool_has_one_entry_per_exit() {
        let mut roller = SeededRoller::new(31337);
        let mut generator = Generator::new();
        generator.create_chambers(6, &mut roller).unwrap();
        generator.build_slot_pool(&mut roller);

        let total_exits: usize = generator
            .dungeon()
            .chambers()
            .iter()
            .map(|chamber| chamber.door_count())
            .sum();
        assert_eq!(generator.slot_pool().len(), total_exits);
    }

    #[test]
    fn test_assignment_never_binds_a_door_to_its_owner() {
        let mut roller = SeededRoller::new(8675309);
        let mut generator = Generator::new();
        generator.generate(8, &mut roller).unwrap();

        for id in generator.dungeon().chamber_ids() {
            let chamber = generator.dungeon().chamber(id).unwrap();
            for &door in chamber.doors() {
                if let Some(target) = generator.door_target(door) {
                    assert_ne!(target, id, "door paired with its own chamber");
                }
            }
        }
    }

    #[test]
    fn test_passage_count_is_half_the_paired_doors() {
        let mut roller = SeededRoller::new(451);
        let mut generator = Generator::new();
        generator.generate(7, &mut roller).unwrap();
        assert_eq!(
            generator.passage_count(),
            generator.paired_doors().len() / 2
        );
    }

    #[test]
    fn test_generated_passages_are_two_straight_sections() {
        let mut roller = SeededRoller::new(1999);
        let mut generator = Generator::new();
        generator.generate(4, &mut roller).unwrap();

        assert!(generator.passage_count() > 0);
        for passage in generator.dungeon().passages() {
            assert_eq!(passage.sections().len(), 2);
            assert_eq!(passage.door_count(), 2);
            for section in passage.sections() {
                assert_eq!(section.description(), "Passage goes straight for 10 ft.");
            }
            assert_eq!(
                passage.description(),
                "Passage goes straight for 10 ft.\nPassage goes straight for 10 ft.\n"
            );
        }
    }

    #[test]
    fn test_report_lists_every_chamber() {
        let mut roller = SeededRoller::new(77);
        let mut generator = Generator::new();
        generator.generate(3, &mut roller).unwrap();

        let report = generator.linked_doors_report();
        assert!(report.starts_with("***** LINKED DOORS *****\n"));
        for number in 1..=3 {
            assert!(report.contains(&format!("Chamber {}:", number)));
        }
    }

    #[test]
    fn test_assignment_with_empty_pool_is_a_no_op() {
        let mut generator = Generator::new();
        generator.assign_chambers();
        assert!(generator.paired_doors().is_empty());
        assert_eq!(generator.passage_count(), 0);
    }
}
