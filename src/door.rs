//! # Door
//!
//! Connector entity joining one or two spaces, with randomized physical
//! state: archway, open, locked, trapped.
//!
//! The four flags are not independent. An archway is always open and never
//! locked or trapped; a trapped door cannot be an archway; a locked door is
//! closed. The setters enforce these cascades, so the invariants hold after
//! any mutation, not just at construction.

use crate::dice::Roller;
use crate::dungeon::SpaceId;
use crate::tables::{trap_for, Trap};
use serde::{Deserialize, Serialize};

/// A door with randomized state and an embedded trap.
///
/// The trap record is always populated; the `trapped` flag gates whether it
/// is ever shown. Setting `trapped` re-resolves the trap from a fresh roll
/// on every call, regardless of the flag value being set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    archway: bool,
    open: bool,
    locked: bool,
    trapped: bool,
    trap: Trap,
    spaces: Vec<SpaceId>,
}

impl Door {
    /// Generates a door with random state.
    ///
    /// Roll order: one d10 for the 1-in-10 archway chance, which terminates
    /// the remaining rolls when it hits. Otherwise one d10 for open (1..=5),
    /// one d20 for locked (1..=3, forcing closed), and one d20 for trapped
    /// (exactly 1). Both paths consume one further d20 for trap content
    /// through the trapped setter.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Door, ScriptedRoller};
    ///
    /// let mut roller = ScriptedRoller::new([1, 7]);
    /// let door = Door::generate(&mut roller);
    /// assert!(door.is_archway());
    /// assert!(door.is_open());
    /// ```
    pub fn generate(roller: &mut dyn Roller) -> Self {
        let mut door = Self {
            archway: false,
            open: false,
            locked: false,
            trapped: false,
            trap: Trap::default(),
            spaces: Vec::new(),
        };
        if roller.d10() == 1 {
            door.set_archway(true, roller);
        } else {
            door.set_open(roller.d10() <= 5);
            door.set_locked(roller.d20() <= 3);
            let trapped = roller.d20() == 1;
            door.set_trapped(trapped, roller);
        }
        door
    }

    /// Sets the archway flag. An archway is forced open, unlocked, and
    /// untrapped; clearing the trapped flag re-rolls the trap, which is why
    /// this setter needs a roller.
    pub fn set_archway(&mut self, flag: bool, roller: &mut dyn Roller) {
        self.archway = flag;
        if flag {
            self.set_open(true);
            self.set_locked(false);
            self.set_trapped(false, roller);
        }
    }

    /// Sets the open flag. Archways stay open no matter what is requested.
    pub fn set_open(&mut self, flag: bool) {
        self.open = if self.archway { true } else { flag };
    }

    /// Sets the locked flag. Locking a door closes it.
    pub fn set_locked(&mut self, flag: bool) {
        self.locked = flag;
        if flag {
            self.open = false;
        }
    }

    /// Sets the trapped flag and re-resolves the trap from a fresh d20.
    ///
    /// The trap content is re-rolled even when the flag is being cleared;
    /// the embedded trap has no absent state of its own.
    pub fn set_trapped(&mut self, flag: bool, roller: &mut dyn Roller) {
        if flag {
            self.archway = false;
        }
        self.trapped = flag;
        self.trap = trap_for(roller.d20());
    }

    /// Whether the door is an archway.
    pub fn is_archway(&self) -> bool {
        self.archway
    }

    /// Whether the door is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the door is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Whether the door is trapped.
    pub fn is_trapped(&self) -> bool {
        self.trapped
    }

    /// The embedded trap. Meaningful only while [`Door::is_trapped`] holds.
    pub fn trap(&self) -> &Trap {
        &self.trap
    }

    /// The one or two spaces this door joins.
    pub fn spaces(&self) -> &[SpaceId] {
        &self.spaces
    }

    /// Records a space on the door side of the relation.
    ///
    /// Called only by the dungeon's registration, which updates the space
    /// side in the same operation.
    pub(crate) fn record_space(&mut self, space: SpaceId) {
        self.spaces.push(space);
    }

    /// Builds the door's description. Archways get a single fixed line;
    /// everything else reports open, locked, and trapped state in order.
    pub fn description(&self) -> String {
        if self.archway {
            return "The door is an archway.\n".to_string();
        }
        let mut text = String::new();
        if self.open {
            text.push_str("The door is open.\n");
        } else {
            text.push_str("The door is closed.\n");
        }
        if self.locked {
            text.push_str("The door is locked.\n");
        } else {
            text.push_str("The door is unlocked.\n");
        }
        if self.trapped {
            text.push_str(&format!(
                "The door is trapped with a {}.\n",
                self.trap.description()
            ));
        } else {
            text.push_str("The door is not trapped.\n");
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{ScriptedRoller, SeededRoller};

    #[test]
    fn test_archway_roll_terminates_generation() {
        // d10 of 1 is the archway; the only other roll is the trap re-roll
        // consumed by the trapped-flag cascade.
        let mut roller = ScriptedRoller::new([1, 11]);
        let door = Door::generate(&mut roller);
        assert!(door.is_archway());
        assert!(door.is_open());
        assert!(!door.is_locked());
        assert!(!door.is_trapped());
        assert_eq!(roller.remaining(), 0);
        assert_eq!(door.description(), "The door is an archway.\n");
    }

    #[test]
    fn test_non_archway_roll_order() {
        // archway=2 (no), open=3 (yes), locked=10 (no), trapped=1 (yes),
        // trap content=5.
        let mut roller = ScriptedRoller::new([2, 3, 10, 1, 5]);
        let door = Door::generate(&mut roller);
        assert!(!door.is_archway());
        assert!(door.is_open());
        assert!(!door.is_locked());
        assert!(door.is_trapped());
        assert_eq!(door.trap().description(), "poison needle");
        assert_eq!(
            door.description(),
            "The door is open.\nThe door is unlocked.\nThe door is trapped with a poison needle.\n"
        );
    }

    #[test]
    fn test_locked_door_is_closed() {
        // open roll says open, then the lock roll forces it closed.
        let mut roller = ScriptedRoller::new([2, 4, 2, 8, 13]);
        let door = Door::generate(&mut roller);
        assert!(door.is_locked());
        assert!(!door.is_open());
        assert!(door
            .description()
            .starts_with("The door is closed.\nThe door is locked.\n"));
    }

    #[test]
    fn test_setting_archway_clears_other_flags() {
        let mut roller = ScriptedRoller::new([2, 6, 1, 1, 9]);
        let mut door = Door::generate(&mut roller);
        assert!(door.is_locked());
        assert!(door.is_trapped());

        let mut roller = ScriptedRoller::new([3]);
        door.set_archway(true, &mut roller);
        assert!(door.is_archway());
        assert!(door.is_open());
        assert!(!door.is_locked());
        assert!(!door.is_trapped());
    }

    #[test]
    fn test_setting_trapped_clears_archway() {
        let mut roller = ScriptedRoller::new([1, 2]);
        let mut door = Door::generate(&mut roller);
        assert!(door.is_archway());

        let mut roller = ScriptedRoller::new([7]);
        door.set_trapped(true, &mut roller);
        assert!(!door.is_archway());
        assert!(door.is_trapped());
        assert_eq!(door.trap().description(), "arrow trap");
    }

    #[test]
    fn test_trap_rerolls_even_when_clearing_the_flag() {
        let mut roller = ScriptedRoller::new([2, 7, 9, 4, 1]);
        let mut door = Door::generate(&mut roller);
        assert!(!door.is_trapped());
        assert_eq!(door.trap().description(), "collapsing ceiling");

        let mut roller = ScriptedRoller::new([20]);
        door.set_trapped(false, &mut roller);
        assert!(!door.is_trapped());
        assert_eq!(door.trap().description(), "teleporter");
    }

    #[test]
    fn test_archway_stays_open() {
        let mut roller = ScriptedRoller::new([1, 2]);
        let mut door = Door::generate(&mut roller);
        door.set_open(false);
        assert!(door.is_open());
    }

    #[test]
    fn test_generated_doors_satisfy_invariants() {
        let mut roller = SeededRoller::new(314159);
        for _ in 0..500 {
            let door = Door::generate(&mut roller);
            if door.is_archway() {
                assert!(door.is_open());
                assert!(!door.is_locked());
                assert!(!door.is_trapped());
            }
            if door.is_locked() {
                assert!(!door.is_open());
            }
        }
    }

    #[test]
    fn test_description_is_idempotent() {
        let mut roller = SeededRoller::new(2024);
        let door = Door::generate(&mut roller);
        assert_eq!(door.description(), door.description());
    }
}
