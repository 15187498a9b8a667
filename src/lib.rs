//! # Delve
//!
//! A tabletop-style procedural dungeon generator.
//!
//! ## Architecture Overview
//!
//! Delve builds a dungeon the way a game master rolls one up at the table:
//! every structural decision comes from a die roll resolved through a fixed
//! lookup table. The core concepts are:
//!
//! - **Dice**: a [`Roller`] trait over uniform inclusive integer ranges,
//!   backed by a seeded RNG in production and a scripted sequence in tests
//! - **Content Tables**: pure roll-to-record lookups for chamber shapes,
//!   chamber contents, monsters, treasure, traps, and stairs
//! - **Entities**: [`Chamber`], [`Passage`], [`PassageSection`], and [`Door`],
//!   each self-randomizing at construction
//! - **Arena**: a [`Dungeon`] that owns every entity and maintains the
//!   bidirectional door-to-space relation through stable handles
//! - **Generator**: the pipeline that creates chambers, pairs every chamber
//!   exit with a destination chamber, and lays passages between them
//!
//! Rendering, persistence, and interactive editing are deliberately out of
//! scope; consumers read descriptions and issue the small mutation API
//! (add/remove monster or treasure).

pub mod chamber;
pub mod dice;
pub mod door;
pub mod dungeon;
pub mod generator;
pub mod passage;
pub mod tables;

pub use chamber::Chamber;
pub use dice::{shuffle, Roller, ScriptedRoller, SeededRoller};
pub use door::Door;
pub use dungeon::{ChamberId, DoorId, Dungeon, PassageId, SpaceId};
pub use generator::Generator;
pub use passage::{Passage, PassageSection};
pub use tables::{
    chamber_shape_for, container_for, contents_for, guardian_for, monster_for, stairs_for,
    trap_for, treasure_for, ChamberShape, ContentKind, Monster, ShapeKind, Stairs, Trap, Treasure,
};

/// Core error type for the Delve generator.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Length/width requested from a shape that has no rectilinear dimensions
    #[error("{0} chambers have no length or width")]
    DimensionlessShape(tables::ShapeKind),

    /// A guard descriptor was requested from treasure that has none
    #[error("the treasure is not protected")]
    NotProtected,

    /// A list mutation targeted an index outside the collection
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An operation was invoked against an entity in the wrong state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generator configuration constants.
pub mod config {
    /// Default number of chambers in a generated dungeon
    pub const DEFAULT_CHAMBER_COUNT: usize = 5;

    /// Minimum exits a chamber may have
    pub const MIN_CHAMBER_EXITS: u32 = 2;

    /// Maximum exits a chamber may have
    pub const MAX_CHAMBER_EXITS: u32 = 4;

    /// The reserved chamber-contents roll the generation loop waits for
    pub const RESERVED_CONTENT_ROLL: u32 = 15;
}
