//! Random name generation by recombining existing names.
//!
//! This crate provides:
//! - A pool of name records with metadata filters
//! - Compound, syllable and pick-based name synthesis
//! - Randomized mods (doubling, garbling, punctuation, sci-fi letters)
//! - Layered TOML configuration of the character classes
//!
//! Every random decision goes through a `RandomSource`, so a seeded `Dice`
//! gives reproducible names and `ScriptedRolls` gives exact ones.

/// Error type shared by every module.
pub mod error;

/// Dice and scripted random sources.
pub mod random;

/// Character sets and consonant/vowel classification.
pub mod classify;

/// Configuration values and the layered loader.
pub mod config;

/// Name records, filters and pools.
pub mod record;

/// Name synthesis and the batch generator.
pub mod synth;

/// Name mods and their registry.
pub mod modifier;

/// File helpers (line reading, cache paths, listings).
pub mod io;

/// Case helpers.
///
/// Not exposed
pub(crate) mod text;

pub use classify::{CharSet, CvClass};
pub use config::{ConfigLoader, NameConfig, PoolSource};
pub use error::{NameError, Result};
pub use modifier::{apply_mod, Mod, ModKind};
pub use random::{Dice, RandomSource, ScriptedRolls};
pub use record::{NameFilter, NamePool, NameRecord};
pub use synth::{build_compound_name, build_from_syllables, compound_names, select_name, split_into_syllables, Generator};
