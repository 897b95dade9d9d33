//! Name synthesis: picking, compounding and syllable recombination.
//!
//! The free functions take the pool as a plain slice and draw every random
//! decision through a `RandomSource`, so each result is a pure function of
//! its inputs and the rolls it sees. `Generator` bundles a configuration,
//! a filtered pool and dice for callers that want whole batches of names.

/// Compound names: a leading sound run of one name spliced onto another.
pub mod compound;

/// Syllable splitting and syllable-based names.
pub mod syllable;

/// High-level batch generation with optional mods.
pub mod generator;

use tracing::trace;

use crate::error::{NameError, Result};
use crate::random::RandomSource;
use crate::record::NameRecord;

pub use compound::{build_compound_name, compound_names};
pub use generator::Generator;
pub use syllable::{build_from_syllables, split_into_syllables};

/// Picks one name from the pool with a single roll.
///
/// # Errors
/// `EmptyPool` if `pool` has no records.
pub fn select_name<'a>(pool: &'a [NameRecord], rng: &mut dyn RandomSource) -> Result<&'a str> {
	if pool.is_empty() {
		return Err(NameError::EmptyPool);
	}
	let index = rng.roll(pool.len())? - 1;
	let name = pool[index].text.as_str();
	trace!(index, name, "selected name");
	Ok(name)
}
