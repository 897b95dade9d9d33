use tracing::{debug, info};

use crate::config::NameConfig;
use crate::error::{NameError, Result};
use crate::modifier::{Mod, ModKind};
use crate::random::{Dice, RandomSource};
use crate::record::{NameFilter, NamePool, NameRecord};

use super::{build_compound_name, build_from_syllables, select_name};

/// High-level generator producing batches of names.
///
/// # Responsibilities
/// - Own the configuration, the (already filtered) pool and the dice
/// - Produce `count` names per call with any of the three synthesis methods
/// - Apply an optional registered mod to every result
///
/// # Notes
/// The random source is a type parameter so tests can run a generator on
/// scripted rolls; everything else uses seedable `Dice`.
#[derive(Debug)]
pub struct Generator<R: RandomSource = Dice> {
	config: NameConfig,
	names: Vec<NameRecord>,
	rng: R,
}

impl<R: RandomSource> Generator<R> {
	/// Creates a generator over `names`.
	///
	/// # Errors
	/// `EmptyPool` if `names` is empty; every method would fail later anyway.
	pub fn new(config: NameConfig, names: Vec<NameRecord>, rng: R) -> Result<Self> {
		if names.is_empty() {
			return Err(NameError::EmptyPool);
		}
		info!(names = names.len(), "generator ready");
		Ok(Self { config, names, rng })
	}

	/// Creates a generator over the records of `pool` that match `filter`.
	///
	/// # Errors
	/// `EmptyPool` if the filter leaves nothing.
	pub fn from_pool(config: NameConfig, pool: &NamePool, filter: &NameFilter, rng: R) -> Result<Self> {
		let names = pool.filter(filter);
		debug!(total = pool.len(), kept = names.len(), ?filter, "filtered pool");
		Self::new(config, names, rng)
	}

	pub fn config(&self) -> &NameConfig {
		&self.config
	}

	/// The records names are drawn from.
	pub fn records(&self) -> &[NameRecord] {
		&self.names
	}

	/// The texts of the records names are drawn from, in pool order.
	pub fn names(&self) -> Vec<&str> {
		self.names.iter().map(|record| record.text.as_str()).collect()
	}

	/// Reseeds the random source.
	pub fn seed(&mut self, seed: u64) {
		self.rng.seed(seed);
	}

	/// Builds `count` compound names.
	pub fn compound(&mut self, count: usize, modifier: Option<ModKind>) -> Result<Vec<String>> {
		let modifier = modifier.map(|kind| kind.to_mod(&self.config));
		let mut results = Vec::with_capacity(count);
		for _ in 0..count {
			let name = build_compound_name(&self.names, &self.config.consonants, &self.config.vowels, &mut self.rng)?;
			results.push(self.finish(name, modifier.as_ref())?);
		}
		Ok(results)
	}

	/// Builds `count` names of `num_syllables` syllables each.
	pub fn syllable(&mut self, num_syllables: usize, count: usize, modifier: Option<ModKind>) -> Result<Vec<String>> {
		let modifier = modifier.map(|kind| kind.to_mod(&self.config));
		let mut results = Vec::with_capacity(count);
		for _ in 0..count {
			let name = build_from_syllables(
				num_syllables,
				&self.names,
				&self.config.consonants,
				&self.config.vowels,
				&mut self.rng,
			)?;
			results.push(self.finish(name, modifier.as_ref())?);
		}
		Ok(results)
	}

	/// Picks `count` names from the pool as they are.
	pub fn pick(&mut self, count: usize, modifier: Option<ModKind>) -> Result<Vec<String>> {
		let modifier = modifier.map(|kind| kind.to_mod(&self.config));
		let mut results = Vec::with_capacity(count);
		for _ in 0..count {
			let name = select_name(&self.names, &mut self.rng)?.to_owned();
			results.push(self.finish(name, modifier.as_ref())?);
		}
		Ok(results)
	}

	/// Applies a registered mod to any name.
	pub fn modify(&mut self, name: &str, kind: ModKind) -> Result<String> {
		kind.to_mod(&self.config).apply(name, &self.config, &mut self.rng)
	}

	fn finish(&mut self, name: String, modifier: Option<&Mod>) -> Result<String> {
		match modifier {
			Some(modifier) => modifier.apply(&name, &self.config, &mut self.rng),
			None => Ok(name),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::ScriptedRolls;
	use crate::synth::fixtures;

	fn scripted(texts: &[&str], rolls: &[usize]) -> Generator<ScriptedRolls> {
		Generator::new(NameConfig::default(), fixtures::names(texts), ScriptedRolls::new(rolls.iter().copied())).unwrap()
	}

	#[test]
	fn empty_pool_is_rejected_up_front() {
		let result = Generator::new(NameConfig::default(), Vec::new(), Dice::seeded(0));
		assert!(matches!(result, Err(NameError::EmptyPool)));
	}

	#[test]
	fn filter_that_matches_nothing_is_an_empty_pool() {
		let pool = NamePool::new(fixtures::names(&["spam", "eggs"]));
		let filter = NameFilter { kind: Some("surname".to_owned()), ..NameFilter::default() };
		let result = Generator::from_pool(NameConfig::default(), &pool, &filter, Dice::seeded(0));
		assert!(matches!(result, Err(NameError::EmptyPool)));
	}

	#[test]
	fn compound_batch() {
		let mut generator = scripted(&["eggs", "spam", "tomato"], &[2, 1, 2, 3]);
		assert_eq!(generator.compound(2, None).unwrap(), vec!["Speggs", "Spomato"]);
	}

	#[test]
	fn syllable_batch() {
		let mut generator = scripted(&["spameggs", "eggsham", "tomato"], &[3, 1, 2, 2, 1, 1]);
		assert_eq!(generator.syllable(3, 1, None).unwrap(), vec!["Atspamegg"]);
	}

	#[test]
	fn mod_applies_after_each_name() {
		// pick Eggs, garble its first letter; pick spam, garble its second.
		let mut generator = scripted(&["Eggs", "spam"], &[1, 1, 2, 2]);
		assert_eq!(generator.pick(2, Some(ModKind::Garble)).unwrap(), vec!["Rqggs", "Scaam"]);

		// Base64 is case-sensitive: a lower-case 'e' encodes as "ZQ==".
		let mut generator = scripted(&["eggs"], &[1, 1]);
		assert_eq!(generator.pick(1, Some(ModKind::Garble)).unwrap(), vec!["Zqggs"]);
	}

	#[test]
	fn modify_uses_the_generator_config() {
		let mut generator = scripted(&["spam"], &[1, 2]);
		assert_eq!(generator.modify("spam", ModKind::AddPunctuation).unwrap(), "S'Pam");
	}

	#[test]
	fn seeded_generators_agree() {
		let pool = NamePool::builtin().unwrap();
		let filter = NameFilter::default();
		let mut a = Generator::from_pool(NameConfig::default(), &pool, &filter, Dice::seeded(11)).unwrap();
		let mut b = Generator::from_pool(NameConfig::default(), &pool, &filter, Dice::seeded(11)).unwrap();
		assert_eq!(a.syllable(2, 5, Some(ModKind::DoubleVowel)).unwrap(), b.syllable(2, 5, Some(ModKind::DoubleVowel)).unwrap());

		let first = a.pick(3, None).unwrap();
		a.seed(99);
		b.seed(99);
		assert_eq!(a.pick(3, None).unwrap(), b.pick(3, None).unwrap());
		assert_eq!(first.len(), 3);
	}

	#[test]
	fn names_lists_the_filtered_pool() {
		let generator = scripted(&["spam", "eggs"], &[]);
		assert_eq!(generator.names(), vec!["spam", "eggs"]);
		assert_eq!(generator.records().len(), 2);
	}
}
