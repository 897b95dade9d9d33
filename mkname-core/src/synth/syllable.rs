use tracing::debug;

use crate::classify::{CharSet, CvClass};
use crate::error::Result;
use crate::random::RandomSource;
use crate::record::NameRecord;
use crate::text::capitalize;

use super::select_name;

/// Splits a name into syllables.
///
/// A mechanical partition rather than a linguistic one:
/// - every syllable holds exactly one run of vowels
/// - leading non-vowels belong to the first syllable, trailing ones to the last
/// - a run of `n` non-vowels between two vowel runs is cut after its first
///   `ceil(n / 2)` characters
///
/// Anything that is not a vowel counts as a consonant here, whatever the
/// consonant set says. The pieces always concatenate back to `name`; a name
/// without vowels is a single syllable and an empty name has none.
///
/// `split_into_syllables("william", ..)` → `["wil", "liam"]`.
pub fn split_into_syllables(name: &str, consonants: &CharSet, vowels: &CharSet) -> Vec<String> {
	let chars: Vec<char> = name.chars().collect();
	let vowel: Vec<bool> = chars
		.iter()
		.map(|&ch| CvClass::of(ch, consonants, vowels) == CvClass::Vowel)
		.collect();
	let len = chars.len();

	if !vowel.contains(&true) {
		return if chars.is_empty() { Vec::new() } else { vec![name.to_owned()] };
	}

	let skip = |mut index: usize, want_vowel: bool| {
		while index < len && vowel[index] == want_vowel {
			index += 1;
		}
		index
	};

	let mut syllables = Vec::new();
	let mut start = 0;
	// Onset, then the first vowel run.
	let mut index = skip(skip(0, false), true);
	loop {
		let next_vowel = skip(index, false);
		if next_vowel == len {
			syllables.push(chars[start..].iter().collect());
			break;
		}
		let cut = index + (next_vowel - index).div_ceil(2);
		syllables.push(chars[start..cut].iter().collect());
		start = cut;
		index = skip(next_vowel, true);
	}
	syllables
}

/// Builds a name from one random syllable of each of `num_syllables` names.
///
/// All names are drawn first (with replacement), then one syllable is rolled
/// per name in draw order. The concatenation is capitalized; zero syllables
/// give an empty name.
pub fn build_from_syllables(
	num_syllables: usize,
	pool: &[NameRecord],
	consonants: &CharSet,
	vowels: &CharSet,
	rng: &mut dyn RandomSource,
) -> Result<String> {
	let base_names = (0..num_syllables)
		.map(|_| select_name(pool, rng))
		.collect::<Result<Vec<_>>>()?;

	let mut result = String::new();
	for base_name in &base_names {
		let syllables = split_into_syllables(base_name, consonants, vowels);
		let index = rng.roll(syllables.len())? - 1;
		result.push_str(&syllables[index]);
	}

	let name = capitalize(&result);
	debug!(?base_names, name = %name, "syllable name");
	Ok(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::NameConfig;
	use crate::error::NameError;
	use crate::random::{Dice, ScriptedRolls};
	use crate::synth::fixtures;
	use proptest::prelude::*;

	fn split(name: &str) -> Vec<String> {
		let config = NameConfig::default();
		split_into_syllables(name, &config.consonants, &config.vowels)
	}

	#[test]
	fn splits_known_names() {
		assert_eq!(split("william"), vec!["wil", "liam"]);
		assert_eq!(split("tomato"), vec!["tom", "at", "o"]);
		assert_eq!(split("eggsham"), vec!["egg", "sham"]);
		assert_eq!(split("spameggs"), vec!["spam", "eggs"]);
		assert_eq!(split("Alexander"), vec!["Al", "ex", "an", "der"]);
	}

	#[test]
	fn degenerate_names() {
		assert_eq!(split("brr"), vec!["brr"]);
		assert_eq!(split("a"), vec!["a"]);
		assert!(split("").is_empty());
	}

	#[test]
	fn syllable_name_from_scripted_rolls() {
		let config = NameConfig::default();
		let pool = fixtures::names(&["spameggs", "eggsham", "tomato"]);
		// Draw tomato, spameggs, eggsham; then pick "at", "spam", "egg".
		let mut rolls = ScriptedRolls::new([3, 1, 2, 2, 1, 1]);
		let name = build_from_syllables(3, &pool, &config.consonants, &config.vowels, &mut rolls).unwrap();
		assert_eq!(name, "Atspamegg");
		assert_eq!(rolls.remaining(), 0);
	}

	#[test]
	fn consonant_clusters_split_across_names() {
		let config = NameConfig::default();
		let pool = fixtures::names(&["Alice", "Robert", "Mallory", "Donatello", "Michealangelo", "Leonardo", "Raphael"]);
		assert_eq!(split_into_syllables("Michealangelo", &config.consonants, &config.vowels), vec![
			"Mic", "heal", "an", "gel", "o"
		]);
		// Robert → "ert", Alice → "Al", Michealangelo → "an".
		let mut rolls = ScriptedRolls::new([2, 1, 5, 2, 1, 3]);
		let name = build_from_syllables(3, &pool, &config.consonants, &config.vowels, &mut rolls).unwrap();
		assert_eq!(name, "Ertalan");
		assert_eq!(rolls.remaining(), 0);
	}

	#[test]
	fn custom_vowels_move_the_boundaries() {
		let pool = fixtures::names(&["spam", "eggs", "tomato"]);
		let consonants = CharSet::from("bcdfghjklmnpqrtvwxz");
		let vowels = CharSet::from("aeious");
		assert_eq!(split_into_syllables("spam", &consonants, &vowels), vec!["sp", "am"]);
		assert_eq!(split_into_syllables("eggs", &consonants, &vowels), vec!["eg", "gs"]);

		let mut rolls = ScriptedRolls::new([1, 3, 2, 2, 1, 2]);
		let name = build_from_syllables(3, &pool, &consonants, &vowels, &mut rolls).unwrap();
		assert_eq!(name, "Amtomgs");
	}

	#[test]
	fn empty_pool_fails_before_rolling() {
		let config = NameConfig::default();
		let mut rolls = ScriptedRolls::new([1]);
		let result = build_from_syllables(2, &[], &config.consonants, &config.vowels, &mut rolls);
		assert!(matches!(result, Err(NameError::EmptyPool)));
		assert_eq!(rolls.consumed(), 0);
	}

	#[test]
	fn zero_syllables_is_empty() {
		let config = NameConfig::default();
		let pool = fixtures::names(&["spam"]);
		let mut dice = Dice::seeded(3);
		assert_eq!(build_from_syllables(0, &pool, &config.consonants, &config.vowels, &mut dice).unwrap(), "");
	}

	proptest! {
		#[test]
		fn syllables_partition_the_name(name in "[a-zA-Z'-]{0,16}") {
			prop_assert_eq!(split(&name).concat(), name);
		}

		#[test]
		fn each_syllable_has_one_vowel_run(name in "[a-z]{1,16}") {
			let config = NameConfig::default();
			for syllable in split(&name) {
				let pattern = crate::classify::cv_pattern(&syllable, &config.consonants, &config.vowels)
					.replace('x', "c");
				let runs = pattern.split('c').filter(|run| !run.is_empty()).count();
				prop_assert!(runs <= 1, "{} -> {}", name, syllable);
			}
		}

		#[test]
		fn syllable_names_are_capitalized(seed in any::<u64>(), count in 1usize..5) {
			let config = NameConfig::default();
			let pool = fixtures::names(&["william", "tomato", "spameggs", "eggsham", "olivia"]);
			let mut dice = Dice::seeded(seed);
			let name = build_from_syllables(count, &pool, &config.consonants, &config.vowels, &mut dice).unwrap();
			prop_assert!(name.chars().next().is_some_and(|c| c.is_ascii_uppercase()));
			prop_assert!(!name.chars().skip(1).any(|c| c.is_ascii_uppercase()));
		}
	}
}
