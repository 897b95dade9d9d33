//! Randomized name mods.
//!
//! Each mod is a free function over a name and a `RandomSource`. The
//! registry below gives the ones that need no extra arguments a command-line
//! name (`ModKind`) and resolves them against a `NameConfig` into a fully
//! parameterized `Mod`.

/// Letter doubling and letter insertion.
pub mod letters;

/// Base64 garbling of a single character.
pub mod garble;

/// Punctuation insertion.
pub mod punctuation;

/// Character-for-character translation.
pub mod translate;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::classify::CharSet;
use crate::config::NameConfig;
use crate::error::{NameError, Result};
use crate::random::RandomSource;

pub use garble::garble;
pub use letters::{add_letters, double_letter};
pub use punctuation::add_punctuation;
pub use translate::translate_characters;

/// The mods that can be named on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModKind {
	/// Double any one character.
	DoubleLetter,
	/// Double one of the configured vowels.
	DoubleVowel,
	/// Base64 one character.
	Garble,
	/// Work one of the configured sci-fi letters into the name.
	MakeScifi,
	/// Insert one of the configured marks at a random position.
	AddPunctuation,
}

impl ModKind {
	/// Every registered mod, in listing order.
	pub const ALL: [ModKind; 5] = [
		ModKind::DoubleLetter,
		ModKind::DoubleVowel,
		ModKind::Garble,
		ModKind::MakeScifi,
		ModKind::AddPunctuation,
	];

	/// The registry name of the mod.
	pub fn name(self) -> &'static str {
		match self {
			ModKind::DoubleLetter => "double_letter",
			ModKind::DoubleVowel => "double_vowel",
			ModKind::Garble => "garble",
			ModKind::MakeScifi => "make_scifi",
			ModKind::AddPunctuation => "add_punctuation",
		}
	}

	/// Resolves the mod's parameters from `config`.
	pub fn to_mod(self, config: &NameConfig) -> Mod {
		match self {
			ModKind::DoubleLetter => Mod::DoubleLetter { letters: None },
			ModKind::DoubleVowel => Mod::DoubleLetter { letters: Some(config.vowels.clone()) },
			ModKind::Garble => Mod::Garble,
			ModKind::MakeScifi => Mod::AddLetters { letters: config.scifi_letters.clone() },
			ModKind::AddPunctuation => Mod::AddPunctuation {
				marks: config.punctuation.clone(),
				index: None,
				cap_before: true,
				cap_after: true,
			},
		}
	}
}

impl FromStr for ModKind {
	type Err = NameError;

	fn from_str(s: &str) -> Result<Self> {
		ModKind::ALL
			.into_iter()
			.find(|kind| kind.name() == s)
			.ok_or_else(|| NameError::UnknownMod(s.to_owned()))
	}
}

impl fmt::Display for ModKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A mod with all of its parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum Mod {
	DoubleLetter { letters: Option<CharSet> },
	AddLetters { letters: CharSet },
	Garble,
	AddPunctuation { marks: CharSet, index: Option<usize>, cap_before: bool, cap_after: bool },
	Translate { map: HashMap<char, char>, casefold: bool },
}

impl Mod {
	/// Applies the mod to `name`.
	///
	/// `config` supplies the vowel set `AddLetters` places letters around;
	/// every other parameter is carried by the variant.
	pub fn apply(&self, name: &str, config: &NameConfig, rng: &mut dyn RandomSource) -> Result<String> {
		match self {
			Mod::DoubleLetter { letters } => double_letter(name, letters.as_ref(), rng),
			Mod::AddLetters { letters } => add_letters(name, letters, &config.vowels, rng),
			Mod::Garble => garble(name, rng),
			Mod::AddPunctuation { marks, index, cap_before, cap_after } => {
				add_punctuation(name, marks, *index, *cap_before, *cap_after, rng)
			}
			Mod::Translate { map, casefold } => Ok(translate_characters(name, map, *casefold)),
		}
	}
}

/// Looks up a mod by its registry name and applies it.
///
/// # Errors
/// `UnknownMod` if `mod_name` is not registered, otherwise whatever the mod
/// itself returns.
pub fn apply_mod(name: &str, mod_name: &str, config: &NameConfig, rng: &mut dyn RandomSource) -> Result<String> {
	let kind: ModKind = mod_name.parse()?;
	debug!(name, %kind, "apply_mod");
	kind.to_mod(config).apply(name, config, rng)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::ScriptedRolls;

	#[test]
	fn names_round_trip_through_the_registry() {
		for kind in ModKind::ALL {
			assert_eq!(kind.name().parse::<ModKind>().unwrap(), kind);
			assert_eq!(kind.to_string(), kind.name());
		}
	}

	#[test]
	fn unknown_mod_is_rejected() {
		let err = "spamify".parse::<ModKind>().unwrap_err();
		assert!(matches!(err, NameError::UnknownMod(ref name) if name == "spamify"));

		let config = NameConfig::default();
		let mut rolls = ScriptedRolls::new([1]);
		assert!(apply_mod("Spam", "Garble", &config, &mut rolls).is_err());
		assert_eq!(rolls.consumed(), 0);
	}

	#[test]
	fn registry_mods_use_the_config() {
		let config = NameConfig::default();
		// Only 'a' and 'o' are vowels in "Bacon"; roll 1 picks 'a'.
		let mut rolls = ScriptedRolls::new([1]);
		assert_eq!(apply_mod("Bacon", "double_vowel", &config, &mut rolls).unwrap(), "Baacon");

		let mut rolls = ScriptedRolls::new([3]);
		assert_eq!(apply_mod("Spam", "double_letter", &config, &mut rolls).unwrap(), "Spaam");

		let mut rolls = ScriptedRolls::new([1]);
		assert_eq!(apply_mod("Eggs", "garble", &config, &mut rolls).unwrap(), "Rqggs");

		let mut rolls = ScriptedRolls::new([1, 1, 1]);
		assert_eq!(apply_mod("Eggs", "make_scifi", &config, &mut rolls).unwrap(), "Keggs");

		let mut rolls = ScriptedRolls::new([1, 2]);
		assert_eq!(apply_mod("spam", "add_punctuation", &config, &mut rolls).unwrap(), "S'Pam");
	}

	#[test]
	fn custom_config_changes_registry_mods() {
		let config = NameConfig { scifi_letters: CharSet::from("v"), ..NameConfig::default() };
		let mut rolls = ScriptedRolls::new([1, 1, 1]);
		assert_eq!(apply_mod("Eggs", "make_scifi", &config, &mut rolls).unwrap(), "Veggs");
	}

	#[test]
	fn translate_needs_no_rolls() {
		let config = NameConfig::default();
		let translate = Mod::Translate { map: [('s', 'e'), ('p', 'g'), ('m', 's')].into_iter().collect(), casefold: true };
		let mut rolls = ScriptedRolls::new(Vec::<usize>::new());
		assert_eq!(translate.apply("Spam", &config, &mut rolls).unwrap(), "egas");
	}
}
