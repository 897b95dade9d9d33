use std::fmt;

use serde::{Deserialize, Serialize};

/// A configured set of characters, such as the vowels or the flavor letters.
///
/// Stored as the string it was configured with so it serializes back to the
/// same text. Membership is exact: callers fold case when an algorithm asks
/// for it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct CharSet(String);

impl CharSet {
	pub fn new(chars: impl Into<String>) -> Self {
		Self(chars.into())
	}

	pub fn contains(&self, ch: char) -> bool {
		self.0.contains(ch)
	}

	/// Number of characters in the set (not bytes).
	pub fn len(&self) -> usize {
		self.0.chars().count()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the character at a 0-based position.
	pub fn nth(&self, index: usize) -> Option<char> {
		self.0.chars().nth(index)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for CharSet {
	fn from(chars: &str) -> Self {
		Self::new(chars)
	}
}

impl fmt::Display for CharSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Sound class of a single character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CvClass {
	Consonant,
	Vowel,
	/// In neither set (punctuation, digits, letters the configuration left out).
	Other,
}

impl CvClass {
	/// Classifies a character, ignoring its case.
	///
	/// Vowels are checked first, so a character configured in both sets is a vowel.
	pub fn of(ch: char, consonants: &CharSet, vowels: &CharSet) -> Self {
		if is_vowel(ch, vowels) || ch.to_lowercase().any(|c| is_vowel(c, vowels)) {
			CvClass::Vowel
		} else if is_consonant(ch, consonants) || ch.to_lowercase().any(|c| is_consonant(c, consonants)) {
			CvClass::Consonant
		} else {
			CvClass::Other
		}
	}

	/// Pattern symbol: `c`, `v` or `x`.
	pub fn symbol(self) -> char {
		match self {
			CvClass::Consonant => 'c',
			CvClass::Vowel => 'v',
			CvClass::Other => 'x',
		}
	}
}

pub fn is_vowel(ch: char, vowels: &CharSet) -> bool {
	vowels.contains(ch)
}

pub fn is_consonant(ch: char, consonants: &CharSet) -> bool {
	consonants.contains(ch)
}

/// Length of the run at the start of `chars`.
///
/// The first character always belongs to the run whatever its class; only
/// the characters after it must be in `set` to extend it. An empty input has
/// no run at all.
///
/// `run_length("spam", consonants) == 2`, `run_length("eggs", consonants) == 4`.
pub fn run_length(chars: &[char], set: &CharSet) -> usize {
	if chars.is_empty() {
		return 0;
	}
	let mut index = 1;
	while index < chars.len() && set.contains(chars[index]) {
		index += 1;
	}
	index
}

/// Consonant/vowel pattern of a name, one symbol per character.
///
/// `cv_pattern("william", ..)` is `"cvccvvc"`.
pub fn cv_pattern(name: &str, consonants: &CharSet, vowels: &CharSet) -> String {
	name.chars().map(|ch| CvClass::of(ch, consonants, vowels).symbol()).collect()
}
