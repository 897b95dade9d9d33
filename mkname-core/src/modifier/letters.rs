use tracing::debug;

use crate::classify::{is_vowel, CharSet};
use crate::error::{NameError, Result};
use crate::random::RandomSource;
use crate::text::capitalize;

/// Doubles one character of the name in place.
///
/// When `letters` is set (and not empty) only characters in it can be
/// doubled; if the name has none of them it is returned unchanged without
/// rolling. Matching is exact, so `B` is not doubled for `"b"`.
///
/// `double_letter("Bacon", Some("bcn"))` rolling 2 → `"Baconn"`.
pub fn double_letter(name: &str, letters: Option<&CharSet>, rng: &mut dyn RandomSource) -> Result<String> {
	let chars: Vec<char> = name.chars().collect();
	let allowed: Vec<usize> = match letters.filter(|set| !set.is_empty()) {
		Some(set) => {
			let positions: Vec<usize> = (0..chars.len()).filter(|&i| set.contains(chars[i])).collect();
			if positions.is_empty() {
				return Ok(name.to_owned());
			}
			positions
		}
		None => (0..chars.len()).collect(),
	};

	let index = allowed[rng.roll(allowed.len())? - 1];
	let mut doubled = String::with_capacity(name.len() + 4);
	doubled.extend(&chars[..=index]);
	doubled.extend(&chars[index..]);
	debug!(name, index, doubled = %doubled, "double_letter");
	Ok(doubled)
}

/// Works one of `letters` into the name.
///
/// Three rolls are made up front: which letter, where it goes (d12) and a
/// wildcard (d20). The name is lower-cased, then:
/// - 1-5: the letter goes in front, replacing the first character unless that is a vowel
/// - 6-10: the letter goes at the end, replacing the last character unless that is a vowel
/// - 11-12: one rolled character is replaced, or on a wildcard 20 a rolled
///   number of rolled positions are (repeats just overwrite again)
///
/// The vowel tests treat anything that is not a vowel as a consonant. The
/// result is capitalized.
pub fn add_letters(name: &str, letters: &CharSet, vowels: &CharSet, rng: &mut dyn RandomSource) -> Result<String> {
	let letter_index = rng.roll(letters.len())? - 1;
	let letter = letters.nth(letter_index).ok_or(NameError::InvalidRange { max: letters.len() })?;
	let choice = rng.roll(12)?;
	let wild = rng.roll(20)?;

	let mut chars: Vec<char> = name.to_lowercase().chars().collect();
	let (Some(&first), Some(&last)) = (chars.first(), chars.last()) else {
		return Err(NameError::EmptyName { operation: "add_letters" });
	};

	if choice < 6 {
		if is_vowel(first, vowels) {
			chars.insert(0, letter);
		} else {
			chars[0] = letter;
		}
	} else if choice < 11 {
		if is_vowel(last, vowels) {
			chars.push(letter);
		} else {
			let end = chars.len() - 1;
			chars[end] = letter;
		}
	} else if wild < 20 {
		let index = rng.roll(chars.len())? - 1;
		chars[index] = letter;
	} else {
		let count = rng.roll(chars.len())?;
		for _ in 0..count {
			let index = rng.roll(chars.len())? - 1;
			chars[index] = letter;
		}
	}

	let modified = capitalize(&chars.into_iter().collect::<String>());
	debug!(name, %letter, choice, wild, modified = %modified, "add_letters");
	Ok(modified)
}
