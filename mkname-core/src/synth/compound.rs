use tracing::debug;

use crate::classify::{is_consonant, is_vowel, run_length, CharSet};
use crate::error::{NameError, Result};
use crate::random::RandomSource;
use crate::record::NameRecord;
use crate::text::capitalize;

use super::select_name;

/// Sound class of a name's first character under the closed policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lead {
	Consonant,
	Vowel,
}

/// Classifies the first character: vowel set first, then consonant set.
/// Anything else is an error, since the branch table only covers these two.
fn leading_class(chars: &[char], name: &str, consonants: &CharSet, vowels: &CharSet) -> Result<Lead> {
	let first = *chars.first().ok_or(NameError::EmptyName { operation: "compound_names" })?;
	if is_vowel(first, vowels) {
		Ok(Lead::Vowel)
	} else if is_consonant(first, consonants) {
		Ok(Lead::Consonant)
	} else {
		Err(NameError::UnclassifiedLeadingCharacter { name: name.to_owned(), character: first })
	}
}

/// Builds a name from the start of `mod_name` and the rest of `root_name`.
///
/// Both names are lower-cased. The leading run of `mod_name` (consonants if
/// it starts with a consonant, vowels otherwise) becomes the prefix. When the
/// root starts with the same class, its own leading run of that class is
/// dropped; when it starts with the other class it is kept whole. The result
/// is capitalized.
///
/// `compound_names("Spam", "Eggs", ..)` → `"Speggs"`,
/// `compound_names("Donatello", "Mallory", ..)` → `"Dallory"`.
///
/// # Errors
/// - `EmptyName` if either name is empty
/// - `UnclassifiedLeadingCharacter` if a first character is in neither set
pub fn compound_names(mod_name: &str, root_name: &str, consonants: &CharSet, vowels: &CharSet) -> Result<String> {
	let mod_chars: Vec<char> = mod_name.to_lowercase().chars().collect();
	let root_chars: Vec<char> = root_name.to_lowercase().chars().collect();

	let mod_lead = leading_class(&mod_chars, mod_name, consonants, vowels)?;
	let root_lead = leading_class(&root_chars, root_name, consonants, vowels)?;

	let (prefix, suffix) = match (mod_lead, root_lead) {
		(Lead::Consonant, Lead::Consonant) => (
			&mod_chars[..run_length(&mod_chars, consonants)],
			&root_chars[run_length(&root_chars, consonants)..],
		),
		(Lead::Consonant, Lead::Vowel) => (&mod_chars[..run_length(&mod_chars, consonants)], &root_chars[..]),
		(Lead::Vowel, Lead::Vowel) => (
			&mod_chars[..run_length(&mod_chars, vowels)],
			&root_chars[run_length(&root_chars, vowels)..],
		),
		(Lead::Vowel, Lead::Consonant) => (&mod_chars[..run_length(&mod_chars, vowels)], &root_chars[..]),
	};

	let name: String = prefix.iter().chain(suffix).collect();
	Ok(capitalize(&name))
}

/// Draws two names from the pool and compounds them.
///
/// The first draw is the mod name, the second the root name; the draws are
/// independent, so a name can be compounded with itself.
pub fn build_compound_name(
	pool: &[NameRecord],
	consonants: &CharSet,
	vowels: &CharSet,
	rng: &mut dyn RandomSource,
) -> Result<String> {
	let mod_name = select_name(pool, rng)?;
	let root_name = select_name(pool, rng)?;
	let name = compound_names(mod_name, root_name, consonants, vowels)?;
	debug!(mod_name, root_name, name = %name, "compound name");
	Ok(name)
}
