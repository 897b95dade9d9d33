use tracing::debug;

use crate::classify::CharSet;
use crate::error::{NameError, Result};
use crate::random::RandomSource;
use crate::text::capitalize;

/// Inserts a rolled punctuation mark into the name.
///
/// The mark is rolled first. `index` is a 0-based insertion point; when it
/// is `None` one is rolled over the name's positions, so the mark never
/// lands after the last character. An index past the end appends.
///
/// The text before and after the mark can be capitalized independently:
/// `"spam"` with `'` at 1 → `"S'Pam"`, or `"s'Pam"` without `cap_before`.
/// Inserting at 0 leaves nothing before the mark, giving `"-Spam"`.
///
/// # Errors
/// - `InvalidRange` if `marks` is empty
/// - `EmptyName` if the index has to be rolled over an empty name
pub fn add_punctuation(
	name: &str,
	marks: &CharSet,
	index: Option<usize>,
	cap_before: bool,
	cap_after: bool,
	rng: &mut dyn RandomSource,
) -> Result<String> {
	let mark = marks
		.nth(rng.roll(marks.len())? - 1)
		.ok_or(NameError::InvalidRange { max: marks.len() })?;

	let chars: Vec<char> = name.chars().collect();
	let index = match index {
		Some(index) => index.min(chars.len()),
		None if chars.is_empty() => return Err(NameError::EmptyName { operation: "add_punctuation" }),
		None => rng.roll(chars.len())? - 1,
	};

	let before: String = chars[..index].iter().collect();
	let after: String = chars[index..].iter().collect();
	let before = if cap_before { capitalize(&before) } else { before };
	let after = if cap_after { capitalize(&after) } else { after };

	let modified = format!("{before}{mark}{after}");
	debug!(name, %mark, index, modified = %modified, "add_punctuation");
	Ok(modified)
}
