use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::error::{NameError, Result};
use crate::random::RandomSource;
use crate::text::capitalize;

/// Replaces one rolled character with the Base64 encoding of its UTF-8 bytes.
///
/// Padding is dropped, so an ASCII character becomes two characters. The
/// result is capitalized: `garble("Eggs")` rolling 1 → `"Rqggs"`.
///
/// # Errors
/// `EmptyName` if there is nothing to garble.
pub fn garble(name: &str, rng: &mut dyn RandomSource) -> Result<String> {
	let chars: Vec<char> = name.chars().collect();
	if chars.is_empty() {
		return Err(NameError::EmptyName { operation: "garble" });
	}

	let index = rng.roll(chars.len())? - 1;
	let mut buf = [0u8; 4];
	let encoded = general_purpose::STANDARD.encode(chars[index].encode_utf8(&mut buf).as_bytes());
	let garbled = encoded.replace('=', " ");

	let mut spliced: String = chars[..index].iter().collect();
	spliced.push_str(garbled.trim_end());
	spliced.extend(&chars[index + 1..]);

	let modified = capitalize(&spliced);
	debug!(name, index, modified = %modified, "garble");
	Ok(modified)
}
