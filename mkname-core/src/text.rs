//! Case helpers shared by the synthesizer and the mods.

/// Upper-cases the first character and lower-cases the rest.
///
/// `"mcDONALD"` → `"Mcdonald"`.
pub fn capitalize(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
		None => String::new(),
	}
}
