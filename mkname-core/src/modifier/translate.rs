use std::collections::HashMap;

/// Maps each character of the name through `map`, keeping unmapped ones.
///
/// With `casefold` the name is lower-cased first, so the map only needs
/// lower-case keys.
pub fn translate_characters(name: &str, map: &HashMap<char, char>, casefold: bool) -> String {
	let translate = |ch: char| map.get(&ch).copied().unwrap_or(ch);
	if casefold {
		name.to_lowercase().chars().map(translate).collect()
	} else {
		name.chars().map(translate).collect()
	}
}
