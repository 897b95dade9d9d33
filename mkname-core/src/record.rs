use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{NameError, Result};
use crate::io::{cache_path, file_len, is_up_to_date, read_lines};

const BUILTIN_NAMES: &str = include_str!("../data/names.json");

/// A name together with where it came from.
///
/// Only `text` matters to the synthesizer; the other fields are used to
/// filter a pool before names are built from it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NameRecord {
	pub id: u32,
	#[serde(rename = "name")]
	pub text: String,
	#[serde(default)]
	pub source: String,
	#[serde(default)]
	pub culture: String,
	#[serde(default)]
	pub date: i32,
	#[serde(default)]
	pub gender: String,
	#[serde(default)]
	pub kind: String,
}

impl NameRecord {
	/// Creates a record with no metadata.
	pub fn bare(id: u32, text: impl Into<String>) -> Self {
		Self {
			id,
			text: text.into(),
			source: String::new(),
			culture: String::new(),
			date: 0,
			gender: String::new(),
			kind: String::new(),
		}
	}
}

/// Restricts a pool to records whose metadata matches every set field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
	pub source: Option<String>,
	pub culture: Option<String>,
	pub date: Option<i32>,
	pub gender: Option<String>,
	pub kind: Option<String>,
}

impl NameFilter {
	pub fn matches(&self, record: &NameRecord) -> bool {
		fn field(wanted: &Option<String>, actual: &str) -> bool {
			wanted.as_deref().is_none_or(|wanted| wanted == actual)
		}

		field(&self.source, &record.source)
			&& field(&self.culture, &record.culture)
			&& self.date.is_none_or(|date| date == record.date)
			&& field(&self.gender, &record.gender)
			&& field(&self.kind, &record.kind)
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

/// On-disk cache of a parsed names file.
#[derive(Serialize, Deserialize)]
struct PoolCache {
	/// Size of the source when the cache was written.
	source_len: u64,
	pool: NamePool,
}

/// An ordered collection of name records.
///
/// This is the storage side of the engine: it loads and filters records,
/// then hands plain slices to the synthesizer.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct NamePool {
	records: Vec<NameRecord>,
}

impl NamePool {
	pub fn new(records: Vec<NameRecord>) -> Self {
		Self { records }
	}

	/// Builds a pool from bare names, numbering them from 1.
	pub fn from_names<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let records = names
			.into_iter()
			.zip(1..)
			.map(|(name, id)| NameRecord::bare(id, name))
			.collect();
		Self { records }
	}

	/// The pool bundled with the crate.
	pub fn builtin() -> Result<Self> {
		let records: Vec<NameRecord> = serde_json::from_str(BUILTIN_NAMES)?;
		Ok(Self { records })
	}

	/// Loads a pool from a names file, reusing a binary cache when possible.
	///
	/// - `.txt`: one name per line, ids assigned from 1, no metadata
	/// - `.json`: an array of records
	///
	/// The cache is `<file name>.bin` next to the source. It is read instead of
	/// the source while it is at least as recent and was built from a source of
	/// the same size; otherwise the source is parsed and the cache rewritten
	/// with `postcard`. An unreadable cache is rebuilt, and failing to write
	/// it is not fatal.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let filepath = filepath.as_ref();
		let binary_data_path = cache_path(filepath)?;
		let source_len = file_len(filepath);

		if is_up_to_date(&binary_data_path, filepath) {
			match Self::read_cache(&binary_data_path) {
				Ok(cache) if Some(cache.source_len) == source_len => {
					debug!(path = %binary_data_path.display(), names = cache.pool.len(), "loaded cached pool");
					return Ok(cache.pool);
				}
				Ok(_) => debug!(path = %binary_data_path.display(), "pool cache size mismatch"),
				Err(e) => warn!(path = %binary_data_path.display(), error = %e, "discarding unreadable pool cache"),
			}
		}

		let pool = Self::read_names_file(filepath)?;
		if let Some(source_len) = source_len {
			let cache = PoolCache { source_len, pool };
			match postcard::to_stdvec(&cache) {
				Ok(bytes) => {
					if let Err(e) = std::fs::write(&binary_data_path, bytes) {
						warn!(path = %binary_data_path.display(), error = %e, "could not write pool cache");
					}
				}
				Err(e) => warn!(error = %e, "could not encode pool cache"),
			}
			debug!(path = %filepath.display(), names = cache.pool.len(), "loaded pool");
			return Ok(cache.pool);
		}
		Ok(pool)
	}

	fn read_cache(path: &Path) -> Result<PoolCache> {
		let bytes = std::fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Parses a names file without touching the cache.
	pub fn read_names_file<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let filepath = filepath.as_ref();
		match filepath.extension().and_then(|ext| ext.to_str()) {
			Some("txt") => Ok(Self::from_names(read_lines(filepath)?)),
			Some("json") => {
				let contents = std::fs::read_to_string(filepath)?;
				let records: Vec<NameRecord> = serde_json::from_str(&contents)?;
				Ok(Self { records })
			}
			_ => Err(NameError::UnsupportedPoolFormat(filepath.to_path_buf())),
		}
	}

	/// Writes the pool as a JSON array of records.
	pub fn write_json<P: AsRef<Path>>(&self, filepath: P) -> Result<()> {
		let json = serde_json::to_string_pretty(&self.records)?;
		std::fs::write(filepath, json)?;
		Ok(())
	}

	pub fn records(&self) -> &[NameRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Returns the records matching `filter`, in pool order.
	pub fn filter(&self, filter: &NameFilter) -> Vec<NameRecord> {
		self.records.iter().filter(|r| filter.matches(r)).cloned().collect()
	}

	/// Texts of every record, in pool order.
	pub fn names(&self) -> Vec<&str> {
		self.records.iter().map(|r| r.text.as_str()).collect()
	}

	pub fn cultures(&self) -> Vec<&str> {
		Self::distinct(self.records.iter().map(|r| r.culture.as_str()))
	}

	pub fn genders(&self) -> Vec<&str> {
		Self::distinct(self.records.iter().map(|r| r.gender.as_str()))
	}

	pub fn kinds(&self) -> Vec<&str> {
		Self::distinct(self.records.iter().map(|r| r.kind.as_str()))
	}

	/// Renumbers ids sequentially starting after `offset`.
	///
	/// # Errors
	/// `IdsExhausted` if the last id would not fit in a `u32`; the pool is
	/// left untouched.
	pub fn reindex(&mut self, offset: u32) -> Result<()> {
		let count = u32::try_from(self.records.len()).map_err(|_| NameError::IdsExhausted)?;
		offset.checked_add(count).ok_or(NameError::IdsExhausted)?;
		for (record, step) in self.records.iter_mut().zip(1..=count) {
			record.id = offset + step;
		}
		Ok(())
	}

	/// Appends another pool's records, renumbering them after this pool's ids.
	///
	/// # Errors
	/// `IdsExhausted` if the merged ids would not fit in a `u32`.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		let offset = self.records.iter().map(|r| r.id).max().unwrap_or(0);
		let mut incoming = other.clone();
		incoming.reindex(offset)?;
		self.records.extend(incoming.records);
		Ok(())
	}

	fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
		values
			.filter(|v| !v.is_empty())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}
}
