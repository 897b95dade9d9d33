//! Error type shared by every part of the name engine.
//!
//! Synthesis and mod errors are caller or configuration errors: they are
//! returned as-is and never retried internally.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building, modifying or loading names.
#[derive(Debug, Error)]
pub enum NameError {
	/// A pool with no names was handed to an operation that picks from it.
	#[error("the name pool is empty")]
	EmptyPool,

	/// A die was rolled over an empty range, or a scripted roll fell outside it.
	#[error("invalid roll range: 1..={max}")]
	InvalidRange { max: usize },

	/// The first character of a name is neither a consonant nor a vowel.
	#[error("names must start with a consonant or a vowel, `{name}` starts with `{character}`")]
	UnclassifiedLeadingCharacter { name: String, character: char },

	/// The requested mod is not in the registry.
	#[error("unknown mod `{0}`")]
	UnknownMod(String),

	/// An operation needed at least one character to work on.
	#[error("{operation} needs a non-empty name")]
	EmptyName { operation: &'static str },

	/// A scripted random source ran out of values.
	#[error("no scripted rolls left")]
	RollsExhausted,

	/// An explicitly requested configuration file does not exist.
	#[error("config file {} does not exist", .0.display())]
	ConfigNotFound(PathBuf),

	/// No names file could be located.
	#[error("no names file found")]
	PoolNotFound,

	/// The names file has an extension the loader does not understand.
	#[error("unsupported names file format: {}", .0.display())]
	UnsupportedPoolFormat(PathBuf),

	/// Renumbering records would overflow the id range.
	#[error("record ids exceed {}", u32::MAX)]
	IdsExhausted,

	#[error("configuration error: {0}")]
	Config(#[from] Box<figment::Error>),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("invalid names file: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid pool cache: {0}")]
	Cache(#[from] postcard::Error),
}

impl NameError {
	/// Whether the error was caused by the caller's input rather than the
	/// environment (files, configuration).
	pub fn is_input_error(&self) -> bool {
		matches!(
			self,
			NameError::EmptyPool
				| NameError::InvalidRange { .. }
				| NameError::UnclassifiedLeadingCharacter { .. }
				| NameError::UnknownMod(_)
				| NameError::EmptyName { .. }
		)
	}
}

pub type Result<T> = std::result::Result<T, NameError>;
