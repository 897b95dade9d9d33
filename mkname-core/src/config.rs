//! Word-structure configuration and the layered file loader.

use std::path::{Path, PathBuf};

use figment::{
	providers::{Format, Serialized, Toml},
	Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::CharSet;
use crate::error::{NameError, Result};
use crate::record::NamePool;

/// Name of the project-level configuration file.
pub const CONFIG_FILE_NAME: &str = "mkname.toml";

/// Names files looked up in a directory, in order of preference.
pub const POOL_FILE_NAMES: [&str; 2] = ["names.json", "names.txt"];

/// Character sets and file locations used to build names.
///
/// Immutable once loaded: every operation receives it (or one of its sets)
/// explicitly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct NameConfig {
	/// Characters treated as consonants.
	pub consonants: CharSet,
	/// Characters treated as vowels.
	pub vowels: CharSet,
	/// Flavor letters used by `make_scifi`.
	pub scifi_letters: CharSet,
	/// Marks used by `add_punctuation`.
	pub punctuation: CharSet,
	/// Names file to use when none is given explicitly.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub names_path: Option<PathBuf>,
}

impl Default for NameConfig {
	fn default() -> Self {
		Self {
			consonants: CharSet::from("bcdfghjklmnpqrstvwxz"),
			vowels: CharSet::from("aeiouy"),
			scifi_letters: CharSet::from("kqxz"),
			punctuation: CharSet::from("'-.?!/:@+|•"),
			names_path: None,
		}
	}
}

impl NameConfig {
	/// Renders the configuration as a complete `mkname.toml`.
	pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
		toml::to_string(&FileConfig { mkname: self.clone() })
	}
}

/// On-disk layout: everything lives under an `[mkname]` table.
#[derive(Serialize, Deserialize, Default, Debug)]
struct FileConfig {
	#[serde(default)]
	mkname: NameConfig,
}

/// Where a names pool should be loaded from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolSource {
	File(PathBuf),
	/// The pool compiled into the crate.
	Builtin,
}

impl PoolSource {
	/// Loads the pool this source points at.
	pub fn load(&self) -> Result<NamePool> {
		match self {
			PoolSource::File(path) => NamePool::load(path),
			PoolSource::Builtin => NamePool::builtin(),
		}
	}
}

/// Configuration loader that handles file discovery and merging.
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from all sources.
	///
	/// Priority (highest to lowest):
	/// 1. Explicit path: a file, or `mkname.toml` inside a directory
	/// 2. Project file: `./mkname.toml`
	/// 3. Global file: `$XDG_CONFIG_HOME/mkname/config.toml`
	/// 4. Default values
	///
	/// # Errors
	/// - `ConfigNotFound` if the explicit path does not exist
	/// - `Config` if a file cannot be parsed
	pub fn load(config_path: Option<&Path>) -> Result<NameConfig> {
		if let Some(path) = config_path {
			if !path.exists() {
				return Err(NameError::ConfigNotFound(path.to_path_buf()));
			}
		}

		let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
		for path in Self::search_paths(config_path) {
			if path.is_file() {
				debug!(path = %path.display(), "merging config file");
				figment = figment.merge(Toml::file(&path));
			}
		}

		let file_config: FileConfig = figment.extract().map_err(Box::new)?;
		Ok(file_config.mkname)
	}

	/// Files that may contribute to the configuration, lowest priority first.
	pub fn search_paths(config_path: Option<&Path>) -> Vec<PathBuf> {
		let mut paths = Vec::new();
		if let Some(global) = Self::global_config_path() {
			paths.push(global);
		}
		paths.push(PathBuf::from(CONFIG_FILE_NAME));

		match config_path {
			Some(path) if path.is_dir() => paths.push(path.join(CONFIG_FILE_NAME)),
			Some(path) => paths.push(path.to_path_buf()),
			None => (),
		}
		paths
	}

	/// Returns `$XDG_CONFIG_HOME/mkname/config.toml` (or the platform equivalent).
	pub fn global_config_path() -> Option<PathBuf> {
		dirs::config_dir().map(|d| d.join("mkname").join("config.toml"))
	}

	/// Decides which names file to use.
	///
	/// Order:
	/// 1. An explicit file
	/// 2. `names.json` / `names.txt` inside an explicit directory
	/// 3. `names_path` from the configuration
	/// 4. `names.json` / `names.txt` in the working directory
	/// 5. The built-in pool
	///
	/// # Errors
	/// Returns `PoolNotFound` when an explicit path holds no names file.
	pub fn resolve_pool(pool_path: Option<&Path>, config: &NameConfig) -> Result<PoolSource> {
		if let Some(path) = pool_path {
			if path.is_file() {
				return Ok(PoolSource::File(path.to_path_buf()));
			}
			if path.is_dir() {
				return Self::find_pool_in(path).map(PoolSource::File).ok_or(NameError::PoolNotFound);
			}
			return Err(NameError::PoolNotFound);
		}

		if let Some(path) = &config.names_path {
			if path.is_file() {
				return Ok(PoolSource::File(path.clone()));
			}
			debug!(path = %path.display(), "configured names file missing, searching");
		}

		Ok(Self::find_pool_in(Path::new(".")).map(PoolSource::File).unwrap_or(PoolSource::Builtin))
	}

	fn find_pool_in(dir: &Path) -> Option<PathBuf> {
		POOL_FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use figment::Jail;

	#[test]
	fn defaults_match_english_letters() {
		let config = NameConfig::default();
		assert!(config.vowels.contains('y'));
		assert!(!config.consonants.contains('y'));
		assert_eq!(config.scifi_letters.as_str(), "kqxz");
		assert!(config.names_path.is_none());
	}

	#[test]
	fn missing_explicit_file_is_an_error() {
		let result = ConfigLoader::load(Some(Path::new("/definitely/not/here/mkname.toml")));
		assert!(matches!(result, Err(NameError::ConfigNotFound(_))));
	}

	#[test]
	fn later_files_override_earlier_ones() {
		Jail::expect_with(|jail| {
			let xdg = jail.directory().join("xdg");
			jail.set_env("XDG_CONFIG_HOME", xdg.display());
			jail.create_dir("xdg/mkname")?;
			jail.create_file("xdg/mkname/config.toml", "[mkname]\nvowels = \"ae\"\nscifi_letters = \"q\"\n")?;
			jail.create_file("mkname.toml", "[mkname]\nvowels = \"aei\"\n")?;
			jail.create_file("custom.toml", "[mkname]\nconsonants = \"bcd\"\n")?;

			let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
			assert_eq!(config.vowels.as_str(), "aei");
			assert_eq!(config.scifi_letters.as_str(), "q");
			assert_eq!(config.consonants.as_str(), "bcd");
			assert_eq!(config.punctuation, NameConfig::default().punctuation);
			Ok(())
		});
	}

	#[test]
	fn explicit_directory_is_searched() {
		Jail::expect_with(|jail| {
			let xdg = jail.directory().join("xdg");
			jail.set_env("XDG_CONFIG_HOME", xdg.display());
			jail.create_dir("conf")?;
			jail.create_file("conf/mkname.toml", "[mkname]\nvowels = \"u\"\n")?;

			let config = ConfigLoader::load(Some(Path::new("conf"))).map_err(|e| e.to_string())?;
			assert_eq!(config.vowels.as_str(), "u");
			Ok(())
		});
	}

	#[test]
	fn pool_resolution_order() {
		Jail::expect_with(|jail| {
			let config = NameConfig::default();
			assert_eq!(ConfigLoader::resolve_pool(None, &config).map_err(|e| e.to_string())?, PoolSource::Builtin);

			jail.create_file("names.txt", "spam\neggs\n")?;
			assert_eq!(
				ConfigLoader::resolve_pool(None, &config).map_err(|e| e.to_string())?,
				PoolSource::File(PathBuf::from("./names.txt"))
			);

			jail.create_file("other.json", "[]")?;
			let configured = NameConfig { names_path: Some(PathBuf::from("other.json")), ..NameConfig::default() };
			assert_eq!(
				ConfigLoader::resolve_pool(None, &configured).map_err(|e| e.to_string())?,
				PoolSource::File(PathBuf::from("other.json"))
			);

			let missing = ConfigLoader::resolve_pool(Some(Path::new("nope.txt")), &config);
			assert!(matches!(missing, Err(NameError::PoolNotFound)));
			Ok(())
		});
	}

	#[test]
	fn rendered_config_reloads() {
		let rendered = NameConfig::default().to_toml().unwrap();
		assert!(rendered.starts_with("[mkname]"));
		let parsed: FileConfig = toml::from_str(&rendered).unwrap();
		assert_eq!(parsed.mkname, NameConfig::default());
	}
}
