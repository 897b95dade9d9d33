//! Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mkname_core::random::seed_from_text;
use mkname_core::{ModKind, NameError, NameFilter};

/// Arguments for the `mkname` binary.
#[derive(Parser, Debug)]
#[command(name = "mkname")]
#[command(author, version, about = "Make random names from pieces of real ones")]
#[command(long_about = r#"
mkname builds names by recombining existing ones: splicing the start of one
name onto another, stitching syllables together, or picking a name as is.
Any result can then be run through a mod such as garble or make_scifi.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit file, or mkname.toml inside a directory
2. ./mkname.toml       Project-level config
3. ~/.config/mkname/config.toml   Global config

Example:
  mkname compound -n 5
  mkname syllable 3 -m double_vowel --kind given
  mkname --seed spam modify Eggs garble
"#)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,

	/// Path to a configuration file or directory
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Names file, or a directory holding names.json / names.txt
	#[arg(short, long, value_name = "PATH", global = true)]
	pub pool: Option<PathBuf>,

	/// Seed for reproducible names: a number or any word
	#[arg(long, value_name = "SEED", value_parser = parse_seed, global = true)]
	pub seed: Option<u64>,

	/// Verbosity level (-v = info, -vv = debug, -vvv = trace)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	pub verbose: u8,

	#[command(flatten)]
	pub filter: FilterArgs,
}

/// Restrict the pool to records with matching metadata.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
	/// Only names from this source
	#[arg(long, global = true)]
	pub source: Option<String>,

	/// Only names from this culture
	#[arg(long, global = true)]
	pub culture: Option<String>,

	/// Only names recorded in this year
	#[arg(long, global = true)]
	pub date: Option<i32>,

	/// Only names of this gender
	#[arg(long, global = true)]
	pub gender: Option<String>,

	/// Only names of this kind (given, surname, ...)
	#[arg(long, global = true)]
	pub kind: Option<String>,
}

impl From<&FilterArgs> for NameFilter {
	fn from(args: &FilterArgs) -> Self {
		NameFilter {
			source: args.source.clone(),
			culture: args.culture.clone(),
			date: args.date,
			gender: args.gender.clone(),
			kind: args.kind.clone(),
		}
	}
}

/// How many names to make and what to do to them.
#[derive(Args, Debug)]
pub struct BatchArgs {
	/// Number of names
	#[arg(short = 'n', long, default_value_t = 1)]
	pub count: usize,

	/// Mod applied to every name
	#[arg(short, long = "mod", value_name = "MOD", value_parser = parse_mod)]
	pub modifier: Option<ModKind>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Splice the start of one name onto the rest of another
	Compound(BatchArgs),

	/// Join one syllable from each of several names
	Syllable {
		/// Number of syllables (and source names)
		syllables: usize,

		#[command(flatten)]
		batch: BatchArgs,
	},

	/// Pick names from the pool
	Pick(BatchArgs),

	/// Apply a mod to a given name
	Modify {
		name: String,

		#[arg(value_parser = parse_mod)]
		modifier: ModKind,
	},

	/// List what the (filtered) pool holds
	List {
		#[arg(value_enum)]
		what: Listing,
	},

	/// List the registered mods
	Mods,

	/// Show configuration file locations, or the effective configuration
	Config {
		/// Print the effective configuration as TOML
		#[arg(long)]
		dump: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Listing {
	Names,
	Cultures,
	Genders,
	Kinds,
}

fn parse_mod(value: &str) -> Result<ModKind, String> {
	value.parse().map_err(|e: NameError| e.to_string())
}

fn parse_seed(value: &str) -> Result<u64, String> {
	Ok(value.parse().unwrap_or_else(|_| seed_from_text(value)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cli_definition_is_valid() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_a_syllable_batch() {
		let cli = Cli::try_parse_from(["mkname", "syllable", "3", "-n", "4", "-m", "garble", "--kind", "given"]).unwrap();
		match cli.command {
			Command::Syllable { syllables, batch } => {
				assert_eq!(syllables, 3);
				assert_eq!(batch.count, 4);
				assert_eq!(batch.modifier, Some(ModKind::Garble));
			}
			other => panic!("unexpected command {other:?}"),
		}
		assert_eq!(cli.filter.kind.as_deref(), Some("given"));
	}

	#[test]
	fn word_seeds_are_hashed() {
		let cli = Cli::try_parse_from(["mkname", "--seed", "spam", "pick"]).unwrap();
		assert_eq!(cli.seed, Some(seed_from_text("spam")));
		let cli = Cli::try_parse_from(["mkname", "--seed", "42", "pick"]).unwrap();
		assert_eq!(cli.seed, Some(42));
	}

	#[test]
	fn unknown_mod_is_a_usage_error() {
		assert!(Cli::try_parse_from(["mkname", "modify", "Eggs", "sparkle"]).is_err());
	}
}
