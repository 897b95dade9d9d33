//! `mkname` command line entry point.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use mkname_core::{ConfigLoader, Dice, Generator, ModKind, NameConfig, NameFilter, NamePool};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, Listing};

fn main() -> Result<()> {
	let cli = Cli::parse();

	let filter = match cli.verbose {
		0 => EnvFilter::new("warn"),
		1 => EnvFilter::new("info"),
		2 => EnvFilter::new("debug"),
		_ => EnvFilter::new("trace"),
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();

	let config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;
	let dice = match cli.seed {
		Some(seed) => Dice::seeded(seed),
		None => Dice::from_entropy(),
	};

	let output = match &cli.command {
		Command::Mods => ModKind::ALL.iter().map(ToString::to_string).collect(),
		Command::Config { dump: true } => vec![config.to_toml().context("Failed to render configuration")?],
		Command::Config { dump: false } => config_locations(&cli),
		Command::Modify { name, modifier } => {
			let mut dice = dice;
			vec![modifier.to_mod(&config).apply(name, &config, &mut dice)?]
		}
		Command::List { what } => {
			let pool = NamePool::new(load_pool(&cli, &config)?.filter(&NameFilter::from(&cli.filter)));
			let values = match what {
				Listing::Names => pool.names(),
				Listing::Cultures => pool.cultures(),
				Listing::Genders => pool.genders(),
				Listing::Kinds => pool.kinds(),
			};
			values.into_iter().map(str::to_owned).collect()
		}
		Command::Compound(batch) => {
			let mut generator = generator(&cli, config, dice)?;
			generator.compound(batch.count, batch.modifier)?
		}
		Command::Syllable { syllables, batch } => {
			let mut generator = generator(&cli, config, dice)?;
			generator.syllable(*syllables, batch.count, batch.modifier)?
		}
		Command::Pick(batch) => {
			let mut generator = generator(&cli, config, dice)?;
			generator.pick(batch.count, batch.modifier)?
		}
	};

	for line in output {
		println!("{line}");
	}
	Ok(())
}

fn load_pool(cli: &Cli, config: &NameConfig) -> Result<NamePool> {
	let source = ConfigLoader::resolve_pool(cli.pool.as_deref(), config).context("Failed to find a names file")?;
	debug!(?source, "pool source");
	let pool = source.load().with_context(|| format!("Failed to load names from {source:?}"))?;
	info!(names = pool.len(), "pool loaded");
	Ok(pool)
}

fn generator(cli: &Cli, config: NameConfig, dice: Dice) -> Result<Generator> {
	let pool = load_pool(cli, &config)?;
	let filter = NameFilter::from(&cli.filter);
	Generator::from_pool(config, &pool, &filter, dice).context("No names left to build from")
}

/// One line per file the loader would read, marking the ones that exist.
fn config_locations(cli: &Cli) -> Vec<String> {
	ConfigLoader::search_paths(cli.config.as_deref())
		.into_iter()
		.map(|path| {
			let mark = if path.is_file() { "found" } else { "missing" };
			format!("{mark}\t{}", path.display())
		})
		.collect()
}
