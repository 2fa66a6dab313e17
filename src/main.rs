/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use crate::fx::converter::{ConvertError, Converter};
use crate::fx::history::HistoryLog;
use crate::fx::history_record::HistoryRecord;
use crate::fx::rate_table::RateTable;
use crate::reports::chart::RateChart;
use crate::reports::history_reporter::HistoryReporter;
use crate::reports::rate_reporter::RateReporter;
use crate::util::amount::Amount;
use anyhow::{bail, Context, Error};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use std::path::{Path, PathBuf};

mod config;
mod fx;
mod reports;
mod store;
mod util;

const DEFAULT_RATES_FILE: &str = "rates.csv";
const DEFAULT_HISTORY_FILE: &str = "history.csv";

#[derive(Parser)]
#[command(
	name = "xchg",
	version,
	about = "Fixed-rate currency converter with a conversion history"
)]
struct Cli {
	/// The command to execute
	#[command(subcommand)]
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Rate file, one CODE,rate pair per line (default: rates.csv)
	#[arg(short, long, global = true)]
	rates: Option<PathBuf>,

	/// History file (default: history.csv)
	#[arg(short = 'H', long, global = true)]
	history: Option<PathBuf>,

	/// Custom config file location (default: ~/.config/xchg/config.toml)
	#[arg(long, global = true)]
	config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Directive {
	/// List every known currency and its rate
	Rates,

	/// Convert an amount and record it in the history
	Convert {
		amount: String,
		from: String,
		to: String,
	},

	/// Show all recorded conversions
	History,

	/// Add or change the rate of a currency and save the rate file
	Set {
		code: String,
		#[arg(allow_hyphen_values = true)]
		rate: f64,
	},

	/// Draw the rates as a bar chart
	Chart {
		/// Length of the longest bar
		#[arg(short, long)]
		width: Option<usize>,
	},
}

/// File locations and settings after flags and config are combined.
struct Settings {
	rates_file: PathBuf,
	history_file: PathBuf,
	chart_width: usize,
}

impl Settings {
	/// Keeps charts from being drawn absurdly wide by accident
	const MAX_CHART_WIDTH: usize = 500;

	/// Flags win over the config file, which wins over the defaults.
	fn resolve(cli: &Cli, config: Config) -> Result<Self, Error> {
		let chart_width = match &cli.command {
			Directive::Chart { width: Some(w) } => *w,
			_ => config.chart_width.unwrap_or(RateChart::DEFAULT_WIDTH),
		};

		let is_chart = matches!(cli.command, Directive::Chart { .. });
		if is_chart
			&& (chart_width == 0 || chart_width > Settings::MAX_CHART_WIDTH)
		{
			bail!(
				"Chart width must be between 1 and {}",
				Settings::MAX_CHART_WIDTH
			);
		}

		Ok(Self {
			rates_file: cli
				.rates
				.clone()
				.or(config.rates_file)
				.unwrap_or_else(|| PathBuf::from(DEFAULT_RATES_FILE)),
			history_file: cli
				.history
				.clone()
				.or(config.history_file)
				.unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE)),
			chart_width,
		})
	}
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("warn"),
	)
	.init();

	let args = Cli::parse();
	let config = Config::load(args.config.as_deref())?;
	let settings = Settings::resolve(&args, config)?;

	let mut rates = load_rates(&settings.rates_file);

	match args.command {
		Directive::Rates => RateReporter::new(&rates).print_all_rates(),
		Directive::Convert { amount, from, to } => {
			convert(&rates, &settings.history_file, &amount, &from, &to)?
		},
		Directive::History => {
			let history = load_history(&settings.history_file);
			HistoryReporter::new(&history).print_history();
		},
		Directive::Set { code, rate } => {
			rates.set_rate(&code, rate)?;
			if let Some(message) =
				dropped_lines_warning(&rates, &settings.rates_file)
			{
				warn!("{}", message);
			}
			rates.save(&settings.rates_file)?;

			// read back what was written rather than trusting memory
			let count = rates.reload()?;
			println!(
				"Saved {} rates to {}",
				count,
				settings.rates_file.display()
			);
		},
		Directive::Chart { .. } => {
			RateChart::new(&rates, settings.chart_width).print()
		},
	}

	Ok(())
}

/// Converts, prints the result, and records it. Nothing is written unless
/// the conversion succeeds.
fn convert(
	rates: &RateTable,
	history_file: &Path,
	amount: &str,
	from: &str,
	to: &str,
) -> Result<(), Error> {
	let amount = Converter::parse_amount(amount)?;
	let result = match Converter::new(rates).convert(from, to, amount) {
		Ok(r) => r,
		Err(e @ ConvertError::UnknownCurrency(_)) => {
			bail!("{} (known: {})", e, rates.list_codes().join(", "))
		},
		Err(e) => return Err(e.into()),
	};

	let record = HistoryRecord::new(
		&from.trim().to_uppercase(),
		&to.trim().to_uppercase(),
		amount,
		result,
	);

	println!(
		"{} = {}",
		Amount::new(record.amount(), record.from()),
		Amount::new(record.result(), record.to())
	);

	// Saving over a history file we failed to read would lose it
	let mut history = HistoryLog::new();
	history
		.load_from_file(history_file)
		.context("conversion was not recorded")?;
	history.add_record(record);
	history.save_to_file(history_file)?;
	debug!("history now holds {} records", history.len());

	Ok(())
}

/// Saving rewrites the rate file from what was loaded, so any line the load
/// skipped disappears from it.
fn dropped_lines_warning(rates: &RateTable, path: &Path) -> Option<String> {
	let skipped = rates.skipped_lines();
	if skipped.is_empty() {
		return None;
	}

	let lines: Vec<String> = skipped.iter().map(|n| n.to_string()).collect();
	Some(format!(
		"{}: unreadable line(s) {} will be removed when saving",
		path.display(),
		lines.join(", ")
	))
}

/// A rate file that cannot be read leaves us with no rates rather than
/// stopping the program.
fn load_rates(path: &Path) -> RateTable {
	let mut rates = RateTable::new();
	if let Err(e) = rates.load(path) {
		warn!("could not load rates from {}: {}", path.display(), e);
	}
	rates
}

fn load_history(path: &Path) -> HistoryLog {
	let mut history = HistoryLog::new();
	if let Err(e) = history.load_from_file(path) {
		warn!("could not load history from {}: {}", path.display(), e);
		history = HistoryLog::new();
	}
	history
}
