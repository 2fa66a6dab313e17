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
use crate::store::filesystem;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateError {
	#[error("invalid currency code '{0}'")]
	InvalidCode(String),

	#[error("rate for {code} must be a positive number, got {rate}")]
	InvalidRate { code: String, rate: f64 },

	#[error("rate table was not loaded from a file")]
	NoSource,

	#[error("rate file: {0}")]
	Io(#[from] io::Error),

	#[error("rate file: {0}")]
	Csv(#[from] csv::Error),
}

/// Exchange rates keyed by currency code. Every rate is the number of base
/// units one unit of that currency is worth.
///
/// Codes are stored uppercase and kept sorted, so listings and saved files
/// come out in the same order every time.
#[derive(Debug, Default)]
pub struct RateTable {
	rates: BTreeMap<String, f64>,

	/// File this table was last loaded from, used by reload()
	source: Option<PathBuf>,

	/// Line numbers the last load could not use
	skipped: Vec<u64>,
}

impl RateTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the contents of this table with the rates in the file.
	///
	/// Lines that do not have exactly two fields, or whose code or rate are
	/// unusable, are skipped with a warning. Returns the number of rates read.
	/// The path is remembered even when the file cannot be read.
	pub fn load(&mut self, path: &Path) -> Result<usize, RateError> {
		self.rates.clear();
		self.skipped.clear();
		self.source = Some(path.to_path_buf());

		// one line per rate; a stray quote must not swallow the lines after it
		let mut reader = ReaderBuilder::new()
			.has_headers(false)
			.flexible(true)
			.quoting(false)
			.trim(Trim::All)
			.from_path(path)?;

		for result in reader.records() {
			let record = match result {
				Ok(r) => r,
				Err(e) if e.is_io_error() => return Err(e.into()),
				Err(e) => {
					warn!("{}: skipping unreadable line: {}", path.display(), e);
					self.skipped
						.push(e.position().map(|p| p.line()).unwrap_or_default());
					continue;
				},
			};

			if is_blank(&record) {
				continue;
			}

			if let Err(reason) = self.insert_record(&record) {
				warn!(
					"{}:{}: skipping rate: {}",
					path.display(),
					line_number(&record),
					reason
				);
				self.skipped.push(line_number(&record));
			}
		}

		debug!("loaded {} rates from {}", self.len(), path.display());
		Ok(self.len())
	}

	/// Lines of the source file that the last load skipped. Saving the table
	/// drops them from the file.
	pub fn skipped_lines(&self) -> &[u64] {
		&self.skipped
	}

	/// Clears the table and loads it again from the file it came from.
	pub fn reload(&mut self) -> Result<usize, RateError> {
		let path = self.source.clone().ok_or(RateError::NoSource)?;
		self.load(&path)
	}

	fn insert_record(&mut self, record: &StringRecord) -> Result<(), String> {
		if record.len() != 2 {
			return Err(format!("expected 2 fields, found {}", record.len()));
		}

		let rate = record[1]
			.parse::<f64>()
			.map_err(|e| format!("bad rate '{}': {}", &record[1], e))?;

		self.set_rate(&record[0], rate).map_err(|e| e.to_string())
	}

	/// Inserts or replaces the rate for a currency.
	pub fn set_rate(&mut self, code: &str, rate: f64) -> Result<(), RateError> {
		let code = normalize_code(code)
			.ok_or_else(|| RateError::InvalidCode(code.to_string()))?;

		if !rate.is_finite() || rate <= 0.0 {
			return Err(RateError::InvalidRate { code, rate });
		}

		self.rates.insert(code, rate);
		Ok(())
	}

	/// Writes every rate to the file as `CODE,rate` lines, sorted by code,
	/// replacing whatever was there.
	pub fn save(&self, path: &Path) -> Result<(), RateError> {
		let mut writer = WriterBuilder::new()
			.has_headers(false)
			.from_writer(Vec::new());

		for (code, rate) in &self.rates {
			// f64's Display is the shortest text that parses back exactly
			let rate = rate.to_string();
			writer.write_record([code.as_str(), rate.as_str()])?;
		}

		let contents = writer.into_inner().map_err(|e| e.into_error())?;
		filesystem::replace(path, &contents)?;

		debug!("saved {} rates to {}", self.len(), path.display());
		Ok(())
	}

	pub fn get_rate(&self, code: &str) -> Option<f64> {
		self.rates.get(&code.trim().to_uppercase()).copied()
	}

	pub fn list_codes(&self) -> Vec<String> {
		self.rates.keys().cloned().collect()
	}

	/// All rates, sorted by code.
	pub fn rates(&self) -> impl Iterator<Item = (&str, f64)> {
		self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
	}

	pub fn len(&self) -> usize {
		self.rates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rates.is_empty()
	}
}

/// Trims and uppercases a currency code, or returns None if it is not a
/// plain alphabetic identifier.
pub fn normalize_code(code: &str) -> Option<String> {
	let code = code.trim();
	if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
		return None;
	}
	Some(code.to_ascii_uppercase())
}

pub(crate) fn is_blank(record: &StringRecord) -> bool {
	record.iter().all(|field| field.is_empty())
}

pub(crate) fn line_number(record: &StringRecord) -> u64 {
	record.position().map(|p| p.line()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::scratch_dir;
	use std::fs;

	fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
		let path = dir.join(name);
		fs::write(&path, contents).unwrap();
		path
	}

	fn from_file(path: &Path) -> Result<RateTable, RateError> {
		let mut table = RateTable::new();
		table.load(path)?;
		Ok(table)
	}

	#[test]
	fn test_set_rate_is_case_insensitive() {
		let mut table = RateTable::new();
		table.set_rate("eur", 1.2).unwrap();

		assert_eq!(table.get_rate("EUR"), Some(1.2));
		assert_eq!(table.get_rate("Eur"), Some(1.2));
		assert_eq!(table.list_codes(), vec!["EUR"]);
	}

	#[test]
	fn test_set_rate_replaces() {
		let mut table = RateTable::new();
		table.set_rate("USD", 35.0).unwrap();
		table.set_rate("usd", 36.5).unwrap();

		assert_eq!(table.len(), 1);
		assert_eq!(table.get_rate("USD"), Some(36.5));
	}

	#[test]
	fn test_set_rate_rejects_bad_input() {
		let mut table = RateTable::new();

		assert!(matches!(
			table.set_rate("USD", 0.0),
			Err(RateError::InvalidRate { .. })
		));
		assert!(table.set_rate("USD", -3.0).is_err());
		assert!(table.set_rate("USD", f64::NAN).is_err());
		assert!(table.set_rate("USD", f64::INFINITY).is_err());
		assert!(matches!(
			table.set_rate("", 1.0),
			Err(RateError::InvalidCode(_))
		));
		assert!(table.set_rate("US D", 1.0).is_err());
		assert!(table.is_empty());
	}

	#[test]
	fn test_missing_code() {
		let table = RateTable::new();
		assert_eq!(table.get_rate("XYZ"), None);
	}

	#[test]
	fn test_list_codes_sorted() {
		let mut table = RateTable::new();
		for (code, rate) in [("usd", 35.0), ("THB", 1.0), ("eur", 38.5)] {
			table.set_rate(code, rate).unwrap();
		}
		assert_eq!(table.list_codes(), vec!["EUR", "THB", "USD"]);
	}

	#[test]
	fn test_load_skips_malformed_lines() {
		let dir = scratch_dir("rates-load");
		let path = write_file(
			&dir,
			"rates.csv",
			"THB,1.0\n\
			 usd , 35.0\n\
			 EUR\n\
			 GBP,abc\n\
			 \n\
			 JPY,0.23,extra\n\
			 CHF,-1\n\
			 SGD,2.6e1\n",
		);

		let table = from_file(&path).unwrap();

		assert_eq!(table.list_codes(), vec!["SGD", "THB", "USD"]);
		assert_eq!(table.get_rate("USD"), Some(35.0));
		assert_eq!(table.get_rate("SGD"), Some(26.0));
		assert_eq!(table.skipped_lines().len(), 4);
		assert_eq!(&table.skipped_lines()[..2], &[3, 4]);
	}

	#[test]
	fn test_load_stray_quote_keeps_following_lines() {
		let dir = scratch_dir("rates-quote");
		let path = write_file(
			&dir,
			"rates.csv",
			"THB,1\n\
			 \"GBP,44\n\
			 USD,35\n\
			 EUR,38.5\n",
		);

		let table = from_file(&path).unwrap();

		assert_eq!(table.list_codes(), vec!["EUR", "THB", "USD"]);
		assert_eq!(table.skipped_lines(), &[2]);
	}

	#[test]
	fn test_clean_load_skips_nothing() {
		let dir = scratch_dir("rates-clean");
		let path = write_file(&dir, "rates.csv", "THB,1\nUSD,35\n");

		let table = from_file(&path).unwrap();
		assert!(table.skipped_lines().is_empty());
	}

	#[test]
	fn test_load_missing_file_is_error() {
		let dir = scratch_dir("rates-missing");
		assert!(from_file(&dir.join("nope.csv")).is_err());
	}

	#[test]
	fn test_save_sorted_and_reload() {
		let dir = scratch_dir("rates-save");
		let path = dir.join("rates.csv");

		let mut table = RateTable::new();
		table.set_rate("usd", 35.0).unwrap();
		table.set_rate("jpy", 0.23).unwrap();
		table.set_rate("thb", 1.0).unwrap();
		table.save(&path).unwrap();

		assert_eq!(
			fs::read_to_string(&path).unwrap(),
			"JPY,0.23\nTHB,1\nUSD,35\n"
		);

		let loaded = from_file(&path).unwrap();
		assert_eq!(loaded.get_rate("JPY"), Some(0.23));
		assert_eq!(loaded.get_rate("USD"), Some(35.0));
	}

	#[test]
	fn test_reload_discards_unsaved_changes() {
		let dir = scratch_dir("rates-reload");
		let path = write_file(&dir, "rates.csv", "THB,1\nUSD,35\n");

		let mut table = from_file(&path).unwrap();
		table.set_rate("EUR", 38.5).unwrap();
		table.set_rate("USD", 99.0).unwrap();

		assert_eq!(table.reload().unwrap(), 2);
		assert_eq!(table.get_rate("EUR"), None);
		assert_eq!(table.get_rate("USD"), Some(35.0));
	}

	#[test]
	fn test_reload_without_source() {
		let mut table = RateTable::new();
		assert!(matches!(table.reload(), Err(RateError::NoSource)));
	}
}
