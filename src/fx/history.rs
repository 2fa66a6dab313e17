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
use crate::fx::history_record::HistoryRecord;
use crate::fx::rate_table::{is_blank, line_number};
use crate::store::filesystem;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, warn};
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
	#[error("history file: {0}")]
	Io(#[from] io::Error),

	#[error("history file: {0}")]
	Csv(#[from] csv::Error),
}

/// Every conversion made so far, oldest first. Records are only ever
/// appended; the file on disk is rewritten whole when saved.
#[derive(Debug, Default)]
pub struct HistoryLog {
	records: Vec<HistoryRecord>,
}

impl HistoryLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a record in memory only; call save_to_file() to persist it.
	pub fn add_record(&mut self, record: HistoryRecord) {
		self.records.push(record);
	}

	pub fn all_records(&self) -> &[HistoryRecord] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Replaces the in-memory records with those in the file.
	///
	/// A missing file just means there is no history yet. Lines that cannot
	/// be read as a record are skipped with a warning, so one damaged line
	/// never costs the rest of the log. Returns the number of records read.
	pub fn load_from_file(&mut self, path: &Path) -> Result<usize, HistoryError> {
		self.records.clear();

		let Some(file) = filesystem::open_if_exists(path)? else {
			debug!("no history at {}", path.display());
			return Ok(0);
		};

		// one line per record; a stray quote must not swallow the lines after it
		let mut reader = ReaderBuilder::new()
			.has_headers(false)
			.flexible(true)
			.quoting(false)
			.trim(Trim::All)
			.from_reader(file);

		for result in reader.records() {
			let fields = match result {
				Ok(f) => f,
				Err(e) if e.is_io_error() => return Err(e.into()),
				Err(e) => {
					warn!("{}: skipping unreadable line: {}", path.display(), e);
					continue;
				},
			};

			if is_blank(&fields) {
				continue;
			}

			match HistoryRecord::from_fields(&fields) {
				Ok(record) => self.records.push(record),
				Err(e) => warn!(
					"{}:{}: skipping history record: {}",
					path.display(),
					line_number(&fields),
					e
				),
			}
		}

		debug!(
			"loaded {} history records from {}",
			self.records.len(),
			path.display()
		);
		Ok(self.records.len())
	}

	/// Writes every record to the file, one per line, replacing its contents.
	pub fn save_to_file(&self, path: &Path) -> Result<(), HistoryError> {
		let mut writer = WriterBuilder::new()
			.has_headers(false)
			.from_writer(Vec::new());

		for record in &self.records {
			writer.write_record(record.to_fields())?;
		}

		let contents = writer.into_inner().map_err(|e| e.into_error())?;
		filesystem::replace(path, &contents)?;

		debug!(
			"saved {} history records to {}",
			self.records.len(),
			path.display()
		);
		Ok(())
	}
}
