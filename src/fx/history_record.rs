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
use crate::util::amount::Amount;
use crate::util::timestamp;
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::fmt;
use thiserror::Error;

/// Fields per line of the history file.
pub const FIELD_COUNT: usize = 5;

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
	#[error("expected 5 fields, found {0}")]
	FieldCount(usize),

	#[error("bad {field} '{value}'")]
	Number { field: &'static str, value: String },

	#[error("bad timestamp '{0}'")]
	Timestamp(String),
}

/// One completed conversion. Never changes once created.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRecord {
	from: String,
	to: String,
	amount: f64,
	result: f64,
	timestamp: NaiveDateTime,
}

impl HistoryRecord {
	/// Records a conversion that happened just now.
	pub fn new(from: &str, to: &str, amount: f64, result: f64) -> Self {
		Self::at(from, to, amount, result, timestamp::now())
	}

	pub fn at(
		from: &str,
		to: &str,
		amount: f64,
		result: f64,
		timestamp: NaiveDateTime,
	) -> Self {
		Self {
			from: from.to_string(),
			to: to.to_string(),
			amount,
			result,
			timestamp,
		}
	}

	pub fn from(&self) -> &str {
		&self.from
	}

	pub fn to(&self) -> &str {
		&self.to
	}

	pub fn amount(&self) -> f64 {
		self.amount
	}

	pub fn result(&self) -> f64 {
		self.result
	}

	pub fn timestamp(&self) -> &NaiveDateTime {
		&self.timestamp
	}

	/// Reads a record from the fields of one history line:
	/// `from,to,amount,result,timestamp`.
	pub fn from_fields(fields: &StringRecord) -> Result<Self, RecordError> {
		if fields.len() != FIELD_COUNT {
			return Err(RecordError::FieldCount(fields.len()));
		}

		let amount = parse_number("amount", &fields[2])?;
		let result = parse_number("result", &fields[3])?;
		let timestamp = timestamp::parse(&fields[4])
			.map_err(|_| RecordError::Timestamp(fields[4].to_string()))?;

		Ok(Self::at(&fields[0], &fields[1], amount, result, timestamp))
	}

	/// The fields of this record as written to the history file. Amounts
	/// are rounded to two decimal places here and nowhere else.
	pub fn to_fields(&self) -> [String; FIELD_COUNT] {
		[
			self.from.clone(),
			self.to.clone(),
			format!("{:.2}", self.amount),
			format!("{:.2}", self.result),
			timestamp::to_storage(&self.timestamp),
		]
	}
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, RecordError> {
	value.parse::<f64>().map_err(|_| RecordError::Number {
		field,
		value: value.to_string(),
	})
}

impl fmt::Display for HistoryRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"[{}] {} → {}",
			timestamp::to_display(&self.timestamp),
			Amount::new(self.amount, &self.from),
			Amount::new(self.result, &self.to)
		)
	}
}
