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
use crate::fx::rate_table::RateTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
	#[error("Unknown currency: {0}")]
	UnknownCurrency(String),

	#[error("Amount must be positive")]
	InvalidAmount(f64),

	#[error("Invalid amount: '{0}'")]
	NotANumber(String),
}

/// Converts between any two currencies in a rate table by way of the base
/// unit the rates are expressed in.
pub struct Converter<'a> {
	rates: &'a RateTable,
}

impl<'a> Converter<'a> {
	pub fn new(rates: &'a RateTable) -> Self {
		Self { rates }
	}

	/// Converts `amount` units of `from` into units of `to`.
	///
	/// The amount must be a positive, finite number. Nothing is rounded here;
	/// that is left to whoever displays or stores the result.
	pub fn convert(
		&self,
		from: &str,
		to: &str,
		amount: f64,
	) -> Result<f64, ConvertError> {
		check_amount(amount)?;

		let from_rate = self.lookup(from)?;
		let to_rate = self.lookup(to)?;

		// into base units, then out of them
		Ok(amount * from_rate / to_rate)
	}

	/// Parses an amount typed in by the user, applying the same checks as
	/// convert().
	pub fn parse_amount(text: &str) -> Result<f64, ConvertError> {
		let text = text.trim();
		let amount = text
			.parse::<f64>()
			.map_err(|_| ConvertError::NotANumber(text.to_string()))?;

		check_amount(amount)?;
		Ok(amount)
	}

	fn lookup(&self, code: &str) -> Result<f64, ConvertError> {
		self.rates.get_rate(code).ok_or_else(|| {
			ConvertError::UnknownCurrency(code.trim().to_uppercase())
		})
	}
}

fn check_amount(amount: f64) -> Result<(), ConvertError> {
	if !amount.is_finite() || amount <= 0.0 {
		return Err(ConvertError::InvalidAmount(amount));
	}
	Ok(())
}
