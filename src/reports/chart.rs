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

/// Horizontal bar chart of exchange rates, one bar per currency. Bars are
/// scaled so the highest rate fills the full width.
pub struct RateChart<'a> {
	rates: &'a RateTable,
	width: usize,
}

impl<'a> RateChart<'a> {
	pub const DEFAULT_WIDTH: usize = 40;

	pub fn new(rates: &'a RateTable, width: usize) -> Self {
		Self { rates, width }
	}

	pub fn print(&self) {
		println!("{}", self.render());
	}

	pub fn render(&self) -> String {
		let max_rate = self.rates.rates().map(|(_, r)| r).fold(0.0, f64::max);
		if self.rates.is_empty() || max_rate <= 0.0 {
			return "No rates available".to_string();
		}

		let label_width = self
			.rates
			.rates()
			.map(|(code, _)| code.len())
			.max()
			.unwrap_or_default();

		self.rates
			.rates()
			.map(|(code, rate)| {
				let bar = "#".repeat(self.bar_length(rate, max_rate));
				format!(
					"{:<lw$} | {:<bw$} {:.2}",
					code,
					bar,
					rate,
					lw = label_width,
					bw = self.width
				)
			})
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// Every currency gets at least one mark so small rates stay visible.
	fn bar_length(&self, rate: f64, max_rate: f64) -> usize {
		let scaled = (rate / max_rate * self.width as f64).round() as usize;
		scaled.clamp(1, self.width)
	}
}
