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
use crate::reports::table::Table;

pub struct RateReporter<'a> {
	rates: &'a RateTable,
}

impl<'a> RateReporter<'a> {
	pub fn new(rates: &'a RateTable) -> RateReporter<'a> {
		Self { rates }
	}

	pub fn print_all_rates(&self) {
		if self.rates.is_empty() {
			println!("No rates available");
			return;
		}
		self.table().print();
	}

	fn table(&self) -> Table {
		let mut table = Table::new(2);

		table.add_header(vec!["Code", "Rate"]);
		table.add_separator();
		table.right_align(vec![1]);

		for (code, rate) in self.rates.rates() {
			table.add_row(vec![code, &rate.to_string()]);
		}

		table
	}
}
