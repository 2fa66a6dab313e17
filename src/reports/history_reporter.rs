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
use crate::fx::history::HistoryLog;

pub struct HistoryReporter<'a> {
	history: &'a HistoryLog,
}

impl<'a> HistoryReporter<'a> {
	pub fn new(history: &'a HistoryLog) -> Self {
		Self { history }
	}

	/// Prints every conversion, oldest first.
	pub fn print_history(&self) {
		println!("{}", self.render());
	}

	fn render(&self) -> String {
		if self.history.is_empty() {
			return "No history available".to_string();
		}

		self.history
			.all_records()
			.iter()
			.map(|r| r.to_string())
			.collect::<Vec<_>>()
			.join("\n")
	}
}
