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
/// Column-aligned table printer shared by the listing commands.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows
			.push(Row::Data(row.into_iter().map(|s| s.to_string()).collect()));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn print(&self) {
		println!();
		println!("{}", self.render());
	}

	/// Lays the table out as text, one line per row, without trailing spaces.
	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate() {
					max_widths[i] = max_widths[i].max(value.chars().count());
				}
			}
		}

		let lines: Vec<String> = self
			.rows
			.iter()
			.map(|row| match row {
				Row::Header(cells) => self.render_header(&max_widths, cells),
				Row::Data(cells) => self.render_data(&max_widths, cells),
				Row::Separator => self.render_separator(&max_widths),
			})
			.map(|line| line.trim_end().to_string())
			.collect();

		lines.join("\n")
	}

	fn render_data(&self, max_widths: &[usize], cells: &[String]) -> String {
		cells
			.iter()
			.enumerate()
			.map(|(i, value)| {
				if self.right_align[i] {
					format!("{:>width$}", value, width = max_widths[i])
				} else {
					format!("{:<width$}", value, width = max_widths[i])
				}
			})
			.collect::<Vec<_>>()
			.join("   ")
	}

	fn render_header(&self, max_widths: &[usize], cells: &[String]) -> String {
		cells
			.iter()
			.enumerate()
			.map(|(i, value)| format!("{:^width$}", value, width = max_widths[i]))
			.collect::<Vec<_>>()
			.join(" | ")
	}

	fn render_separator(&self, max_widths: &[usize]) -> String {
		let total_width: usize =
			max_widths.iter().sum::<usize>() + (3 * (self.column_count - 1));
		"-".repeat(total_width)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_alignment() {
		let mut table = Table::new(2);
		table.add_header(vec!["Code", "Rate"]);
		table.add_separator();
		table.add_row(vec!["EUR", "38.5"]);
		table.add_row(vec!["THB", "1"]);
		table.right_align(vec![1]);

		assert_eq!(
			table.render(),
			"Code | Rate\n\
			 -----------\n\
			 EUR    38.5\n\
			 THB       1"
		);
	}

	#[test]
	fn test_centered_header() {
		let mut table = Table::new(2);
		table.add_header(vec!["A", "B"]);
		table.add_row(vec!["long", "x"]);

		assert_eq!(table.render(), " A   | B\nlong   x");
	}
}
