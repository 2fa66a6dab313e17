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
use chrono::{Local, NaiveDateTime, ParseError, SubsecRound};

/// Fixed, locale-independent format used in the history file.
pub const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format used when showing a timestamp to the user.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Older history files may carry fractional seconds, or omit the seconds
/// entirely when they were zero.
const READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const READ_FORMAT_NO_SECONDS: &str = "%Y-%m-%dT%H:%M";

/// The current local time, truncated to whole seconds so that it survives
/// a trip through the history file unchanged.
pub fn now() -> NaiveDateTime {
	Local::now().naive_local().trunc_subsecs(0)
}

pub fn to_storage(ts: &NaiveDateTime) -> String {
	ts.format(STORAGE_FORMAT).to_string()
}

pub fn to_display(ts: &NaiveDateTime) -> String {
	ts.format(DISPLAY_FORMAT).to_string()
}

/// Parses a timestamp as written by `to_storage`, or by older writers.
pub fn parse(text: &str) -> Result<NaiveDateTime, ParseError> {
	NaiveDateTime::parse_from_str(text, READ_FORMAT).or_else(|e| {
		NaiveDateTime::parse_from_str(text, READ_FORMAT_NO_SECONDS)
			.map_err(|_| e)
	})
}
