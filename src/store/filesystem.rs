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
use std::ffi::OsString;
use std::fs;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Opens the file for reading, or returns None if it does not exist.
pub fn open_if_exists(path: &Path) -> io::Result<Option<File>> {
	match File::open(path) {
		Ok(file) => Ok(Some(file)),
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(e),
	}
}

/// Replaces the contents of the file at `path` in one step.
///
/// The data is first written to a sibling file, which is then renamed over
/// the target, so an interrupted write leaves either the old file or the new
/// one but never a truncated mix of both.
pub fn replace(path: &Path, contents: &[u8]) -> io::Result<()> {
	let staging = staging_path(path);

	if let Err(e) = fs::write(&staging, contents) {
		let _ = fs::remove_file(&staging);
		return Err(e);
	}

	fs::rename(&staging, path).inspect_err(|_| {
		let _ = fs::remove_file(&staging);
	})
}

fn staging_path(path: &Path) -> PathBuf {
	let mut name = OsString::from(path.as_os_str());
	name.push(".tmp");
	PathBuf::from(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::scratch_dir;

	#[test]
	fn test_open_missing_file() {
		let dir = scratch_dir("fs-missing");
		assert!(open_if_exists(&dir.join("nothing.csv")).unwrap().is_none());
	}

	#[test]
	fn test_replace_overwrites() {
		let dir = scratch_dir("fs-replace");
		let path = dir.join("rates.csv");

		replace(&path, b"USD,1\nEUR,2\n").unwrap();
		replace(&path, b"THB,1\n").unwrap();

		assert_eq!(fs::read_to_string(&path).unwrap(), "THB,1\n");
		assert!(!staging_path(&path).exists());
	}

	#[test]
	fn test_staging_path_is_sibling() {
		let path = Path::new("data/history.csv");
		assert_eq!(staging_path(path), PathBuf::from("data/history.csv.tmp"));
	}
}
