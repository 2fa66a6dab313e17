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
use anyhow::{anyhow, Context, Error};
use dirs::home_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional settings read from `~/.config/xchg/config.toml`. Anything left
/// out falls back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub rates_file: Option<PathBuf>,
	pub history_file: Option<PathBuf>,

	/// Width of the longest bar in the rate chart, in characters
	pub chart_width: Option<usize>,
}

impl Config {
	/// Reads the config from the given path, or from the default location if
	/// none is given. Only an explicitly requested file has to exist.
	pub fn load(custom_path: Option<&Path>) -> Result<Config, Error> {
		let path = match custom_path {
			Some(p) => p.to_path_buf(),
			None => match default_path() {
				Some(p) if p.exists() => p,
				_ => return Ok(Config::default()),
			},
		};

		let content = fs::read_to_string(&path)
			.with_context(|| format!("failed to read {}", path.display()))?;

		Config::parse(&content)
	}

	fn parse(content: &str) -> Result<Config, Error> {
		toml::from_str(content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))
	}
}

fn default_path() -> Option<PathBuf> {
	home_dir().map(|home| home.join(".config/xchg/config.toml"))
}
