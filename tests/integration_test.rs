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
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

const CONFIG: &str = "tests/test_data/config.toml";
const RATES: &str = "tests/test_data/rates.csv";

/// Dynamically collects test cases from a given directory.
fn collect_test_cases(subfolder: &str) -> Vec<(String, String)> {
	let dir_path = format!("tests/test_data/{}", subfolder);

	let mut test_cases = vec![];

	if let Ok(entries) = fs::read_dir(&dir_path) {
		let mut inputs = vec![];
		let mut outputs = vec![];

		for entry in entries.flatten() {
			let file_name =
				entry.file_name().into_string().unwrap_or_default();
			if file_name.ends_with("_in.txt") {
				inputs.push(file_name);
			} else if file_name.ends_with("_out.txt") {
				outputs.push(file_name);
			}
		}

		inputs.sort();
		outputs.sort();

		// Pair inputs with corresponding outputs
		for input_file in inputs {
			let output_file = input_file.replace("_in.txt", "_out.txt");
			if outputs.contains(&output_file) {
				test_cases.push((input_file, output_file));
			}
		}
	}

	test_cases
}

/// Fresh directory for tests that need the binary to write files.
fn scratch_dir(name: &str) -> PathBuf {
	let dir = std::env::temp_dir()
		.join(format!("xchg-it-{}-{}", name, std::process::id()));
	let _ = fs::remove_dir_all(&dir);
	fs::create_dir_all(&dir).expect("Failed to create scratch directory");
	dir
}

fn run(args: &[&str]) -> Output {
	let all_args =
		[vec!["run", "--", "--config", CONFIG], args.to_vec()].concat();

	Command::new("cargo")
		.args(all_args)
		.output()
		.expect("Failed to execute process")
}

#[test]
fn test_integration_rates() {
	let test_cases = collect_test_cases("rates");
	execute("rates", test_cases, "--rates", "rates");
}

#[test]
fn test_integration_chart() {
	let test_cases = collect_test_cases("chart");
	execute("chart", test_cases, "--rates", "chart");
}

#[test]
fn test_integration_history() {
	let test_cases = collect_test_cases("history");
	execute("history", test_cases, "--history", "history");
}

#[test]
fn test_integration_convert_records_history() {
	let dir = scratch_dir("convert");
	let history = dir.join("history.csv");
	let history = history.to_str().unwrap();

	let output =
		run(&["-r", RATES, "-H", history, "convert", "10", "usd", "THB"]);
	assert!(
		output.status.success(),
		"convert failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	assert_eq!(
		String::from_utf8_lossy(&output.stdout).trim(),
		"10.00 USD = 350.00 THB"
	);

	let output =
		run(&["-r", RATES, "-H", history, "convert", "350", "THB", "USD"]);
	assert!(output.status.success());
	assert_eq!(
		String::from_utf8_lossy(&output.stdout).trim(),
		"350.00 THB = 10.00 USD"
	);

	let written = fs::read_to_string(history).unwrap();
	let lines: Vec<&str> = written.lines().collect();
	assert_eq!(lines.len(), 2);
	assert!(lines[0].starts_with("USD,THB,10.00,350.00,"), "{}", lines[0]);
	assert!(lines[1].starts_with("THB,USD,350.00,10.00,"), "{}", lines[1]);
}

#[test]
fn test_integration_convert_failures_leave_no_history() {
	let dir = scratch_dir("convert-fail");
	let history = dir.join("history.csv");

	for args in [
		vec!["convert", "10", "ZZZ", "USD"],
		vec!["convert", "ten", "THB", "USD"],
		vec!["convert", "--", "-5", "THB", "USD"],
		vec!["convert", "0", "THB", "USD"],
	] {
		let all_args =
			[vec!["-r", RATES, "-H", history.to_str().unwrap()], args.clone()]
				.concat();
		let output = run(&all_args);

		assert!(
			!output.status.success(),
			"{:?} unexpectedly succeeded!",
			args
		);
		assert!(!history.exists(), "{:?} wrote history", args);
	}
}

#[test]
fn test_integration_set_rate() {
	let dir = scratch_dir("set");
	let rates = dir.join("rates.csv");
	fs::copy(RATES, &rates).unwrap();
	let rates = rates.to_str().unwrap();

	let output = run(&["-r", rates, "set", "gbp", "44.25"]);
	assert!(
		output.status.success(),
		"set failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	assert_eq!(
		fs::read_to_string(rates).unwrap(),
		"EUR,38.5\nGBP,44.25\nJPY,0.23\nTHB,1\nUSD,35\n"
	);

	let output = run(&["-r", rates, "set", "USD", "-1"]);
	assert!(!output.status.success(), "negative rate was accepted");
	assert!(fs::read_to_string(rates).unwrap().contains("USD,35\n"));
}

fn execute(
	subfolder: &str,
	test_cases: Vec<(String, String)>,
	file_flag: &str,
	cmd: &str,
) {
	for (input_file, expected_output_file) in test_cases {
		println!("running for {}...", input_file);

		let loc = format!("{}/{}/{}", "tests/test_data", subfolder, input_file);

		let mut args = vec![];
		if file_flag != "--rates" {
			args.extend(["--rates", RATES]);
		}
		args.extend([file_flag, loc.as_str(), cmd]);
		let output = run(&args);

		assert!(
			output.status.success(),
			"{} failed processing: {}",
			input_file,
			String::from_utf8_lossy(&output.stderr)
		);

		let stdout = String::from_utf8_lossy(&output.stdout);

		let expected_output = fs::read_to_string(format!(
			"{}/{}/{}",
			"tests/test_data", subfolder, expected_output_file
		))
		.expect("Failed to read expected output file");

		assert_eq!(
			stdout.trim(),
			expected_output.trim(),
			"Output did not match for {}; expected:\n{}\ngot:\n{}",
			input_file,
			expected_output.trim(),
			stdout.trim()
		);
	}
}
