use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use log::{debug, info, LevelFilter, warn};
use raw_class_file::{ClassFile, ParserOptions, UnknownAttributePolicy};

mod javap;

/// Prints class files like `javap -verbose` does.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
	/// Log more, can be given up to three times
	#[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
	verbose: u8,

	/// Keep attributes with unknown names, instead of failing on them
	#[arg(long = "keep-unknown-attributes")]
	keep_unknown_attributes: bool,

	/// How deep attributes may be nested inside each other, counting the top level ones as 1
	#[arg(long = "max-attribute-depth", default_value_t = 8)]
	max_attribute_depth: usize,

	/// Write each class file again, and check that the same bytes come out
	#[arg(long = "roundtrip")]
	roundtrip: bool,

	/// Directory to write the written class files to
	#[arg(short = 'o', long = "output")]
	output: Option<PathBuf>,

	/// The class files to print
	#[arg(required = true)]
	files: Vec<PathBuf>,
}

fn setup_logger(verbose: u8) -> Result<()> {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(level)
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	setup_logger(cli.verbose)?;

	let options = ParserOptions {
		unknown_attributes: if cli.keep_unknown_attributes {
			UnknownAttributePolicy::Preserve
		} else {
			UnknownAttributePolicy::Reject
		},
		max_attribute_depth: cli.max_attribute_depth,
	};

	if let Some(output) = &cli.output {
		std::fs::create_dir_all(output)
			.with_context(|| format!("failed to create output directory {output:?}"))?;
	}

	let mut mismatches = Vec::new();
	for path in &cli.files {
		let bytes = std::fs::read(path)
			.with_context(|| format!("failed to read {path:?}"))?;
		let class = ClassFile::read_with_options(&mut bytes.as_slice(), options.clone())
			.with_context(|| format!("failed to parse class file {path:?}"))?;
		debug!("read {path:?}, {} bytes", bytes.len());

		let listing = javap::render(&class)
			.with_context(|| format!("failed to print class file {path:?}"))?;
		print!("{listing}");

		if cli.roundtrip || cli.output.is_some() {
			let written = class.to_bytes()
				.with_context(|| format!("failed to write class file {path:?}"))?;

			if cli.roundtrip {
				match first_difference(&bytes, &written) {
					None => info!("{path:?} round trips"),
					Some(offset) => {
						warn!("{path:?} differs after writing it again, first at byte {offset:#x}");
						mismatches.push(path.clone());
					},
				}
			}

			if let Some(output) = &cli.output {
				write_output(output, path, &written)?;
			}
		}
	}

	if !mismatches.is_empty() {
		bail!("{} class file(s) didn't round trip: {mismatches:?}", mismatches.len());
	}
	Ok(())
}

fn write_output(output: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
	let name = path.file_name()
		.with_context(|| format!("{path:?} has no file name"))?;
	let target = output.join(name);
	std::fs::write(&target, bytes)
		.with_context(|| format!("failed to write {target:?}"))?;
	info!("wrote {target:?}");
	Ok(())
}

/// The offset of the first byte that's different, or the length of the shorter one if one is a prefix of the other.
fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
	match a.iter().zip(b).position(|(a, b)| a != b) {
		Some(offset) => Some(offset),
		None if a.len() != b.len() => Some(a.len().min(b.len())),
		None => None,
	}
}
