#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nomdec::types::{DecodeOptions, Ref};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "nomdec", about = "Decode tag-prefixed value token streams")]
struct Cli {
	/// Tracing filter, e.g. `debug` or `nomdec=trace`; overrides `RUST_LOG`.
	#[arg(long, global = true)]
	log_level: Option<String>,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Decode {
		path: PathBuf,
		#[arg(long)]
		packages: Option<PathBuf>,
		#[arg(long)]
		scope: Option<Ref>,
		#[arg(long)]
		max_depth: Option<u32>,
		#[arg(long)]
		max_sequence_len: Option<usize>,
		#[arg(long)]
		json: bool,
	},
	Package {
		path: PathBuf,
		#[arg(long)]
		json: bool,
	},
	Kinds {
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.log_level.as_deref());

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(level: Option<&str>) {
	let filter = match level {
		Some(level) => EnvFilter::new(level),
		None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.init();
}

fn run(command: Commands) -> nomdec::types::Result<()> {
	match command {
		Commands::Decode {
			path,
			packages,
			scope,
			max_depth,
			max_sequence_len,
			json,
		} => {
			let defaults = DecodeOptions::default();
			let options = DecodeOptions {
				max_depth: max_depth.unwrap_or(defaults.max_depth),
				max_sequence_len: max_sequence_len.unwrap_or(defaults.max_sequence_len),
			};
			cmd::decode::run(path, packages, scope, options, json)
		}
		Commands::Package { path, json } => cmd::package::run(path, json),
		Commands::Kinds { json } => cmd::kinds::run(json),
	}
}
