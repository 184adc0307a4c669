pub mod render;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use vocrec_config::Config;
use vocrec_service::{CategorySelection, RecommendRequest, RecommenderService};

#[derive(Debug, Parser)]
#[command(
	version = vocrec_cli::VERSION,
	rename_all = "kebab",
	styles = vocrec_cli::styles(),
)]
pub struct Args {
	/// Term to find classes or properties for. Repeat it to recommend for a batch.
	#[arg(
		long,
		short = 't',
		value_name = "TERM",
		num_args = 1..,
		required_unless_present = "list_endpoints"
	)]
	pub search_term: Vec<String>,
	/// `class`, `property` or `all`, once for every term or once per term.
	#[arg(long, short = 'c', value_name = "CATEGORY", num_args = 1.., value_delimiter = ',')]
	pub category: Vec<String>,
	/// Endpoint name, once for every term or once per term.
	#[arg(long, short = 'e', value_name = "NAME", num_args = 1.., value_delimiter = ',')]
	pub endpoint: Vec<String>,
	#[arg(long, short = 'f', value_enum, default_value_t = Format::Text)]
	pub format: Format,
	/// `-v` query headers and selection trace, `-vv` substituted queries, `-vvv` info logs,
	/// `-vvvv` debug logs.
	#[arg(long, short = 'v', action = ArgAction::Count)]
	pub verbose: u8,
	/// Print the configured endpoints and exit.
	#[arg(long, short = 'i')]
	pub list_endpoints: bool,
	#[arg(long, value_name = "FILE")]
	pub config: Option<PathBuf>,
	/// Print the scored candidates of every query without selecting vocabularies.
	#[arg(long)]
	pub single: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
	#[default]
	Text,
	Json,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let (path, cfg) = load_config(args.config.as_deref())?;

	init_tracing(&cfg, args.verbose);

	let output = tokio::select! {
		output = execute(&args, &path, cfg) => output?,
		signal = tokio::signal::ctrl_c() => {
			signal?;

			return Err(eyre::eyre!("Interrupted. The batch was cancelled."));
		},
	};

	print!("{output}");

	Ok(())
}

/// Loads `explicit`, or the default config file, creating the latter when it does not exist.
pub fn load_config(explicit: Option<&Path>) -> color_eyre::Result<(PathBuf, Config)> {
	let path = match explicit {
		Some(path) => path.to_path_buf(),
		None => {
			let path = vocrec_config::default_config_path();

			if vocrec_config::bootstrap(&path)? {
				eprintln!("Created default configuration at {}.", path.display());
			}

			path
		},
	};
	let cfg = vocrec_config::load(&path)?;

	Ok((path, cfg))
}

/// Runs the requested mode and returns what should be printed to stdout.
pub async fn execute(args: &Args, path: &Path, cfg: Config) -> color_eyre::Result<String> {
	if args.list_endpoints {
		return Ok(render::endpoints(path, &cfg)?);
	}

	let req = request(args)?;
	let service = RecommenderService::new(cfg)?;

	tracing::info!(terms = req.search_terms.len(), single = args.single, "Running batch.");

	if args.verbose >= 2 {
		for query in vocrec_service::plan::plan(&service.cfg, &req)? {
			eprintln!(
				"# {} ({}) at {}\n{}\n",
				query.search_term, query.category, query.endpoint.name, query.query
			);
		}
	}
	if args.single {
		let report = service.single_recommendation(&req).await?;

		return match args.format {
			Format::Json => render::json(&report),
			Format::Text => Ok(render::single(&report, args.verbose)?),
		};
	}

	let report = service.homogeneous_recommendation(&req).await?;

	match args.format {
		Format::Json => render::json(&report),
		Format::Text => Ok(render::homogeneous(&report, args.verbose)?),
	}
}

pub fn request(args: &Args) -> color_eyre::Result<RecommendRequest> {
	let categories = args
		.category
		.iter()
		.map(|raw| raw.parse::<CategorySelection>())
		.collect::<Result<Vec<_>, _>>()?;

	Ok(RecommendRequest::new(args.search_term.iter().cloned())
		.with_categories(categories)
		.with_endpoints(args.endpoint.clone()))
}

fn init_tracing(cfg: &Config, verbose: u8) {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) if verbose < 3 => filter,
		_ => {
			let directive = vocrec_cli::log_filter(&cfg.log_level, verbose);

			EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"))
		},
	};

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
