//! Text and JSON output of recommendation reports.

use std::{
	fmt::{self, Write},
	path::Path,
};

use serde::Serialize;

use vocrec_config::{Config, triply::ServiceLocation};
use vocrec_domain::{Candidate, Recommendation, SelectionStep};
use vocrec_service::{HomogeneousReport, QueryFailure, SingleReport};

pub fn json<T>(value: &T) -> color_eyre::Result<String>
where
	T: Serialize,
{
	Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

pub fn endpoints(path: &Path, cfg: &Config) -> Result<String, fmt::Error> {
	let mut out = String::new();

	writeln!(out, "Config file: {}", path.display())?;
	writeln!(out, "Default endpoint: {}", cfg.default_endpoint)?;

	for (name, endpoint) in &cfg.endpoints {
		writeln!(out)?;
		writeln!(out, "{name}")?;
		writeln!(out, "  type: {}", endpoint.kind)?;
		writeln!(out, "  url: {}", endpoint.url)?;

		if let Some(location) = ServiceLocation::parse(&endpoint.url) {
			writeln!(out, "  instance: {}", location.instance)?;
			writeln!(out, "  account: {}", location.account)?;
			writeln!(out, "  dataset: {}", location.dataset)?;
			writeln!(out, "  service: {} ({})", location.service, location.service_kind)?;
		}
	}

	Ok(out)
}

/// `verbose >= 1` adds the query list, vocabulary scores and the selection trace.
pub fn homogeneous(report: &HomogeneousReport, verbose: u8) -> Result<String, fmt::Error> {
	let mut out = String::new();

	writeln!(out, "Instance recommendations")?;
	recommendations(&mut out, &report.instance_recommendations)?;
	writeln!(out)?;
	writeln!(out, "Vocabulary recommendations")?;
	recommendations(&mut out, &report.vocabulary_recommendations)?;

	if verbose >= 1 {
		writeln!(out)?;
		writeln!(out, "Queries")?;

		for query in &report.queries {
			writeln!(
				out,
				"  {} ({}) at {}: {} hits",
				query.search_term, query.category, query.endpoint, query.hits
			)?;
		}

		writeln!(out)?;
		writeln!(out, "Vocabulary scores")?;

		for entry in report.vocabulary_scores.entries() {
			writeln!(
				out,
				"  {}  {:.3}  ({} candidates)",
				entry.vocabulary, entry.score, entry.candidate_count
			)?;
		}

		writeln!(out)?;
		writeln!(out, "Selection")?;

		for step in &report.selection.trace {
			let vocabulary = step.vocabulary();

			match step {
				SelectionStep::Kept { required_by, .. } => {
					writeln!(out, "  kept {vocabulary} (required by {})", required_by.join(", "))?
				},
				SelectionStep::Dropped { .. } => writeln!(out, "  dropped {vocabulary}")?,
			}
		}
	}

	writeln!(out)?;
	writeln!(out, "Candidates")?;

	for result in &report.results {
		writeln!(out, "  {}", result.search_term)?;

		if result.homogeneous.is_empty() {
			writeln!(out, "    (none)")?;
		}

		for candidate in &result.homogeneous {
			candidate_line(&mut out, "    ", candidate)?;
		}
	}

	failures(&mut out, &report.failures)?;

	Ok(out)
}

/// `verbose >= 1` groups the candidates under a header per query.
pub fn single(report: &SingleReport, verbose: u8) -> Result<String, fmt::Error> {
	let mut out = String::new();

	for outcome in &report.queries {
		if verbose >= 1 {
			writeln!(
				out,
				"# {} ({}) at {}: {} hits",
				outcome.search_term,
				outcome.category,
				outcome.endpoint.name,
				outcome.candidates.len()
			)?;

			for candidate in &outcome.candidates {
				candidate_line(&mut out, "  ", candidate)?;
			}

			writeln!(out)?;

			continue;
		}

		let indent = format!("{}  ", outcome.search_term);

		for candidate in &outcome.candidates {
			candidate_line(&mut out, &indent, candidate)?;
		}
	}

	failures(&mut out, &report.failures)?;

	Ok(out)
}

fn recommendations(out: &mut String, recommendations: &[Recommendation]) -> fmt::Result {
	for recommendation in recommendations {
		match &recommendation.candidate {
			Some(candidate) => writeln!(
				out,
				"  {}  {}  {}  {}",
				recommendation.search_term,
				candidate.vocabulary,
				score(candidate.score),
				candidate.iri
			)?,
			None => writeln!(out, "  {}  (no candidate)", recommendation.search_term)?,
		}
	}

	Ok(())
}

fn candidate_line(out: &mut String, indent: &str, candidate: &Candidate) -> fmt::Result {
	writeln!(
		out,
		"{indent}[{}] {}  {}  {}  (raw {})",
		candidate.category,
		candidate.vocabulary,
		score(candidate.score),
		candidate.iri,
		score(candidate.raw_score)
	)?;

	if let Some(label) = &candidate.label {
		writeln!(out, "{indent}    label: {label}")?;
	}
	if let Some(description) = &candidate.description {
		writeln!(out, "{indent}    description: {}", description.trim())?;
	}

	Ok(())
}

fn failures(out: &mut String, failures: &[QueryFailure]) -> fmt::Result {
	if failures.is_empty() {
		return Ok(());
	}

	writeln!(out)?;
	writeln!(out, "Failed queries")?;

	for failure in failures {
		writeln!(
			out,
			"  {} ({}) at {}: {}",
			failure.search_term, failure.category, failure.endpoint, failure.message
		)?;
	}

	Ok(())
}

fn score(value: Option<f64>) -> String {
	match value {
		Some(value) => format!("{value:.3}"),
		None => "-".to_string(),
	}
}
