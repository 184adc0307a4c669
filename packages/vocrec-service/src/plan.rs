use std::{
	collections::HashMap,
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};
use vocrec_config::{Config, Endpoint, templates};
use vocrec_domain::Category;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySelection {
	Class,
	Property,
	#[default]
	All,
}
impl CategorySelection {
	/// Categories to query, class first.
	pub fn categories(self) -> &'static [Category] {
		match self {
			Self::Class => &[Category::Class],
			Self::Property => &[Category::Property],
			Self::All => &[Category::Class, Category::Property],
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Property => "property",
			Self::All => "all",
		}
	}
}
impl Display for CategorySelection {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for CategorySelection {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"class" => Ok(Self::Class),
			"property" => Ok(Self::Property),
			"all" | "" => Ok(Self::All),
			other => Err(Error::InvalidRequest {
				message: format!("Unknown category `{other}`. Choose one of: class, property, all."),
			}),
		}
	}
}

/// Search terms with optional per-term categories and endpoint names.
///
/// `categories` and `endpoints` are either empty, a single value applied to every term, or one
/// value per term.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
	pub search_terms: Vec<String>,
	#[serde(default)]
	pub categories: Vec<CategorySelection>,
	#[serde(default)]
	pub endpoints: Vec<String>,
}
impl RecommendRequest {
	pub fn new<I, S>(search_terms: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			search_terms: search_terms.into_iter().map(Into::into).collect(),
			categories: Vec::new(),
			endpoints: Vec::new(),
		}
	}

	pub fn with_categories(mut self, categories: Vec<CategorySelection>) -> Self {
		self.categories = categories;

		self
	}

	pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Distinct search terms in first-appearance order.
	pub fn distinct_terms(&self) -> Vec<&str> {
		let mut terms: Vec<&str> = Vec::with_capacity(self.search_terms.len());

		for term in &self.search_terms {
			if !terms.contains(&term.as_str()) {
				terms.push(term);
			}
		}

		terms
	}
}

/// One fully substituted query against one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedQuery {
	pub search_term: String,
	pub category: Category,
	pub endpoint: Endpoint,
	pub query: String,
}

/// Expands a request into queries, one per term and category, in request order.
///
/// Terms without an endpoint use the configured default. Every endpoint is resolved before any
/// query is built, so an unknown name fails the whole request.
pub fn plan(cfg: &Config, req: &RecommendRequest) -> Result<Vec<PlannedQuery>> {
	if req.search_terms.is_empty() {
		return Err(Error::InvalidRequest {
			message: "At least one search term is required.".to_string(),
		});
	}
	if req.search_terms.iter().any(|term| term.trim().is_empty()) {
		return Err(Error::InvalidRequest {
			message: "Search terms must not be empty.".to_string(),
		});
	}

	check_alignment("categories", req.categories.len(), req.search_terms.len())?;
	check_alignment("endpoints", req.endpoints.len(), req.search_terms.len())?;

	let mut resolved: HashMap<&str, Endpoint> = HashMap::new();

	if req.endpoints.is_empty() {
		resolved.insert(cfg.default_endpoint.as_str(), cfg.resolve_default_endpoint()?);
	}

	for name in &req.endpoints {
		if !resolved.contains_key(name.as_str()) {
			resolved.insert(name.as_str(), cfg.resolve_endpoint(name)?);
		}
	}

	let mut queries = Vec::new();

	for (index, search_term) in req.search_terms.iter().enumerate() {
		let selection = aligned(&req.categories, index).copied().unwrap_or_default();
		let name =
			aligned(&req.endpoints, index).map_or(cfg.default_endpoint.as_str(), String::as_str);
		let endpoint = resolved.get(name).ok_or_else(|| Error::InvalidRequest {
			message: format!("Endpoint `{name}` was not resolved."),
		})?;

		for category in selection.categories() {
			let template = match category {
				Category::Class => &endpoint.query_class,
				Category::Property => &endpoint.query_property,
			};

			queries.push(PlannedQuery {
				search_term: search_term.clone(),
				category: *category,
				endpoint: endpoint.clone(),
				query: templates::render(template, endpoint.kind, search_term),
			});
		}
	}

	Ok(queries)
}

fn check_alignment(field: &str, len: usize, terms: usize) -> Result<()> {
	if len > 1 && len != terms {
		return Err(Error::InvalidRequest {
			message: format!(
				"{field} must hold one value or one per search term; got {len} for {terms} terms."
			),
		});
	}

	Ok(())
}

fn aligned<T>(values: &[T], index: usize) -> Option<&T> {
	match values.len() {
		0 => None,
		1 => values.first(),
		_ => values.get(index),
	}
}
