use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TRIPLY_SERVICE_URL: LazyLock<Option<Regex>> = LazyLock::new(|| {
	Regex::new(
		r"^((https?)://(\w+)\.([^/]+\.\w+))/datasets/([^/]+)/([^/]+)/services/([^/]+)/(\w+)/?$",
	)
	.ok()
});

/// The parts of a TriplyDB-style service URL:
/// `https://api.INSTANCE/datasets/ACCOUNT/DATASET/services/SERVICE/KIND`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceLocation {
	pub base_url: String,
	pub instance: String,
	pub account: String,
	pub dataset: String,
	pub service: String,
	pub service_kind: String,
}
impl ServiceLocation {
	pub fn parse(url: &str) -> Option<Self> {
		let captures = TRIPLY_SERVICE_URL.as_ref()?.captures(url.trim())?;
		let group = |index: usize| captures.get(index).map(|m| m.as_str().to_string());

		Some(Self {
			base_url: group(1)?,
			instance: group(4)?,
			account: group(5)?,
			dataset: group(6)?,
			service: group(7)?,
			service_kind: group(8)?,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_triply_service_urls() {
		let location = ServiceLocation::parse(
			"https://api.data.netwerkdigitaalerfgoed.nl/datasets/ld-wizard/sdo/services/sparql/sparql",
		)
		.expect("URL must parse.");

		assert_eq!(location.base_url, "https://api.data.netwerkdigitaalerfgoed.nl");
		assert_eq!(location.instance, "data.netwerkdigitaalerfgoed.nl");
		assert_eq!(location.account, "ld-wizard");
		assert_eq!(location.dataset, "sdo");
		assert_eq!(location.service, "sparql");
		assert_eq!(location.service_kind, "sparql");
	}

	#[test]
	fn rejects_other_urls() {
		assert!(ServiceLocation::parse("https://lov.linkeddata.es/dataset/lov/sparql").is_none());
	}
}
