//! Maps result IRIs to vocabulary identifiers.

use std::collections::HashMap;

const SEPARATORS: [char; 3] = ['/', '#', ':'];

/// Registered vocabulary namespaces and their preferred prefixes.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
	by_namespace: HashMap<String, String>,
}
impl PrefixTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Later pairs win when a namespace is listed twice.
	pub fn from_pairs<I, N, P>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (N, P)>,
		N: Into<String>,
		P: Into<String>,
	{
		let mut table = Self::new();

		for (namespace, prefix) in pairs {
			table.insert(namespace, prefix);
		}

		table
	}

	pub fn insert(&mut self, namespace: impl Into<String>, prefix: impl Into<String>) {
		self.by_namespace.insert(namespace.into(), prefix.into());
	}

	pub fn lookup(&self, namespace: &str) -> Option<&str> {
		self.by_namespace.get(namespace).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.by_namespace.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_namespace.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
	pub prefix: Option<String>,
	pub namespace: String,
}
impl Attribution {
	pub fn vocabulary(&self) -> &str {
		self.prefix.as_deref().unwrap_or(&self.namespace)
	}
}

/// The IRI up to and including its last `/`, `#` or `:`; the whole IRI when it has none.
pub fn namespace_of(iri: &str) -> &str {
	match iri.rfind(SEPARATORS) {
		Some(index) => &iri[..=index],
		None => iri,
	}
}

pub fn attribute(table: &PrefixTable, iri: &str) -> Attribution {
	let namespace = namespace_of(iri);
	let mut probe = namespace;

	while !probe.is_empty() {
		if let Some(prefix) = table.lookup(probe) {
			return Attribution {
				prefix: Some(prefix.to_string()),
				namespace: namespace.to_string(),
			};
		}

		// Registries list some namespaces shorter than the IRI's own namespace.
		let Some(last) = probe.chars().next_back() else {
			break;
		};

		probe = &probe[..probe.len() - last.len_utf8()];
	}

	Attribution { prefix: None, namespace: namespace.to_string() }
}

/// Memoizing wrapper around [`attribute`] for one batch.
#[derive(Debug)]
pub struct Attributor<'a> {
	table: &'a PrefixTable,
	cache: HashMap<String, Attribution>,
}
impl<'a> Attributor<'a> {
	pub fn new(table: &'a PrefixTable) -> Self {
		Self { table, cache: HashMap::new() }
	}

	pub fn attribute(&mut self, iri: &str) -> Attribution {
		let namespace = namespace_of(iri);

		if let Some(hit) = self.cache.get(namespace) {
			return hit.clone();
		}

		let attribution = attribute(self.table, iri);

		self.cache.insert(namespace.to_string(), attribution.clone());

		attribution
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn table() -> PrefixTable {
		PrefixTable::from_pairs([
			("http://xmlns.com/foaf/0.1/", "foaf"),
			("http://www.w3.org/ns/person", "person"),
			("urn:isbn:", "isbn"),
		])
	}

	#[test]
	fn splits_namespaces_on_the_last_separator() {
		assert_eq!(namespace_of("http://xmlns.com/foaf/0.1/Person"), "http://xmlns.com/foaf/0.1/");
		assert_eq!(namespace_of("http://www.w3.org/ns/person#Person"), "http://www.w3.org/ns/person#");
		assert_eq!(namespace_of("urn:isbn:0451450523"), "urn:isbn:");
		assert_eq!(namespace_of("Person"), "Person");
	}

	#[test]
	fn resolves_registered_prefix() {
		let attribution = attribute(&table(), "http://xmlns.com/foaf/0.1/Person");

		assert_eq!(attribution.vocabulary(), "foaf");
		assert_eq!(attribution.namespace, "http://xmlns.com/foaf/0.1/");
	}

	#[test]
	fn retries_without_trailing_separator() {
		let attribution = attribute(&table(), "http://www.w3.org/ns/person#Person");

		assert_eq!(attribution.prefix.as_deref(), Some("person"));
	}

	#[test]
	fn shortens_namespace_until_a_registered_prefix_matches() {
		let foo_table = PrefixTable::from_pairs([("https://w3id.org/def/foo", "foo")]);
		let attribution = attribute(&foo_table, "https://w3id.org/def/foo/v1/Thing");

		assert_eq!(attribution.vocabulary(), "foo");
		assert_eq!(attribution.namespace, "https://w3id.org/def/foo/v1/");
		assert_eq!(attribute(&table(), "urn:isbn:x/y").prefix.as_deref(), Some("isbn"));
	}

	#[test]
	fn falls_back_to_namespace() {
		let attribution = attribute(&table(), "https://schema.org/Person");

		assert_eq!(attribution.prefix, None);
		assert_eq!(attribution.vocabulary(), "https://schema.org/");
	}

	#[test]
	fn empty_iri_yields_empty_identifier() {
		assert_eq!(attribute(&table(), "").vocabulary(), "");
	}

	#[test]
	fn memoized_results_match_direct_attribution() {
		let table = table();
		let mut attributor = Attributor::new(&table);

		for iri in [
			"http://xmlns.com/foaf/0.1/Person",
			"http://xmlns.com/foaf/0.1/knows",
			"https://schema.org/Person",
			"https://schema.org/Person",
		] {
			assert_eq!(attributor.attribute(iri), attribute(&table, iri));
		}
	}
}
