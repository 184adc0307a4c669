//! Per-query score normalization.

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
	pub scores: Vec<f64>,
	/// Set when the raw scores carried no usable mass and every entry got `1/n`.
	pub even_split: bool,
}

/// Rescales `scores` so they sum to one.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
	let raw: Vec<Option<f64>> = scores.iter().copied().map(Some).collect();

	normalize_scores(&raw).scores
}

/// Like [`normalize`], treating missing, negative and non-finite scores as zero.
///
/// A zero total falls back to an even split instead of dividing by zero.
pub fn normalize_scores(scores: &[Option<f64>]) -> Normalized {
	if scores.is_empty() {
		return Normalized { scores: Vec::new(), even_split: false };
	}

	let sanitized: Vec<f64> = scores
		.iter()
		.map(|score| score.filter(|value| value.is_finite() && *value > 0.0).unwrap_or(0.0))
		.collect();
	let total: f64 = sanitized.iter().sum();

	if total <= 0.0 || !total.is_finite() {
		let share = 1.0 / scores.len() as f64;

		return Normalized { scores: vec![share; scores.len()], even_split: true };
	}

	let scores = sanitized.into_iter().map(|score| score / total).collect();

	Normalized { scores, even_split: false }
}
