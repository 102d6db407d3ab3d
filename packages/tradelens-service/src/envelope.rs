use serde::Serialize;

use tradelens_storage::ShipmentRow;

use crate::{rankings::RankingKind, search::SearchKind};

/// Response wrapper for row searches.
///
/// The outcome flattens into the envelope, so success and degraded payloads
/// share the top-level `search_type` and `count` keys and differ only in the
/// fields their variant carries.
#[derive(Debug, Serialize)]
pub struct SearchEnvelope {
	pub search_type: SearchKind,
	pub count: usize,
	#[serde(flatten)]
	pub outcome: SearchOutcome,
}
impl SearchEnvelope {
	pub fn rows(search_type: SearchKind, rows: Vec<ShipmentRow>) -> Self {
		let count = rows.len();

		Self { search_type, count, outcome: SearchOutcome::Rows { total_records: count, data: rows } }
	}

	/// One placeholder row per requested name, so a degraded response still
	/// renders a visibly sampled table instead of an empty one.
	pub fn degraded(search_type: SearchKind, names: &[String], error: String) -> Self {
		let data = names
			.iter()
			.map(|name| PlaceholderRow::new(search_type, name.clone()))
			.collect::<Vec<_>>();

		Self { search_type, count: data.len(), outcome: SearchOutcome::Degraded { data, error } }
	}

	pub fn is_degraded(&self) -> bool {
		matches!(self.outcome, SearchOutcome::Degraded { .. })
	}

	pub fn error(&self) -> Option<&str> {
		match &self.outcome {
			SearchOutcome::Rows { .. } => None,
			SearchOutcome::Degraded { error, .. } => Some(error),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
	Rows { data: Vec<ShipmentRow>, total_records: usize },
	Degraded { data: Vec<PlaceholderRow>, error: String },
}

/// Stand-in row emitted when the database cannot be reached.
///
/// The name serializes under the search kind's column key, so a degraded
/// table keeps the column the caller searched on.
#[derive(Debug)]
pub struct PlaceholderRow {
	pub kind: SearchKind,
	pub name: String,
	pub error: &'static str,
	pub sample: bool,
}
impl PlaceholderRow {
	fn new(kind: SearchKind, name: String) -> Self {
		Self { kind, name, error: "Database error", sample: true }
	}
}
impl Serialize for PlaceholderRow {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		use serde::ser::SerializeMap;

		let mut map = serializer.serialize_map(Some(3))?;

		map.serialize_entry(self.kind.placeholder_key(), &self.name)?;
		map.serialize_entry("error", self.error)?;
		map.serialize_entry("sample", &self.sample)?;
		map.end()
	}
}

/// Response wrapper for importer/supplier rankings.
#[derive(Debug, Serialize)]
pub struct RankingEnvelope<T> {
	pub search_type: RankingKind,
	pub count: usize,
	pub products_searched: Vec<String>,
	#[serde(flatten)]
	pub outcome: RankingOutcome<T>,
}
impl<T> RankingEnvelope<T> {
	pub fn rankings(search_type: RankingKind, products_searched: Vec<String>, data: Vec<T>) -> Self {
		Self {
			search_type,
			count: data.len(),
			products_searched,
			outcome: RankingOutcome::Rankings { data },
		}
	}

	/// Degraded rankings carry no placeholder rows, just the error.
	pub fn degraded(search_type: RankingKind, products_searched: Vec<String>, error: String) -> Self {
		Self {
			search_type,
			count: 0,
			products_searched,
			outcome: RankingOutcome::Degraded { data: Vec::new(), error },
		}
	}

	pub fn is_degraded(&self) -> bool {
		matches!(self.outcome, RankingOutcome::Degraded { .. })
	}

	pub fn error(&self) -> Option<&str> {
		match &self.outcome {
			RankingOutcome::Rankings { .. } => None,
			RankingOutcome::Degraded { error, .. } => Some(error),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RankingOutcome<T> {
	Rankings { data: Vec<T> },
	Degraded { data: Vec<T>, error: String },
}
