use time::Date;

use crate::{
	Error, Result,
	models::{DateMode, SearchFilters},
};

/// A value bound into a query rather than interpolated into its text.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
	Int(i64),
	Text(String),
	Date(Date),
}

/// Finished SQL plus its bind values, labeled for diagnostics.
#[derive(Clone, Debug)]
pub struct BuiltQuery {
	pub sql: String,
	pub params: Vec<(String, SqlValue)>,
}

/// Accumulates `AND`-joined predicates onto a base statement.
///
/// Every bind renders as a positional `$n` placeholder in the order it was
/// added; the label never reaches the SQL text.
pub struct PredicateBuilder {
	sql: String,
	params: Vec<(String, SqlValue)>,
}
impl PredicateBuilder {
	pub fn new(base: impl Into<String>) -> Self {
		Self { sql: base.into(), params: Vec::new() }
	}

	/// Registers a bind value and returns its `$n` placeholder.
	pub fn bind(&mut self, label: impl Into<String>, value: SqlValue) -> String {
		self.params.push((label.into(), value));

		format!("${}", self.params.len())
	}

	pub fn push_sql(&mut self, fragment: &str) {
		self.sql.push_str(fragment);
	}

	pub fn param_count(&self) -> usize {
		self.params.len()
	}

	fn bind_filter(&mut self, value: SqlValue) -> String {
		let label = format!("filter_param_{}", self.params.len());

		self.bind(label, value)
	}

	/// Appends the shared shipment filters: HS code, importer id, port name,
	/// and the registration-date window.
	///
	/// Empty or whitespace-only filter values are treated as absent.
	pub fn apply_filters(&mut self, filters: &SearchFilters) -> Result<()> {
		if let Some(raw) = filters.hs_code.as_deref().filter(|raw| !raw.trim().is_empty()) {
			let placeholder = self.bind_filter(SqlValue::Int(parse_hs_code(raw)?));

			self.push_sql(&format!(" AND hs_code = {placeholder}"));
		}
		if let Some(id) = filters.importer_id.as_deref().filter(|id| !id.trim().is_empty()) {
			let placeholder = self.bind_filter(SqlValue::Text(format!("%{id}%")));

			self.push_sql(&format!(" AND importer_id LIKE {placeholder}"));
		}
		if let Some(port) = filters.port_name.as_deref().filter(|port| !port.trim().is_empty()) {
			let indian = self.bind_filter(SqlValue::Text(format!("%{port}%")));
			let foreign = self.bind_filter(SqlValue::Text(format!("%{port}%")));

			self.push_sql(&format!(
				" AND (indian_port LIKE {indian} OR foreign_port LIKE {foreign})"
			));
		}

		match filters.date_mode {
			DateMode::Single =>
				if let Some(date) = filters.single_date {
					let placeholder = self.bind_filter(SqlValue::Date(date));

					self.push_sql(&format!(" AND reg_date = {placeholder}"));
				},
			DateMode::Range => {
				if let Some(date) = filters.start_date {
					let placeholder = self.bind_filter(SqlValue::Date(date));

					self.push_sql(&format!(" AND reg_date >= {placeholder}"));
				}
				if let Some(date) = filters.end_date {
					let placeholder = self.bind_filter(SqlValue::Date(date));

					self.push_sql(&format!(" AND reg_date <= {placeholder}"));
				}
			},
		}

		Ok(())
	}

	pub fn build(self) -> BuiltQuery {
		BuiltQuery { sql: self.sql, params: self.params }
	}
}

/// Coerces a raw HS-code filter to the integer column type.
pub fn parse_hs_code(raw: &str) -> Result<i64> {
	raw.trim()
		.parse()
		.map_err(|_| Error::InvalidArgument(format!("HS code {raw:?} is not numeric.")))
}
