use serde::Serialize;

use tradelens_storage::{
	BuiltQuery, PredicateBuilder, SearchFilters, ShipmentRow, SqlValue, parse_hs_code,
};

use crate::{Error, Result, SearchService, envelope::SearchEnvelope};

/// Hard cap on rows returned by any row search.
pub const ROW_LIMIT: u32 = 1_000;

const SHIPMENT_COLUMNS: &str = "\
system_id, reg_date, month_year, hs_code, chapter, unique_product_name, quantity, \
unit_quantity, unit_price_usd, total_value_usd, importer_id, true_importer_name, city, \
cha_number, type, true_supplier_name, indian_port, foreign_port, origin_country, \
exchange_rate_usd, duty, product_name, supplier_name, supplier_address, target_date, id, \
importer";

/// What the requested names select on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
	ProductName,
	UniqueProductName,
	/// Matches either the importer or the supplier column.
	Entity,
	HsCode,
}
impl SearchKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ProductName => "product_name",
			Self::UniqueProductName => "unique_product_name",
			Self::Entity => "entity",
			Self::HsCode => "hs_code",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Some(match raw {
			"product_name" => Self::ProductName,
			"unique_product_name" => Self::UniqueProductName,
			"entity" => Self::Entity,
			"hs_code" => Self::HsCode,
			_ => return None,
		})
	}

	/// JSON key a degraded placeholder row carries its name under, matching
	/// the column the success rows would have been selected by.
	pub(crate) fn placeholder_key(self) -> &'static str {
		match self {
			Self::ProductName => "product_name",
			Self::UniqueProductName => "unique_product_name",
			Self::Entity => "entity_name",
			Self::HsCode => "hs_code",
		}
	}
}

impl SearchService {
	/// Fetches shipment rows matching any of `names` under `kind`, newest
	/// first, capped at [`ROW_LIMIT`].
	///
	/// Malformed requests (no names, non-numeric HS codes) error; a failing
	/// database degrades to a placeholder envelope instead.
	pub async fn search_rows(
		&self,
		kind: SearchKind,
		names: &[String],
		filters: &SearchFilters,
	) -> Result<SearchEnvelope> {
		let names =
			names.iter().filter(|name| !name.trim().is_empty()).cloned().collect::<Vec<_>>();

		if names.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one search name is required.".to_string(),
			});
		}

		let query = build_row_query(self.table(), kind, &names, filters)?;

		match tradelens_storage::fetch_all::<ShipmentRow>(self.db(), &query).await {
			Ok(rows) => {
				tracing::info!(
					search_type = kind.as_str(),
					names = names.len(),
					rows = rows.len(),
					"Row search completed.",
				);

				Ok(SearchEnvelope::rows(kind, rows))
			},
			Err(err) => {
				tracing::warn!(
					search_type = kind.as_str(),
					error = %err,
					"Row search failed; returning placeholder rows.",
				);

				Ok(SearchEnvelope::degraded(kind, &names, err.to_string()))
			},
		}
	}
}

pub(crate) fn build_row_query(
	table: &str,
	kind: SearchKind,
	names: &[String],
	filters: &SearchFilters,
) -> Result<BuiltQuery> {
	let table = crate::checked_table(table)?;
	let mut builder =
		PredicateBuilder::new(format!("SELECT {SHIPMENT_COLUMNS} FROM {table} WHERE 1=1"));

	match kind {
		SearchKind::Entity => {
			let importer_placeholders = names
				.iter()
				.enumerate()
				.map(|(i, name)| builder.bind(format!("imp_param_{i}"), SqlValue::Text(name.clone())))
				.collect::<Vec<_>>();
			let supplier_placeholders = names
				.iter()
				.enumerate()
				.map(|(i, name)| builder.bind(format!("sup_param_{i}"), SqlValue::Text(name.clone())))
				.collect::<Vec<_>>();

			builder.push_sql(&format!(
				" AND (true_importer_name IN ({}) OR true_supplier_name IN ({}))",
				importer_placeholders.join(", "),
				supplier_placeholders.join(", "),
			));
		},
		SearchKind::HsCode => {
			let mut placeholders = Vec::with_capacity(names.len());

			for (i, name) in names.iter().enumerate() {
				let code = parse_hs_code(name)?;

				placeholders.push(builder.bind(format!("param_{i}"), SqlValue::Int(code)));
			}

			builder.push_sql(&format!(" AND hs_code IN ({})", placeholders.join(", ")));
		},
		SearchKind::ProductName | SearchKind::UniqueProductName => {
			let column = match kind {
				SearchKind::ProductName => "product_name",
				_ => "unique_product_name",
			};
			let placeholders = names
				.iter()
				.enumerate()
				.map(|(i, name)| builder.bind(format!("param_{i}"), SqlValue::Text(name.clone())))
				.collect::<Vec<_>>();

			builder.push_sql(&format!(" AND {column} IN ({})", placeholders.join(", ")));
		},
	}

	builder.apply_filters(filters)?;
	builder.push_sql(&format!(" ORDER BY reg_date DESC LIMIT {ROW_LIMIT}"));

	Ok(builder.build())
}

#[cfg(test)]
mod tests {
	use super::*;

	const TABLE: &str = "analytics.import_shipments";

	fn owned(items: &[&str]) -> Vec<String> {
		items.iter().map(|item| item.to_string()).collect()
	}

	#[test]
	fn entity_query_binds_each_name_for_both_columns() {
		let names = owned(&["KLJ RESOURCES", "ACME EXPORTS"]);
		let built = build_row_query(TABLE, SearchKind::Entity, &names, &SearchFilters::default())
			.expect("entity query builds");

		assert!(built.sql.contains(
			"(true_importer_name IN ($1, $2) OR true_supplier_name IN ($3, $4))"
		));
		assert_eq!(built.params.len(), 4);
		assert_eq!(built.params[0].0, "imp_param_0");
		assert_eq!(built.params[1].0, "imp_param_1");
		assert_eq!(built.params[2].0, "sup_param_0");
		assert_eq!(built.params[3].0, "sup_param_1");
		assert_eq!(built.params[0].1, built.params[2].1);
	}

	#[test]
	fn hs_code_query_coerces_names_to_integers() {
		let built = build_row_query(
			TABLE,
			SearchKind::HsCode,
			&owned(&["28182010", " 72041000 "]),
			&SearchFilters::default(),
		)
		.expect("hs query builds");

		assert!(built.sql.contains("hs_code IN ($1, $2)"));
		assert_eq!(built.params[0].1, SqlValue::Int(28_182_010));
		assert_eq!(built.params[1].1, SqlValue::Int(72_041_000));
	}

	#[test]
	fn non_numeric_hs_code_is_an_invalid_request() {
		let result =
			build_row_query(TABLE, SearchKind::HsCode, &owned(&["28ab"]), &SearchFilters::default());

		assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	}

	#[test]
	fn every_row_query_orders_newest_first_and_caps_rows() {
		for kind in [SearchKind::ProductName, SearchKind::UniqueProductName, SearchKind::Entity] {
			let built = build_row_query(TABLE, kind, &owned(&["X"]), &SearchFilters::default())
				.expect("query builds");

			assert!(built.sql.ends_with(" ORDER BY reg_date DESC LIMIT 1000"));
		}
	}

	#[test]
	fn unsafe_table_name_is_rejected_before_interpolation() {
		let result = build_row_query(
			"analytics.import_shipments; DROP TABLE x",
			SearchKind::ProductName,
			&owned(&["ALUMINA"]),
			&SearchFilters::default(),
		);

		assert!(matches!(result, Err(Error::InvalidRequest { .. })));
	}

	#[test]
	fn filter_placeholders_continue_numbering_after_names() {
		let filters =
			SearchFilters { importer_id: Some("IEC123".to_string()), ..Default::default() };
		let built = build_row_query(TABLE, SearchKind::ProductName, &owned(&["ALUMINA"]), &filters)
			.expect("query builds");

		assert!(built.sql.contains("product_name IN ($1)"));
		assert!(built.sql.contains("importer_id LIKE $2"));
		assert_eq!(built.params[1].0, "filter_param_1");
	}
}
