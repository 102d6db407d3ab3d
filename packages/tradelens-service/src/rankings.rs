use serde::Serialize;

use tradelens_storage::{
	BuiltQuery, ImporterRanking, PredicateBuilder, SearchFilters, SqlValue, SupplierRanking,
};

use crate::{Error, Result, SearchService, envelope::RankingEnvelope};

const DEFAULT_RANKING_LIMIT: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKind {
	TopImporters,
	TopSuppliers,
}
impl RankingKind {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::TopImporters => "top_importers",
			Self::TopSuppliers => "top_suppliers",
		}
	}
}

/// Which product column the ranked shipments are matched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductField {
	ProductName,
	UniqueProductName,
}
impl ProductField {
	fn column(self) -> &'static str {
		match self {
			Self::ProductName => "product_name",
			Self::UniqueProductName => "unique_product_name",
		}
	}
}

impl SearchService {
	/// Ranks importers of the given products by total USD value.
	///
	/// A failing database degrades to an empty envelope carrying the error.
	pub async fn top_importers(
		&self,
		field: ProductField,
		names: &[String],
		filters: &SearchFilters,
		limit: Option<u32>,
	) -> Result<RankingEnvelope<ImporterRanking>> {
		let names = non_blank_names(names)?;
		let limit = limit.unwrap_or(DEFAULT_RANKING_LIMIT);
		let query = build_importer_ranking_query(self.table(), field, &names, filters, limit)?;

		match tradelens_storage::fetch_all::<ImporterRanking>(self.db(), &query).await {
			Ok(data) => {
				tracing::info!(
					products = names.len(),
					rows = data.len(),
					"Importer ranking completed.",
				);

				Ok(RankingEnvelope::rankings(RankingKind::TopImporters, names, data))
			},
			Err(err) => {
				tracing::warn!(error = %err, "Importer ranking failed; returning empty envelope.");

				Ok(RankingEnvelope::degraded(RankingKind::TopImporters, names, err.to_string()))
			},
		}
	}

	/// Ranks suppliers of the given products by total USD value.
	pub async fn top_suppliers(
		&self,
		field: ProductField,
		names: &[String],
		filters: &SearchFilters,
		limit: Option<u32>,
	) -> Result<RankingEnvelope<SupplierRanking>> {
		let names = non_blank_names(names)?;
		let limit = limit.unwrap_or(DEFAULT_RANKING_LIMIT);
		let query = build_supplier_ranking_query(self.table(), field, &names, filters, limit)?;

		match tradelens_storage::fetch_all::<SupplierRanking>(self.db(), &query).await {
			Ok(data) => {
				tracing::info!(
					products = names.len(),
					rows = data.len(),
					"Supplier ranking completed.",
				);

				Ok(RankingEnvelope::rankings(RankingKind::TopSuppliers, names, data))
			},
			Err(err) => {
				tracing::warn!(error = %err, "Supplier ranking failed; returning empty envelope.");

				Ok(RankingEnvelope::degraded(RankingKind::TopSuppliers, names, err.to_string()))
			},
		}
	}
}

fn non_blank_names(names: &[String]) -> Result<Vec<String>> {
	let names = names.iter().filter(|name| !name.trim().is_empty()).cloned().collect::<Vec<_>>();

	if names.is_empty() {
		return Err(Error::InvalidRequest {
			message: "At least one product name is required.".to_string(),
		});
	}

	Ok(names)
}

pub(crate) fn build_importer_ranking_query(
	table: &str,
	field: ProductField,
	names: &[String],
	filters: &SearchFilters,
	limit: u32,
) -> Result<BuiltQuery> {
	let table = crate::checked_table(table)?;
	let mut builder = PredicateBuilder::new(format!(
		"SELECT true_importer_name, importer_id, city, \
		COUNT(*) AS total_shipments, \
		SUM(total_value_usd) AS total_value_usd, \
		SUM(quantity) AS total_quantity, \
		AVG(unit_price_usd) AS avg_unit_price_usd, \
		MIN(reg_date) AS first_import_date, \
		MAX(reg_date) AS last_import_date, \
		COUNT(DISTINCT hs_code) AS unique_hs_codes, \
		COUNT(DISTINCT origin_country) AS unique_countries \
		FROM {table} WHERE 1=1"
	));

	push_product_predicate(&mut builder, field, names);
	builder.push_sql(" AND true_importer_name IS NOT NULL AND total_value_usd IS NOT NULL");
	builder.apply_filters(filters)?;
	builder.push_sql(&format!(
		" GROUP BY true_importer_name, importer_id, city \
		ORDER BY total_value_usd DESC LIMIT {limit}"
	));

	Ok(builder.build())
}

pub(crate) fn build_supplier_ranking_query(
	table: &str,
	field: ProductField,
	names: &[String],
	filters: &SearchFilters,
	limit: u32,
) -> Result<BuiltQuery> {
	let table = crate::checked_table(table)?;
	let mut builder = PredicateBuilder::new(format!(
		"SELECT true_supplier_name, supplier_name, \
		COUNT(*) AS total_shipments, \
		SUM(total_value_usd) AS total_value_usd, \
		SUM(quantity) AS total_quantity, \
		AVG(unit_price_usd) AS avg_unit_price_usd, \
		MIN(reg_date) AS first_export_date, \
		MAX(reg_date) AS last_export_date, \
		COUNT(DISTINCT hs_code) AS unique_hs_codes, \
		COUNT(DISTINCT true_importer_name) AS unique_importers \
		FROM {table} WHERE 1=1"
	));

	push_product_predicate(&mut builder, field, names);
	builder.push_sql(" AND true_supplier_name IS NOT NULL AND total_value_usd IS NOT NULL");
	builder.apply_filters(filters)?;
	builder.push_sql(&format!(
		" GROUP BY true_supplier_name, supplier_name \
		ORDER BY total_value_usd DESC LIMIT {limit}"
	));

	Ok(builder.build())
}

fn push_product_predicate(builder: &mut PredicateBuilder, field: ProductField, names: &[String]) {
	let placeholders = names
		.iter()
		.enumerate()
		.map(|(i, name)| builder.bind(format!("param_{i}"), SqlValue::Text(name.clone())))
		.collect::<Vec<_>>();

	builder.push_sql(&format!(" AND {} IN ({})", field.column(), placeholders.join(", ")));
}
