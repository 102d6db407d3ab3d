use serde::{Deserialize, Serialize};
use time::Date;

/// Shared filters accepted by row searches and ranking aggregations.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchFilters {
	#[serde(default)]
	pub hs_code: Option<String>,
	#[serde(default)]
	pub importer_id: Option<String>,
	#[serde(default)]
	pub port_name: Option<String>,
	#[serde(default)]
	pub date_mode: DateMode,
	#[serde(default, with = "crate::date_serde::option")]
	pub single_date: Option<Date>,
	#[serde(default, with = "crate::date_serde::option")]
	pub start_date: Option<Date>,
	#[serde(default, with = "crate::date_serde::option")]
	pub end_date: Option<Date>,
}

/// Which registration-date fields apply. `Single` ignores the range endpoints
/// and `Range` ignores the single date.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateMode {
	#[default]
	Single,
	Range,
}

/// One shipment record as returned by row searches.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct ShipmentRow {
	pub id: i64,
	pub system_id: Option<i64>,
	#[serde(with = "crate::date_serde::option")]
	pub reg_date: Option<Date>,
	pub month_year: Option<String>,
	pub hs_code: Option<i64>,
	pub chapter: Option<i64>,
	pub unique_product_name: Option<String>,
	pub quantity: Option<f64>,
	pub unit_quantity: Option<String>,
	pub unit_price_usd: Option<f64>,
	pub total_value_usd: Option<f64>,
	pub importer_id: Option<String>,
	pub true_importer_name: Option<String>,
	pub city: Option<String>,
	pub cha_number: Option<String>,
	#[serde(rename = "type")]
	#[sqlx(rename = "type")]
	pub shipment_type: Option<String>,
	pub true_supplier_name: Option<String>,
	pub indian_port: Option<String>,
	pub foreign_port: Option<String>,
	pub origin_country: Option<String>,
	pub exchange_rate_usd: Option<f64>,
	pub duty: Option<f64>,
	pub product_name: Option<String>,
	pub supplier_name: Option<String>,
	pub supplier_address: Option<String>,
	#[serde(with = "crate::date_serde::option")]
	pub target_date: Option<Date>,
	pub importer: Option<String>,
}

/// Aggregated importer standing for one or more products.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct ImporterRanking {
	pub true_importer_name: String,
	pub importer_id: Option<String>,
	pub city: Option<String>,
	pub total_shipments: i64,
	pub total_value_usd: Option<f64>,
	pub total_quantity: Option<f64>,
	pub avg_unit_price_usd: Option<f64>,
	#[serde(with = "crate::date_serde::option")]
	pub first_import_date: Option<Date>,
	#[serde(with = "crate::date_serde::option")]
	pub last_import_date: Option<Date>,
	pub unique_hs_codes: i64,
	pub unique_countries: i64,
}

/// Aggregated supplier standing for one or more products.
#[derive(Clone, Debug, Serialize, sqlx::FromRow)]
pub struct SupplierRanking {
	pub true_supplier_name: String,
	pub supplier_name: Option<String>,
	pub total_shipments: i64,
	pub total_value_usd: Option<f64>,
	pub total_quantity: Option<f64>,
	pub avg_unit_price_usd: Option<f64>,
	#[serde(with = "crate::date_serde::option")]
	pub first_export_date: Option<Date>,
	#[serde(with = "crate::date_serde::option")]
	pub last_export_date: Option<Date>,
	pub unique_hs_codes: i64,
	pub unique_importers: i64,
}

#[cfg(test)]
mod tests {
	use time::macros::date;

	use super::*;

	#[test]
	fn filters_deserialize_from_json_dates() {
		let filters: SearchFilters = serde_json::from_str(
			r#"{
				"hs_code": "28182010",
				"date_mode": "range",
				"start_date": "2024-01-01",
				"end_date": "2024-06-30"
			}"#,
		)
		.expect("valid filter payload");

		assert_eq!(filters.hs_code.as_deref(), Some("28182010"));
		assert_eq!(filters.date_mode, DateMode::Range);
		assert_eq!(filters.start_date, Some(date!(2024 - 01 - 01)));
		assert_eq!(filters.end_date, Some(date!(2024 - 06 - 30)));
		assert_eq!(filters.single_date, None);
	}

	#[test]
	fn filters_default_to_single_date_mode() {
		let filters: SearchFilters = serde_json::from_str("{}").expect("empty payload");

		assert_eq!(filters.date_mode, DateMode::Single);
	}

	#[test]
	fn shipment_row_serializes_type_column_name() {
		let row = ShipmentRow {
			id: 1,
			system_id: None,
			reg_date: Some(date!(2024 - 03 - 15)),
			month_year: None,
			hs_code: Some(28_182_010),
			chapter: None,
			unique_product_name: None,
			quantity: None,
			unit_quantity: None,
			unit_price_usd: None,
			total_value_usd: None,
			importer_id: None,
			true_importer_name: None,
			city: None,
			cha_number: None,
			shipment_type: Some("HSS".to_string()),
			true_supplier_name: None,
			indian_port: None,
			foreign_port: None,
			origin_country: None,
			exchange_rate_usd: None,
			duty: None,
			product_name: None,
			supplier_name: None,
			supplier_address: None,
			target_date: None,
			importer: None,
		};
		let json = serde_json::to_value(&row).expect("row serializes");

		assert_eq!(json["type"], "HSS");
		assert_eq!(json["reg_date"], "2024-03-15");
		assert!(json["target_date"].is_null());
	}
}
