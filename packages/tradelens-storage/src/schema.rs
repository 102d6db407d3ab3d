use crate::{Error, Result};

/// Renders the shipment-table DDL for `table`, which may be schema-qualified.
///
/// Rejects anything that is not a plain identifier path before interpolating.
pub fn render_schema(table: &str) -> Result<String> {
	if !tradelens_config::is_safe_table_ident(table) {
		return Err(Error::InvalidArgument(format!("{table:?} is not a valid table identifier.")));
	}

	let init = include_str!("../../../sql/init.sql");
	let idx_prefix = format!("idx_{}", table.replace('.', "_"));
	let mut sql = String::new();

	if let Some((schema, _)) = table.split_once('.') {
		sql.push_str(&format!("CREATE SCHEMA IF NOT EXISTS {schema};\n"));
	}

	sql.push_str(&init.replace("<TABLE>", table).replace("<IDX_PREFIX>", &idx_prefix));

	Ok(sql)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn qualified_table_creates_schema_first() {
		let sql = render_schema("analytics.import_shipments").expect("valid identifier");

		assert!(sql.starts_with("CREATE SCHEMA IF NOT EXISTS analytics;"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS analytics.import_shipments"));
		assert!(
			sql.contains("idx_analytics_import_shipments_reg_date ON analytics.import_shipments")
		);
	}

	#[test]
	fn plain_table_skips_schema_statement() {
		let sql = render_schema("shipments").expect("valid identifier");

		assert!(!sql.contains("CREATE SCHEMA"));
		assert!(sql.contains("CREATE TABLE IF NOT EXISTS shipments"));
	}

	#[test]
	fn rejects_injection_attempts() {
		assert!(render_schema("shipments; DROP TABLE x").is_err());
		assert!(render_schema("a.b.c").is_err());
	}
}
