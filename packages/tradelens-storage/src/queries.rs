use sqlx::postgres::PgRow;

use crate::{
	Db, Error, Result,
	predicate::{BuiltQuery, SqlValue},
};

/// Runs a built query, binding its parameters in placeholder order.
pub async fn fetch_all<T>(db: &Db, query: &BuiltQuery) -> Result<Vec<T>>
where
	T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
	let mut prepared = sqlx::query_as::<_, T>(&query.sql);

	for (_, value) in &query.params {
		prepared = match value {
			SqlValue::Int(value) => prepared.bind(*value),
			SqlValue::Text(value) => prepared.bind(value.as_str()),
			SqlValue::Date(value) => prepared.bind(*value),
		};
	}

	Ok(prepared.fetch_all(&db.pool).await?)
}

/// Distinct raw product descriptions, capped to bound cache memory.
pub async fn distinct_product_names(db: &Db, table: &str, cap: u32) -> Result<Vec<String>> {
	let table = checked_table(table)?;
	let names: Vec<String> = sqlx::query_scalar(&format!(
		"SELECT DISTINCT product_name FROM {table} WHERE product_name IS NOT NULL LIMIT {cap}"
	))
	.fetch_all(&db.pool)
	.await?;

	Ok(non_blank(names))
}

/// Distinct canonical product identities; small enough to load unbounded.
pub async fn distinct_unique_product_names(db: &Db, table: &str) -> Result<Vec<String>> {
	let table = checked_table(table)?;
	let names: Vec<String> = sqlx::query_scalar(&format!(
		"SELECT DISTINCT unique_product_name FROM {table} WHERE unique_product_name IS NOT NULL"
	))
	.fetch_all(&db.pool)
	.await?;

	Ok(non_blank(names))
}

/// Union of distinct importer and supplier names, sorted and deduplicated so
/// repeated loads produce an identical pool.
pub async fn distinct_entity_names(db: &Db, table: &str) -> Result<Vec<String>> {
	let table = checked_table(table)?;
	let importers: Vec<String> = sqlx::query_scalar(&format!(
		"SELECT DISTINCT true_importer_name FROM {table} WHERE true_importer_name IS NOT NULL"
	))
	.fetch_all(&db.pool)
	.await?;
	let suppliers: Vec<String> = sqlx::query_scalar(&format!(
		"SELECT DISTINCT true_supplier_name FROM {table} WHERE true_supplier_name IS NOT NULL"
	))
	.fetch_all(&db.pool)
	.await?;
	let mut names = non_blank(importers);

	names.extend(non_blank(suppliers));
	names.sort();
	names.dedup();

	Ok(names)
}

fn checked_table(table: &str) -> Result<&str> {
	if tradelens_config::is_safe_table_ident(table) {
		Ok(table)
	} else {
		Err(Error::InvalidArgument(format!("{table:?} is not a valid table identifier.")))
	}
}

fn non_blank(names: Vec<String>) -> Vec<String> {
	names.into_iter().filter(|name| !name.trim().is_empty()).collect()
}
