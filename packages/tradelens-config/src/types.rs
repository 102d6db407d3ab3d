use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub storage: Storage,
	#[serde(default)]
	pub suggest: Suggest,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Shipment fact table, optionally schema-qualified. Interpolated into query
	/// text rather than bound, so it must pass the identifier check.
	#[serde(default = "default_shipments_table")]
	pub shipments_table: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Suggest {
	/// Cap on the number of distinct product names loaded into the candidate
	/// cache. Canonical product identities and entities load unbounded.
	#[serde(default = "default_product_cache_cap")]
	pub product_cache_cap: u32,
	#[serde(default = "default_suggest_limit")]
	pub default_limit: u32,
}

impl Default for Suggest {
	fn default() -> Self {
		Self {
			product_cache_cap: default_product_cache_cap(),
			default_limit: default_suggest_limit(),
		}
	}
}

fn default_shipments_table() -> String {
	"analytics.import_shipments".to_string()
}

fn default_product_cache_cap() -> u32 {
	10_000
}

fn default_suggest_limit() -> u32 {
	10
}
