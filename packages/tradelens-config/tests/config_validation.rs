use tradelens_config::{Config, Postgres, Storage, Suggest};

fn valid_config() -> Config {
	Config {
		storage: Storage {
			postgres: Postgres {
				dsn: "postgres://localhost/trade".to_string(),
				pool_max_conns: 4,
				shipments_table: "analytics.import_shipments".to_string(),
			},
		},
		suggest: Suggest::default(),
	}
}

#[test]
fn validate_accepts_defaults() {
	assert!(tradelens_config::validate(&valid_config()).is_ok());
}

#[test]
fn validate_rejects_empty_dsn() {
	let mut cfg = valid_config();

	cfg.storage.postgres.dsn = " ".to_string();

	assert!(tradelens_config::validate(&cfg).is_err());
}

#[test]
fn validate_rejects_zero_pool() {
	let mut cfg = valid_config();

	cfg.storage.postgres.pool_max_conns = 0;

	assert!(tradelens_config::validate(&cfg).is_err());
}

#[test]
fn validate_rejects_unsafe_table_name() {
	for table in ["analytics.shipments; DROP TABLE x", "a.b.c", "", "1shipments", "ship ments"] {
		let mut cfg = valid_config();

		cfg.storage.postgres.shipments_table = table.to_string();

		assert!(tradelens_config::validate(&cfg).is_err(), "expected rejection for {table:?}");
	}
}

#[test]
fn validate_rejects_zero_suggest_limits() {
	let mut cfg = valid_config();

	cfg.suggest.product_cache_cap = 0;

	assert!(tradelens_config::validate(&cfg).is_err());

	let mut cfg = valid_config();

	cfg.suggest.default_limit = 0;

	assert!(tradelens_config::validate(&cfg).is_err());
}

#[test]
fn table_ident_check_accepts_plain_and_qualified_names() {
	assert!(tradelens_config::is_safe_table_ident("import_shipments"));
	assert!(tradelens_config::is_safe_table_ident("analytics.import_shipments"));
	assert!(tradelens_config::is_safe_table_ident("_staging.t2"));
}

#[test]
fn parses_minimal_toml() {
	let raw = r#"
[storage.postgres]
dsn            = "postgres://localhost/trade"
pool_max_conns = 4
"#;
	let cfg: Config = toml::from_str(raw).expect("minimal config parses");

	assert_eq!(cfg.storage.postgres.shipments_table, "analytics.import_shipments");
	assert_eq!(cfg.suggest.product_cache_cap, 10_000);
	assert_eq!(cfg.suggest.default_limit, 10);
}
