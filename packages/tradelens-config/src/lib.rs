mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Postgres, Storage, Suggest};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if !is_safe_table_ident(&cfg.storage.postgres.shipments_table) {
		return Err(Error::Validation {
			message: format!(
				"storage.postgres.shipments_table {:?} must be a plain or schema-qualified identifier.",
				cfg.storage.postgres.shipments_table,
			),
		});
	}
	if cfg.suggest.product_cache_cap == 0 {
		return Err(Error::Validation {
			message: "suggest.product_cache_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.suggest.default_limit == 0 {
		return Err(Error::Validation {
			message: "suggest.default_limit must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

/// Accepts `table` or `schema.table`, each part starting with a letter or
/// underscore and containing only ASCII alphanumerics and underscores. The
/// table name is interpolated into query text, never bound.
pub fn is_safe_table_ident(table: &str) -> bool {
	let mut parts = table.split('.');
	let Some(first) = parts.next() else {
		return false;
	};
	let second = parts.next();

	if parts.next().is_some() {
		return false;
	}

	match second {
		Some(second) => is_safe_ident_part(first) && is_safe_ident_part(second),
		None => is_safe_ident_part(first),
	}
}

fn is_safe_ident_part(part: &str) -> bool {
	let mut chars = part.chars();
	let Some(first) = chars.next() else {
		return false;
	};

	(first.is_ascii_alphabetic() || first == '_')
		&& chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn normalize(cfg: &mut Config) {
	cfg.storage.postgres.shipments_table =
		cfg.storage.postgres.shipments_table.trim().to_string();
}
