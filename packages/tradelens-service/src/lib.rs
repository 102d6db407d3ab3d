//! Search orchestration for trade-shipment analytics.
//!
//! [`SearchService`] owns the candidate caches and the database handle and
//! exposes the three public operations: name suggestions, filtered row
//! searches, and top-importer/supplier rankings. Suggestion and ranking
//! queries degrade to placeholder payloads when the database is unreachable;
//! only malformed requests surface as errors.

mod envelope;
mod rankings;
mod search;
mod suggest;

pub use envelope::{
	PlaceholderRow, RankingEnvelope, RankingOutcome, SearchEnvelope, SearchOutcome,
};
pub use rankings::{ProductField, RankingKind};
pub use search::{ROW_LIMIT, SearchKind};

use tradelens_config::Config;
use tradelens_storage::Db;

use crate::suggest::CandidateCache;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<tradelens_storage::Error> for Error {
	fn from(err: tradelens_storage::Error) -> Self {
		match err {
			tradelens_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			tradelens_storage::Error::Sqlx(err) => Self::Storage { message: err.to_string() },
		}
	}
}

pub struct SearchService {
	cfg: Config,
	db: Db,
	cache: CandidateCache,
}
impl SearchService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, cache: CandidateCache::default() }
	}

	pub fn db(&self) -> &Db {
		&self.db
	}

	fn table(&self) -> &str {
		&self.cfg.storage.postgres.shipments_table
	}
}

/// The table name is interpolated into query text, so every builder
/// re-checks it even though config validation already did.
pub(crate) fn checked_table(table: &str) -> Result<&str> {
	if tradelens_config::is_safe_table_ident(table) {
		Ok(table)
	} else {
		Err(Error::InvalidRequest {
			message: format!("{table:?} is not a valid table identifier."),
		})
	}
}
