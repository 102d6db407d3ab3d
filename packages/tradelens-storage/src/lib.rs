//! Postgres access for the trade-shipment search core.
//!
//! The shipment fact table name comes from configuration and is validated as
//! an identifier before it is interpolated anywhere. Every user-supplied
//! filter value travels as a bound parameter through [`PredicateBuilder`].

pub mod date_serde;

mod db;
mod error;
mod models;
mod predicate;
mod queries;
mod schema;

pub use db::Db;
pub use error::{Error, Result};
pub use models::{
	DateMode, ImporterRanking, SearchFilters, ShipmentRow, SupplierRanking,
};
pub use predicate::{BuiltQuery, PredicateBuilder, SqlValue, parse_hs_code};
pub use queries::{
	distinct_entity_names, distinct_product_names, distinct_unique_product_names, fetch_all,
};
