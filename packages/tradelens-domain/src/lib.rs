//! Text normalization and fuzzy ranking for trade-shipment suggestions.
//!
//! Everything here is pure and synchronous. Candidate loading and caching
//! live in the service layer; this crate only decides what a messy shipment
//! string canonically means and how well it matches a typed query.

mod normalize;
mod rank;
mod score;

pub use normalize::{clean_entity_name, clean_product_name};
pub use rank::{Category, RankStrategy, rank};
pub use score::partial_ratio;
