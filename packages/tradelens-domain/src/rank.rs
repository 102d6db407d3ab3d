use std::collections::HashSet;

use crate::{normalize, score};

const PRODUCT_SCORE_CUTOFF: f64 = 70.;
const ENTITY_SCORE_CUTOFF: f64 = 75.;
const GENERAL_SCORE_CUTOFF: f64 = 60.;
/// How many non-substring candidates a product ranking will still score when
/// the lexical tiers come up short.
const REMAINDER_SCAN_CAP: usize = 2_000;
/// Cleaned product names shorter than this carry no signal and are skipped.
const MIN_CLEANED_CHARS: usize = 3;

static PRODUCT: ProductNameStrategy = ProductNameStrategy;
static ENTITY: EntityStrategy = EntityStrategy;
static GENERAL: GeneralStrategy = GeneralStrategy { cutoff: GENERAL_SCORE_CUTOFF };

/// Suggestion category, each with its own matching strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
	/// Raw product descriptions; cleaned before scoring.
	ProductName,
	/// Canonical product identities; matched as-is.
	UniqueProductName,
	/// Importer and supplier names.
	Entity,
}

impl Category {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ProductName => "product_name",
			Self::UniqueProductName => "unique_product_name",
			Self::Entity => "entity",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Some(match raw {
			"product_name" => Self::ProductName,
			"unique_product_name" => Self::UniqueProductName,
			"entity" => Self::Entity,
			_ => return None,
		})
	}

	pub fn strategy(self) -> &'static dyn RankStrategy {
		match self {
			Self::ProductName => &PRODUCT,
			Self::UniqueProductName => &GENERAL,
			Self::Entity => &ENTITY,
		}
	}
}

/// Orders a candidate pool by relevance to a typed query.
pub trait RankStrategy: Send + Sync {
	fn rank(&self, query: &str, candidates: &[String], limit: usize) -> Vec<String>;
}

/// Ranks `candidates` against `query` using the strategy for `category`.
pub fn rank(query: &str, candidates: &[String], limit: usize, category: Category) -> Vec<String> {
	if query.trim().is_empty() || candidates.is_empty() || limit == 0 {
		return Vec::new();
	}

	category.strategy().rank(query.trim(), candidates, limit)
}

/// Four-tier product matcher.
///
/// Lexical tiers (exact, prefix, substring on the raw text) pick the scoring
/// pool; survivors are cleaned, deduplicated on cleaned form, and fuzzy-scored
/// against the query.
struct ProductNameStrategy;

impl RankStrategy for ProductNameStrategy {
	fn rank(&self, query: &str, candidates: &[String], limit: usize) -> Vec<String> {
		let upper = query.to_uppercase();
		let mut exact = Vec::new();
		let mut prefix = Vec::new();
		let mut substring = Vec::new();
		let mut remainder = Vec::new();

		for candidate in candidates {
			let candidate_upper = candidate.to_uppercase();

			if candidate_upper == upper {
				exact.push(candidate);
			} else if candidate_upper.starts_with(&upper) {
				prefix.push(candidate);
			} else if candidate_upper.contains(&upper) {
				substring.push(candidate);
			} else {
				remainder.push(candidate);
			}
		}

		let mut pool = exact;

		pool.append(&mut prefix);
		pool.append(&mut substring);

		if pool.len() >= 2 * limit {
			pool.truncate(3 * limit);
		} else {
			pool.extend(remainder.into_iter().take(REMAINDER_SCAN_CAP));
		}

		let mut seen = HashSet::new();
		let mut scored = Vec::new();

		for candidate in pool {
			let cleaned = normalize::clean_product_name(candidate);

			if cleaned.chars().count() < MIN_CLEANED_CHARS {
				continue;
			}
			if !seen.insert(cleaned.to_lowercase()) {
				continue;
			}

			let score = score::partial_ratio(query, &cleaned);

			if score >= PRODUCT_SCORE_CUTOFF {
				scored.push((candidate, score));
			}
		}

		scored.sort_by(|a, b| b.1.total_cmp(&a.1));
		scored.truncate(2 * limit);

		let mut out = Vec::new();

		for (candidate, _) in scored {
			if !out.contains(candidate) {
				out.push(candidate.clone());
			}
			if out.len() == limit {
				break;
			}
		}

		out
	}
}

/// Entity matcher favoring short prefix hits, then earliest substring hits,
/// then fuzzy matches.
struct EntityStrategy;

impl RankStrategy for EntityStrategy {
	fn rank(&self, query: &str, candidates: &[String], limit: usize) -> Vec<String> {
		let upper = query.to_uppercase();
		let mut seen: HashSet<&str> = HashSet::new();
		let mut out = Vec::new();
		let mut prefix: Vec<&String> = candidates
			.iter()
			.filter(|candidate| candidate.to_uppercase().starts_with(&upper))
			.collect();

		prefix.sort_by_key(|candidate| candidate.chars().count());

		for candidate in prefix {
			if out.len() == limit {
				break;
			}
			if seen.insert(candidate) {
				out.push(candidate.clone());
			}
		}

		// Each later pass rescans the whole pool, so it only runs while the
		// earlier passes left the result short of the limit.
		if out.len() < limit {
			let mut substring: Vec<(usize, &String)> = candidates
				.iter()
				.filter(|candidate| !seen.contains(candidate.as_str()))
				.filter_map(|candidate| {
					candidate.to_uppercase().find(&upper).map(|position| (position, candidate))
				})
				.collect();

			substring.sort_by_key(|(position, _)| *position);

			for (_, candidate) in substring {
				if out.len() == limit {
					break;
				}
				if seen.insert(candidate) {
					out.push(candidate.clone());
				}
			}
		}
		if out.len() < limit {
			let mut fuzzy: Vec<(f64, &String)> = candidates
				.iter()
				.filter(|candidate| !seen.contains(candidate.as_str()))
				.filter_map(|candidate| {
					let score = score::partial_ratio(query, candidate);

					(score >= ENTITY_SCORE_CUTOFF).then_some((score, candidate))
				})
				.collect();

			fuzzy.sort_by(|a, b| b.0.total_cmp(&a.0));

			for (_, candidate) in fuzzy {
				if out.len() == limit {
					break;
				}
				if seen.insert(candidate) {
					out.push(candidate.clone());
				}
			}
		}

		out
	}
}

/// Plain fuzzy matcher over unmodified candidates.
struct GeneralStrategy {
	cutoff: f64,
}

impl RankStrategy for GeneralStrategy {
	fn rank(&self, query: &str, candidates: &[String], limit: usize) -> Vec<String> {
		let mut scored: Vec<(f64, &String)> = candidates
			.iter()
			.filter_map(|candidate| {
				let score = score::partial_ratio(query, candidate);

				(score >= self.cutoff).then_some((score, candidate))
			})
			.collect();

		scored.sort_by(|a, b| b.0.total_cmp(&a.0));
		scored.truncate(limit);

		scored.into_iter().map(|(_, candidate)| candidate.clone()).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn owned(items: &[&str]) -> Vec<String> {
		items.iter().map(|item| item.to_string()).collect()
	}

	#[test]
	fn empty_inputs_yield_nothing() {
		let candidates = owned(&["Widget"]);

		assert!(rank("", &candidates, 10, Category::ProductName).is_empty());
		assert!(rank("   ", &candidates, 10, Category::Entity).is_empty());
		assert!(rank("widget", &[], 10, Category::ProductName).is_empty());
		assert!(rank("widget", &candidates, 0, Category::ProductName).is_empty());
	}

	#[test]
	fn entity_prefers_short_prefix_then_substring() {
		let candidates = owned(&["KLJ RESOURCES LTD", "ABC KLJ TRADERS", "KLJCO"]);

		assert_eq!(
			rank("KLJ", &candidates, 10, Category::Entity),
			owned(&["KLJCO", "KLJ RESOURCES LTD", "ABC KLJ TRADERS"]),
		);
	}

	#[test]
	fn entity_substring_orders_by_match_position() {
		let candidates = owned(&["FAR EAST STEEL CORP", "STEEL AUTHORITY", "EAST STEEL CO"]);

		assert_eq!(
			rank("STEEL", &candidates, 10, Category::Entity),
			owned(&["STEEL AUTHORITY", "EAST STEEL CO", "FAR EAST STEEL CORP"]),
		);
	}

	#[test]
	fn entity_falls_back_to_fuzzy_above_cutoff() {
		let candidates = owned(&["RELIANCE INDUSTRIES", "RELIANC INDUSTRIES", "ZZZ"]);
		let got = rank("RELIANCE INDUSTRIE", &candidates, 10, Category::Entity);

		assert!(got.contains(&"RELIANC INDUSTRIES".to_string()));
		assert!(!got.contains(&"ZZZ".to_string()));
	}

	#[test]
	fn entity_respects_limit() {
		let candidates = owned(&["KLJ A", "KLJ B", "KLJ C"]);

		assert_eq!(rank("KLJ", &candidates, 2, Category::Entity).len(), 2);
	}

	#[test]
	fn entity_saturated_prefix_pass_settles_the_result() {
		// Twice as many prefix hits as the limit, then a large tail that the
		// later substring/fuzzy passes would otherwise have to scan. The tail
		// includes near matches that must not displace prefix hits.
		let mut candidates: Vec<String> = (0..20).map(|i| format!("KLJ BRANCH {i:02}")).collect();

		candidates.push("GLOBAL KLJ TRADERS".to_string());
		candidates.push("KLI BRANCH 00".to_string());
		candidates.extend((0..5_000).map(|i| format!("UNRELATED CONGLOMERATE HOLDINGS {i}")));

		let got = rank("KLJ BRANCH", &candidates, 10, Category::Entity);

		assert_eq!(got.len(), 10);

		for name in &got {
			assert!(name.starts_with("KLJ BRANCH"), "non-prefix hit {name:?} in saturated result");
		}
	}

	#[test]
	fn product_dedupes_on_cleaned_form() {
		let candidates = owned(&["Sample Product 1", "Sample Product 2"]);

		assert_eq!(
			rank("Sample", &candidates, 10, Category::ProductName),
			owned(&["Sample Product 1"]),
		);
	}

	#[test]
	fn product_skips_too_short_cleaned_names() {
		let candidates = owned(&["AB 12", "Copper Wire"]);

		assert_eq!(
			rank("Copper", &candidates, 10, Category::ProductName),
			owned(&["Copper Wire"]),
		);
	}

	#[test]
	fn product_lexical_tiers_beat_remainder() {
		let candidates = owned(&["Misc Copper Scrap", "Copper Wire", "Aluminium Sheet"]);
		let got = rank("Copper", &candidates, 10, Category::ProductName);

		assert_eq!(got[0], "Copper Wire");
		assert!(!got.contains(&"Aluminium Sheet".to_string()));
	}

	#[test]
	fn unique_product_matches_without_cleaning() {
		let candidates = owned(&["Sample Unique Product 1", "Sample Unique Product 2"]);
		let got = rank("Unique", &candidates, 10, Category::UniqueProductName);

		assert_eq!(got.len(), 2);
	}

	#[test]
	fn category_round_trips_through_parse() {
		for category in [Category::ProductName, Category::UniqueProductName, Category::Entity] {
			assert_eq!(Category::parse(category.as_str()), Some(category));
		}

		assert_eq!(Category::parse("hs_code"), None);
	}
}
