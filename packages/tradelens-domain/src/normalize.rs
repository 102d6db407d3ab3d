use std::collections::HashSet;

/// Legal suffixes that mark an entity name as already complete.
const COMPANY_SUFFIXES: &[&str] = &[
	"LIMITED",
	"LTD",
	"PRIVATE",
	"PVT",
	"LLP",
	"CORPORATION",
	"CORP",
	"INC",
	"COMPANY",
	"CO",
];
/// Partial suffixes left behind by fixed-width source columns.
const TRUNCATION_FRAGMENTS: &[&str] = &["LIMI", "PRIV", "LIMIT", "PRIVAT"];
/// Short trailing tokens that are real suffixes, not truncation debris.
const SHORT_SUFFIXES: &[&str] = &["LTD", "LLC", "INC", "PVT", "LLP", "PTE"];

/// Collapses a raw shipment product description into a canonical display name.
///
/// Strips a leading catalog-number run of eight or more digits, drops purely
/// numeric tokens, and keeps the first occurrence of each remaining token
/// (case-insensitively) in original order.
pub fn clean_product_name(raw: &str) -> String {
	let trimmed = raw.trim();
	let digits = trimmed.chars().take_while(|ch| ch.is_ascii_digit()).count();
	let body = if digits >= 8 { &trimmed[digits..] } else { trimmed };
	let mut seen = HashSet::new();
	let mut kept = Vec::new();

	for token in body.split_whitespace() {
		if token.chars().all(|ch| ch.is_ascii_digit()) {
			continue;
		}
		if seen.insert(token.to_lowercase()) {
			kept.push(token);
		}
	}

	kept.join(" ")
}

/// Removes a trailing truncated company-suffix fragment from an entity name.
///
/// Names that already end in a complete legal suffix, or that are ten
/// characters or shorter, pass through with only whitespace collapsed.
pub fn clean_entity_name(raw: &str) -> String {
	let tokens: Vec<&str> = raw.split_whitespace().collect();
	let name = tokens.join(" ");
	let upper = name.to_uppercase();

	if name.chars().count() <= 10
		|| COMPANY_SUFFIXES.iter().any(|suffix| upper.ends_with(suffix))
	{
		return name;
	}

	let Some(last) = tokens.last() else {
		return name;
	};
	let last_upper = last.to_uppercase();
	let drop_last = TRUNCATION_FRAGMENTS.contains(&last_upper.as_str())
		|| (last.chars().count() < 4 && !SHORT_SUFFIXES.contains(&last_upper.as_str()));

	if drop_last { tokens[..tokens.len() - 1].join(" ") } else { name }
}
