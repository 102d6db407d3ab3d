use tradelens_domain::{Category, clean_entity_name, clean_product_name, rank};

fn owned(items: &[&str]) -> Vec<String> {
	items.iter().map(|item| item.to_string()).collect()
}

#[test]
fn noisy_catalog_rows_rank_under_their_cleaned_identity() {
	// Two raw rows that differ only in catalog noise collapse to one suggestion.
	let candidates = owned(&[
		"00000167343 ALUMINA CALCINED ALUMINA 25",
		"00000998210 ALUMINA CALCINED 50",
		"STEEL SCRAP HMS",
	]);

	assert_eq!(
		clean_product_name(&candidates[0]),
		clean_product_name(&candidates[1]),
	);
	assert_eq!(
		rank("ALUMINA", &candidates, 10, Category::ProductName),
		owned(&["00000167343 ALUMINA CALCINED ALUMINA 25"]),
	);
}

#[test]
fn truncated_entity_names_still_rank_for_their_full_query() {
	let truncated = clean_entity_name("KLJ RESOURCES LIMI");

	assert_eq!(truncated, "KLJ RESOURCES");

	let candidates = owned(&["KLJ RESOURCES", "UNRELATED TRADING CO"]);
	let got = rank("KLJ RESOURCES LIMITED", &candidates, 10, Category::Entity);

	assert_eq!(got, owned(&["KLJ RESOURCES"]));
}

#[test]
fn results_never_exceed_limit_and_keep_original_casing() {
	let candidates = owned(&["Alumina Hydrate", "ALUMINA CALCINED", "alumina tabular"]);
	let got = rank("alumina", &candidates, 2, Category::UniqueProductName);

	assert_eq!(got.len(), 2);

	for name in &got {
		assert!(candidates.contains(name));
	}
}
