use std::sync::{Arc, RwLock};

use tradelens_domain::Category;

use crate::SearchService;

const FALLBACK_PRODUCTS: &[&str] = &["Sample Product 1", "Sample Product 2"];
const FALLBACK_UNIQUE_PRODUCTS: &[&str] = &["Sample Unique Product 1", "Sample Unique Product 2"];
const FALLBACK_ENTITIES: &[&str] = &["Sample Entity 1", "Sample Entity 2"];

/// Lazily populated candidate pools, one per suggestion category.
///
/// A pool loads on first use and is then shared immutably; a load failure
/// caches the placeholder pool so a flapping database is not hammered on
/// every keystroke.
#[derive(Default)]
pub(crate) struct CandidateCache {
	products: RwLock<Option<Arc<Vec<String>>>>,
	unique_products: RwLock<Option<Arc<Vec<String>>>>,
	entities: RwLock<Option<Arc<Vec<String>>>>,
}
impl CandidateCache {
	fn slot(&self, category: Category) -> &RwLock<Option<Arc<Vec<String>>>> {
		match category {
			Category::ProductName => &self.products,
			Category::UniqueProductName => &self.unique_products,
			Category::Entity => &self.entities,
		}
	}

	fn get(&self, category: Category) -> Option<Arc<Vec<String>>> {
		self.slot(category).read().unwrap_or_else(|err| err.into_inner()).clone()
	}

	fn store_if_absent(&self, category: Category, pool: Arc<Vec<String>>) -> Arc<Vec<String>> {
		let mut slot = self.slot(category).write().unwrap_or_else(|err| err.into_inner());

		match &*slot {
			// Another request won the populate race; its snapshot stays.
			Some(existing) => existing.clone(),
			None => {
				*slot = Some(pool.clone());

				pool
			},
		}
	}
}

impl SearchService {
	/// Ranks up to `limit` candidate names against `query`.
	///
	/// `limit` defaults from configuration when absent. Never fails: an
	/// unreachable database yields suggestions from the placeholder pool.
	pub async fn suggest(
		&self,
		query: &str,
		category: Category,
		limit: Option<usize>,
	) -> Vec<String> {
		let limit = limit.unwrap_or(self.cfg.suggest.default_limit as usize);
		let candidates = self.candidates(category).await;

		tradelens_domain::rank(query, &candidates, limit, category)
	}

	/// The cached candidate pool for `category`, loading it on first use.
	pub async fn candidates(&self, category: Category) -> Arc<Vec<String>> {
		if let Some(pool) = self.cache.get(category) {
			return pool;
		}

		// Loaded outside any lock; concurrent loaders race and the loser's
		// pool is discarded.
		let pool = Arc::new(self.load_candidates(category).await);

		self.cache.store_if_absent(category, pool)
	}

	async fn load_candidates(&self, category: Category) -> Vec<String> {
		let loaded = match category {
			Category::ProductName =>
				tradelens_storage::distinct_product_names(
					&self.db,
					self.table(),
					self.cfg.suggest.product_cache_cap,
				)
				.await,
			Category::UniqueProductName =>
				tradelens_storage::distinct_unique_product_names(&self.db, self.table()).await,
			Category::Entity =>
				tradelens_storage::distinct_entity_names(&self.db, self.table()).await,
		};

		match loaded {
			Ok(names) => {
				tracing::info!(
					category = category.as_str(),
					count = names.len(),
					"Loaded suggestion candidates.",
				);

				names
			},
			Err(err) => {
				tracing::warn!(
					category = category.as_str(),
					error = %err,
					"Candidate load failed; serving placeholder suggestions.",
				);

				fallback(category)
			},
		}
	}
}

fn fallback(category: Category) -> Vec<String> {
	let names = match category {
		Category::ProductName => FALLBACK_PRODUCTS,
		Category::UniqueProductName => FALLBACK_UNIQUE_PRODUCTS,
		Category::Entity => FALLBACK_ENTITIES,
	};

	names.iter().map(|name| name.to_string()).collect()
}
