use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Rating;

/// Per-record score accumulation
pub trait RatingRepository: Send + Sync {
    /// Fold `score` into the accumulator for `record_id`, creating it on
    /// first use, and return the updated accumulator.
    fn add(&self, record_id: &str, score: f64) -> CatalogResult<Rating>;

    fn get(&self, record_id: &str) -> CatalogResult<Option<Rating>>;
}

#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    ratings: RwLock<HashMap<String, Rating>>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Internal("rating store lock poisoned".to_string())
}

impl RatingRepository for InMemoryRatingRepository {
    fn add(&self, record_id: &str, score: f64) -> CatalogResult<Rating> {
        let mut ratings = self.ratings.write().map_err(|_| poisoned())?;
        let rating = ratings.entry(record_id.to_string()).or_default();
        rating.count = rating.count.saturating_add(1);
        rating.sum += score;
        Ok(*rating)
    }

    fn get(&self, record_id: &str) -> CatalogResult<Option<Rating>> {
        let ratings = self.ratings.read().map_err(|_| poisoned())?;
        Ok(ratings.get(record_id).copied())
    }
}
