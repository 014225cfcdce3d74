use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::config::FinderConfig;
use crate::error::FinderError;
use crate::model::{RecipeDetail, RecipeSummary};

/// Envelope shared by both catalog endpoints. A null `meals` field is the
/// catalog's convention for "no matches".
#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

/// HTTP client for the recipe catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &FinderConfig) -> Result<Self, FinderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search the catalog for recipes using a single ingredient.
    ///
    /// Returns the summaries in catalog order, or an empty list when the
    /// catalog reports no matches. Non-success HTTP statuses and undecodable
    /// bodies are transport errors.
    pub async fn search_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<RecipeSummary>, FinderError> {
        let url = format!("{}/filter.php", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("i", ingredient)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: MealsEnvelope<RecipeSummary> = response.json().await?;
        let summaries = envelope.meals.unwrap_or_default();
        debug!(
            "ingredient search for {ingredient:?} returned {} recipes",
            summaries.len()
        );
        Ok(summaries)
    }

    /// Fetch full detail for one recipe id.
    ///
    /// Returns `None` when the catalog has no recipe under that id.
    pub async fn lookup_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, FinderError> {
        let url = format!("{}/lookup.php", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("i", id)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: MealsEnvelope<RecipeDetail> = response.json().await?;
        Ok(envelope.meals.unwrap_or_default().into_iter().next())
    }
}
