//! crates/phrontier_core/src/enrich.rs
//!
//! Advisory enrichment of optional resource fields. Enrichment never blocks
//! or fails a publish: when the generative provider fails or returns nothing
//! usable, a deterministic fallback derived from the title is used instead.

use std::sync::Arc;

use crate::ports::OutcomeGenerator;

/// The largest number of outcomes a record carries after enrichment.
const MAX_OUTCOMES: usize = 3;

/// The canned list used when no provider is configured or the provider
/// produced nothing usable.
pub fn fallback_outcomes(title: &str) -> Vec<String> {
    vec![
        format!("Understand the core concepts of {title}"),
        "Analyze physics properties".to_string(),
        "Solve practical problems".to_string(),
    ]
}

/// Wraps an optional [`OutcomeGenerator`] with the fallback policy.
///
/// Time bounds live in the provider adapter, which reports expiry as
/// `PortError::Timeout`; from here every failure path looks the same.
#[derive(Clone)]
pub struct OutcomeEnricher {
    provider: Option<Arc<dyn OutcomeGenerator>>,
}

impl OutcomeEnricher {
    pub fn new(provider: Arc<dyn OutcomeGenerator>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// An enricher with no provider; every suggestion is the fallback.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Suggests an ordered list of at most three short outcome strings.
    ///
    /// This method never fails from the caller's perspective: it always
    /// returns a non-empty list.
    pub async fn suggest(&self, title: &str, category: &str, description: &str) -> Vec<String> {
        let generated = match &self.provider {
            Some(provider) => provider
                .generate(title, category, description)
                .await
                .unwrap_or_default(),
            None => Vec::new(),
        };

        let cleaned: Vec<String> = generated
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .take(MAX_OUTCOMES)
            .collect();

        if cleaned.is_empty() {
            fallback_outcomes(title)
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortError, PortResult};
    use async_trait::async_trait;

    struct FixedProvider(Vec<String>);

    #[async_trait]
    impl OutcomeGenerator for FixedProvider {
        async fn generate(&self, _: &str, _: &str, _: &str) -> PortResult<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenProvider;

    #[async_trait]
    impl OutcomeGenerator for BrokenProvider {
        async fn generate(&self, _: &str, _: &str, _: &str) -> PortResult<Vec<String>> {
            Err(PortError::Unavailable("provider offline".to_string()))
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl OutcomeGenerator for SlowProvider {
        async fn generate(&self, _: &str, _: &str, _: &str) -> PortResult<Vec<String>> {
            // The adapter's time bound has expired; this is what the port
            // reports in that case.
            Err(PortError::Timeout("outcome generation".to_string()))
        }
    }

    #[tokio::test]
    async fn provider_output_passes_through() {
        let enricher = OutcomeEnricher::new(Arc::new(FixedProvider(vec![
            "Relate force and acceleration".to_string(),
            "Read free-body diagrams".to_string(),
        ])));
        let outcomes = enricher.suggest("Newton's Second Law", "Mechanics", "forces").await;
        assert_eq!(
            outcomes,
            vec!["Relate force and acceleration", "Read free-body diagrams"]
        );
    }

    #[tokio::test]
    async fn erroring_provider_yields_the_fallback() {
        let enricher = OutcomeEnricher::new(Arc::new(BrokenProvider));
        let outcomes = enricher.suggest("Projectile Motion", "Mechanics", "d").await;
        assert_eq!(outcomes, fallback_outcomes("Projectile Motion"));
        assert_eq!(outcomes.len(), 3);
    }

    #[tokio::test]
    async fn timed_out_provider_yields_the_fallback() {
        let enricher = OutcomeEnricher::new(Arc::new(SlowProvider));
        let outcomes = enricher.suggest("Doppler Effect", "Waves & Oscillations", "d").await;
        assert_eq!(outcomes, fallback_outcomes("Doppler Effect"));
    }

    #[tokio::test]
    async fn blank_and_excess_entries_are_dropped() {
        let enricher = OutcomeEnricher::new(Arc::new(FixedProvider(vec![
            "  One  ".to_string(),
            "".to_string(),
            "Two".to_string(),
            "Three".to_string(),
            "Four".to_string(),
        ])));
        let outcomes = enricher.suggest("T", "C", "D").await;
        assert_eq!(outcomes, vec!["One", "Two", "Three"]);
    }

    #[tokio::test]
    async fn no_provider_yields_the_fallback() {
        let outcomes = OutcomeEnricher::disabled().suggest("Lens Maker", "Optics", "d").await;
        assert_eq!(outcomes, fallback_outcomes("Lens Maker"));
    }
}
