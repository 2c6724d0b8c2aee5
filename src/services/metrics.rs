// src/services/metrics.rs
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::services::fallback::Topic;

#[derive(Debug, Default, Clone, Serialize)]
pub struct MetricsData {
    pub route_hits: HashMap<String, u64>,
    /// "ok" | "fallback" | "error" per chat request.
    pub provider_outcomes: HashMap<String, u64>,
    pub fallback_topics: HashMap<String, u64>,
}

#[derive(Debug, Clone)]
pub struct MetricsManager {
    inner: Arc<RwLock<MetricsData>>,
}

impl Default for MetricsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsData::default())),
        }
    }

    pub async fn record_route(&self, route: &str) {
        let mut data = self.inner.write().await;
        *data.route_hits.entry(route.to_string()).or_insert(0) += 1;
    }

    pub async fn record_outcome(&self, outcome: &str) {
        let mut data = self.inner.write().await;
        *data.provider_outcomes.entry(outcome.to_string()).or_insert(0) += 1;
    }

    pub async fn record_fallback(&self, topic: Topic) {
        let mut data = self.inner.write().await;
        *data
            .fallback_topics
            .entry(topic.as_str().to_string())
            .or_insert(0) += 1;
    }

    pub async fn get_metrics(&self) -> MetricsData {
        self.inner.read().await.clone()
    }
}
