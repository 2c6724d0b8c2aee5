pub mod assistant;
pub mod auth;
pub mod fallback;
pub mod metrics;
pub mod provider;
pub mod sessions;
pub mod storage;
