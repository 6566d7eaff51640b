pub mod config;
pub mod engine;
pub mod events;
pub mod models;
pub mod services;
pub mod storage;
pub mod vocabulary;

// Re-export commonly used types for convenience.
pub use config::EngineConfig;
pub use engine::MatchEngine;
pub use models::matching::{MatchResult, MatchingRequest};
pub use models::profile::Profile;
pub use models::recommendation::ProactiveRecommendation;
pub use storage::json::JsonDataStore;
