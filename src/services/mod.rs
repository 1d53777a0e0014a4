pub mod cache_key;
pub mod comparison_engine;
pub mod date_normalizer;
pub mod fixture_classifier;
pub mod ranking_engine;
pub mod request_cache;
pub mod stats_aggregator;
pub mod team_stats_service;
