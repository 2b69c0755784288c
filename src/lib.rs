pub mod api_football;
pub mod board;
pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod http_client;
pub mod league;
pub mod league_stats;
pub mod logging;
pub mod refresh;
pub mod scoring;
pub mod signals;
pub mod snapshot;
pub mod state;
