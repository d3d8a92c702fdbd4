pub mod aggregation;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod normalize;
pub mod output;
pub mod pagination;
pub mod pipeline;
pub mod status;
pub mod timestamp;
