pub mod aggregator;
pub mod catalog;
pub mod gateway;
pub mod providers;
pub mod search;

pub use catalog::Catalog;
pub use gateway::{AiGateway, GatewaySettings, RecommendationSource};
pub use search::{EngineSettings, SearchEngine};
