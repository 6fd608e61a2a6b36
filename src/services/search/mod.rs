//! Search lifecycle: a pure reducer plus the engine that drives it

pub mod engine;
pub mod state;

pub use engine::{EngineSettings, SearchEngine};
pub use state::{transition, SearchEvent, SearchState};
