pub mod events;
pub mod runner;
pub mod state;

pub use events::ScanEvent;
pub use runner::ScanPipeline;
pub use state::{PipelineConfig, ScanOutcome};
