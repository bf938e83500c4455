//! Interaction Collector - intrusion probes to bounded interaction items

mod collector;

pub use collector::{CollectStats, InteractionCollector, QuerySpan};
