pub mod analyzer;
pub mod rules;
pub mod scoring;
pub mod statistics;
pub mod synthesis;

pub use analyzer::SoilAnalyzer;
pub use rules::InsightEngine;
