pub mod domain;
pub mod error;

pub use domain::analysis::{AnalysisMode, AnalysisResult, StructuredAnalysis};
pub use domain::feedback::AnalyzeRequest;
pub use error::CoreError;
