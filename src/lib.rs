pub mod config;
pub mod events;
pub mod models;
pub mod services;
pub mod session;

// Re-export commonly used types for convenience.
pub use config::AppConfig;
pub use models::{AssessmentReport, DialogueHistory, PatientProfile};
pub use services::ai::{GeminiInterviewService, InterviewService, ServiceError};
pub use session::{AnalysisOutcome, Stage, TriageSession};
