pub mod assessor;
pub mod error;
pub mod events;
pub mod hallucination;
pub mod offtask;
pub mod safety;
pub mod validators;

pub use assessor::QualityAssessor;
pub use error::QualityError;
pub use events::QualityEvent;
pub use hallucination::HallucinationDetector;
pub use offtask::OffTaskDetector;
pub use safety::{ContentSafetyChecker, SafetyViolation};
pub use validators::{InputValidator, OutputValidator};
