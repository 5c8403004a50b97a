// Clip selection and the five-strategy mix engine for soundweave.

pub mod engine;
pub mod error;
pub mod plan;
pub mod selector;

pub use engine::{execute, mix};
pub use error::MixError;
pub use plan::{MixPlan, MixResult, MixStyle};
pub use selector::{Selection, select_for_mood};
