#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod confidence;
pub mod conflict;
pub mod coverage;
pub mod intent;
pub mod report;
pub mod retriever;
pub mod session;

pub use confidence::{confidence_score, uncertainty_message};
pub use conflict::detect_conflicts;
pub use coverage::document_coverage;
pub use intent::classify_intent;
pub use retriever::Retriever;
pub use session::RetrievalSession;
