// Candidate screening core.
// Implements: payload unwrapping, response normalization, score-to-suitability
// derivation, and the submission pipeline. All webhook calls go through
// backend — no direct reqwest use here.

pub mod coerce;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod suitability;
pub mod unwrap;
