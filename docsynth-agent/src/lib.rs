mod consistency;
mod refiner;
mod sampler;

pub use consistency::{similarity, CandidateSet, ConsistencyEvaluator, ConsistencyReport};
pub use refiner::RefinementStep;
pub use sampler::{SamplingGenerator, DEFAULT_TEMPERATURE_STEP};
