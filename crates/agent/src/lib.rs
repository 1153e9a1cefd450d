//! The agentic retrieval-refinement loop — the heart of fitrec.
//!
//! One recommendation request flows through four phases:
//!
//! 1. **Vision** — optional image analysis (absent analyzer or failure
//!    degrades to "no visual insight")
//! 2. **Planning** — decompose the goal into sub-goals and a candidate
//!    strategy sequence
//! 3. **Iterating** — up to `max_iterations` rounds of strategy selection,
//!    retrieval, quality scoring, and memory update, with an early stop
//!    when quality criteria are met
//! 4. **Synthesizing** — merge accumulated results with the baseline
//!    recommendation into the final structured output
//!
//! The loop is strictly sequential within a request; each controller owns
//! its own [`StrategyMemory`], so nothing is shared across requests.

pub mod loop_runner;
pub mod memory;
pub mod planner;
pub mod reflection;
pub mod scorer;
pub mod selector;
pub mod strategies;
pub mod synthesizer;

pub use loop_runner::{AgentLoop, Recommendation};
pub use memory::{StrategyMemory, StrategyOutcome};
pub use planner::build_plan;
pub use reflection::Reflection;
pub use scorer::assess_quality;
pub use selector::select_strategy;
pub use strategies::execute_strategy;
pub use synthesizer::{Synthesis, synthesize};
