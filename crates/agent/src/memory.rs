//! Per-request strategy memory.
//!
//! The loop records how each strategy performed so the synthesizer can
//! comment on which one pulled its weight. History is bounded to the last
//! 10 outcomes per strategy and lives only as long as the owning loop.

use chrono::{DateTime, Utc};
use fitrec_core::goal::Strategy;
use serde::Serialize;
use std::collections::HashMap;
use std::collections::VecDeque;

const WINDOW: usize = 10;

/// One iteration's outcome for a strategy.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyOutcome {
    pub quality_score: f32,
    pub result_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Sliding-window history of strategy outcomes, keyed by strategy.
#[derive(Debug, Default)]
pub struct StrategyMemory {
    history: HashMap<Strategy, VecDeque<StrategyOutcome>>,
}

impl StrategyMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an iteration outcome, evicting the oldest entry past the
    /// window cap.
    pub fn record(&mut self, strategy: Strategy, quality_score: f32, result_count: usize) {
        let window = self.history.entry(strategy).or_default();
        window.push_back(StrategyOutcome {
            quality_score,
            result_count,
            timestamp: Utc::now(),
        });
        if window.len() > WINDOW {
            window.pop_front();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Strategy with the highest cumulative quality across its window,
    /// with its total. `None` until something has been recorded.
    pub fn best_strategy(&self) -> Option<(Strategy, f32)> {
        self.history
            .iter()
            .map(|(s, outcomes)| (*s, outcomes.iter().map(|o| o.quality_score).sum::<f32>()))
            // Ties break on strategy name so the pick is deterministic.
            .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.as_str().cmp(a.0.as_str())))
    }

    pub fn outcomes(&self, strategy: Strategy) -> impl Iterator<Item = &StrategyOutcome> {
        self.history.get(&strategy).into_iter().flatten()
    }

    pub fn outcome_count(&self, strategy: Strategy) -> usize {
        self.history.get(&strategy).map_or(0, VecDeque::len)
    }
}
