//! Retrieval strategy execution.
//!
//! Each strategy issues one or more queries to the search collaborator and
//! normalizes the hits into [`SearchResult`]s, applying strategy-specific
//! caps and default scores. A failing query is logged and contributes
//! nothing; the remaining queries in the same strategy still execute, so a
//! strategy returns whatever subset succeeded (possibly empty).

use fitrec_core::goal::{FitnessGoal, Strategy};
use fitrec_core::plan::AgentPlan;
use fitrec_core::profile::UserProfile;
use fitrec_core::result::SearchResult;
use fitrec_core::search::{SearchBackend, SearchHit};
use tracing::{debug, warn};

/// Execute the selected strategy for this iteration.
pub async fn execute_strategy(
    strategy: Strategy,
    plan: &AgentPlan,
    profile: &UserProfile,
    iteration: usize,
    backend: &dyn SearchBackend,
) -> Vec<SearchResult> {
    match strategy {
        Strategy::BroadSearch => broad_search(plan, profile, backend).await,
        Strategy::TargetedSearch => targeted_search(plan, profile, iteration, backend).await,
        Strategy::ProgressiveRefinement => {
            // Refinement re-anchors on the first sub-goal for a
            // high-quality focused pass.
            targeted_search(plan, profile, 0, backend).await
        }
        Strategy::MultiAngleApproach => multi_angle_search(plan, profile, backend).await,
    }
}

/// Broad search: 4 goal-keyed terms, top 2 hits per term, default score 0.5.
async fn broad_search(
    plan: &AgentPlan,
    profile: &UserProfile,
    backend: &dyn SearchBackend,
) -> Vec<SearchResult> {
    let terms: [&str; 4] = match plan.primary_goal {
        FitnessGoal::WeightLoss => ["cardio", "fat burning", "HIIT", "weight loss exercises"],
        FitnessGoal::MuscleGain => [
            "strength training",
            "muscle building",
            "hypertrophy",
            "resistance",
        ],
        FitnessGoal::Cardio => ["endurance", "cardiovascular", "aerobic", "cardio training"],
        FitnessGoal::Strength => ["strength", "powerlifting", "resistance training", "strong"],
        FitnessGoal::General => ["fitness", "exercise", "workout", "training"],
    };

    let mut results = Vec::new();
    for term in terms {
        match backend.search(term, profile).await {
            Ok(hits) => {
                for hit in hits.into_iter().take(2) {
                    results.push(normalize(hit, 0.5, "general", "beginner", "search"));
                }
            }
            Err(e) => {
                warn!(term, error = %e, "Broad search query failed");
            }
        }
    }
    debug!(results = results.len(), "Broad search complete");
    results
}

/// Targeted search: one query derived from the sub-goal at `index`,
/// top 3 hits, default score 0.6. An index past the sub-goal list yields
/// an empty set without touching the backend.
async fn targeted_search(
    plan: &AgentPlan,
    profile: &UserProfile,
    index: usize,
    backend: &dyn SearchBackend,
) -> Vec<SearchResult> {
    let Some(sub_goal) = plan.sub_goals.get(index) else {
        debug!(index, sub_goals = plan.sub_goals.len(), "No sub-goal left to target");
        return Vec::new();
    };

    let term = sub_goal_to_query(sub_goal);
    let mut results = Vec::new();

    match backend.search(&term, profile).await {
        Ok(hits) => {
            for hit in hits.into_iter().take(3) {
                results.push(normalize(hit, 0.6, "targeted", "intermediate", "search_targeted"));
            }
        }
        Err(e) => {
            warn!(sub_goal = %sub_goal, error = %e, "Targeted search query failed");
        }
    }
    debug!(results = results.len(), term = %term, "Targeted search complete");
    results
}

/// Multi-angle search: 3 goal-keyed angle phrases, top 2 per angle,
/// default score 0.55, source tagged with the angle.
async fn multi_angle_search(
    plan: &AgentPlan,
    profile: &UserProfile,
    backend: &dyn SearchBackend,
) -> Vec<SearchResult> {
    let angles: [&str; 3] = match plan.primary_goal {
        FitnessGoal::WeightLoss => [
            "beginner weight loss",
            "advanced fat burning",
            "cardio for weight loss",
        ],
        FitnessGoal::MuscleGain => [
            "beginner muscle building",
            "advanced hypertrophy",
            "strength for muscle",
        ],
        FitnessGoal::Cardio => ["running cardio", "HIIT cardio", "low intensity cardio"],
        FitnessGoal::Strength => ["powerlifting", "bodyweight strength", "dumbbell strength"],
        FitnessGoal::General => ["beginner fitness", "intermediate fitness", "advanced fitness"],
    };

    let mut results = Vec::new();
    for angle in angles {
        let source = format!("search_angle_{}", angle.replace(' ', "_"));
        match backend.search(angle, profile).await {
            Ok(hits) => {
                for hit in hits.into_iter().take(2) {
                    results.push(normalize(hit, 0.55, "multi_angle", "varied", &source));
                }
            }
            Err(e) => {
                warn!(angle, error = %e, "Multi-angle search query failed");
            }
        }
    }
    debug!(results = results.len(), "Multi-angle search complete");
    results
}

/// Convert a sub-goal identifier to a search phrase: strip the action
/// prefix, turn underscores into spaces.
fn sub_goal_to_query(sub_goal: &str) -> String {
    let stripped = ["find_", "identify_", "locate_", "discover_"]
        .iter()
        .find_map(|p| sub_goal.strip_prefix(p))
        .unwrap_or(sub_goal);
    stripped.replace('_', " ")
}

/// Map a raw hit to a domain result, filling strategy defaults for
/// whatever the backend omitted.
fn normalize(
    hit: SearchHit,
    default_score: f32,
    default_type: &str,
    default_difficulty: &str,
    source: &str,
) -> SearchResult {
    SearchResult {
        content: hit.content,
        relevance_score: hit.score.unwrap_or(default_score),
        source: source.to_string(),
        exercise_type: hit.category.unwrap_or_else(|| default_type.to_string()),
        target_muscles: hit.muscle_groups,
        difficulty: hit.difficulty.unwrap_or_else(|| default_difficulty.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fitrec_core::error::SearchError;
    use fitrec_core::plan::SuccessCriteria;
    use fitrec_core::profile::{RawUserData, UserProfile};
    use std::sync::Mutex;

    /// Records queries and replays canned hits; queries containing "fail"
    /// raise a backend error.
    struct RecordingBackend {
        queries: Mutex<Vec<String>>,
        hits_per_query: usize,
    }

    impl RecordingBackend {
        fn new(hits_per_query: usize) -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
                hits_per_query,
            }
        }

        fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        fn name(&self) -> &str {
            "recording"
        }

        async fn search(
            &self,
            query: &str,
            _profile: &UserProfile,
        ) -> Result<Vec<SearchHit>, SearchError> {
            self.queries.lock().unwrap().push(query.to_string());
            if query.contains("fail") {
                return Err(SearchError::Network("connection refused".into()));
            }
            Ok((0..self.hits_per_query)
                .map(|i| SearchHit {
                    content: format!("{query} #{i}"),
                    score: None,
                    category: None,
                    muscle_groups: vec![],
                    difficulty: None,
                })
                .collect())
        }
    }

    fn plan_for(goal: &str) -> (AgentPlan, UserProfile) {
        let raw = RawUserData {
            goal: goal.into(),
            ..RawUserData::default()
        };
        let profile = UserProfile::from_raw(&raw, "").unwrap();
        let plan = AgentPlan {
            primary_goal: profile.primary_goal,
            sub_goals: vec![
                "find_high_intensity_cardio".into(),
                "identify_calorie_burning_exercises".into(),
            ],
            search_strategies: vec![Strategy::BroadSearch],
            expected_iterations: 2,
            success_criteria: SuccessCriteria::default(),
        };
        (plan, profile)
    }

    #[test]
    fn sub_goal_prefixes_stripped() {
        assert_eq!(sub_goal_to_query("find_high_intensity_cardio"), "high intensity cardio");
        assert_eq!(sub_goal_to_query("identify_muscle_building_protocols"), "muscle building protocols");
        assert_eq!(sub_goal_to_query("locate_nutrition_guidance"), "nutrition guidance");
        assert_eq!(sub_goal_to_query("discover_recovery_strategies"), "recovery strategies");
        assert_eq!(sub_goal_to_query("address_form_corrections"), "address form corrections");
    }

    #[tokio::test]
    async fn broad_search_issues_four_goal_keyed_queries() {
        let (plan, profile) = plan_for("weight_loss");
        let backend = RecordingBackend::new(5);

        let results =
            execute_strategy(Strategy::BroadSearch, &plan, &profile, 0, &backend).await;

        assert_eq!(
            backend.queries(),
            vec!["cardio", "fat burning", "HIIT", "weight loss exercises"]
        );
        // Top 2 per query.
        assert_eq!(results.len(), 8);
        assert!(results.iter().all(|r| (r.relevance_score - 0.5).abs() < f32::EPSILON));
        assert!(results.iter().all(|r| r.source == "search"));
        assert!(results.iter().all(|r| r.exercise_type == "general"));
    }

    #[tokio::test]
    async fn targeted_search_uses_iteration_sub_goal() {
        let (plan, profile) = plan_for("weight_loss");
        let backend = RecordingBackend::new(5);

        let results =
            execute_strategy(Strategy::TargetedSearch, &plan, &profile, 1, &backend).await;

        assert_eq!(backend.queries(), vec!["calorie burning exercises"]);
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| (r.relevance_score - 0.6).abs() < f32::EPSILON));
        assert!(results.iter().all(|r| r.source == "search_targeted"));
        assert!(results.iter().all(|r| r.difficulty == "intermediate"));
    }

    #[tokio::test]
    async fn targeted_search_past_sub_goals_is_empty_without_backend_call() {
        let (plan, profile) = plan_for("weight_loss");
        let backend = RecordingBackend::new(5);

        let results =
            execute_strategy(Strategy::TargetedSearch, &plan, &profile, 2, &backend).await;

        assert!(results.is_empty());
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn progressive_refinement_targets_first_sub_goal() {
        let (plan, profile) = plan_for("weight_loss");
        let backend = RecordingBackend::new(2);

        let results =
            execute_strategy(Strategy::ProgressiveRefinement, &plan, &profile, 5, &backend).await;

        assert_eq!(backend.queries(), vec!["high intensity cardio"]);
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn multi_angle_tags_sources_per_angle() {
        let (plan, profile) = plan_for("cardio");
        let backend = RecordingBackend::new(3);

        let results =
            execute_strategy(Strategy::MultiAngleApproach, &plan, &profile, 1, &backend).await;

        assert_eq!(
            backend.queries(),
            vec!["running cardio", "HIIT cardio", "low intensity cardio"]
        );
        assert_eq!(results.len(), 6);
        assert_eq!(results[0].source, "search_angle_running_cardio");
        assert!(results.iter().all(|r| (r.relevance_score - 0.55).abs() < f32::EPSILON));
        assert!(results.iter().all(|r| r.difficulty == "varied"));
    }

    #[tokio::test]
    async fn strength_goal_keeps_its_own_term_tables() {
        let (plan, profile) = plan_for("strength");
        let backend = RecordingBackend::new(1);

        execute_strategy(Strategy::BroadSearch, &plan, &profile, 0, &backend).await;
        assert_eq!(
            backend.queries(),
            vec!["strength", "powerlifting", "resistance training", "strong"]
        );

        let backend = RecordingBackend::new(1);
        execute_strategy(Strategy::MultiAngleApproach, &plan, &profile, 1, &backend).await;
        assert_eq!(
            backend.queries(),
            vec!["powerlifting", "bodyweight strength", "dumbbell strength"]
        );
    }

    #[tokio::test]
    async fn failing_query_does_not_abort_strategy() {
        struct HalfFailing {
            inner: RecordingBackend,
        }

        #[async_trait]
        impl SearchBackend for HalfFailing {
            fn name(&self) -> &str {
                "half_failing"
            }

            async fn search(
                &self,
                query: &str,
                profile: &UserProfile,
            ) -> Result<Vec<SearchHit>, SearchError> {
                // Every other query fails at the backend.
                if self.inner.queries().len() % 2 == 1 {
                    self.inner.queries.lock().unwrap().push(query.to_string());
                    return Err(SearchError::Timeout("slow index".into()));
                }
                self.inner.search(query, profile).await
            }
        }

        let (plan, profile) = plan_for("weight_loss");
        let backend = HalfFailing {
            inner: RecordingBackend::new(2),
        };

        let results =
            execute_strategy(Strategy::BroadSearch, &plan, &profile, 0, &backend).await;

        // 2 of 4 queries succeeded, 2 hits each.
        assert_eq!(results.len(), 4);
        assert_eq!(backend.inner.queries().len(), 4);
    }

    #[tokio::test]
    async fn backend_scores_override_defaults() {
        struct Scored;

        #[async_trait]
        impl SearchBackend for Scored {
            fn name(&self) -> &str {
                "scored"
            }

            async fn search(
                &self,
                _query: &str,
                _profile: &UserProfile,
            ) -> Result<Vec<SearchHit>, SearchError> {
                Ok(vec![SearchHit {
                    content: "deadlift".into(),
                    score: Some(0.93),
                    category: Some("strength".into()),
                    muscle_groups: vec!["hamstrings".into()],
                    difficulty: Some("advanced".into()),
                }])
            }
        }

        let (plan, profile) = plan_for("muscle_gain");
        let results = execute_strategy(Strategy::BroadSearch, &plan, &profile, 0, &Scored).await;

        assert_eq!(results.len(), 4); // 1 hit per each of 4 terms
        assert!((results[0].relevance_score - 0.93).abs() < f32::EPSILON);
        assert_eq!(results[0].exercise_type, "strength");
        assert_eq!(results[0].difficulty, "advanced");
    }
}
