//! Template baseline recommender — the deterministic output floor.
//!
//! Produces a complete goal-keyed plan from raw user data alone. The
//! synthesizer concatenates the agentic enhancement blocks after this
//! text, so even total retrieval failure still yields a usable plan.

use async_trait::async_trait;
use fitrec_core::baseline::{BaselineRecommendation, BaselineRecommender};
use fitrec_core::error::BaselineError;
use fitrec_core::goal::FitnessGoal;
use fitrec_core::profile::RawUserData;
use fitrec_core::vision::ImageAttachment;
use tracing::debug;

/// A baseline recommender backed by fixed per-goal templates.
pub struct TemplateBaseline;

impl TemplateBaseline {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemplateBaseline {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaselineRecommender for TemplateBaseline {
    fn name(&self) -> &str {
        "template"
    }

    async fn baseline(
        &self,
        user_data: &RawUserData,
        _images: &[ImageAttachment],
    ) -> Result<BaselineRecommendation, BaselineError> {
        let goal = FitnessGoal::parse(&user_data.goal);
        // Lenient here by design: the baseline must never fail, so bad
        // demographics fall back to defaults instead of erroring.
        let age: u32 = user_data.age.trim().parse().unwrap_or(30);

        debug!(goal = %goal, "Generating baseline recommendation");

        let mut text = String::new();
        text.push_str(&format!("Your {} Plan\n\n", goal_title(goal)));
        text.push_str(weekly_template(goal));
        text.push_str("\n\nNutrition Basics\n");
        text.push_str(nutrition_template(goal));

        if age > 50 {
            text.push_str(
                "\n\nGiven your age, add 5-10 minutes of joint-friendly warm-up before every \
                 session and keep one extra rest day per week.",
            );
        }

        if !user_data.health_conditions.trim().is_empty() {
            text.push_str(&format!(
                "\n\nNoted health considerations: {}. Choose the low-impact variations where \
                 offered and consult a professional before increasing intensity.",
                user_data.health_conditions.trim()
            ));
        }

        Ok(BaselineRecommendation {
            recommendation: text,
        })
    }
}

fn goal_title(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::WeightLoss => "Weight Loss",
        FitnessGoal::MuscleGain => "Muscle Building",
        FitnessGoal::Cardio => "Cardio Endurance",
        FitnessGoal::Strength => "Strength",
        FitnessGoal::General => "Balanced Fitness",
    }
}

fn weekly_template(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::WeightLoss => {
            "Week structure:\n\
             - Mon: 30 min HIIT (intervals of 30s work / 30s rest)\n\
             - Tue: full-body strength circuit, 3 rounds\n\
             - Wed: 45 min brisk walk or cycle\n\
             - Thu: rest or light mobility\n\
             - Fri: 30 min HIIT\n\
             - Sat: strength circuit plus core work\n\
             - Sun: rest"
        }
        FitnessGoal::MuscleGain => {
            "Week structure:\n\
             - Mon: push day (chest, shoulders, triceps) 4 exercises x 3-4 sets of 8-12\n\
             - Tue: pull day (back, biceps) 4 exercises x 3-4 sets\n\
             - Wed: rest\n\
             - Thu: leg day (squat pattern, hinge pattern, accessories)\n\
             - Fri: upper-body volume day\n\
             - Sat: optional weak-point work\n\
             - Sun: rest"
        }
        FitnessGoal::Cardio => {
            "Week structure:\n\
             - Mon: zone-2 session, 40-60 min\n\
             - Tue: interval session 6x3 min hard / 2 min easy\n\
             - Wed: rest or easy 20 min\n\
             - Thu: tempo session, 20-30 min comfortably hard\n\
             - Fri: rest\n\
             - Sat: long easy session, build toward 90 min\n\
             - Sun: rest"
        }
        FitnessGoal::Strength => {
            "Week structure:\n\
             - Mon: heavy squat pattern, 5x5, plus accessories\n\
             - Tue: 20-30 min easy cardio\n\
             - Wed: heavy press pattern (bench or overhead), 5x5\n\
             - Thu: rest\n\
             - Fri: heavy hinge pattern (deadlift), 3x5, plus back work\n\
             - Sat: optional technique or grip work\n\
             - Sun: rest"
        }
        FitnessGoal::General => {
            "Week structure:\n\
             - Mon: full-body strength, 5 compound movements\n\
             - Tue: 30 min moderate cardio\n\
             - Wed: mobility and core, 20-30 min\n\
             - Thu: full-body strength\n\
             - Fri: rest\n\
             - Sat: activity of choice (hike, swim, sport)\n\
             - Sun: rest"
        }
    }
}

fn nutrition_template(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::WeightLoss => {
            "Maintain a moderate calorie deficit (300-500 kcal/day), prioritize protein at \
             every meal, and front-load carbohydrates around training."
        }
        FitnessGoal::MuscleGain => {
            "Eat a small surplus (200-300 kcal/day) with 0.7-1.0 g protein per lb of \
             bodyweight, spread across 3-4 meals."
        }
        FitnessGoal::Cardio => {
            "Fuel sessions over 60 minutes with carbohydrates, hydrate consistently, and \
             keep protein moderate to support recovery."
        }
        FitnessGoal::Strength => {
            "Eat at maintenance or a small surplus with plenty of protein; time a \
             carbohydrate-rich meal 2-3 hours before heavy sessions."
        }
        FitnessGoal::General => {
            "Build meals around lean protein, vegetables, and whole grains; keep processed \
             food occasional rather than habitual."
        }
    }
}
