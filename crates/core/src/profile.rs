//! User profile construction and inference.
//!
//! [`UserProfile::from_raw`] is the validation boundary: malformed
//! demographics (non-numeric age, negative weight) fail fast here with a
//! [`ProfileError`] rather than being guarded deep inside the loop.
//! Everything inferred from vision-analysis text tolerates empty input —
//! absent analysis means "no visual insight", never an error.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::goal::FitnessGoal;

/// Raw user data in wire shape. Numeric fields arrive as strings so the
/// profile boundary owns all coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUserData {
    /// Age in years. Empty means "unknown" (defaults to 30).
    #[serde(default)]
    pub age: String,

    /// Self-reported gender.
    #[serde(default)]
    pub gender: String,

    /// Weight in pounds. Empty means "unknown" (defaults to 150).
    #[serde(default)]
    pub weight: String,

    /// Goal string (e.g. "weight_loss"); unknown values map to General.
    #[serde(default)]
    pub goal: String,

    /// Free-text health/exercise notes.
    #[serde(default)]
    pub health_conditions: String,
}

/// Validated demographic facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub age: u32,
    pub gender: String,
    pub weight_lbs: f32,
}

/// Fitness level inferred from vision analysis text, falling back to age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    BeginnerToIntermediate,
    Intermediate,
    ExperiencedButCautious,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::BeginnerToIntermediate => "beginner_to_intermediate",
            Self::Intermediate => "intermediate",
            Self::ExperiencedButCautious => "experienced_but_cautious",
            Self::Advanced => "advanced",
        }
    }
}

/// An actionable constraint parsed from free-text health conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthConstraint {
    LowImpactPreferred,
    SpineNeutralExercises,
    ModerateIntensityOnly,
}

/// Structured flags extracted from vision-analysis text. All false when
/// no analysis was produced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VisualInsights {
    /// Form/posture/technique concerns were visible.
    pub form_issues: bool,

    /// Equipment (weights, machines, bands) was visible.
    pub equipment_available: bool,

    /// Fitness level could be assessed from visual cues.
    pub fitness_level_visible: bool,

    /// Mobility or flexibility limitations were noted.
    pub mobility_issues: bool,

    /// Body composition / muscle definition was noted.
    pub muscle_definition: bool,

    /// Specific postural problems (rounded shoulders, forward head).
    pub posture_issues: bool,
}

impl VisualInsights {
    /// Extract flags from analysis text via keyword sets.
    pub fn from_analysis(analysis: &str) -> Self {
        if analysis.trim().is_empty() {
            return Self::default();
        }
        let text = analysis.to_lowercase();
        let any = |terms: &[&str]| terms.iter().any(|t| text.contains(t));

        Self {
            form_issues: any(&["form", "posture", "alignment", "technique"]),
            equipment_available: any(&[
                "dumbbell", "barbell", "machine", "gym", "weight", "kettlebell", "band",
            ]),
            fitness_level_visible: any(&[
                "muscular", "athletic", "beginner", "advanced", "experienced", "sedentary",
            ]),
            mobility_issues: any(&[
                "flexibility",
                "mobility",
                "stiff",
                "range of motion",
                "tight",
            ]),
            muscle_definition: any(&[
                "muscle definition",
                "body fat",
                "physique",
                "composition",
            ]),
            posture_issues: any(&["rounded shoulders", "forward head", "slouch", "posture"]),
        }
    }

    /// Whether any flag is set.
    pub fn has_any(&self) -> bool {
        self.form_issues
            || self.equipment_available
            || self.fitness_level_visible
            || self.mobility_issues
            || self.muscle_definition
            || self.posture_issues
    }
}

/// The user profile derived once per request — a read-only input to the
/// planner and synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub demographics: Demographics,
    pub primary_goal: FitnessGoal,
    pub health_constraints: Vec<HealthConstraint>,
    pub fitness_level: FitnessLevel,
    pub equipment_access: Vec<String>,
    pub visual_assessment: VisualInsights,

    /// Full vision-analysis text (empty when no analysis ran).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_analysis: String,
}

impl UserProfile {
    /// Build a profile from raw user data plus optional vision-analysis text.
    ///
    /// Fails fast on malformed numeric fields; empty fields coerce to
    /// sensible defaults (age 30, weight 150 lbs).
    pub fn from_raw(raw: &RawUserData, image_analysis: &str) -> Result<Self, ProfileError> {
        let age = match raw.age.trim() {
            "" => 30,
            other => other
                .parse::<u32>()
                .map_err(|_| ProfileError::InvalidAge(other.to_string()))?,
        };

        let weight_lbs = match raw.weight.trim() {
            "" => 150.0,
            other => {
                let parsed = other
                    .parse::<f32>()
                    .map_err(|_| ProfileError::InvalidWeight(other.to_string()))?;
                if parsed <= 0.0 || !parsed.is_finite() {
                    return Err(ProfileError::InvalidWeight(other.to_string()));
                }
                parsed
            }
        };

        let primary_goal = FitnessGoal::parse(&raw.goal);

        Ok(Self {
            demographics: Demographics {
                age,
                gender: raw.gender.clone(),
                weight_lbs,
            },
            primary_goal,
            health_constraints: parse_health_constraints(&raw.health_conditions),
            fitness_level: infer_fitness_level(age, image_analysis),
            equipment_access: infer_equipment_access(image_analysis),
            visual_assessment: VisualInsights::from_analysis(image_analysis),
            image_analysis: image_analysis.to_string(),
        })
    }
}

/// Parse free-text health conditions into actionable constraints.
fn parse_health_constraints(health_conditions: &str) -> Vec<HealthConstraint> {
    let text = health_conditions.to_lowercase();
    let mut constraints = Vec::new();
    if text.contains("knee") {
        constraints.push(HealthConstraint::LowImpactPreferred);
    }
    if text.contains("back") {
        constraints.push(HealthConstraint::SpineNeutralExercises);
    }
    if text.contains("heart") {
        constraints.push(HealthConstraint::ModerateIntensityOnly);
    }
    constraints
}

/// Infer fitness level preferring visual cues, falling back to age bands.
fn infer_fitness_level(age: u32, image_analysis: &str) -> FitnessLevel {
    let text = image_analysis.to_lowercase();
    if !text.is_empty() {
        if ["advanced", "muscular", "athletic"].iter().any(|t| text.contains(t)) {
            return FitnessLevel::Advanced;
        }
        if ["beginner", "sedentary", "limited experience"]
            .iter()
            .any(|t| text.contains(t))
        {
            return FitnessLevel::Beginner;
        }
        if ["intermediate", "moderate"].iter().any(|t| text.contains(t)) {
            return FitnessLevel::Intermediate;
        }
    }

    if age < 25 {
        FitnessLevel::BeginnerToIntermediate
    } else if age > 50 {
        FitnessLevel::ExperiencedButCautious
    } else {
        FitnessLevel::Intermediate
    }
}

/// Infer equipment access from vision-analysis text. Bodyweight is always
/// available; with no detected equipment, assume the common safe options.
fn infer_equipment_access(image_analysis: &str) -> Vec<String> {
    let text = image_analysis.to_lowercase();
    let mut equipment: Vec<String> = vec!["bodyweight".into()];

    let mut push_unique = |item: &str| {
        if !equipment.iter().any(|e| e == item) {
            equipment.push(item.to_string());
        }
    };

    if !text.is_empty() {
        if text.contains("dumbbell") || text.contains("weight") {
            push_unique("dumbbells");
            push_unique("free_weights");
        }
        if text.contains("gym") || text.contains("machine") {
            push_unique("gym_machines");
            push_unique("cable_machine");
        }
        if text.contains("barbell") {
            push_unique("barbell");
        }
        if text.contains("band") {
            push_unique("resistance_bands");
        }
        if text.contains("kettlebell") {
            push_unique("kettlebells");
        }
        if text.contains("treadmill") || text.contains("cardio machine") {
            push_unique("cardio_machines");
        }
    }

    if equipment.len() == 1 {
        equipment.push("dumbbells".into());
        equipment.push("resistance_bands".into());
    }

    equipment
}
