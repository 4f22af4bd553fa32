//! Answer vocabulary and the accumulating answer record.

use serde::{Deserialize, Serialize};

use super::macros::answer_options;
use super::{Pattern, Recommendation};

/// A closed set of options for one question.
///
/// Implemented by every answer enum (and by [`Pattern`]) so that loosely-typed
/// input can be filtered generically.
pub trait AnswerOption: Sized + Copy {
    /// Name of the answer field this option belongs to.
    const FIELD: &'static str;

    /// Parses the wire spelling, returning `None` for anything outside the set.
    fn parse(value: &str) -> Option<Self>;
}

answer_options! {
    /// Age bracket of the respondent (step 1).
    AgeRange, field = "age" {
        Under13 => "under-13",
        From13To17 => "13-17",
        From18To24 => "18-24",
        TwentyFivePlus => "25-plus",
    }
}

answer_options! {
    /// Typical number of days from one period to the next (step 2).
    CycleLength, field = "cycle_length" {
        LessThan21 => "less-than-21",
        Days21To25 => "21-25",
        Days26To30 => "26-30",
        Days31To35 => "31-35",
        Days36To40 => "36-40",
        Irregular => "irregular",
        NotSure => "not-sure",
        Other => "other",
    }
}

answer_options! {
    /// How many days a period usually lasts (step 3).
    PeriodDuration, field = "period_duration" {
        Days1To3 => "1-3",
        Days4To5 => "4-5",
        Days6To7 => "6-7",
        EightPlus => "8-plus",
        Varies => "varies",
        NotSure => "not-sure",
        Other => "other",
    }
}

answer_options! {
    /// Reported flow (step 4).
    FlowHeaviness, field = "flow_heaviness" {
        Light => "light",
        Moderate => "moderate",
        Heavy => "heavy",
        VeryHeavy => "very-heavy",
        Varies => "varies",
        NotSure => "not-sure",
    }
}

answer_options! {
    /// Reported period pain (step 5).
    PainLevel, field = "pain_level" {
        NoPain => "no-pain",
        Mild => "mild",
        Moderate => "moderate",
        Severe => "severe",
        Debilitating => "debilitating",
        Varies => "varies",
    }
}

/// Physical symptom identifiers offered on the symptoms step.
///
/// Unknown identifiers are still accepted verbatim.
pub mod physical {
    pub const CRAMPS: &str = "cramps";
    pub const BLOATING: &str = "bloating";
    pub const BREAST_TENDERNESS: &str = "breast-tenderness";
    pub const HEADACHES: &str = "headaches";
    pub const BACK_PAIN: &str = "back-pain";
    pub const FATIGUE: &str = "fatigue";
    pub const DIZZINESS: &str = "dizziness";
    pub const NAUSEA: &str = "nausea";
    pub const ACNE: &str = "acne";
    pub const FOOD_CRAVINGS: &str = "food-cravings";

    pub const ALL: &[&str] = &[
        CRAMPS,
        BLOATING,
        BREAST_TENDERNESS,
        HEADACHES,
        BACK_PAIN,
        FATIGUE,
        DIZZINESS,
        NAUSEA,
        ACNE,
        FOOD_CRAVINGS,
    ];
}

/// Emotional symptom identifiers offered on the symptoms step.
pub mod emotional {
    pub const MOOD_SWINGS: &str = "mood-swings";
    pub const IRRITABILITY: &str = "irritability";
    pub const ANXIETY: &str = "anxiety";
    pub const DEPRESSION: &str = "depression";
    pub const DIFFICULTY_CONCENTRATING: &str = "difficulty-concentrating";
    pub const LOW_ENERGY: &str = "low-energy";

    pub const ALL: &[&str] = &[
        MOOD_SWINGS,
        IRRITABILITY,
        ANXIETY,
        DEPRESSION,
        DIFFICULTY_CONCENTRATING,
        LOW_ENERGY,
    ];
}

/// The answers accumulated across the six wizard steps.
///
/// Symptom sequences are plain vectors with serde defaults, so they can never
/// be absent from a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentAnswer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_length: Option<CycleLength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_duration: Option<PeriodDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_heaviness: Option<FlowHeaviness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pain_level: Option<PainLevel>,
    #[serde(default)]
    pub physical_symptoms: Vec<String>,
    #[serde(default)]
    pub emotional_symptoms: Vec<String>,
    #[serde(default)]
    pub other_symptoms: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<Recommendation>>,
}

impl AssessmentAnswer {
    /// Creates an empty answer record.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any of cycle length, period duration, flow or pain is set.
    pub fn has_core_metrics(&self) -> bool {
        self.cycle_length.is_some()
            || self.period_duration.is_some()
            || self.flow_heaviness.is_some()
            || self.pain_level.is_some()
    }

    /// True when a physical symptom in `ids` was reported.
    pub fn reports_any_physical(&self, ids: &[&str]) -> bool {
        self.physical_symptoms
            .iter()
            .any(|symptom| ids.contains(&symptom.as_str()))
    }
}

/// Symptom answers collected together on the final step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSelection {
    #[serde(default)]
    pub physical: Vec<String>,
    #[serde(default)]
    pub emotional: Vec<String>,
    #[serde(default)]
    pub other: String,
}

impl SymptomSelection {
    pub fn new<P, E>(physical: P, emotional: E) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            physical: physical.into_iter().map(Into::into).collect(),
            emotional: emotional.into_iter().map(Into::into).collect(),
            other: String::new(),
        }
    }

    /// Sets the free-text field.
    pub fn with_other(mut self, other: impl Into<String>) -> Self {
        self.other = other.into();
        self
    }
}

/// Partial update for an [`AssessmentAnswer`].
///
/// Fields left as `None` are untouched by [`AnswerPatch::apply_to`]; merges
/// are field-scoped, never whole-record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerPatch {
    pub age: Option<AgeRange>,
    pub cycle_length: Option<CycleLength>,
    pub period_duration: Option<PeriodDuration>,
    pub flow_heaviness: Option<FlowHeaviness>,
    pub pain_level: Option<PainLevel>,
    pub physical_symptoms: Option<Vec<String>>,
    pub emotional_symptoms: Option<Vec<String>>,
    pub other_symptoms: Option<String>,
    pub pattern: Option<Pattern>,
    pub recommendations: Option<Vec<Recommendation>>,
}

impl AnswerPatch {
    pub fn is_empty(&self) -> bool {
        *self == AnswerPatch::default()
    }

    /// Merges the patch into `answer`, returning true if anything changed.
    pub fn apply_to(self, answer: &mut AssessmentAnswer) -> bool {
        let mut changed = false;
        changed |= merge(&mut answer.age, self.age);
        changed |= merge(&mut answer.cycle_length, self.cycle_length);
        changed |= merge(&mut answer.period_duration, self.period_duration);
        changed |= merge(&mut answer.flow_heaviness, self.flow_heaviness);
        changed |= merge(&mut answer.pain_level, self.pain_level);
        changed |= merge(&mut answer.pattern, self.pattern);
        changed |= merge(&mut answer.recommendations, self.recommendations);
        changed |= replace(&mut answer.physical_symptoms, self.physical_symptoms);
        changed |= replace(&mut answer.emotional_symptoms, self.emotional_symptoms);
        changed |= replace(&mut answer.other_symptoms, self.other_symptoms);
        changed
    }
}

impl From<AssessmentAnswer> for AnswerPatch {
    /// A patch that reproduces every populated field of `answer`.
    fn from(answer: AssessmentAnswer) -> Self {
        Self {
            age: answer.age,
            cycle_length: answer.cycle_length,
            period_duration: answer.period_duration,
            flow_heaviness: answer.flow_heaviness,
            pain_level: answer.pain_level,
            physical_symptoms: Some(answer.physical_symptoms),
            emotional_symptoms: Some(answer.emotional_symptoms),
            other_symptoms: Some(answer.other_symptoms),
            pattern: answer.pattern,
            recommendations: answer.recommendations,
        }
    }
}

fn merge<T: PartialEq>(slot: &mut Option<T>, incoming: Option<T>) -> bool {
    match incoming {
        Some(value) if slot.as_ref() != Some(&value) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

fn replace<T: PartialEq>(slot: &mut T, incoming: Option<T>) -> bool {
    match incoming {
        Some(value) if *slot != value => {
            *slot = value;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_enums_use_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&AgeRange::From13To17).unwrap(),
            "\"13-17\""
        );
        assert_eq!(
            serde_json::to_string(&CycleLength::LessThan21).unwrap(),
            "\"less-than-21\""
        );
        assert_eq!(
            serde_json::to_string(&PeriodDuration::EightPlus).unwrap(),
            "\"8-plus\""
        );
        assert_eq!(
            serde_json::to_string(&FlowHeaviness::VeryHeavy).unwrap(),
            "\"very-heavy\""
        );
        assert_eq!(serde_json::to_string(&PainLevel::NoPain).unwrap(), "\"no-pain\"");
    }

    #[test]
    fn from_str_accepts_every_listed_option() {
        for age in AgeRange::ALL {
            assert_eq!(age.as_str().parse::<AgeRange>().unwrap(), *age);
        }
        for length in CycleLength::ALL {
            assert_eq!(length.as_str().parse::<CycleLength>().unwrap(), *length);
        }
        for pain in PainLevel::ALL {
            assert_eq!(pain.to_string().parse::<PainLevel>().unwrap(), *pain);
        }
    }

    #[test]
    fn from_str_rejects_unknown_option() {
        let err = "extreme".parse::<PainLevel>().unwrap_err();
        assert!(err.to_string().contains("pain_level"));
        assert!("13_17".parse::<AgeRange>().is_err());
    }

    #[test]
    fn option_counts_match_questionnaire() {
        assert_eq!(AgeRange::ALL.len(), 4);
        assert_eq!(CycleLength::ALL.len(), 8);
        assert_eq!(PeriodDuration::ALL.len(), 7);
        assert_eq!(FlowHeaviness::ALL.len(), 6);
        assert_eq!(PainLevel::ALL.len(), 6);
    }

    #[test]
    fn deserializing_sparse_record_defaults_symptoms() {
        let answer: AssessmentAnswer = serde_json::from_str(r#"{"age":"18-24"}"#).unwrap();
        assert_eq!(answer.age, Some(AgeRange::From18To24));
        assert!(answer.physical_symptoms.is_empty());
        assert!(answer.emotional_symptoms.is_empty());
        assert_eq!(answer.other_symptoms, "");
        assert_eq!(answer.pattern, None);
    }

    #[test]
    fn has_core_metrics_ignores_age_and_symptoms() {
        let mut answer = AssessmentAnswer {
            age: Some(AgeRange::TwentyFivePlus),
            physical_symptoms: vec![physical::FATIGUE.to_string()],
            ..Default::default()
        };
        assert!(!answer.has_core_metrics());

        answer.pain_level = Some(PainLevel::Mild);
        assert!(answer.has_core_metrics());
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut answer = AssessmentAnswer {
            age: Some(AgeRange::From18To24),
            ..Default::default()
        };
        let patch = AnswerPatch {
            cycle_length: Some(CycleLength::Days26To30),
            ..Default::default()
        };

        assert!(patch.apply_to(&mut answer));
        assert_eq!(answer.age, Some(AgeRange::From18To24));
        assert_eq!(answer.cycle_length, Some(CycleLength::Days26To30));
    }

    #[test]
    fn patch_with_same_values_reports_no_change() {
        let mut answer = AssessmentAnswer {
            flow_heaviness: Some(FlowHeaviness::Light),
            physical_symptoms: vec!["acne".to_string()],
            ..Default::default()
        };
        let patch = AnswerPatch {
            flow_heaviness: Some(FlowHeaviness::Light),
            physical_symptoms: Some(vec!["acne".to_string()]),
            ..Default::default()
        };
        assert!(!patch.apply_to(&mut answer));
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(AnswerPatch::default().is_empty());
        assert!(!AnswerPatch {
            other_symptoms: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn patch_from_answer_rebuilds_it_on_empty_record() {
        let answer = AssessmentAnswer {
            age: Some(AgeRange::Under13),
            emotional_symptoms: vec![emotional::MOOD_SWINGS.to_string()],
            other_symptoms: "spotting".to_string(),
            pattern: Some(Pattern::Developing),
            ..Default::default()
        };
        let mut rebuilt = AssessmentAnswer::new();
        AnswerPatch::from(answer.clone()).apply_to(&mut rebuilt);
        assert_eq!(rebuilt, answer);
    }

    #[test]
    fn symptom_selection_builder_collects_strings() {
        let selection = SymptomSelection::new([physical::CRAMPS], [emotional::ANXIETY])
            .with_other("insomnia");
        assert_eq!(selection.physical, vec!["cramps"]);
        assert_eq!(selection.emotional, vec!["anxiety"]);
        assert_eq!(selection.other, "insomnia");
    }
}
