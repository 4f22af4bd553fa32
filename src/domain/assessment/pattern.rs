//! Pattern classification - the priority-ordered decision tree.
//!
//! The rule order is the contract:
//!
//! 1. Developing: age under 13 or 13-17 (age beats every other signal)
//! 2. Irregular: cycle length irregular, less than 21 or 36-40 days
//! 3. Heavy: heavy or very heavy flow, or periods of 8+ days
//! 4. Pain: severe or debilitating pain
//! 5. Symptom fallback, only when cycle length, duration, flow and pain are
//!    all unanswered: pain-type symptoms give Pain, fatigue-type give Heavy
//! 6. Regular otherwise
//!
//! The fallback never reaches Irregular or Developing.

use std::fmt;

use super::macros::answer_options;
use super::{physical, AgeRange, AssessmentAnswer, CycleLength, FlowHeaviness, PainLevel, PeriodDuration};

answer_options! {
    /// The five mutually exclusive cycle patterns.
    Pattern, field = "pattern" {
        Regular => "regular",
        Irregular => "irregular",
        Heavy => "heavy",
        Pain => "pain",
        Developing => "developing",
    }
}

/// Symptoms that point towards a pain pattern in the fallback rule.
pub const PAIN_SIGNAL_SYMPTOMS: &[&str] = &[
    physical::BACK_PAIN,
    physical::BREAST_TENDERNESS,
    physical::HEADACHES,
];

/// Symptoms that point towards a heavy pattern in the fallback rule.
pub const HEAVY_SIGNAL_SYMPTOMS: &[&str] = &[physical::FATIGUE, physical::DIZZINESS];

/// Which rule of the decision tree produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassificationRule {
    DevelopingAge,
    IrregularTiming,
    HeavyFlow,
    SeverePain,
    SymptomFallback,
    Default,
}

impl ClassificationRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationRule::DevelopingAge => "developing_age",
            ClassificationRule::IrregularTiming => "irregular_timing",
            ClassificationRule::HeavyFlow => "heavy_flow",
            ClassificationRule::SeverePain => "severe_pain",
            ClassificationRule::SymptomFallback => "symptom_fallback",
            ClassificationRule::Default => "default",
        }
    }
}

impl fmt::Display for ClassificationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pattern together with the rule that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub pattern: Pattern,
    pub rule: ClassificationRule,
}

impl Classification {
    fn new(pattern: Pattern, rule: ClassificationRule) -> Self {
        Self { pattern, rule }
    }
}

/// Stateless classifier over (possibly partial) answers.
pub struct PatternClassifier;

impl PatternClassifier {
    /// Maps answers to exactly one pattern. Never fails.
    pub fn classify(answer: &AssessmentAnswer) -> Pattern {
        Self::classify_with_rule(answer).pattern
    }

    /// Like [`classify`](Self::classify), also reporting the matching rule.
    pub fn classify_with_rule(answer: &AssessmentAnswer) -> Classification {
        if matches!(answer.age, Some(AgeRange::Under13 | AgeRange::From13To17)) {
            return Classification::new(Pattern::Developing, ClassificationRule::DevelopingAge);
        }

        if matches!(
            answer.cycle_length,
            Some(CycleLength::Irregular | CycleLength::LessThan21 | CycleLength::Days36To40)
        ) {
            return Classification::new(Pattern::Irregular, ClassificationRule::IrregularTiming);
        }

        if matches!(
            answer.flow_heaviness,
            Some(FlowHeaviness::Heavy | FlowHeaviness::VeryHeavy)
        ) || answer.period_duration == Some(PeriodDuration::EightPlus)
        {
            return Classification::new(Pattern::Heavy, ClassificationRule::HeavyFlow);
        }

        if matches!(
            answer.pain_level,
            Some(PainLevel::Severe | PainLevel::Debilitating)
        ) {
            return Classification::new(Pattern::Pain, ClassificationRule::SeverePain);
        }

        if !answer.has_core_metrics() {
            if answer.reports_any_physical(PAIN_SIGNAL_SYMPTOMS) {
                return Classification::new(Pattern::Pain, ClassificationRule::SymptomFallback);
            }
            if answer.reports_any_physical(HEAVY_SIGNAL_SYMPTOMS) {
                return Classification::new(Pattern::Heavy, ClassificationRule::SymptomFallback);
            }
        }

        Classification::new(Pattern::Regular, ClassificationRule::Default)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn any_answer() -> impl Strategy<Value = AssessmentAnswer> {
        (
            prop::option::of(prop::sample::select(AgeRange::ALL.to_vec())),
            prop::option::of(prop::sample::select(CycleLength::ALL.to_vec())),
            prop::option::of(prop::sample::select(PeriodDuration::ALL.to_vec())),
            prop::option::of(prop::sample::select(FlowHeaviness::ALL.to_vec())),
            prop::option::of(prop::sample::select(PainLevel::ALL.to_vec())),
            prop::collection::vec(prop::sample::select(physical::ALL.to_vec()), 0..5),
        )
            .prop_map(|(age, cycle_length, period_duration, flow_heaviness, pain_level, physical)| {
                AssessmentAnswer {
                    age,
                    cycle_length,
                    period_duration,
                    flow_heaviness,
                    pain_level,
                    physical_symptoms: physical.into_iter().map(String::from).collect(),
                    ..Default::default()
                }
            })
    }

    proptest! {
        /// Property: every input, however sparse, gets one of the five labels
        /// and the same input always gets the same label.
        #[test]
        fn classification_is_total_and_deterministic(answer in any_answer()) {
            let first = PatternClassifier::classify(&answer);
            let second = PatternClassifier::classify(&answer);
            prop_assert!(Pattern::ALL.contains(&first));
            prop_assert_eq!(first, second);
        }

        /// Property: the symptom fallback never fires once a core metric is answered.
        #[test]
        fn fallback_requires_all_core_metrics_absent(answer in any_answer()) {
            let result = PatternClassifier::classify_with_rule(&answer);
            if answer.has_core_metrics() {
                prop_assert_ne!(result.rule, ClassificationRule::SymptomFallback);
            }
        }

        /// Property: a developing age decides the outcome on its own.
        #[test]
        fn developing_age_dominates(answer in any_answer()) {
            let teen = AssessmentAnswer { age: Some(AgeRange::From13To17), ..answer };
            prop_assert_eq!(PatternClassifier::classify(&teen), Pattern::Developing);
        }
    }
}
