//! Normalization - turning loosely-shaped answers into submission-ready ones.
//!
//! Two entry points:
//!
//! - [`normalize_draft`] filters an [`AssessmentDraft`] (raw JSON values from
//!   the fallback cache or any other untyped source) into an
//!   [`AssessmentAnswer`]. Unknown option spellings are dropped, scalar
//!   symptom values become one-element lists, null becomes empty, and a
//!   pattern outside the five labels is discarded.
//! - [`complete`] resolves the pattern and recommendations of a typed answer
//!   into a [`CompletedAssessment`].
//!
//! Corrections are silent: they are logged at debug level, never reported as
//! errors. Normalizing an already normalized record returns it unchanged.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{
    AgeRange, AnswerOption, AssessmentAnswer, CycleLength, FlowHeaviness, PainLevel, Pattern,
    PatternClassifier, PeriodDuration, Recommendation, RecommendationCatalog,
    RecommendationEngine,
};

/// An answer record as it arrives from outside the type system.
///
/// Every field is kept as raw JSON so that nothing is lost before
/// normalization decides what to keep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentDraft {
    #[serde(default)]
    pub age: Value,
    #[serde(default)]
    pub cycle_length: Value,
    #[serde(default)]
    pub period_duration: Value,
    #[serde(default)]
    pub flow_heaviness: Value,
    #[serde(default)]
    pub pain_level: Value,
    #[serde(default)]
    pub physical_symptoms: Value,
    #[serde(default)]
    pub emotional_symptoms: Value,
    #[serde(default)]
    pub other_symptoms: Value,
    #[serde(default)]
    pub pattern: Value,
    #[serde(default)]
    pub recommendations: Value,
}

impl AssessmentDraft {
    /// Parses a draft from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl From<&AssessmentAnswer> for AssessmentDraft {
    fn from(answer: &AssessmentAnswer) -> Self {
        fn option<T: AnswerOption + ToString>(value: Option<T>) -> Value {
            value.map_or(Value::Null, |v| Value::String(v.to_string()))
        }

        Self {
            age: option(answer.age),
            cycle_length: option(answer.cycle_length),
            period_duration: option(answer.period_duration),
            flow_heaviness: option(answer.flow_heaviness),
            pain_level: option(answer.pain_level),
            physical_symptoms: json!(answer.physical_symptoms),
            emotional_symptoms: json!(answer.emotional_symptoms),
            other_symptoms: Value::String(answer.other_symptoms.clone()),
            pattern: option(answer.pattern),
            recommendations: answer.recommendations.as_ref().map_or(Value::Null, |recs| {
                Value::Array(
                    recs.iter()
                        .map(|r| json!({ "id": r.id, "title": r.title, "description": r.description }))
                        .collect(),
                )
            }),
        }
    }
}

/// The fully specified record produced by normalization.
///
/// Unlike [`AssessmentAnswer`], `pattern` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedAssessment {
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
    pub pattern: Pattern,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl From<CompletedAssessment> for AssessmentAnswer {
    fn from(done: CompletedAssessment) -> Self {
        Self {
            age: done.age,
            cycle_length: done.cycle_length,
            period_duration: done.period_duration,
            flow_heaviness: done.flow_heaviness,
            pain_level: done.pain_level,
            physical_symptoms: done.physical_symptoms,
            emotional_symptoms: done.emotional_symptoms,
            other_symptoms: done.other_symptoms,
            pattern: Some(done.pattern),
            recommendations: Some(done.recommendations),
        }
    }
}

/// Filters a raw draft into a typed answer.
pub fn normalize_draft(draft: &AssessmentDraft) -> AssessmentAnswer {
    let answer = AssessmentAnswer {
        age: option_field(&draft.age),
        cycle_length: option_field(&draft.cycle_length),
        period_duration: option_field(&draft.period_duration),
        flow_heaviness: option_field(&draft.flow_heaviness),
        pain_level: option_field(&draft.pain_level),
        physical_symptoms: string_list("physical_symptoms", &draft.physical_symptoms),
        emotional_symptoms: string_list("emotional_symptoms", &draft.emotional_symptoms),
        other_symptoms: match &draft.other_symptoms {
            Value::String(text) => text.clone(),
            _ => String::new(),
        },
        pattern: option_field(&draft.pattern),
        recommendations: recommendation_list(&draft.recommendations),
    };
    normalize_answer(&answer)
}

/// Cleans a typed answer: trims and deduplicates symptom ids and resolves
/// recommendations against the catalog.
pub fn normalize_answer(answer: &AssessmentAnswer) -> AssessmentAnswer {
    AssessmentAnswer {
        physical_symptoms: dedupe(answer.physical_symptoms.iter().map(String::as_str)),
        emotional_symptoms: dedupe(answer.emotional_symptoms.iter().map(String::as_str)),
        recommendations: answer
            .recommendations
            .as_ref()
            .map(|recs| canonical_recommendations(recs.iter().map(|r| r.id.as_str()))),
        ..answer.clone()
    }
}

/// Resolves pattern and recommendations, yielding the submission-ready record.
///
/// A stored pattern is kept; otherwise the classifier decides. Stored
/// recommendations survive only if they are exactly what the resolved
/// pattern yields; anything else is regenerated.
pub fn complete(answer: &AssessmentAnswer) -> CompletedAssessment {
    let answer = normalize_answer(answer);

    let pattern = match answer.pattern {
        Some(pattern) => pattern,
        None => {
            let classification = PatternClassifier::classify_with_rule(&answer);
            debug!(
                pattern = %classification.pattern,
                rule = %classification.rule,
                "Resolved missing pattern during normalization"
            );
            classification.pattern
        }
    };

    let expected = RecommendationEngine::generate(Some(pattern));
    let recommendations = match answer.recommendations {
        Some(recs) if recs == expected => recs,
        Some(recs) if !recs.is_empty() => {
            debug!(
                pattern = %pattern,
                stored = recs.len(),
                "Replacing recommendations that do not match the pattern"
            );
            expected
        }
        _ => expected,
    };

    CompletedAssessment {
        age: answer.age,
        cycle_length: answer.cycle_length,
        period_duration: answer.period_duration,
        flow_heaviness: answer.flow_heaviness,
        pain_level: answer.pain_level,
        physical_symptoms: answer.physical_symptoms,
        emotional_symptoms: answer.emotional_symptoms,
        other_symptoms: answer.other_symptoms,
        pattern,
        recommendations,
    }
}

fn option_field<T: AnswerOption>(value: &Value) -> Option<T> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let parsed = T::parse(text.trim());
            if parsed.is_none() {
                debug!(field = T::FIELD, value = %text, "Discarding unknown option");
            }
            parsed
        }
        other => {
            debug!(field = T::FIELD, value = %other, "Discarding non-string option");
            None
        }
    }
}

fn string_list(field: &'static str, value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => dedupe(items.iter().filter_map(Value::as_str)),
        Value::String(single) => {
            debug!(field, "Coercing scalar into list");
            dedupe(std::iter::once(single.as_str()))
        }
        Value::Null => Vec::new(),
        other => {
            debug!(field, value = %other, "Discarding non-list value");
            Vec::new()
        }
    }
}

fn recommendation_list(value: &Value) -> Option<Vec<Recommendation>> {
    let ids: Vec<&str> = match value {
        Value::Null => return None,
        Value::Array(items) => items.iter().filter_map(recommendation_id).collect(),
        single => recommendation_id(single).into_iter().collect(),
    };
    Some(canonical_recommendations(ids.into_iter()))
}

fn recommendation_id(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) => map.get("id").and_then(Value::as_str),
        Value::String(id) => Some(id.as_str()),
        _ => None,
    }
}

fn canonical_recommendations<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    ids.filter_map(|id| {
        let entry = RecommendationCatalog::find(id.trim());
        if entry.is_none() {
            debug!(id, "Dropping recommendation outside the catalog");
        }
        entry
    })
    .filter(|entry| seen.insert(entry.id))
    .map(|entry| entry.to_recommendation())
    .collect()
}

fn dedupe<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}
