//! Wizard steps and the per-step accessors.
//!
//! # Step Order
//!
//! 1. Age → 2. CycleLength → 3. PeriodDuration → 4. FlowHeaviness →
//! 5. PainLevel → 6. Symptoms
//!
//! Each step has an [`AnswerField`] marker type. `store.accessor::<F>()`
//! gives a [`StepAccessor`] exposing `value()` and `set_value()` for exactly
//! that field, writing through `ResultStore::update_result`. Accessors do
//! not validate; the caller decides which options to offer.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::store::ResultStore;
use super::{
    AgeRange, AnswerPatch, AssessmentAnswer, CycleLength, FlowHeaviness, PainLevel,
    PeriodDuration, SymptomSelection,
};

/// One question of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    Age,
    CycleLength,
    PeriodDuration,
    FlowHeaviness,
    PainLevel,
    Symptoms,
}

impl WizardStep {
    /// The canonical order of steps.
    pub const ORDER: [WizardStep; 6] = [
        WizardStep::Age,
        WizardStep::CycleLength,
        WizardStep::PeriodDuration,
        WizardStep::FlowHeaviness,
        WizardStep::PainLevel,
        WizardStep::Symptoms,
    ];

    pub fn first() -> WizardStep {
        Self::ORDER[0]
    }

    /// 0-based position in [`ORDER`](Self::ORDER).
    pub fn order_index(&self) -> usize {
        match self {
            WizardStep::Age => 0,
            WizardStep::CycleLength => 1,
            WizardStep::PeriodDuration => 2,
            WizardStep::FlowHeaviness => 3,
            WizardStep::PainLevel => 4,
            WizardStep::Symptoms => 5,
        }
    }

    /// 1-based step number as shown to the user.
    pub fn number(&self) -> usize {
        self.order_index() + 1
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ORDER.get(self.order_index() + 1).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        self.order_index()
            .checked_sub(1)
            .and_then(|idx| Self::ORDER.get(idx).copied())
    }

    /// False only for the symptoms step, which may be left empty.
    pub fn requires_answer(&self) -> bool {
        !matches!(self, WizardStep::Symptoms)
    }

    /// True when the step's guard allows continuing.
    pub fn is_answered(&self, answer: Option<&AssessmentAnswer>) -> bool {
        if !self.requires_answer() {
            return true;
        }
        let Some(answer) = answer else {
            return false;
        };
        match self {
            WizardStep::Age => AgeField::read(answer).is_some(),
            WizardStep::CycleLength => CycleLengthField::read(answer).is_some(),
            WizardStep::PeriodDuration => PeriodDurationField::read(answer).is_some(),
            WizardStep::FlowHeaviness => FlowHeavinessField::read(answer).is_some(),
            WizardStep::PainLevel => PainLevelField::read(answer).is_some(),
            WizardStep::Symptoms => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Age => "age",
            WizardStep::CycleLength => "cycle-length",
            WizardStep::PeriodDuration => "period-duration",
            WizardStep::FlowHeaviness => "flow-heaviness",
            WizardStep::PainLevel => "pain-level",
            WizardStep::Symptoms => "symptoms",
        }
    }

    pub fn parse(value: &str) -> Option<WizardStep> {
        Self::ORDER.into_iter().find(|step| step.as_str() == value)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Binds a wizard step to the answer field(s) it writes.
pub trait AnswerField {
    type Value: Clone;

    const STEP: WizardStep;

    /// Reads the step's current value from a record.
    fn read(answer: &AssessmentAnswer) -> Option<Self::Value>;

    /// Builds the patch that stores `value`.
    fn patch(value: Self::Value) -> AnswerPatch;
}

pub struct AgeField;
pub struct CycleLengthField;
pub struct PeriodDurationField;
pub struct FlowHeavinessField;
pub struct PainLevelField;
pub struct SymptomsField;

impl AnswerField for AgeField {
    type Value = AgeRange;
    const STEP: WizardStep = WizardStep::Age;

    fn read(answer: &AssessmentAnswer) -> Option<AgeRange> {
        answer.age
    }

    fn patch(value: AgeRange) -> AnswerPatch {
        AnswerPatch {
            age: Some(value),
            ..Default::default()
        }
    }
}

impl AnswerField for CycleLengthField {
    type Value = CycleLength;
    const STEP: WizardStep = WizardStep::CycleLength;

    fn read(answer: &AssessmentAnswer) -> Option<CycleLength> {
        answer.cycle_length
    }

    fn patch(value: CycleLength) -> AnswerPatch {
        AnswerPatch {
            cycle_length: Some(value),
            ..Default::default()
        }
    }
}

impl AnswerField for PeriodDurationField {
    type Value = PeriodDuration;
    const STEP: WizardStep = WizardStep::PeriodDuration;

    fn read(answer: &AssessmentAnswer) -> Option<PeriodDuration> {
        answer.period_duration
    }

    fn patch(value: PeriodDuration) -> AnswerPatch {
        AnswerPatch {
            period_duration: Some(value),
            ..Default::default()
        }
    }
}

impl AnswerField for FlowHeavinessField {
    type Value = FlowHeaviness;
    const STEP: WizardStep = WizardStep::FlowHeaviness;

    fn read(answer: &AssessmentAnswer) -> Option<FlowHeaviness> {
        answer.flow_heaviness
    }

    fn patch(value: FlowHeaviness) -> AnswerPatch {
        AnswerPatch {
            flow_heaviness: Some(value),
            ..Default::default()
        }
    }
}

impl AnswerField for PainLevelField {
    type Value = PainLevel;
    const STEP: WizardStep = WizardStep::PainLevel;

    fn read(answer: &AssessmentAnswer) -> Option<PainLevel> {
        answer.pain_level
    }

    fn patch(value: PainLevel) -> AnswerPatch {
        AnswerPatch {
            pain_level: Some(value),
            ..Default::default()
        }
    }
}

impl AnswerField for SymptomsField {
    type Value = SymptomSelection;
    const STEP: WizardStep = WizardStep::Symptoms;

    fn read(answer: &AssessmentAnswer) -> Option<SymptomSelection> {
        Some(SymptomSelection {
            physical: answer.physical_symptoms.clone(),
            emotional: answer.emotional_symptoms.clone(),
            other: answer.other_symptoms.clone(),
        })
    }

    fn patch(value: SymptomSelection) -> AnswerPatch {
        AnswerPatch {
            physical_symptoms: Some(value.physical),
            emotional_symptoms: Some(value.emotional),
            other_symptoms: Some(value.other),
            ..Default::default()
        }
    }
}

/// Thin read/write facade over one step's field(s).
pub struct StepAccessor<'a, F: AnswerField> {
    store: &'a mut ResultStore,
    _field: PhantomData<F>,
}

impl<'a, F: AnswerField> StepAccessor<'a, F> {
    pub(super) fn new(store: &'a mut ResultStore) -> Self {
        Self {
            store,
            _field: PhantomData,
        }
    }

    pub fn step(&self) -> WizardStep {
        F::STEP
    }

    /// Current value, `None` until the step has been answered.
    pub fn value(&self) -> Option<F::Value> {
        self.store.record().and_then(F::read)
    }

    /// Writes the value through `update_result`. Returns true if it changed.
    pub fn set_value(&mut self, value: F::Value) -> bool {
        self.store.update_result(F::patch(value))
    }
}
