use serde::{Deserialize, Serialize};

use super::domain::{
    AlternativeLegalBasis, BalanceAnswers, ClosedOption, DataObtainment, DecisionPower,
    Importance, InformedTiming, InteractionFrequency, LiaInput, Relationship,
};
use super::error::LiaError;

/// Partially completed questionnaire held by the wizard.
///
/// `None` marks a select the user has not answered yet, which is distinct
/// from an answered option that happens to carry zero weight. Toggles start
/// out `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiaDraft {
    pub alternative_legal_basis: Option<AlternativeLegalBasis>,
    pub legal_exception: bool,
    pub necessary_for_organization: bool,
    pub importance: Option<Importance>,
    pub necessary_for_third_party: bool,
    pub relationship: Option<Relationship>,
    pub interaction_frequency: Option<InteractionFrequency>,
    pub data_obtainment: Option<DataObtainment>,
    pub decision_power: Option<DecisionPower>,
    pub informed_timing: Option<InformedTiming>,
    pub right_to_object: bool,
    #[serde(flatten)]
    pub balance: BalanceAnswers,
}

/// Draft as posted by the wizard.
///
/// Selects arrive as strings; a missing, `null`, or empty value is
/// unanswered. Anything else must be a wire value of the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiaDraftAnswers {
    pub alternative_legal_basis: Option<String>,
    pub legal_exception: bool,
    pub necessary_for_organization: bool,
    pub importance: Option<String>,
    pub necessary_for_third_party: bool,
    pub relationship: Option<String>,
    pub interaction_frequency: Option<String>,
    pub data_obtainment: Option<String>,
    pub decision_power: Option<String>,
    pub informed_timing: Option<String>,
    pub right_to_object: bool,
    #[serde(flatten)]
    pub balance: BalanceAnswers,
}

impl LiaDraftAnswers {
    /// Convert to a typed draft, failing on the first out-of-set select.
    pub fn parse(&self) -> Result<LiaDraft, LiaError> {
        Ok(LiaDraft {
            alternative_legal_basis: parse_select(&self.alternative_legal_basis)?,
            legal_exception: self.legal_exception,
            necessary_for_organization: self.necessary_for_organization,
            importance: parse_select(&self.importance)?,
            necessary_for_third_party: self.necessary_for_third_party,
            relationship: parse_select(&self.relationship)?,
            interaction_frequency: parse_select(&self.interaction_frequency)?,
            data_obtainment: parse_select(&self.data_obtainment)?,
            decision_power: parse_select(&self.decision_power)?,
            informed_timing: parse_select(&self.informed_timing)?,
            right_to_object: self.right_to_object,
            balance: self.balance,
        })
    }
}

fn parse_select<T: ClosedOption>(raw: &Option<String>) -> Result<Option<T>, LiaError> {
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => T::parse(value).map(Some),
    }
}

/// A single typed change to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LiaAnswer {
    AlternativeLegalBasis(Option<AlternativeLegalBasis>),
    LegalException(bool),
    NecessaryForOrganization(bool),
    Importance(Option<Importance>),
    NecessaryForThirdParty(bool),
    Relationship(Option<Relationship>),
    InteractionFrequency(Option<InteractionFrequency>),
    DataObtainment(Option<DataObtainment>),
    DecisionPower(Option<DecisionPower>),
    InformedTiming(Option<InformedTiming>),
    RightToObject(bool),
    DataSubjectExpectation(bool),
    ProcessingExpectation(bool),
    AddedValue(bool),
    NegativeImpact(bool),
    UnwarrantedHarm(bool),
    PrejudiceToController(bool),
    PrejudiceToThirdParty(bool),
    DataSubjectInterest(bool),
    IntrusiveProcessing(bool),
}

impl LiaDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answer in place.
    pub fn apply(&mut self, answer: LiaAnswer) -> &mut Self {
        let balance = &mut self.balance;
        match answer {
            LiaAnswer::AlternativeLegalBasis(value) => self.alternative_legal_basis = value,
            LiaAnswer::LegalException(value) => self.legal_exception = value,
            LiaAnswer::NecessaryForOrganization(value) => self.necessary_for_organization = value,
            LiaAnswer::Importance(value) => self.importance = value,
            LiaAnswer::NecessaryForThirdParty(value) => self.necessary_for_third_party = value,
            LiaAnswer::Relationship(value) => self.relationship = value,
            LiaAnswer::InteractionFrequency(value) => self.interaction_frequency = value,
            LiaAnswer::DataObtainment(value) => self.data_obtainment = value,
            LiaAnswer::DecisionPower(value) => self.decision_power = value,
            LiaAnswer::InformedTiming(value) => self.informed_timing = value,
            LiaAnswer::RightToObject(value) => self.right_to_object = value,
            LiaAnswer::DataSubjectExpectation(value) => balance.data_subject_expectation = value,
            LiaAnswer::ProcessingExpectation(value) => balance.processing_expectation = value,
            LiaAnswer::AddedValue(value) => balance.added_value = value,
            LiaAnswer::NegativeImpact(value) => balance.negative_impact = value,
            LiaAnswer::UnwarrantedHarm(value) => balance.unwarranted_harm = value,
            LiaAnswer::PrejudiceToController(value) => balance.prejudice_to_controller = value,
            LiaAnswer::PrejudiceToThirdParty(value) => balance.prejudice_to_third_party = value,
            LiaAnswer::DataSubjectInterest(value) => balance.data_subject_interest = value,
            LiaAnswer::IntrusiveProcessing(value) => balance.intrusive_processing = value,
        }
        self
    }

    /// Builder form of [`LiaDraft::apply`].
    pub fn with(mut self, answer: LiaAnswer) -> Self {
        self.apply(answer);
        self
    }

    /// Wire names of the selects still unanswered, in questionnaire order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let answered = [
            (
                AlternativeLegalBasis::FIELD,
                self.alternative_legal_basis.is_some(),
            ),
            (Importance::FIELD, self.importance.is_some()),
            (Relationship::FIELD, self.relationship.is_some()),
            (
                InteractionFrequency::FIELD,
                self.interaction_frequency.is_some(),
            ),
            (DataObtainment::FIELD, self.data_obtainment.is_some()),
            (DecisionPower::FIELD, self.decision_power.is_some()),
            (InformedTiming::FIELD, self.informed_timing.is_some()),
        ];

        answered
            .into_iter()
            .filter(|(_, is_answered)| !is_answered)
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Promote the draft to a scoring input once every select is answered.
    pub fn complete(&self) -> Result<LiaInput, LiaError> {
        match (
            self.alternative_legal_basis,
            self.importance,
            self.relationship,
            self.interaction_frequency,
            self.data_obtainment,
            self.decision_power,
            self.informed_timing,
        ) {
            (
                Some(alternative_legal_basis),
                Some(importance),
                Some(relationship),
                Some(interaction_frequency),
                Some(data_obtainment),
                Some(decision_power),
                Some(informed_timing),
            ) => Ok(LiaInput {
                alternative_legal_basis,
                legal_exception: self.legal_exception,
                necessary_for_organization: self.necessary_for_organization,
                importance,
                necessary_for_third_party: self.necessary_for_third_party,
                relationship,
                interaction_frequency,
                data_obtainment,
                decision_power,
                informed_timing,
                right_to_object: self.right_to_object,
                balance: self.balance,
            }),
            _ => Err(LiaError::Incomplete {
                missing: self.missing_fields(),
            }),
        }
    }
}

impl From<LiaInput> for LiaDraft {
    fn from(input: LiaInput) -> Self {
        Self {
            alternative_legal_basis: Some(input.alternative_legal_basis),
            legal_exception: input.legal_exception,
            necessary_for_organization: input.necessary_for_organization,
            importance: Some(input.importance),
            necessary_for_third_party: input.necessary_for_third_party,
            relationship: Some(input.relationship),
            interaction_frequency: Some(input.interaction_frequency),
            data_obtainment: Some(input.data_obtainment),
            decision_power: Some(input.decision_power),
            informed_timing: Some(input.informed_timing),
            right_to_object: input.right_to_object,
            balance: input.balance,
        }
    }
}
