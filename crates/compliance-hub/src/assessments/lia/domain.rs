use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LiaError;

/// Questionnaire select with a closed set of wire values.
pub trait ClosedOption: Copy + Sized + 'static {
    /// Wire name of the questionnaire field that carries this option.
    const FIELD: &'static str;

    fn options() -> &'static [Self];

    fn as_str(self) -> &'static str;

    /// Parse a wire value, naming the field when it is outside the set.
    /// Matching is exact; surrounding whitespace is not stripped.
    fn parse(raw: &str) -> Result<Self, LiaError> {
        Self::options()
            .iter()
            .copied()
            .find(|option| option.as_str() == raw)
            .ok_or_else(|| LiaError::InvalidInput {
                field: Self::FIELD,
                value: raw.to_string(),
            })
    }
}

/// Legal basis that could be used instead of legitimate interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlternativeLegalBasis {
    None,
    Consent,
    Contract,
    LegalObligation,
    VitalInterest,
    PublicInterest,
}

impl ClosedOption for AlternativeLegalBasis {
    const FIELD: &'static str = "alternativeLegalBasis";

    fn options() -> &'static [Self] {
        &[
            Self::None,
            Self::Consent,
            Self::Contract,
            Self::LegalObligation,
            Self::VitalInterest,
            Self::PublicInterest,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Consent => "consent",
            Self::Contract => "contract",
            Self::LegalObligation => "legal-obligation",
            Self::VitalInterest => "vital-interest",
            Self::PublicInterest => "public-interest",
        }
    }
}

/// How important the processing is to the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    NoImpact,
    Benefit,
    VeryImportant,
    BusinessCritical,
}

impl ClosedOption for Importance {
    const FIELD: &'static str = "importance";

    fn options() -> &'static [Self] {
        &[
            Self::NoImpact,
            Self::Benefit,
            Self::VeryImportant,
            Self::BusinessCritical,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::NoImpact => "no-impact",
            Self::Benefit => "benefit",
            Self::VeryImportant => "very-important",
            Self::BusinessCritical => "business-critical",
        }
    }
}

/// Relationship between the organisation and the data subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    EmployeeFreelancer,
    Supplier,
    ExistingClientNatural,
    ExistingClientLegal,
    FormerClient,
    PotentialClient,
    Others,
}

impl ClosedOption for Relationship {
    const FIELD: &'static str = "relationship";

    fn options() -> &'static [Self] {
        &[
            Self::EmployeeFreelancer,
            Self::Supplier,
            Self::ExistingClientNatural,
            Self::ExistingClientLegal,
            Self::FormerClient,
            Self::PotentialClient,
            Self::Others,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::EmployeeFreelancer => "employee-freelancer",
            Self::Supplier => "supplier",
            Self::ExistingClientNatural => "existing-client-natural",
            Self::ExistingClientLegal => "existing-client-legal",
            Self::FormerClient => "former-client",
            Self::PotentialClient => "potential-client",
            Self::Others => "others",
        }
    }
}

/// How often the organisation interacts with the data subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionFrequency {
    Daily,
    Weekly,
    Monthly,
    SeveralTimesYear,
    OnceYear,
    LessThanOnceYear,
}

impl ClosedOption for InteractionFrequency {
    const FIELD: &'static str = "interactionFrequency";

    fn options() -> &'static [Self] {
        &[
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::SeveralTimesYear,
            Self::OnceYear,
            Self::LessThanOnceYear,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::SeveralTimesYear => "several-times-year",
            Self::OnceYear => "once-year",
            Self::LessThanOnceYear => "less-than-once-year",
        }
    }
}

/// Where the personal data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataObtainment {
    Directly,
    Indirectly,
    Mix,
}

impl ClosedOption for DataObtainment {
    const FIELD: &'static str = "dataObtainment";

    fn options() -> &'static [Self] {
        &[Self::Directly, Self::Indirectly, Self::Mix]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Directly => "directly",
            Self::Indirectly => "indirectly",
            Self::Mix => "mix",
        }
    }
}

/// Which party holds the power in the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionPower {
    Organisation,
    DataSubject,
    Balanced,
}

impl ClosedOption for DecisionPower {
    const FIELD: &'static str = "decisionPower";

    fn options() -> &'static [Self] {
        &[Self::Organisation, Self::DataSubject, Self::Balanced]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Organisation => "organisation",
            Self::DataSubject => "data-subject",
            Self::Balanced => "balanced",
        }
    }
}

/// When the data subject is told about the processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InformedTiming {
    LongBefore,
    RightBefore,
    During,
    After,
    PrivacyPolicy,
    No,
}

impl ClosedOption for InformedTiming {
    const FIELD: &'static str = "informedTiming";

    fn options() -> &'static [Self] {
        &[
            Self::LongBefore,
            Self::RightBefore,
            Self::During,
            Self::After,
            Self::PrivacyPolicy,
            Self::No,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::LongBefore => "long-before",
            Self::RightBefore => "right-before",
            Self::During => "during",
            Self::After => "after",
            Self::PrivacyPolicy => "privacy-policy",
            Self::No => "no",
        }
    }
}

macro_rules! display_as_wire_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_wire_value!(
    AlternativeLegalBasis,
    Importance,
    Relationship,
    InteractionFrequency,
    DataObtainment,
    DecisionPower,
    InformedTiming,
);

/// Completed questionnaire handed to the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiaInput {
    pub alternative_legal_basis: AlternativeLegalBasis,
    pub legal_exception: bool,
    pub necessary_for_organization: bool,
    pub importance: Importance,
    pub necessary_for_third_party: bool,
    pub relationship: Relationship,
    pub interaction_frequency: InteractionFrequency,
    pub data_obtainment: DataObtainment,
    pub decision_power: DecisionPower,
    pub informed_timing: InformedTiming,
    pub right_to_object: bool,
    #[serde(flatten)]
    pub balance: BalanceAnswers,
}

/// Yes/no answers from the balance-of-interests step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceAnswers {
    pub data_subject_expectation: bool,
    pub processing_expectation: bool,
    pub added_value: bool,
    pub negative_impact: bool,
    pub unwarranted_harm: bool,
    pub prejudice_to_controller: bool,
    pub prejudice_to_third_party: bool,
    pub data_subject_interest: bool,
    /// Collected for the record; carries no scoring weight.
    pub intrusive_processing: bool,
}

/// Questionnaire answers as they arrive over the wire.
///
/// Selects are plain strings so that out-of-domain values can be reported
/// against the field that carried them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiaAnswers {
    pub alternative_legal_basis: String,
    pub legal_exception: bool,
    pub necessary_for_organization: bool,
    pub importance: String,
    pub necessary_for_third_party: bool,
    pub relationship: String,
    pub interaction_frequency: String,
    pub data_obtainment: String,
    pub decision_power: String,
    pub informed_timing: String,
    pub right_to_object: bool,
    #[serde(flatten)]
    pub balance: BalanceAnswers,
}

impl LiaAnswers {
    /// Validate every select, failing on the first field outside its set.
    pub fn parse(&self) -> Result<LiaInput, LiaError> {
        Ok(LiaInput {
            alternative_legal_basis: AlternativeLegalBasis::parse(&self.alternative_legal_basis)?,
            legal_exception: self.legal_exception,
            necessary_for_organization: self.necessary_for_organization,
            importance: Importance::parse(&self.importance)?,
            necessary_for_third_party: self.necessary_for_third_party,
            relationship: Relationship::parse(&self.relationship)?,
            interaction_frequency: InteractionFrequency::parse(&self.interaction_frequency)?,
            data_obtainment: DataObtainment::parse(&self.data_obtainment)?,
            decision_power: DecisionPower::parse(&self.decision_power)?,
            informed_timing: InformedTiming::parse(&self.informed_timing)?,
            right_to_object: self.right_to_object,
            balance: self.balance,
        })
    }
}

impl From<&LiaInput> for LiaAnswers {
    fn from(input: &LiaInput) -> Self {
        Self {
            alternative_legal_basis: input.alternative_legal_basis.as_str().to_string(),
            legal_exception: input.legal_exception,
            necessary_for_organization: input.necessary_for_organization,
            importance: input.importance.as_str().to_string(),
            necessary_for_third_party: input.necessary_for_third_party,
            relationship: input.relationship.as_str().to_string(),
            interaction_frequency: input.interaction_frequency.as_str().to_string(),
            data_obtainment: input.data_obtainment.as_str().to_string(),
            decision_power: input.decision_power.as_str().to_string(),
            informed_timing: input.informed_timing.as_str().to_string(),
            right_to_object: input.right_to_object,
            balance: input.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_wire_value() {
        for option in Relationship::options() {
            assert_eq!(Relationship::parse(option.as_str()), Ok(*option));
        }
        for option in InformedTiming::options() {
            assert_eq!(InformedTiming::parse(option.as_str()), Ok(*option));
        }
        assert_eq!(
            InteractionFrequency::parse("less-than-once-year"),
            Ok(InteractionFrequency::LessThanOnceYear)
        );
    }

    #[test]
    fn parse_rejects_padded_values() {
        assert_eq!(
            AlternativeLegalBasis::parse(" consent "),
            Err(LiaError::InvalidInput {
                field: "alternativeLegalBasis",
                value: " consent ".to_string(),
            })
        );
        assert!(Importance::parse("Benefit").is_err());
    }

    #[test]
    fn parse_names_the_offending_field() {
        let err = Importance::parse("mission-critical").expect_err("unknown importance");
        assert_eq!(
            err,
            LiaError::InvalidInput {
                field: "importance",
                value: "mission-critical".to_string(),
            }
        );
    }

    #[test]
    fn serde_and_wire_values_agree() {
        for option in AlternativeLegalBasis::options() {
            let encoded = serde_json::to_value(option).expect("serializes");
            assert_eq!(encoded, serde_json::Value::String(option.to_string()));
        }
        for option in DecisionPower::options() {
            let encoded = serde_json::to_value(option).expect("serializes");
            assert_eq!(encoded, serde_json::Value::String(option.to_string()));
        }
    }

    #[test]
    fn empty_select_is_reported_as_invalid() {
        let answers = LiaAnswers {
            alternative_legal_basis: "none".to_string(),
            importance: "benefit".to_string(),
            ..LiaAnswers::default()
        };

        let err = answers.parse().expect_err("relationship missing");
        assert_eq!(err.field(), Some("relationship"));
    }
}
