use super::super::domain::{
    ClosedOption, DataObtainment, DecisionPower, Importance, InformedTiming, InteractionFrequency,
    LiaInput, Relationship,
};
use super::{LiaFactor, ScoreAxis, ScoreBreakdown, ScoreComponent};

/// Highest raw interest reachable under the weights below.
pub(crate) const INTEREST_NORMALIZER: f64 = 119.0;
/// Highest raw impact reachable under the weights below.
pub(crate) const IMPACT_NORMALIZER: f64 = 153.0;

fn importance_multiplier(importance: Importance) -> f64 {
    match importance {
        Importance::NoImpact => 1.0,
        Importance::Benefit => 1.5,
        Importance::VeryImportant => 2.0,
        Importance::BusinessCritical => 2.5,
    }
}

fn relationship_interest(relationship: Relationship) -> i16 {
    match relationship {
        Relationship::EmployeeFreelancer => 10,
        Relationship::Supplier => 5,
        Relationship::ExistingClientNatural
        | Relationship::ExistingClientLegal
        | Relationship::FormerClient
        | Relationship::PotentialClient
        | Relationship::Others => 0,
    }
}

fn relationship_impact(relationship: Relationship) -> i16 {
    match relationship {
        Relationship::ExistingClientNatural => 5,
        Relationship::ExistingClientLegal => 3,
        Relationship::FormerClient | Relationship::PotentialClient => 10,
        Relationship::EmployeeFreelancer | Relationship::Supplier | Relationship::Others => 0,
    }
}

fn frequency_interest(frequency: InteractionFrequency) -> i16 {
    match frequency {
        InteractionFrequency::Daily => 4,
        InteractionFrequency::Weekly => 3,
        InteractionFrequency::Monthly => 2,
        InteractionFrequency::SeveralTimesYear => 1,
        InteractionFrequency::OnceYear => 0,
        InteractionFrequency::LessThanOnceYear => -5,
    }
}

fn frequency_impact(frequency: InteractionFrequency) -> i16 {
    match frequency {
        InteractionFrequency::Daily => 20,
        InteractionFrequency::Weekly => 10,
        InteractionFrequency::Monthly => 6,
        InteractionFrequency::SeveralTimesYear => 0,
        InteractionFrequency::OnceYear => -4,
        InteractionFrequency::LessThanOnceYear => -8,
    }
}

fn obtainment_interest(obtainment: DataObtainment) -> i16 {
    match obtainment {
        DataObtainment::Directly => 5,
        DataObtainment::Indirectly => 0,
        DataObtainment::Mix => 2,
    }
}

fn obtainment_impact(obtainment: DataObtainment) -> i16 {
    match obtainment {
        DataObtainment::Directly => -5,
        DataObtainment::Indirectly => 3,
        DataObtainment::Mix => -1,
    }
}

fn decision_power_impact(power: DecisionPower) -> i16 {
    match power {
        DecisionPower::Organisation => 5,
        DecisionPower::DataSubject | DecisionPower::Balanced => 0,
    }
}

fn informed_timing_impact(timing: InformedTiming) -> i16 {
    match timing {
        InformedTiming::LongBefore => -5,
        InformedTiming::RightBefore => 0,
        InformedTiming::During => 3,
        InformedTiming::After => 5,
        InformedTiming::PrivacyPolicy => 8,
        InformedTiming::No => 10,
    }
}

fn either(flag: bool, yes: i16, no: i16) -> i16 {
    if flag {
        yes
    } else {
        no
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[derive(Default)]
struct Tally {
    raw_interest: f64,
    raw_impact: f64,
    components: Vec<ScoreComponent>,
}

impl Tally {
    fn add(&mut self, axis: ScoreAxis, factor: LiaFactor, weight: f64, notes: String) {
        match axis {
            ScoreAxis::Interest => self.raw_interest += weight,
            ScoreAxis::Impact => self.raw_impact += weight,
        }
        self.components.push(ScoreComponent {
            axis,
            factor,
            weight,
            notes,
        });
    }

    fn finish(self) -> ScoreBreakdown {
        ScoreBreakdown {
            raw_interest: self.raw_interest,
            raw_impact: self.raw_impact,
            components: self.components,
        }
    }
}

/// Sum every weighted answer into raw interest and raw impact.
pub(crate) fn score_input(input: &LiaInput) -> ScoreBreakdown {
    let balance = &input.balance;
    let mut tally = Tally::default();

    let necessity = either(input.necessary_for_organization, 25, 0)
        + either(input.necessary_for_third_party, 5, 0);
    let multiplier = importance_multiplier(input.importance);
    tally.add(
        ScoreAxis::Interest,
        LiaFactor::Necessity,
        f64::from(necessity) * multiplier,
        format!(
            "necessity {necessity} weighted x{multiplier} for {} importance",
            input.importance
        ),
    );

    let interest_answers = [
        (
            LiaFactor::Relationship,
            relationship_interest(input.relationship),
            input.relationship.as_str(),
        ),
        (
            LiaFactor::InteractionFrequency,
            frequency_interest(input.interaction_frequency),
            input.interaction_frequency.as_str(),
        ),
        (
            LiaFactor::DataObtainment,
            obtainment_interest(input.data_obtainment),
            input.data_obtainment.as_str(),
        ),
        (
            LiaFactor::RightToObject,
            either(input.right_to_object, 5, 0),
            yes_no(input.right_to_object),
        ),
        (
            LiaFactor::PrejudiceToController,
            either(balance.prejudice_to_controller, 15, -5),
            yes_no(balance.prejudice_to_controller),
        ),
        (
            LiaFactor::PrejudiceToThirdParty,
            either(balance.prejudice_to_third_party, 5, -3),
            yes_no(balance.prejudice_to_third_party),
        ),
    ];
    for (factor, weight, answer) in interest_answers {
        tally.add(
            ScoreAxis::Interest,
            factor,
            f64::from(weight),
            format!("{} answered {answer}", factor.label()),
        );
    }

    let subject_weight = either(balance.data_subject_interest, 25, 75);
    let expectation_average = (expectation_factor(balance.data_subject_expectation)
        + expectation_factor(balance.processing_expectation))
        / 2.0;
    tally.add(
        ScoreAxis::Impact,
        LiaFactor::Expectations,
        f64::from(subject_weight) * expectation_average,
        format!("data subject weight {subject_weight} scaled by expectation {expectation_average}"),
    );

    let impact_answers = [
        (
            LiaFactor::Relationship,
            relationship_impact(input.relationship),
            input.relationship.as_str(),
        ),
        (
            LiaFactor::InteractionFrequency,
            frequency_impact(input.interaction_frequency),
            input.interaction_frequency.as_str(),
        ),
        (
            LiaFactor::DataObtainment,
            obtainment_impact(input.data_obtainment),
            input.data_obtainment.as_str(),
        ),
        (
            LiaFactor::DecisionPower,
            decision_power_impact(input.decision_power),
            input.decision_power.as_str(),
        ),
        (
            LiaFactor::InformedTiming,
            informed_timing_impact(input.informed_timing),
            input.informed_timing.as_str(),
        ),
        (
            LiaFactor::RightToObject,
            either(input.right_to_object, 0, 5),
            yes_no(input.right_to_object),
        ),
        (
            LiaFactor::AddedValue,
            either(balance.added_value, -10, 5),
            yes_no(balance.added_value),
        ),
        (
            LiaFactor::NegativeImpact,
            either(balance.negative_impact, 5, -5),
            yes_no(balance.negative_impact),
        ),
        (
            LiaFactor::UnwarrantedHarm,
            either(balance.unwarranted_harm, 15, -5),
            yes_no(balance.unwarranted_harm),
        ),
    ];
    for (factor, weight, answer) in impact_answers {
        tally.add(
            ScoreAxis::Impact,
            factor,
            f64::from(weight),
            format!("{} answered {answer}", factor.label()),
        );
    }

    tally.finish()
}

fn expectation_factor(expected: bool) -> f64 {
    if expected {
        0.5
    } else {
        1.0
    }
}

/// Scale a raw sum to a percentage, rounding half up once and clamping.
pub(crate) fn normalize(raw: f64, normalizer: f64) -> u8 {
    let scaled = raw / normalizer * 100.0;
    (scaled + 0.5).floor().clamp(0.0, 100.0) as u8
}
