use crate::infra::InMemoryAssessmentRepository;
use clap::Args;
use compliance_hub::assessments::lia::{
    AlternativeLegalBasis, BalanceAnswers, DataObtainment, DecisionOutcome, DecisionPower,
    DecisionRequest, Importance, InformedTiming, InteractionFrequency, LiaAnswers,
    LiaAssessmentService, LiaEngine, LiaInput, LiaResult, NewAssessment, Relationship, ScoreAxis,
};
use compliance_hub::config::AppConfig;
use compliance_hub::error::AppError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding the questionnaire answers
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Print every weighted factor behind the scores
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip recording a final decision on the scored assessment.
    #[arg(long)]
    pub(crate) skip_decision: bool,
}

pub(crate) fn run_lia_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = LiaEngine::new(config.scoring)?;

    let reader = BufReader::new(File::open(&args.answers)?);
    let answers: LiaAnswers = serde_json::from_reader(reader)?;
    let result = engine.evaluate(&answers)?;

    println!("Legitimate interest assessment");
    println!("Answers: {}", args.answers.display());
    render_result(&result, args.breakdown);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = LiaEngine::new(config.scoring)?;
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = LiaAssessmentService::new(repository, engine);

    println!("Legitimate interest assessment demo");

    let scenarios = [
        ("Marketing list built on consent", consent_scenario()),
        ("Fraud screening under a legal exception", exception_scenario()),
        ("Client newsletter", newsletter_scenario()),
    ];

    let mut scored = None;
    for (activity, input) in scenarios {
        let request = NewAssessment {
            processing_activity: activity.to_string(),
            answers: LiaAnswers::from(&input),
            justifications: BTreeMap::new(),
        };
        let assessment = match service.create(request) {
            Ok(assessment) => assessment,
            Err(err) => {
                println!("\n{activity}: rejected ({err})");
                continue;
            }
        };

        println!("\n{} [{}]", activity, assessment.id.0);
        println!("- gate {}", assessment.result.gate.label());
        render_result(&assessment.result, false);
        scored = Some(assessment.id);
    }

    if args.skip_decision {
        return Ok(());
    }

    let Some(id) = scored else {
        return Ok(());
    };

    let decision = DecisionRequest {
        outcome: DecisionOutcome::DoNotProceed,
        notes: "Marketing lead prefers explicit opt-in".to_string(),
        decided_by: "dpo@example.org".to_string(),
    };
    match service.record_decision(&id, decision) {
        Ok(assessment) => {
            println!("\nFinal decision recorded for {}", assessment.id.0);
            if assessment.overrides_recommendation() {
                println!("- decision overrides the engine recommendation");
            }
        }
        Err(err) => {
            println!("\nFinal decision unavailable: {err}");
            return Ok(());
        }
    }

    let recent = match service.recent(10) {
        Ok(recent) => recent,
        Err(err) => {
            println!("Assessment register unavailable: {err}");
            return Ok(());
        }
    };
    let views: Vec<_> = recent.iter().map(|assessment| assessment.view()).collect();
    match serde_json::to_string_pretty(&views) {
        Ok(json) => println!("\nAssessment register:\n{}", json),
        Err(err) => println!("\nAssessment register unavailable: {}", err),
    }

    Ok(())
}

fn render_result(result: &LiaResult, breakdown: bool) {
    println!("- {}", result.recommendation.label());
    println!(
        "- interest {}% | impact {}%",
        result.interest_score, result.impact_score
    );
    println!("  {}", result.rationale);

    if !breakdown {
        return;
    }

    let Some(scores) = &result.breakdown else {
        println!("  No factor breakdown: the outcome was decided by the legal basis gate");
        return;
    };

    for (axis, raw) in [
        (ScoreAxis::Interest, scores.raw_interest),
        (ScoreAxis::Impact, scores.raw_impact),
    ] {
        println!("  {:?} factors (raw {:.2})", axis, raw);
        for component in scores.components_for(axis) {
            println!(
                "    - {}: {:+.2} ({})",
                component.factor.label(),
                component.weight,
                component.notes
            );
        }
    }
}

fn consent_scenario() -> LiaInput {
    LiaInput {
        alternative_legal_basis: AlternativeLegalBasis::Consent,
        ..newsletter_scenario()
    }
}

fn exception_scenario() -> LiaInput {
    LiaInput {
        legal_exception: true,
        relationship: Relationship::PotentialClient,
        data_obtainment: DataObtainment::Indirectly,
        ..newsletter_scenario()
    }
}

fn newsletter_scenario() -> LiaInput {
    LiaInput {
        alternative_legal_basis: AlternativeLegalBasis::None,
        legal_exception: false,
        necessary_for_organization: true,
        importance: Importance::VeryImportant,
        necessary_for_third_party: false,
        relationship: Relationship::ExistingClientNatural,
        interaction_frequency: InteractionFrequency::Monthly,
        data_obtainment: DataObtainment::Directly,
        decision_power: DecisionPower::Balanced,
        informed_timing: InformedTiming::RightBefore,
        right_to_object: true,
        balance: BalanceAnswers {
            data_subject_expectation: true,
            processing_expectation: true,
            added_value: true,
            prejudice_to_controller: true,
            ..BalanceAnswers::default()
        },
    }
}
