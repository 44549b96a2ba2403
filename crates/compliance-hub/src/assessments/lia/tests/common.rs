use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessments::lia::domain::{
    AlternativeLegalBasis, BalanceAnswers, DataObtainment, DecisionPower, Importance,
    InformedTiming, InteractionFrequency, LiaAnswers, LiaInput, Relationship,
};
use crate::assessments::lia::repository::{
    AssessmentId, AssessmentRepository, LiaAssessment, RepositoryError,
};
use crate::assessments::lia::scoring::LiaEngine;
use crate::assessments::lia::service::{LiaAssessmentService, NewAssessment};

/// Every answer at its least favourable setting.
pub(super) fn minimal_input() -> LiaInput {
    LiaInput {
        alternative_legal_basis: AlternativeLegalBasis::None,
        legal_exception: false,
        necessary_for_organization: false,
        importance: Importance::NoImpact,
        necessary_for_third_party: false,
        relationship: Relationship::Others,
        interaction_frequency: InteractionFrequency::LessThanOnceYear,
        data_obtainment: DataObtainment::Mix,
        decision_power: DecisionPower::Balanced,
        informed_timing: InformedTiming::No,
        right_to_object: false,
        balance: BalanceAnswers::default(),
    }
}

/// Employee data processed with a business-critical purpose and strong safeguards.
pub(super) fn strong_input() -> LiaInput {
    LiaInput {
        alternative_legal_basis: AlternativeLegalBasis::None,
        legal_exception: false,
        necessary_for_organization: true,
        importance: Importance::BusinessCritical,
        necessary_for_third_party: true,
        relationship: Relationship::EmployeeFreelancer,
        interaction_frequency: InteractionFrequency::Weekly,
        data_obtainment: DataObtainment::Directly,
        decision_power: DecisionPower::DataSubject,
        informed_timing: InformedTiming::LongBefore,
        right_to_object: true,
        balance: BalanceAnswers {
            data_subject_expectation: true,
            processing_expectation: true,
            added_value: true,
            negative_impact: false,
            unwarranted_harm: false,
            prejudice_to_controller: true,
            prejudice_to_third_party: true,
            data_subject_interest: true,
            intrusive_processing: false,
        },
    }
}

/// Supplier contact data with a moderate interest and some safeguards.
pub(super) fn moderate_input() -> LiaInput {
    LiaInput {
        alternative_legal_basis: AlternativeLegalBasis::None,
        legal_exception: false,
        necessary_for_organization: true,
        importance: Importance::Benefit,
        necessary_for_third_party: false,
        relationship: Relationship::Supplier,
        interaction_frequency: InteractionFrequency::Monthly,
        data_obtainment: DataObtainment::Mix,
        decision_power: DecisionPower::Balanced,
        informed_timing: InformedTiming::PrivacyPolicy,
        right_to_object: false,
        balance: BalanceAnswers {
            data_subject_expectation: true,
            processing_expectation: false,
            added_value: true,
            negative_impact: false,
            unwarranted_harm: false,
            prejudice_to_controller: true,
            prejudice_to_third_party: false,
            data_subject_interest: false,
            intrusive_processing: true,
        },
    }
}

pub(super) fn answers(input: &LiaInput) -> LiaAnswers {
    LiaAnswers::from(input)
}

pub(super) fn new_assessment(input: &LiaInput) -> NewAssessment {
    let mut justifications = BTreeMap::new();
    justifications.insert(
        "importance".to_string(),
        "Payroll cannot run without it".to_string(),
    );
    NewAssessment {
        processing_activity: "Employee timesheet analytics".to_string(),
        answers: answers(input),
        justifications,
    }
}

pub(super) fn build_service() -> (LiaAssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = LiaAssessmentService::new(repository.clone(), LiaEngine::default());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<AssessmentId, LiaAssessment>>>,
}

impl AssessmentRepository for MemoryRepository {
    fn insert(&self, assessment: LiaAssessment) -> Result<LiaAssessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn update(
        &self,
        assessment: LiaAssessment,
        expected_revision: u64,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&assessment.id) {
            Some(slot) if slot.revision == expected_revision => {
                *slot = assessment;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<LiaAssessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LiaAssessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.id.cmp(&a.id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _assessment: LiaAssessment) -> Result<LiaAssessment, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(
        &self,
        _assessment: LiaAssessment,
        _expected_revision: u64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<LiaAssessment>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LiaAssessment>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _assessment: LiaAssessment) -> Result<LiaAssessment, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _assessment: LiaAssessment,
        _expected_revision: u64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<LiaAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LiaAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Lets another writer land between every fetch and update.
#[derive(Default)]
pub(super) struct RacingRepository {
    inner: MemoryRepository,
}

impl AssessmentRepository for RacingRepository {
    fn insert(&self, assessment: LiaAssessment) -> Result<LiaAssessment, RepositoryError> {
        self.inner.insert(assessment)
    }

    fn update(
        &self,
        assessment: LiaAssessment,
        expected_revision: u64,
    ) -> Result<(), RepositoryError> {
        {
            let mut guard = self.inner.records.lock().expect("repository mutex poisoned");
            if let Some(slot) = guard.get_mut(&assessment.id) {
                slot.revision += 1;
            }
        }
        self.inner.update(assessment, expected_revision)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<LiaAssessment>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn recent(&self, limit: usize) -> Result<Vec<LiaAssessment>, RepositoryError> {
        self.inner.recent(limit)
    }
}
