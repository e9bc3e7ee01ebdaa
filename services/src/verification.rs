//! Mock verification service — documents, biometrics, business checks,
//! and the dashboard security score.

use crate::ServiceError;
use divs_outcome::OutcomeSource;
use divs_types::{
    BiometricData, BiometricType, BusinessVerification, Clock, DocumentType, FileLimits,
    FileUpload, SecurityScore, SimulationParams, Timestamp, Validators, VerificationDocument,
    VerificationStatus,
};
use std::sync::Arc;
use std::time::Duration;

/// Simulated verification backend.
pub struct VerificationService {
    outcome: Arc<dyn OutcomeSource>,
    clock: Arc<dyn Clock>,
    params: SimulationParams,
}

impl VerificationService {
    pub fn new(
        outcome: Arc<dyn OutcomeSource>,
        clock: Arc<dyn Clock>,
        params: SimulationParams,
    ) -> Self {
        Self {
            outcome,
            clock,
            params,
        }
    }

    /// Accept a document upload. Always lands in `Pending`; the wizard's
    /// processing run decides the displayed outcome separately.
    pub async fn upload_document(
        &self,
        file: &FileUpload,
        doc_type: DocumentType,
    ) -> Result<VerificationDocument, ServiceError> {
        FileLimits::documents().check(file)?;
        tracing::debug!(file = %file.name, ?doc_type, "uploading document");
        tokio::time::sleep(Duration::from_millis(self.params.upload_document_delay_ms)).await;

        let now = self.clock.now();
        Ok(VerificationDocument {
            id: now.as_millis().to_string(),
            doc_type,
            status: VerificationStatus::Pending,
            uploaded_at: now,
            verified_at: None,
        })
    }

    /// Enroll a biometric. 80% of attempts come back verified; the rest
    /// are rejected outright.
    pub async fn enroll_biometric(
        &self,
        bio_type: BiometricType,
    ) -> Result<BiometricData, ServiceError> {
        tracing::debug!(?bio_type, "enrolling biometric");
        tokio::time::sleep(Duration::from_millis(self.params.enroll_biometric_delay_ms)).await;

        if !self.outcome.passes(self.params.biometric_success_bps) {
            return Err(ServiceError::Rejected(
                "biometric enrollment failed, please try again".into(),
            ));
        }

        let now = self.clock.now();
        Ok(BiometricData {
            id: now.as_millis().to_string(),
            bio_type,
            status: VerificationStatus::Verified,
            enrolled_at: now,
            verified_at: Some(now),
        })
    }

    /// Submit a business verification request. Lands in `Pending`.
    pub async fn submit_business(
        &self,
        business_name: &str,
        registration_number: &str,
    ) -> Result<BusinessVerification, ServiceError> {
        Validators::name(business_name)?;
        Validators::business_registration(registration_number)?;
        tracing::debug!(business_name, "submitting business verification");
        tokio::time::sleep(Duration::from_millis(self.params.submit_business_delay_ms)).await;

        let now = self.clock.now();
        Ok(BusinessVerification {
            id: now.as_millis().to_string(),
            business_name: business_name.trim().to_string(),
            registration_number: registration_number.trim().to_string(),
            status: VerificationStatus::Pending,
            submitted_at: now,
            verified_at: None,
        })
    }

    /// The dashboard score. Fixed mock values, not derived from anything.
    pub fn security_score(&self) -> SecurityScore {
        SecurityScore::mock(self.clock.now())
    }

    /// Canned document listing shown before the user uploads anything.
    pub fn sample_documents(&self) -> Vec<VerificationDocument> {
        vec![VerificationDocument {
            id: "1".into(),
            doc_type: DocumentType::Passport,
            status: VerificationStatus::Verified,
            uploaded_at: Timestamp::new(1_705_276_800_000), // 2024-01-15
            verified_at: Some(Timestamp::new(1_705_363_200_000)), // 2024-01-16
        }]
    }

    /// Canned biometric listing shown before the user enrolls anything.
    pub fn sample_biometrics(&self) -> Vec<BiometricData> {
        vec![BiometricData {
            id: "1".into(),
            bio_type: BiometricType::Fingerprint,
            status: VerificationStatus::Verified,
            enrolled_at: Timestamp::new(1_704_844_800_000), // 2024-01-10
            verified_at: Some(Timestamp::new(1_704_844_800_000)),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divs_nullables::{NullClock, NullOutcome};

    fn service(outcome: NullOutcome) -> VerificationService {
        VerificationService::new(
            Arc::new(outcome),
            Arc::new(NullClock::new(1_000)),
            SimulationParams::instant(),
        )
    }

    fn pdf() -> FileUpload {
        FileUpload {
            name: "passport.pdf".into(),
            size: 2048,
            mime: "application/pdf".into(),
        }
    }

    #[tokio::test]
    async fn upload_returns_pending_document() {
        let svc = service(NullOutcome::always_pass());
        let doc = svc.upload_document(&pdf(), DocumentType::Passport).await.unwrap();
        assert_eq!(doc.status, VerificationStatus::Pending);
        assert_eq!(doc.id, "1000");
        assert!(doc.verified_at.is_none());
    }

    #[tokio::test]
    async fn upload_rejects_bad_file_before_any_delay() {
        let svc = service(NullOutcome::always_pass());
        let huge = FileUpload {
            name: "scan.png".into(),
            size: 50 * 1024 * 1024,
            mime: "image/png".into(),
        };
        assert!(matches!(
            svc.upload_document(&huge, DocumentType::Passport).await,
            Err(ServiceError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn biometric_enrollment_follows_the_draw() {
        let svc = service(NullOutcome::always_pass());
        let bio = svc.enroll_biometric(BiometricType::Face).await.unwrap();
        assert_eq!(bio.status, VerificationStatus::Verified);
        assert_eq!(bio.verified_at, Some(bio.enrolled_at));

        let svc = service(NullOutcome::always_fail());
        assert!(matches!(
            svc.enroll_biometric(BiometricType::Face).await,
            Err(ServiceError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn business_submission_validates_inputs() {
        let svc = service(NullOutcome::always_pass());
        assert!(svc.submit_business("Acme Corp", "1234").await.is_err());
        assert!(svc.submit_business("A", "C1234567").await.is_err());

        let biz = svc.submit_business("Acme Corp", "C1234567").await.unwrap();
        assert_eq!(biz.status, VerificationStatus::Pending);
    }

    #[test]
    fn security_score_is_the_stock_mock() {
        let svc = service(NullOutcome::always_pass());
        let score = svc.security_score();
        assert_eq!(score.overall, 85);
        assert_eq!(score.identity, 90);
        assert_eq!(score.biometric, 80);
        assert_eq!(score.document, 85);
        assert_eq!(score.last_updated, Timestamp::new(1_000));
    }
}
