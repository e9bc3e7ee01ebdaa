//! Mock identity-share service — code minting, redemption, revocation.

use crate::ServiceError;
use divs_outcome::{generate_access_code, OutcomeSource};
use divs_store::ShareStore;
use divs_types::{
    AccessCode, Clock, DivsError, IdentityShare, ShareRequest, SimulationParams, Timestamp,
    Validators, VerificationMethod,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The masked subject data returned on a successful redemption.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessGrant {
    pub name: String,
    pub id_number: String,
    pub verified_at: Timestamp,
    pub expires_at: Timestamp,
}

/// Simulated identity-share backend.
pub struct IdentityService {
    shares: Arc<dyn ShareStore>,
    outcome: Arc<dyn OutcomeSource>,
    clock: Arc<dyn Clock>,
    params: SimulationParams,
}

impl IdentityService {
    pub fn new(
        shares: Arc<dyn ShareStore>,
        outcome: Arc<dyn OutcomeSource>,
        clock: Arc<dyn Clock>,
        params: SimulationParams,
    ) -> Self {
        Self {
            shares,
            outcome,
            clock,
            params,
        }
    }

    /// Mint a share. The code is generated client-side; nothing about it is
    /// secret or checked on redemption.
    pub fn create_share(&self, request: &ShareRequest) -> Result<AccessCode, ServiceError> {
        if request.permissions.is_empty() {
            return Err(DivsError::NoPermissions.into());
        }

        let now = self.clock.now();
        let code = generate_access_code(self.outcome.as_ref());
        let expires_at = request.expiry.expires_at(now);

        let share = IdentityShare {
            id: now.as_millis().to_string(),
            code: Some(code.clone()),
            qr_data: match request.method {
                VerificationMethod::Qr => Some(format!("divs://verify/{code}")),
                VerificationMethod::Code => None,
            },
            permissions: request.permissions,
            expiry: request.expiry,
            expires_at,
            method: request.method,
            created_at: now,
            used_at: None,
            active: true,
        };
        self.shares.put_share(&share)?;
        tracing::info!(share = %share.id, "identity share created");

        Ok(AccessCode {
            code,
            expires_at,
            permissions: request.permissions,
            method: request.method,
        })
    }

    /// Redeem an access code. The submitted code is format-checked and then
    /// ignored: the 90% draw alone decides, so a code that was never minted
    /// redeems just as often as a real one. That mismatch is the demo's
    /// design, not an oversight.
    pub async fn verify_access_code(&self, code: &str) -> Result<AccessGrant, ServiceError> {
        Validators::access_code(code)?;
        tokio::time::sleep(Duration::from_millis(self.params.verify_access_delay_ms)).await;

        if !self.outcome.passes(self.params.access_success_bps) {
            return Err(ServiceError::Rejected("invalid or expired access code".into()));
        }

        let now = self.clock.now();
        Ok(AccessGrant {
            name: "Jane Smith".into(),
            id_number: "•••• •••• 4321".into(),
            verified_at: now,
            expires_at: now.plus_secs(24 * 3600),
        })
    }

    /// All shares the user has minted, newest state first in the store.
    pub fn list_shares(&self) -> Result<Vec<IdentityShare>, ServiceError> {
        Ok(self.shares.shares()?)
    }

    /// Mark a share inactive.
    pub fn revoke_share(&self, id: &str) -> Result<(), ServiceError> {
        self.shares.revoke_share(id)?;
        tracing::info!(share = %id, "identity share revoked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use divs_nullables::{NullClock, NullOutcome, NullStore};
    use divs_types::{ExpiryWindow, Permissions};

    fn service(outcome: NullOutcome) -> (IdentityService, Arc<NullStore>) {
        let store = Arc::new(NullStore::new());
        let svc = IdentityService::new(
            store.clone(),
            Arc::new(outcome),
            Arc::new(NullClock::new(1_000_000)),
            SimulationParams::instant(),
        );
        (svc, store)
    }

    fn id_only_request() -> ShareRequest {
        ShareRequest {
            permissions: Permissions::id_only(),
            expiry: ExpiryWindow::OneHour,
            method: VerificationMethod::Code,
        }
    }

    #[test]
    fn create_share_mints_six_digit_code_and_persists() {
        let (svc, store) = service(NullOutcome::new(vec![1234, 5678]));
        let access = svc.create_share(&id_only_request()).unwrap();

        assert_eq!(access.code.len(), 6);
        assert_eq!(access.expires_at, Timestamp::new(1_000_000 + 3_600_000));

        let shares = store.shares().unwrap();
        assert_eq!(shares.len(), 1);
        assert!(shares[0].active);
        assert_eq!(shares[0].code.as_deref(), Some(access.code.as_str()));
        assert!(shares[0].qr_data.is_none());
    }

    #[test]
    fn qr_method_carries_qr_data() {
        let (svc, store) = service(NullOutcome::constant(0));
        let request = ShareRequest {
            method: VerificationMethod::Qr,
            ..id_only_request()
        };
        let access = svc.create_share(&request).unwrap();
        let share = &store.shares().unwrap()[0];
        assert_eq!(
            share.qr_data.as_deref(),
            Some(format!("divs://verify/{}", access.code).as_str())
        );
    }

    #[test]
    fn create_share_requires_a_permission() {
        let (svc, _) = service(NullOutcome::constant(0));
        let request = ShareRequest {
            permissions: Permissions::default(),
            ..id_only_request()
        };
        assert!(matches!(
            svc.create_share(&request),
            Err(ServiceError::Invalid(DivsError::NoPermissions))
        ));
    }

    #[tokio::test]
    async fn redemption_ignores_the_submitted_code() {
        // A code that was never minted still redeems when the draw passes.
        let (svc, _) = service(NullOutcome::always_pass());
        let grant = svc.verify_access_code("999999").await.unwrap();
        assert_eq!(grant.name, "Jane Smith");
        assert_eq!(grant.id_number, "•••• •••• 4321");
    }

    #[tokio::test]
    async fn redemption_fails_on_a_bad_draw() {
        let (svc, _) = service(NullOutcome::always_fail());
        assert!(matches!(
            svc.verify_access_code("123456").await,
            Err(ServiceError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn redemption_rejects_malformed_codes_deterministically() {
        let (svc, _) = service(NullOutcome::always_pass());
        assert!(matches!(
            svc.verify_access_code("12345").await,
            Err(ServiceError::Invalid(_))
        ));
    }

    #[test]
    fn revoked_shares_drop_out_of_active_listing() {
        let (svc, store) = service(NullOutcome::constant(0));
        svc.create_share(&id_only_request()).unwrap();
        let id = store.shares().unwrap()[0].id.clone();

        svc.revoke_share(&id).unwrap();
        assert!(store.active_shares().unwrap().is_empty());
        assert_eq!(svc.list_shares().unwrap().len(), 1);
    }
}
