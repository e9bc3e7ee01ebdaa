//! Verification record types — documents, biometrics, business checks,
//! and the mock security score.

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status assigned to a verification record by the mock services.
///
/// There are no real transition rules; the simulated backend assigns a
/// status and the record keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Accepted government ID document kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    DriversLicense,
    NationalId,
}

impl DocumentType {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Passport => "Passport",
            DocumentType::DriversLicense => "Driver's License",
            DocumentType::NationalId => "National ID Card",
        }
    }
}

/// Supported biometric capture kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricType {
    Fingerprint,
    Face,
    Voice,
}

/// An uploaded identity document and its verification status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationDocument {
    pub id: String,
    pub doc_type: DocumentType,
    pub status: VerificationStatus,
    pub uploaded_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<Timestamp>,
}

/// An enrolled biometric and its verification status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BiometricData {
    pub id: String,
    pub bio_type: BiometricType,
    pub status: VerificationStatus,
    pub enrolled_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<Timestamp>,
}

/// A submitted business verification request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BusinessVerification {
    pub id: String,
    pub business_name: String,
    pub registration_number: String,
    pub status: VerificationStatus,
    pub submitted_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<Timestamp>,
}

/// A flat set of percentages displayed on the dashboard.
///
/// The values are fixed mock data; there is no derivation algorithm from the
/// underlying verification records.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SecurityScore {
    pub overall: u8,
    pub identity: u8,
    pub biometric: u8,
    pub document: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business: Option<u8>,
    pub last_updated: Timestamp,
}

impl SecurityScore {
    /// The stock dashboard values.
    pub fn mock(now: Timestamp) -> Self {
        Self {
            overall: 85,
            identity: 90,
            biometric: 80,
            document: 85,
            business: None,
            last_updated: now,
        }
    }
}
