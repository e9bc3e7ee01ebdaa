//! Identity-share types — access codes, permissions, expiry windows.

use crate::Timestamp;
use serde::{Deserialize, Serialize};

/// What a share grants the person redeeming it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub id_only: bool,
    pub address_info: bool,
    pub financial_data: bool,
    pub full_access: bool,
}

impl Permissions {
    pub fn id_only() -> Self {
        Self {
            id_only: true,
            ..Self::default()
        }
    }

    /// A share with no permissions grants nothing and may not be created.
    pub fn is_empty(&self) -> bool {
        !self.id_only && !self.address_info && !self.financial_data && !self.full_access
    }
}

/// How long a share stays redeemable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryWindow {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "6h")]
    SixHours,
    #[default]
    #[serde(rename = "24h")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl ExpiryWindow {
    pub fn as_secs(&self) -> u64 {
        match self {
            ExpiryWindow::OneHour => 3600,
            ExpiryWindow::SixHours => 6 * 3600,
            ExpiryWindow::OneDay => 24 * 3600,
            ExpiryWindow::SevenDays => 7 * 24 * 3600,
            ExpiryWindow::ThirtyDays => 30 * 24 * 3600,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryWindow::OneHour => "1 hour",
            ExpiryWindow::SixHours => "6 hours",
            ExpiryWindow::OneDay => "24 hours",
            ExpiryWindow::SevenDays => "7 days",
            ExpiryWindow::ThirtyDays => "30 days",
        }
    }

    pub fn expires_at(&self, now: Timestamp) -> Timestamp {
        now.plus_secs(self.as_secs())
    }
}

/// How the share is presented to the other party.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
    #[default]
    Qr,
    Code,
}

/// Input for creating an identity share.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareRequest {
    pub permissions: Permissions,
    pub expiry: ExpiryWindow,
    pub method: VerificationMethod,
}

/// A minted access code. The code is a 6-digit display string with no real
/// security property; redeeming it is an independent random draw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessCode {
    pub code: String,
    pub expires_at: Timestamp,
    pub permissions: Permissions,
    pub method: VerificationMethod,
}

/// A persisted identity share, listable and revocable from the dashboard.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityShare {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_data: Option<String>,
    pub permissions: Permissions,
    pub expiry: ExpiryWindow,
    pub expires_at: Timestamp,
    pub method: VerificationMethod,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_at: Option<Timestamp>,
    pub active: bool,
}
