//! Wire format between the kiosk and the backend process.
//!
//! One request object goes to the child's stdin; one reply object comes back
//! on its stdout. The backend is opaque, so the reply keeps unknown fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::checkin::record::CheckinRecord;

/// The full check-in record as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinRequest {
    /// `"Yes"` / `"No"`, or null when the consent screen was never reached.
    pub consent_contact: Option<String>,
    /// `"self"` / `"guardian"`, or null when the role screen was never reached.
    pub is_guardian: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Canonical `YYYY-MM-DD`.
    pub dob: String,
    pub email: String,
    /// Formatted `NNN-NNN-NNNN`.
    pub phone: String,
    pub tubric_study_code: String,
}

impl CheckinRequest {
    pub fn from_record(record: &CheckinRecord) -> Self {
        Self {
            consent_contact: record.consent_contact.map(|c| c.as_str().to_string()),
            is_guardian: record.role.map(|r| r.as_str().to_string()),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            dob: record.dob.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            tubric_study_code: record.study_code.clone(),
        }
    }
}

/// Structured reply from a zero-exit backend.
///
/// The observed backend writes `guid` and `action`; both stay optional and
/// anything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendReply {
    #[serde(default)]
    pub guid: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A successful, parseable reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack {
    pub payload: BackendReply,
}
