//! The accumulating draft of one participant's check-in.

/// Whether the participant agreed to be contacted about future studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Yes,
    No,
}

impl ConsentChoice {
    /// Wire token sent to the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentChoice::Yes => "Yes",
            ConsentChoice::No => "No",
        }
    }
}

/// Who is filling in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The participant themselves.
    Participant,
    /// A parent or guardian entering the participant's details.
    Guardian,
}

impl Role {
    /// Wire token sent to the backend (`is_guardian` field).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Participant => "self",
            Role::Guardian => "guardian",
        }
    }
}

/// Draft of one check-in session, owned by the flow controller.
///
/// Fields are only written once the owning screen's validation passes, so a
/// partially completed wizard never leaves half-validated data here. `dob`
/// holds the canonical `YYYY-MM-DD` form; `phone` holds the formatted
/// `NNN-NNN-NNNN` mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckinRecord {
    pub consent_contact: Option<ConsentChoice>,
    pub role: Option<Role>,
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub email: String,
    pub phone: String,
    pub study_code: String,
}
