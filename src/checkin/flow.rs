//! Screen state machine for the check-in wizard.
//!
//! `FlowController` owns the current screen and the draft record. All
//! navigation goes through the action methods below; forward edges are gated
//! by validation, backward edges are unconditional, and the two terminal
//! screens hand back a fresh session. The controller never panics and never
//! lets a submission failure escape past the Study screen.

use crate::backend::{Ack, SubmissionError};
use crate::checkin::fields;
use crate::checkin::record::{CheckinRecord, ConsentChoice, Role};

/// One step of the wizard. Exactly one is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Privacy,
    Consent,
    Role,
    Info,
    Study,
    Done,
    NoCheckin,
}

/// Raw text of the five identity fields as entered on the Info screen.
///
/// This is screen-local input, not the record: it survives backward
/// navigation and is only committed (normalized) when validation passes.
#[derive(Debug, Clone, Default)]
pub struct InfoFields {
    pub first_name: String,
    pub last_name: String,
    pub dob: String,
    pub email: String,
    pub phone: String,
}

const ERR_NAME: &str = "Please enter the participant's first and last name.";
const ERR_DOB: &str = "Please enter date of birth as MM-DD-YYYY.";
const ERR_EMAIL: &str = "Please enter a valid email address.";
const ERR_PHONE_MISSING: &str = "Please enter a phone number.";
const ERR_PHONE_DIGITS: &str = "Please enter a valid 10-digit phone number.";
const ERR_STUDY_CODE: &str = "Please enter the TUBRIC Study Code.";
const ERR_SUBMISSION: &str = "Submission failed. Please try again or alert staff.";

const SUBTITLE_SELF: &str = "Please enter your information below.";
const SUBTITLE_GUARDIAN: &str =
    "You indicated you are a parent/guardian. Please enter the participant's information below.";

/// The check-in flow controller.
pub struct FlowController {
    screen: Screen,
    record: CheckinRecord,
    error: Option<String>,
    awaiting_contact_ack: bool,
    submitting: bool,
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowController {
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            record: CheckinRecord::default(),
            error: None,
            awaiting_contact_ack: false,
            submitting: false,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn record(&self) -> &CheckinRecord {
        &self.record
    }

    /// The screen-scoped validation/submission error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the consent-Yes acknowledgment overlay is showing.
    pub fn awaiting_contact_ack(&self) -> bool {
        self.awaiting_contact_ack
    }

    /// Whether a submission is outstanding (Study screen is suspended).
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Instructional subtitle for the Info screen, branching on role only.
    pub fn info_subtitle(&self) -> &'static str {
        match self.record.role {
            Some(Role::Guardian) => SUBTITLE_GUARDIAN,
            _ => SUBTITLE_SELF,
        }
    }

    /// Welcome → Privacy.
    pub fn begin(&mut self) {
        if self.screen == Screen::Welcome {
            self.screen = Screen::Privacy;
        }
    }

    /// Privacy accept → Consent.
    pub fn accept_privacy(&mut self) {
        if self.screen == Screen::Privacy {
            self.screen = Screen::Consent;
        }
    }

    /// Privacy decline → NoCheckin.
    pub fn decline_privacy(&mut self) {
        if self.screen == Screen::Privacy {
            self.screen = Screen::NoCheckin;
        }
    }

    /// Record the contact-consent choice. Yes holds on an acknowledgment
    /// overlay before moving on; No lands on Role directly.
    pub fn choose_consent(&mut self, choice: ConsentChoice) {
        if self.screen != Screen::Consent || self.awaiting_contact_ack {
            return;
        }
        self.record.consent_contact = Some(choice);
        match choice {
            ConsentChoice::Yes => self.awaiting_contact_ack = true,
            ConsentChoice::No => self.screen = Screen::Role,
        }
    }

    /// Dismiss the consent acknowledgment overlay → Role.
    pub fn acknowledge_contact(&mut self) {
        if self.screen == Screen::Consent && self.awaiting_contact_ack {
            self.awaiting_contact_ack = false;
            self.screen = Screen::Role;
        }
    }

    /// Role choice → Info. Only the Info subtitle branches on this.
    pub fn choose_role(&mut self, role: Role) {
        if self.screen == Screen::Role {
            self.record.role = Some(role);
            self.screen = Screen::Info;
        }
    }

    /// Unconditional backward edge to the preceding screen in the forward
    /// chain. Clears any screen-scoped error and a pending acknowledgment.
    pub fn back(&mut self) {
        if self.submitting {
            return;
        }
        self.error = None;
        self.awaiting_contact_ack = false;
        self.screen = match self.screen {
            Screen::Privacy => Screen::Welcome,
            Screen::Consent => Screen::Privacy,
            Screen::Role => Screen::Consent,
            Screen::Info => Screen::Role,
            Screen::Study => Screen::Info,
            other => other,
        };
    }

    /// Validate the Info screen and, if everything passes, commit all five
    /// fields into the record at once and advance to Study.
    ///
    /// Validation re-checks every field before writing any of them; a single
    /// failure commits nothing and surfaces the first failing check's
    /// message. Returns whether the screen advanced.
    pub fn submit_info(&mut self, fields_in: &InfoFields) -> bool {
        if self.screen != Screen::Info {
            return false;
        }
        self.error = None;

        let first = fields_in.first_name.trim();
        let last = fields_in.last_name.trim();
        let dob = fields_in.dob.trim();
        let email = fields_in.email.trim();
        let phone = fields_in.phone.trim();

        if first.is_empty() || last.is_empty() {
            self.error = Some(ERR_NAME.to_string());
            return false;
        }
        if !fields::is_valid_date(dob) {
            self.error = Some(ERR_DOB.to_string());
            return false;
        }
        if email.is_empty() || !fields::is_valid_email(email) {
            self.error = Some(ERR_EMAIL.to_string());
            return false;
        }
        if phone.is_empty() {
            self.error = Some(ERR_PHONE_MISSING.to_string());
            return false;
        }
        if fields::digits_of(phone).len() != 10 {
            self.error = Some(ERR_PHONE_DIGITS.to_string());
            return false;
        }
        let Some(canonical_dob) = fields::to_canonical_date(dob) else {
            self.error = Some(ERR_DOB.to_string());
            return false;
        };

        self.record.first_name = first.to_string();
        self.record.last_name = last.to_string();
        self.record.dob = canonical_dob;
        self.record.email = email.to_string();
        self.record.phone = fields::format_phone_input(phone);
        self.screen = Screen::Study;
        true
    }

    /// Gate the Study screen's finish action.
    ///
    /// Commits the study code and flips the submitting flag when the code is
    /// non-empty and no submission is already outstanding. Returns whether
    /// the caller should launch the gateway; the outcome comes back through
    /// [`finish_submission`](Self::finish_submission).
    pub fn begin_submission(&mut self, study_code: &str) -> bool {
        if self.screen != Screen::Study || self.submitting {
            return false;
        }
        self.error = None;
        let code = study_code.trim();
        if code.is_empty() {
            self.error = Some(ERR_STUDY_CODE.to_string());
            return false;
        }
        self.record.study_code = code.to_string();
        self.submitting = true;
        true
    }

    /// Apply a submission outcome: success reaches Done, any failure stays
    /// on Study with the generic participant-facing message. Diagnostic
    /// detail is logged, never displayed.
    pub fn finish_submission(&mut self, outcome: Result<Ack, SubmissionError>) {
        if self.screen != Screen::Study || !self.submitting {
            return;
        }
        self.submitting = false;
        match outcome {
            Ok(ack) => {
                tracing::info!(
                    guid = ack.payload.guid.as_deref().unwrap_or("<none>"),
                    action = ack.payload.action.as_deref().unwrap_or("<none>"),
                    "check-in submitted"
                );
                self.error = None;
                self.screen = Screen::Done;
            }
            Err(err) => {
                tracing::warn!(error = %err, "check-in submission failed");
                self.error = Some(ERR_SUBMISSION.to_string());
            }
        }
    }

    /// Dismiss a terminal screen: back to Welcome with a fresh empty record.
    pub fn restart(&mut self) {
        if matches!(self.screen, Screen::Done | Screen::NoCheckin) {
            *self = Self::new();
        }
    }
}
