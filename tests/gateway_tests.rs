//! Submission gateway tests against real child processes.
//!
//! Every fake backend reads stdin to EOF first, like the real one, so the
//! write-then-close handshake is exercised end to end.

use std::path::PathBuf;

use kiosk::{
    BackendCommand, CheckinRecord, ConsentChoice, ProcessBackend, Role, SubmissionError,
    SubmitBackend,
};

fn sh(script: &str) -> ProcessBackend {
    ProcessBackend::new(BackendCommand {
        program: PathBuf::from("sh"),
        args: vec!["-c".to_string(), script.to_string()],
    })
}

fn sample_record() -> CheckinRecord {
    CheckinRecord {
        consent_contact: Some(ConsentChoice::Yes),
        role: Some(Role::Participant),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        dob: "1990-02-03".into(),
        email: "jane@x.org".into(),
        phone: "555-123-4567".into(),
        study_code: "T-001".into(),
    }
}

#[tokio::test]
async fn zero_exit_with_parseable_reply_is_an_ack() {
    let backend = sh(r#"cat >/dev/null; printf '{"guid":"abc-123","action":"created"}'"#);
    let ack = backend.submit(&sample_record()).await.unwrap();
    assert_eq!(ack.payload.guid.as_deref(), Some("abc-123"));
    assert_eq!(ack.payload.action.as_deref(), Some("created"));
}

#[tokio::test]
async fn nonzero_exit_reports_stderr_detail() {
    let backend = sh("cat >/dev/null; echo 'duplicate code' >&2; exit 1");
    let err = backend.submit(&sample_record()).await.unwrap_err();
    match err {
        SubmissionError::BackendFailed { detail } => assert_eq!(detail, "duplicate code"),
        other => panic!("expected BackendFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn nonzero_exit_without_stderr_reports_the_code() {
    let backend = sh("cat >/dev/null; exit 3");
    let err = backend.submit(&sample_record()).await.unwrap_err();
    match err {
        SubmissionError::BackendFailed { detail } => {
            assert_eq!(detail, "backend exited with code 3")
        }
        other => panic!("expected BackendFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn nonzero_exit_ignores_stdout_content() {
    // A valid-looking reply on stdout must not rescue a failing exit code.
    let backend = sh(r#"cat >/dev/null; printf '{"guid":"abc"}'; exit 1"#);
    let err = backend.submit(&sample_record()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::BackendFailed { .. }));
}

#[tokio::test]
async fn zero_exit_with_garbage_output_is_malformed() {
    let backend = sh("cat >/dev/null; echo 'not json'");
    let err = backend.submit(&sample_record()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::MalformedResponse { .. }));
}

#[tokio::test]
async fn request_json_reaches_backend_stdin() {
    // Echo stdin back: the request doubles as the reply, and its fields
    // land in the reply's preserved-unknowns map.
    let backend = sh("cat");
    let ack = backend.submit(&sample_record()).await.unwrap();
    let extra = &ack.payload.extra;
    assert_eq!(extra["first_name"], "Jane");
    assert_eq!(extra["last_name"], "Doe");
    assert_eq!(extra["dob"], "1990-02-03");
    assert_eq!(extra["email"], "jane@x.org");
    assert_eq!(extra["phone"], "555-123-4567");
    assert_eq!(extra["consent_contact"], "Yes");
    assert_eq!(extra["is_guardian"], "self");
    assert_eq!(extra["tubric_study_code"], "T-001");
    assert!(ack.payload.guid.is_none());
}

#[tokio::test]
async fn unset_enums_serialize_as_null() {
    let backend = sh("cat");
    let record = CheckinRecord {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        dob: "1990-02-03".into(),
        email: "jane@x.org".into(),
        phone: "555-123-4567".into(),
        study_code: "T-001".into(),
        ..CheckinRecord::default()
    };
    let ack = backend.submit(&record).await.unwrap();
    assert_eq!(ack.payload.extra["consent_contact"], serde_json::Value::Null);
    assert_eq!(ack.payload.extra["is_guardian"], serde_json::Value::Null);
}

#[tokio::test]
async fn missing_backend_program_is_a_process_error() {
    let backend = ProcessBackend::new(BackendCommand {
        program: PathBuf::from("/nonexistent/kiosk-backend"),
        args: vec![],
    });
    let err = backend.submit(&sample_record()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Process(_)));
}
