use authorlist_core::{BootstrapError, BootstrapPhase, BootstrapSession, StoreConfig};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS
            .lock()
            .expect("log capture lock should not be poisoned")
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

#[test]
fn connection_failure_shows_empty_list_and_logs_once() {
    log::set_logger(&LOGGER).expect("capture logger should install first");
    log::set_max_level(LevelFilter::Trace);

    // A regular file where the storage directory should be cannot be opened.
    let blocker = tempfile::NamedTempFile::new().expect("temp file should be created");
    let mut session = BootstrapSession::for_app(blocker.path());

    assert!(session.bootstrap().is_empty());
    assert_eq!(session.phase(), BootstrapPhase::Failed);
    assert!(session.last_error().is_some());
    assert!(session.store().is_none());

    // Failed is terminal: no reconnect attempt, no second diagnostic.
    assert!(session.bootstrap().is_empty());
    assert!(matches!(
        session.try_bootstrap(),
        Err(BootstrapError::SessionFailed)
    ));
    let connects = session
        .history()
        .iter()
        .filter(|phase| **phase == BootstrapPhase::Connecting)
        .count();
    assert_eq!(connects, 1);

    // Store::open reports at warn; the session is the only error-level sink.
    let records = RECORDS.lock().expect("log capture lock should not be poisoned");
    let errors: Vec<_> = records
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .collect();
    assert_eq!(errors.len(), 1, "error records: {errors:?}");
    assert!(errors[0].1.contains("event=bootstrap_connect"));
    assert!(errors[0].1.contains("error_code=connection_failed"));
    assert!(records.iter().any(|(level, message)| {
        *level == Level::Warn && message.contains("event=db_open module=db status=error")
    }));
}

#[test]
fn try_bootstrap_surfaces_connection_error() {
    let blocker = tempfile::NamedTempFile::new().expect("temp file should be created");
    let mut session = BootstrapSession::new(StoreConfig::app(blocker.path()));

    let err = session.try_bootstrap().expect_err("bootstrap should fail");
    assert!(matches!(err, BootstrapError::Connection(_)));
    assert_eq!(err.code(), "connection_failed");
    assert!(session.authors().is_empty());
}
