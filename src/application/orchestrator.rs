//! View state and the single control point that drives it.
//!
//! Every accepted submission moves the view to [`ViewState::Loading`] and
//! runs the report request on a worker thread. Finished requests come back
//! over a channel and are applied by [`Orchestrator::poll`] or
//! [`Orchestrator::wait`].

use crate::domain::{BusinessInput, BusinessReport, FALLBACK_ERROR_MESSAGE, ReportGenerator, ReportResult};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// What the report panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The last request produced a full report
    Success(BusinessReport),
    /// The last request failed; holds a display-ready message
    Failure(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn report(&self) -> Option<&BusinessReport> {
        match self {
            ViewState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

pub struct Orchestrator {
    generator: Arc<dyn ReportGenerator>,
    state: ViewState,
    pending: Option<Receiver<ReportResult<BusinessReport>>>,
}

impl Orchestrator {
    pub fn new(generator: Arc<dyn ReportGenerator>) -> Self {
        Self {
            generator,
            state: ViewState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Starts a report request for `input`.
    ///
    /// Returns false without doing anything while a request is already in
    /// flight. Otherwise any previous report or error is discarded at once
    /// and the state becomes `Loading`.
    pub fn submit(&mut self, input: BusinessInput) -> bool {
        if self.state.is_loading() {
            tracing::debug!("Submission ignored, a request is already in flight");
            return false;
        }

        self.state = ViewState::Loading;
        let (tx, rx) = mpsc::channel();
        let generator = Arc::clone(&self.generator);

        tracing::info!("Submitting report request");
        thread::spawn(move || {
            let result = generator.request_report(&input);
            // The receiver only disappears when the orchestrator is dropped.
            let _ = tx.send(result);
        });
        self.pending = Some(rx);
        true
    }

    /// Applies a finished request, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.complete(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                tracing::error!("Report worker exited without a result");
                self.fail(String::new());
                true
            }
        }
    }

    /// Blocks until the in-flight request finishes and applies it.
    pub fn wait(&mut self) -> &ViewState {
        if let Some(rx) = self.pending.take() {
            match rx.recv() {
                Ok(result) => self.complete(result),
                Err(_) => {
                    tracing::error!("Report worker exited without a result");
                    self.fail(String::new());
                }
            }
        }
        &self.state
    }

    fn complete(&mut self, result: ReportResult<BusinessReport>) {
        self.pending = None;
        match result {
            Ok(report) => {
                tracing::info!("Report ready");
                self.state = ViewState::Success(report);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Report request failed");
                self.fail(err.user_message());
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.pending = None;
        self.state = if message.trim().is_empty() {
            ViewState::Failure(FALLBACK_ERROR_MESSAGE.to_string())
        } else {
            ViewState::Failure(message)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReportError, ReportSection, SwotAnalysis};
    use std::sync::Mutex;
    use std::sync::mpsc::Sender;

    fn report(summary: &str) -> BusinessReport {
        let section = ReportSection {
            title: "T".to_string(),
            content: "C".to_string(),
            points: vec!["P".to_string()],
        };
        BusinessReport {
            executive_summary: summary.to_string(),
            swot_analysis: SwotAnalysis {
                strengths: vec![],
                weaknesses: vec![],
                opportunities: vec![],
                threats: vec![],
            },
            growth_areas: section.clone(),
            marketing_strategies: section.clone(),
            operational_improvements: section,
        }
    }

    /// Hands out results only when the test releases them.
    struct GatedGenerator {
        gate: Mutex<Receiver<ReportResult<BusinessReport>>>,
    }

    impl ReportGenerator for GatedGenerator {
        fn request_report(&self, _input: &BusinessInput) -> ReportResult<BusinessReport> {
            self.gate
                .lock()
                .unwrap()
                .recv()
                .unwrap_or(Err(ReportError::RequestFailed))
        }
    }

    fn gated() -> (Orchestrator, Sender<ReportResult<BusinessReport>>) {
        let (tx, rx) = mpsc::channel();
        let generator = GatedGenerator { gate: Mutex::new(rx) };
        (Orchestrator::new(Arc::new(generator)), tx)
    }

    fn input() -> BusinessInput {
        BusinessInput::new("Cafe", "Food", "SF", "Small")
    }

    #[test]
    fn test_initial_state_is_idle() {
        let (orchestrator, _tx) = gated();
        assert_eq!(orchestrator.state(), &ViewState::Idle);
    }

    #[test]
    fn test_submit_then_success() {
        let (mut orchestrator, tx) = gated();
        assert!(orchestrator.submit(input()));
        assert!(orchestrator.state().is_loading());
        assert!(!orchestrator.poll());

        tx.send(Ok(report("done"))).unwrap();
        let state = orchestrator.wait();
        assert_eq!(state.report().unwrap().executive_summary, "done");
    }

    #[test]
    fn test_submit_rejected_while_loading() {
        let (mut orchestrator, tx) = gated();
        assert!(orchestrator.submit(input()));
        assert!(!orchestrator.submit(input()));

        tx.send(Err(ReportError::RequestFailed)).unwrap();
        orchestrator.wait();
        assert_eq!(
            orchestrator.state().error_message(),
            Some(crate::domain::REQUEST_FAILED_MESSAGE)
        );
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let (mut orchestrator, tx) = gated();
        orchestrator.submit(input());
        tx.send(Ok(report("first"))).unwrap();
        orchestrator.wait();
        assert!(orchestrator.state().report().is_some());

        assert!(orchestrator.submit(input()));
        assert_eq!(orchestrator.state(), &ViewState::Loading);
        assert!(orchestrator.state().report().is_none());

        tx.send(Err(ReportError::RequestFailed)).unwrap();
        orchestrator.wait();
        assert!(orchestrator.submit(input()));
        assert_eq!(orchestrator.state(), &ViewState::Loading);
        assert!(orchestrator.state().error_message().is_none());

        tx.send(Ok(report("third"))).unwrap();
        assert_eq!(
            orchestrator.wait().report().unwrap().executive_summary,
            "third"
        );
    }

    #[test]
    fn test_poll_applies_result() {
        let (mut orchestrator, tx) = gated();
        orchestrator.submit(input());
        tx.send(Ok(report("polled"))).unwrap();

        let mut changed = false;
        for _ in 0..200 {
            if orchestrator.poll() {
                changed = true;
                break;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(changed);
        assert_eq!(
            orchestrator.state().report().unwrap().executive_summary,
            "polled"
        );
        assert!(!orchestrator.poll());
    }

    #[test]
    fn test_empty_message_falls_back() {
        let (mut orchestrator, _tx) = gated();
        orchestrator.fail("  ".to_string());
        assert_eq!(
            orchestrator.state().error_message(),
            Some(FALLBACK_ERROR_MESSAGE)
        );
    }

    /// Worker dies before sending anything back.
    struct PanickingGenerator;

    impl ReportGenerator for PanickingGenerator {
        fn request_report(&self, _input: &BusinessInput) -> ReportResult<BusinessReport> {
            panic!("generator crashed");
        }
    }

    #[test]
    fn test_worker_panic_waits_into_fallback_failure() {
        let mut orchestrator = Orchestrator::new(Arc::new(PanickingGenerator));
        assert!(orchestrator.submit(input()));
        assert_eq!(
            orchestrator.wait(),
            &ViewState::Failure(FALLBACK_ERROR_MESSAGE.to_string())
        );
        assert!(orchestrator.submit(input()));
    }

    #[test]
    fn test_worker_panic_polls_into_fallback_failure() {
        let mut orchestrator = Orchestrator::new(Arc::new(PanickingGenerator));
        orchestrator.submit(input());

        let mut changed = false;
        for _ in 0..200 {
            if orchestrator.poll() {
                changed = true;
                break;
            }
            thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(changed);
        assert_eq!(
            orchestrator.state().error_message(),
            Some(FALLBACK_ERROR_MESSAGE)
        );
        assert!(!orchestrator.poll());
    }

    #[test]
    fn test_wait_without_request_is_noop() {
        let (mut orchestrator, _tx) = gated();
        assert_eq!(orchestrator.wait(), &ViewState::Idle);
    }
}
