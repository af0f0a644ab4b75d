//! Application state for the growth planner terminal UI.
//!
//! This module contains the main application state and mode management:
//! the form being edited, the orchestrator holding the report view, and the
//! bits of UI state (scroll offsets, status line) around them.

use super::form::InputCollector;
use super::orchestrator::{Orchestrator, ViewState};
use crate::domain::ReportGenerator;
use std::sync::Arc;

/// Represents the current mode of the application.
///
/// The mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing into the form fields
    Form,
    /// Scrolling through the report panel
    Report,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// Holds everything needed to render the terminal UI and react to keys.
/// The report panel is driven solely by [`App::view`].
pub struct App {
    /// The four input fields and the editing cursor
    pub form: InputCollector,
    /// Current application mode
    pub mode: AppMode,
    /// First visible line of the report panel
    pub report_scroll: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Set once the user asks to quit
    pub should_quit: bool,
    orchestrator: Orchestrator,
}

impl App {
    pub fn new(generator: Arc<dyn ReportGenerator>) -> Self {
        Self {
            form: InputCollector::default(),
            mode: AppMode::Form,
            report_scroll: 0,
            help_scroll: 0,
            status_message: None,
            should_quit: false,
            orchestrator: Orchestrator::new(generator),
        }
    }

    pub fn view(&self) -> &ViewState {
        self.orchestrator.state()
    }

    pub fn is_loading(&self) -> bool {
        self.view().is_loading()
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.form.is_submittable()
    }

    /// Submits a snapshot of the form.
    ///
    /// Does nothing while a request is in flight or while any field is
    /// empty. The form keeps its values after submission.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let accepted = self.orchestrator.submit(self.form.snapshot());
        if accepted {
            self.report_scroll = 0;
            self.status_message = None;
        }
        accepted
    }

    /// Picks up a finished request. Returns true when the view changed.
    pub fn poll(&mut self) -> bool {
        let changed = self.orchestrator.poll();
        if changed {
            self.report_scroll = 0;
        }
        changed
    }

    /// Blocks until the in-flight request finishes.
    pub fn wait_for_report(&mut self) -> &ViewState {
        self.report_scroll = 0;
        self.orchestrator.wait()
    }

    /// Markdown text of the current report, if there is one.
    pub fn report_markdown(&self) -> Option<String> {
        self.view().report().map(|report| report.to_markdown())
    }

    /// Processes the result of copying the report to the clipboard.
    pub fn set_copy_result(&mut self, result: Result<(), String>) {
        self.status_message = Some(match result {
            Ok(()) => "Report copied to clipboard".to_string(),
            Err(error) => format!("Copy failed: {error}"),
        });
    }

    pub fn start_report_browsing(&mut self) {
        self.mode = AppMode::Report;
    }

    pub fn return_to_form(&mut self) {
        self.mode = AppMode::Form;
    }

    pub fn show_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn scroll_report_up(&mut self, lines: usize) {
        self.report_scroll = self.report_scroll.saturating_sub(lines);
    }

    pub fn scroll_report_down(&mut self, lines: usize) {
        self.report_scroll += lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BusinessInput, BusinessReport, FormField, ReportError, ReportResult};
    use std::sync::Mutex;

    /// Counts calls and always fails.
    #[derive(Default)]
    struct CountingGenerator {
        calls: Mutex<Vec<BusinessInput>>,
    }

    impl ReportGenerator for CountingGenerator {
        fn request_report(&self, input: &BusinessInput) -> ReportResult<BusinessReport> {
            self.calls.lock().unwrap().push(input.clone());
            Err(ReportError::RequestFailed)
        }
    }

    fn app_with_counter() -> (App, Arc<CountingGenerator>) {
        let generator = Arc::new(CountingGenerator::default());
        (App::new(generator.clone()), generator)
    }

    fn fill(app: &mut App) {
        app.form.set_field(FormField::Name, "Cafe");
        app.form.set_field(FormField::Category, "Food");
        app.form.set_field(FormField::Location, "SF");
        app.form.set_field(FormField::Details, "Small");
    }

    #[test]
    fn test_app_new() {
        let (app, _) = app_with_counter();
        assert_eq!(app.mode, AppMode::Form);
        assert_eq!(app.view(), &ViewState::Idle);
        assert!(!app.can_submit());
        assert!(app.status_message.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_incomplete_form_submission_is_noop() {
        let (mut app, generator) = app_with_counter();
        app.form.set_field(FormField::Name, "Cafe");
        assert!(!app.submit());
        assert_eq!(app.view(), &ViewState::Idle);
        assert!(generator.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failure_keeps_form_values() {
        let (mut app, generator) = app_with_counter();
        fill(&mut app);
        assert!(app.submit());
        assert!(app.is_loading());
        assert!(!app.can_submit());

        app.wait_for_report();
        assert!(app.view().error_message().is_some());
        assert_eq!(app.form.value(FormField::Name), "Cafe");
        assert_eq!(app.form.value(FormField::Details), "Small");
        assert_eq!(generator.calls.lock().unwrap().len(), 1);
        assert!(app.can_submit());
    }

    #[test]
    fn test_copy_result_messages() {
        let (mut app, _) = app_with_counter();
        app.set_copy_result(Ok(()));
        assert_eq!(app.status_message.as_deref(), Some("Report copied to clipboard"));
        app.set_copy_result(Err("no display".to_string()));
        assert_eq!(app.status_message.as_deref(), Some("Copy failed: no display"));
        assert!(app.report_markdown().is_none());
    }

    #[test]
    fn test_mode_transitions() {
        let (mut app, _) = app_with_counter();
        app.start_report_browsing();
        assert_eq!(app.mode, AppMode::Report);
        app.scroll_report_down(3);
        app.scroll_report_up(5);
        assert_eq!(app.report_scroll, 0);
        app.show_help();
        assert_eq!(app.mode, AppMode::Help);
        app.return_to_form();
        assert_eq!(app.mode, AppMode::Form);
    }
}
