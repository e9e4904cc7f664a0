//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined answers.
//!
//! # Example
//!
//! ```
//! use ember::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_answer("Continue?", "n");
//!
//! ui.message("Starting");
//! ui.success("Done!");
//! assert_eq!(ui.ask("Continue?", &["y", "n"]).unwrap(), "n");
//!
//! assert!(ui.has_message("Starting"));
//! assert!(ui.has_success("Done!"));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::{EmberError, Result};

use super::{OutputMode, StatusHandle, Table, UserInterface};

/// Mock UI implementation for testing.
///
/// Every line of output is also appended to a transcript, in order, so
/// tests can check rendered output as a whole.
#[derive(Debug)]
pub struct MockUI {
    mode: OutputMode,
    ansi: bool,
    interactive: bool,
    messages: Vec<String>,
    infos: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    debugs: Vec<String>,
    headings: Vec<String>,
    transcript: Vec<String>,
    answers: HashMap<String, VecDeque<String>>,
    questions: Vec<String>,
    statuses: Rc<RefCell<Vec<String>>>,
}

impl Default for MockUI {
    fn default() -> Self {
        Self {
            mode: OutputMode::Normal,
            ansi: true,
            interactive: false,
            messages: Vec::new(),
            infos: Vec::new(),
            successes: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            debugs: Vec::new(),
            headings: Vec::new(),
            transcript: Vec::new(),
            answers: HashMap::new(),
            questions: Vec::new(),
            statuses: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the answer to a question.
    pub fn set_answer(&mut self, question: &str, answer: &str) {
        self.answers
            .insert(question.to_string(), VecDeque::from([answer.to_string()]));
    }

    /// Queue answers for a question asked several times. The last answer
    /// is repeated once the queue is down to one.
    pub fn queue_answers(&mut self, question: &str, answers: Vec<&str>) {
        let queue = answers.into_iter().map(|s| s.to_string()).collect();
        self.answers.insert(question.to_string(), queue);
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Whether ANSI styling is still enabled.
    pub fn ansi(&self) -> bool {
        self.ansi
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn debugs(&self) -> &[String] {
        &self.debugs
    }

    pub fn headings(&self) -> &[String] {
        &self.headings
    }

    /// Questions asked, in order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Every status text, including updates and finish messages.
    pub fn statuses(&self) -> Vec<String> {
        self.statuses.borrow().clone()
    }

    /// All output as it would have been printed, without styling.
    pub fn transcript(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_info(&self, msg: &str) -> bool {
        self.infos.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.infos.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.debugs.clear();
        self.headings.clear();
        self.transcript.clear();
        self.questions.clear();
        self.statuses.borrow_mut().clear();
    }

    fn record(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn set_ansi(&mut self, enabled: bool) {
        self.ansi = enabled;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
        self.record(msg);
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
        self.record(msg);
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
        self.record(msg);
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
        self.record(msg);
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
        self.record(msg);
    }

    fn debug(&mut self, msg: &str) {
        if self.mode.shows_debug() {
            self.debugs.push(msg.to_string());
            self.record(msg);
        }
    }

    fn heading(&mut self, title: &str) {
        self.headings.push(title.to_string());
        self.record(title);
    }

    fn table(&mut self, table: &Table) {
        if !table.is_empty() {
            let rendered = table.render();
            self.record(&rendered);
        }
    }

    fn ask(&mut self, question: &str, choices: &[&str]) -> Result<String> {
        self.questions.push(question.to_string());

        if let Some(queue) = self.answers.get_mut(question) {
            let answer = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            };
            if let Some(answer) = answer {
                return Ok(answer);
            }
        }

        choices
            .first()
            .map(|c| c.to_string())
            .ok_or_else(|| EmberError::command(format!("No answer for \"{}\"", question)))
    }

    fn start_status(&mut self, message: &str) -> Box<dyn StatusHandle> {
        self.statuses.borrow_mut().push(message.to_string());
        Box::new(MockStatus {
            log: Rc::clone(&self.statuses),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock status handle that records every update in its MockUI.
#[derive(Debug)]
pub struct MockStatus {
    log: Rc<RefCell<Vec<String>>>,
}

impl StatusHandle for MockStatus {
    fn set_message(&mut self, msg: &str) {
        self.log.borrow_mut().push(msg.to_string());
    }

    fn warn(&mut self, msg: &str) {
        self.log.borrow_mut().push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.log.borrow_mut().push(msg.to_string());
    }

    fn finish_error(&mut self, msg: &str) {
        self.log.borrow_mut().push(msg.to_string());
    }

    fn stop(&mut self) {}
}
