//! Terminal stand-ins for the page's button, results panel and spinner.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::time::Duration;

use analysis::{BusyIndicator, RenderError, ResultsPanel, TriggerControl};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug)]
pub struct TerminalTrigger {
    enabled: Cell<bool>,
}

impl Default for TerminalTrigger {
    fn default() -> Self {
        Self {
            enabled: Cell::new(true),
        }
    }
}

impl TriggerControl for TerminalTrigger {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

/// Writes each rendered outcome as one line.
pub struct TerminalResults<Out> {
    out: RefCell<Out>,
}

impl<Out: Write> TerminalResults<Out> {
    pub fn new(out: Out) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> Out {
        self.out.into_inner()
    }
}

impl<Out: Write> ResultsPanel for TerminalResults<Out> {
    // Lines already printed stay on screen.
    fn clear(&self) {}

    fn render(&self, text: &str) -> Result<(), RenderError> {
        let mut out = self.out.borrow_mut();
        writeln!(out, "{text}")
            .and_then(|_| out.flush())
            .map_err(|e| RenderError(e.to_string()))
    }
}

pub struct SpinnerIndicator {
    message: String,
    bar: RefCell<Option<ProgressBar>>,
}

impl SpinnerIndicator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            bar: RefCell::new(None),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.borrow().is_some()
    }
}

impl BusyIndicator for SpinnerIndicator {
    fn show(&self) {
        let mut bar = self.bar.borrow_mut();
        if bar.is_some() {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.blue} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(self.message.clone());
        pb.enable_steady_tick(Duration::from_millis(100));
        *bar = Some(pb);
    }

    fn hide(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trigger_starts_enabled_and_toggles() {
        let trigger = TerminalTrigger::default();
        assert!(trigger.is_enabled());
        trigger.set_enabled(false);
        assert!(!trigger.is_enabled());
    }

    #[test]
    fn results_write_one_line_per_render() {
        let results = TerminalResults::new(Vec::new());
        results.render("Error: imagery unavailable").unwrap();
        results.clear();
        results.render("Dense housing.").unwrap();
        let text = String::from_utf8(results.into_inner()).unwrap();
        assert_eq!(text, "Error: imagery unavailable\nDense housing.\n");
    }

    #[test]
    fn spinner_show_and_hide() {
        let spinner = SpinnerIndicator::new("describing");
        assert!(!spinner.is_visible());
        spinner.show();
        spinner.show();
        assert!(spinner.is_visible());
        spinner.hide();
        spinner.hide();
        assert!(!spinner.is_visible());
    }
}
