//! Ports for the three UI elements the controller drives.
//!
//! Handles are shared with the host's event loop, so every method takes
//! `&self` and implementations use interior mutability where they need it.

use std::rc::Rc;

use crate::error::RenderError;

/// The user-actionable element that starts an analysis request.
pub trait TriggerControl {
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

pub trait ResultsPanel {
    fn clear(&self);
    /// Replaces the panel contents with `text`.
    fn render(&self, text: &str) -> Result<(), RenderError>;
}

pub trait BusyIndicator {
    fn show(&self);
    fn hide(&self);
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Busy,
}

/// The controller's owned UI handles.
#[derive(Debug)]
pub struct UiHandles<T, R, B> {
    pub trigger: T,
    pub results: R,
    pub busy: B,
}

impl<T: TriggerControl + ?Sized> TriggerControl for Rc<T> {
    fn set_enabled(&self, enabled: bool) {
        (**self).set_enabled(enabled)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

impl<R: ResultsPanel + ?Sized> ResultsPanel for Rc<R> {
    fn clear(&self) {
        (**self).clear()
    }

    fn render(&self, text: &str) -> Result<(), RenderError> {
        (**self).render(text)
    }
}

impl<B: BusyIndicator + ?Sized> BusyIndicator for Rc<B> {
    fn show(&self) {
        (**self).show()
    }

    fn hide(&self) {
        (**self).hide()
    }
}
