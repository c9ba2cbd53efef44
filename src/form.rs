use anyhow::Result;

use crate::submitter::Submitter;
use crate::types::{FormInput, SubmitState};

/// Label applied to the submit control once the payload is delivered
pub const SAVED_LABEL: &str = "Saved";

/// UI capabilities the form needs from its host.
///
/// The form never touches a document directly; the host page (or a terminal,
/// or a test recorder) implements these three hooks.
pub trait FormUi {
    /// Disable the submit control so a second click cannot fire
    fn disable_submit(&mut self);
    /// Swap the submit control to its completed visual style
    fn apply_saved_style(&mut self);
    /// Replace the submit control label
    fn set_submit_label(&mut self, label: &str);
}

/// The handoff form: one submission per call, state tracked explicitly.
pub struct HandoffForm<U: FormUi> {
    submitter: Submitter,
    ui: U,
    state: SubmitState,
}

impl<U: FormUi> HandoffForm<U> {
    pub fn new(ui: U) -> Self {
        Self::with_submitter(Submitter::new(), ui)
    }

    pub fn with_submitter(submitter: Submitter, ui: U) -> Self {
        Self {
            submitter,
            ui,
            state: SubmitState::Idle,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// Whether a submission is still considered in flight.
    ///
    /// A failed submission never clears this: the control stays disabled and
    /// the page stays in its loading shape until the user starts over.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmitState::Submitting | SubmitState::Failed)
    }

    /// Deliver `input` to the loopback listener and update the host UI.
    ///
    /// The submit control is disabled before the request is issued. Any
    /// settled response, whatever its status code, moves the form to
    /// [`SubmitState::Done`] and applies the saved style and label exactly
    /// once. A transport failure is logged and returned; the UI is left
    /// untouched in that case.
    pub async fn submit(&mut self, input: &FormInput) -> Result<()> {
        self.ui.disable_submit();
        self.state = SubmitState::Submitting;

        match self.submitter.submit(&input.port, &input.payload).await {
            Ok(()) => {
                self.state = SubmitState::Done;
                self.ui.apply_saved_style();
                self.ui.set_submit_label(SAVED_LABEL);
                Ok(())
            }
            Err(err) => {
                tracing::error!("handoff submission failed: {:#}", err);
                self.state = SubmitState::Failed;
                Err(err)
            }
        }
    }
}
