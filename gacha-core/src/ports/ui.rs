//! UI ports - rendering and input requests

use crate::domain::result::Result;
use crate::domain::{ActionOutcome, PurchaseRequest, ViewMode};

/// Renders view transitions and action results
pub trait Presenter: Send + Sync {
    /// Called once per view transition, after the new mode is in effect
    fn show_view(&self, mode: ViewMode);

    /// Called exactly once per action
    fn show_outcome(&self, outcome: &ActionOutcome);
}

/// Presenter that renders nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn show_view(&self, _mode: ViewMode) {}

    fn show_outcome(&self, _outcome: &ActionOutcome) {}
}

/// Source of the amount and payment method for a purchase
///
/// Only consulted after the session guard has passed.
pub trait PurchaseInput {
    fn request_purchase(&self) -> Result<PurchaseRequest>;
}

/// Injected parameters
impl PurchaseInput for PurchaseRequest {
    fn request_purchase(&self) -> Result<PurchaseRequest> {
        Ok(self.clone())
    }
}
