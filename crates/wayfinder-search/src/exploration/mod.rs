//! Bounded relaxed exploration toward landmark leaves.

mod relaxed;

use std::fmt::Debug;
use std::ops::{Deref, DerefMut};

use wayfinder_core::{Fact, OperatorId, State};

pub use relaxed::RelaxedExploration;

/// A bounded plan finder the evaluator falls back to when no helpful
/// action is directly visible.
///
/// The protocol per evaluation: [`set_additional_goals`] with the current
/// landmark leaves, then [`find_plan_to_any`] from the current state. On
/// success the operators of the found plan are available through
/// [`exported_ops`] until the caller clears them; the buffer is reused
/// across calls, so stale contents would leak into the next evaluation.
/// The evaluator wraps every use in a [`ClearOnExit`] guard.
///
/// Implementations must terminate on every input, success or failure;
/// "no plan found" is an expected outcome, not an error.
///
/// [`set_additional_goals`]: Exploration::set_additional_goals
/// [`find_plan_to_any`]: Exploration::find_plan_to_any
/// [`exported_ops`]: Exploration::exported_ops
pub trait Exploration: Send + Debug {
    /// Configures the disjunctive goal set for the next plan-finding call.
    fn set_additional_goals(&mut self, goals: &[Fact]);

    /// Attempts to find any plan from `state` to one of the additional
    /// goal facts. An empty goal set is unreachable by definition.
    ///
    /// Returns true and fills the exported-operator buffer on success.
    fn find_plan_to_any(&mut self, state: &State) -> bool;

    /// The operators of the most recently found plan, in dependency order.
    fn exported_ops(&self) -> &[OperatorId];

    /// Empties the exported-operator buffer.
    fn clear_exported_ops(&mut self);
}

/// Scoped access to an [`Exploration`] that clears the exported-operator
/// buffer when dropped, on every exit path.
pub struct ClearOnExit<'a, X: Exploration + ?Sized> {
    exploration: &'a mut X,
}

impl<'a, X: Exploration + ?Sized> ClearOnExit<'a, X> {
    pub fn new(exploration: &'a mut X) -> Self {
        Self { exploration }
    }
}

impl<X: Exploration + ?Sized> Deref for ClearOnExit<'_, X> {
    type Target = X;

    fn deref(&self) -> &X {
        &*self.exploration
    }
}

impl<X: Exploration + ?Sized> DerefMut for ClearOnExit<'_, X> {
    fn deref_mut(&mut self) -> &mut X {
        &mut *self.exploration
    }
}

impl<X: Exploration + ?Sized> Drop for ClearOnExit<'_, X> {
    fn drop(&mut self) {
        self.exploration.clear_exported_ops();
    }
}
