//! # Safety Protocol
//!
//! Confirmation state machines guarding destructive operations. They know
//! nothing about terminals: callers feed in answers, the machine decides.
//!
//! ## Clear-All Confirmation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──begin()──► store empty? ──yes──► AlreadyEmpty (stay Idle)      │
//! │                          │                                              │
//! │                          no                                             │
//! │                          ▼                                              │
//! │              AwaitingFirstConfirm ──confirm_intent(false)──► Cancelled  │
//! │                          │                                              │
//! │                  confirm_intent(true)                                   │
//! │                          ▼                                              │
//! │              AwaitingWordConfirm ──confirm_word(other)────► Cancelled   │
//! │                          │                                              │
//! │                 confirm_word("ZERAR")                                   │
//! │                          ▼                                              │
//! │                 Executed { removed } ── store.clear()                   │
//! │                                                                         │
//! │   Cancelled and Executed return the machine to Idle.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Reload With Unsaved Changes
//! [`ReloadChoice`] is the decision a caller makes when the store is dirty.
//! The reload itself needs file I/O and lives in `stockbook-storage`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::store::ProductStore;
use crate::CLEAR_CONFIRMATION_WORD;

// =============================================================================
// Answers
// =============================================================================

/// Whether a free-text answer means "yes" (`s`, `sim`, `y`, `yes`).
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

/// Whether a free-text answer means "no" (`n`, `não`, `nao`, `no`).
pub fn is_negative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "n" | "não" | "nao" | "no"
    )
}

// =============================================================================
// Clear-All Protocol
// =============================================================================

/// Where the clear-all protocol currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearState {
    Idle,
    AwaitingFirstConfirm,
    AwaitingWordConfirm,
}

impl ClearState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ClearState::Idle => "Idle",
            ClearState::AwaitingFirstConfirm => "AwaitingFirstConfirm",
            ClearState::AwaitingWordConfirm => "AwaitingWordConfirm",
        }
    }
}

/// Terminal result of one clear-all invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearOutcome {
    /// The store had nothing to clear. No prompt was needed.
    AlreadyEmpty,
    /// The caller declined, or typed the wrong word.
    Cancelled,
    /// The store was cleared.
    Executed { removed: usize },
}

/// What the protocol needs next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearStep {
    /// Ask the user to affirm intent to remove `pending` products.
    NeedsIntent { pending: usize },
    /// Ask the user to type the confirmation word.
    NeedsWord { pending: usize },
    Finished(ClearOutcome),
}

/// Double-confirmation state machine for clearing the whole store.
#[derive(Debug, Clone)]
pub struct ClearProtocol {
    confirm_word: String,
    state: ClearState,
    pending: usize,
}

impl Default for ClearProtocol {
    fn default() -> Self {
        Self::new(CLEAR_CONFIRMATION_WORD)
    }
}

impl ClearProtocol {
    /// Creates a protocol that expects `confirm_word` (case-sensitive) at the
    /// final step.
    pub fn new(confirm_word: impl Into<String>) -> Self {
        ClearProtocol {
            confirm_word: confirm_word.into(),
            state: ClearState::Idle,
            pending: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> ClearState {
        self.state
    }

    #[inline]
    pub fn expected_word(&self) -> &str {
        &self.confirm_word
    }

    /// Abandons any in-progress confirmation.
    pub fn reset(&mut self) {
        self.state = ClearState::Idle;
        self.pending = 0;
    }

    fn require_state(&self, expected: ClearState) -> CoreResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CoreError::ConfirmationOutOfOrder {
                expected: expected.as_str(),
                actual: self.state.as_str(),
            })
        }
    }

    fn finish(&mut self, outcome: ClearOutcome) -> ClearStep {
        debug!(?outcome, "Clear protocol finished");
        self.reset();
        ClearStep::Finished(outcome)
    }

    /// Starts a clear-all request.
    pub fn begin(&mut self, store: &ProductStore) -> CoreResult<ClearStep> {
        self.require_state(ClearState::Idle)?;

        if store.is_empty() {
            return Ok(self.finish(ClearOutcome::AlreadyEmpty));
        }

        self.state = ClearState::AwaitingFirstConfirm;
        self.pending = store.len();
        debug!(pending = self.pending, "Clear protocol awaiting intent");
        Ok(ClearStep::NeedsIntent {
            pending: self.pending,
        })
    }

    /// First confirmation: does the caller really want to clear everything?
    pub fn confirm_intent(&mut self, affirmed: bool) -> CoreResult<ClearStep> {
        self.require_state(ClearState::AwaitingFirstConfirm)?;

        if !affirmed {
            return Ok(self.finish(ClearOutcome::Cancelled));
        }

        self.state = ClearState::AwaitingWordConfirm;
        Ok(ClearStep::NeedsWord {
            pending: self.pending,
        })
    }

    /// Final confirmation: the typed word must match exactly after trimming.
    pub fn confirm_word(&mut self, store: &mut ProductStore, typed: &str) -> CoreResult<ClearStep> {
        self.require_state(ClearState::AwaitingWordConfirm)?;

        if typed.trim() != self.confirm_word {
            return Ok(self.finish(ClearOutcome::Cancelled));
        }

        let removed = store.clear();
        info!(removed, "Inventory cleared after double confirmation");
        Ok(self.finish(ClearOutcome::Executed { removed }))
    }

    /// Drives the whole protocol with answers collected up front.
    ///
    /// ```rust
    /// use stockbook_core::{ClearOutcome, ClearProtocol, Money, ProductStore};
    ///
    /// let mut store = ProductStore::new();
    /// store.add("Mouse", Money::from_cents(100), 1, "").unwrap();
    ///
    /// let mut protocol = ClearProtocol::default();
    /// let outcome = protocol.run(&mut store, true, "zerar").unwrap();
    /// assert_eq!(outcome, ClearOutcome::Cancelled);
    /// assert_eq!(store.len(), 1);
    ///
    /// let outcome = protocol.run(&mut store, true, "ZERAR").unwrap();
    /// assert_eq!(outcome, ClearOutcome::Executed { removed: 1 });
    /// ```
    pub fn run(
        &mut self,
        store: &mut ProductStore,
        intent_affirmed: bool,
        typed_word: &str,
    ) -> CoreResult<ClearOutcome> {
        let mut step = self.begin(store)?;
        loop {
            step = match step {
                ClearStep::NeedsIntent { .. } => self.confirm_intent(intent_affirmed)?,
                ClearStep::NeedsWord { .. } => self.confirm_word(store, typed_word)?,
                ClearStep::Finished(outcome) => return Ok(outcome),
            };
        }
    }
}

// =============================================================================
// Reload Decision
// =============================================================================

/// What to do with unsaved changes before reloading from file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadChoice {
    SaveThenReload,
    DiscardAndReload,
    Abort,
}

impl ReloadChoice {
    /// Maps the answer to "save before reloading?".
    ///
    /// Yes saves first, no discards, anything else aborts.
    pub fn from_answer(answer: &str) -> Self {
        if is_affirmative(answer) {
            ReloadChoice::SaveThenReload
        } else if is_negative(answer) {
            ReloadChoice::DiscardAndReload
        } else {
            ReloadChoice::Abort
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn store_with(n: usize) -> ProductStore {
        let mut store = ProductStore::new();
        for i in 0..n {
            store
                .add(&format!("Item {i}"), Money::from_cents(100), 1, "Geral")
                .unwrap();
        }
        store.mark_clean();
        store
    }

    #[test]
    fn test_answers() {
        for yes in ["s", "SIM", " y ", "Yes"] {
            assert!(is_affirmative(yes), "{yes}");
        }
        for no in ["n", "Não", "nao", "NO"] {
            assert!(is_negative(no), "{no}");
        }
        assert!(!is_affirmative("talvez"));
        assert!(!is_negative(""));
    }

    #[test]
    fn test_full_confirmation_clears() {
        let mut store = store_with(3);
        let mut protocol = ClearProtocol::default();

        assert_eq!(
            protocol.begin(&store).unwrap(),
            ClearStep::NeedsIntent { pending: 3 }
        );
        assert_eq!(protocol.state(), ClearState::AwaitingFirstConfirm);
        assert_eq!(
            protocol.confirm_intent(true).unwrap(),
            ClearStep::NeedsWord { pending: 3 }
        );
        assert_eq!(
            protocol.confirm_word(&mut store, " ZERAR ").unwrap(),
            ClearStep::Finished(ClearOutcome::Executed { removed: 3 })
        );
        assert!(store.is_empty());
        assert!(store.is_dirty());
        assert_eq!(protocol.state(), ClearState::Idle);
    }

    #[test]
    fn test_custom_word_drives_final_step() {
        let mut store = store_with(1);
        let mut protocol = ClearProtocol::new("APAGAR");
        assert_eq!(protocol.expected_word(), "APAGAR");
        assert_eq!(ClearProtocol::default().expected_word(), "ZERAR");

        protocol.begin(&store).unwrap();
        protocol.confirm_intent(true).unwrap();
        assert_eq!(
            protocol.confirm_word(&mut store, "APAGAR").unwrap(),
            ClearStep::Finished(ClearOutcome::Executed { removed: 1 })
        );
    }

    #[test]
    fn test_declined_intent_cancels() {
        let mut store = store_with(2);
        let mut protocol = ClearProtocol::default();

        assert_eq!(protocol.run(&mut store, false, "ZERAR").unwrap(), ClearOutcome::Cancelled);
        assert_eq!(store.len(), 2);
        assert!(!store.is_dirty());
        assert_eq!(protocol.state(), ClearState::Idle);
    }

    #[test]
    fn test_wrong_word_cancels() {
        let mut store = store_with(2);
        let mut protocol = ClearProtocol::default();

        for typed in ["zerar", "ZERA", "", "SIM"] {
            assert_eq!(protocol.run(&mut store, true, typed).unwrap(), ClearOutcome::Cancelled);
            assert_eq!(store.len(), 2);
        }
    }

    #[test]
    fn test_empty_store_short_circuits() {
        let mut store = ProductStore::new();
        let mut protocol = ClearProtocol::default();

        assert_eq!(
            protocol.begin(&store).unwrap(),
            ClearStep::Finished(ClearOutcome::AlreadyEmpty)
        );
        assert_eq!(protocol.state(), ClearState::Idle);
        assert_eq!(
            protocol.run(&mut store, false, "").unwrap(),
            ClearOutcome::AlreadyEmpty
        );
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_custom_word() {
        let mut store = store_with(1);
        let mut protocol = ClearProtocol::new("WIPE");
        assert_eq!(protocol.run(&mut store, true, "ZERAR").unwrap(), ClearOutcome::Cancelled);
        assert_eq!(
            protocol.run(&mut store, true, "WIPE").unwrap(),
            ClearOutcome::Executed { removed: 1 }
        );
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let mut store = store_with(1);
        let mut protocol = ClearProtocol::default();

        assert!(matches!(
            protocol.confirm_intent(true),
            Err(CoreError::ConfirmationOutOfOrder { .. })
        ));

        protocol.begin(&store).unwrap();
        assert_eq!(
            protocol.confirm_word(&mut store, "ZERAR").unwrap_err(),
            CoreError::ConfirmationOutOfOrder {
                expected: "AwaitingWordConfirm",
                actual: "AwaitingFirstConfirm",
            }
        );
        assert!(protocol.begin(&store).is_err());
        assert_eq!(store.len(), 1);

        protocol.reset();
        assert!(protocol.begin(&store).is_ok());
    }

    #[test]
    fn test_reload_choice_from_answer() {
        assert_eq!(ReloadChoice::from_answer("s"), ReloadChoice::SaveThenReload);
        assert_eq!(ReloadChoice::from_answer("não"), ReloadChoice::DiscardAndReload);
        assert_eq!(ReloadChoice::from_answer("x"), ReloadChoice::Abort);
        assert_eq!(ReloadChoice::from_answer(""), ReloadChoice::Abort);
    }
}
