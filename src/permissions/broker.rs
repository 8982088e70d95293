//! Permission brokering between the engine and the overlay UI.
//!
//! The broker reconciles three permission sources per (host, kind):
//!
//! 1. **Persisted** grants in the [`Store`] ("Always Allow" / "Deny"),
//! 2. **Session** grants held in memory ("Allow this time"),
//! 3. **Pending prompts** awaiting a UI decision.
//!
//! The engine drives two entry points, mirroring its check/request handler
//! pair: [`PermissionBroker::check`] answers synchronously without ever
//! prompting, and [`PermissionBroker::request`] may open a prompt and
//! awaits the user's decision.
//!
//! Concurrent requests for the same (host, kinds) attach to one pending
//! prompt, so a camera+microphone media bundle racing against itself still
//! produces a single prompt overlay.

// ============================================================================
// Imports
// ============================================================================

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::ShellEvent;
use crate::identifiers::PromptId;
use crate::store::Store;

use super::kind::{PermissionDecision, PermissionKind, PermissionStatus};

// ============================================================================
// Types
// ============================================================================

/// The overlay UI's answer to a permission prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptResponse {
    /// The prompt being answered.
    pub prompt_id: PromptId,
    /// Whether access is granted.
    pub allow: bool,
    /// Whether the decision is persisted ("Always Allow" / "Deny") or
    /// session-only ("Allow this time").
    pub persist: bool,
}

/// A prompt awaiting a UI decision.
struct PendingPrompt {
    /// Requesting host.
    host: String,
    /// Requested kinds, sorted for coalescing comparison.
    kinds: Vec<PermissionKind>,
    /// Requesters blocked on this prompt.
    waiters: Vec<oneshot::Sender<PermissionDecision>>,
}

// ============================================================================
// PermissionBroker
// ============================================================================

/// Reconciles persisted, session, and in-flight permission state.
///
/// Dropping the broker drops all pending waiters' senders; blocked
/// requesters observe [`Error::PromptAbandoned`] and treat it as deny.
pub struct PermissionBroker {
    /// Shared persisted store.
    store: Arc<Mutex<Store>>,
    /// Session-only grants, cleared when the shell exits.
    session: Mutex<FxHashMap<(String, PermissionKind), PermissionStatus>>,
    /// Prompts awaiting a UI decision.
    pending: Mutex<FxHashMap<PromptId, PendingPrompt>>,
    /// Channel to the overlay UI.
    events: mpsc::UnboundedSender<ShellEvent>,
}

impl PermissionBroker {
    /// Creates a broker over the shared store.
    pub(crate) fn new(
        store: Arc<Mutex<Store>>,
        events: mpsc::UnboundedSender<ShellEvent>,
    ) -> Self {
        Self {
            store,
            session: Mutex::new(FxHashMap::default()),
            pending: Mutex::new(FxHashMap::default()),
            events,
        }
    }
}

// ============================================================================
// PermissionBroker - Check Phase
// ============================================================================

impl PermissionBroker {
    /// Non-prompting permission check.
    ///
    /// Returns `true` iff a persisted or session grant allows the kind for
    /// the host. Used by the engine's synchronous check handler; a `false`
    /// here does not deny the request, it only means a prompt would be
    /// needed.
    #[must_use]
    pub fn check(&self, host: &str, kind: PermissionKind) -> bool {
        self.recorded_status(host, kind) == Some(PermissionStatus::Allow)
    }

    /// Returns the recorded status, preferring persisted over session.
    fn recorded_status(&self, host: &str, kind: PermissionKind) -> Option<PermissionStatus> {
        if let Some(status) = self.store.lock().permission(host, kind) {
            return Some(status);
        }
        self.session
            .lock()
            .get(&(host.to_string(), kind))
            .copied()
    }
}

// ============================================================================
// PermissionBroker - Request Phase
// ============================================================================

impl PermissionBroker {
    /// Requests permission for an engine-reported name (`"media"`,
    /// `"geolocation"`, ...), expanding bundles before brokering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPermission`] for unrecognized names and
    /// [`Error::PromptAbandoned`] if the prompt never resolves.
    pub async fn request_named(&self, host: &str, name: &str) -> Result<PermissionDecision> {
        let kinds = super::kind::expand_permission_name(name)?;
        self.request(host, &kinds).await
    }

    /// Requests permission for concrete kinds, prompting the user if no
    /// recorded grant settles the request.
    ///
    /// Resolution order:
    ///
    /// 1. Any recorded deny on any requested kind settles the request as
    ///    [`PermissionDecision::Deny`] without prompting.
    /// 2. If every kind is recorded as allowed, the request settles as
    ///    [`PermissionDecision::Allow`] without prompting.
    /// 3. Otherwise the request joins the pending prompt for the same
    ///    (host, kinds) if one exists, or opens a new one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PromptAbandoned`] if the broker shuts down with
    /// the prompt unanswered; callers treat that as deny.
    pub async fn request(
        &self,
        host: &str,
        kinds: &[PermissionKind],
    ) -> Result<PermissionDecision> {
        if kinds.is_empty() {
            return Ok(PermissionDecision::Allow);
        }

        let mut kinds: Vec<PermissionKind> = kinds.to_vec();
        kinds.sort_unstable();
        kinds.dedup();

        let statuses: Vec<Option<PermissionStatus>> = kinds
            .iter()
            .map(|kind| self.recorded_status(host, *kind))
            .collect();

        if statuses.contains(&Some(PermissionStatus::Deny)) {
            debug!(host, ?kinds, "Permission denied by recorded grant");
            return Ok(PermissionDecision::Deny);
        }

        if statuses
            .iter()
            .all(|status| *status == Some(PermissionStatus::Allow))
        {
            debug!(host, ?kinds, "Permission allowed by recorded grants");
            return Ok(PermissionDecision::Allow);
        }

        let rx = self.join_or_open_prompt(host, kinds)?;
        rx.await.map_err(|_| Error::PromptAbandoned)
    }

    /// Attaches to an existing pending prompt or opens a new one.
    fn join_or_open_prompt(
        &self,
        host: &str,
        kinds: Vec<PermissionKind>,
    ) -> Result<oneshot::Receiver<PermissionDecision>> {
        let (tx, rx) = oneshot::channel();
        let mut pending = self.pending.lock();

        if let Some(prompt) = pending
            .values_mut()
            .find(|p| p.host == host && p.kinds == kinds)
        {
            debug!(host, ?kinds, "Joined in-flight permission prompt");
            prompt.waiters.push(tx);
            return Ok(rx);
        }

        let prompt_id = PromptId::generate();
        pending.insert(
            prompt_id,
            PendingPrompt {
                host: host.to_string(),
                kinds: kinds.clone(),
                waiters: vec![tx],
            },
        );

        info!(prompt_id = %prompt_id, host, ?kinds, "Opening permission prompt");

        if self
            .events
            .send(ShellEvent::PermissionPrompt {
                prompt_id,
                host: host.to_string(),
                kinds,
            })
            .is_err()
        {
            // No UI listening; the prompt can never resolve.
            warn!(prompt_id = %prompt_id, "Event channel closed, abandoning prompt");
            pending.remove(&prompt_id);
            return Err(Error::PromptAbandoned);
        }

        Ok(rx)
    }
}

// ============================================================================
// PermissionBroker - Response Phase
// ============================================================================

impl PermissionBroker {
    /// Resolves a pending prompt with the UI's decision.
    ///
    /// Persisted decisions are written to the store, session decisions to
    /// the in-memory map; then every waiter attached to the prompt is
    /// woken with the decision.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PromptNotFound`] if the prompt is not pending,
    /// or a store error if persisting the grant fails (waiters are still
    /// woken in that case).
    pub fn respond(&self, response: &PromptResponse) -> Result<()> {
        let prompt = self
            .pending
            .lock()
            .remove(&response.prompt_id)
            .ok_or_else(|| Error::prompt_not_found(response.prompt_id))?;

        let status = PermissionStatus::from(response.allow);
        let decision = if response.allow {
            PermissionDecision::Allow
        } else {
            PermissionDecision::Deny
        };

        let record_result = self.record_decision(&prompt, status, response.persist);

        info!(
            prompt_id = %response.prompt_id,
            host = %prompt.host,
            allow = response.allow,
            persist = response.persist,
            waiters = prompt.waiters.len(),
            "Permission prompt resolved"
        );

        for waiter in prompt.waiters {
            let _ = waiter.send(decision);
        }

        record_result
    }

    /// Records the decision for every kind covered by the prompt.
    fn record_decision(
        &self,
        prompt: &PendingPrompt,
        status: PermissionStatus,
        persist: bool,
    ) -> Result<()> {
        if persist {
            let mut store = self.store.lock();
            for kind in &prompt.kinds {
                store.set_permission(prompt.host.clone(), *kind, status)?;
            }
        } else {
            let mut session = self.session.lock();
            for kind in &prompt.kinds {
                session.insert((prompt.host.clone(), *kind), status);
            }
        }
        Ok(())
    }

    /// Forgets every persisted and session decision for a host.
    ///
    /// The next request from that host prompts again. Pending prompts are
    /// left untouched.
    pub fn forget_host(&self, host: &str) -> Result<()> {
        self.session.lock().retain(|(h, _), _| h != host);
        self.store.lock().remove_permissions_for_host(host)?;
        debug!(host, "Permission decisions forgotten");
        Ok(())
    }

    /// Returns the number of prompts awaiting a decision.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

// ============================================================================
// Tests
// ============================================================================
