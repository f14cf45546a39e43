//! State shared by every screen: call tracking, status line, login request.

use std::hash::Hash;
use std::sync::Arc;

use aca_client::{Authenticator, Gateway, RpcError};

use crate::call::{CallState, CallTracker, Ticket};
use crate::error::CoreError;
use crate::status::{Operation, Outcome, StatusMessage, project};

/// Collaborators a screen talks to.
#[derive(Clone)]
pub struct AppContext {
    pub gateway: Arc<Gateway>,
    pub auth: Arc<dyn Authenticator>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("gateway", &self.gateway)
            .field("signed_in", &self.auth.signed_in())
            .finish()
    }
}

impl AppContext {
    pub fn new(gateway: Arc<Gateway>, auth: Arc<dyn Authenticator>) -> Self {
        Self { gateway, auth }
    }

    pub fn signed_in(&self) -> bool {
        self.auth.signed_in()
    }
}

/// Bookkeeping common to all view models.
#[derive(Debug, Clone)]
pub struct Screen<S> {
    calls: CallTracker<S>,
    status: Option<StatusMessage>,
    login_requested: bool,
}

impl<S> Default for Screen<S> {
    fn default() -> Self {
        Self {
            calls: CallTracker::default(),
            status: None,
            login_requested: false,
        }
    }
}

impl<S: Clone + Eq + Hash + std::fmt::Debug> Screen<S> {
    pub fn begin(&mut self, slot: S) -> Ticket<S> {
        tracing::debug!(?slot, "Call started");
        self.calls.begin(slot)
    }

    /// Settles a completion and projects its status.
    ///
    /// Returns false for stale completions, which must not touch the view.
    pub fn settle<T>(
        &mut self,
        ticket: &Ticket<S>,
        operation: Operation<'_>,
        result: &Result<T, RpcError>,
    ) -> bool {
        if !self.settle_quietly(ticket, result) {
            return false;
        }
        self.status = Some(project(operation, Outcome::from_result(result)));
        true
    }

    /// Settles a completion without touching the status line.
    pub fn settle_quietly<T>(&mut self, ticket: &Ticket<S>, result: &Result<T, RpcError>) -> bool {
        if !self.calls.finish(ticket, result.is_ok()) {
            tracing::debug!(slot = ?ticket.slot(), "Discarding stale completion");
            return false;
        }
        if let Err(err) = result {
            tracing::warn!(slot = ?ticket.slot(), error = %err, "Call failed");
            if err.is_unauthorized() {
                self.login_requested = true;
            }
        }
        true
    }

    /// Settles a completion, reporting only failures on the status line.
    pub fn settle_reporting_errors<T>(
        &mut self,
        ticket: &Ticket<S>,
        operation: Operation<'_>,
        result: &Result<T, RpcError>,
    ) -> bool {
        if !self.settle_quietly(ticket, result) {
            return false;
        }
        if result.is_err() {
            self.status = Some(project(operation, Outcome::from_result(result)));
        }
        true
    }

    /// Settles a call the server answered but declined.
    pub fn settle_rejected(&mut self, ticket: &Ticket<S>, operation: Operation<'_>) -> bool {
        if !self.calls.finish(ticket, false) {
            return false;
        }
        tracing::warn!(slot = ?ticket.slot(), "Call declined by server");
        self.status = Some(project(operation, Outcome::Failure(None)));
        true
    }

    pub fn is_loading(&self) -> bool {
        self.calls.is_loading()
    }

    /// Refuses a new call on `slot` while an earlier one is outstanding.
    pub fn ensure_idle(&self, slot: &S) -> crate::error::Result<()> {
        if self.calls.state(slot).is_loading() {
            tracing::debug!(?slot, "Call still in flight");
            return Err(CoreError::ChangePending);
        }
        Ok(())
    }

    pub fn call_state(&self, slot: &S) -> CallState {
        self.calls.state(slot)
    }

    pub fn calls(&self) -> &CallTracker<S> {
        &self.calls
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Shows a failed action on the status line.
    pub fn report(&mut self, err: &CoreError) {
        tracing::warn!(error = %err, "Action rejected");
        if err.is_sign_in_required() {
            self.login_requested = true;
        }
        self.status = Some(StatusMessage::warning(err.user_message()));
    }

    /// Whether the screen asked the user to sign in.
    pub fn login_requested(&self) -> bool {
        self.login_requested
    }

    pub fn request_login(&mut self) {
        self.login_requested = true;
    }

    /// Clears and returns the login request.
    pub fn take_login_request(&mut self) -> bool {
        std::mem::take(&mut self.login_requested)
    }

    pub fn close(&mut self) {
        self.calls.close();
    }

    pub fn is_closed(&self) -> bool {
        self.calls.is_closed()
    }
}
