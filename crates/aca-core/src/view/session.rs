//! Navigation bar state: sign-in, sign-out and the active route.

use super::RpcResult;
use crate::call::Ticket;
use crate::screen::{AppContext, Screen};
use crate::status::{Operation, Outcome, StatusMessage, project};
use crate::task::{Task, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionCall {
    SignIn,
}

#[derive(Debug, Clone)]
pub enum SessionMessage {
    SignIn,
    SignedIn(Ticket<SessionCall>, RpcResult<String>),
    SignOut,
    Navigate(String),
}

#[derive(Debug)]
pub struct SessionViewModel {
    ctx: AppContext,
    screen: Screen<SessionCall>,
    email: Option<String>,
    current_route: String,
}

impl SessionViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            screen: Screen::default(),
            email: None,
            current_route: "/".to_string(),
        }
    }

    pub fn sign_in(&mut self) -> Task<SessionMessage> {
        let ticket = self.screen.begin(SessionCall::SignIn);
        let auth = self.ctx.auth.clone();
        Task::perform(
            async move { auth.sign_in().await },
            move |result| SessionMessage::SignedIn(ticket, result),
        )
    }

    pub fn sign_out(&mut self) {
        self.ctx.auth.sign_out();
        self.email = None;
        self.screen
            .set_status(project(Operation::SignOut, Outcome::Success));
    }

    pub fn signed_in(&self) -> bool {
        self.ctx.signed_in()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Whether `route` is the page currently shown.
    pub fn is_active(&self, route: &str) -> bool {
        self.current_route == route
    }

    pub fn current_route(&self) -> &str {
        &self.current_route
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.screen.status()
    }
}

impl ViewModel for SessionViewModel {
    type Message = SessionMessage;

    fn update(&mut self, message: SessionMessage) -> Task<SessionMessage> {
        match message {
            SessionMessage::SignIn => self.sign_in(),

            SessionMessage::SignedIn(ticket, result) => {
                let email = result.as_deref().unwrap_or_default().to_string();
                if self
                    .screen
                    .settle(&ticket, Operation::SignIn { email: &email }, &result)
                    && result.is_ok()
                {
                    self.email = Some(email);
                }
                Task::none()
            }

            SessionMessage::SignOut => {
                self.sign_out();
                Task::none()
            }

            SessionMessage::Navigate(route) => {
                self.current_route = route;
                Task::none()
            }
        }
    }
}
