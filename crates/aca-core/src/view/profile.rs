//! Profile screen: edit display name, organizations and rights.

use aca_model::{Profile, ProfileUpdate, UserRights};

use super::RpcResult;
use crate::call::Ticket;
use crate::error::CoreError;
use crate::screen::{AppContext, Screen};
use crate::status::{Operation, StatusMessage};
use crate::task::{Task, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileCall {
    Login,
    Load,
    Save,
}

#[derive(Debug, Clone)]
pub enum ProfileMessage {
    Init,
    LoginFinished(Ticket<ProfileCall>, RpcResult<()>),
    Loaded(Ticket<ProfileCall>, RpcResult<Profile>),
    SetDisplayName(String),
    SetMainEmail(String),
    SetOrganizations(Vec<String>),
    SetUserRights(UserRights),
    Save,
    Saved(Ticket<ProfileCall>, ProfileUpdate, RpcResult<Profile>),
    Close,
}

#[derive(Debug)]
pub struct ProfileViewModel {
    ctx: AppContext,
    screen: Screen<ProfileCall>,
    profile: Option<Profile>,
    /// Editable fields as last loaded or saved.
    initial: ProfileUpdate,
    form: ProfileUpdate,
}

impl ProfileViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            screen: Screen::default(),
            profile: None,
            initial: ProfileUpdate::default(),
            form: ProfileUpdate::default(),
        }
    }

    /// Loads the profile, prompting for sign-in first when needed.
    pub fn init(&mut self) -> Task<ProfileMessage> {
        if !self.ctx.signed_in() {
            let ticket = self.screen.begin(ProfileCall::Login);
            let auth = self.ctx.auth.clone();
            return Task::perform(
                async move { auth.show_login_modal().await },
                move |result| ProfileMessage::LoginFinished(ticket, result),
            );
        }
        self.load()
    }

    /// Sends the edited fields. Nothing is sent when nothing changed.
    pub fn save(&mut self) -> Task<ProfileMessage> {
        if !self.is_dirty() {
            tracing::debug!("Profile unchanged, skipping save");
            return Task::none();
        }
        let update = self.form.clone();
        let ticket = self.screen.begin(ProfileCall::Save);
        let gateway = self.ctx.gateway.clone();
        let sent = update.clone();
        Task::perform(
            async move { gateway.update_my_profile(&sent).await },
            move |result| ProfileMessage::Saved(ticket, update, result),
        )
    }

    /// Whether the form differs from the profile as last loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.profile.is_some() && self.form != self.initial
    }

    pub fn form(&self) -> &ProfileUpdate {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProfileUpdate {
        &mut self.form
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Rights levels offered by the rights selector, with their labels.
    pub fn rights_options() -> impl Iterator<Item = (UserRights, &'static str)> {
        UserRights::ALL.into_iter().map(|rights| (rights, rights.label()))
    }

    pub fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.screen.status()
    }

    pub fn login_requested(&self) -> bool {
        self.screen.login_requested()
    }

    pub fn close(&mut self) {
        self.screen.close();
    }

    fn load(&mut self) -> Task<ProfileMessage> {
        let ticket = self.screen.begin(ProfileCall::Load);
        let gateway = self.ctx.gateway.clone();
        Task::perform(
            async move { gateway.get_my_profile().await },
            move |result| ProfileMessage::Loaded(ticket, result),
        )
    }
}

impl ViewModel for ProfileViewModel {
    type Message = ProfileMessage;

    fn update(&mut self, message: ProfileMessage) -> Task<ProfileMessage> {
        match message {
            ProfileMessage::Init => self.init(),

            ProfileMessage::LoginFinished(ticket, result) => {
                if !self.screen.settle_quietly(&ticket, &result) {
                    return Task::none();
                }
                match result {
                    Ok(()) => self.load(),
                    Err(err) => {
                        self.screen.report(&CoreError::Rpc(err));
                        Task::none()
                    }
                }
            }

            ProfileMessage::Loaded(ticket, result) => {
                if self
                    .screen
                    .settle_reporting_errors(&ticket, Operation::LoadProfile, &result)
                    && let Ok(profile) = result
                {
                    self.initial = profile.editable();
                    self.form = self.initial.clone();
                    self.profile = Some(profile);
                }
                Task::none()
            }

            ProfileMessage::SetDisplayName(name) => {
                self.form.display_name = Some(name);
                Task::none()
            }

            ProfileMessage::SetMainEmail(email) => {
                self.form.main_email = Some(email);
                Task::none()
            }

            ProfileMessage::SetOrganizations(organizations) => {
                self.form.organizations = organizations;
                Task::none()
            }

            ProfileMessage::SetUserRights(rights) => {
                self.form.user_rights = rights;
                Task::none()
            }

            ProfileMessage::Save => self.save(),

            ProfileMessage::Saved(ticket, update, result) => {
                if self
                    .screen
                    .settle(&ticket, Operation::UpdateProfile, &result)
                    && let Ok(saved) = result
                {
                    tracing::info!("Profile updated");
                    let mut profile = saved;
                    // The server echoes the stored record; keep what was sent if it omits fields.
                    if profile.display_name.is_none() {
                        profile.apply(&update);
                    }
                    self.initial = profile.editable();
                    self.form = self.initial.clone();
                    self.profile = Some(profile);
                }
                Task::none()
            }

            ProfileMessage::Close => {
                self.close();
                Task::none()
            }
        }
    }
}
