//! Create-article screen.

use aca_model::{ArticleDraft, ArticleSummary, DEFAULT_TAGS};

use super::RpcResult;
use crate::call::Ticket;
use crate::error::{Result, ValidationError};
use crate::screen::{AppContext, Screen};
use crate::status::{Operation, StatusMessage};
use crate::task::{Task, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CreateArticleCall {
    Create,
}

#[derive(Debug, Clone)]
pub enum CreateArticleMessage {
    SetTitle(String),
    SetEmbed(String),
    SetDescription(String),
    ToggleTag(String),
    Submit,
    Created(Ticket<CreateArticleCall>, RpcResult<ArticleSummary>),
    Close,
}

#[derive(Debug)]
pub struct CreateArticleViewModel {
    ctx: AppContext,
    screen: Screen<CreateArticleCall>,
    form: ArticleDraft,
    tag_options: Vec<String>,
    validation_error: Option<ValidationError>,
    created: Option<ArticleSummary>,
}

impl CreateArticleViewModel {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            screen: Screen::default(),
            form: ArticleDraft::default(),
            tag_options: DEFAULT_TAGS.iter().map(ToString::to_string).collect(),
            validation_error: None,
            created: None,
        }
    }

    /// Checks the form. Only the title is required.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.form.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Submits the form. An invalid form is rejected without a call.
    pub fn submit(&mut self) -> Result<Task<CreateArticleMessage>> {
        if let Err(err) = self.validate() {
            self.validation_error = Some(err.clone());
            return Err(err.into());
        }
        self.validation_error = None;
        let draft = self.form.clone();
        tracing::debug!(title = %draft.title, "Creating article");
        let ticket = self.screen.begin(CreateArticleCall::Create);
        let gateway = self.ctx.gateway.clone();
        Ok(Task::perform(
            async move { gateway.create_article(&draft).await },
            move |result| CreateArticleMessage::Created(ticket, result),
        ))
    }

    pub fn form(&self) -> &ArticleDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ArticleDraft {
        &mut self.form
    }

    pub fn tag_options(&self) -> &[String] {
        &self.tag_options
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    /// The article created by the last successful submit.
    pub fn created(&self) -> Option<&ArticleSummary> {
        self.created.as_ref()
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

    fn toggle_tag(&mut self, tag: String) {
        if let Some(position) = self.form.tags.iter().position(|t| *t == tag) {
            self.form.tags.remove(position);
        } else {
            if !self.tag_options.contains(&tag) {
                self.tag_options.push(tag.clone());
            }
            self.form.tags.push(tag);
        }
    }
}

impl ViewModel for CreateArticleViewModel {
    type Message = CreateArticleMessage;

    fn update(&mut self, message: CreateArticleMessage) -> Task<CreateArticleMessage> {
        match message {
            CreateArticleMessage::SetTitle(title) => {
                self.form.title = title;
                Task::none()
            }

            CreateArticleMessage::SetEmbed(embed) => {
                self.form.embed = embed;
                Task::none()
            }

            CreateArticleMessage::SetDescription(description) => {
                self.form.description = description;
                Task::none()
            }

            CreateArticleMessage::ToggleTag(tag) => {
                self.toggle_tag(tag);
                Task::none()
            }

            CreateArticleMessage::Submit => self.submit().unwrap_or_else(|err| {
                self.screen.report(&err);
                Task::none()
            }),

            CreateArticleMessage::Created(ticket, result) => {
                let title = match &result {
                    Ok(article) => article.title_or_default().to_string(),
                    Err(_) => self.form.title.clone(),
                };
                if self
                    .screen
                    .settle(&ticket, Operation::CreateArticle { title: &title }, &result)
                    && let Ok(article) = result
                {
                    tracing::info!(title = %title, "Article created");
                    // The form stays filled after a failure so the user can retry.
                    self.form = ArticleDraft::default();
                    self.created = Some(article);
                }
                Task::none()
            }

            CreateArticleMessage::Close => {
                self.close();
                Task::none()
            }
        }
    }
}
