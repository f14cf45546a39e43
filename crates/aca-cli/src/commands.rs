//! Command handlers. Each one drives a screen's view model to idle and
//! collects what the screen would show.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::{Instrument, info_span};

use aca_client::{ClientSettings, Gateway, HttpTransport, StaticAuthenticator};
use aca_core::{
    AppContext, ArticleDetailMessage, ArticleDetailViewModel, CreateArticleMessage,
    CreateArticleViewModel, FindArticlesMessage, FindArticlesViewModel, HomeMessage,
    HomeViewModel, ProfileMessage, ProfileViewModel, StatusMessage, Tab, dispatch,
};
use aca_model::{ArticleRef, ArticleSummary, Profile};

use crate::cli::{
    ArticleArgs, ArticlesArgs, Command, ConfigCommand, CreateArgs, FeatureArgs, MembershipArgs,
    PageArgs, ProfileCommand, ProfileSaveArgs, QueryArgs,
};
use crate::config::{CliConfig, default_config_path};

/// One line of an article listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRow {
    /// Position in the whole listing; the handle `favorite` and `feature` take.
    pub index: usize,
    pub title: String,
    pub author: String,
    pub created: String,
    pub favorite: bool,
    pub featured: bool,
}

/// The visible page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    pub heading: String,
    pub rows: Vec<ArticleRow>,
    /// Zero-based.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    Nothing,
    Articles(ArticlePage),
    Article { article: ArticleSummary, favorite: bool },
    Profile(Profile),
    Config(String),
}

/// What a command leaves on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReport {
    pub body: ReportBody,
    pub status: Option<StatusMessage>,
    pub login_requested: bool,
}

impl CommandReport {
    fn new(body: ReportBody, status: Option<&StatusMessage>, login_requested: bool) -> Self {
        Self {
            body,
            status: status.cloned(),
            login_requested,
        }
    }

    /// 0 on success, 1 when the status line carries a warning, 2 when the
    /// server asked for a sign-in.
    pub fn exit_code(&self) -> i32 {
        if self.login_requested {
            2
        } else if self.status.as_ref().is_some_and(StatusMessage::is_warning) {
            1
        } else {
            0
        }
    }
}

/// Wires the HTTP transport, gateway and authenticator for `settings`.
pub fn build_context(settings: &ClientSettings) -> Result<AppContext> {
    let transport = HttpTransport::new(settings).context("create HTTP transport")?;
    let gateway = Gateway::new(Arc::new(transport), settings.api.clone());
    let auth = StaticAuthenticator::from_settings(settings);
    Ok(AppContext::new(Arc::new(gateway), Arc::new(auth)))
}

/// Runs `command` against the archive described by `config`.
pub async fn execute(
    command: &Command,
    config: &CliConfig,
    config_path: Option<&Path>,
) -> Result<CommandReport> {
    if let Command::Config(action) = command {
        return run_config(action, config, config_path);
    }
    let ctx = build_context(&config.client)?;
    let page_size = config.page_size();
    run_command(&ctx, page_size, command)
        .instrument(info_span!("command", base_url = %config.client.base_url))
        .await
}

/// Runs a remote command with an already wired context.
pub async fn run_command(
    ctx: &AppContext,
    page_size: NonZeroUsize,
    command: &Command,
) -> Result<CommandReport> {
    match command {
        Command::Featured(args) => Ok(run_featured(ctx, page_size, args).await),
        Command::Articles(args) => Ok(run_articles(ctx, page_size, args).await),
        Command::Query(args) => Ok(run_query(ctx, page_size, args).await),
        Command::Favorite(args) => Ok(run_favorite(ctx, page_size, args).await),
        Command::Feature(args) => Ok(run_feature(ctx, page_size, args).await),
        Command::Create(args) => Ok(run_create(ctx, args).await),
        Command::Profile(ProfileCommand::Show) => Ok(run_profile_show(ctx).await),
        Command::Profile(ProfileCommand::Save(args)) => Ok(run_profile_save(ctx, args).await),
        Command::Article(args) => Ok(run_article(ctx, args).await),
        Command::Config(_) => Err(anyhow!("config commands do not contact the archive")),
    }
}

pub async fn run_featured(
    ctx: &AppContext,
    page_size: NonZeroUsize,
    args: &PageArgs,
) -> CommandReport {
    let mut home = HomeViewModel::with_page_size(ctx.clone(), page_size);
    dispatch(&mut home, HomeMessage::Load).await;
    dispatch(&mut home, HomeMessage::SelectPage(args.index())).await;

    let list = home.articles();
    let rows = list
        .page_items()
        .map(|(index, article)| article_row(index, article, home.is_favorite(article), true))
        .collect();
    let page = ArticlePage {
        heading: "Featured articles".to_string(),
        rows,
        page: list.current_page(),
        page_count: list.page_count(),
        total: list.len(),
    };
    CommandReport::new(
        ReportBody::Articles(page),
        home.status(),
        home.login_requested(),
    )
}

pub async fn run_articles(
    ctx: &AppContext,
    page_size: NonZeroUsize,
    args: &ArticlesArgs,
) -> CommandReport {
    let mut find = open_find_articles(ctx, page_size, args.tab.into()).await;
    dispatch(&mut find, FindArticlesMessage::SelectPage(args.page.index())).await;
    listing_report(&find, None)
}

pub async fn run_query(ctx: &AppContext, page_size: NonZeroUsize, args: &QueryArgs) -> CommandReport {
    let mut find = open_find_articles(ctx, page_size, Tab::All).await;
    for draft in &args.filters {
        find.filters_mut().push(draft.clone());
    }
    let skipped = args.filters.iter().filter(|draft| !draft.is_complete()).count();
    if skipped > 0 {
        tracing::warn!(skipped, "Incomplete filter rows left out of the query");
    }
    dispatch(&mut find, FindArticlesMessage::QueryWithFilters).await;
    dispatch(&mut find, FindArticlesMessage::SelectPage(args.page.index())).await;
    listing_report(&find, Some("Query results"))
}

pub async fn run_favorite(
    ctx: &AppContext,
    page_size: NonZeroUsize,
    args: &MembershipArgs,
) -> CommandReport {
    let mut find = open_find_articles(ctx, page_size, args.tab.into()).await;
    dispatch(&mut find, FindArticlesMessage::ToggleFavorite(args.index)).await;
    page_of(&mut find, args.index).await;
    listing_report(&find, None)
}

pub async fn run_feature(
    ctx: &AppContext,
    page_size: NonZeroUsize,
    args: &FeatureArgs,
) -> CommandReport {
    let target = &args.target;
    let mut find = open_find_articles(ctx, page_size, target.tab.into()).await;
    let message = if args.remove {
        FindArticlesMessage::RemoveFeatured(target.index)
    } else {
        FindArticlesMessage::ToggleFeatured(target.index)
    };
    dispatch(&mut find, message).await;
    page_of(&mut find, target.index).await;
    listing_report(&find, None)
}

pub async fn run_create(ctx: &AppContext, args: &CreateArgs) -> CommandReport {
    let mut create = CreateArticleViewModel::new(ctx.clone());
    dispatch(&mut create, CreateArticleMessage::SetTitle(args.title.clone())).await;
    dispatch(&mut create, CreateArticleMessage::SetEmbed(args.embed.clone())).await;
    dispatch(
        &mut create,
        CreateArticleMessage::SetDescription(args.description.clone()),
    )
    .await;
    for tag in &args.tags {
        dispatch(&mut create, CreateArticleMessage::ToggleTag(tag.clone())).await;
    }
    dispatch(&mut create, CreateArticleMessage::Submit).await;

    let body = match create.created() {
        Some(article) => ReportBody::Article {
            article: article.clone(),
            favorite: false,
        },
        None => ReportBody::Nothing,
    };
    CommandReport::new(body, create.status(), create.login_requested())
}

pub async fn run_profile_show(ctx: &AppContext) -> CommandReport {
    let mut profile = ProfileViewModel::new(ctx.clone());
    dispatch(&mut profile, ProfileMessage::Init).await;
    profile_report(&profile)
}

pub async fn run_profile_save(ctx: &AppContext, args: &ProfileSaveArgs) -> CommandReport {
    let mut profile = ProfileViewModel::new(ctx.clone());
    dispatch(&mut profile, ProfileMessage::Init).await;
    if profile.profile().is_none() {
        return profile_report(&profile);
    }

    let mut edits = Vec::new();
    if let Some(name) = &args.display_name {
        edits.push(ProfileMessage::SetDisplayName(name.clone()));
    }
    if let Some(email) = &args.main_email {
        edits.push(ProfileMessage::SetMainEmail(email.clone()));
    }
    if !args.organizations.is_empty() {
        edits.push(ProfileMessage::SetOrganizations(args.organizations.clone()));
    }
    if let Some(rights) = args.rights {
        edits.push(ProfileMessage::SetUserRights(rights));
    }
    for edit in edits {
        dispatch(&mut profile, edit).await;
    }
    if !profile.is_dirty() {
        tracing::info!("No profile changes to save");
    }
    dispatch(&mut profile, ProfileMessage::Save).await;
    profile_report(&profile)
}

pub async fn run_article(ctx: &AppContext, args: &ArticleArgs) -> CommandReport {
    let route = ArticleRef::new(args.author_id.clone(), args.article_id.clone());
    let mut detail = ArticleDetailViewModel::new(ctx.clone(), route);
    dispatch(&mut detail, ArticleDetailMessage::Load).await;
    if args.favorite {
        dispatch(&mut detail, ArticleDetailMessage::AddToFavorites).await;
    } else if args.unfavorite {
        dispatch(&mut detail, ArticleDetailMessage::RemoveFromFavorites).await;
    }

    let body = match detail.article() {
        Some(article) => ReportBody::Article {
            article: article.clone(),
            favorite: detail.is_favorite(),
        },
        None => ReportBody::Nothing,
    };
    CommandReport::new(body, detail.status(), detail.login_requested())
}

fn run_config(
    action: &ConfigCommand,
    config: &CliConfig,
    config_path: Option<&Path>,
) -> Result<CommandReport> {
    match action {
        ConfigCommand::Show => Ok(CommandReport::new(
            ReportBody::Config(config.to_display_string()?),
            None,
            false,
        )),
        ConfigCommand::Save => {
            let path: PathBuf = config_path
                .map(Path::to_path_buf)
                .or_else(default_config_path)
                .context("no configuration directory on this platform; pass --config")?;
            config.save(&path)?;
            let status = StatusMessage::success(format!("Saved configuration to {}", path.display()));
            Ok(CommandReport::new(ReportBody::Nothing, Some(&status), false))
        }
    }
}

async fn open_find_articles(
    ctx: &AppContext,
    page_size: NonZeroUsize,
    tab: Tab,
) -> FindArticlesViewModel {
    let mut find = FindArticlesViewModel::with_page_size(ctx.clone(), page_size).with_tab(tab);
    dispatch(&mut find, FindArticlesMessage::Init).await;
    find
}

/// Shows the page that held `index` before the command ran.
async fn page_of(find: &mut FindArticlesViewModel, index: usize) {
    let page = index / find.articles().page_size().get();
    dispatch(find, FindArticlesMessage::SelectPage(page)).await;
}

fn listing_report(find: &FindArticlesViewModel, heading: Option<&str>) -> CommandReport {
    let list = find.articles();
    let rows = list
        .page_items()
        .map(|(index, article)| {
            article_row(
                index,
                article,
                find.is_favorite(article),
                find.is_featured(article),
            )
        })
        .collect();
    let page = ArticlePage {
        heading: heading.unwrap_or(find.selected_tab().label()).to_string(),
        rows,
        page: list.current_page(),
        page_count: list.page_count(),
        total: list.len(),
    };
    CommandReport::new(
        ReportBody::Articles(page),
        find.status(),
        find.login_requested(),
    )
}

fn profile_report(profile: &ProfileViewModel) -> CommandReport {
    let body = match profile.profile() {
        Some(profile) => ReportBody::Profile(profile.clone()),
        None => ReportBody::Nothing,
    };
    CommandReport::new(body, profile.status(), profile.login_requested())
}

fn article_row(index: usize, article: &ArticleSummary, favorite: bool, featured: bool) -> ArticleRow {
    ArticleRow {
        index,
        title: article.title_or_default().to_string(),
        author: article.author_name.clone().unwrap_or_default(),
        created: article
            .created_on()
            .map(|date| date.to_string())
            .unwrap_or_default(),
        favorite,
        featured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aca_core::Severity;

    fn report(status: Option<StatusMessage>, login_requested: bool) -> CommandReport {
        CommandReport {
            body: ReportBody::Nothing,
            status,
            login_requested,
        }
    }

    #[test]
    fn exit_codes() {
        assert_eq!(report(None, false).exit_code(), 0);
        assert_eq!(report(Some(StatusMessage::success("Success")), false).exit_code(), 0);
        let failed = StatusMessage::new(Severity::Warning, "Failed to get articles");
        assert_eq!(report(Some(failed.clone()), false).exit_code(), 1);
        assert_eq!(report(Some(failed), true).exit_code(), 2);
    }

    #[test]
    fn rows_fall_back_to_placeholders() {
        let row = article_row(3, &ArticleSummary::default(), true, false);
        assert_eq!(row.index, 3);
        assert!(row.author.is_empty());
        assert!(row.created.is_empty());
        assert_eq!(row.title, ArticleSummary::default().title_or_default());
    }
}
