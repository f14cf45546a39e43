//! CLI argument definitions for the `aca` client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use aca_core::{FilterDraft, Tab};
use aca_model::{FilterField, FilterOperator, UserRights};

#[derive(Parser)]
#[command(
    name = "aca",
    version,
    about = "Art Crime Archive - browse, curate and publish street art articles",
    long_about = "Browse, curate and publish articles in the Art Crime Archive.\n\n\
                  Listings, favorites, featured articles and profiles are served\n\
                  by the archive's RPC API. Commands that change data need an\n\
                  access token (--token or ACA_TOKEN)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Connection settings that override the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Scheme and host of the archive.
    #[arg(long = "base-url", env = "ACA_BASE_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// OAuth2 access token of the signed-in account.
    #[arg(
        long = "token",
        env = "ACA_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Email of the account the token belongs to.
    #[arg(long = "email", env = "ACA_EMAIL", value_name = "EMAIL", global = true)]
    pub email: Option<String>,

    /// Articles per page.
    #[arg(long = "page-size", value_name = "N", global = true)]
    pub page_size: Option<usize>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the featured articles (the home page).
    Featured(PageArgs),

    /// List the articles of one tab.
    Articles(ArticlesArgs),

    /// Query all articles with filters.
    Query(QueryArgs),

    /// Add or remove an article from your favorites.
    Favorite(MembershipArgs),

    /// Add or remove an article from the featured set.
    Feature(FeatureArgs),

    /// Create an article.
    Create(CreateArgs),

    /// Show or edit your profile.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Show one article.
    Article(ArticleArgs),

    /// Inspect or write the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone)]
pub struct PageArgs {
    /// Page to show, starting at 1.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,
}

impl PageArgs {
    /// Zero-based page index.
    pub fn index(&self) -> usize {
        self.page.saturating_sub(1)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ArticlesArgs {
    /// Which listing to show.
    #[arg(long = "tab", value_enum, default_value = "featured")]
    pub tab: TabArg,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Filter row as FIELD:OP:VALUE, e.g. CITY:EQ:Berlin. Repeatable.
    ///
    /// Rows with an empty part are kept as drafts and left out of the query.
    #[arg(long = "filter", value_name = "FIELD:OP:VALUE", value_parser = parse_filter_row)]
    pub filters: Vec<FilterDraft>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug, Clone)]
pub struct MembershipArgs {
    /// Position of the article in the listing, as printed in the `#` column.
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// Listing the index refers to.
    #[arg(long = "tab", value_enum, default_value = "featured")]
    pub tab: TabArg,
}

#[derive(Args, Debug, Clone)]
pub struct FeatureArgs {
    #[command(flatten)]
    pub target: MembershipArgs,

    /// Withdraw the article from the featured set instead of toggling.
    #[arg(long = "remove")]
    pub remove: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    #[arg(long = "title")]
    pub title: String,

    /// Video embed code or URL.
    #[arg(long = "embed", default_value = "")]
    pub embed: String,

    #[arg(long = "description", default_value = "")]
    pub description: String,

    /// Tag to attach. Repeatable.
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show your profile.
    Show,

    /// Change profile fields and save.
    Save(ProfileSaveArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileSaveArgs {
    #[arg(long = "display-name")]
    pub display_name: Option<String>,

    #[arg(long = "main-email")]
    pub main_email: Option<String>,

    /// Organization to list. Repeatable; replaces the current list.
    #[arg(long = "organization", value_name = "NAME")]
    pub organizations: Vec<String>,

    #[arg(long = "rights", value_parser = parse_rights)]
    pub rights: Option<UserRights>,
}

#[derive(Args, Debug, Clone)]
pub struct ArticleArgs {
    #[arg(value_name = "AUTHOR_ID")]
    pub author_id: String,

    #[arg(value_name = "ARTICLE_ID")]
    pub article_id: String,

    /// Add the article to your favorites.
    #[arg(long = "favorite", conflicts_with = "unfavorite")]
    pub favorite: bool,

    /// Remove the article from your favorites.
    #[arg(long = "unfavorite")]
    pub unfavorite: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,

    /// Write the effective configuration to the configuration file.
    Save,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TabArg {
    All,
    Featured,
    Mine,
    Favorites,
}

impl From<TabArg> for Tab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::All => Tab::All,
            TabArg::Featured => Tab::Featured,
            TabArg::Mine => Tab::MyArticles,
            TabArg::Favorites => Tab::MyFavorites,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Parses `FIELD:OP:VALUE` into a filter row. Empty parts stay unset.
pub fn parse_filter_row(input: &str) -> Result<FilterDraft, String> {
    let mut parts = input.splitn(3, ':');
    let field = parts.next().unwrap_or_default().trim();
    let operator = parts.next().unwrap_or_default().trim();
    let value = parts.next().unwrap_or_default();

    let field = if field.is_empty() {
        None
    } else {
        Some(field.parse::<FilterField>().map_err(|err| err.to_string())?)
    };
    let operator = if operator.is_empty() {
        None
    } else {
        Some(operator.parse::<FilterOperator>().map_err(|err| err.to_string())?)
    };
    Ok(FilterDraft {
        field,
        operator,
        value: value.to_string(),
    })
}

fn parse_rights(input: &str) -> Result<UserRights, String> {
    input.parse().map_err(|err: aca_model::ModelError| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn complete_filter_row() {
        let row = parse_filter_row("city:eq:New York").unwrap();
        assert_eq!(row.field, Some(FilterField::City));
        assert_eq!(row.operator, Some(FilterOperator::Eq));
        assert_eq!(row.value, "New York");
        assert!(row.is_complete());
    }

    #[test]
    fn value_keeps_colons() {
        let row = parse_filter_row("TOPIC:NE:a:b").unwrap();
        assert_eq!(row.value, "a:b");
    }

    #[test]
    fn partial_rows_parse_as_incomplete() {
        let row = parse_filter_row("CITY::Berlin").unwrap();
        assert_eq!(row.operator, None);
        assert!(!row.is_complete());

        let row = parse_filter_row("MONTH:GT").unwrap();
        assert!(row.value.is_empty());
        assert!(!row.is_complete());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = parse_filter_row("COLOR:EQ:red").unwrap_err();
        assert!(err.contains("COLOR"));
    }

    #[test]
    fn parses_query_command() {
        let cli = Cli::try_parse_from([
            "aca",
            "query",
            "--filter",
            "CITY:EQ:Berlin",
            "--filter",
            "TOPIC:EQ:",
            "--page",
            "2",
        ])
        .unwrap();
        let Command::Query(args) = cli.command else {
            panic!("expected query");
        };
        assert_eq!(args.filters.len(), 2);
        assert_eq!(args.page.index(), 1);
    }

    #[test]
    fn tab_names_map_to_tabs() {
        assert_eq!(Tab::from(TabArg::Mine), Tab::MyArticles);
        assert_eq!(Tab::from(TabArg::Favorites), Tab::MyFavorites);
    }

    #[test]
    fn favorite_and_unfavorite_conflict() {
        let result = Cli::try_parse_from(["aca", "article", "a", "b", "--favorite", "--unfavorite"]);
        assert!(result.is_err());
    }
}
