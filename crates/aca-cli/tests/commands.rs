//! Command handlers driven against a scripted transport.

use std::num::NonZeroUsize;
use std::sync::Arc;

use aca_cli::cli::{
    ArticleArgs, ArticlesArgs, Command, CreateArgs, FeatureArgs, MembershipArgs, PageArgs,
    ProfileCommand, ProfileSaveArgs, QueryArgs, TabArg, parse_filter_row,
};
use aca_cli::commands::{ReportBody, run_command};
use aca_cli::config::CliConfig;
use aca_client::{
    ApiDescriptor, Endpoint, Gateway, RpcError, ScriptedTransport, StaticAuthenticator,
};
use aca_core::{AppContext, Severity};
use serde_json::{Value, json};

fn context(transport: &Arc<ScriptedTransport>, signed_in: bool) -> AppContext {
    let gateway = Arc::new(Gateway::new(transport.clone(), ApiDescriptor::default()));
    let auth = if signed_in {
        StaticAuthenticator::new(Some("token".to_string()), Some("ana@example.org".to_string()))
    } else {
        StaticAuthenticator::new(None, None)
    };
    AppContext::new(gateway, Arc::new(auth))
}

fn listing(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "websafeArticleKey": format!("k{i}"),
                "title": format!("Article {i}"),
                "authorName": "Ana",
            })
        })
        .collect();
    json!({ "items": items })
}

fn profile(favorites: &[&str]) -> Value {
    json!({
        "displayName": "Ana",
        "mainEmail": "ana@example.org",
        "favoriteArticles": favorites,
        "userRights": "ADMINISTRATOR",
    })
}

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn page(page: usize) -> PageArgs {
    PageArgs { page }
}

#[tokio::test]
async fn featured_shows_the_requested_page() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetMyProfile, profile(&["k3"]))
        .reply(Endpoint::GetFeaturedArticles, listing(5));
    let ctx = context(&transport, true);

    let report = run_command(&ctx, size(2), &Command::Featured(page(2))).await.unwrap();

    let ReportBody::Articles(listing) = &report.body else {
        panic!("expected a listing");
    };
    assert_eq!(listing.page, 1);
    assert_eq!(listing.page_count, 3);
    assert_eq!(listing.total, 5);
    let indices: Vec<usize> = listing.rows.iter().map(|row| row.index).collect();
    assert_eq!(indices, vec![2, 3]);
    assert!(listing.rows[1].favorite);
    assert!(listing.rows.iter().all(|row| row.featured));
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn failed_listing_exits_with_a_warning() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail(
        Endpoint::GetFeaturedArticles,
        RpcError::Server {
            code: 503,
            message: "backend unavailable".to_string(),
        },
    );
    let ctx = context(&transport, false);

    let report = run_command(&ctx, size(20), &Command::Featured(page(1))).await.unwrap();

    let status = report.status.as_ref().unwrap();
    assert_eq!(status.severity, Severity::Warning);
    assert_eq!(status.text, "Failed to get articles : backend unavailable");
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn query_sends_only_complete_rows() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetFeaturedArticleKeys, json!({"items": []}))
        .reply(Endpoint::GetAllArticles, listing(3))
        .reply(Endpoint::QueryArticles, listing(1));
    let ctx = context(&transport, false);
    let args = QueryArgs {
        filters: vec![
            parse_filter_row("CITY:EQ:Berlin").unwrap(),
            parse_filter_row("TOPIC::murals").unwrap(),
            parse_filter_row("MONTH:GT:").unwrap(),
        ],
        page: page(1),
    };

    let report = run_command(&ctx, size(20), &Command::Query(args)).await.unwrap();

    let query = transport
        .calls()
        .into_iter()
        .find(|call| call.endpoint == Endpoint::QueryArticles)
        .unwrap();
    assert_eq!(
        query.args,
        Some(json!({"filters": [{"field": "CITY", "operator": "EQ", "value": "Berlin"}]}))
    );
    let ReportBody::Articles(listing) = &report.body else {
        panic!("expected a listing");
    };
    assert_eq!(listing.total, 1);
    assert_eq!(listing.heading, "Query results");
    assert_eq!(
        report.status.as_ref().unwrap().text,
        "Query succeeded : [CITY EQ Berlin]"
    );
}

#[tokio::test]
async fn favorite_toggles_the_indexed_article() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetMyProfile, profile(&[]))
        .reply(Endpoint::GetFeaturedArticleKeys, json!({"items": []}))
        .reply(Endpoint::GetAllArticles, listing(4))
        .reply(Endpoint::AddArticleToFavorites, json!({"data": true}));
    let ctx = context(&transport, true);
    let args = MembershipArgs {
        index: 3,
        tab: TabArg::All,
    };

    let report = run_command(&ctx, size(2), &Command::Favorite(args)).await.unwrap();

    let add = transport
        .calls()
        .into_iter()
        .find(|call| call.endpoint == Endpoint::AddArticleToFavorites)
        .unwrap();
    assert_eq!(add.args, Some(json!({"websafeArticleKey": "k3"})));
    assert_eq!(report.status.as_ref().unwrap().text, "Added article to favorites");
    let ReportBody::Articles(listing) = &report.body else {
        panic!("expected a listing");
    };
    assert_eq!(listing.page, 1);
    assert!(listing.rows.iter().any(|row| row.index == 3 && row.favorite));
}

#[tokio::test]
async fn favorite_out_of_range_makes_no_call() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetMyProfile, profile(&[]))
        .reply(Endpoint::GetFeaturedArticleKeys, json!({"items": []}))
        .reply(Endpoint::GetFeaturedArticles, listing(1));
    let ctx = context(&transport, true);
    let args = MembershipArgs {
        index: 9,
        tab: TabArg::Featured,
    };

    let report = run_command(&ctx, size(20), &Command::Favorite(args)).await.unwrap();

    assert!(!transport.endpoints().contains(&Endpoint::AddArticleToFavorites));
    assert!(report.status.as_ref().unwrap().is_warning());
}

#[tokio::test]
async fn feature_remove_drops_the_row_from_the_featured_tab() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetMyProfile, profile(&[]))
        .reply(Endpoint::GetFeaturedArticleKeys, json!({"items": [{"websafeKey": "k0"}]}))
        .reply(Endpoint::GetFeaturedArticles, listing(2))
        .reply(Endpoint::RemoveFeaturedArticle, json!({"data": true}));
    let ctx = context(&transport, true);
    let args = FeatureArgs {
        target: MembershipArgs {
            index: 0,
            tab: TabArg::Featured,
        },
        remove: true,
    };

    let report = run_command(&ctx, size(20), &Command::Feature(args)).await.unwrap();

    let ReportBody::Articles(listing) = &report.body else {
        panic!("expected a listing");
    };
    assert_eq!(listing.total, 1);
    assert_eq!(listing.rows[0].title, "Article 1");
}

#[tokio::test]
async fn my_articles_without_a_token_asks_for_sign_in() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.reply(Endpoint::GetFeaturedArticleKeys, json!({"items": []}));
    let ctx = context(&transport, false);
    let args = ArticlesArgs {
        tab: TabArg::Mine,
        page: page(1),
    };

    let report = run_command(&ctx, size(20), &Command::Articles(args)).await.unwrap();

    assert!(!transport.endpoints().contains(&Endpoint::GetMyArticles));
    assert!(report.status.as_ref().unwrap().is_warning());
    assert_ne!(report.exit_code(), 0);
}

#[tokio::test]
async fn create_reports_the_new_title() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.reply(
        Endpoint::CreateArticle,
        json!({"websafeArticleKey": "n1", "title": "Night mural"}),
    );
    let ctx = context(&transport, true);
    let args = CreateArgs {
        title: "Night mural".to_string(),
        embed: String::new(),
        description: "Painted over in a week".to_string(),
        tags: vec!["Graffiti".to_string()],
    };

    let report = run_command(&ctx, size(20), &Command::Create(args)).await.unwrap();

    let sent = transport.calls()[0].args.clone().unwrap();
    assert_eq!(sent["title"], "Night mural");
    assert_eq!(sent["tags"], json!(["Graffiti"]));
    assert_eq!(
        report.status.as_ref().unwrap().text,
        "The article has been created : Night mural"
    );
    assert!(matches!(report.body, ReportBody::Article { .. }));
}

#[tokio::test]
async fn create_with_blank_title_makes_no_call() {
    let transport = Arc::new(ScriptedTransport::new());
    let ctx = context(&transport, true);
    let args = CreateArgs {
        title: "   ".to_string(),
        embed: String::new(),
        description: String::new(),
        tags: Vec::new(),
    };

    let report = run_command(&ctx, size(20), &Command::Create(args)).await.unwrap();

    assert!(transport.calls().is_empty());
    assert_eq!(report.body, ReportBody::Nothing);
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn profile_save_sends_the_edited_form() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetMyProfile, profile(&[]))
        .reply(
            Endpoint::UpdateMyProfile,
            json!({"displayName": "Ana B", "mainEmail": "ana@example.org"}),
        );
    let ctx = context(&transport, true);
    let args = ProfileSaveArgs {
        display_name: Some("Ana B".to_string()),
        ..Default::default()
    };

    let report = run_command(&ctx, size(20), &Command::Profile(ProfileCommand::Save(args)))
        .await
        .unwrap();

    let update = transport
        .calls()
        .into_iter()
        .find(|call| call.endpoint == Endpoint::UpdateMyProfile)
        .unwrap();
    assert_eq!(update.args.unwrap()["displayName"], "Ana B");
    assert_eq!(report.status.as_ref().unwrap().text, "The profile has been updated");
    let ReportBody::Profile(saved) = &report.body else {
        panic!("expected a profile");
    };
    assert_eq!(saved.display_name.as_deref(), Some("Ana B"));
}

#[tokio::test]
async fn article_favorite_flag_adds_it() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::GetMyProfile, profile(&[]))
        .reply(
            Endpoint::GetArticle,
            json!({"websafeArticleKey": "a1", "title": "The Scream"}),
        )
        .reply(Endpoint::AddArticleToFavorites, json!(true));
    let ctx = context(&transport, true);
    let args = ArticleArgs {
        author_id: "author-7".to_string(),
        article_id: "42".to_string(),
        favorite: true,
        unfavorite: false,
    };

    let report = run_command(&ctx, size(20), &Command::Article(args)).await.unwrap();

    let get = transport
        .calls()
        .into_iter()
        .find(|call| call.endpoint == Endpoint::GetArticle)
        .unwrap();
    assert_eq!(get.args, Some(json!({"authorID": "author-7", "articleID": "42"})));
    let ReportBody::Article { article, favorite } = &report.body else {
        panic!("expected an article");
    };
    assert_eq!(article.title_or_default(), "The Scream");
    assert!(*favorite);
}

#[tokio::test]
async fn config_commands_stay_local() {
    let transport = Arc::new(ScriptedTransport::new());
    let ctx = context(&transport, false);
    let result = run_command(
        &ctx,
        CliConfig::default().page_size(),
        &Command::Config(aca_cli::cli::ConfigCommand::Show),
    )
    .await;
    assert!(result.is_err());
    assert!(transport.calls().is_empty());
}
