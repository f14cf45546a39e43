//! Integration tests for the gateway's call contract.

use std::sync::Arc;

use aca_client::{ApiDescriptor, Endpoint, Gateway, RpcError, ScriptedTransport};
use aca_model::{ArticleKey, FilterField, FilterOperator, QueryFilter, QueryPayload};
use serde_json::json;

fn gateway_with(transport: &Arc<ScriptedTransport>) -> Gateway {
    Gateway::new(transport.clone(), ApiDescriptor::default())
}

#[tokio::test]
async fn initializes_once_across_calls() {
    let transport = Arc::new(ScriptedTransport::new());
    let gateway = gateway_with(&transport);
    assert!(!gateway.is_ready());

    gateway.get_all_articles().await.expect("first call");
    gateway.get_featured_articles().await.expect("second call");
    gateway.get_my_profile().await.expect("third call");

    assert!(gateway.is_ready());
    assert_eq!(transport.initializations(), 1);
    assert_eq!(
        transport.endpoints(),
        vec![
            Endpoint::GetAllArticles,
            Endpoint::GetFeaturedArticles,
            Endpoint::GetMyProfile
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_first_calls_share_initialization() {
    let transport = Arc::new(ScriptedTransport::new());
    let gateway = Arc::new(gateway_with(&transport));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let gateway = gateway.clone();
            tokio::spawn(async move { gateway.get_all_articles().await })
        })
        .collect();
    for handle in handles {
        handle.await.expect("join").expect("call");
    }

    assert_eq!(transport.initializations(), 1);
    assert_eq!(transport.calls().len(), 8);
}

#[tokio::test]
async fn failed_initialization_is_retried_by_next_call() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail_initialization(RpcError::Transport("connection refused".to_string()));
    let gateway = gateway_with(&transport);

    let err = gateway.get_all_articles().await.unwrap_err();
    assert_eq!(err, RpcError::Transport("connection refused".to_string()));
    assert!(transport.calls().is_empty());

    gateway.get_all_articles().await.expect("retry succeeds");
    assert_eq!(transport.initializations(), 2);
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn server_error_is_returned_verbatim() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.fail(
        Endpoint::CreateArticle,
        RpcError::Server {
            code: 409,
            message: "quota exceeded".to_string(),
        },
    );
    let gateway = gateway_with(&transport);

    let err = gateway
        .create_article(&Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.server_message(), Some("quota exceeded"));
}

#[tokio::test]
async fn typed_results_are_decoded() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(
            Endpoint::GetFeaturedArticleKeys,
            json!({"items": [{"websafeKey": "a1"}, {"websafeKey": "b2"}]}),
        )
        .reply(
            Endpoint::GetMyProfile,
            json!({"favoriteArticles": ["a1"], "userRights": "ADMINISTRATOR"}),
        );
    let gateway = gateway_with(&transport);

    let keys = gateway.get_featured_article_keys().await.expect("keys");
    assert_eq!(keys, vec![ArticleKey::from("a1"), ArticleKey::from("b2")]);

    let profile = gateway.get_my_profile().await.expect("profile");
    assert!(profile.is_favorite(&ArticleKey::from("a1")));
}

#[tokio::test]
async fn unexpected_shape_is_a_decode_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.reply(Endpoint::GetAllArticles, json!({"items": "nope"}));
    let gateway = gateway_with(&transport);

    let err = gateway.get_all_articles().await.unwrap_err();
    assert!(matches!(err, RpcError::Decode(message) if message.contains("getAllArticles")));
}

#[tokio::test]
async fn membership_calls_send_the_key_and_read_the_verdict() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .reply(Endpoint::AddArticleToFavorites, json!({"data": false}))
        .reply(Endpoint::RemoveFeaturedArticle, json!(null));
    let gateway = gateway_with(&transport);
    let key = ArticleKey::from("a1");

    assert!(!gateway.add_article_to_favorites(&key).await.expect("add"));
    assert!(gateway.remove_featured_article(&key).await.expect("remove"));

    let calls = transport.calls();
    assert_eq!(calls[0].args, Some(json!({"websafeArticleKey": "a1"})));
    assert_eq!(calls[1].endpoint, Endpoint::RemoveFeaturedArticle);
}

#[tokio::test]
async fn query_sends_filters_in_order() {
    let transport = Arc::new(ScriptedTransport::new());
    let gateway = gateway_with(&transport);
    let payload = QueryPayload {
        filters: vec![
            QueryFilter::new(FilterField::City, FilterOperator::Eq, "NYC"),
            QueryFilter::new(FilterField::Month, FilterOperator::Gt, "6"),
        ],
    };

    let articles = gateway.query_articles(&payload).await;
    // A null reply cannot be decoded into a collection.
    assert!(matches!(articles, Err(RpcError::Decode(_))));

    let sent = transport.calls()[0].args.clone().expect("args");
    assert_eq!(sent["filters"][0]["field"], "CITY");
    assert_eq!(sent["filters"][1]["operator"], "GT");
}
