//! Every status line the screens can show.

use aca_core::{MembershipKind, Operation, Outcome, ToggleAction, project};
use aca_model::{ArticleRef, FilterField, FilterOperator, QueryFilter, QueryPayload};

fn catalogue(outcome: Outcome<'_>) -> String {
    let article = ArticleRef::new("author-7", "42");
    let payload = QueryPayload {
        filters: vec![
            QueryFilter::new(FilterField::City, FilterOperator::Eq, "Berlin"),
            QueryFilter::new(FilterField::MaxAttendees, FilterOperator::Gt, "10"),
        ],
    };
    let mut operations = vec![
        Operation::LoadArticles,
        Operation::LoadProfile,
        Operation::LoadArticle(&article),
        Operation::QueryArticles(&payload),
        Operation::CreateArticle {
            title: "Night mural",
        },
        Operation::UpdateProfile,
    ];
    for kind in [MembershipKind::Favorites, MembershipKind::Featured] {
        for action in [ToggleAction::Add, ToggleAction::Remove] {
            operations.push(Operation::Membership(kind, action));
        }
    }
    operations.push(Operation::SignIn {
        email: "ana@example.org",
    });
    operations.push(Operation::SignOut);

    operations
        .into_iter()
        .map(|operation| project(operation, outcome).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn success_lines() {
    insta::assert_snapshot!(catalogue(Outcome::Success), @r"
    [Success] Success
    [Success] Profile loaded
    [Success] Success
    [Success] Query succeeded : [CITY EQ Berlin, MAX_ATTENDEES GT 10]
    [Success] The article has been created : Night mural
    [Success] The profile has been updated
    [Success] Added article to favorites
    [Success] Removed article from favorites
    [Success] Added article to featured articles
    [Success] Removed article from featured articles
    [Success] Logged in with ana@example.org
    [Success] Logged out
    ");
}

#[test]
fn failure_lines_carry_the_server_text() {
    insta::assert_snapshot!(catalogue(Outcome::Failure(Some("quota exceeded"))), @r"
    [Warning] Failed to get articles : quota exceeded
    [Warning] Failed to get the profile : quota exceeded
    [Warning] Failed to get the article : author-7/42 : quota exceeded
    [Warning] Failed to query articles : quota exceeded
    [Warning] Failed to create an article : quota exceeded
    [Warning] Failed to update a profile : quota exceeded
    [Warning] Failed to add article to favorites : quota exceeded
    [Warning] Failed to remove article from favorites : quota exceeded
    [Warning] Failed to add article to featured articles : quota exceeded
    [Warning] Failed to remove article from featured articles : quota exceeded
    [Warning] Failed to sign in : quota exceeded
    [Warning] Failed to sign out : quota exceeded
    ");
}

#[test]
fn blank_server_text_is_dropped() {
    let status = project(Operation::LoadArticles, Outcome::Failure(Some("  ")));
    assert_eq!(status.to_string(), "[Warning] Failed to get articles");
}
