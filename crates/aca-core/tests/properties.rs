//! Property tests for the list, membership and filter rules.

use std::num::NonZeroUsize;

use aca_core::filter::{FilterDraft, build};
use aca_core::list::{ArticleList, page_count};
use aca_core::membership::{self, MembershipKind, ToggleAction};
use aca_model::{ArticleKey, ArticleSummary, FilterField, FilterOperator};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = ArticleKey> {
    "[a-e][0-9]".prop_map(ArticleKey::new)
}

fn unique_keys() -> impl Strategy<Value = Vec<ArticleKey>> {
    proptest::collection::vec(key_strategy(), 0..12).prop_map(membership::dedup_keys)
}

fn draft_strategy() -> impl Strategy<Value = FilterDraft> {
    (
        proptest::option::of(proptest::sample::select(FilterField::ALL.to_vec())),
        proptest::option::of(proptest::sample::select(FilterOperator::ALL.to_vec())),
        prop_oneof!["", "[A-Za-z0-9 ]{1,8}"],
    )
        .prop_map(|(field, operator, value)| FilterDraft {
            field,
            operator,
            value,
        })
}

proptest! {
    #[test]
    fn toggle_twice_restores_the_set(members in unique_keys(), key in key_strategy()) {
        let mut set = members.clone();
        let first = membership::toggle(MembershipKind::Favorites, &mut set, &key);
        let second = membership::toggle(MembershipKind::Favorites, &mut set, &key);

        prop_assert_ne!(first.action, second.action);
        set.sort();
        let mut expected = members;
        expected.sort();
        prop_assert_eq!(set, expected);
    }

    #[test]
    fn applying_keeps_keys_unique(
        members in unique_keys(),
        steps in proptest::collection::vec((key_strategy(), any::<bool>()), 0..20),
    ) {
        let mut set = members;
        for (key, add) in steps {
            let action = if add { ToggleAction::Add } else { ToggleAction::Remove };
            membership::apply(&mut set, action, &key);
            prop_assert_eq!(set.contains(&key), add);
        }
        let unique = membership::dedup_keys(set.clone());
        prop_assert_eq!(unique.len(), set.len());
    }

    #[test]
    fn build_keeps_complete_filters_in_order(
        drafts in proptest::collection::vec(draft_strategy(), 0..10),
    ) {
        let payload = build(&drafts);
        let expected: Vec<_> = drafts.iter().filter_map(FilterDraft::to_filter).collect();

        prop_assert!(payload.len() <= drafts.len());
        prop_assert_eq!(
            payload.len(),
            drafts
                .iter()
                .filter(|d| d.field.is_some() && d.operator.is_some() && !d.value.trim().is_empty())
                .count()
        );
        prop_assert_eq!(payload.filters, expected);
    }

    #[test]
    fn page_count_is_ceiling_division(len in 0usize..5000, size in 1usize..100) {
        let size = NonZeroUsize::new(size).unwrap();
        let pages = page_count(len, size);
        prop_assert_eq!(pages, len.div_ceil(size.get()));
        prop_assert!(pages * size.get() >= len);
        if len == 0 {
            prop_assert_eq!(pages, 0);
        }
    }

    #[test]
    fn page_items_cover_the_list_exactly_once(len in 0usize..120, size in 1usize..30) {
        let mut list = ArticleList::with_page_size(NonZeroUsize::new(size).unwrap());
        list.replace(
            (0..len)
                .map(|i| ArticleSummary {
                    websafe_article_key: ArticleKey::new(format!("k{i}")),
                    ..Default::default()
                })
                .collect(),
        );

        let mut seen = Vec::new();
        for page in list.page_indices() {
            prop_assert_eq!(list.set_page(page), page);
            seen.extend(list.page_items().map(|(index, _)| index));
        }
        prop_assert_eq!(seen, (0..len).collect::<Vec<_>>());
    }
}
