//! Displayed article list and its pagination.

use std::num::NonZeroUsize;
use std::ops::Range;

use aca_model::{ArticleKey, ArticleSummary};

/// Number of articles shown per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of pages needed for `len` items; zero for an empty list.
pub fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Zero-based page cursor over a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: usize,
    page_size: NonZeroUsize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            current_page: 0,
            page_size,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Items covered by the current page of a list of length `len`.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = (self.current_page * self.page_size.get()).min(len);
        let end = (start + self.page_size.get()).min(len);
        start..end
    }

    /// Moves to `page`, clamped to the last page. Returns the page selected.
    fn select(&mut self, page: usize, len: usize) -> usize {
        let last = page_count(len, self.page_size).saturating_sub(1);
        self.current_page = page.min(last);
        self.current_page
    }
}

/// Ordered collection of the articles currently on screen.
///
/// The order is the server's response order. Page count and page indices are
/// derived from the current length on every query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleList {
    items: Vec<ArticleSummary>,
    pagination: Pagination,
}

impl ArticleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(page_size),
        }
    }

    /// Installs a new result set and returns to the first page.
    pub fn replace(&mut self, items: Vec<ArticleSummary>) {
        self.items = items;
        self.pagination.current_page = 0;
    }

    /// Removes the article at `index`; `None` when out of range.
    ///
    /// The current page is pulled back if it no longer exists.
    pub fn remove_at(&mut self, index: usize) -> Option<ArticleSummary> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        let page = self.pagination.current_page;
        self.pagination.select(page, self.items.len());
        Some(removed)
    }

    /// Removes the first article with `key`.
    pub fn remove_key(&mut self, key: &ArticleKey) -> Option<ArticleSummary> {
        let index = self.position(key)?;
        self.remove_at(index)
    }

    pub fn position(&self, key: &ArticleKey) -> Option<usize> {
        self.items.iter().position(|article| article.key() == key)
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn get(&self, index: usize) -> Option<&ArticleSummary> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[ArticleSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.pagination.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.items.len(), self.pagination.page_size)
    }

    /// Page numbers `0..page_count()`; restartable by calling again.
    pub fn page_indices(&self) -> Range<usize> {
        0..self.page_count()
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    /// Selects `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.pagination.select(page, self.items.len())
    }

    /// Articles on the current page, with their list indices.
    pub fn page_items(&self) -> impl Iterator<Item = (usize, &ArticleSummary)> {
        let window = self.pagination.window(self.items.len());
        let start = window.start;
        self.items[window]
            .iter()
            .enumerate()
            .map(move |(offset, article)| (start + offset, article))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles(n: usize) -> Vec<ArticleSummary> {
        (0..n)
            .map(|i| ArticleSummary {
                websafe_article_key: ArticleKey::new(format!("k{i}")),
                title: Some(format!("Article {i}")),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn forty_five_articles_make_three_pages() {
        let mut list = ArticleList::new();
        list.replace(articles(45));
        assert_eq!(list.page_count(), 3);
        assert_eq!(list.page_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let list = ArticleList::new();
        assert_eq!(list.page_count(), 0);
        assert_eq!(list.page_indices().count(), 0);
        assert_eq!(list.page_items().count(), 0);
    }

    #[test]
    fn page_items_follow_current_page() {
        let mut list = ArticleList::new();
        list.replace(articles(45));
        assert_eq!(list.set_page(2), 2);
        let indices: Vec<usize> = list.page_items().map(|(i, _)| i).collect();
        assert_eq!(indices, (40..45).collect::<Vec<_>>());
    }

    #[test]
    fn set_page_is_clamped() {
        let mut list = ArticleList::new();
        list.replace(articles(21));
        assert_eq!(list.set_page(7), 1);
        list.clear();
        assert_eq!(list.set_page(3), 0);
    }

    #[test]
    fn remove_at_out_of_range_is_none() {
        let mut list = ArticleList::new();
        list.replace(articles(2));
        assert!(list.remove_at(2).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn removing_last_item_of_last_page_moves_back() {
        let mut list = ArticleList::new();
        list.replace(articles(21));
        list.set_page(1);
        let removed = list.remove_at(20).unwrap();
        assert_eq!(removed.key().as_str(), "k20");
        assert_eq!(list.current_page(), 0);
        assert_eq!(list.page_count(), 1);
    }

    #[test]
    fn replace_keeps_server_order_and_resets_page() {
        let mut list = ArticleList::new();
        list.replace(articles(30));
        list.set_page(1);
        let mut reversed = articles(3);
        reversed.reverse();
        list.replace(reversed);
        assert_eq!(list.current_page(), 0);
        assert_eq!(list.items()[0].key().as_str(), "k2");
        assert_eq!(list.position(&ArticleKey::from("k0")), Some(2));
    }
}
