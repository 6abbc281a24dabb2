//! Listing pagination
//!
//! The repository returns articles newest-first; this use case slices out
//! the requested page and decides when an out-of-range page should bounce
//! back to the first one.

use crate::model::Article;

/// One page of the listing, with the numbers the HTML view needs
#[derive(Debug, Clone)]
pub struct PageView {
    /// Articles on this page, newest first
    pub entries: Vec<Article>,
    /// Requested page, 1-based
    pub page: usize,
    /// Total number of articles
    pub total: usize,
    /// Total number of pages
    pub page_count: usize,
    pub next_page: usize,
    pub prev_page: usize,
}

/// Outcome of resolving a page request
#[derive(Debug, Clone)]
pub enum PageSelection {
    Page(PageView),
    /// The requested page starts past the end; the caller should redirect
    /// to page 1
    RedirectToFirst,
}

/// Slice the `page`-th window of `limit` articles out of a newest-first
/// listing. Page numbers below 1 are treated as 1.
pub fn paginate(articles: Vec<Article>, page: usize, limit: usize) -> PageSelection {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = articles.len();
    let start = (page - 1) * limit;

    if start >= total && page > 1 {
        return PageSelection::RedirectToFirst;
    }

    let entries: Vec<Article> = articles.into_iter().skip(start).take(limit).collect();

    PageSelection::Page(PageView {
        entries,
        page,
        total,
        page_count: total.div_ceil(limit),
        next_page: page + 1,
        prev_page: page - 1,
    })
}
