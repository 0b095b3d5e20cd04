//! Client-side filtering of an already fetched article list.

use crate::types::Article;

/// Articles whose title, summary, content or any tag contains `query`,
/// ignoring case. A blank query matches everything. Order is preserved.
pub fn search_articles<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return articles.iter().collect();
    }
    articles
        .iter()
        .filter(|article| matches(article, &needle))
        .collect()
}

fn matches(article: &Article, needle: &str) -> bool {
    [&article.title, &article.summary, &article.content]
        .into_iter()
        .chain(article.tags.iter())
        .any(|text| text.to_lowercase().contains(needle))
}
