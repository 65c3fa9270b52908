//! List query construction and evaluation.
//!
//! [`QueryBuilder`] turns raw [`ListParams`] into a [`SnippetQuery`]: a
//! filter, an optional single-key sort and a page window. Stores that cannot
//! push a query down evaluate it with [`SnippetQuery::apply`].
//!
//! Text matching is case-folded comparison, never pattern matching, so
//! client filter text has no special characters.

use std::cmp::Ordering;

use jiff::Timestamp;

use crate::expiry;
use crate::models::request::ListParams;
use crate::models::snippet::Snippet;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_MAX_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Language,
    CreatedAt,
    UpdatedAt,
    ExpiresAt,
}

impl SortField {
    /// Accepts the JSON field names and their snake_case spellings.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "title" => Some(Self::Title),
            "language" => Some(Self::Language),
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            "expiresAt" | "expires_at" => Some(Self::ExpiresAt),
            _ => None,
        }
    }

    /// Ascending order on this field. Snippets without an expiry sort after
    /// those with one.
    pub fn compare(self, a: &Snippet, b: &Snippet) -> Ordering {
        match self {
            Self::Title => a.title.cmp(&b.title),
            Self::Language => a.language.cmp(&b.language),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            Self::ExpiresAt => match (a.expires_at, b.expires_at) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn compare(&self, a: &Snippet, b: &Snippet) -> Ordering {
        let ord = self.field.compare(a, b);
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Filter clauses, all ANDed together.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetFilter {
    /// Case-folded substring the language must contain.
    pub language: Option<String>,
    /// Case-folded tags that must all be present on the snippet.
    pub tags: Vec<String>,
    /// Only snippets live at this instant match.
    pub live_at: Timestamp,
}

impl SnippetFilter {
    pub fn matches(&self, snippet: &Snippet) -> bool {
        if !expiry::is_live(snippet.expires_at, self.live_at) {
            return false;
        }
        if let Some(language) = &self.language {
            if !snippet.language.to_lowercase().contains(language.as_str()) {
                return false;
            }
        }
        self.tags.iter().all(|wanted| {
            snippet
                .tags
                .iter()
                .any(|tag| tag.to_lowercase() == *wanted)
        })
    }
}

/// Query descriptor handed to a repository.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetQuery {
    pub filter: SnippetFilter,
    /// `None` keeps the store's natural (creation) order.
    pub sort: Option<Sort>,
    pub page: usize,
    pub limit: usize,
    pub skip: usize,
    /// A requested sort field that is not a known snippet field. It is not
    /// applied; kept so callers can report it.
    pub rejected_sort: Option<String>,
}

impl SnippetQuery {
    pub fn matches(&self, snippet: &Snippet) -> bool {
        self.filter.matches(snippet)
    }

    /// Filter, sort, then page `records`, which must be in natural order.
    pub fn apply(&self, records: impl IntoIterator<Item = Snippet>) -> Vec<Snippet> {
        let mut matched: Vec<Snippet> = records.into_iter().filter(|s| self.matches(s)).collect();
        if let Some(sort) = &self.sort {
            // stable, so ties keep natural order
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        matched
            .into_iter()
            .skip(self.skip)
            .take(self.limit)
            .collect()
    }
}

/// Builds [`SnippetQuery`] values from raw client parameters.
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilder {
    max_limit: usize,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound for the page size. Values below 1 are raised to 1.
    pub fn max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit.max(1);
        self
    }

    pub fn build(&self, params: &ListParams, now: Timestamp) -> SnippetQuery {
        let language = non_empty(params.language.as_deref()).map(str::to_lowercase);
        let tags = params.tags.as_deref().map(parse_tags).unwrap_or_default();

        let page = parse_positive(params.page.as_deref(), DEFAULT_PAGE, usize::MAX);
        let limit = parse_positive(params.limit.as_deref(), DEFAULT_LIMIT, self.max_limit);
        let skip = (page - 1).saturating_mul(limit);

        let order = match params.order.as_deref().map(str::trim) {
            Some(o) if o.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        let requested_sort = non_empty(params.sort.as_deref());
        let sort = requested_sort
            .and_then(SortField::parse)
            .map(|field| Sort { field, order });
        let rejected_sort = match (requested_sort, sort) {
            (Some(name), None) => Some(name.to_string()),
            _ => None,
        };

        SnippetQuery {
            filter: SnippetFilter {
                language,
                tags,
                live_at: now,
            },
            sort,
            page,
            limit,
            skip,
            rejected_sort,
        }
    }
}

/// Split a comma-separated tag list into trimmed, case-folded, distinct tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let tag = tag.to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a positive integer clamped to `1..=max`. Missing or unparsable
/// input yields `default`; zero and negatives yield 1.
fn parse_positive(raw: Option<&str>, default: usize, max: usize) -> usize {
    let Some(raw) = non_empty(raw) else {
        return default.min(max);
    };
    match raw.parse::<i64>() {
        Ok(n) if n < 1 => 1,
        Ok(n) => usize::try_from(n).unwrap_or(usize::MAX).min(max),
        Err(_) => default.min(max),
    }
}
