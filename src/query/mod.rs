//! Search criteria and request target construction
//!
//! A search is either a free-text term or a pair of author/title fields.
//! [`QueryCursor`] turns one search into the sequence of paginated request
//! targets the crawler walks through.

mod cursor;

pub use cursor::QueryCursor;

/// Query parameter carrying the free-text term
pub const PARAM_TERM: &str = "q";
/// Query parameter carrying the author field
pub const PARAM_AUTHOR: &str = "author";
/// Query parameter carrying the title field
pub const PARAM_TITLE: &str = "title";
/// Query parameter carrying the one-based page number
pub const PARAM_PAGE: &str = "page";

/// What a single crawl searches for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCriteria {
    /// Free-text search over the whole catalog
    FreeText(String),

    /// Field search; either field may be absent
    Fields {
        author: Option<String>,
        title: Option<String>,
    },
}

impl SearchCriteria {
    /// Builds criteria from optional parts
    ///
    /// A non-empty free-text term takes precedence over author and title.
    /// Empty strings count as absent.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_harvest::query::SearchCriteria;
    ///
    /// let criteria = SearchCriteria::new(Some("Tolkien"), None, Some("hobbit"));
    /// assert_eq!(criteria, SearchCriteria::FreeText("hobbit".to_string()));
    /// ```
    pub fn new(author: Option<&str>, title: Option<&str>, term: Option<&str>) -> Self {
        let present = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        match present(term) {
            Some(term) => Self::FreeText(term),
            None => Self::Fields {
                author: present(author),
                title: present(title),
            },
        }
    }

    /// Free-text criteria
    pub fn free_text(term: impl Into<String>) -> Self {
        Self::FreeText(term.into())
    }

    /// Author-only criteria
    pub fn author(author: impl Into<String>) -> Self {
        Self::Fields {
            author: Some(author.into()),
            title: None,
        }
    }

    /// Title-only criteria
    pub fn title(title: impl Into<String>) -> Self {
        Self::Fields {
            author: None,
            title: Some(title.into()),
        }
    }

    /// Returns the request parameters these criteria contribute, in order
    ///
    /// Empty values contribute nothing.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let candidates = match self {
            Self::FreeText(term) => vec![(PARAM_TERM, Some(term))],
            Self::Fields { author, title } => {
                vec![(PARAM_AUTHOR, author.as_ref()), (PARAM_TITLE, title.as_ref())]
            }
        };

        candidates
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| (key, v.clone()))
            })
            .collect()
    }

    /// True when the criteria would not constrain the search at all
    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }
}

impl std::fmt::Display for SearchCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        if parts.is_empty() {
            write!(f, "<empty>")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
