//! Paginated request target builder

use crate::query::{SearchCriteria, PARAM_PAGE};
use url::form_urlencoded;

/// Walks the pages of one search, producing a request target per page
///
/// The parameter list is derived from the criteria once, at construction.
/// Each call to [`QueryCursor::next_target`] advances the page counter by one
/// and overwrites the `page` parameter in place.
#[derive(Debug, Clone)]
pub struct QueryCursor {
    endpoint: String,
    criteria: SearchCriteria,
    params: Vec<(&'static str, String)>,
    page: u32,
}

impl QueryCursor {
    /// Creates a cursor positioned before the first page
    pub fn new(endpoint: impl Into<String>, criteria: SearchCriteria) -> Self {
        let params = criteria.params();
        Self {
            endpoint: endpoint.into(),
            criteria,
            params,
            page: 0,
        }
    }

    /// Number of pages handed out so far (0 before the first advance)
    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// The criteria this cursor was built from
    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    /// The endpoint every target is built on
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Advances to the next page and returns its request target
    ///
    /// Returns `None` when the criteria contribute no parameters; the page
    /// counter still advances in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use catalog_harvest::query::{QueryCursor, SearchCriteria};
    ///
    /// let mut cursor = QueryCursor::new("https://catalog.test/search", SearchCriteria::author("JK Rowling"));
    /// assert_eq!(
    ///     cursor.next_target().as_deref(),
    ///     Some("https://catalog.test/search?author=JK+Rowling&page=1")
    /// );
    /// assert_eq!(cursor.current_page(), 1);
    /// ```
    pub fn next_target(&mut self) -> Option<String> {
        self.page += 1;

        if self.criteria.is_empty() {
            return None;
        }

        let page = self.page.to_string();
        if let Some(entry) = self.params.iter_mut().find(|(key, _)| *key == PARAM_PAGE) {
            entry.1 = page;
        } else {
            self.params.push((PARAM_PAGE, page));
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .finish();

        Some(format!("{}?{}", self.endpoint, query))
    }
}
