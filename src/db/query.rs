//! REST query builder
//!
//! Builds the query string for a PostgREST read, e.g.
//! `select=*,colleges(*)&slug=eq.intro-to-rust&order=created_at.desc&limit=1`.

use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Eq(String, String),
    IsNull(String),
}

/// A read query against one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    table: String,
    select: String,
    filters: Vec<Filter>,
    order: Vec<(String, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Query {
    /// Start a query on `table` selecting all columns
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Columns and embedded relations to return
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    /// Keep rows where `column` equals `value`
    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push(Filter::Eq(column.into(), value.to_string()));
        self
    }

    /// Keep rows where `column` is null
    pub fn is_null(mut self, column: impl Into<String>) -> Self {
        self.filters.push(Filter::IsNull(column.into()));
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Order) -> Self {
        self.order.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Row limit, if the query is ranged
    pub fn row_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn row_offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }

    /// Render the URL query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("select={}", encode_select(&self.select))];

        for filter in &self.filters {
            match filter {
                Filter::Eq(column, value) => parts.push(format!(
                    "{}=eq.{}",
                    urlencoding::encode(column),
                    urlencoding::encode(value)
                )),
                Filter::IsNull(column) => {
                    parts.push(format!("{}=is.null", urlencoding::encode(column)))
                }
            }
        }

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, direction)| format!("{}.{}", urlencoding::encode(column), direction))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("order={}", order));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit={}", limit));
        }
        if let Some(offset) = self.offset {
            parts.push(format!("offset={}", offset));
        }

        parts.join("&")
    }
}

/// Encode a select list, keeping the characters PostgREST uses for structure
fn encode_select(select: &str) -> String {
    let mut out = String::with_capacity(select.len());
    let mut word = String::new();
    for c in select.chars() {
        if matches!(c, ',' | '(' | ')' | '*' | ':' | '!') {
            out.push_str(&urlencoding::encode(word.trim()));
            word.clear();
            out.push(c);
        } else {
            word.push(c);
        }
    }
    out.push_str(&urlencoding::encode(word.trim()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selects_everything() {
        let query = Query::table("colleges");
        assert_eq!(query.table_name(), "colleges");
        assert_eq!(query.to_query_string(), "select=*");
    }

    #[test]
    fn test_filters_order_and_paging() {
        let query = Query::table("courses")
            .eq("featured", true)
            .order("created_at", Order::Desc)
            .order("title", Order::Asc)
            .limit(12)
            .offset(24);

        assert_eq!(
            query.to_query_string(),
            "select=*&featured=eq.true&order=created_at.desc,title.asc&limit=12&offset=24"
        );
    }

    #[test]
    fn test_embedded_select_keeps_structure() {
        let query = Query::table("courses").select("*, colleges(*), course_categories(*)");
        assert_eq!(
            query.to_query_string(),
            "select=*,colleges(*),course_categories(*)"
        );
    }

    #[test]
    fn test_filter_values_are_encoded() {
        let query = Query::table("colleges").eq("name", "Arts & Sciences, Inc.");
        assert_eq!(
            query.to_query_string(),
            "select=*&name=eq.Arts%20%26%20Sciences%2C%20Inc."
        );
    }

    #[test]
    fn test_is_null_filter() {
        let query = Query::table("courses").is_null("category_id");
        assert_eq!(query.to_query_string(), "select=*&category_id=is.null");
    }

    #[test]
    fn test_range_accessors() {
        let query = Query::table("courses");
        assert_eq!(query.row_limit(), None);
        assert_eq!(query.row_offset(), 0);

        let query = query.limit(50).offset(100);
        assert_eq!(query.row_limit(), Some(50));
        assert_eq!(query.row_offset(), 100);
    }
}
