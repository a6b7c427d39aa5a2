//! Query parameter containers and the parameter-object collaborator trait.
//!
//! WooCommerce list endpoints take a large number of optional query
//! parameters. Callers can pass them as loose key/value pairs via
//! [`QueryParams`], or as a typed parameter object implementing
//! [`ToQueryParameters`], whose properties are flattened into the query
//! string (list-valued properties expand to repeated `key[]=value` pairs).
//!
//! Insertion order is preserved: it is what an unsigned query string uses,
//! while OAuth signing canonicalizes (sorts) independently.

use std::slice::Iter;

/// An insertion-ordered collection of query parameters.
///
/// Semantically a string-to-string mapping, but backed by a `Vec` because
/// insertion order is meaningful for unsigned query strings.
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::QueryParams;
///
/// let mut params = QueryParams::from([("page", "2")]);
/// params.insert("per_page", "50");
/// assert_eq!(params.get("page"), Some("2"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a parameter, replacing an existing value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(existing, _)| *existing == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Inserts a parameter only when the key is not already present.
    ///
    /// Used when folding credentials into the query string, so that a
    /// caller-supplied value is never silently overwritten.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.0.push((key, value.into()));
        }
    }

    /// Returns the value for the first entry with the given key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` when an entry with the given key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(existing, _)| existing == key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> Iter<'_, (String, String)> {
        self.0.iter()
    }

    /// Flattens a parameter object into this set.
    ///
    /// Single-valued properties append as `key=value`; list-valued
    /// properties append one `key[]=value` entry per item.
    pub fn merge_item_parameters(&mut self, item: &dyn ToQueryParameters) {
        for (key, value) in item.to_query_parameters() {
            match value {
                QueryValue::Single(value) => self.0.push((key, value)),
                QueryValue::Many(values) => {
                    let key = format!("{key}[]");
                    for value in values {
                        self.0.push((key.clone(), value));
                    }
                }
            }
        }
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a (String, String);
    type IntoIter = Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for QueryParams {
    fn from(entries: [(&str, &str); N]) -> Self {
        let mut params = Self::new();
        for (key, value) in entries {
            params.insert(key, value);
        }
        params
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// A single query parameter value: scalar or list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// One `key=value` pair.
    Single(String),
    /// Repeated `key[]=value` pairs, one per item.
    Many(Vec<String>),
}

impl QueryValue {
    /// Wraps a displayable scalar.
    pub fn single(value: impl ToString) -> Self {
        Self::Single(value.to_string())
    }

    /// Wraps a list of displayable items.
    pub fn many<T: ToString>(values: &[T]) -> Self {
        Self::Many(values.iter().map(ToString::to_string).collect())
    }
}

/// A typed parameter object that can be flattened into query parameters.
///
/// Implementations write out their wire names explicitly: WooCommerce uses
/// snake_case request parameters, so property names are spelled in
/// snake_case unless the API documents a different literal name (an
/// explicit wire name takes the place of an annotation).
///
/// # Example
///
/// ```rust
/// use woocommerce_rest::{QueryValue, ToQueryParameters};
///
/// struct ProductParams {
///     per_page: Option<u32>,
///     include: Vec<i64>,
/// }
///
/// impl ToQueryParameters for ProductParams {
///     fn to_query_parameters(&self) -> Vec<(String, QueryValue)> {
///         let mut params = Vec::new();
///         if let Some(per_page) = self.per_page {
///             params.push(("per_page".to_string(), QueryValue::single(per_page)));
///         }
///         if !self.include.is_empty() {
///             params.push(("include".to_string(), QueryValue::many(&self.include)));
///         }
///         params
///     }
/// }
/// ```
pub trait ToQueryParameters {
    /// Returns the ordered list of `(wire_name, value)` pairs.
    fn to_query_parameters(&self) -> Vec<(String, QueryValue)>;
}

/// Query parameters accepted by the orders list endpoint.
///
/// Mirrors the documented parameters of `GET /orders`. The defaults match
/// the server's paging defaults so a default-constructed value lists the
/// first page of ten orders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderListParams {
    /// Scope under which the request is made (`view` or `edit`).
    pub context: Option<String>,
    /// Current page of the collection.
    pub page: Option<u32>,
    /// Maximum number of items per page.
    pub per_page: Option<u32>,
    /// Limit results to those matching a string.
    pub search: Option<String>,
    /// ISO8601-compliant date lower bound.
    pub after: Option<String>,
    /// ISO8601-compliant date upper bound.
    pub before: Option<String>,
    /// Lower bound on the last-modified date.
    pub modified_after: Option<String>,
    /// Upper bound on the last-modified date.
    pub modified_before: Option<String>,
    /// Whether the date bounds are given in GMT.
    pub dates_are_gmt: Option<bool>,
    /// IDs to exclude from the result set.
    pub exclude: Vec<i64>,
    /// Limit the result set to specific IDs.
    pub include: Vec<i64>,
    /// Offset of the result set.
    pub offset: Option<u32>,
    /// Sort direction (`asc` or `desc`).
    pub order: Option<String>,
    /// Field to sort by. Wire name `orderby`, per the API docs.
    pub order_by: Option<String>,
    /// Limit the result set to orders with specific parent IDs.
    pub parent: Vec<i64>,
    /// Exclude orders with specific parent IDs.
    pub parent_exclude: Vec<i64>,
    /// Limit the result set to specific statuses.
    pub status: Vec<String>,
    /// Limit the result set to a customer ID.
    pub customer: Option<i64>,
    /// Limit the result set to orders containing a product ID.
    pub product: Option<i64>,
    /// Number of decimal points in money values.
    pub decimal_points: Option<u8>,
}

impl Default for OrderListParams {
    fn default() -> Self {
        Self {
            context: None,
            page: Some(1),
            per_page: Some(10),
            search: None,
            after: None,
            before: None,
            modified_after: None,
            modified_before: None,
            dates_are_gmt: None,
            exclude: Vec::new(),
            include: Vec::new(),
            offset: None,
            order: None,
            order_by: None,
            parent: Vec::new(),
            parent_exclude: Vec::new(),
            status: Vec::new(),
            customer: None,
            product: None,
            decimal_points: None,
        }
    }
}

impl ToQueryParameters for OrderListParams {
    fn to_query_parameters(&self) -> Vec<(String, QueryValue)> {
        fn scalar(
            params: &mut Vec<(String, QueryValue)>,
            name: &str,
            value: Option<&dyn std::fmt::Display>,
        ) {
            if let Some(value) = value {
                params.push((name.to_string(), QueryValue::Single(value.to_string())));
            }
        }

        let mut params = Vec::new();
        scalar(&mut params, "context", self.context.as_ref().map(|v| v as _));
        scalar(&mut params, "page", self.page.as_ref().map(|v| v as _));
        scalar(&mut params, "per_page", self.per_page.as_ref().map(|v| v as _));
        scalar(&mut params, "search", self.search.as_ref().map(|v| v as _));
        scalar(&mut params, "after", self.after.as_ref().map(|v| v as _));
        scalar(&mut params, "before", self.before.as_ref().map(|v| v as _));
        scalar(
            &mut params,
            "modified_after",
            self.modified_after.as_ref().map(|v| v as _),
        );
        scalar(
            &mut params,
            "modified_before",
            self.modified_before.as_ref().map(|v| v as _),
        );
        scalar(
            &mut params,
            "dates_are_gmt",
            self.dates_are_gmt.as_ref().map(|v| v as _),
        );
        scalar(&mut params, "offset", self.offset.as_ref().map(|v| v as _));
        scalar(&mut params, "order", self.order.as_ref().map(|v| v as _));
        // Explicit wire name: the API parameter is "orderby", not "order_by".
        scalar(&mut params, "orderby", self.order_by.as_ref().map(|v| v as _));
        scalar(&mut params, "customer", self.customer.as_ref().map(|v| v as _));
        scalar(&mut params, "product", self.product.as_ref().map(|v| v as _));
        scalar(
            &mut params,
            "decimal_points",
            self.decimal_points.as_ref().map(|v| v as _),
        );

        if !self.exclude.is_empty() {
            params.push(("exclude".to_string(), QueryValue::many(&self.exclude)));
        }
        if !self.include.is_empty() {
            params.push(("include".to_string(), QueryValue::many(&self.include)));
        }
        if !self.parent.is_empty() {
            params.push(("parent".to_string(), QueryValue::many(&self.parent)));
        }
        if !self.parent_exclude.is_empty() {
            params.push((
                "parent_exclude".to_string(),
                QueryValue::many(&self.parent_exclude),
            ));
        }
        if !self.status.is_empty() {
            params.push(("status".to_string(), QueryValue::many(&self.status)));
        }
        params
    }
}
