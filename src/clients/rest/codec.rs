//! JSON codec with legacy envelope wrapping.
//!
//! The legacy `wc-api` endpoints expect single resources wrapped in an
//! object keyed by the resource name (`{"order": {...}}`) and collections
//! keyed by its plural (`{"orders": [...]}`). Payload types opt in by
//! implementing [`Envelope`]; modern endpoints send the payload as-is.

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::filters::JsonFilter;
use crate::clients::RestError;

/// Declares the legacy envelope name of a payload type.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use woocommerce_rest::Envelope;
///
/// #[derive(serde::Serialize)]
/// struct Order {
///     id: u64,
/// }
///
/// impl Envelope for Order {
///     fn envelope_name() -> Cow<'static, str> {
///         Cow::Borrowed("order")
///     }
/// }
/// ```
pub trait Envelope {
    /// The key used to wrap a single resource on legacy endpoints.
    fn envelope_name() -> Cow<'static, str>;

    /// Optional rewrite hook applied to the serialized JSON before any
    /// envelope wrapping. The default passes the text through unchanged.
    #[must_use]
    fn format_json(json: String) -> String {
        json
    }
}

/// Collections wrap under the pluralized resource name.
impl<T: Envelope> Envelope for Vec<T> {
    fn envelope_name() -> Cow<'static, str> {
        Cow::Owned(format!("{}s", T::envelope_name()))
    }

    fn format_json(json: String) -> String {
        T::format_json(json)
    }
}

/// Serializes `value`, applying the type's rewrite hook, the legacy
/// envelope when `is_legacy`, and the post-serialize filter, in that
/// order.
pub(crate) fn serialize<T: Serialize + Envelope>(
    value: &T,
    is_legacy: bool,
    filter: Option<&dyn JsonFilter>,
) -> Result<String, RestError> {
    let mut json = serde_json::to_string(value)?;
    json = T::format_json(json);
    if is_legacy {
        json = format!("{{\"{}\":{json}}}", T::envelope_name());
    }
    if let Some(filter) = filter {
        json = filter.apply(json);
    }
    Ok(json)
}

/// Deserializes `json` after running the pre-deserialize filter.
///
/// The raw JSON is attached to the error only when `debug` is set.
pub(crate) fn deserialize<T: DeserializeOwned>(
    json: &str,
    filter: Option<&dyn JsonFilter>,
    debug: bool,
) -> Result<T, RestError> {
    let json = match filter {
        Some(filter) => filter.apply(json.to_string()),
        None => json.to_string(),
    };
    serde_json::from_str(&json).map_err(|err| RestError::deserialization(&err, &json, debug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Order {
        id: u64,
    }

    impl Envelope for Order {
        fn envelope_name() -> Cow<'static, str> {
            Cow::Borrowed("order")
        }
    }

    #[derive(serde::Serialize)]
    struct Coupon {
        code: String,
    }

    impl Envelope for Coupon {
        fn envelope_name() -> Cow<'static, str> {
            Cow::Borrowed("coupon")
        }

        fn format_json(json: String) -> String {
            json.replace("\"code\"", "\"coupon_code\"")
        }
    }

    #[test]
    fn test_modern_serialization_is_unwrapped() {
        let json = serialize(&Order { id: 7 }, false, None).unwrap();
        assert_eq!(json, r#"{"id":7}"#);
    }

    #[test]
    fn test_legacy_serialization_wraps_single_resource() {
        let json = serialize(&Order { id: 7 }, true, None).unwrap();
        assert_eq!(json, r#"{"order":{"id":7}}"#);
    }

    #[test]
    fn test_legacy_serialization_pluralizes_collections() {
        let orders = vec![Order { id: 1 }, Order { id: 2 }];
        let json = serialize(&orders, true, None).unwrap();
        assert_eq!(json, r#"{"orders":[{"id":1},{"id":2}]}"#);
    }

    #[test]
    fn test_format_json_hook_runs_before_wrapping() {
        let coupon = Coupon {
            code: "SAVE10".to_string(),
        };
        let json = serialize(&coupon, true, None).unwrap();
        assert_eq!(json, r#"{"coupon":{"coupon_code":"SAVE10"}}"#);
    }

    #[test]
    fn test_serialize_filter_runs_last() {
        let filter: &dyn JsonFilter = &|json: String| format!("[{json}]");
        let json = serialize(&Order { id: 7 }, true, Some(filter)).unwrap();
        assert_eq!(json, r#"[{"order":{"id":7}}]"#);
    }

    #[test]
    fn test_deserialize_filter_runs_first() {
        let filter: &dyn JsonFilter = &|json: String| json.replace("\"order_id\"", "\"id\"");
        let order: Order = deserialize(r#"{"order_id":7}"#, Some(filter), false).unwrap();
        assert_eq!(order, Order { id: 7 });
    }

    #[test]
    fn test_deserialize_error_attaches_json_only_in_debug() {
        let terse = deserialize::<Order>("not json", None, false).unwrap_err();
        match terse {
            RestError::Deserialization { json, .. } => assert!(json.is_none()),
            other => panic!("unexpected error: {other}"),
        }

        let verbose = deserialize::<Order>("not json", None, true).unwrap_err();
        match verbose {
            RestError::Deserialization { json, .. } => {
                assert_eq!(json.as_deref(), Some("not json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
