//! Client types for the WooCommerce and WordPress REST APIs.

pub mod errors;
pub mod filters;
pub mod query;
pub mod request;
pub mod rest;

pub use errors::RestError;
pub use filters::{JsonFilter, RequestFilter, ResponseFilter};
pub use query::{OrderListParams, QueryParams, QueryValue, ToQueryParameters};
pub use request::{RequestBody, RequestMethod, RequestSpec};
pub use rest::{Envelope, RestClient, RestClientBuilder};
