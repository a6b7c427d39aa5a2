//! REST client and JSON codec.

mod client;
pub mod codec;

pub use client::{RestClient, RestClientBuilder};
pub use codec::Envelope;
