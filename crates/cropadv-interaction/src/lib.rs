//! HTTP access to the crop advisory service.
//!
//! [`HttpAdvisoryClient`] implements [`cropadv_core::AdvisoryApi`] on top of
//! `reqwest`, normalizing every failure into
//! [`cropadv_core::AdvisoryError::Api`].

pub mod http_client;

pub use http_client::HttpAdvisoryClient;
