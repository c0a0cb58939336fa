//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod http;

pub use http::{HttpClient, HttpResponse};
