//! Mutable HTTP message model.
//!
//! - [`http::headers`]: case-insensitive, ordered, multi-valued header store
//!   that filters header injection on every write.
//! - [`http::uri`]: RFC 3986 URI with independently settable components.
//! - [`http::cookie`]: cookie registry that reconciles the client's `Cookie`
//!   header with server-side changes and emits `Set-Cookie` headers.
//! - [`http::request`] / [`http::response`]: messages built on the above,
//!   rendered as HTTP/1.x text or as HTTP/2+ pseudo-headers.
//! - [`http::parser`] and [`net::emitter`]: raw transport input and output.
//!
//! Every value here is a plain owned object mutated in place. Nothing is
//! shared or locked; clone before handing a value to independent code.

pub mod config;
pub mod error;
pub mod http;
pub mod net;

pub use config::MessageConfig;
pub use error::{Error, Result};
