//! # dscm-http — Service Boundary Errors
//!
//! The edge of every API service converts whatever went wrong into one
//! [`HttpError`]: stable machine code, localized message, caller-supplied
//! request id, and retry guidance. This crate provides that type, its named
//! constructors, transport response shaping (`Retry-After` header included),
//! and the Axum glue:
//!
//! - [`HttpError`] implements `IntoResponse`.
//! - [`EnvelopeResponse`] serves a bare [`dscm_core::ErrorEnvelope`] as 422.
//! - [`RequestContext`] extracts request id and locale from each request.
//! - [`BoundaryConfig`] controls that extraction, loaded from the environment.
//!
//! Boundary conversion happens exactly once, at the outermost layer, through
//! [`HttpError::from_any_error`] (or [`RequestContext::normalize`]).

pub mod config;
pub mod context;
pub mod error;

pub use config::{BoundaryConfig, ConfigError, DEFAULT_REQUEST_ID_HEADER};
pub use context::{negotiate_locale, RequestContext};
pub use error::{EnvelopeResponse, HttpError};
