//! # dscm-cli — Diagnostics Contract Command-Line Interface
//!
//! Operator tooling over the shared diagnostics contract. Lets a developer
//! check what a client will see for a code, or what a document will be
//! rejected with, without standing up a service.
//!
//! ## Subcommands
//!
//! - `codes`: every machine code with its status and message template
//! - `message`: render one catalog message in a locale
//! - `status`: status mapping and boundary body for a code
//! - `validate`: validate a JSON or YAML document against a JSON Schema
//!
//! Handlers write to a caller-supplied writer so they can be driven
//! from tests; `main` only parses arguments and maps results to exit codes.

pub mod codes;
pub mod message;
pub mod status;
pub mod validate;
