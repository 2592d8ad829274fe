//! # dscm-models — Shared Records
//!
//! Record types every API service in the platform exchanges or persists,
//! each validating into the field-level diagnostics of [`dscm_core`]:
//!
//! - [`CoreModel`]: identity, tenancy, audit fields and free-form
//!   attributes, with create / update lifecycle helpers.
//! - [`Event`]: the event-stream message envelope.
//! - [`UsageEntry`], [`AuditEntry`], [`Entitlement`], [`VersionInfo`].
//! - [`page`]: 1-based pagination metadata for list endpoints.
//! - Closed vocabularies: [`RecordStatus`], [`ComputingBlock`],
//!   [`DatabaseDialect`], [`TriggerType`], [`ResourceSize`].
//!
//! ## Validation
//!
//! All records implement [`Validate`]. Violations are collected, never
//! short-circuited, and carry catalog codes so clients can branch on them:
//!
//! ```
//! use dscm_core::Location;
//! use dscm_models::{Entitlement, Validate};
//!
//! let errs = Entitlement::default().validate(Location::Body, "en");
//! assert_eq!(errs.len(), 3);
//! assert_eq!(errs[0].message, "id is required.");
//! ```

pub mod audit;
pub mod checks;
pub mod entitlement;
pub mod error;
pub mod event;
pub mod kinds;
pub mod page;
pub mod record;
pub mod status;
pub mod usage;
pub mod version;

pub use audit::AuditEntry;
pub use checks::{Checks, Validate};
pub use entitlement::Entitlement;
pub use error::ModelError;
pub use event::{Event, JsonObject};
pub use kinds::{ComputingBlock, DatabaseDialect, ResourceSize, TriggerType};
pub use page::{Page, PageResponse};
pub use record::{Attributes, CoreModel, TENANT_TAG};
pub use status::{RecordStatus, RECORD_STATUS_COUNT};
pub use usage::UsageEntry;
pub use version::VersionInfo;
