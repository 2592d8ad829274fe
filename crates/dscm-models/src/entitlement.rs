//! Entitlement grants as read from the identity service.

use serde::{Deserialize, Serialize};

use dscm_core::{Location, ValidationError};

use crate::checks::{Checks, Validate};

/// A named permission granted to a tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    pub id: String,
    pub name: String,
    pub tenant_id: String,
}

impl Entitlement {
    /// Validate a request body, with catalog messages in `locale`.
    pub fn validate_body(&self, locale: &str) -> Vec<ValidationError> {
        self.validate(Location::Body, locale)
    }
}

impl Validate for Entitlement {
    fn validate(&self, loc: Location, locale: &str) -> Vec<ValidationError> {
        let mut checks = Checks::new(loc, locale);
        checks.require("id", self.id.is_empty());
        checks.require("name", self.name.is_empty());
        checks.require("tenant_id", self.tenant_id.is_empty());
        checks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_entitlement_is_valid() {
        let e = Entitlement {
            id: "ent-1".into(),
            name: "datasets:read".into(),
            tenant_id: "t-1".into(),
        };
        assert!(e.validate_body("en").is_empty());
    }

    #[test]
    fn missing_fields_use_catalog_wording() {
        let errs = Entitlement::default().validate_body("nb");
        let messages: Vec<_> = errs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            ["id er påkrevd.", "name er påkrevd.", "tenant_id er påkrevd."]
        );
        assert!(errs
            .iter()
            .all(|e| e.loc == Location::Body && e.code == "required"));
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let errs = Entitlement::default().validate_body("de");
        assert_eq!(errs[1].message, "name is required.");
    }
}
