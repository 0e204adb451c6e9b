//! Pilot credentials.
//!
//! This module defines the set of registrations and certificates a pilot can
//! hold. The set is plain data passed by value into the eligibility evaluator;
//! it is never stored and carries no session state.

use serde::{Deserialize, Serialize};

/// The credentials a pilot holds.
///
/// All six flags default to false. `a1a3_training` is carried for
/// completeness but is optional under the evaluated ruleset: no subcategory
/// requires it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSet {
    /// CAA Operator ID (registration of the operator).
    pub operator_id: bool,
    /// Flyer ID (online basic theory test).
    pub flyer_id: bool,
    /// A1/A3 training certificate (optional).
    pub a1a3_training: bool,
    /// A2 Certificate of Competency.
    pub a2_cofc: bool,
    /// General VLOS Certificate.
    pub gvc: bool,
    /// Operational Authorisation.
    pub oa: bool,
}

impl CredentialSet {
    /// A credential set with nothing held.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Return a copy with the Operator ID held.
    #[must_use]
    pub fn with_operator_id(mut self) -> Self {
        self.operator_id = true;
        self
    }

    /// Return a copy with the Flyer ID held.
    #[must_use]
    pub fn with_flyer_id(mut self) -> Self {
        self.flyer_id = true;
        self
    }

    /// Return a copy with the A1/A3 training certificate held.
    #[must_use]
    pub fn with_a1a3_training(mut self) -> Self {
        self.a1a3_training = true;
        self
    }

    /// Return a copy with the A2 CofC held.
    #[must_use]
    pub fn with_a2_cofc(mut self) -> Self {
        self.a2_cofc = true;
        self
    }

    /// Return a copy with the GVC held.
    #[must_use]
    pub fn with_gvc(mut self) -> Self {
        self.gvc = true;
        self
    }

    /// Return a copy with the Operational Authorisation held.
    #[must_use]
    pub fn with_oa(mut self) -> Self {
        self.oa = true;
        self
    }

    /// Check whether any credential is held.
    #[must_use]
    pub fn any(&self) -> bool {
        self.operator_id
            || self.flyer_id
            || self.a1a3_training
            || self.a2_cofc
            || self.gvc
            || self.oa
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_holds_nothing() {
        let creds = CredentialSet::default();
        assert!(!creds.operator_id);
        assert!(!creds.flyer_id);
        assert!(!creds.a1a3_training);
        assert!(!creds.a2_cofc);
        assert!(!creds.gvc);
        assert!(!creds.oa);
        assert!(!creds.any());
    }

    #[test]
    fn test_none_equals_default() {
        assert_eq!(CredentialSet::none(), CredentialSet::default());
    }

    #[test]
    fn test_with_builders() {
        let creds = CredentialSet::none()
            .with_operator_id()
            .with_flyer_id()
            .with_gvc()
            .with_oa();
        assert!(creds.operator_id);
        assert!(creds.flyer_id);
        assert!(creds.gvc);
        assert!(creds.oa);
        assert!(!creds.a2_cofc);
        assert!(!creds.a1a3_training);
        assert!(creds.any());
    }

    #[test]
    fn test_single_credential_is_any() {
        assert!(CredentialSet::none().with_a2_cofc().any());
        assert!(CredentialSet::none().with_a1a3_training().any());
    }

    #[test]
    fn test_serde_round_trip() {
        let creds = CredentialSet::none().with_operator_id().with_a2_cofc();
        let json = serde_json::to_string(&creds).unwrap();
        let back: CredentialSet = serde_json::from_str(&json).unwrap();
        assert_eq!(creds, back);
    }

    #[test]
    fn test_deserialize_partial() {
        // Missing fields default to false
        let creds: CredentialSet = serde_json::from_str(r#"{"flyer_id": true}"#).unwrap();
        assert!(creds.flyer_id);
        assert!(!creds.operator_id);
    }
}
