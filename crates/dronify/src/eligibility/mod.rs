//! Open-category eligibility evaluation.
//!
//! This module answers the central question of the crate: which Open
//! category subcategories (and the Specific authorisation route) a given
//! drone can be flown under, at which rule epoch, with which credentials.
//!
//! - **Decision tables**: per-subcategory applicability and requirement
//!   derivation, parameterised over configurable mass thresholds.
//!
//! - **Evaluator**: a pure function from (record, credentials, epoch) to a
//!   typed per-subcategory verdict; rendering is someone else's job.
//!
//! # Example
//!
//! ```
//! use dronify::credentials::CredentialSet;
//! use dronify::eligibility::{Epoch, Evaluator, Requirement};
//!
//! let evaluator = Evaluator::new();
//! let drone: dronify::catalogue::DroneRecord =
//!     serde_yaml::from_str("model_key: mini\nmtom_g_nominal: 249").unwrap();
//!
//! let assessment = evaluator.evaluate(&drone, CredentialSet::none(), Epoch::Now);
//! assert!(assessment.a1.applicable);
//! assert!(assessment.a1.is_missing(Requirement::OperatorId));
//! ```

mod evaluator;
mod rules;

pub use evaluator::{Assessment, Epoch, Evaluator, Requirement, Subcategory, Verdict};
pub use rules::{
    a1_applicable, a2_applicable, a3_applicable, remote_id_required, requirements, RuleThresholds,
};
