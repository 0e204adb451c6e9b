//! `dronify` - Which drone flights are open to you?
//!
//! This library evaluates which UK/EU Open category subcategories (A1/A2/A3)
//! and the Specific authorisation route are available for a drone model,
//! under today's rules and the 2026/2028 rule changes, given the pilot's
//! credentials. Models come from a YAML catalogue browsed by segment and
//! series.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalogue;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod eligibility;
pub mod error;
pub mod logging;
pub mod render;
pub mod taxonomy;

pub use catalogue::{Catalogue, DroneRecord};
pub use config::Config;
pub use credentials::CredentialSet;
pub use eligibility::{Assessment, Epoch, Evaluator, Verdict};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use taxonomy::Taxonomy;
