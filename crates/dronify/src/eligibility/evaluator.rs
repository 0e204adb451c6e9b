//! The eligibility evaluator.
//!
//! Pure mapping from (drone record, credential set, epoch) to a per-
//! subcategory verdict. No I/O, no side effects; missing data degrades to
//! "not eligible" or "requirement missing", never to a panic.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::catalogue::DroneRecord;
use crate::credentials::CredentialSet;

use super::rules::{self, RuleThresholds};

/// The three rule epochs a flight can be assessed under.
///
/// `Y2026` covers 2026 through 2027, the window in which the UK still recognizes EU
/// class markings; `Y2028` is after that window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Epoch {
    /// The rules in force today.
    Now,
    /// The rules arriving in 2026 (through 2027).
    Y2026,
    /// The rules planned from 2028.
    Y2028,
}

impl Epoch {
    /// All epochs in chronological order.
    pub const ALL: [Self; 3] = [Self::Now, Self::Y2026, Self::Y2028];

    /// Whether this epoch falls inside the UK/EU class-marking bridge
    /// window (2026 through 2027).
    #[must_use]
    pub fn in_bridge_window(&self) -> bool {
        matches!(self, Self::Y2026)
    }

    /// Fold a calendar year onto an epoch.
    #[must_use]
    pub fn from_year(year: i32) -> Self {
        if year < 2026 {
            Self::Now
        } else if year <= 2027 {
            Self::Y2026
        } else {
            Self::Y2028
        }
    }

    /// Short display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Now => "now",
            Self::Y2026 => "2026",
            Self::Y2028 => "2028",
        }
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Epoch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// The four routes a flight can be flown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Subcategory {
    /// Open category A1: close to people.
    A1,
    /// Open category A2: close to people with an A2 CofC.
    A2,
    /// Open category A3: far from people.
    A3,
    /// Specific category: authorised operations under an OA with a GVC.
    Specific,
}

impl Subcategory {
    /// All subcategories in display order.
    pub const ALL: [Self; 4] = [Self::A1, Self::A2, Self::A3, Self::Specific];

    /// Short code ("A1", "Specific").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::Specific => "Specific",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Subcategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// A single requirement a subcategory can carry.
///
/// Credential requirements are satisfied by the pilot; hardware
/// requirements (Remote ID, geo-awareness) by the airframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// CAA Operator ID registration.
    OperatorId,
    /// Flyer ID (basic theory test).
    FlyerId,
    /// A2 Certificate of Competency.
    A2Cofc,
    /// General VLOS Certificate.
    Gvc,
    /// Operational Authorisation.
    Oa,
    /// Built-in Remote ID broadcast.
    RemoteId,
    /// Onboard geo-awareness.
    GeoAwareness,
}

impl Requirement {
    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::OperatorId => "Operator ID",
            Self::FlyerId => "Flyer ID",
            Self::A2Cofc => "A2 CofC",
            Self::Gvc => "GVC",
            Self::Oa => "OA",
            Self::RemoteId => "Remote ID",
            Self::GeoAwareness => "Geo-awareness",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome for one subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the subcategory exists at all for this drone and epoch.
    pub applicable: bool,
    /// Whether every requirement is met. Only meaningful when applicable.
    pub satisfied: bool,
    /// Requirements that are required but not present.
    pub missing: BTreeSet<Requirement>,
}

impl Verdict {
    /// A verdict for a subcategory the drone cannot use at all.
    ///
    /// No satisfaction check is attempted for it; the missing set stays
    /// empty.
    #[must_use]
    pub fn not_applicable() -> Self {
        Self {
            applicable: false,
            satisfied: false,
            missing: BTreeSet::new(),
        }
    }

    /// A verdict for an applicable subcategory with the given gaps.
    #[must_use]
    pub fn assessed(missing: BTreeSet<Requirement>) -> Self {
        Self {
            applicable: true,
            satisfied: missing.is_empty(),
            missing,
        }
    }

    /// Check whether a specific requirement is among the gaps.
    #[must_use]
    pub fn is_missing(&self, requirement: Requirement) -> bool {
        self.missing.contains(&requirement)
    }
}

/// The verdicts of one evaluation, one per subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    /// Verdict for A1.
    pub a1: Verdict,
    /// Verdict for A2.
    pub a2: Verdict,
    /// Verdict for A3.
    pub a3: Verdict,
    /// Verdict for the Specific category.
    pub specific: Verdict,
}

impl Assessment {
    /// The verdict for a given subcategory.
    #[must_use]
    pub fn get(&self, subcategory: Subcategory) -> &Verdict {
        match subcategory {
            Subcategory::A1 => &self.a1,
            Subcategory::A2 => &self.a2,
            Subcategory::A3 => &self.a3,
            Subcategory::Specific => &self.specific,
        }
    }

    /// Iterate over subcategory/verdict pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Subcategory, &Verdict)> {
        Subcategory::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}

/// Eligibility evaluator over a fixed set of rule thresholds.
#[derive(Debug, Clone)]
pub struct Evaluator {
    thresholds: RuleThresholds,
}

impl Evaluator {
    /// Create an evaluator with the default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_thresholds(RuleThresholds::default())
    }

    /// Create an evaluator with custom thresholds.
    #[must_use]
    pub fn with_thresholds(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds in use.
    #[must_use]
    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Evaluate a drone against a credential set at one epoch.
    #[must_use]
    pub fn evaluate(
        &self,
        drone: &DroneRecord,
        credentials: CredentialSet,
        epoch: Epoch,
    ) -> Assessment {
        Assessment {
            a1: self.verdict(Subcategory::A1, drone, credentials, epoch),
            a2: self.verdict(Subcategory::A2, drone, credentials, epoch),
            a3: self.verdict(Subcategory::A3, drone, credentials, epoch),
            specific: self.verdict(Subcategory::Specific, drone, credentials, epoch),
        }
    }

    fn verdict(
        &self,
        subcategory: Subcategory,
        drone: &DroneRecord,
        credentials: CredentialSet,
        epoch: Epoch,
    ) -> Verdict {
        let applicable = match subcategory {
            Subcategory::A1 => rules::a1_applicable(drone, epoch, &self.thresholds),
            Subcategory::A2 => rules::a2_applicable(drone, epoch, &self.thresholds),
            Subcategory::A3 => rules::a3_applicable(drone, epoch, &self.thresholds),
            // The authorisation route is the structural catch-all.
            Subcategory::Specific => true,
        };
        if !applicable {
            return Verdict::not_applicable();
        }

        let missing = rules::requirements(subcategory, drone, epoch, &self.thresholds)
            .into_iter()
            .filter(|&r| !Self::holds(drone, credentials, r))
            .collect();
        Verdict::assessed(missing)
    }

    /// Whether a requirement is actually present, from whichever side
    /// (pilot or airframe) supplies it.
    fn holds(drone: &DroneRecord, credentials: CredentialSet, requirement: Requirement) -> bool {
        match requirement {
            Requirement::OperatorId => credentials.operator_id,
            Requirement::FlyerId => credentials.flyer_id,
            Requirement::A2Cofc => credentials.a2_cofc,
            Requirement::Gvc => credentials.gvc,
            Requirement::Oa => credentials.oa,
            Requirement::RemoteId => drone.remote_id_builtin.is_yes(),
            Requirement::GeoAwareness => drone.geo_awareness.is_yes(),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
