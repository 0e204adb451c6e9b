//! Regulatory decision tables.
//!
//! This module holds the raw rule content of the Open-category framework:
//! which subcategories exist for a drone at a given epoch, and which
//! requirements each one carries. The mass thresholds the tables pivot on
//! are configuration, not literals; the published figures have shifted
//! between rule revisions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalogue::{DroneRecord, EuClass, UkClass};
use crate::error::{Error, Result};

use super::evaluator::{Epoch, Requirement, Subcategory};

/// Mass thresholds the decision tables pivot on, in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleThresholds {
    /// Below this mass, camera drones are exempt from Operator/Flyer ID
    /// registration and from the 2028 Remote ID mandate.
    pub id_exempt_below_g: u32,
    /// A1 is open to drones at or below this mass.
    pub a1_mass_limit_g: u32,
    /// Transitional A2 allowance for unclassed drones at or below this
    /// mass; expires when the 2026 rules land.
    pub a2_transitional_limit_g: u32,
    /// A2 via an EU C2 marking during the bridge window, up to this mass.
    pub a2_bridge_mass_limit_g: u32,
    /// A3 is open to drones strictly below this mass.
    pub a3_mass_limit_g: u32,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            id_exempt_below_g: 100,
            a1_mass_limit_g: 250,
            a2_transitional_limit_g: 2_000,
            a2_bridge_mass_limit_g: 4_000,
            a3_mass_limit_g: 25_000,
        }
    }
}

impl RuleThresholds {
    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error unless the thresholds are non-zero and strictly
    /// increasing from the ID exemption up to the A3 limit.
    pub fn validate(&self) -> Result<()> {
        if self.id_exempt_below_g == 0 {
            return Err(Error::config_validation(
                "id_exempt_below_g must be greater than 0",
            ));
        }
        let ordered = [
            ("id_exempt_below_g", self.id_exempt_below_g),
            ("a1_mass_limit_g", self.a1_mass_limit_g),
            ("a2_transitional_limit_g", self.a2_transitional_limit_g),
            ("a2_bridge_mass_limit_g", self.a2_bridge_mass_limit_g),
            ("a3_mass_limit_g", self.a3_mass_limit_g),
        ];
        for pair in ordered.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if lower >= upper {
                return Err(Error::config_validation(format!(
                    "{lower_name} ({lower}) must be less than {upper_name} ({upper})"
                )));
            }
        }
        Ok(())
    }
}

/// Whether A1 (close to people) exists for this drone at this epoch.
///
/// Open to very light drones outright, to sub-250 g drones, to UK0/UK1
/// marked drones, and to EU C0/C1 marked drones while the UK recognizes EU
/// markings (the bridge window).
#[must_use]
pub fn a1_applicable(drone: &DroneRecord, epoch: Epoch, thresholds: &RuleThresholds) -> bool {
    drone.mass_below(thresholds.id_exempt_below_g)
        || drone.mass_at_most(thresholds.a1_mass_limit_g)
        || matches!(drone.uk_class_marking, Some(UkClass::Uk0 | UkClass::Uk1))
        || (epoch.in_bridge_window()
            && matches!(drone.eu_class_marking, Some(EuClass::C0 | EuClass::C1)))
}

/// Whether A2 (close with A2 CofC) exists for this drone at this epoch.
///
/// UK2 marked drones qualify outright; EU C2 drones qualify during the
/// bridge window up to the bridge mass limit; unclassed legacy drones in
/// the 250 g to 2 kg bracket keep a transitional allowance until the 2026
/// rules land. Lighter drones never need A2; they are A1 territory.
#[must_use]
pub fn a2_applicable(drone: &DroneRecord, epoch: Epoch, thresholds: &RuleThresholds) -> bool {
    matches!(drone.uk_class_marking, Some(UkClass::Uk2))
        || (epoch.in_bridge_window()
            && drone.eu_class_marking == Some(EuClass::C2)
            && drone.mass_at_most(thresholds.a2_bridge_mass_limit_g))
        || (epoch == Epoch::Now
            && drone.is_unclassed()
            && drone.mass_over(thresholds.a1_mass_limit_g)
            && drone.mass_at_most(thresholds.a2_transitional_limit_g))
}

/// Whether A3 (far from people) exists for this drone at this epoch.
#[must_use]
pub fn a3_applicable(drone: &DroneRecord, epoch: Epoch, thresholds: &RuleThresholds) -> bool {
    drone.mass_below(thresholds.a3_mass_limit_g)
        || matches!(drone.uk_class_marking, Some(UkClass::Uk3 | UkClass::Uk4))
        || (epoch.in_bridge_window()
            && matches!(
                drone.eu_class_marking,
                Some(EuClass::C2 | EuClass::C3 | EuClass::C4)
            ))
}

/// Whether Remote ID broadcast is mandated for this drone at this epoch.
///
/// Not mandated under today's rules. From 2026 it attaches to the class
/// marking; from 2028 it attaches to any camera drone over the ID exemption
/// mass.
#[must_use]
pub fn remote_id_required(
    drone: &DroneRecord,
    epoch: Epoch,
    thresholds: &RuleThresholds,
) -> bool {
    match epoch {
        Epoch::Now => false,
        Epoch::Y2026 => {
            matches!(
                drone.uk_class_marking,
                Some(UkClass::Uk1 | UkClass::Uk2 | UkClass::Uk3 | UkClass::Uk5 | UkClass::Uk6)
            ) || matches!(
                drone.eu_class_marking,
                Some(EuClass::C1 | EuClass::C2 | EuClass::C3)
            )
        }
        Epoch::Y2028 => drone.has_camera && drone.mass_over(thresholds.id_exempt_below_g),
    }
}

/// The full requirement set for one subcategory of one drone at one epoch.
///
/// This is what must be present for the subcategory to be satisfied; the
/// evaluator subtracts what the pilot and airframe actually have.
#[must_use]
pub fn requirements(
    subcategory: Subcategory,
    drone: &DroneRecord,
    epoch: Epoch,
    thresholds: &RuleThresholds,
) -> BTreeSet<Requirement> {
    let mut required = BTreeSet::new();

    // Registration attaches to camera drones over the exemption mass.
    let registration_applies =
        drone.has_camera && drone.mass_at_least(thresholds.id_exempt_below_g);
    if registration_applies {
        required.insert(Requirement::OperatorId);
        required.insert(Requirement::FlyerId);
    }

    match subcategory {
        Subcategory::A1 | Subcategory::A3 => {}
        Subcategory::A2 => {
            required.insert(Requirement::A2Cofc);
        }
        Subcategory::Specific => {
            // The authorisation route always needs a Flyer ID, even under
            // the exemption mass.
            required.insert(Requirement::FlyerId);
            required.insert(Requirement::Gvc);
            required.insert(Requirement::Oa);
        }
    }

    if remote_id_required(drone, epoch, thresholds) {
        required.insert(Requirement::RemoteId);
    }
    if !drone.geo_awareness.is_yes() {
        required.insert(Requirement::GeoAwareness);
    }

    required
}
