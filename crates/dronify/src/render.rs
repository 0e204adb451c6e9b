//! Presentation of assessments.
//!
//! The evaluator returns typed verdicts; this module turns them into the
//! things a terminal shows. Rendering is deliberately separate so other
//! front ends can consume [`Assessment`] values directly.

use std::fmt::Write as _;

use serde::{Serialize, Serializer};

use crate::catalogue::DroneRecord;
use crate::eligibility::{Assessment, Epoch, Subcategory, Verdict};

/// Display status of one subcategory verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every requirement is met.
    Allowed,
    /// Reachable, but requirements are outstanding.
    Possible,
    /// The authorisation route, with its paperwork outstanding.
    Available,
    /// The drone cannot use this subcategory at all.
    NotApplicable,
}

impl Status {
    /// Derive the display status of a verdict.
    #[must_use]
    pub fn for_verdict(subcategory: Subcategory, verdict: &Verdict) -> Self {
        if !verdict.applicable {
            Self::NotApplicable
        } else if verdict.satisfied {
            Self::Allowed
        } else if subcategory == Subcategory::Specific {
            Self::Available
        } else {
            Self::Possible
        }
    }

    /// The badge text shown next to a subcategory.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Allowed => "Allowed",
            Self::Possible => "Possible (additional requirements)",
            Self::Available => "Available via OA/GVC",
            Self::NotApplicable => "Not applicable",
        }
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Display title of a subcategory.
#[must_use]
pub fn subcategory_title(subcategory: Subcategory) -> &'static str {
    match subcategory {
        Subcategory::A1 => "A1 — Close to people",
        Subcategory::A2 => "A2 — Close with A2 CofC",
        Subcategory::A3 => "A3 — Far from people",
        Subcategory::Specific => "Specific — OA / GVC",
    }
}

/// Render the key attributes of a record.
#[must_use]
pub fn render_record(record: &DroneRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.marketing_name);
    let _ = writeln!(out, "  Model key:     {}", record.model_key);
    let _ = writeln!(out, "  Segment:       {}", record.segment);
    let _ = writeln!(out, "  Series:        {}", record.series);
    let mass = record
        .mtom_g_nominal
        .map_or_else(|| "unknown".to_string(), |m| format!("{m} g"));
    let _ = writeln!(out, "  MTOW:          {mass}");
    let eu = record
        .eu_class_marking
        .map_or("unmarked", |c| c.as_str());
    let uk = record
        .uk_class_marking
        .map_or("unmarked", |c| c.as_str());
    let _ = writeln!(out, "  EU class:      {eu}");
    let _ = writeln!(out, "  UK class:      {uk}");
    let camera = if record.has_camera { "yes" } else { "no" };
    let _ = writeln!(out, "  Camera:        {camera}");
    let _ = writeln!(out, "  Remote ID:     {}", record.remote_id_builtin);
    let _ = writeln!(out, "  Geo-awareness: {}", record.geo_awareness);
    if let Some(year) = record.year_released {
        let _ = writeln!(out, "  Released:      {year}");
    }
    if let Some(notes) = &record.notes {
        let _ = writeln!(out, "  Notes:         {notes}");
    }
    out
}

/// Render one epoch's four verdicts as an indented block.
#[must_use]
pub fn render_column(epoch: Epoch, assessment: &Assessment) -> String {
    let mut out = String::new();
    let heading = match epoch {
        Epoch::Now => "NOW".to_string(),
        Epoch::Y2028 => format!("{epoch} (planned)"),
        Epoch::Y2026 => epoch.to_string(),
    };
    let _ = writeln!(out, "[{heading}]");
    for (subcategory, verdict) in assessment.iter() {
        let status = Status::for_verdict(subcategory, verdict);
        let _ = writeln!(
            out,
            "  {:<28} {}",
            subcategory_title(subcategory),
            status.label()
        );
        if !verdict.missing.is_empty() {
            let gaps: Vec<&str> = verdict.missing.iter().map(|r| r.label()).collect();
            let _ = writeln!(out, "      requires: {}", gaps.join(", "));
        }
    }
    out
}

/// Render a full multi-epoch view for one record.
#[must_use]
pub fn render_grid(record: &DroneRecord, entries: &[(Epoch, Assessment)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.marketing_name);
    let _ = writeln!(out, "{}", "-".repeat(record.marketing_name.len().max(8)));
    for (epoch, assessment) in entries {
        out.push_str(&render_column(*epoch, assessment));
        out.push('\n');
    }
    // Drop the trailing blank line
    if out.ends_with('\n') {
        out.pop();
    }
    out
}

/// JSON-facing view of one subcategory verdict.
#[derive(Debug, Serialize)]
pub struct SubcategoryReport<'a> {
    /// The subcategory this entry describes.
    pub subcategory: Subcategory,
    /// Derived display status.
    pub status: Status,
    /// The underlying verdict.
    #[serde(flatten)]
    pub verdict: &'a Verdict,
}

/// JSON-facing view of one epoch's assessment.
#[derive(Debug, Serialize)]
pub struct EpochReport<'a> {
    /// The epoch evaluated.
    pub epoch: Epoch,
    /// One entry per subcategory, in display order.
    pub subcategories: Vec<SubcategoryReport<'a>>,
}

/// JSON-facing view of a full evaluation.
#[derive(Debug, Serialize)]
pub struct AssessmentReport<'a> {
    /// The record's lookup key.
    pub model_key: &'a str,
    /// The record's display name.
    pub marketing_name: &'a str,
    /// One entry per evaluated epoch.
    pub epochs: Vec<EpochReport<'a>>,
}

impl<'a> AssessmentReport<'a> {
    /// Build a report for a record and its per-epoch assessments.
    #[must_use]
    pub fn new(record: &'a DroneRecord, entries: &'a [(Epoch, Assessment)]) -> Self {
        let epochs = entries
            .iter()
            .map(|(epoch, assessment)| EpochReport {
                epoch: *epoch,
                subcategories: assessment
                    .iter()
                    .map(|(subcategory, verdict)| SubcategoryReport {
                        subcategory,
                        status: Status::for_verdict(subcategory, verdict),
                        verdict,
                    })
                    .collect(),
            })
            .collect();
        Self {
            model_key: &record.model_key,
            marketing_name: &record.marketing_name,
            epochs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{TriState, UkClass};
    use crate::credentials::CredentialSet;
    use crate::eligibility::Evaluator;

    fn record() -> DroneRecord {
        DroneRecord {
            model_key: "mini-4-pro".to_string(),
            marketing_name: "DJI Mini 4 Pro".to_string(),
            segment: "consumer".to_string(),
            series: "mini".to_string(),
            mtom_g_nominal: Some(249),
            eu_class_marking: None,
            uk_class_marking: Some(UkClass::Uk0),
            has_camera: true,
            remote_id_builtin: TriState::Yes,
            geo_awareness: TriState::Yes,
            year_released: Some(2023),
            notes: None,
        }
    }

    fn entries(record: &DroneRecord, credentials: CredentialSet) -> Vec<(Epoch, Assessment)> {
        let evaluator = Evaluator::new();
        Epoch::ALL
            .into_iter()
            .map(|epoch| (epoch, evaluator.evaluate(record, credentials, epoch)))
            .collect()
    }

    #[test]
    fn test_status_for_verdict() {
        use std::collections::BTreeSet;
        use crate::eligibility::Requirement;

        let na = Verdict::not_applicable();
        assert_eq!(Status::for_verdict(Subcategory::A2, &na), Status::NotApplicable);

        let ok = Verdict::assessed(BTreeSet::new());
        assert_eq!(Status::for_verdict(Subcategory::A1, &ok), Status::Allowed);

        let gaps = Verdict::assessed(BTreeSet::from([Requirement::FlyerId]));
        assert_eq!(Status::for_verdict(Subcategory::A1, &gaps), Status::Possible);
        assert_eq!(
            Status::for_verdict(Subcategory::Specific, &gaps),
            Status::Available
        );
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Allowed.label(), "Allowed");
        assert_eq!(Status::Possible.label(), "Possible (additional requirements)");
        assert_eq!(Status::Available.label(), "Available via OA/GVC");
        assert_eq!(Status::NotApplicable.label(), "Not applicable");
    }

    #[test]
    fn test_subcategory_titles() {
        assert!(subcategory_title(Subcategory::A1).starts_with("A1"));
        assert!(subcategory_title(Subcategory::Specific).contains("OA / GVC"));
    }

    #[test]
    fn test_render_record_fields() {
        let out = render_record(&record());
        assert!(out.contains("DJI Mini 4 Pro"));
        assert!(out.contains("249 g"));
        assert!(out.contains("UK0"));
        assert!(out.contains("unmarked"));
        assert!(out.contains("Released:      2023"));
    }

    #[test]
    fn test_render_record_unknown_mass() {
        let mut r = record();
        r.mtom_g_nominal = None;
        let out = render_record(&r);
        assert!(out.contains("unknown"));
    }

    #[test]
    fn test_render_column_contains_titles_and_gaps() {
        let r = record();
        let evaluator = Evaluator::new();
        let assessment = evaluator.evaluate(&r, CredentialSet::none(), Epoch::Now);
        let out = render_column(Epoch::Now, &assessment);

        assert!(out.contains("[NOW]"));
        assert!(out.contains("A1 — Close to people"));
        assert!(out.contains("Possible (additional requirements)"));
        assert!(out.contains("requires: Operator ID, Flyer ID"));
        assert!(out.contains("Not applicable"));
    }

    #[test]
    fn test_render_column_allowed_has_no_requires_line() {
        let r = record();
        let evaluator = Evaluator::new();
        let creds = CredentialSet::none().with_operator_id().with_flyer_id();
        let assessment = evaluator.evaluate(&r, creds, Epoch::Now);
        let out = render_column(Epoch::Now, &assessment);

        let a1_line = out
            .lines()
            .find(|l| l.contains("A1 — Close to people"))
            .unwrap();
        assert!(a1_line.contains("Allowed"));
    }

    #[test]
    fn test_render_grid_all_epochs() {
        let r = record();
        let entries = entries(&r, CredentialSet::none());
        let out = render_grid(&r, &entries);

        assert!(out.contains("[NOW]"));
        assert!(out.contains("[2026]"));
        assert!(out.contains("[2028 (planned)]"));
    }

    #[test]
    fn test_report_json_shape() {
        let r = record();
        let entries = entries(&r, CredentialSet::none());
        let report = AssessmentReport::new(&r, &entries);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["model_key"], "mini-4-pro");
        assert_eq!(json["epochs"].as_array().unwrap().len(), 3);
        let first = &json["epochs"][0];
        assert_eq!(first["epoch"], "now");
        let a1 = &first["subcategories"][0];
        assert_eq!(a1["subcategory"], "A1");
        assert_eq!(a1["status"], "Possible (additional requirements)");
        assert_eq!(a1["applicable"], true);
    }
}
