use std::fmt;

use shared::domain::RiskEntry;

use crate::model::DashboardViewModel;

pub const TITLE: &str = "AI RMF Attestation Dashboard";
pub const STATUS_HEADING: &str = "RMF Status";
pub const REGISTER_HEADING: &str = "Risk Register";
pub const NO_RISKS_PLACEHOLDER: &str = "No risks yet.";

/// Plain-text report of a view model.
pub struct TextReport<'a>(pub &'a DashboardViewModel);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;

        writeln!(f, "{TITLE}")?;
        writeln!(f)?;
        writeln!(f, "{STATUS_HEADING}")?;
        for (stage, status) in &view.stage_status {
            writeln!(
                f,
                "  {}: {}",
                stage.as_str().to_uppercase(),
                Blank(status.as_ref())
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{REGISTER_HEADING}")?;
        if view.risks.is_empty() {
            return writeln!(f, "  {NO_RISKS_PLACEHOLDER}");
        }
        for risk in &view.risks {
            write_risk(f, risk)?;
        }
        Ok(())
    }
}

fn write_risk(f: &mut fmt::Formatter<'_>, risk: &RiskEntry) -> fmt::Result {
    writeln!(
        f,
        "  - {}: {} (Impact: {}, Likelihood: {})",
        Blank(risk.name.as_ref()),
        Blank(risk.description.as_ref()),
        Blank(risk.impact.as_ref()),
        Blank(risk.likelihood.as_ref()),
    )
}

/// Displays an absent value as empty text.
struct Blank<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for Blank<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => Ok(()),
        }
    }
}

pub fn render_text(view: &DashboardViewModel) -> String {
    TextReport(view).to_string()
}

/// Pretty JSON of the view. Risk rows keep their delivered `id` and any
/// fields the dashboard does not read.
pub fn render_json(view: &DashboardViewModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}

#[cfg(test)]
mod tests {
    use shared::domain::{RiskScore, Stage};

    use super::*;

    fn scenario_view() -> DashboardViewModel {
        DashboardViewModel {
            stage_status: [
                (Stage::Manage, Some("not_started".to_string())),
                (Stage::Govern, Some("in_review".to_string())),
                (Stage::Measure, Some("complete".to_string())),
                (Stage::Map, Some("complete".to_string())),
            ]
            .into_iter()
            .collect(),
            risks: vec![RiskEntry::new(
                "Data drift",
                "Model degrades over time",
                "high",
                "medium",
            )],
        }
    }

    #[test]
    fn renders_stages_uppercased_in_stage_order() {
        let text = render_text(&scenario_view());
        let expected = "\
AI RMF Attestation Dashboard

RMF Status
  GOVERN: in_review
  MAP: complete
  MEASURE: complete
  MANAGE: not_started

Risk Register
  - Data drift: Model degrades over time (Impact: high, Likelihood: medium)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_register_renders_placeholder_only() {
        let mut view = scenario_view();
        view.risks.clear();

        let text = render_text(&view);
        assert!(text.ends_with("Risk Register\n  No risks yet.\n"));
        assert!(!text.contains("  - "));
    }

    #[test]
    fn empty_view_renders_headings_and_placeholder() {
        let text = render_text(&DashboardViewModel::empty());
        assert_eq!(
            text,
            "AI RMF Attestation Dashboard\n\nRMF Status\n\nRisk Register\n  No risks yet.\n"
        );
    }

    #[test]
    fn absent_fields_render_as_blank_text() {
        let view = DashboardViewModel {
            stage_status: [(Stage::Map, None)].into_iter().collect(),
            risks: vec![RiskEntry {
                name: Some("Orphan".into()),
                impact: Some(RiskScore::from(4)),
                ..RiskEntry::default()
            }],
        };

        let text = render_text(&view);
        assert!(text.contains("  MAP: \n"));
        assert!(text.contains("  - Orphan:  (Impact: 4, Likelihood: )\n"));
    }

    #[test]
    fn risks_render_in_register_order() {
        let view = DashboardViewModel {
            stage_status: Default::default(),
            risks: vec![
                RiskEntry::new("A", "first", "low", "low"),
                RiskEntry::new("B", "second", "low", "low"),
            ],
        };

        let text = render_text(&view);
        let a = text.find("- A:").expect("A rendered");
        let b = text.find("- B:").expect("B rendered");
        assert!(a < b);
    }

    #[test]
    fn json_keys_stages_by_lowercase_name() {
        let json = render_json(&scenario_view()).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value["stage_status"]["govern"], "in_review");
        assert_eq!(value["stage_status"]["manage"], "not_started");
        assert_eq!(value["risks"][0]["name"], "Data drift");
        assert_eq!(value["risks"][0]["impact"], "high");
    }
}
