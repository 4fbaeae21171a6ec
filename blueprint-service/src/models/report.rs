//! Compliance report and validation result schemas.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Date format the report viewer displays.
pub const UPLOAD_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Deserialize)]
pub struct ValidationResult {
    pub result: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub summary: ReportSummary,
    #[serde(default)]
    pub blueprint: Option<Value>,
    pub results: Vec<ReportCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub compliant: u32,
    pub violations: u32,
    pub warnings: u32,
    pub total_checks: u32,
}

#[derive(Debug, Deserialize)]
pub struct ReportCategory {
    pub category: String,
    pub status: String,
    pub items: Vec<ReportItem>,
}

#[derive(Debug, Deserialize)]
pub struct ReportItem {
    pub id: Value,
    pub check: String,
    pub status: String,
    pub finding: String,
    #[serde(default)]
    pub blueprint: Option<String>,
    #[serde(default)]
    pub policy: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
}

impl ComplianceReport {
    pub fn check(&self) -> Result<(), String> {
        let items: usize = self.results.iter().map(|c| c.items.len()).sum();
        if items == 0 {
            return Err("report contains no checks".to_string());
        }
        if let Some(blueprint) = &self.blueprint {
            if !blueprint.is_object() {
                return Err("blueprint must be an object".to_string());
            }
        }
        Ok(())
    }
}

/// Fill in `blueprint.name` and `blueprint.uploadDate` when the model left
/// them out. Values the model supplied are kept.
pub fn stamp_blueprint(report: &mut Value, file_name: Option<&str>, today: NaiveDate) {
    let Some(root) = report.as_object_mut() else {
        return;
    };

    let blueprint = root
        .entry("blueprint")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(blueprint) = blueprint.as_object_mut() else {
        return;
    };

    if let Some(name) = file_name {
        blueprint
            .entry("name")
            .or_insert_with(|| Value::String(name.to_string()));
    }
    blueprint
        .entry("uploadDate")
        .or_insert_with(|| Value::String(today.format(UPLOAD_DATE_FORMAT).to_string()));
}
