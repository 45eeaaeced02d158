use std::str::FromStr;

use serde::Serialize;

use crate::status::{Condition, ConditionType, ResourceStatus, StatusResult};

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(thiserror::Error, Debug)]
#[error("unknown output format {0:?}, expected table, json or yaml")]
pub struct UnknownFormat(String);

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Serialisable view of one [`ResourceStatus`].
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusRow {
    pub api_version: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ResourceStatus> for StatusRow {
    fn from(s: &ResourceStatus) -> Self {
        Self {
            api_version: s.resource.api_version(),
            kind: s.resource.kind(),
            namespace: s.resource.namespace(),
            name: s.resource.name(),
            conditions: s.conditions().to_vec(),
            error: s.error().map(|e| e.to_string()),
        }
    }
}

pub fn rows(result: &StatusResult) -> Vec<StatusRow> {
    result.iter().map(StatusRow::from).collect()
}

/// Output formatting interface
pub trait Formatter {
    fn format(&self, rows: &[StatusRow]) -> Result<String, OutputError>;
}

pub struct JsonFormatter;
pub struct YamlFormatter;
pub struct TableFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, rows: &[StatusRow]) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(rows)?)
    }
}

impl Formatter for YamlFormatter {
    fn format(&self, rows: &[StatusRow]) -> Result<String, OutputError> {
        Ok(serde_yaml::to_string(rows)?)
    }
}

const TABLE_HEADERS: [&str; 5] = ["NAMESPACE", "NAME", "KIND", "READY", "REASON"];

impl Formatter for TableFormatter {
    fn format(&self, rows: &[StatusRow]) -> Result<String, OutputError> {
        if rows.is_empty() {
            return Ok("No resources found".to_string());
        }

        let cells: Vec<[String; 5]> = rows.iter().map(table_cells).collect();
        let mut widths = TABLE_HEADERS.map(str::len);
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        let mut table = String::new();
        push_row(&mut table, &TABLE_HEADERS.map(String::from), &widths);
        for row in &cells {
            push_row(&mut table, row, &widths);
        }
        Ok(table)
    }
}

fn table_cells(row: &StatusRow) -> [String; 5] {
    let namespace = row.namespace.clone().unwrap_or_else(|| "-".into());
    let (ready, reason) = match &row.error {
        Some(e) => ("-".to_string(), format!("ERROR: {}", e)),
        None => {
            let ready = row
                .conditions
                .iter()
                .find(|c| c.type_ == ConditionType::Ready);
            let terminal = row.conditions.iter().find(|c| c.type_.is_terminal());
            let status = ready
                .map(|c| c.status.to_string())
                .unwrap_or_else(|| "Unknown".into());
            let mut reason =
                ready.map(|c| c.reason.clone()).unwrap_or_default();
            if let Some(t) = terminal {
                reason = format!("{} [{}]", reason, t.type_);
            }
            (status, reason)
        }
    };
    [namespace, row.name.clone(), row.kind.clone(), ready, reason]
}

fn push_row(table: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let last = cells.len() - 1;
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            table.push_str(cell);
        } else {
            table.push_str(&format!("{:<width$}  ", cell, width = w));
        }
    }
    table.push('\n');
}

/// Get formatter for the specified output format
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Yaml => Box::new(YamlFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

pub fn render(
    result: &StatusResult,
    format: OutputFormat,
) -> Result<String, OutputError> {
    get_formatter(format).format(&rows(result))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::status::{ConditionStatus, StatusError};
    use crate::store::StoreError;
    use crate::unstructured::Unstructured;

    fn sample() -> StatusResult {
        let pod = Unstructured::try_from(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": "worker", "namespace": "qual"},
        }))
        .unwrap();
        let svc = Unstructured::try_from(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "missing"},
        }))
        .unwrap();
        StatusResult {
            resources: vec![
                ResourceStatus::evaluated(
                    pod,
                    vec![
                        Condition::new(ConditionType::Completed, "Pod Succeeded"),
                        Condition::new(
                            ConditionType::Ready,
                            "Phase: Succeeded, PodCompleted",
                        ),
                    ],
                ),
                ResourceStatus::failed(
                    svc,
                    StatusError::Fetch {
                        reference: "Service/missing".into(),
                        source: StoreError::NotFound("Service/missing".into()),
                    },
                ),
            ],
        }
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn table_lists_ready_terminal_and_errors() {
        let out = render(&sample(), OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAMESPACE"));
        assert!(lines[1].starts_with("qual"));
        assert!(lines[1].contains("True"));
        assert!(lines[1].ends_with("Phase: Succeeded, PodCompleted [Completed]"));
        assert!(lines[2].starts_with("-"));
        assert!(lines[2].ends_with(
            "ERROR: failed to fetch Service/missing: Service/missing not found"
        ));
    }

    #[test]
    fn empty_table() {
        let out = render(&StatusResult::default(), OutputFormat::Table).unwrap();
        assert_eq!(out, "No resources found");
    }

    #[test]
    fn json_view_keeps_conditions_and_errors() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v[0]["namespace"], "qual");
        assert_eq!(v[0]["conditions"][1]["type"], "Ready");
        assert_eq!(v[0]["conditions"][1]["status"], "True");
        assert!(v[0].get("error").is_none());
        assert!(v[1].get("namespace").is_none());
        assert!(v[1].get("conditions").is_none());
        assert!(v[1]["error"].as_str().unwrap().contains("not found"));
    }

    #[test]
    fn yaml_view_round_trips_status() {
        let out = render(&sample(), OutputFormat::Yaml).unwrap();
        let v: serde_json::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(v[0]["kind"], "Pod");
        let status: ConditionStatus =
            serde_json::from_value(v[0]["conditions"][0]["status"].clone()).unwrap();
        assert_eq!(status, ConditionStatus::True);
    }
}
