//! JSON export of the classified dashboard view.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use super::badge::format_ms;
use super::fleet::{FleetData, TeamFilter};
use super::team::TeamRegistry;

/// Build the export document for `data` as seen through `filter`.
pub fn build_export(data: &FleetData, filter: &TeamFilter, registry: &TeamRegistry) -> Value {
    let visible = data.visible_rows(filter, registry);

    let summary = json!({
        "timestamp": data.timestamp,
        "total": data.total,
        "healthy": data.healthy,
        "unhealthy": data.unhealthy,
        "health_percent": data.percent,
        "health_tier": data.percent_tier(),
        "team_filter": filter.to_string(),
        "team_filter_label": filter.label(registry),
        "visible": visible.len(),
        "warnings": data.warnings,
    });

    let sprites: Vec<Value> = visible
        .iter()
        .map(|row| {
            json!({
                "name": row.sprite.name,
                "team": row.team,
                "healthy": row.sprite.healthy,
                "health_label": row.health.label,
                "api_status": row.sprite.api_status,
                "api_status_tier": row.status_tier,
                "api_response_ms": row.sprite.api_response_ms,
                "api_response": format_ms(row.sprite.api_response_ms),
                "responsive": row.sprite.responsive,
                "probe_response_ms": row.sprite.probe_response_ms,
                "tools": [row.claude.label, row.codex.label],
            })
        })
        .collect();

    let teams: Vec<Value> = data
        .teams
        .iter()
        .map(|t| {
            json!({
                "name": t.name,
                "reporting": t.reporting,
                "healthy": t.healthy,
                "unhealthy": t.unhealthy,
                "health_percent": t.percent,
            })
        })
        .collect();

    json!({
        "summary": summary,
        "sprites": sprites,
        "teams": teams,
        "errors": data.errors,
    })
}

/// Write an export document as pretty-printed JSON.
pub fn write_export(path: &Path, export: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(export)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FleetReport;

    fn sample_data() -> FleetData {
        let report = FleetReport::parse(
            r#"{
                "timestamp": "2026-01-12T09:30:00Z",
                "total": 3,
                "healthy": 2,
                "unhealthy": 1,
                "sprites": [
                    { "name": "agents-synth-01", "api_status": "warm", "api_response_ms": 88,
                      "claude_available": true, "codex_available": null, "healthy": true },
                    { "name": "dev-workspace-01", "api_status": "cold", "healthy": false },
                    { "name": "mobile-worker-01", "api_status": "running", "healthy": true }
                ],
                "errors": [
                    { "sprite": "infra-bootstrap-01", "status": "error", "error": null }
                ]
            }"#,
        )
        .unwrap();
        FleetData::from_report(report, &TeamRegistry::default())
    }

    #[test]
    fn test_export_all() {
        let registry = TeamRegistry::default();
        let export = build_export(&sample_data(), &TeamFilter::All, &registry);

        assert_eq!(export["summary"]["health_percent"], 67);
        assert_eq!(export["summary"]["health_tier"], "warning");
        assert_eq!(export["summary"]["team_filter_label"], "All Teams");
        assert_eq!(export["sprites"].as_array().unwrap().len(), 3);

        let synth = &export["sprites"][0];
        assert_eq!(synth["health_label"], "Healthy");
        assert_eq!(synth["api_status_tier"], "positive");
        assert_eq!(synth["api_response"], "88ms");
        assert_eq!(synth["tools"][1], "codex: ?");

        let dev = &export["sprites"][1];
        assert_eq!(dev["health_label"], "cold");
        assert!(dev["api_response_ms"].is_null());
        assert_eq!(dev["api_response"], "—");

        assert_eq!(export["errors"][0]["sprite"], "infra-bootstrap-01");
    }

    #[test]
    fn test_export_filtered() {
        let registry = TeamRegistry::default();
        let filter = TeamFilter::Team("dev".to_string());
        let export = build_export(&sample_data(), &filter, &registry);

        assert_eq!(export["summary"]["team_filter"], "dev");
        assert_eq!(export["summary"]["visible"], 1);
        assert_eq!(export["sprites"][0]["name"], "dev-workspace-01");
        // Fleet-wide numbers are not narrowed by the filter
        assert_eq!(export["summary"]["total"], 3);
    }

    #[test]
    fn test_write_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet_export.json");
        let export = build_export(&sample_data(), &TeamFilter::All, &TeamRegistry::default());

        write_export(&path, &export).unwrap();

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, export);
    }
}
