//! Control listing command

use anyhow::Result;
use serde::Serialize;
use veil_overlay::{ControlKind, ControlPanel};

use super::load_config;

#[derive(Serialize)]
struct ControlRow {
    id: String,
    label: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<f32>,
    value: String,
}

pub fn run(config_path: Option<&str>, format: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let panel = ControlPanel::new(config.orb_count);
    let values = panel.display_values(&config);

    let rows: Vec<ControlRow> = panel
        .controls()
        .iter()
        .zip(values)
        .map(|(spec, (_, value))| {
            let (kind, min, max, step) = match spec.kind {
                ControlKind::Range { min, max, step } => {
                    ("range", Some(min), Some(max), Some(step))
                }
                ControlKind::Color => ("color", None, None, None),
            };
            ControlRow {
                id: spec.id.clone(),
                label: spec.label.clone(),
                kind,
                min,
                max,
                step,
                value,
            }
        })
        .collect();

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "text" => {
            for row in &rows {
                match (row.min, row.max, row.step) {
                    (Some(min), Some(max), Some(step)) => println!(
                        "{:<12} {:<18} {} [{} .. {}, step {}]",
                        row.id, row.label, row.value, min, max, step
                    ),
                    _ => println!("{:<12} {:<18} {}", row.id, row.label, row.value),
                }
            }
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }

    Ok(())
}
