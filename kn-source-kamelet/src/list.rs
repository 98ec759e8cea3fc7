//! Tabular listing of Kamelets.
use chrono::{DateTime, Utc};
use comfy_table::{presets, Row, Table};
use kamelet::Kamelet;

const HEADER: [&str; 6] = ["NAME", "PHASE", "AGE", "CONDITIONS", "READY", "REASON"];

/// kubectl style age, e.g. `45s`, `12m`, `3h`, `5d` or `2y`.
pub fn age(created: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let created = match created {
        Some(created) => created,
        None => return "<unknown>".into(),
    };
    let seconds = now.signed_duration_since(created).num_seconds().max(0);
    match seconds {
        s if s < 60 => format!("{s}s"),
        s if s < 60 * 60 => format!("{}m", s / 60),
        s if s < 60 * 60 * 24 => format!("{}h", s / (60 * 60)),
        s if s < 60 * 60 * 24 * 365 => format!("{}d", s / (60 * 60 * 24)),
        s => format!("{}y", s / (60 * 60 * 24 * 365)),
    }
}

fn row(kamelet: &Kamelet, now: DateTime<Utc>) -> Row {
    let name = kamelet.metadata.name.clone().unwrap_or_default();
    let phase = kamelet.phase().unwrap_or_default().to_string();
    let created = kamelet.metadata.creation_timestamp.as_ref().map(|time| time.0);

    let (conditions, ready, reason) = match &kamelet.status {
        Some(status) => {
            let conditions = &status.conditions;
            let ready = conditions.ready();
            (
                format!("{} OK / {}", conditions.ok_count(), conditions.len()),
                ready
                    .map(|c| c.status.to_string())
                    .unwrap_or_else(|| "<unknown>".into()),
                ready.and_then(|c| c.reason.clone()).unwrap_or_default(),
            )
        }
        None => ("0 OK / 0".into(), "<unknown>".into(), String::new()),
    };

    Row::from(vec![name, phase, age(created, now), conditions, ready, reason])
}

/// Render `kamelets` in the order given, one row each.
pub fn kamelet_table(kamelets: &[Kamelet], no_headers: bool, now: DateTime<Utc>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    if !no_headers {
        table.set_header(HEADER);
    }
    for kamelet in kamelets {
        table.add_row(row(kamelet, now));
    }
    table
}
