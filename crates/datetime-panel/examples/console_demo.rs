//! Console demo: builds the three panels and replays a few edits.
//!
//! Run with `RUST_LOG=datetime_panel=debug` to see field and composition
//! events. The configuration comes from the environment, e.g.
//! `DATETIME_PANEL_LOCALE=de-DE` or `DATETIME_PANEL_12HOUR=true`.

use std::sync::Arc;

use chrono::NaiveDate;
use datetime_panel::prelude::*;
use datetime_panel::FieldAppearance;
use parking_lot::Mutex;

/// Prints placements instead of laying out real components.
struct PrintingSink {
    indent: usize,
}

impl LayoutSink for PrintingSink {
    fn place(&mut self, component: &Component, constraints: &str) {
        let name = component.to_string();
        println!("{:indent$}{name:<28} [{constraints}]", "", indent = self.indent);
    }
}

/// Prints appearance changes as they arrive.
struct PrintingAppearance;

impl AppearanceSink for PrintingAppearance {
    fn mark_invalid(&self, field: FieldId) {
        println!("    {field} -> {:?}", FieldAppearance::Invalid);
    }

    fn mark_normal(&self, field: FieldId) {
        println!("    {field} -> {:?}", FieldAppearance::Normal);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = PanelConfig::from_env();
    let messages = config.messages();
    println!("Locale: {}", messages.locale().identifier);
    println!();

    let start = NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|date| date.and_hms_opt(13, 30, 0))
        .ok_or_else(|| PanelError::config("demo start value out of range"))?;

    let mut panel = DateTimePanel::new(start, &config)?;

    println!("Layout ({}):", panel.layout_constraints());
    panel.lay_out(&mut PrintingSink { indent: 2 });
    println!("  date panel ({}):", panel.date_panel().layout_constraints());
    panel.date_panel().lay_out(&mut PrintingSink { indent: 4 });
    println!("  time panel ({}):", panel.time_panel().layout_constraints());
    panel.time_panel().lay_out(&mut PrintingSink { indent: 4 });
    println!();

    let edits = Arc::new(Mutex::new(Vec::new()));
    let edits_clone = edits.clone();
    panel.on_change(move |change| edits_clone.lock().push(change.clone()));
    panel.connect_appearance(Arc::new(PrintingAppearance));

    let script = [
        (FieldId::Day, "31"),
        (FieldId::Month, "2"),
        (FieldId::Day, "29"),
        (FieldId::Minute, "0"),
        (FieldId::Minute, "05"),
        (FieldId::Hour, "25"),
        (FieldId::Hour, "7"),
    ];

    println!("Edits:");
    for (field, text) in script {
        println!("  {field} := {text:?}");
        panel.set_text(field, text);
        match panel.value() {
            Ok(value) => println!("    value: {value}"),
            Err(err) => println!("    invalid: {err}"),
        }
    }

    if panel.time_panel().hour_mode().is_12_hour() {
        println!("  meridiem := PM");
        panel.time_panel_mut().set_meridiem(Meridiem::Pm);
        match panel.value() {
            Ok(value) => println!("    value: {value}"),
            Err(err) => println!("    invalid: {err}"),
        }
    }

    println!();
    println!("{} change notifications", edits.lock().len());
    Ok(())
}
