use chrono::{DateTime, Utc};
use pkg_types::spinapp::SpinApp;
use std::io::{self, Write};

/// Print apps as a table, `kubectl get` style.
pub fn print_apps<W: Write>(out: &mut W, apps: &[SpinApp], now: DateTime<Utc>) -> io::Result<()> {
    if apps.is_empty() {
        return writeln!(out, "(no apps found)");
    }

    writeln!(
        out,
        "{:<32} {:<6} {:<8} {:<24} {}",
        "NAME", "READY", "DESIRED", "EXECUTOR", "AGE"
    )?;
    for app in apps {
        let age = app
            .metadata
            .creation_timestamp
            .map(|created| format_age(now - created))
            .unwrap_or_else(|| "<unknown>".to_string());
        writeln!(
            out,
            "{:<32} {:<6} {:<8} {:<24} {}",
            app.metadata.name,
            app.ready_replicas(),
            app.desired_replicas(),
            app.spec.executor,
            age
        )?;
    }
    Ok(())
}

fn format_age(age: chrono::Duration) -> String {
    let secs = age.num_seconds().max(0);
    match secs {
        s if s < 60 => format!("{}s", s),
        s if s < 60 * 60 => format!("{}m", s / 60),
        s if s < 48 * 60 * 60 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86400),
    }
}
