//! Dashboard display formatting
//!
//! Envelope groups render as tables, one per card. Alerts, card dues and
//! the totals follow as plain lines.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{AlertSeverity, DashboardView, Envelope, EnvelopeGroup, StatusColor};

#[derive(Tabled)]
struct EnvelopeRow {
    #[tabled(rename = "#")]
    priority: i64,
    #[tabled(rename = "Envelope")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Missing")]
    shortfall: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

impl EnvelopeRow {
    fn new(envelope: &Envelope, symbol: &str) -> Self {
        Self {
            priority: envelope.priority(),
            name: envelope.config.name.clone(),
            category: envelope.config.category.clone(),
            target: envelope.config.target.format_with_symbol(symbol),
            actual: envelope.actual.format_with_symbol(symbol),
            shortfall: envelope.shortfall.format_with_symbol(symbol),
            progress: format!("{:>3}% {}", envelope.progress_pct, status_marker(envelope.status)),
        }
    }
}

fn status_marker(status: StatusColor) -> &'static str {
    match status {
        StatusColor::Success => "ok",
        StatusColor::Warning => "low",
        StatusColor::Danger => "EMPTY",
    }
}

fn format_groups(title: &str, groups: &[EnvelopeGroup], symbol: &str) -> String {
    let mut output = format!("{}\n", title);

    if groups.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }

    for group in groups {
        output.push_str(&format!(
            "\n{} (missing {})\n",
            group.card,
            group.total_shortfall().format_with_symbol(symbol)
        ));
        let rows: Vec<EnvelopeRow> = group
            .items
            .iter()
            .map(|e| EnvelopeRow::new(e, symbol))
            .collect();
        output.push_str(&Table::new(rows).with(Style::psql()).to_string());
        output.push('\n');
    }

    output
}

/// Format the full dashboard for the terminal
pub fn format_dashboard(view: &DashboardView, settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let summary = &view.summary;
    let mut output = String::new();

    output.push_str(&format!(
        "To set aside: {}    Period: {}\n",
        summary.to_set_aside.format_with_symbol(symbol),
        summary.half_month
    ));
    output.push_str(&format!(
        "Subscriptions: {} ({})\n",
        summary.subscriptions_total.format_with_symbol(symbol),
        if summary.subscription_transfer_done {
            "transferred this period"
        } else {
            "transfer pending"
        }
    ));

    if !view.alerts.is_empty() {
        output.push_str("\nAlerts:\n");
        for alert in &view.alerts {
            let marker = match alert.severity {
                AlertSeverity::Warning => "!",
                AlertSeverity::Danger => "!!",
            };
            output.push_str(&format!("  {:<2} {}\n", marker, alert.message));
        }
    }

    if !view.card_dues.is_empty() {
        output.push_str("\nCard payments:\n");
        for due in &view.card_dues {
            output.push_str(&format!(
                "  {:<16} {}  in {} days ({})\n",
                due.card,
                due.due_date.format("%Y-%m-%d"),
                due.days_left,
                due.tier
            ));
        }
    }

    output.push('\n');
    output.push_str(&format_groups("Fixed", &view.fixed_groups, symbol));
    output.push('\n');
    output.push_str(&format_groups("Flexible", &view.flexible_groups, symbol));

    output
}
