//! Colourful console output for planning runs.
//!
//! A `tracing` layer that renders planner, packer and solver events.
//! Installed by the entry points when the `console` feature is enabled.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. Does nothing
/// if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "loadforge_solver=info".parse() {
            filter = filter.add_directive(directive);
        }
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlannerConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats planner events with colours.
pub struct PlannerConsoleLayer;

impl<S: Subscriber> Layer<S> for PlannerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("loadforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{output}");
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    backend: Option<String>,
    source: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    orders: Option<u64>,
    containers: Option<u64>,
    greedy_containers: Option<u64>,
    lower_bound: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    nodes: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{value:?}").trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "backend" => self.backend = Some(s),
            "source" => self.source = Some(s),
            "status" => self.status = Some(s),
            "reason" => self.reason = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            _ => self.record_debug(field, &value),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "orders" | "order_count" => self.orders = Some(value),
            "containers" => self.containers = Some(value),
            "greedy_containers" => self.greedy_containers = Some(value),
            "lower_bound" => self.lower_bound = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "nodes" => self.nodes = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "objective" {
            self.objective = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "plan_start" => line(
            "Planner",
            format!(
                "planning {} orders with backend {}",
                count(v.orders).bright_yellow(),
                v.backend.as_deref().unwrap_or("none").bright_magenta()
            ),
        ),
        "pack_end" => line(
            "Greedy",
            format!(
                "packed into {} containers in {}",
                count(v.containers).bright_yellow(),
                format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
            ),
        ),
        "solve_start" => line(
            "Exact",
            format!(
                "model with {} variables, {} constraints",
                count(v.variables).bright_yellow(),
                count(v.constraints).bright_yellow()
            ),
        ),
        "solve_end" => line(
            "Exact",
            format!(
                "{} after {} nodes in {}, objective ({})",
                format_status(v.status.as_deref().unwrap_or("?")),
                count(v.nodes).white(),
                format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
                v.objective
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "none".to_string())
                    .bright_magenta()
            ),
        ),
        "exact_fallback" => format!(
            "{} {} {} falling back to greedy: {}",
            timestamp().bright_black(),
            "WARN".bright_yellow(),
            "[Planner]".bright_cyan(),
            v.reason.as_deref().unwrap_or("unknown").bright_red()
        ),
        "plan_end" => format_summary(v),
        _ => String::new(),
    }
}

fn line(scope: &str, body: String) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{scope}]").bright_cyan(),
        body
    )
}

fn format_summary(v: &EventVisitor) -> String {
    let border = "═".repeat(58);
    let rows = [
        ("Source:", v.source.clone().unwrap_or_default()),
        ("Status:", v.status.clone().unwrap_or_default()),
        ("Containers:", count(v.containers)),
        ("Greedy containers:", count(v.greedy_containers)),
        ("Lower bound:", count(v.lower_bound)),
        ("Time spent:", format_duration_ms(v.duration_ms.unwrap_or(0))),
    ];

    let mut output = String::from("\n");
    output.push_str(&format!("╔{border}╗").bright_cyan().to_string());
    output.push('\n');
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<20}{:>34}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(&format!("╚{border}╝").bright_cyan().to_string());
    output.push('\n');
    output
}

fn format_status(status: &str) -> String {
    match status {
        "Optimal" => status.bright_green().bold().to_string(),
        "Feasible" => status.bright_yellow().to_string(),
        _ => status.bright_red().to_string(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| format!("{:5}.{:03}", d.as_secs() % 100_000, d.subsec_millis()))
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1_500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("container_opened".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_counts_use_separators() {
        assert_eq!(count(Some(1_234_567)), "1,234,567");
        assert_eq!(count(None), "0");
    }
}
