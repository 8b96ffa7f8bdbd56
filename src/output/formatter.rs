use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::engine::{field_label, DerivedFields};
use crate::evaluation::EvaluationResult;
use crate::model::{Decision, Rule};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format risk points with an explicit sign ("+25", "-10", "0")
pub fn format_points(points: i32) -> String {
    if points > 0 {
        format!("+{}", points)
    } else {
        points.to_string()
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format rules as a table with columns: Id, Priority, Points, Name, Condition
/// Disabled rules are marked with "(off)" and dimmed.
pub fn format_rules_table<R: std::borrow::Borrow<Rule>>(rules: &[R], use_colors: bool) -> String {
    if rules.is_empty() {
        return "No rules configured.".to_string();
    }

    let term_width = get_terminal_width();

    // id: 4, priority: 4, points: 5, two-space separators
    let id_width = 4;
    let priority_width = 4;
    let points_width = 5;
    let separator = "  ";

    rules
        .iter()
        .map(|rule| {
            let rule = rule.borrow();
            let id_str = format!("{:>width$}", format!("#{}", rule.id), width = id_width);
            let priority_str = format!("P{:<width$}", rule.priority, width = priority_width - 1);
            let points_str = format!(
                "{:>width$}",
                format_points(rule.risk_points),
                width = points_width
            );
            let condition = rule.condition();
            let marker = if rule.enabled { "" } else { " (off)" };

            let fixed_width = id_width
                + priority_width
                + points_width
                + separator.len() * 4
                + condition.chars().count()
                + marker.len();

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&rule.name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_text(&rule.name, 20),
                None => rule.name.clone(),
            };

            if !use_colors {
                return [
                    id_str,
                    priority_str,
                    points_str,
                    format!("{}{}", name, marker),
                    condition,
                ]
                .join(separator);
            }

            let line = format!(
                "{}{}{}{}{}{}{}{}{}",
                id_str.dimmed(),
                separator,
                priority_str,
                separator,
                if rule.risk_points > 0 {
                    points_str.red().to_string()
                } else {
                    points_str.green().to_string()
                },
                separator,
                name.bold(),
                separator,
                condition.cyan()
            );
            if rule.enabled {
                line
            } else {
                format!("{}{}", line.dimmed(), marker.dimmed())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the six derived fields as a two-column table
pub fn format_derived_fields(derived: &DerivedFields, use_colors: bool) -> String {
    let labels: Vec<(String, String)> = derived
        .iter()
        .map(|(name, value)| (field_label(name), value.to_string()))
        .collect();
    let label_width = labels.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    labels
        .iter()
        .map(|(label, value)| {
            let padded = format!("{:<width$}", label, width = label_width);
            if use_colors {
                format!("{}  {}", padded.bold(), value)
            } else {
                format!("{}  {}", padded, value)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line verdict: "APPROVE  score 15 (LOW)  2 rule(s) triggered"
pub fn format_summary(result: &EvaluationResult, use_colors: bool) -> String {
    let decision = result.decision.code();
    let details = format!(
        "score {} ({})  {} rule(s) triggered",
        result.risk_score,
        result.risk_level,
        result.triggered_rules.len()
    );

    if !use_colors {
        return format!("{}  {}", decision, details);
    }

    let decision = match result.decision {
        Decision::Approve => decision.green().bold().to_string(),
        Decision::ManualReview => decision.yellow().bold().to_string(),
        Decision::Reject => decision.red().bold().to_string(),
    };
    format!("{}  {}", decision, details.dimmed())
}
