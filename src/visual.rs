use colored::{Color, Colorize};

use crate::confidence::{percent, ConfidenceLevel, Emphasis};
use crate::models::{display_value, ThoughtRecord};

/// Renders a thought as a bordered console block, similar to Sequential Thinking.
///
/// Widths are always measured on the uncolored text, so every row of the box
/// has the same number of characters whether or not color is enabled.
#[derive(Debug, Clone, Copy)]
pub struct ThoughtRenderer {
    color: bool,
}

impl ThoughtRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Renderer that never emits ANSI escapes
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn render(&self, record: &ThoughtRecord) -> String {
        let header = self.header(record);
        let rows: Vec<String> = sections(record)
            .iter()
            .flat_map(|section| section.lines().map(str::to_string))
            .collect();

        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .chain(std::iter::once(header.plain.chars().count()))
            .max()
            .unwrap_or(0);
        let border = "─".repeat(width + 2);

        let mut out = Vec::with_capacity(rows.len() + 4);
        out.push(format!("┌{}┐", border));
        out.push(format!("│ {}{} │", header.painted, pad(&header.plain, width)));
        out.push(format!("├{}┤", border));
        for row in &rows {
            out.push(format!("│ {}{} │", row, pad(row, width)));
        }
        out.push(format!("└{}┘", border));
        out.join("\n")
    }

    fn header(&self, record: &ThoughtRecord) -> Header {
        let structure = &record.structure;
        let (prefix, tone, context) = if structure.is_revision() {
            let target = structure
                .revises_thought
                .as_ref()
                .map(display_value)
                .unwrap_or_else(|| "?".to_string());
            ("🔄 Revision", Color::Yellow, format!(" (revising thought {})", target))
        } else if let Some(origin) = structure.branch_origin() {
            let branch_id = structure
                .branch_id
                .as_ref()
                .map(display_value)
                .unwrap_or_else(|| "?".to_string());
            (
                "🌿 Branch",
                Color::Green,
                format!(" (from thought {}, ID: {})", display_value(origin), branch_id),
            )
        } else {
            ("💭 Thought", Color::Blue, String::new())
        };

        let position = format!(" {}/{}{}", record.thought_number, record.total_thoughts, context);
        let badge = record.confidence_score.map(|score| {
            let text = format!(" [{} {}%]", ConfidenceLevel::from_score(score), percent(score));
            (text, Emphasis::from_score(score).color())
        });

        let mut plain = format!("{}{}", prefix, position);
        let mut painted = format!("{}{}", self.paint(prefix, tone), position);
        if let Some((text, color)) = badge {
            plain.push_str(&text);
            painted.push_str(&self.paint(&text, color));
        }
        Header { plain, painted }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ThoughtRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

struct Header {
    plain: String,
    painted: String,
}

fn pad(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}

/// Content sections in display order, each possibly spanning several lines
fn sections(record: &ThoughtRecord) -> Vec<String> {
    let mut sections = vec![record.thought.clone()];

    if let Some(fp) = &record.first_principles {
        // assumptions_challenged and reasoning_from_zero are accepted but not shown
        push_list(&mut sections, "🔍 Assumptions", fp.assumptions_identified.as_deref());
        push_list(&mut sections, "⚛ Fundamental truths", fp.fundamental_truths.as_deref());
        push_list(&mut sections, "🚫 Analogies avoided", fp.analogies_avoided.as_deref());
        if let Some(solution) = fp.reconstructed_solution.as_deref().filter(|s| !s.is_empty()) {
            sections.push(format!("🔧 Reconstructed: {}", solution));
        }
        push_list(&mut sections, "📚 Evidence", fp.evidence_base.as_deref());
    }

    if let Some(reasoning) = record.confidence_reasoning.as_deref().filter(|s| !s.is_empty()) {
        sections.push(format!("💡 Confidence reasoning: {}", reasoning));
    }

    push_list(&mut sections, "❓ Uncertainties", record.uncertainty_factors.as_deref());

    if let Some(calibration) = &record.calibration_metrics {
        let mut parts = Vec::new();
        if let Some(accuracy) = calibration.previous_accuracy {
            parts.push(format!("previous accuracy {}%", percent(accuracy)));
        }
        if let Some(awareness) = calibration.uncertainty_awareness {
            parts.push(format!("uncertainty awareness {}%", percent(awareness)));
        }
        if calibration.flags_overconfidence() {
            parts.push("⚠ overconfidence pattern detected".to_string());
        }
        if !parts.is_empty() {
            sections.push(format!("📊 Calibration: {}", parts.join(" | ")));
        }
    }

    sections
}

fn push_list(sections: &mut Vec<String>, label: &str, items: Option<&[String]>) {
    if let Some(items) = items.filter(|items| !items.is_empty()) {
        sections.push(format!("{}: {}", label, items.join(", ")));
    }
}
