use lab_config::Theme;

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
    pub theme: Theme,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            max_width: None,
            color: false,
            theme: Theme::Light,
        }
    }
}

const MIN_COLUMN: usize = 4;

/// Render an aligned table. Widths count characters, not bytes, so
/// Vietnamese names line up.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
                .max(MIN_COLUMN)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_width(header_line.trim_end()));

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize_status(&truncated, &padded, options.theme)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        // Shrink the widest column that is still above its floor.
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_width(headers[*idx]).max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Wrap the padded cell in an ANSI color when its text is a known status.
fn colorize_status(text: &str, padded: &str, theme: Theme) -> String {
    let lower = text.trim().to_ascii_lowercase();
    let base = match lower.as_str() {
        "done" | "approved" | "available" | "connected" | "true" => 2,
        "draft" | "assigned" | "in_process" | "pending" | "connecting" | "unread" => 3,
        "cancelled" | "rejected" | "held" | "disconnected" | "false" => 1,
        _ => return padded.to_string(),
    };
    // Bright variants read better on dark backgrounds.
    let code = match theme {
        Theme::Light => 30 + base,
        Theme::Dark => 90 + base,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows(values: &[&[&str]]) -> Vec<Vec<String>> {
        values
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn aligns_by_characters() {
        let table = render_table(
            &["name", "value"],
            &rows(&[&["Thân", "3"], &["Chiều cao", "12"]]),
            TableOptions::default(),
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "name       value");
        assert_eq!(lines[1], "-".repeat(16));
        assert_eq!(lines[2], "Thân           3");
        assert_eq!(lines[3], "Chiều cao     12");
    }

    #[test]
    fn shrinks_widest_column_to_fit() {
        let table = render_table(
            &["id", "title"],
            &rows(&[&["n-1", "A very long notification title"]]),
            TableOptions {
                max_width: Some(20),
                ..TableOptions::default()
            },
        );
        let last = table.lines().last().unwrap();
        assert!(last.chars().count() <= 20, "{last}");
        assert!(last.ends_with('…'));
    }

    #[test]
    fn colors_follow_theme() {
        let light = colorize_status("done", "done  ", Theme::Light);
        let dark = colorize_status("done", "done  ", Theme::Dark);
        assert_eq!(light, "\u{1b}[32mdone  \u{1b}[0m");
        assert_eq!(dark, "\u{1b}[92mdone  \u{1b}[0m");
        assert_eq!(colorize_status("Vanda", "Vanda", Theme::Dark), "Vanda");
    }

    #[test]
    fn numeric_detection_needs_a_digit() {
        assert!(looks_numeric("12,5"));
        assert!(!looks_numeric("-"));
        assert!(!looks_numeric("Lan"));
    }
}
