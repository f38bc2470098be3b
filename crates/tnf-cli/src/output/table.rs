#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;

/// Render an aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(MIN_COLUMN)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.chars().count());

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                let colored = if options.color && is_colored_cell(headers, row, index) {
                    colorize(&truncated)
                } else {
                    truncated
                };
                format_cell(&colored, *width, numeric, options.color)
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

/// Shrink the widest columns one step at a time until the table fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].len().max(MIN_COLUMN))
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
    if value.chars().count() <= width {
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
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

fn format_cell(value: &str, width: usize, numeric: bool, has_ansi: bool) -> String {
    let plain_len = if has_ansi {
        strip_ansi(value).chars().count()
    } else {
        value.chars().count()
    };
    let pad = width.saturating_sub(plain_len);
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

/// Columns whose values are status-like and get colored.
const COLORED_COLUMNS: [&str; 4] = ["status", "band", "write", "outcome"];

/// Whether cell `index` of `row` holds a status-like value. Columns are
/// picked by header; in a `key`/`value` table the row's key decides.
fn is_colored_cell(headers: &[&str], row: &[String], index: usize) -> bool {
    let column = if headers == ["key", "value"] {
        if index != 1 {
            return false;
        }
        row.first().map_or("", String::as_str)
    } else {
        headers.get(index).copied().unwrap_or("")
    };
    COLORED_COLUMNS.contains(&column)
}

/// Color status names, confidence bands, and write results.
fn colorize(value: &str) -> String {
    let code = match value {
        "fixed" | "high" | "accepted" | "replaced" => Some("32"),
        "pending" | "medium" => Some("33"),
        "reviewed" => Some("36"),
        "ignored" => Some("90"),
        "low" | "rejected" | "failed" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["1".into(), "pending".into(), "short".into()],
            vec!["200".into(), "reviewed".into(), "a much longer label".into()],
        ]
    }

    #[test]
    fn columns_align_across_mixed_widths() {
        let table = render_entity_table(
            &["id", "status", "label"],
            &rows(),
            TableOptions {
                max_width: None,
                color: false,
            },
        );
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        // Numeric ids are right-aligned.
        assert!(lines[2].starts_with("   1"));
        assert!(lines[3].starts_with(" 200"));
        let status_col = lines[0].find("status").unwrap();
        assert_eq!(lines[3].find("reviewed"), Some(status_col));
    }

    #[test]
    fn narrow_terminal_truncates_widest_column() {
        let table = render_entity_table(
            &["id", "status", "label"],
            &rows(),
            TableOptions {
                max_width: Some(24),
                color: false,
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 24));
        assert!(table.contains('…'));
    }

    #[test]
    fn color_wraps_known_values_only() {
        assert_eq!(colorize("fixed"), "\u{1b}[32mfixed\u{1b}[0m");
        assert_eq!(colorize("low"), "\u{1b}[31mlow\u{1b}[0m");
        assert_eq!(colorize("pothole"), "pothole");
    }

    #[test]
    fn colored_cells_pad_by_visible_width() {
        let table = render_entity_table(
            &["status", "id"],
            &[vec!["fixed".into(), "1".into()]],
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert_eq!(strip_ansi(row), "fixed      1");
    }

    #[test]
    fn only_status_like_columns_are_colored() {
        let table = render_entity_table(
            &["label", "status"],
            &[vec!["low".into(), "low".into()]],
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("low  "));
        assert_eq!(row.matches('\u{1b}').count(), 2);
        assert!(row.contains("\u{1b}[31mlow\u{1b}[0m"));
    }

    #[test]
    fn key_value_tables_color_by_key() {
        let rows = vec![
            vec!["label".to_string(), "failed".to_string()],
            vec!["write".to_string(), "rejected".to_string()],
        ];
        let headers = ["key", "value"];
        assert!(!is_colored_cell(&headers, &rows[0], 1));
        assert!(is_colored_cell(&headers, &rows[1], 1));
        assert!(!is_colored_cell(&headers, &rows[1], 0));

        let table = render_entity_table(
            &headers,
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let lines: Vec<&str> = table.lines().collect();
        assert!(!lines[2].contains('\u{1b}'));
        assert!(lines[3].contains("\u{1b}[31mrejected\u{1b}[0m"));
    }
}
