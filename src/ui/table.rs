//! Table rendering for formatted output.

use console::measure_text_width;

use super::theme::EmberTheme;

/// A simple table for formatted output.
///
/// Bordered tables draw box lines and a header row; borderless tables are
/// plain aligned columns, as used by help.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    border: bool,
    key_columns: usize,
}

impl Table {
    /// Create a bordered table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            border: true,
            key_columns: 0,
        }
    }

    /// Create a table without borders or header row.
    pub fn borderless(columns: usize) -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            column_widths: vec![0; columns],
            border: false,
            key_columns: 0,
        }
    }

    /// Style the first `count` columns as keys.
    pub fn key_columns(mut self, count: usize) -> Self {
        self.key_columns = count;
        self
    }

    /// Add a row to the table. Cells beyond the column count are dropped.
    pub fn add_row<S: AsRef<str>>(&mut self, row: Vec<S>) {
        let row: Vec<String> = row
            .iter()
            .take(self.column_widths.len())
            .map(|s| s.as_ref().to_string())
            .collect();

        for (i, cell) in row.iter().enumerate() {
            self.column_widths[i] = self.column_widths[i].max(measure_text_width(cell));
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table without styling.
    pub fn render(&self) -> String {
        self.render_with(&EmberTheme::plain())
    }

    /// Render the table, styling key columns and borders with `theme`.
    pub fn render_with(&self, theme: &EmberTheme) -> String {
        if !self.border {
            return self
                .rows
                .iter()
                .map(|row| self.render_plain_row(row, theme))
                .collect::<Vec<_>>()
                .join("\n");
        }

        let mut lines = vec![
            theme.dim.apply_to(self.render_border('┌', '┬', '┐')).to_string(),
            self.render_boxed_row(&self.headers, &theme.heading, theme),
            theme.dim.apply_to(self.render_border('├', '┼', '┤')).to_string(),
        ];
        for row in &self.rows {
            lines.push(self.render_boxed_row(row, &console::Style::new(), theme));
        }
        lines.push(theme.dim.apply_to(self.render_border('└', '┴', '┘')).to_string());
        lines.join("\n")
    }

    fn cell<'a>(row: &'a [String], i: usize) -> &'a str {
        row.get(i).map(|s| s.as_str()).unwrap_or("")
    }

    fn pad(cell: &str, width: usize) -> String {
        let fill = width.saturating_sub(measure_text_width(cell));
        format!("{}{}", cell, " ".repeat(fill))
    }

    fn render_plain_row(&self, row: &[String], theme: &EmberTheme) -> String {
        let last = self.column_widths.len().saturating_sub(1);
        let cells: Vec<String> = self
            .column_widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = Self::cell(row, i);
                let padded = if i == last {
                    cell.to_string()
                } else {
                    Self::pad(cell, *width)
                };
                if i < self.key_columns {
                    theme.key.apply_to(padded).to_string()
                } else {
                    padded
                }
            })
            .collect();
        format!("  {}", cells.join("  ")).trim_end().to_string()
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        s.push(left);

        for (i, width) in self.column_widths.iter().enumerate() {
            s.push_str(&"─".repeat(width + 2));
            if i < self.column_widths.len() - 1 {
                s.push(mid);
            }
        }

        s.push(right);
        s
    }

    fn render_boxed_row(
        &self,
        row: &[String],
        style: &console::Style,
        theme: &EmberTheme,
    ) -> String {
        let bar = theme.dim.apply_to("│").to_string();
        let mut s = bar.clone();

        for (i, width) in self.column_widths.iter().enumerate() {
            let padded = Self::pad(Self::cell(row, i), *width);
            let styled = if i < self.key_columns {
                theme.key.apply_to(padded).to_string()
            } else {
                style.apply_to(padded).to_string()
            };
            s.push_str(&format!(" {} {}", styled, bar));
        }

        s
    }
}
