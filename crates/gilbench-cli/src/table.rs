//! Bordered, aligned text tables.

use console::measure_text_width;

/// A text table built from a header and rows of strings.
///
/// ```text
/// +-------+-------+
/// |   a   |   b   |
/// +=======+=======+
/// | 1.0ms | 2.0ms |
/// +-------+-------+
/// ```
#[derive(Debug, Default, Clone)]
pub struct TextTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TextTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header row.
    pub fn header<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = cells.into_iter().map(Into::into).collect();
        self
    }

    /// Append a data row.
    pub fn add_row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Render the table. Short rows are padded with empty cells.
    #[must_use]
    pub fn draw(&self) -> String {
        let widths = self.column_widths();
        if widths.is_empty() {
            return String::new();
        }

        let rule = |fill: char| -> String {
            let mut line = String::from("+");
            for w in &widths {
                line.extend(std::iter::repeat(fill).take(w + 2));
                line.push('+');
            }
            line
        };

        let mut lines = vec![rule('-')];
        if !self.header.is_empty() {
            lines.push(render_row(&self.header, &widths, Align::Center));
            lines.push(rule('='));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                lines.push(rule('-'));
            }
            lines.push(render_row(row, &widths, Align::Left));
        }
        if !self.rows.is_empty() || self.header.is_empty() {
            lines.push(rule('-'));
        }
        lines.join("\n")
    }

    fn column_widths(&self) -> Vec<usize> {
        let columns = std::iter::once(&self.header)
            .chain(&self.rows)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(measure_text_width(cell));
            }
        }
        widths
    }
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
}

fn render_row(cells: &[String], widths: &[usize], align: Align) -> String {
    let mut line = String::from("|");
    for (i, &width) in widths.iter().enumerate() {
        let cell = cells.get(i).map_or("", String::as_str);
        let pad = width - measure_text_width(cell);
        let (left, right) = match align {
            Align::Left => (0, pad),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        line.push(' ');
        line.push_str(&" ".repeat(left));
        line.push_str(cell);
        line.push_str(&" ".repeat(right));
        line.push_str(" |");
    }
    line
}
