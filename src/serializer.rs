//! [`Keymap`] to text.
//!
//! Output is deterministic: one `defsrc`, each layer in insertion order, then a single
//! `defalias` when aliases exist. Cells are padded into columns shared by `defsrc` and
//! every layer so the forms read as a grid. Whitespace carries no meaning, so
//! re-parsing the output always gives back the same keymap.

use crate::config::FormatOptions;
use crate::keymap::Keymap;
use crate::parser::LAYOUT_MARKER;
use std::fmt::Write;

/// Serializes with default formatting.
pub fn serialize(keymap: &Keymap) -> String {
    Serializer::new(FormatOptions::default()).serialize(keymap)
}

pub struct Serializer {
    options: FormatOptions,
    rows: Option<Vec<usize>>,
}

impl Serializer {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            options,
            rows: None,
        }
    }

    /// Breaks lines after each physical row. Ignored unless the row lengths add up
    /// to the keymap's key count.
    pub fn with_rows(mut self, rows: Vec<usize>) -> Self {
        if !self.options.ignore_rows {
            self.rows = Some(rows);
        }
        self
    }

    pub fn serialize(&self, keymap: &Keymap) -> String {
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(keymap.layer_count() + 1);
        grid.push(keymap.defsrc().to_vec());
        for (_, actions) in keymap.layers() {
            grid.push(actions.iter().map(ToString::to_string).collect());
        }

        let widths = if self.options.compact {
            vec![0; keymap.len()]
        } else {
            column_widths(&grid, keymap.len())
        };
        let breaks = self.line_lengths(keymap.len());

        let mut out = String::new();
        if let Some(layout) = keymap.layout() {
            let _ = writeln!(out, ";; {} {}", LAYOUT_MARKER, layout);
            out.push('\n');
        }

        let mut rows = grid.iter();
        if let Some(defsrc) = rows.next() {
            self.write_form(&mut out, "(defsrc", defsrc, &widths, &breaks);
        }
        for ((name, _), cells) in keymap.layers().zip(rows) {
            out.push('\n');
            let open = format!("(deflayer {}", name);
            self.write_form(&mut out, &open, cells, &widths, &breaks);
        }

        let mut aliases = keymap.aliases().peekable();
        if aliases.peek().is_some() {
            out.push('\n');
            out.push_str("(defalias\n");
            for (name, action) in aliases {
                let _ = writeln!(out, "{}{} {}", self.indent(), name, action);
            }
            out.push_str(")\n");
        }

        out
    }

    fn indent(&self) -> String {
        " ".repeat(self.options.indent)
    }

    /// Number of cells on each output line.
    fn line_lengths(&self, len: usize) -> Vec<usize> {
        if let Some(rows) = &self.rows {
            if rows.iter().sum::<usize>() == len {
                return rows.clone();
            }
        }
        if len == 0 {
            return Vec::new();
        }
        match self.options.wrap {
            0 => vec![len],
            wrap => (0..len)
                .step_by(wrap)
                .map(|start| wrap.min(len - start))
                .collect(),
        }
    }

    fn write_form(
        &self,
        out: &mut String,
        open: &str,
        cells: &[String],
        widths: &[usize],
        breaks: &[usize],
    ) {
        out.push_str(open);
        out.push('\n');

        let indent = self.indent();
        let mut start = 0;
        for &count in breaks {
            let end = start + count;
            let line = cells[start..end]
                .iter()
                .zip(&widths[start..end])
                .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
                .collect::<Vec<_>>()
                .join(" ");
            let line = line.trim_end();
            if !line.is_empty() {
                let _ = writeln!(out, "{}{}", indent, line);
            }
            start = end;
        }

        out.push_str(")\n");
    }
}

fn column_widths(grid: &[Vec<String>], len: usize) -> Vec<usize> {
    (0..len)
        .map(|col| {
            grid.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect()
}
