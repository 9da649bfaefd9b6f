use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

use crate::ir::{Node, NodeData, Size};

/// Monospace text metrics used to estimate how large the renderer will draw a node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub header_padding: f64,
    pub column_gap: f64,
    pub min_node_width: f64,
    pub min_node_height: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            padding_x: 12.0,
            padding_y: 8.0,
            header_padding: 4.0,
            column_gap: 16.0,
            min_node_width: 100.0,
            min_node_height: 60.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Size of a box with a header and one row per entry. Each row is a
    /// list of cells laid out side by side.
    pub fn table_size(&self, label: &str, rows: &[Vec<&str>]) -> Size {
        let header_width = self.text_width(label);

        let max_row_width = rows
            .iter()
            .map(|cells| {
                let text: f64 = cells.iter().map(|c| self.text_width(c)).sum();
                let gaps = cells.len().saturating_sub(1) as f64 * self.column_gap;
                text + gaps
            })
            .fold(0.0, f64::max);

        let content_width = header_width.max(max_row_width) + self.padding_x * 2.0;
        let width = content_width.max(self.min_node_width);

        let header_height = self.line_height + self.header_padding * 2.0;
        let body_height = if rows.is_empty() {
            0.0
        } else {
            rows.len() as f64 * self.line_height + self.padding_y * 2.0
        };

        let height = (header_height + body_height).max(self.min_node_height);

        Size { width, height }
    }

    /// Model rows show name, display type and default; enum rows show the value.
    pub fn node_size(&self, node: &Node) -> Size {
        match &node.data {
            NodeData::Model(model) => {
                let rows: Vec<Vec<&str>> = model
                    .columns
                    .iter()
                    .map(|c| {
                        let mut cells = vec![c.name.as_str(), c.display_type.as_str()];
                        if let Some(default) = &c.default_value {
                            cells.push(default);
                        }
                        cells
                    })
                    .collect();
                self.table_size(&model.name, &rows)
            }
            NodeData::Enum(e) => {
                let rows: Vec<Vec<&str>> = e.values.iter().map(|v| vec![v.as_str()]).collect();
                self.table_size(&e.name, &rows)
            }
        }
    }
}
