//! Chart rendering seam.

use serde_json::Value;

use super::ChartKind;
use crate::dom::Element;

/// Draws a chart into its placeholder. Return values are not consumed.
pub trait ChartRenderer {
    fn render_bar_chart(&self, container: &Element, data: &Value, options: &Value);

    fn render_word_tree(&self, container: &Element, data: &Value, options: &Value);

    /// Dispatch on kind.
    fn render(&self, kind: ChartKind, container: &Element, data: &Value, options: &Value) {
        match kind {
            ChartKind::Bar => self.render_bar_chart(container, data, options),
            ChartKind::WordTree => self.render_word_tree(container, data, options),
        }
    }
}

/// Stand-in renderer: tags the container with `data-rendered="<kind>"` and
/// logs a one-line summary of the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRenderer;

impl TraceRenderer {
    fn trace(kind: ChartKind, container: &Element, data: &Value) {
        container.set_attr("data-rendered", kind.as_str());
        crate::log!("chart"; "{} chart <{}> ({})", kind.as_str(), container.tag(), describe(data));
    }
}

impl ChartRenderer for TraceRenderer {
    fn render_bar_chart(&self, container: &Element, data: &Value, _options: &Value) {
        Self::trace(ChartKind::Bar, container, data);
    }

    fn render_word_tree(&self, container: &Element, data: &Value, _options: &Value) {
        Self::trace(ChartKind::WordTree, container, data);
    }
}

fn describe(data: &Value) -> String {
    match data {
        Value::Array(rows) => format!("{} rows", rows.len()),
        Value::Object(fields) => format!("{} fields", fields.len()),
        Value::Null => "no data".to_string(),
        other => other.to_string(),
    }
}
