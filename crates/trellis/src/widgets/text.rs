use trellis_render::DrawList;
use trellis_style::ThemeProperty;

use crate::control::{ControlId, ControlTree};

/// Label payload shared by every text-bearing control.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextState {
    pub(crate) text: String,
    /// `None` follows the `FontSize` property.
    pub(crate) font_size: Option<f32>,
}

impl TextState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }
}

impl ControlTree {
    pub(crate) fn paint_text(&self, id: ControlId, list: &mut DrawList) {
        let color = self.property(id, ThemeProperty::Text).to_color();
        list.text(self.absolute_position(id), self.text(id), self.font_size(id), color);
    }
}
