use trellis_render::DrawList;
use trellis_style::ThemeProperty;

use crate::control::{ControlId, ControlTree};

impl ControlTree {
    /// A panel is a filled rectangle in the `Panel` color.
    pub(crate) fn paint_panel(&self, id: ControlId, list: &mut DrawList) {
        let color = self.property(id, ThemeProperty::Panel).to_color();
        list.rectangle(self.absolute_bounds(id), color);
    }
}
