//! Threshold input widget with draft string state
//!
//! The widget edits a draft `String` owned by the detail state instead of the
//! committed number, so partial input like "1." survives between frames.
//! The caller commits on `lost_focus` (blur or Enter).

use egui::{Response, TextEdit, Ui};

/// Single-line numeric entry for one threshold value
pub struct ThresholdInput<'a> {
    label: &'a str,
    draft: &'a mut String,
    width: f32,
}

impl<'a> ThresholdInput<'a> {
    pub fn new(label: &'a str, draft: &'a mut String) -> Self {
        Self {
            label,
            draft,
            width: 80.0,
        }
    }

    /// Set the text field width
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Show the widget; the returned response is the text field's
    /// (check `lost_focus()` to commit)
    pub fn show(self, ui: &mut Ui) -> Response {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(self.label).small().weak());
            ui.add(
                TextEdit::singleline(self.draft)
                    .desired_width(self.width)
                    .font(egui::TextStyle::Monospace),
            )
        })
        .inner
    }
}
