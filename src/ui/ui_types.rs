use crate::annotator::Session;

use super::canvas::OverlayStyle;

/// One annotation window. Borrows the session it fills for as long as the
/// native event loop runs.
pub struct AnnotatorApp<'a> {
    pub session: &'a mut Session,

    pub texture: egui::TextureHandle,

    pub style: OverlayStyle,

    pub close_on_complete: bool,

    /// last title sent to the viewport
    pub title: String,

    pub close_requested: bool,
}
