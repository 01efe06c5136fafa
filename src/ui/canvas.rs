use anyhow::{Context, Result};
use egui::{Color32, Pos2, Rect, Vec2};

use crate::annotator::{Coord, Surface};
use crate::appconfig::OverlaySettings;

use super::utils::parse_hex_color;

pub fn to_color_image(image: &image::DynamicImage) -> egui::ColorImage {
    let rgba = image.to_rgba8();
    egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_flat_samples().as_slice(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub marker_color: Color32,
    pub marker_radius: f32,
    pub text_color: Color32,
    pub text_background: Color32,
    pub text_size: f32,
}

impl OverlayStyle {
    pub fn from_settings(settings: &OverlaySettings) -> Result<Self> {
        Ok(Self {
            marker_color: parse_hex_color(&settings.marker_color).context("marker_color")?,
            marker_radius: settings.marker_radius,
            text_color: parse_hex_color(&settings.text_color).context("text_color")?,
            text_background: parse_hex_color(&settings.text_background)
                .context("text_background")?,
            text_size: settings.text_size,
        })
    }
}

/// Maps between image pixels and screen points for an image scaled to fit
/// an area, centred, aspect ratio kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    /// where the image lands on screen
    pub rect: Rect,
    /// screen points per image pixel
    pub scale: f32,
}

impl ImageTransform {
    pub fn fit(available: Rect, image_size: [usize; 2]) -> Self {
        let w = image_size[0].max(1) as f32;
        let h = image_size[1].max(1) as f32;

        let scale = (available.width() / w)
            .min(available.height() / h)
            .max(f32::EPSILON);

        let rect = Rect::from_center_size(available.center(), Vec2::new(w * scale, h * scale));

        Self { rect, scale }
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect.contains(pos)
    }

    pub fn to_image(&self, pos: Pos2) -> Coord {
        let x = (pos.x - self.rect.min.x) / self.scale;
        let y = (pos.y - self.rect.min.y) / self.scale;
        Coord::new(x as f64, y as f64)
    }

    pub fn to_screen(&self, coord: Coord) -> Pos2 {
        self.rect.min + Vec2::new(coord.x as f32, coord.y as f32) * self.scale
    }
}

/// Paints a session onto the image rectangle of one window.
pub struct EguiSurface<'a> {
    pub painter: egui::Painter,
    pub transform: ImageTransform,
    pub texture_id: egui::TextureId,
    pub style: &'a OverlayStyle,
    pub background: Color32,
    /// last title sent to the window
    pub title: &'a mut String,
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, self.background);
    }

    fn draw_image(&mut self) {
        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));
        self.painter
            .image(self.texture_id, self.transform.rect, uv, Color32::WHITE);
    }

    fn draw_marker(&mut self, pos: Coord) {
        let pos = self.transform.to_screen(pos);
        self.painter
            .circle_filled(pos, self.style.marker_radius, self.style.marker_color);
    }

    fn draw_text(&mut self, pos: Coord, text: &str) {
        let galley = self.painter.layout_no_wrap(
            text.to_string(),
            egui::FontId::proportional(self.style.text_size),
            self.style.text_color,
        );

        /// bottom-left corner just right of the marker
        let anchor = self.transform.to_screen(pos)
            + Vec2::new(self.style.marker_radius + 2.0, -galley.size().y);

        let bg = Rect::from_min_size(anchor, galley.size()).expand(2.0);
        self.painter.rect_filled(bg, 2.0, self.style.text_background);
        self.painter.galley(anchor, galley, self.style.text_color);
    }

    fn set_title(&mut self, title: &str) {
        if self.title.as_str() != title {
            self.painter
                .ctx()
                .send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
            *self.title = title.to_string();
        }
    }
}
