use tracing::{debug, info};

use egui::RichText;
use egui_extras::{Column, TableBuilder};

use crate::annotator::{dispatch_click, ClickOutcome, Session};

use super::canvas::{EguiSurface, ImageTransform, OverlayStyle};
use super::ui_types::AnnotatorApp;

/// New
impl<'a> AnnotatorApp<'a> {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: &'a mut Session,
        image: egui::ColorImage,
        style: OverlayStyle,
        close_on_complete: bool,
    ) -> Self {
        let texture = cc
            .egui_ctx
            .load_texture("annotator_image", image, Default::default());

        Self::with_texture(session, texture, style, close_on_complete)
    }

    pub fn with_texture(
        session: &'a mut Session,
        texture: egui::TextureHandle,
        style: OverlayStyle,
        close_on_complete: bool,
    ) -> Self {
        Self {
            session,
            texture,
            style,
            close_on_complete,
            title: String::new(),
            close_requested: false,
        }
    }
}

/// panels
impl AnnotatorApp<'_> {
    fn prompt(&self, ui: &mut egui::Ui) {
        let text = RichText::new(self.session.title()).size(18.);
        let text = if self.session.is_complete() {
            text.color(egui::Color32::from_rgb(50, 158, 244))
        } else {
            text
        };
        ui.label(text);
    }

    fn annotation_table(&self, ui: &mut egui::Ui) {
        ui.label(format!(
            "{} / {} placed",
            self.session.placed(),
            self.session.labels().len()
        ));
        ui.separator();

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(80.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Label");
                });
                header.col(|ui| {
                    ui.strong("Position");
                });
            })
            .body(|mut body| {
                for (label, coord) in self.session.annotations().iter() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label(label);
                        });
                        row.col(|ui| {
                            ui.label(coord.to_string());
                        });
                    });
                }
            });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let transform = ImageTransform::fit(ui.available_rect_before_wrap(), self.texture.size());
        let resp = ui.allocate_rect(transform.rect, egui::Sense::click());

        /// primary press on the image
        let press = if resp.hovered() {
            ui.input(|i| {
                if i.pointer.primary_pressed() {
                    i.pointer.interact_pos()
                } else {
                    None
                }
            })
        } else {
            None
        };

        let mut surface = EguiSurface {
            painter: ui.painter_at(transform.rect),
            transform,
            texture_id: self.texture.id(),
            style: &self.style,
            background: ui.visuals().extreme_bg_color,
            title: &mut self.title,
        };

        match press.filter(|pos| transform.contains(*pos)) {
            Some(pos) => {
                let coord = transform.to_image(pos);
                match dispatch_click(self.session, coord, &mut surface) {
                    ClickOutcome::Placed(idx, coord) => {
                        info!("label {} placed at {}", idx, coord);
                        ui.ctx().request_repaint();
                    }
                    ClickOutcome::Ignored => {
                        debug!("click at {} after completion", coord);
                    }
                }
            }
            None => self.session.redraw(&mut surface),
        }
    }

    /// Sends a single close request once every label is placed, when asked to.
    fn close_if_complete(&mut self, ctx: &egui::Context) {
        if self.close_on_complete && self.session.is_complete() && !self.close_requested {
            info!("all labels placed, closing");
            self.close_requested = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for AnnotatorApp<'_> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::TopBottomPanel::top("prompt").show(ctx, |ui| {
            self.prompt(ui);
        });

        egui::SidePanel::right("annotations")
            .resizable(false)
            .default_width(220.)
            .show(ctx, |ui| {
                self.annotation_table(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui);
        });

        self.close_if_complete(ctx);
    }
}
