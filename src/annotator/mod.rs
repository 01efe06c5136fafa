pub mod session;
pub mod surface;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

pub use session::{AnnotationSet, ClickOutcome, Coord, Label, Session, SessionState};
pub use surface::Surface;

use crate::appconfig::AppSettings;
use crate::ui::{canvas::OverlayStyle, ui_types::AnnotatorApp};

/// eframe app name, not shown to the user
const APP_ID: &str = "point_annotator";

/// Runs annotation sessions and keeps the result of the latest one.
#[derive(Debug, Default)]
pub struct Annotator {
    settings: AppSettings,
    session: Session,
}

impl Annotator {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Opens a window showing `image` and collects one click per label.
    ///
    /// Blocks until the window is closed, holding `self` the whole time, so
    /// [`Annotator::get_annotations`] only sees the result once this returns.
    /// Partial progress is shown in the window itself. Any previous result is
    /// discarded.
    pub fn start_session<I, S>(&mut self, image: &image::DynamicImage, labels: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        self.session = Session::new(labels);
        info!(
            "starting session: {}x{} image, {} labels",
            image.width(),
            image.height(),
            self.session.labels().len()
        );

        let style = OverlayStyle::from_settings(&self.settings.overlay)
            .context("Invalid overlay settings")?;
        let color_image = crate::ui::canvas::to_color_image(image);

        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(self.session.title())
                .with_inner_size([
                    self.settings.window_size.0,
                    self.settings.window_size.1,
                ])
                .with_min_inner_size([400.0, 300.0]),
            ..Default::default()
        };

        let close_on_complete = self.settings.close_on_complete;
        let session = &mut self.session;

        eframe::run_native(
            APP_ID,
            native_options,
            Box::new(move |cc| {
                Ok(Box::new(AnnotatorApp::new(
                    cc,
                    session,
                    color_image,
                    style,
                    close_on_complete,
                )))
            }),
        )
        .map_err(|e| anyhow!("Annotation window failed: {}", e))?;

        debug!(
            "session ended: {}/{} labels placed",
            self.session.annotations().len(),
            self.session.labels().len()
        );

        Ok(())
    }

    /// The mapping built so far; empty before the first session.
    pub fn get_annotations(&self) -> AnnotationSet {
        self.session.annotations().clone()
    }

    pub fn on_click<S: Surface + ?Sized>(&mut self, coord: Coord, surface: &mut S) -> ClickOutcome {
        dispatch_click(&mut self.session, coord, surface)
    }
}

/// Applies one click to the session, then redraws it.
///
/// This is the click callback: the window calls it with its egui surface,
/// [`Annotator::on_click`] with whatever surface the caller holds.
pub fn dispatch_click<S: Surface + ?Sized>(
    session: &mut Session,
    coord: Coord,
    surface: &mut S,
) -> ClickOutcome {
    let outcome = session.click(coord);
    session.redraw(surface);
    outcome
}

#[cfg(test)]
mod tests {
    use super::surface::{DrawOp, RecordingSurface};
    use super::*;

    fn annotator_with(labels: &[&str]) -> Annotator {
        let mut annotator = Annotator::default();
        annotator.session = Session::new(labels.iter().copied());
        annotator
    }

    #[test]
    fn empty_before_any_session() {
        let annotator = Annotator::default();
        assert!(annotator.get_annotations().is_empty());
        assert!(annotator.session().is_complete());
    }

    #[test]
    fn clicks_update_surface() {
        let mut annotator = annotator_with(&["eye", "nose"]);
        let mut surface = RecordingSurface::default();

        annotator.on_click(Coord::new(10.0, 20.0), &mut surface);
        assert_eq!(surface.title(), Some("Please click on nose"));
        assert_eq!(surface.markers(), vec![Coord::new(10.0, 20.0)]);

        annotator.on_click(Coord::new(30.0, 40.0), &mut surface);
        assert_eq!(surface.title(), Some("Annotation complete"));
        assert_eq!(
            surface.markers(),
            vec![Coord::new(10.0, 20.0), Coord::new(30.0, 40.0)]
        );

        let annotations = annotator.get_annotations();
        assert_eq!(annotations.get("eye"), Some(Coord::new(10.0, 20.0)));
        assert_eq!(annotations.get("nose"), Some(Coord::new(30.0, 40.0)));
    }

    #[test]
    fn ignored_click_still_redraws() {
        let mut annotator = annotator_with(&["eye"]);
        let mut surface = RecordingSurface::default();

        annotator.on_click(Coord::new(1.0, 1.0), &mut surface);
        let first = surface.ops.clone();

        let outcome = annotator.on_click(Coord::new(5.0, 5.0), &mut surface);
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(surface.ops, first);
        assert_eq!(surface.ops.first(), Some(&DrawOp::Clear));
        assert_eq!(
            annotator.get_annotations().get("eye"),
            Some(Coord::new(1.0, 1.0))
        );
    }

    #[test]
    fn get_annotations_is_idempotent() {
        let mut annotator = annotator_with(&["a", "b"]);
        let mut surface = RecordingSurface::default();
        annotator.on_click(Coord::new(2.0, 3.0), &mut surface);

        let first = annotator.get_annotations();
        let second = annotator.get_annotations();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }
}
