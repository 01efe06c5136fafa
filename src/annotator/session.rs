use tracing::{debug, trace};

use super::surface::Surface;

pub type Label = String;

/// A position in image-pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Label -> coordinate, in the order the labels were first placed.
///
/// Inserting a label that is already present replaces its coordinate but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    entries: Vec<(Label, Coord)>,
}

impl AnnotationSet {
    pub fn insert(&mut self, label: Label, coord: Coord) -> Option<Coord> {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, prev)) => Some(std::mem::replace(prev, coord)),
            None => {
                self.entries.push((label, coord));
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<Coord> {
        self.entries
            .iter()
            .find_map(|(l, c)| (l == label).then_some(*c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coord)> + '_ {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = (&'a str, Coord);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, Coord)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Index of the next label to place
    AwaitingClick(usize),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// label index, coordinate
    Placed(usize, Coord),
    Ignored,
}

pub const COMPLETE_TITLE: &str = "Annotation complete";

/// One pass over one ordered label list.
#[derive(Debug, Clone, Default)]
pub struct Session {
    labels: Vec<Label>,
    label_idx: usize,
    annotations: AnnotationSet,
}

impl Session {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Label>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            label_idx: 0,
            annotations: AnnotationSet::default(),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn state(&self) -> SessionState {
        if self.label_idx < self.labels.len() {
            SessionState::AwaitingClick(self.label_idx)
        } else {
            SessionState::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    pub fn current_label(&self) -> Option<&str> {
        self.labels.get(self.label_idx).map(String::as_str)
    }

    /// Number of clicks accepted so far.
    pub fn placed(&self) -> usize {
        self.label_idx
    }

    pub fn click(&mut self, coord: Coord) -> ClickOutcome {
        let Some(label) = self.labels.get(self.label_idx) else {
            trace!("click at {} ignored, session complete", coord);
            return ClickOutcome::Ignored;
        };

        debug!("placed {:?} at {}", label, coord);
        self.annotations.insert(label.clone(), coord);

        let idx = self.label_idx;
        self.label_idx += 1;
        ClickOutcome::Placed(idx, coord)
    }

    pub fn title(&self) -> String {
        match self.current_label() {
            Some(label) => format!("Please click on {}", label),
            None => COMPLETE_TITLE.to_string(),
        }
    }

    pub fn redraw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        surface.draw_image();
        for (label, coord) in self.annotations.iter() {
            surface.draw_marker(coord);
            surface.draw_text(coord, label);
        }
        surface.set_title(&self.title());
    }
}
