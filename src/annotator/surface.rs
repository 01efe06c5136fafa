use super::session::Coord;

/// Whatever a session draws on. All coordinates are in image-pixel space.
pub trait Surface {
    fn clear(&mut self);

    /// Draw the base image the surface was created with.
    fn draw_image(&mut self);

    fn draw_marker(&mut self, pos: Coord);

    fn draw_text(&mut self, pos: Coord, text: &str);

    fn set_title(&mut self, title: &str);
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Image,
    Marker(Coord),
    Text(Coord, String),
    Title(String),
}

/// Records draw calls instead of painting them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn title(&self) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn markers(&self) -> Vec<Coord> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Marker(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn draw_image(&mut self) {
        self.ops.push(DrawOp::Image);
    }

    fn draw_marker(&mut self, pos: Coord) {
        self.ops.push(DrawOp::Marker(pos));
    }

    fn draw_text(&mut self, pos: Coord, text: &str) {
        self.ops.push(DrawOp::Text(pos, text.to_string()));
    }

    fn set_title(&mut self, title: &str) {
        self.ops.push(DrawOp::Title(title.to_string()));
    }
}
