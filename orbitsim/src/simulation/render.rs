//! Hand-off from the integrator to whatever draws the bodies.

use crate::simulation::states::{NVec2, Rgb};

/// Receives every body once per tick, right after its position update.
pub trait RenderSink {
    fn render(&mut self, position: &NVec2, radius: f64, color: Rgb);
}

/// One body as it was handed to a sink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedBody {
    pub position: NVec2,
    pub radius: f64,
    pub color: Rgb,
}

/// Records a frame, in active-set order
impl RenderSink for Vec<RenderedBody> {
    fn render(&mut self, position: &NVec2, radius: f64, color: Rgb) {
        self.push(RenderedBody { position: *position, radius, color });
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _position: &NVec2, _radius: f64, _color: Rgb) {}
}
