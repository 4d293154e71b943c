//! Render sink interface
//!
//! The core does not draw; it hands each particle to an externally
//! supplied sink once per frame, strictly after the update barrier. Window
//! and context management, vertex emission, blending, and frame pacing all
//! live with the host.

/// Consumer of per-particle draw calls
///
/// Invoked once per particle per frame in the driver's iteration order.
/// No return value and no failure mode; a sink that cannot draw should
/// handle that itself.
pub trait RenderSink {
    /// Draw a filled circle at `(x, y)` with the given radius and color
    /// channel intensities.
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: [f32; 3]);
}

/// A sink that discards everything; handy for headless runs and benches
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn draw_circle(&mut self, _x: f32, _y: f32, _radius: f32, _color: [f32; 3]) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sink_accepts_calls() {
        let mut sink = NullSink;
        sink.draw_circle(1.0, 2.0, 3.0, [1.0, 0.0, 0.0]);
    }
}
