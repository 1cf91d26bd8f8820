use std::fmt::Write as _;

use glam::Vec3;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            fov_degrees: 45.0,
        }
    }
}

/// What one frame shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub view: RenderView,
    /// Free-form status lines, e.g. held keys or ticker reports.
    pub overlay: Vec<String>,
}

impl Frame {
    pub fn new(tick: u64, view: RenderView) -> Self {
        Self {
            tick,
            view,
            overlay: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.overlay.push(line.into());
        self
    }
}

/// Renderer-agnostic interface. Renderers read a frame description and
/// produce output; they never feed back into input or simulation state.
pub trait Renderer {
    type Output;

    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Renders a frame as human-readable text, for the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let view = &frame.view;
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame (tick={}) ===", frame.tick);
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );
        for line in &frame.overlay {
            let _ = writeln!(out, "  {line}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::FlyCamera;

    #[test]
    fn debug_renderer_prints_tick_and_camera() {
        let cam = FlyCamera::at(Vec3::new(0.0, 1.5, 0.0));
        let frame = Frame::new(42, cam.view());
        let output = DebugTextRenderer::new().render(&frame);

        assert!(output.contains("tick=42"));
        assert!(output.contains("eye=(0.00, 1.50, 0.00)"));
        assert!(output.contains("fov=45"));
    }

    #[test]
    fn overlay_lines_are_indented() {
        let frame = Frame::new(0, RenderView::default()).with_line("held: W");
        let output = DebugTextRenderer::new().render(&frame);
        assert!(output.contains("\n  held: W\n"));
    }
}
