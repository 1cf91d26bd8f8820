//! Rendering collaborators of the engine core.
//!
//! # Invariants
//! - Renderers read frame descriptions and never mutate input or tick state.
//! - Building a shader program never leaks intermediate shader objects.
//!
//! No GPU backend lives here. [`ShaderBackend`] and [`UniformSink`] are the
//! seams a real backend implements; [`DebugTextRenderer`] stands in for one
//! in the CLI and tests.

mod camera;
mod renderer;
mod shader;
mod uniform;

pub use camera::FlyCamera;
pub use renderer::{DebugTextRenderer, Frame, RenderView, Renderer};
pub use shader::{
    ProgramHandle, ProgramUniforms, ShaderBackend, ShaderError, ShaderHandle, ShaderProgram,
    ShaderSource, ShaderStage,
};
pub use uniform::{RecordingSink, UniformCache, UniformSink, UniformValue};

pub fn crate_info() -> &'static str {
    "ember-render v0.1.0"
}
