use std::fmt;

use crate::uniform::{UniformCache, UniformSink, UniformValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {log}")]
    Link { log: String },
}

/// GPU-side shader operations. Object lifetimes follow the usual GL model:
/// shader and program objects exist from creation until explicitly deleted,
/// whether or not compilation or linking succeeded.
pub trait ShaderBackend {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle;
    /// Compile `source` into `shader`. The error carries the info log.
    fn compile_shader(&mut self, shader: ShaderHandle, source: &str) -> Result<(), String>;
    fn delete_shader(&mut self, shader: ShaderHandle);

    fn create_program(&mut self) -> ProgramHandle;
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);
    /// Link `program`. The error carries the info log.
    fn link_program(&mut self, program: ProgramHandle) -> Result<(), String>;
    fn delete_program(&mut self, program: ProgramHandle);

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<i32>;
    fn set_uniform(&mut self, program: ProgramHandle, location: i32, value: UniformValue);
}

/// Stage sources of one program. An empty geometry source means no
/// geometry stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
    pub geometry: Option<String>,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        let geometry = geometry.into();
        self.geometry = (!geometry.is_empty()).then_some(geometry);
        self
    }

    fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> {
        [
            Some((ShaderStage::Vertex, self.vertex.as_str())),
            Some((ShaderStage::Fragment, self.fragment.as_str())),
            self.geometry
                .as_deref()
                .map(|src| (ShaderStage::Geometry, src)),
        ]
        .into_iter()
        .flatten()
    }
}

/// A linked program plus its resolved uniform locations.
///
/// The program object belongs to the backend that built it; release it
/// with [`delete`](Self::delete).
#[derive(Debug)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    uniforms: UniformCache,
}

impl ShaderProgram {
    /// Compile every stage and link them. Intermediate shader objects are
    /// deleted before returning, on success and on every failure path.
    pub fn build<B: ShaderBackend + ?Sized>(
        backend: &mut B,
        source: &ShaderSource,
    ) -> Result<Self, ShaderError> {
        let mut shaders = Vec::with_capacity(3);
        let result = Self::compile_and_link(backend, source, &mut shaders);
        for shader in shaders {
            backend.delete_shader(shader);
        }
        match &result {
            Ok(program) => tracing::debug!(program = program.handle.0, "shader program linked"),
            Err(err) => tracing::warn!(%err, "shader program build failed"),
        }
        result
    }

    fn compile_and_link<B: ShaderBackend + ?Sized>(
        backend: &mut B,
        source: &ShaderSource,
        shaders: &mut Vec<ShaderHandle>,
    ) -> Result<Self, ShaderError> {
        for (stage, code) in source.stages() {
            let shader = backend.create_shader(stage);
            shaders.push(shader);
            backend
                .compile_shader(shader, code)
                .map_err(|log| ShaderError::Compile { stage, log })?;
        }

        let handle = backend.create_program();
        for shader in shaders.iter() {
            backend.attach_shader(handle, *shader);
        }
        if let Err(log) = backend.link_program(handle) {
            backend.delete_program(handle);
            return Err(ShaderError::Link { log });
        }
        Ok(Self {
            handle,
            uniforms: UniformCache::new(),
        })
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Borrow the program together with its backend as a [`UniformSink`].
    pub fn uniforms<'a, B: ShaderBackend + ?Sized>(
        &'a mut self,
        backend: &'a mut B,
    ) -> ProgramUniforms<'a, B> {
        ProgramUniforms {
            program: self,
            backend,
        }
    }

    pub fn delete<B: ShaderBackend + ?Sized>(self, backend: &mut B) {
        backend.delete_program(self.handle);
    }
}

/// Writes uniforms of one program through its backend.
pub struct ProgramUniforms<'a, B: ?Sized> {
    program: &'a mut ShaderProgram,
    backend: &'a mut B,
}

impl<B: ShaderBackend + ?Sized> UniformSink for ProgramUniforms<'_, B> {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        let handle = self.program.handle;
        let backend = &mut *self.backend;
        let location = self
            .program
            .uniforms
            .location(name, |n| backend.uniform_location(handle, n));
        if let Some(location) = location {
            backend.set_uniform(handle, location, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashMap};

    /// In-memory backend that tracks live objects and fails on demand.
    #[derive(Default)]
    struct FakeBackend {
        next: u32,
        live_shaders: BTreeSet<u32>,
        live_programs: BTreeSet<u32>,
        fail_compile: Option<ShaderStage>,
        fail_link: bool,
        stages: HashMap<u32, ShaderStage>,
        attached: Vec<(u32, u32)>,
        written: Vec<(i32, UniformValue)>,
    }

    impl FakeBackend {
        fn id(&mut self) -> u32 {
            self.next += 1;
            self.next
        }
    }

    impl ShaderBackend for FakeBackend {
        fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle {
            let id = self.id();
            self.live_shaders.insert(id);
            self.stages.insert(id, stage);
            ShaderHandle(id)
        }

        fn compile_shader(&mut self, shader: ShaderHandle, _source: &str) -> Result<(), String> {
            match self.fail_compile {
                Some(stage) if self.stages[&shader.0] == stage => Err("syntax error".into()),
                _ => Ok(()),
            }
        }

        fn delete_shader(&mut self, shader: ShaderHandle) {
            self.live_shaders.remove(&shader.0);
        }

        fn create_program(&mut self) -> ProgramHandle {
            let id = self.id();
            self.live_programs.insert(id);
            ProgramHandle(id)
        }

        fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
            self.attached.push((program.0, shader.0));
        }

        fn link_program(&mut self, _program: ProgramHandle) -> Result<(), String> {
            if self.fail_link {
                Err("unresolved symbol".into())
            } else {
                Ok(())
            }
        }

        fn delete_program(&mut self, program: ProgramHandle) {
            self.live_programs.remove(&program.0);
        }

        fn uniform_location(&self, _program: ProgramHandle, name: &str) -> Option<i32> {
            match name {
                "view" => Some(0),
                "projection" => Some(1),
                _ => None,
            }
        }

        fn set_uniform(&mut self, _program: ProgramHandle, location: i32, value: UniformValue) {
            self.written.push((location, value));
        }
    }

    fn source() -> ShaderSource {
        ShaderSource::new("void main() {}", "void main() {}")
    }

    #[test]
    fn successful_build_leaves_only_the_program() {
        let mut gl = FakeBackend::default();
        let program = ShaderProgram::build(&mut gl, &source()).unwrap();
        assert!(gl.live_shaders.is_empty());
        assert_eq!(gl.live_programs.len(), 1);
        assert_eq!(gl.attached.len(), 2);
        program.delete(&mut gl);
        assert!(gl.live_programs.is_empty());
    }

    #[test]
    fn compile_failure_deletes_earlier_stages() {
        let mut gl = FakeBackend {
            fail_compile: Some(ShaderStage::Fragment),
            ..Default::default()
        };
        let err = ShaderProgram::build(&mut gl, &source()).unwrap_err();
        assert!(matches!(
            err,
            ShaderError::Compile {
                stage: ShaderStage::Fragment,
                ..
            }
        ));
        assert!(gl.live_shaders.is_empty());
        assert!(gl.live_programs.is_empty());
    }

    #[test]
    fn link_failure_deletes_shaders_and_program() {
        let mut gl = FakeBackend {
            fail_link: true,
            ..Default::default()
        };
        let src = source().with_geometry("void main() {}");
        let err = ShaderProgram::build(&mut gl, &src).unwrap_err();
        assert!(err.to_string().contains("unresolved symbol"));
        assert_eq!(gl.attached.len(), 3);
        assert!(gl.live_shaders.is_empty());
        assert!(gl.live_programs.is_empty());
    }

    #[test]
    fn empty_geometry_source_means_no_stage() {
        let src = source().with_geometry("");
        assert_eq!(src.geometry, None);
        assert_eq!(src.stages().count(), 2);
    }

    #[test]
    fn uniforms_resolve_once_and_skip_unknown_names() {
        let mut gl = FakeBackend::default();
        let mut program = ShaderProgram::build(&mut gl, &source()).unwrap();
        {
            let mut sink = program.uniforms(&mut gl);
            sink.set_float("projection", 2.0);
            sink.set_float("projection", 3.0);
            sink.set_float("fog", 1.0);
        }
        assert_eq!(
            gl.written,
            vec![(1, UniformValue::Float(2.0)), (1, UniformValue::Float(3.0))]
        );
    }
}
