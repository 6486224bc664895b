use std::fmt;

use thiserror::Error;

/// One half of a shader program, compiled independently before linking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failures the render path can surface. Constructors return these instead
/// of half-initialized objects; callers hold `Option`s and degrade.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A stage failed to compile; `log` carries the driver's info log.
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },

    /// Both stages compiled but the program did not link.
    #[error("shader program failed to link: {log}")]
    Link { log: String },

    /// A GPU-side object could not be created at all.
    #[error("failed to create {what}: {detail}")]
    ResourceInit { what: &'static str, detail: String },
}

impl RenderError {
    pub(crate) fn resource(what: &'static str, detail: impl Into<String>) -> Self {
        Self::ResourceInit {
            what,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_name_the_stage() {
        let err = RenderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: 'foo' : undeclared identifier".to_string(),
        };
        let text = err.to_string();
        assert!(text.starts_with("fragment shader failed to compile"));
        assert!(text.contains("undeclared identifier"));
    }

    #[test]
    fn link_and_resource_errors_format() {
        assert!(RenderError::Link {
            log: "varying mismatch".into()
        }
        .to_string()
        .contains("failed to link"));
        assert!(RenderError::resource("texture object", "out of handles")
            .to_string()
            .contains("texture object"));
    }
}
