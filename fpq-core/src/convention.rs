use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How signed-normalized values lay out their sign.
///
/// - **Std**: magnitude as unorm in the upper `nbits - 1` bits, sign in bit 0
/// - **OpenGl** / **Direct3D**: two's-complement `nbits` field with
///   `maxInt = 2^(nbits-1) - 1`, decoded values clamped to `>= -1.0`
///
/// OpenGl and Direct3D are numerically identical and share one implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignConvention {
    #[default]
    Std,
    #[serde(alias = "ogl")]
    OpenGl,
    #[serde(alias = "d3d")]
    Direct3D,
}

impl SignConvention {
    pub const ALL: [SignConvention; 3] =
        [SignConvention::Std, SignConvention::OpenGl, SignConvention::Direct3D];

    /// Whether the field is a two's-complement integer.
    pub const fn is_twos_complement(self) -> bool {
        matches!(self, SignConvention::OpenGl | SignConvention::Direct3D)
    }
}

impl fmt::Display for SignConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignConvention::Std => f.write_str("std"),
            SignConvention::OpenGl => f.write_str("opengl"),
            SignConvention::Direct3D => f.write_str("direct3d"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConvention(pub String);

impl fmt::Display for UnknownConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sign convention '{}' (expected std, opengl or direct3d)", self.0)
    }
}

impl std::error::Error for UnknownConvention {}

impl FromStr for SignConvention {
    type Err = UnknownConvention;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "std" => Ok(SignConvention::Std),
            "opengl" | "ogl" => Ok(SignConvention::OpenGl),
            "direct3d" | "d3d" => Ok(SignConvention::Direct3D),
            _ => Err(UnknownConvention(s.to_string())),
        }
    }
}
