pub mod diagnostic;
pub mod emit;
pub mod literal;
pub mod model;
pub mod samples;
pub mod span;

pub use diagnostic::{render_diagnostics, Diagnostic, Severity};
pub use emit::Emitter;
pub use model::{KeyConvention, LayerParams, ModelParameters};
pub use samples::{Sample, TestSamples};
pub use span::Span;
