//! Observability for the data science tutor: subscriber setup and the GenAI
//! attribute names used on model-call spans.

pub mod genai_attrs;
pub mod tracing_setup;
