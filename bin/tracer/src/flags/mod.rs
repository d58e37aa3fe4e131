//! CLI flags of the tracer binary.

mod tracer;
pub(crate) use tracer::TracerArgs;
