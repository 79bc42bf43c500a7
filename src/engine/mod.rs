pub mod assembler;
pub mod dedup;
pub mod evidence;
pub mod identity;
pub mod severity;

pub use assembler::VulnerabilityAssembler;
pub use dedup::DedupSink;
pub use identity::compute_instance_id;
pub use severity::classify;
