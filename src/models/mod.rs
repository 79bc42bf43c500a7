pub mod finding;
pub mod scan;
pub mod vulnerability;

pub use finding::{FindingRecord, NvdFinding, Package};
pub use scan::ScanInfo;
pub use vulnerability::{Priority, Vulnerability};
