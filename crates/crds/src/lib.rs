//! ClickHouseInstallation CRD Definitions
//!
//! The `ClickHouseInstallation` custom resource, its synchronized status
//! aggregate and the merge policies used to propagate status between copies.

pub mod copy_options;
pub mod installation;
pub mod references;
pub mod resource;
pub mod status;
pub mod topology;
pub mod version;
pub mod watched;

pub use copy_options::*;
pub use installation::*;
pub use references::*;
pub use resource::*;
pub use status::*;
pub use topology::*;
pub use watched::*;

#[cfg(test)]
mod test_utils;
