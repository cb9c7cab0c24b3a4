//! Capability trait for resources that carry a [`ChiStatus`].
//!
//! The status synchronizer is generic over this trait so that it never needs
//! to know the concrete resource kind it is writing.

use crate::status::ChiStatus;
use kube::Resource;

/// A namespaced Kubernetes resource with a synchronized status aggregate.
///
/// Namespace, name and resource version come from [`kube::ResourceExt`].
pub trait StatusResource: Resource<DynamicType = ()> + Clone + Send + Sync + 'static {
    /// The status aggregate, if the resource has one yet
    fn status(&self) -> Option<&ChiStatus>;

    /// The status aggregate, creating an empty one first if necessary
    fn ensure_status(&mut self) -> &ChiStatus;

    /// Replace the status aggregate wholesale (start of a new cycle)
    fn replace_status(&mut self, status: ChiStatus);
}
