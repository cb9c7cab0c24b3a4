//! Merge policy for [`ChiStatus::copy_from`](crate::ChiStatus::copy_from).

/// Selects which field groups `copy_from` transfers from a source status.
///
/// Switches are independent and may be combined; they are always applied in
/// declaration order: inheritable, actions, errors, main fields, normalized,
/// whole status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStatusOptions {
    /// Replace task-id, action and error histories plus the tables-created set
    pub inheritable_fields: bool,
    /// Replace the current action, merge the action history, replace the
    /// tables-created set and the used templates
    pub actions: bool,
    /// Replace the current error, merge the error history
    pub errors: bool,
    /// Replace the bulk field set (everything but the completed snapshot)
    pub main_fields: bool,
    /// Replace the normalized snapshot only
    pub normalized: bool,
    /// Replace everything, including the completed snapshot
    pub whole_status: bool,
}

impl CopyStatusOptions {
    /// Carry histories over from the previous cycle
    pub fn inheritable() -> Self {
        Self { inheritable_fields: true, ..Self::default() }
    }

    /// Propagate in-progress actions
    pub fn actions() -> Self {
        Self { actions: true, ..Self::default() }
    }

    /// Propagate errors
    pub fn errors() -> Self {
        Self { errors: true, ..Self::default() }
    }

    /// Propagate the bulk field set
    pub fn main_fields() -> Self {
        Self { main_fields: true, ..Self::default() }
    }

    /// Propagate the normalized snapshot
    pub fn normalized() -> Self {
        Self { normalized: true, ..Self::default() }
    }

    /// Propagate the entire status
    pub fn whole_status() -> Self {
        Self { whole_status: true, ..Self::default() }
    }

    /// Switches set in either `self` or `other`
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            inheritable_fields: self.inheritable_fields || other.inheritable_fields,
            actions: self.actions || other.actions,
            errors: self.errors || other.errors,
            main_fields: self.main_fields || other.main_fields,
            normalized: self.normalized || other.normalized,
            whole_status: self.whole_status || other.whole_status,
        }
    }

    /// True when no switch is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
