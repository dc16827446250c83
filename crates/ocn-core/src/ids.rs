use core::fmt;
use core::num::NonZeroU32;

/// Compact identity of a node within one network.
///
/// - `u32` keeps paths and port tables small
/// - `NonZero` enables `Option<NodeId>` to be pointer-optimized
/// - the registry hands out values starting at 1, so `index()` is a dense
///   0-based slot number
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// First identity handed out by a fresh registry.
    pub const FIRST: NodeId = NodeId(NonZeroU32::MIN);

    /// Wrap a raw registry value. Returns `None` for 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Create an id from a 0-based slot index by storing index+1.
    ///
    /// Returns `None` if `index + 1` does not fit.
    pub fn from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(Self::new)
    }

    /// Raw registry value (always >= 1).
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Recover the 0-based slot index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }

    /// The id handed out after this one, or `None` once the counter is spent.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.get())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.get())
    }
}
