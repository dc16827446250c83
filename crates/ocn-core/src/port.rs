use core::fmt;

/// Slot number of a physical link on one side of a node.
///
/// Outgoing and incoming links are numbered independently, each starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PortNumber(pub u32);

impl PortNumber {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Smallest port number not present in `used`.
    pub fn lowest_free<I>(used: I) -> PortNumber
    where
        I: IntoIterator<Item = PortNumber>,
    {
        let mut taken: Vec<u32> = used.into_iter().map(PortNumber::get).collect();
        taken.sort_unstable();
        taken.dedup();

        let mut candidate = 0;
        for port in taken {
            if port != candidate {
                break;
            }
            candidate += 1;
        }
        PortNumber(candidate)
    }
}

impl fmt::Display for PortNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PortNumber {
    fn from(value: u32) -> Self {
        PortNumber(value)
    }
}
