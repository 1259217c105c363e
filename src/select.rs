//! Choosing which capabilities are passed on

use super::*;

/// Capabilities to pass on, ascending
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection(Vec<Cap>);

/// Permitted set of the requested state if there is one, otherwise of the live state
pub fn source(requested: Option<&CapState>, live: &CapState) -> CapSet {
    requested.unwrap_or(live).permitted
}

/// Every capability numbered 0 to `last` that is set in `source`.
/// Numbers above `last` are not real capabilities on this kernel and are never picked.
pub fn select(source: CapSet, last: u8) -> Selection {
    Selection(
        Cap::iter()
            .filter(|c| (*c as u8) <= last && source.has(*c))
            .collect(),
    )
}

impl Selection {
    pub fn iter(&self) -> impl Iterator<Item = Cap> + '_ {
        self.0.iter().copied()
    }
    /// Propagate or not, for each number 0..=last
    pub fn decisions(&self, last: u8) -> Vec<bool> {
        (0..=last)
            .map(|n| self.iter().any(|c| c as u8 == n))
            .collect()
    }
}

/// Lowercase name, as libcap's cap_to_name prints it
pub fn cap_name(cap: Cap) -> String {
    cap.to_string().to_ascii_lowercase()
}
