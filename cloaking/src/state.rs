/// A lightweight, serializable summary of a list's item states.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListStats {
    pub len: usize,
    pub cloaked: usize,
    pub materializing: usize,
    pub materialized: usize,
    /// Items whose renderer handle is currently held.
    pub live: usize,
    pub queued: usize,
}
