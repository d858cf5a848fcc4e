//! Topology resolution: which tubes are plugged into a terminal.
//!
//! Pure queries over the tube arena. Each call is a linear scan, so one step
//! costs O(components x terminals x tubes).

use crate::id::{ComponentId, TerminalId, TubeId};
use crate::tube::TubeArena;

/// How a single terminal is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wiring {
    /// No tube ends here.
    Unwired,
    /// Exactly one tube end.
    Single(TubeId),
    /// More than one tube end (count included).
    Multiple(usize),
}

/// Every tube with an end at `component/terminal`, in arena order.
///
/// A tube with both ends at the same terminal appears twice.
pub fn tubes_at_terminal(
    component: &ComponentId,
    terminal: TerminalId,
    tubes: &TubeArena,
) -> Vec<TubeId> {
    let mut attached = Vec::new();
    for (id, tube) in tubes {
        for _ in 0..tube.attachments(component, terminal) {
            attached.push(id);
        }
    }
    attached
}

/// Classify the wiring of one terminal.
pub fn wiring_at(component: &ComponentId, terminal: TerminalId, tubes: &TubeArena) -> Wiring {
    match tubes_at_terminal(component, terminal, tubes).as_slice() {
        [] => Wiring::Unwired,
        [only] => Wiring::Single(*only),
        many => Wiring::Multiple(many.len()),
    }
}

/// Every tube with at least one end on any terminal of `component`, each
/// listed once, in arena order.
pub fn tubes_at_component(component: &ComponentId, tubes: &TubeArena) -> Vec<TubeId> {
    tubes
        .iter()
        .filter(|(_, tube)| tube.touches_component(component))
        .map(|(id, _)| id)
        .collect()
}
