//! Read-only snapshots for the view layer.
//!
//! All types are owned copies -- no references into the network -- so a
//! renderer can hold them across the next step.

use crate::component::{Component, Gate};
use crate::endpoint::Endpoint;
use crate::fixed::Fixed64;
use crate::id::{ComponentId, TerminalId, TubeId};
use crate::tube::Tube;

// ---------------------------------------------------------------------------
// Component snapshot
// ---------------------------------------------------------------------------

/// A copy of one component's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSnapshot {
    pub id: ComponentId,
    /// `"compressor"`, `"button"`, `"cylinder"` or `"splitter"`.
    pub kind: &'static str,
    /// Pressures in terminal order.
    pub terminal_pressures: Vec<(TerminalId, Fixed64)>,
    pub alert: Option<String>,
    /// Raw expansion (cylinders only).
    pub expansion: Option<Fixed64>,
    /// Expansion clamped to `[0, 1]` (cylinders only).
    pub stroke_fraction: Option<Fixed64>,
    /// Button gate states (buttons only).
    pub left_pressed: Option<bool>,
    pub right_pressed: Option<bool>,
    /// Tubes with at least one end on this component.
    pub connected_tubes: Vec<TubeId>,
}

impl ComponentSnapshot {
    pub fn capture(component: &Component, connected_tubes: Vec<TubeId>) -> Self {
        Self {
            id: component.id.clone(),
            kind: component.kind_name(),
            terminal_pressures: component
                .terminals()
                .map(|t| (t, component.terminal_pressure(t)))
                .collect(),
            alert: component.alert.clone(),
            expansion: component.expansion(),
            stroke_fraction: component.stroke_fraction(),
            left_pressed: component.gate(Gate::Left),
            right_pressed: component.gate(Gate::Right),
            connected_tubes,
        }
    }

    pub fn is_button(&self) -> bool {
        self.left_pressed.is_some()
    }
}

// ---------------------------------------------------------------------------
// Tube snapshot
// ---------------------------------------------------------------------------

/// A copy of one tube's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeSnapshot {
    pub id: TubeId,
    pub name: String,
    pub from: Endpoint,
    pub to: Endpoint,
    pub residual_mass: Fixed64,
    /// `max(0, residual_mass)`.
    pub pressure: Fixed64,
    /// Residual mass above the session's pressurized threshold.
    pub pressurized: bool,
}

impl TubeSnapshot {
    pub fn capture(id: TubeId, tube: &Tube, threshold: Fixed64) -> Self {
        Self {
            id,
            name: tube.name.clone(),
            from: tube.from.clone(),
            to: tube.to.clone(),
            residual_mass: tube.residual_mass,
            pressure: tube.pressure(),
            pressurized: tube.is_pressurized(threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tube::TubeArena;

    #[test]
    fn button_snapshot_carries_gates() {
        let mut button = Component::button("b");
        button.set_gate(Gate::Right, true);
        let snap = ComponentSnapshot::capture(&button, Vec::new());
        assert_eq!(snap.kind, "button");
        assert!(snap.is_button());
        assert_eq!(snap.left_pressed, Some(false));
        assert_eq!(snap.right_pressed, Some(true));
        assert_eq!(snap.expansion, None);
        assert_eq!(snap.terminal_pressures.len(), 4);
    }

    #[test]
    fn cylinder_snapshot_carries_expansion() {
        let snap = ComponentSnapshot::capture(&Component::cylinder("y"), Vec::new());
        assert_eq!(snap.expansion, Some(Fixed64::ZERO));
        assert_eq!(snap.stroke_fraction, Some(Fixed64::ZERO));
        assert_eq!(snap.left_pressed, None);
        assert!(!snap.is_button());
    }

    #[test]
    fn tube_snapshot_reports_clamped_pressure() {
        let mut arena = TubeArena::with_key();
        let tube = Tube::new("t").with_residual_mass(Fixed64::from_num(-0.5));
        let id = arena.insert(tube.clone());
        let snap = TubeSnapshot::capture(id, &tube, Fixed64::from_num(0.5));
        assert_eq!(snap.pressure, Fixed64::ZERO);
        assert!(!snap.pressurized);
        assert_eq!(snap.from, Endpoint::Atmosphere);
    }
}
