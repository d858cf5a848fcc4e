//! Pneumatic components: a closed set of kinds, each with a fixed number of
//! terminals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fixed::Fixed64;
use crate::id::{ComponentId, TerminalId};

/// The two independent push buttons on a button valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Connects terminals 1 and 2.
    Left,
    /// Connects terminals 3 and 4.
    Right,
}

/// Kind-specific state of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentKind {
    /// Pushes its single terminal toward the supply pressure.
    Compressor,
    /// Two gated pairs: 1↔2 opened by `left_pressed`, 3↔4 by `right_pressed`.
    Button {
        left_pressed: bool,
        right_pressed: bool,
    },
    /// Reads its terminal; `expansion` is pressure over the full-stroke pressure.
    Cylinder { expansion: Fixed64 },
    /// Equalizes its three terminals pairwise.
    Splitter,
}

impl ComponentKind {
    /// Number of terminals, numbered from 1. Never changes at runtime.
    pub fn terminal_count(&self) -> u8 {
        match self {
            ComponentKind::Compressor => 1,
            ComponentKind::Button { .. } => 4,
            ComponentKind::Cylinder { .. } => 1,
            ComponentKind::Splitter => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Compressor => "compressor",
            ComponentKind::Button { .. } => "button",
            ComponentKind::Cylinder { .. } => "cylinder",
            ComponentKind::Splitter => "splitter",
        }
    }
}

/// A component placed in the network.
///
/// `terminal_pressures` and `alert` are outputs of the relaxation step and
/// are overwritten on every step the component is processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    /// Last observed pressure per terminal. Seeded at zero for every terminal.
    pub terminal_pressures: BTreeMap<TerminalId, Fixed64>,
    /// Wiring diagnostic from the last step, or `None`.
    pub alert: Option<String>,
}

impl Component {
    pub fn new(id: impl Into<ComponentId>, kind: ComponentKind) -> Self {
        let terminal_pressures = (1..=kind.terminal_count())
            .map(|t| (TerminalId(t), Fixed64::ZERO))
            .collect();
        Self {
            id: id.into(),
            kind,
            terminal_pressures,
            alert: None,
        }
    }

    pub fn compressor(id: impl Into<ComponentId>) -> Self {
        Self::new(id, ComponentKind::Compressor)
    }

    /// A button valve with both buttons released.
    pub fn button(id: impl Into<ComponentId>) -> Self {
        Self::new(
            id,
            ComponentKind::Button {
                left_pressed: false,
                right_pressed: false,
            },
        )
    }

    /// A retracted cylinder.
    pub fn cylinder(id: impl Into<ComponentId>) -> Self {
        Self::new(
            id,
            ComponentKind::Cylinder {
                expansion: Fixed64::ZERO,
            },
        )
    }

    pub fn splitter(id: impl Into<ComponentId>) -> Self {
        Self::new(id, ComponentKind::Splitter)
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Terminal ids in processing order.
    pub fn terminals(&self) -> impl Iterator<Item = TerminalId> + use<> {
        (1..=self.kind.terminal_count()).map(TerminalId)
    }

    /// Last observed pressure at a terminal (zero if the terminal is unknown).
    pub fn terminal_pressure(&self, terminal: TerminalId) -> Fixed64 {
        self.terminal_pressures
            .get(&terminal)
            .copied()
            .unwrap_or(Fixed64::ZERO)
    }

    /// Gate state for buttons, `None` for other kinds.
    pub fn gate(&self, gate: Gate) -> Option<bool> {
        match (&self.kind, gate) {
            (ComponentKind::Button { left_pressed, .. }, Gate::Left) => Some(*left_pressed),
            (ComponentKind::Button { right_pressed, .. }, Gate::Right) => Some(*right_pressed),
            _ => None,
        }
    }

    /// Press or release a button. Returns `false` if this is not a button.
    pub fn set_gate(&mut self, gate: Gate, pressed: bool) -> bool {
        match (&mut self.kind, gate) {
            (ComponentKind::Button { left_pressed, .. }, Gate::Left) => *left_pressed = pressed,
            (ComponentKind::Button { right_pressed, .. }, Gate::Right) => *right_pressed = pressed,
            _ => return false,
        }
        true
    }

    /// Flip a button and return its new state, `None` if this is not a button.
    pub fn toggle_gate(&mut self, gate: Gate) -> Option<bool> {
        let pressed = !self.gate(gate)?;
        self.set_gate(gate, pressed);
        Some(pressed)
    }

    /// Raw cylinder expansion. Not clamped: above 1 means over-pressure.
    pub fn expansion(&self) -> Option<Fixed64> {
        match self.kind {
            ComponentKind::Cylinder { expansion } => Some(expansion),
            _ => None,
        }
    }

    /// Cylinder expansion clamped to `[0, 1]` for positioning the piston rod.
    pub fn stroke_fraction(&self) -> Option<Fixed64> {
        self.expansion()
            .map(|e| e.clamp(Fixed64::ZERO, Fixed64::ONE))
    }
}
