//! The relaxation engine: one discrete pressure update over a set of
//! components and a tube arena.
//!
//! # Two-Phase Step
//!
//! Each [`step`] runs:
//! 1. **Vent** -- every tube with an atmosphere endpoint is reset to zero
//!    residual mass.
//! 2. **Relax** -- components are visited in slice order. Each one resolves
//!    its terminals, reads every terminal pressure, writes those pressures
//!    into its terminal map and then applies its kind rule, adding transfers
//!    into the arena.
//!
//! Transfers are always added, never assigned, so a tube shared by two
//! components keeps the contribution of whichever was visited first. Visit
//! order therefore changes intermediate values within a step.
//!
//! The step is total. Wiring faults never produce errors; they are reported
//! through the component's `alert` string:
//! - an unwired terminal reads as a synthetic atmosphere tube (pressure 0,
//!   writes discarded) and sets `"No tubes connected to terminal N"`;
//! - the first over-wired terminal sets
//!   `"Multiple tubes connected to terminal N"` and abandons the component for
//!   this step: no pressures are written and no transfers happen.
//!
//! The coefficients in [`RelaxationParams`] are applied once per call with no
//! time scaling.

use crate::component::{Component, ComponentKind};
use crate::fixed::Fixed64;
use crate::id::{TerminalId, TubeId};
use crate::params::RelaxationParams;
use crate::resolver::{Wiring, wiring_at};
use crate::tube::TubeArena;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// A resolved terminal for the duration of one component visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Port {
    Tube(TubeId),
    /// No tube: reads zero, absorbs writes.
    Vented,
}

impl Port {
    fn pressure(self, tubes: &TubeArena) -> Fixed64 {
        match self {
            Port::Tube(id) => tubes.get(id).map_or(Fixed64::ZERO, |t| t.pressure()),
            Port::Vented => Fixed64::ZERO,
        }
    }

    fn add_mass(self, tubes: &mut TubeArena, delta: Fixed64) {
        if let Port::Tube(id) = self {
            if let Some(tube) = tubes.get_mut(id) {
                tube.residual_mass = tube.residual_mass.saturating_add(delta);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What happened to one component during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentOutcome {
    /// Terminals resolved (possibly some unwired) and the kind rule ran.
    Relaxed,
    /// An over-wired terminal stopped the visit before any write.
    Aborted { terminal: TerminalId },
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// Run one step with the default constants (`k = 0.3`, supply 3, full
/// stroke 1.5).
pub fn step(components: &mut [Component], tubes: &mut TubeArena) {
    step_with(components, tubes, &RelaxationParams::default());
}

/// Run one step with explicit constants.
pub fn step_with(components: &mut [Component], tubes: &mut TubeArena, params: &RelaxationParams) {
    vent_atmosphere(tubes);
    for component in components.iter_mut() {
        relax_component(component, tubes, params);
    }
}

/// Zero every tube open to atmosphere. Returns how many tubes were vented.
pub fn vent_atmosphere(tubes: &mut TubeArena) -> usize {
    let mut vented = 0;
    for tube in tubes.values_mut().filter(|t| t.is_vented()) {
        tube.residual_mass = Fixed64::ZERO;
        vented += 1;
    }
    vented
}

/// Visit a single component: resolve, read, write pressures, transfer.
pub fn relax_component(
    component: &mut Component,
    tubes: &mut TubeArena,
    params: &RelaxationParams,
) -> ComponentOutcome {
    let ports = match resolve_ports(component, tubes) {
        Ok(ports) => ports,
        Err(terminal) => {
            log::trace!(
                "{} '{}' skipped: terminal {terminal} is over-wired",
                component.kind_name(),
                component.id
            );
            return ComponentOutcome::Aborted { terminal };
        }
    };

    // All reads happen before any transfer so a tube wired to two terminals
    // of the same component sees one consistent pressure.
    let pressures: Vec<Fixed64> = ports.iter().map(|p| p.pressure(tubes)).collect();
    for (terminal, pressure) in component.terminals().zip(&pressures) {
        component.terminal_pressures.insert(terminal, *pressure);
    }

    let k = params.diffusion;
    match &mut component.kind {
        ComponentKind::Compressor => {
            let deficit = params.supply_pressure.saturating_sub(pressures[0]);
            if deficit > Fixed64::ZERO {
                ports[0].add_mass(tubes, deficit.saturating_mul(k));
            }
        }
        ComponentKind::Button {
            left_pressed,
            right_pressed,
        } => {
            gated_pair(tubes, (ports[0], pressures[0]), (ports[1], pressures[1]), *left_pressed, k);
            gated_pair(tubes, (ports[2], pressures[2]), (ports[3], pressures[3]), *right_pressed, k);
        }
        ComponentKind::Cylinder { expansion } => {
            // A zero full-stroke pressure only comes from unvalidated params.
            *expansion = pressures[0]
                .checked_div(params.cylinder_full_pressure)
                .unwrap_or(Fixed64::ZERO);
        }
        ComponentKind::Splitter => {
            for (a, b) in [(0, 1), (1, 2), (0, 2)] {
                equalize(tubes, (ports[a], pressures[a]), (ports[b], pressures[b]), k);
            }
        }
    }

    log::trace!(
        "{} '{}' relaxed: pressures {:?}",
        component.kind_name(),
        component.id,
        pressures
    );
    ComponentOutcome::Relaxed
}

/// Resolve every terminal in order and rewrite the component's alert.
///
/// The alert is cleared first. Each unwired terminal overwrites it, single
/// tubes leave it alone, and the first over-wired terminal writes its own
/// alert and stops resolution.
fn resolve_ports(component: &mut Component, tubes: &TubeArena) -> Result<Vec<Port>, TerminalId> {
    component.alert = None;
    let mut ports = Vec::with_capacity(usize::from(component.kind.terminal_count()));
    for terminal in component.terminals() {
        match wiring_at(&component.id, terminal, tubes) {
            Wiring::Unwired => {
                component.alert = Some(format!("No tubes connected to terminal {terminal}"));
                ports.push(Port::Vented);
            }
            Wiring::Single(id) => ports.push(Port::Tube(id)),
            Wiring::Multiple(_) => {
                component.alert = Some(format!("Multiple tubes connected to terminal {terminal}"));
                return Err(terminal);
            }
        }
    }
    Ok(ports)
}

/// Move `(pa - pb) * k` from `a` to `b`. Negative differences flow back.
fn equalize(tubes: &mut TubeArena, a: (Port, Fixed64), b: (Port, Fixed64), k: Fixed64) {
    let flow = a.1.saturating_sub(b.1).saturating_mul(k);
    a.0.add_mass(tubes, flow.saturating_neg());
    b.0.add_mass(tubes, flow);
}

/// An open gate equalizes the pair; a closed gate bleeds the output side
/// toward atmosphere and leaves the input side untouched.
fn gated_pair(
    tubes: &mut TubeArena,
    input: (Port, Fixed64),
    output: (Port, Fixed64),
    open: bool,
    k: Fixed64,
) {
    if open {
        equalize(tubes, input, output, k);
    } else {
        output.0.add_mass(tubes, output.1.saturating_mul(k).saturating_neg());
    }
}
