use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::endpoint::Endpoint;
use crate::fixed::Fixed64;
use crate::id::{ComponentId, TerminalId, TubeId};
use crate::pressure::pressure_of;

/// Arena of tubes. Components never hold tube references; the resolver hands
/// out [`TubeId`]s and the engine indexes the arena with them, so two
/// components touching the same tube in one step compose in visit order.
pub type TubeArena = SlotMap<TubeId, Tube>;

/// Which end of a tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TubeEnd {
    From,
    To,
}

/// A flexible tube between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tube {
    /// Caller-facing name ("tube1").
    pub name: String,
    pub from: Endpoint,
    pub to: Endpoint,
    /// Stored pressure-equivalent quantity. May dip below zero between reads;
    /// only [`Tube::pressure`] clamps it.
    pub residual_mass: Fixed64,
}

impl Tube {
    /// An empty tube with both ends open to atmosphere.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: Endpoint::Atmosphere,
            to: Endpoint::Atmosphere,
            residual_mass: Fixed64::ZERO,
        }
    }

    pub fn between(name: impl Into<String>, from: Endpoint, to: Endpoint) -> Self {
        Self {
            from,
            to,
            ..Self::new(name)
        }
    }

    pub fn with_residual_mass(mut self, residual_mass: Fixed64) -> Self {
        self.residual_mass = residual_mass;
        self
    }

    /// Either end is open to atmosphere.
    pub fn is_vented(&self) -> bool {
        self.from.is_atmosphere() || self.to.is_atmosphere()
    }

    pub fn pressure(&self) -> Fixed64 {
        pressure_of(self.residual_mass)
    }

    /// Residual mass strictly above `threshold`.
    pub fn is_pressurized(&self, threshold: Fixed64) -> bool {
        self.residual_mass > threshold
    }

    pub fn end(&self, end: TubeEnd) -> &Endpoint {
        match end {
            TubeEnd::From => &self.from,
            TubeEnd::To => &self.to,
        }
    }

    pub fn end_mut(&mut self, end: TubeEnd) -> &mut Endpoint {
        match end {
            TubeEnd::From => &mut self.from,
            TubeEnd::To => &mut self.to,
        }
    }

    /// How many ends are plugged into `component/terminal` (0, 1 or 2).
    pub fn attachments(&self, component: &ComponentId, terminal: TerminalId) -> usize {
        usize::from(self.from.matches(component, terminal))
            + usize::from(self.to.matches(component, terminal))
    }

    pub fn touches_component(&self, component: &ComponentId) -> bool {
        self.from.names_component(component) || self.to.names_component(component)
    }

    /// Vent every end plugged into `component`. Returns how many ends moved.
    pub fn detach_component(&mut self, component: &ComponentId) -> usize {
        let mut moved = 0;
        for end in [&mut self.from, &mut self.to] {
            if end.names_component(component) {
                *end = Endpoint::Atmosphere;
                moved += 1;
            }
        }
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::f64_to_fixed64;

    #[test]
    fn new_tube_is_vented_and_empty() {
        let tube = Tube::new("tube1");
        assert!(tube.is_vented());
        assert_eq!(tube.residual_mass, Fixed64::ZERO);
    }

    #[test]
    fn one_open_end_vents() {
        let tube = Tube::between("t", Endpoint::terminal("c", 1), Endpoint::Atmosphere);
        assert!(tube.is_vented());
        let sealed = Tube::between("t", Endpoint::terminal("c", 1), Endpoint::terminal("y", 1));
        assert!(!sealed.is_vented());
    }

    #[test]
    fn pressure_clamps_negative_mass() {
        let tube = Tube::new("t").with_residual_mass(f64_to_fixed64(-1.0));
        assert_eq!(tube.pressure(), Fixed64::ZERO);
        assert!(!tube.is_pressurized(f64_to_fixed64(0.5)));
    }

    #[test]
    fn pressurized_is_strictly_above_threshold() {
        let threshold = f64_to_fixed64(0.5);
        assert!(!Tube::new("t").with_residual_mass(threshold).is_pressurized(threshold));
        assert!(
            Tube::new("t")
                .with_residual_mass(f64_to_fixed64(0.6))
                .is_pressurized(threshold)
        );
    }

    #[test]
    fn loopback_tube_attaches_twice() {
        let tube = Tube::between("t", Endpoint::terminal("s", 1), Endpoint::terminal("s", 1));
        assert_eq!(tube.attachments(&ComponentId::from("s"), TerminalId(1)), 2);
        assert_eq!(tube.attachments(&ComponentId::from("s"), TerminalId(2)), 0);
    }

    #[test]
    fn detach_component_vents_matching_ends() {
        let mut tube = Tube::between("t", Endpoint::terminal("c", 1), Endpoint::terminal("y", 1));
        assert_eq!(tube.detach_component(&ComponentId::from("c")), 1);
        assert_eq!(tube.from, Endpoint::Atmosphere);
        assert_eq!(tube.to, Endpoint::terminal("y", 1));
    }
}
