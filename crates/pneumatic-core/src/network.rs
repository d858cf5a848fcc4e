//! An owning network session.
//!
//! The relaxation step itself works on borrowed slices (see [`engine`]).
//! `Network` is the convenience layer an interaction front end holds on to:
//! it owns the components and the tube arena, validates ids when things are
//! added, exposes the rewiring operations a drag-and-drop layer performs
//! between steps, counts ticks, and turns alert changes into events.
//!
//! [`engine`]: crate::engine

use crate::component::{Component, Gate};
use crate::endpoint::Endpoint;
use crate::engine;
use crate::event::{NetworkEvent, alert_transition};
use crate::fixed::{Fixed64, Ticks};
use crate::id::{ComponentId, TerminalId, TubeId};
use crate::params::{ParamsError, RelaxationParams};
use crate::query::{ComponentSnapshot, TubeSnapshot};
use crate::resolver;
use crate::sim::StateHash;
use crate::tube::{Tube, TubeArena, TubeEnd};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the session mutation API. The step itself never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error("component '{0}' already exists")]
    DuplicateComponent(ComponentId),
    #[error("tube '{0}' already exists")]
    DuplicateTube(String),
    #[error("component not found: {0}")]
    ComponentNotFound(ComponentId),
    #[error("tube not found: {0:?}")]
    TubeNotFound(TubeId),
    #[error("component '{id}' is a {kind}, not a button")]
    NotAButton { id: ComponentId, kind: &'static str },
    #[error("invalid relaxation parameters: {0}")]
    InvalidParams(#[from] ParamsError),
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// Components in visit order plus the tube arena they are wired through.
#[derive(Debug, Clone, Default)]
pub struct Network {
    components: Vec<Component>,
    tubes: TubeArena,
    params: RelaxationParams,
    tick: Ticks,
}

impl Network {
    /// An empty network with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty network with validated constants.
    pub fn with_params(params: RelaxationParams) -> Result<Self, NetworkError> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::default()
        })
    }

    pub fn params(&self) -> &RelaxationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: RelaxationParams) -> Result<(), NetworkError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Steps taken so far.
    pub fn tick(&self) -> Ticks {
        self.tick
    }

    // -----------------------------------------------------------------------
    // Components
    // -----------------------------------------------------------------------

    /// Append a component. Its position is its visit order.
    pub fn add_component(&mut self, component: Component) -> Result<usize, NetworkError> {
        if self.component_index(component.id.as_str()).is_some() {
            return Err(NetworkError::DuplicateComponent(component.id));
        }
        self.components.push(component);
        Ok(self.components.len() - 1)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn component_index(&self, id: &str) -> Option<usize> {
        self.components.iter().position(|c| c.id.as_str() == id)
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id.as_str() == id)
    }

    // Components are mutated only through `press` and `toggle`.
    fn require_component_mut(&mut self, id: &str) -> Result<&mut Component, NetworkError> {
        self.components
            .iter_mut()
            .find(|c| c.id.as_str() == id)
            .ok_or_else(|| NetworkError::ComponentNotFound(ComponentId::from(id)))
    }

    /// Press or release one button of a button valve.
    pub fn press(&mut self, id: &str, gate: Gate, pressed: bool) -> Result<(), NetworkError> {
        let component = self.require_component_mut(id)?;
        if component.set_gate(gate, pressed) {
            Ok(())
        } else {
            Err(NetworkError::NotAButton {
                id: component.id.clone(),
                kind: component.kind_name(),
            })
        }
    }

    /// Flip one button and return its new state.
    pub fn toggle(&mut self, id: &str, gate: Gate) -> Result<bool, NetworkError> {
        let component = self.require_component_mut(id)?;
        component
            .toggle_gate(gate)
            .ok_or_else(|| NetworkError::NotAButton {
                id: component.id.clone(),
                kind: component.kind_name(),
            })
    }

    // -----------------------------------------------------------------------
    // Tubes
    // -----------------------------------------------------------------------

    /// Insert a tube. Tube names are unique within a network.
    pub fn add_tube(&mut self, tube: Tube) -> Result<TubeId, NetworkError> {
        if self.tube_by_name(&tube.name).is_some() {
            return Err(NetworkError::DuplicateTube(tube.name));
        }
        Ok(self.tubes.insert(tube))
    }

    pub fn remove_tube(&mut self, id: TubeId) -> Result<Tube, NetworkError> {
        self.tubes.remove(id).ok_or(NetworkError::TubeNotFound(id))
    }

    pub fn tubes(&self) -> &TubeArena {
        &self.tubes
    }

    pub fn tube(&self, id: TubeId) -> Option<&Tube> {
        self.tubes.get(id)
    }

    pub fn tube_by_name(&self, name: &str) -> Option<TubeId> {
        self.tubes
            .iter()
            .find(|(_, t)| t.name == name)
            .map(|(id, _)| id)
    }

    fn require_tube_mut(&mut self, id: TubeId) -> Result<&mut Tube, NetworkError> {
        self.tubes.get_mut(id).ok_or(NetworkError::TubeNotFound(id))
    }

    /// Plug one end of a tube somewhere else. Returns the previous endpoint.
    ///
    /// The target is not checked: a reference to a missing component simply
    /// never resolves.
    pub fn connect(
        &mut self,
        id: TubeId,
        end: TubeEnd,
        endpoint: Endpoint,
    ) -> Result<Endpoint, NetworkError> {
        let tube = self.require_tube_mut(id)?;
        Ok(std::mem::replace(tube.end_mut(end), endpoint))
    }

    /// Pull one end of a tube off its terminal, leaving it open to atmosphere.
    pub fn detach(&mut self, id: TubeId, end: TubeEnd) -> Result<Endpoint, NetworkError> {
        self.connect(id, end, Endpoint::Atmosphere)
    }

    /// Vent every tube end plugged into `component`. Returns the ends moved.
    pub fn detach_component(&mut self, component: &str) -> usize {
        let component = ComponentId::from(component);
        self.tubes
            .values_mut()
            .map(|t| t.detach_component(&component))
            .sum()
    }

    /// Rename a tube. Names stay unique within a network.
    pub fn rename_tube(&mut self, id: TubeId, name: impl Into<String>) -> Result<(), NetworkError> {
        let name = name.into();
        if self.tube_by_name(&name).is_some_and(|existing| existing != id) {
            return Err(NetworkError::DuplicateTube(name));
        }
        self.require_tube_mut(id)?.name = name;
        Ok(())
    }

    pub fn set_residual_mass(&mut self, id: TubeId, mass: Fixed64) -> Result<(), NetworkError> {
        self.require_tube_mut(id)?.residual_mass = mass;
        Ok(())
    }

    /// Tubes plugged into one terminal, in arena order.
    pub fn tubes_at_terminal(&self, component: &str, terminal: TerminalId) -> Vec<TubeId> {
        resolver::tubes_at_terminal(&ComponentId::from(component), terminal, &self.tubes)
    }

    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run one relaxation step and report alert transitions.
    pub fn step(&mut self) -> Vec<NetworkEvent> {
        let before: Vec<Option<String>> =
            self.components.iter().map(|c| c.alert.clone()).collect();

        engine::step_with(&mut self.components, &mut self.tubes, &self.params);
        self.tick += 1;
        let tick = self.tick;

        let mut events = Vec::new();
        for (component, before) in self.components.iter().zip(&before) {
            let Some(event) = alert_transition(
                &component.id,
                before.as_deref(),
                component.alert.as_deref(),
                tick,
            ) else {
                continue;
            };
            match &event {
                NetworkEvent::AlertRaised { message, .. } => {
                    log::warn!("tick {tick}: {} '{}': {message}", component.kind_name(), component.id);
                }
                NetworkEvent::AlertCleared { .. } => {
                    log::info!("tick {tick}: {} '{}' wiring ok", component.kind_name(), component.id);
                }
            }
            events.push(event);
        }

        log::debug!(
            "tick {tick}: relaxed {} components over {} tubes, {} alert transitions",
            self.components.len(),
            self.tubes.len(),
            events.len()
        );
        events
    }

    /// Run `n` steps and collect every event.
    pub fn step_n(&mut self, n: u64) -> Vec<NetworkEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.step());
        }
        events
    }

    /// Deterministic hash of everything the step reads or writes.
    pub fn state_hash(&self) -> u64 {
        let mut hash = StateHash::new();
        hash.write_u64(self.tick);
        hash.write_u64(self.components.len() as u64);
        for component in &self.components {
            hash.write_str(component.id.as_str());
            hash.write_str(component.kind_name());
            for (terminal, pressure) in &component.terminal_pressures {
                hash.write_u8(terminal.0);
                hash.write_fixed64(*pressure);
            }
            if let Some(expansion) = component.expansion() {
                hash.write_fixed64(expansion);
            }
            for gate in [Gate::Left, Gate::Right] {
                if let Some(pressed) = component.gate(gate) {
                    hash.write_u8(u8::from(pressed));
                }
            }
            hash.write_opt_str(component.alert.as_deref());
        }
        hash.write_u64(self.tubes.len() as u64);
        for tube in self.tubes.values() {
            hash.write_str(&tube.name);
            hash.write_str(&tube.from.to_string());
            hash.write_str(&tube.to.to_string());
            hash.write_fixed64(tube.residual_mass);
        }
        hash.finish()
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    pub fn snapshot_component(&self, id: &str) -> Option<ComponentSnapshot> {
        self.component(id).map(|c| {
            ComponentSnapshot::capture(c, resolver::tubes_at_component(&c.id, &self.tubes))
        })
    }

    /// Snapshots of every component, in visit order.
    pub fn snapshot_components(&self) -> Vec<ComponentSnapshot> {
        self.components
            .iter()
            .map(|c| ComponentSnapshot::capture(c, resolver::tubes_at_component(&c.id, &self.tubes)))
            .collect()
    }

    /// Snapshots of every tube, in arena order.
    pub fn snapshot_tubes(&self) -> Vec<TubeSnapshot> {
        self.tubes
            .iter()
            .map(|(id, t)| TubeSnapshot::capture(id, t, self.params.pressurized_threshold))
            .collect()
    }
}
