//! Alert transition events.
//!
//! A [`Network`](crate::network::Network) compares every component's alert
//! before and after a step and reports only the changes, so a persistent
//! wiring fault is announced once rather than every tick.

use crate::fixed::Ticks;
use crate::id::ComponentId;

/// Emitted by `Network::step` on alert transitions, in component order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// A component gained an alert, or its alert text changed.
    AlertRaised {
        component: ComponentId,
        message: String,
        tick: Ticks,
    },
    /// A component's alert went away.
    AlertCleared { component: ComponentId, tick: Ticks },
}

impl NetworkEvent {
    pub fn component(&self) -> &ComponentId {
        match self {
            NetworkEvent::AlertRaised { component, .. } => component,
            NetworkEvent::AlertCleared { component, .. } => component,
        }
    }

    pub fn tick(&self) -> Ticks {
        match self {
            NetworkEvent::AlertRaised { tick, .. } | NetworkEvent::AlertCleared { tick, .. } => {
                *tick
            }
        }
    }
}

/// Compare one component's alert across a step.
pub fn alert_transition(
    component: &ComponentId,
    before: Option<&str>,
    after: Option<&str>,
    tick: Ticks,
) -> Option<NetworkEvent> {
    match (before, after) {
        (b, Some(a)) if b != Some(a) => Some(NetworkEvent::AlertRaised {
            component: component.clone(),
            message: a.to_string(),
            tick,
        }),
        (Some(_), None) => Some(NetworkEvent::AlertCleared {
            component: component.clone(),
            tick,
        }),
        _ => None,
    }
}
