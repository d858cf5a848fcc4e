//! Tube endpoint references.
//!
//! On the wire an endpoint is a string: either the `"atmosphere"` sentinel or
//! `"<componentId>/<terminalId>"`. Parsing never fails. Text that is neither
//! form is kept as [`Endpoint::Unresolved`] and simply never matches a
//! terminal, which makes the attached terminal read as "not connected".

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{ComponentId, TerminalId};

/// Wire form of the ambient sink.
pub const ATMOSPHERE: &str = "atmosphere";

/// Where one end of a tube is plugged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Endpoint {
    /// Open to ambient: fixed zero reference, infinite capacity.
    #[default]
    Atmosphere,
    /// Plugged into a terminal of a component.
    Terminal {
        component: ComponentId,
        terminal: TerminalId,
    },
    /// A reference that names no terminal. Kept verbatim for display.
    Unresolved(String),
}

impl Endpoint {
    /// Parse the wire form. Total: unknown text becomes `Unresolved`.
    ///
    /// The terminal part must be a canonical positive decimal (`"2"`, not
    /// `"02"` or `"0"`), so only references that render back to the same
    /// string resolve. The split happens at the last `/`, which lets
    /// component ids contain slashes.
    pub fn parse(text: &str) -> Self {
        if text == ATMOSPHERE {
            return Endpoint::Atmosphere;
        }
        if let Some((component, terminal)) = text.rsplit_once('/') {
            if let Some(terminal) = parse_terminal(terminal) {
                return Endpoint::Terminal {
                    component: ComponentId::from(component),
                    terminal,
                };
            }
        }
        Endpoint::Unresolved(text.to_string())
    }

    /// Endpoint for terminal `terminal` of `component`.
    ///
    /// Terminals are numbered from 1. Terminal 0 yields the same
    /// `Unresolved` value that parsing `"<component>/0"` does.
    pub fn terminal(component: impl Into<ComponentId>, terminal: u8) -> Self {
        let component = component.into();
        if terminal == 0 {
            return Endpoint::Unresolved(format!("{component}/0"));
        }
        Endpoint::Terminal {
            component,
            terminal: TerminalId(terminal),
        }
    }

    pub fn is_atmosphere(&self) -> bool {
        matches!(self, Endpoint::Atmosphere)
    }

    /// Whether this endpoint is `"<component>/<terminal>"`.
    pub fn matches(&self, component: &ComponentId, terminal: TerminalId) -> bool {
        match self {
            Endpoint::Terminal {
                component: c,
                terminal: t,
            } => c == component && *t == terminal,
            _ => false,
        }
    }

    /// Whether this endpoint is plugged into any terminal of `component`.
    pub fn names_component(&self, component: &ComponentId) -> bool {
        matches!(self, Endpoint::Terminal { component: c, .. } if c == component)
    }
}

fn parse_terminal(text: &str) -> Option<TerminalId> {
    if text.is_empty() || text.starts_with('0') || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u8>().ok().map(TerminalId)
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Atmosphere => f.write_str(ATMOSPHERE),
            Endpoint::Terminal {
                component,
                terminal,
            } => write!(f, "{component}/{terminal}"),
            Endpoint::Unresolved(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Endpoint {
    fn from(text: &str) -> Self {
        Endpoint::parse(text)
    }
}

impl From<String> for Endpoint {
    fn from(text: String) -> Self {
        Endpoint::parse(&text)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_atmosphere_sentinel() {
        assert_eq!(Endpoint::parse("atmosphere"), Endpoint::Atmosphere);
        assert!(Endpoint::parse("atmosphere").is_atmosphere());
    }

    #[test]
    fn parses_component_terminal() {
        assert_eq!(
            Endpoint::parse("Pressure source 1/1"),
            Endpoint::terminal("Pressure source 1", 1)
        );
    }

    #[test]
    fn splits_at_last_slash() {
        let endpoint = Endpoint::parse("rack/a/3");
        assert!(endpoint.matches(&ComponentId::from("rack/a"), TerminalId(3)));
    }

    #[test]
    fn non_canonical_terminals_stay_unresolved() {
        for text in ["c/01", "c/0", "c/", "c/x", "c", "c/-1", "c/300"] {
            assert_eq!(
                Endpoint::parse(text),
                Endpoint::Unresolved(text.to_string()),
                "{text} should not resolve"
            );
        }
    }

    #[test]
    fn display_renders_wire_form() {
        assert_eq!(Endpoint::terminal("splitter", 2).to_string(), "splitter/2");
        assert_eq!(Endpoint::Atmosphere.to_string(), "atmosphere");
        assert_eq!(Endpoint::parse("dangling").to_string(), "dangling");
    }

    #[test]
    fn unresolved_never_matches() {
        let endpoint = Endpoint::parse("c/01");
        assert!(!endpoint.matches(&ComponentId::from("c"), TerminalId(1)));
        assert!(!endpoint.names_component(&ComponentId::from("c")));
    }

    #[test]
    fn terminal_zero_is_unresolved() {
        let endpoint = Endpoint::terminal("c", 0);
        assert_eq!(endpoint, Endpoint::Unresolved("c/0".to_string()));
        assert_eq!(Endpoint::parse(&endpoint.to_string()), endpoint);
        assert!(!endpoint.names_component(&ComponentId::from("c")));

        let json = serde_json::to_string(&endpoint).unwrap();
        let back: Endpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, endpoint);
    }

    #[test]
    fn serde_uses_string_form() {
        let endpoint = Endpoint::terminal("button", 4);
        let json = serde_json::to_string(&endpoint).unwrap();
        assert_eq!(json, "\"button/4\"");
        let back: Endpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, endpoint);
    }
}
