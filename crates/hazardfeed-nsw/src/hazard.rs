use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Upstream dataset selector, the `{hazard}` in `/traffic/hazards/{hazard}.json`
///
/// Unknown selectors are kept verbatim; the remote service decides whether
/// they exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Hazard {
    #[default]
    IncidentOpen,
    FloodOpen,
    FireOpen,
    RoadworkOpen,
    MajorEventOpen,
    AlpineOpen,
    Other(String),
}

impl Hazard {
    /// Selectors known to be published by Live Traffic
    pub const KNOWN: [Hazard; 6] = [
        Hazard::IncidentOpen,
        Hazard::FloodOpen,
        Hazard::FireOpen,
        Hazard::RoadworkOpen,
        Hazard::MajorEventOpen,
        Hazard::AlpineOpen,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Hazard::IncidentOpen => "incident-open",
            Hazard::FloodOpen => "flood-open",
            Hazard::FireOpen => "fire-open",
            Hazard::RoadworkOpen => "roadwork-open",
            Hazard::MajorEventOpen => "majorevent-open",
            Hazard::AlpineOpen => "alpine-open",
            Hazard::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Hazard::Other(_))
    }
}

impl From<&str> for Hazard {
    fn from(s: &str) -> Self {
        Hazard::KNOWN
            .into_iter()
            .find(|known| known.as_str() == s)
            .unwrap_or_else(|| Hazard::Other(s.to_string()))
    }
}

impl From<String> for Hazard {
    fn from(s: String) -> Self {
        Hazard::from(s.as_str())
    }
}

impl FromStr for Hazard {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Hazard::from(s))
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors_roundtrip() {
        for hazard in Hazard::KNOWN {
            assert_eq!(Hazard::from(hazard.as_str()), hazard);
            assert!(hazard.is_known());
        }
    }

    #[test]
    fn test_unknown_selector_passes_through() {
        let hazard: Hazard = "incident-closed".parse().unwrap();
        assert_eq!(hazard, Hazard::Other("incident-closed".to_string()));
        assert_eq!(hazard.to_string(), "incident-closed");
        assert!(!hazard.is_known());
    }

    #[test]
    fn test_default_is_open_incidents() {
        assert_eq!(Hazard::default().as_str(), "incident-open");
    }
}
