use events::LogEvent;

/// Outcome of an admission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject { reason: String },
}

impl Decision {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Decision::Admit)
    }
}

/// Decides whether a submitted event is retained and indexed.
pub trait AdmissionFilter: Send + Sync {
    fn decide(&self, event: &LogEvent) -> Decision;
}

/// Admits every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AdmissionFilter for AcceptAll {
    fn decide(&self, _event: &LogEvent) -> Decision {
        Decision::Admit
    }
}

impl<F> AdmissionFilter for F
where
    F: Fn(&LogEvent) -> bool + Send + Sync,
{
    fn decide(&self, event: &LogEvent) -> Decision {
        if self(event) {
            Decision::Admit
        } else {
            Decision::Reject {
                reason: "rejected by predicate".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::Level;

    #[test]
    fn test_accept_all() {
        let event = LogEvent::new(Level::Trace, "Any", "thing");
        assert!(AcceptAll.decide(&event).is_admitted());
    }

    #[test]
    fn test_closure_predicate() {
        let only_errors = |e: &LogEvent| e.level >= Level::Error;
        assert!(!only_errors.decide(&LogEvent::new(Level::Info, "A", "x")).is_admitted());
        assert!(only_errors.decide(&LogEvent::new(Level::Fatal, "A", "x")).is_admitted());
    }
}
