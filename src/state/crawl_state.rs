/// Crawl state definitions for the paginated fetch loop
///
/// This module defines the states a single crawl moves through and the
/// transitions allowed between them.
use crate::HarvestError;
use std::fmt;

/// Represents the current state of a paginated crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// No request has been issued yet
    AwaitingFirstPage,

    /// A page request is in flight
    FetchingPage,

    /// The page was fetched and its body is being stored
    WritingPage,

    /// The page fetch failed; its slot stays empty
    SkippingPage,

    /// Deciding whether another page is needed
    CheckingTermination,

    /// The crawl is over
    Done,
}

impl CrawlState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if `next` may directly follow this state
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        use CrawlState::*;

        matches!(
            (self, next),
            (AwaitingFirstPage, FetchingPage)
                | (FetchingPage, WritingPage)
                | (FetchingPage, SkippingPage)
                | (WritingPage, CheckingTermination)
                | (SkippingPage, CheckingTermination)
                | (CheckingTermination, FetchingPage)
                | (CheckingTermination, Done)
        )
    }

    /// Short name used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingFirstPage => "awaiting_first_page",
            Self::FetchingPage => "fetching_page",
            Self::WritingPage => "writing_page",
            Self::SkippingPage => "skipping_page",
            Self::CheckingTermination => "checking_termination",
            Self::Done => "done",
        }
    }

    /// Returns all possible crawl states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::AwaitingFirstPage,
            Self::FetchingPage,
            Self::WritingPage,
            Self::SkippingPage,
            Self::CheckingTermination,
            Self::Done,
        ]
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tracks the state of one crawl and enforces legal transitions
#[derive(Debug, Clone)]
pub struct CrawlMachine {
    state: CrawlState,
}

impl Default for CrawlMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlMachine {
    pub fn new() -> Self {
        Self {
            state: CrawlState::AwaitingFirstPage,
        }
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    /// Moves to `next`, failing if the transition is not allowed
    pub fn transition(&mut self, next: CrawlState) -> Result<(), HarvestError> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Crawl state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_done_is_terminal() {
        for state in CrawlState::all_states() {
            assert_eq!(state.is_terminal(), state == CrawlState::Done);
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut machine = CrawlMachine::new();
        for next in [
            CrawlState::FetchingPage,
            CrawlState::WritingPage,
            CrawlState::CheckingTermination,
            CrawlState::FetchingPage,
            CrawlState::SkippingPage,
            CrawlState::CheckingTermination,
            CrawlState::Done,
        ] {
            machine.transition(next).unwrap();
        }
        assert_eq!(machine.state(), CrawlState::Done);
    }

    #[test]
    fn test_rejects_illegal_transition() {
        let mut machine = CrawlMachine::new();
        let err = machine.transition(CrawlState::WritingPage).unwrap_err();
        assert!(matches!(
            err,
            HarvestError::InvalidTransition {
                from: CrawlState::AwaitingFirstPage,
                to: CrawlState::WritingPage
            }
        ));
        assert_eq!(machine.state(), CrawlState::AwaitingFirstPage);
    }

    #[test]
    fn test_done_has_no_successors() {
        for state in CrawlState::all_states() {
            assert!(!CrawlState::Done.can_transition_to(state));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlState::SkippingPage), "skipping_page");
        assert_eq!(format!("{}", CrawlState::Done), "done");
    }
}
