//! Pipeline stages and the run state machine
//!
//! `Start → Validated → Staged → Containerized → Packaged → Relocated`, with
//! cleanup running after whichever state the run reached.

use std::fmt;

/// One step of the conversion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Input validation
    Validate,
    /// Copy into the asset area and resolve a handle
    Import,
    /// Instantiate and commit the container artifact
    Containerize,
    /// Run the packaging engine
    Package,
    /// Move the bundle to the output path
    Relocate,
    /// Remove intermediate artifacts
    Cleanup,
}

impl Stage {
    /// Stable name used in logs and JSON events
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::Import => "import",
            Stage::Containerize => "containerize",
            Stage::Package => "package",
            Stage::Relocate => "relocate",
            Stage::Cleanup => "cleanup",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Validate => "Input validation",
            Stage::Import => "Staging import",
            Stage::Containerize => "Container build",
            Stage::Package => "Packaging",
            Stage::Relocate => "Output relocation",
            Stage::Cleanup => "Cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Furthest state a run reached before cleanup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Start,
    Validated,
    Staged,
    Containerized,
    Packaged,
    Relocated,
}

impl RunState {
    /// State reached once `stage` has completed
    ///
    /// Cleanup does not move the run forward; it is recorded separately.
    fn after(stage: Stage) -> Option<Self> {
        match stage {
            Stage::Validate => Some(RunState::Validated),
            Stage::Import => Some(RunState::Staged),
            Stage::Containerize => Some(RunState::Containerized),
            Stage::Package => Some(RunState::Packaged),
            Stage::Relocate => Some(RunState::Relocated),
            Stage::Cleanup => None,
        }
    }

    /// Advance to the state following `stage`, never moving backwards
    pub fn advance(self, stage: Stage) -> Self {
        match Self::after(stage) {
            Some(next) if next.rank() > self.rank() => next,
            _ => self,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            RunState::Start => 0,
            RunState::Validated => 1,
            RunState::Staged => 2,
            RunState::Containerized => 3,
            RunState::Packaged => 4,
            RunState::Relocated => 5,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Start => "start",
            RunState::Validated => "validated",
            RunState::Staged => "staged",
            RunState::Containerized => "containerized",
            RunState::Packaged => "packaged",
            RunState::Relocated => "relocated",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_state_walks_the_pipeline() {
        let mut state = RunState::Start;
        for stage in [
            Stage::Validate,
            Stage::Import,
            Stage::Containerize,
            Stage::Package,
            Stage::Relocate,
        ] {
            state = state.advance(stage);
        }
        assert_eq!(state, RunState::Relocated);
    }

    #[test]
    fn run_state_never_moves_backwards() {
        let state = RunState::Packaged.advance(Stage::Import);
        assert_eq!(state, RunState::Packaged);
    }

    #[test]
    fn cleanup_does_not_advance_a_failed_run() {
        let state = RunState::Staged.advance(Stage::Cleanup);
        assert_eq!(state, RunState::Staged);
        assert_eq!(state.to_string(), "staged");
        assert_eq!(RunState::Start.advance(Stage::Cleanup), RunState::Start);
    }
}
