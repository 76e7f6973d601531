// In: src/pipeline/plan.rs

//! Serializable descriptors for the recorded pipeline stages.
//!
//! A `Query` cannot serialize its closures, but it can always say *what* it
//! will do: every chain call appends one `StageKind` record to the `Plan`.
//! The plan is pure diagnostics (execution is driven by the stage closures
//! themselves) and renders either as an arrow chain (`Display`) or as JSON
//! (`to_json`) for tooling.

use serde::Serialize;
use std::fmt;

/// One recorded pipeline stage. Parameters that are plain data (counts, key
/// arity) are captured; closures are represented by the stage name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageKind {
    Filter,
    Select,
    SelectMany,
    Take { count: usize },
    Skip { count: usize },
    TakeWhile,
    SkipWhile,
    Reverse,
    Distinct,
    Concat,
    Intersect,
    Except,
    Join,
    GroupJoin,
    GroupBy,
    Sort { keys: usize },
    Zip,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Filter => write!(f, "filter"),
            StageKind::Select => write!(f, "select"),
            StageKind::SelectMany => write!(f, "select_many"),
            StageKind::Take { count } => write!(f, "take({count})"),
            StageKind::Skip { count } => write!(f, "skip({count})"),
            StageKind::TakeWhile => write!(f, "take_while"),
            StageKind::SkipWhile => write!(f, "skip_while"),
            StageKind::Reverse => write!(f, "reverse"),
            StageKind::Distinct => write!(f, "distinct"),
            StageKind::Concat => write!(f, "concat"),
            StageKind::Intersect => write!(f, "intersect"),
            StageKind::Except => write!(f, "except"),
            StageKind::Join => write!(f, "join"),
            StageKind::GroupJoin => write!(f, "group_join"),
            StageKind::GroupBy => write!(f, "group_by"),
            StageKind::Sort { keys } => write!(f, "sort({keys})"),
            StageKind::Zip => write!(f, "zip"),
        }
    }
}

/// The ordered list of stage records a pipeline will fold its source
/// through. Appending always copies: prior pipeline values keep their plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    stages: Vec<StageKind>,
}

impl Plan {
    pub(crate) fn empty() -> Self {
        Plan { stages: Vec::new() }
    }

    /// Copy-then-append; the receiver is left untouched.
    pub(crate) fn push(&self, stage: StageKind) -> Plan {
        let mut stages = self.stages.clone();
        stages.push(stage);
        Plan { stages }
    }

    pub fn stages(&self) -> &[StageKind] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source")?;
        for stage in &self.stages {
            write!(f, " -> {stage}")?;
        }
        Ok(())
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_copies_instead_of_mutating() {
        let base = Plan::empty();
        let extended = base.push(StageKind::Filter);

        assert!(base.is_empty());
        assert_eq!(extended.stages(), &[StageKind::Filter]);
    }

    #[test]
    fn test_display_renders_arrow_chain() {
        let plan = Plan::empty()
            .push(StageKind::Filter)
            .push(StageKind::Take { count: 3 })
            .push(StageKind::Sort { keys: 2 });

        assert_eq!(plan.to_string(), "source -> filter -> take(3) -> sort(2)");
        assert_eq!(Plan::empty().to_string(), "source");
    }

    #[test]
    fn test_json_serialization() {
        let plan = Plan::empty()
            .push(StageKind::Filter)
            .push(StageKind::Take { count: 2 });

        assert_eq!(
            plan.to_json().unwrap(),
            r#"{"stages":[{"stage":"filter"},{"stage":"take","count":2}]}"#
        );
    }
}
