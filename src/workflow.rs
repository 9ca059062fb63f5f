use miette::Diagnostic;

use crate::{
    state::RunType,
    step::{self, Context, Step},
    State,
};

/// A fixed series of [`Step`]s, run in order, stopping if any step fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Workflow {
    pub name: &'static str,
    pub steps: &'static [Step],
}

impl Workflow {
    /// Every lifecycle hook of a release.
    pub const RELEASE: Self = Self {
        name: "release",
        steps: &[Step::Decide, Step::Note, Step::Record, Step::Publish],
    };

    /// Only figure out whether there is something to release.
    pub const CHECK: Self = Self {
        name: "check",
        steps: &[Step::Decide],
    };

    /// Run each step, threading `state` through them.
    pub fn run(&self, mut state: RunType<State>, context: &Context) -> Result<RunType<State>, Error> {
        for step in self.steps {
            state = match step.run(state, context) {
                Ok(state) => state,
                Err(err) => {
                    return Err(Error {
                        name: self.name,
                        step: *step,
                        inner: Box::new([err]),
                    });
                }
            };
        }
        Ok(state)
    }
}

/// An error from running a single step of a workflow.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("Problem with workflow {name} during the {step} step")]
pub struct Error {
    name: &'static str,
    step: Step,
    #[related]
    inner: Box<[step::Error; 1]>,
}
