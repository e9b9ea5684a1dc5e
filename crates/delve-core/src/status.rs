/// Result of ticking an act, a script or a plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Success,
    Failure,
}

/// Terminal form of [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for Status {
    fn from(value: Outcome) -> Self {
        match value {
            Outcome::Success => Status::Success,
            Outcome::Failure => Status::Failure,
        }
    }
}

impl From<bool> for Status {
    fn from(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}

impl Status {
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Status::Running => None,
            Status::Success => Some(Outcome::Success),
            Status::Failure => Some(Outcome::Failure),
        }
    }

    pub fn is_running(self) -> bool {
        self == Status::Running
    }
}
