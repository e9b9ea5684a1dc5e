use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A small, allocation-friendly trace event.
///
/// Plain data recorded during simulation so tests and tooling can replay what an agent decided.
/// Subsystems pick their own tags (`task.start`, `plan.request`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub tick: u64,
    pub tag: Cow<'static, str>,
    pub a: u64,
    pub b: u64,
}

impl TraceEvent {
    pub fn new(tick: u64, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            tick,
            tag: tag.into(),
            a: 0,
            b: 0,
        }
    }

    pub fn with_a(mut self, a: u64) -> Self {
        self.a = a;
        self
    }

    pub fn with_b(mut self, b: u64) -> Self {
        self.b = b;
        self
    }
}

/// Per-agent event log. Recording is off by default.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    enabled: bool,
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            events: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn push(&mut self, event: TraceEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.tag.as_ref())
    }

    pub fn count(&self, tag: &str) -> usize {
        self.events.iter().filter(|e| e.tag == tag).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
