use std::sync::Arc;

use crate::error::{Error, LossyCast, Result};
use crate::object::Value;
use crate::types::Prototype;

/// Permission to discard information while casting
///
/// Each side that is given must match the cast exactly; a side left out
/// matches any type. With neither side given, every lossy cast is permitted.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllowLossy {
    pub x: Option<Prototype>,
    pub to: Option<Prototype>,
}

impl AllowLossy {
    pub fn any() -> Self {
        AllowLossy::default()
    }

    pub fn x(x: Prototype) -> Self {
        AllowLossy {
            x: Some(x),
            to: None,
        }
    }

    pub fn to(to: Prototype) -> Self {
        AllowLossy {
            x: None,
            to: Some(to),
        }
    }

    pub fn between(x: Prototype, to: Prototype) -> Self {
        AllowLossy {
            x: Some(x),
            to: Some(to),
        }
    }

    pub fn matches(&self, x: &Prototype, to: &Prototype) -> bool {
        self.x.as_ref().map_or(true, |p| p == x) && self.to.as_ref().map_or(true, |p| p == to)
    }
}

/// Scoped settings consulted while casting
///
/// Contexts are immutable values. Allowing a lossy cast returns a new context
/// with the permission pushed on top, leaving the original untouched, so a
/// context can be shared freely between threads and nested calls.
///
#[derive(Debug, Clone, Default)]
pub struct CastContext {
    frames: Option<Arc<Frame>>,
}

#[derive(Debug)]
struct Frame {
    allow: AllowLossy,
    parent: Option<Arc<Frame>>,
}

impl CastContext {
    pub fn new() -> Self {
        CastContext::default()
    }

    /// A new context that also permits `allow`
    pub fn allow(&self, allow: AllowLossy) -> CastContext {
        CastContext {
            frames: Some(Arc::new(Frame {
                allow,
                parent: self.frames.clone(),
            })),
        }
    }

    pub fn is_allowed(&self, x: &Prototype, to: &Prototype) -> bool {
        let mut frame = self.frames.as_deref();
        while let Some(f) = frame {
            if f.allow.matches(x, to) {
                return true;
            }
            frame = f.parent.as_deref();
        }
        false
    }

    /// Report a lossy cast unless it has been permitted
    ///
    /// The result is the same either way; permission only decides whether it
    /// is returned or raised along with the affected locations.
    ///
    pub fn check(
        &self,
        x: &Prototype,
        to: &Prototype,
        locations: Vec<usize>,
        result: Value,
    ) -> Result<Value> {
        if locations.is_empty() {
            return Ok(result);
        }

        if self.is_allowed(x, to) {
            tracing::debug!(%x, %to, n = locations.len(), "permitted lossy cast");
            return Ok(result);
        }

        Err(Error::LossyCast(Box::new(LossyCast {
            x: x.clone(),
            to: to.clone(),
            locations,
            result,
        })))
    }
}
