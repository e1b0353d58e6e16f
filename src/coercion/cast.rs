use crate::error::{Error, Result};
use crate::object::{Record, Value};
use crate::types::*;

use super::atomic::coerce_vector;
use super::CastContext;

impl Registry {
    /// Cast a value to the type of a prototype
    ///
    /// `NULL` casts to `NULL`, and a value already of the destination type is
    /// returned as is, sharing its storage. An all-missing logical vector
    /// casts to a missing vector of any type. Atomic vectors convert along
    /// the built-in table; everything else dispatches on
    /// (source, destination), then (source, default).
    ///
    /// Records are returned with their fields in the destination's order.
    ///
    /// Conversions that lose information raise a lossy-cast error unless
    /// `ctx` permits them.
    ///
    pub fn cast(&self, x: &Value, to: &Prototype, ctx: &CastContext) -> Result<Value> {
        if let Value::Null = x {
            return Ok(Value::Null);
        }

        let from = ptype_of(x);
        tracing::trace!(%from, %to, "casting");

        if matches!(from, Prototype::Scalar(_)) || matches!(to, Prototype::Scalar(_)) {
            return Err(Error::incompatible_cast(&from, to));
        }

        if from == *to && same_field_order(&from, to) {
            return Ok(x.clone());
        }

        match (x, to) {
            (_, Prototype::Unspecified | Prototype::Null) => {
                Err(Error::incompatible_cast(&from, to))
            }
            // raw has no missing value, so missing elements go through the table
            (_, Prototype::Record(t)) if from.is_unspecified() => {
                let mut fields = Vec::with_capacity(t.fields.len());
                for (name, p) in &t.fields {
                    let field = self.cast(x, p, ctx).map_err(|e| e.in_field(name))?;
                    fields.push((name.clone(), field));
                }
                Ok(Value::Record(Record::with_size(fields, x.size()?)?))
            }
            (_, to) if from.is_unspecified() && *to != Prototype::Raw => to.init(x.size()?),
            (Value::Vector(v), to) if to.kind().is_atomic() => {
                let Some((result, lossy)) = coerce_vector(v, to.kind()) else {
                    return Err(Error::incompatible_cast(&from, to));
                };
                ctx.check(&from, to, lossy, Value::Vector(result))
            }
            _ => self.dispatch_cast(x, &from, to, ctx),
        }
    }

    fn dispatch_cast(
        &self,
        x: &Value,
        from: &Prototype,
        to: &Prototype,
        ctx: &CastContext,
    ) -> Result<Value> {
        let (kx, kto) = (TypeKey::of(from), TypeKey::of(to));
        match self.find_cast(&kx, &kto) {
            Some(rule) => {
                tracing::debug!(?kx, ?kto, "dispatching cast rule");
                rule(self, x, to, ctx)
            }
            None => Err(Error::incompatible_cast(from, to)),
        }
    }

    /// Cast many values to their common type
    ///
    /// The common type is resolved over every input (and `seed`) before
    /// anything is cast, so a resolution failure is always reported as such.
    /// Cast failures record the position of the offending input.
    ///
    pub fn cast_common(
        &self,
        values: &[Value],
        seed: Option<&Prototype>,
        ctx: &CastContext,
    ) -> Result<Vec<Value>> {
        let to = self.ptype_common(values, seed)?;
        values
            .iter()
            .enumerate()
            .map(|(i, x)| self.cast(x, &to, ctx).map_err(|e| e.at_index(i)))
            .collect()
    }
}

/// Whether two record types of equal fields also list them in the same order
fn same_field_order(x: &Prototype, y: &Prototype) -> bool {
    match (x, y) {
        (Prototype::Record(rx), Prototype::Record(ry)) => {
            rx.fields.len() == ry.fields.len()
                && rx
                    .fields
                    .iter()
                    .zip(&ry.fields)
                    .all(|((nx, px), (ny, py))| nx == ny && same_field_order(px, py))
        }
        _ => true,
    }
}

/// Built-in rule for casting between record types
///
/// Every destination field must exist in the source, and is cast from the
/// matching source field. Source fields the destination lacks are dropped.
///
pub fn record_cast(
    reg: &Registry,
    x: &Value,
    to: &Prototype,
    ctx: &CastContext,
) -> Result<Value> {
    let (Value::Record(r), Prototype::Record(t)) = (x, to) else {
        return Err(Error::incompatible_cast(&ptype_of(x), to));
    };

    let mut fields = Vec::with_capacity(t.fields.len());
    for (name, p) in &t.fields {
        let Some(field) = r.get(name) else {
            return Err(Error::incompatible_cast(&ptype_of(x), to));
        };
        let field = reg.cast(field, p, ctx).map_err(|e| e.in_field(name))?;
        fields.push((name.clone(), field));
    }

    Ok(Value::Record(Record::with_size(fields, r.size())?))
}

/// Cast using the process-wide registry, without permitting lossy casts
pub fn cast(x: &Value, to: &Prototype) -> Result<Value> {
    Registry::global().cast(x, to, &CastContext::new())
}

/// Cast to a common type using the process-wide registry
pub fn cast_common(values: &[Value]) -> Result<Vec<Value>> {
    Registry::global().cast_common(values, None, &CastContext::new())
}
