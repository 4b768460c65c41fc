//! Ready-made stage functions for common fixtures.

use crate::stage::context::{Context, Values};
use std::iter::Sum;

/// Emit every input record unchanged.
pub fn identity_mapper<K, V>() -> impl FnMut(K, V, &mut Context<K, V>) -> anyhow::Result<()> {
    |key: K, value: V, ctx: &mut Context<K, V>| {
        ctx.emit(key, value);
        Ok(())
    }
}

/// Emit one record per value, keeping the group key.
pub fn identity_reducer<K: Clone, V>(
) -> impl FnMut(K, Values<V>, &mut Context<K, V>) -> anyhow::Result<()> {
    |key: K, values: Values<V>, ctx: &mut Context<K, V>| {
        for value in values {
            ctx.emit(key.clone(), value);
        }
        Ok(())
    }
}

/// Emit the sum of each group's values.
pub fn sum_reducer<K, V: Sum<V>>() -> impl FnMut(K, Values<V>, &mut Context<K, V>) -> anyhow::Result<()>
{
    |key: K, values: Values<V>, ctx: &mut Context<K, V>| {
        ctx.emit(key, values.sum());
        Ok(())
    }
}
