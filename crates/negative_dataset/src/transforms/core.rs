use anyhow::{Context, Result};
use std::marker::PhantomData;

/// A deterministic processing stage from `I` to `O`.
///
/// Every stage of the per-sample pipeline (decode, flip, rotate, HSV shift,
/// tensor conversion) implements this trait. Randomness never lives inside a
/// stage: parameters are drawn up front from the caller's RNG and baked into
/// the stage, so applying a stage twice to the same input gives the same output.
///
/// Stages compose with [`Transform::then`], which requires:
/// 1. **Types align**: `self: Transform<I, O>`, `next: Transform<O, M>`
/// 2. **Owned**: `Self: Sized`
/// 3. **Thread-safe**: intermediate and output types are `Send`
pub trait Transform<I, O>: Send + Sync {
    /// Applies the stage to the input.
    fn apply(&self, input: I) -> Result<O>;

    #[inline]
    fn then<T, M>(self, next: T) -> Chain<Self, T, O>
    where
        Self: Sized,
        T: Transform<O, M>,
        O: Send,
        M: Send,
    {
        Chain {
            first: self,
            second: next,
            _marker: PhantomData,
        }
    }
}

/// Two stages run back to back (`A` -> `B`).
/// - `PhantomData<M>` pins the intermediate type.
#[derive(Debug)]
pub struct Chain<A, B, M> {
    first: A,
    second: B,
    _marker: PhantomData<fn() -> M>,
}

impl<A, B, M> Chain<A, B, M> {
    /// Creates a new chain. [`Transform::then`] reads better in most places.
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<I, M, O, A, B> Transform<I, O> for Chain<A, B, M>
where
    A: Transform<I, M>,
    B: Transform<M, O>,
    M: Send,
{
    fn apply(&self, input: I) -> Result<O> {
        self.first
            .apply(input)
            .and_then(|mid| self.second.apply(mid))
            .with_context(|| {
                format!(
                    "Transform chain failed: {} → {}",
                    std::any::type_name::<A>(),
                    std::any::type_name::<B>()
                )
            })
    }
}

/// Runs the inner stage only when one is configured; otherwise passes the
/// input through untouched. Used for the optional noise and range stages.
#[derive(Debug)]
pub struct Optional<T>(pub Option<T>);

impl<I, T> Transform<I, I> for Optional<T>
where
    I: Send,
    T: Transform<I, I>,
{
    fn apply(&self, input: I) -> Result<I> {
        match &self.0 {
            Some(stage) => stage.apply(input),
            None => Ok(input),
        }
    }
}
