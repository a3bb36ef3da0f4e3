use std::{fmt, rc::Rc};

use crate::error::RendererError;

/// Fallible one-argument thunk.
pub type Thunk<T, A> = Rc<dyn Fn(&A) -> Result<T, RendererError>>;

/// A value that is either given directly or derived from an argument.
///
/// Every "value or generator" input of the builder is normalized into this type at
/// the API boundary, so resolution only ever calls `run_if_fn`.
pub enum MaybeFn<T, A> {
    Value(T),
    Fn(Thunk<T, A>),
}

impl<T: Clone, A> MaybeFn<T, A> {
    /// Wraps an infallible closure.
    pub fn from_fn<F>(derive: F) -> Self
    where
        F: Fn(&A) -> T + 'static,
    {
        Self::Fn(Rc::new(move |arg: &A| Ok(derive(arg))))
    }

    /// Returns the value, invoking the generator with `arg` when there is one.
    pub fn run_if_fn(&self, arg: &A) -> Result<T, RendererError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Fn(derive) => derive(arg),
        }
    }

    /// Whether this is a generator rather than a value.
    pub fn is_fn(&self) -> bool {
        matches!(self, Self::Fn(_))
    }
}

impl<T: Clone, A> Clone for MaybeFn<T, A> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Fn(derive) => Self::Fn(derive.clone()),
        }
    }
}

impl<T: fmt::Debug, A> fmt::Debug for MaybeFn<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Fn(_) => f.write_str("Fn"),
        }
    }
}
