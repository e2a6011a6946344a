use std::fmt::Display;

/// Default-on-failure combinator.
///
/// Marks the boundary where a fallible step is recovered instead of
/// propagated: the error is logged at warn level and `T::default()` is
/// returned.
pub trait OrRecover<T> {
    fn or_recover(self, context: &str) -> T;
}

impl<T: Default, E: Display> OrRecover<T> for Result<T, E> {
    fn or_recover(self, context: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                ::log::warn!("{}: {}; continuing with default", context, e);
                T::default()
            }
        }
    }
}
