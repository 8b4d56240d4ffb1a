/// Emits a trace-level event when the `tracing` feature is enabled, and
/// nothing otherwise.
macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::trace!($($tt)*)
    }
}

pub(crate) use trace;
