/// Emits a `tracing` event at `$level` under `$target`; expands to nothing without `tracing`.
///
/// Shared with `cloaking-adapter`, which logs under its own target.
#[cfg(feature = "tracing")]
#[doc(hidden)]
#[macro_export]
macro_rules! __cloaking_event {
    ($level:ident, $target:literal, $($tt:tt)*) => {
        $crate::__private::tracing::$level!(target: $target, $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __cloaking_event {
    ($level:ident, $target:literal, $($tt:tt)*) => {};
}

macro_rules! ctrace {
    ($($tt:tt)*) => { $crate::__cloaking_event!(trace, "cloaking", $($tt)*) };
}

macro_rules! cdebug {
    ($($tt:tt)*) => { $crate::__cloaking_event!(debug, "cloaking", $($tt)*) };
}

macro_rules! cwarn {
    ($($tt:tt)*) => { $crate::__cloaking_event!(warn, "cloaking", $($tt)*) };
}
