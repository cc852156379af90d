macro_rules! ctrace {
    ($($tt:tt)*) => { cloaking::__cloaking_event!(trace, "cloaking_adapter", $($tt)*) };
}

macro_rules! cdebug {
    ($($tt:tt)*) => { cloaking::__cloaking_event!(debug, "cloaking_adapter", $($tt)*) };
}

macro_rules! cwarn {
    ($($tt:tt)*) => { cloaking::__cloaking_event!(warn, "cloaking_adapter", $($tt)*) };
}
