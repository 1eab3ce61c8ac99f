#[cfg(feature = "tracing")]
macro_rules! a11y_event {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "looping_selector_a11y", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! a11y_event {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! atrace {
    ($($tt:tt)*) => { a11y_event!(trace, $($tt)*) };
}

macro_rules! adebug {
    ($($tt:tt)*) => { a11y_event!(debug, $($tt)*) };
}
