// Every engine log line goes through `ls_event!` so the target is spelled once.
#[cfg(feature = "tracing")]
macro_rules! ls_event {
    ($level:ident, $($tt:tt)*) => {
        tracing::$level!(target: "looping_selector", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ls_event {
    ($level:ident, $($tt:tt)*) => {};
}

macro_rules! lstrace {
    ($($tt:tt)*) => { ls_event!(trace, $($tt)*) };
}

macro_rules! lsdebug {
    ($($tt:tt)*) => { ls_event!(debug, $($tt)*) };
}

macro_rules! lswarn {
    ($($tt:tt)*) => { ls_event!(warn, $($tt)*) };
}
