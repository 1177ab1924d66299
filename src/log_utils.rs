pub use log::debug;

/// Log a debug message, or print it directly to stderr if a local trace flag is set
///
/// Without the local flag the message is only seen when the global --debug option is given.
/// The local flag is used to trace the search for a single selected breakend.
///
/// # Examples
///
/// ```ignore
/// debug_msg!(false, "Breakend {id}: {} alternatives", n); // debug log only
/// debug_msg!(true, "Breakend {id}: {} alternatives", n); // always printed to stderr
/// ```
macro_rules! debug_msg {
    ($flag:expr, $($arg:tt)+) => {
        if $flag {
            eprintln!($($arg)+);
        } else {
            $crate::log_utils::debug!($($arg)+);
        }
    }
}

pub(crate) use debug_msg;
