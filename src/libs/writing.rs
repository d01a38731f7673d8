use std::fmt;
use std::io::Write;

pub mod cc {
    pub const RESET: &str = "\x1b[0m";
    pub const ORANGE: &str = "\x1b[38;5;208m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
}

/// Backing function for [`log!`]: `HH:MM:SS.mmm | <coloured message>`.
#[doc(hidden)]
pub fn emit_log(color: &str, msg: fmt::Arguments<'_>) {
    let stamp = chrono::Utc::now().format("%H:%M:%S%.3f");
    let _ = writeln!(
        std::io::stderr().lock(),
        "{}{stamp} | {}{color}{msg}{}",
        cc::LIGHT_GRAY,
        cc::RESET,
        cc::RESET
    );
}

/// Backing function for [`warn!`].
#[doc(hidden)]
pub fn emit_warn(msg: fmt::Arguments<'_>) {
    let _ = writeln!(std::io::stderr().lock(), "{}{msg}{}", cc::ORANGE, cc::RESET);
}

/// Timestamped, coloured line on stderr.  Report output never goes through
/// here so stdout stays pipeable.
#[macro_export]
macro_rules! log {
    // plain arms first: a leading literal must never be taken for a colour
    ($fmt:literal $(,)?) => {
        $crate::libs::writing::emit_log($crate::libs::writing::cc::LIGHT_GRAY, format_args!($fmt))
    };
    ($fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::libs::writing::emit_log(
            $crate::libs::writing::cc::LIGHT_GRAY,
            format_args!($fmt, $($arg),+),
        )
    };
    ($color:expr, $fmt:literal $(,)?) => {
        $crate::libs::writing::emit_log($color, format_args!($fmt))
    };
    ($color:expr, $fmt:literal, $($arg:expr),+ $(,)?) => {
        $crate::libs::writing::emit_log($color, format_args!($fmt, $($arg),+))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::libs::writing::emit_warn(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::cc;

    #[test]
    fn log_variants_expand() {
        let (value, from, to) = ("1.5", "0xaa", "0xbb");
        crate::log!(cc::LIGHT_GREEN, "colored no args");
        crate::log!(cc::LIGHT_GREEN, "colored with arg: {}", 123);
        crate::log!(cc::LIGHT_GREEN, "submitted {} ether {} -> {}", value, from, to);
        crate::log!(cc::LIGHT_GREEN, "trailing comma {} {}", 1, 2,);
        crate::log!("plain no args");
        crate::log!("plain with arg: {}", 456);
        crate::log!("plain {} {} {}", value, from, to);
        crate::warn!("warn with arg: {}", 789);
    }
}
