//! Logging front-end.
//!
//! Hardware builds log through `defmt`, desktop builds through `tracing`.
//! With neither feature enabled the macros still borrow their arguments so
//! call sites compile identically and nothing is reported as unused.
//!
//! Format strings must stay within the subset both backends accept: plain
//! `{}` placeholders over integers, floats and `&str`.

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
        #[cfg(all(feature = "tracing", not(feature = "defmt")))]
        tracing::info!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = core::format_args!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
        #[cfg(all(feature = "tracing", not(feature = "defmt")))]
        tracing::warn!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = core::format_args!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
        #[cfg(all(feature = "tracing", not(feature = "defmt")))]
        tracing::debug!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        let _ = core::format_args!($($arg)*);
    }};
}
