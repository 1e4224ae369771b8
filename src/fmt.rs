//! Logging shim: forwards to `defmt` or `log` depending on the enabled
//! feature (`defmt` wins if both are), and compiles to nothing when neither
//! is enabled.
#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "defmt")] {
                ::defmt::trace!($($arg)*);
            } else if #[cfg(feature = "log")] {
                ::log::trace!($($arg)*);
            } else {
                let _ = ::core::format_args!($($arg)*);
            }
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "defmt")] {
                ::defmt::debug!($($arg)*);
            } else if #[cfg(feature = "log")] {
                ::log::debug!($($arg)*);
            } else {
                let _ = ::core::format_args!($($arg)*);
            }
        }
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "defmt")] {
                ::defmt::warn!($($arg)*);
            } else if #[cfg(feature = "log")] {
                ::log::warn!($($arg)*);
            } else {
                let _ = ::core::format_args!($($arg)*);
            }
        }
    }};
}
