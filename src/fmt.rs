//! Logging macros.
//!
//! With the `defmt` feature the macros forward to `defmt`. Host tests print through `println!`.
//! Anything else compiles the call away.

#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[TRACE] ", $s) $(, $x)*);
        #[cfg(not(any(test, feature = "defmt")))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[DEBUG] ", $s) $(, $x)*);
        #[cfg(not(any(test, feature = "defmt")))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[INFO] ", $s) $(, $x)*);
        #[cfg(not(any(test, feature = "defmt")))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($s $(, $x)*);
        #[cfg(all(test, not(feature = "defmt")))]
        ::std::println!(concat!("[WARN] ", $s) $(, $x)*);
        #[cfg(not(any(test, feature = "defmt")))]
        let _ = ($( & $x ),*);
    }};
}
