//! Compile-time SIMD backend tags.
//!
//! Kernels are generic over a [`Backend`] marker. Each marker carries a
//! [`SimdLevel`] constant which the kernel matches on; the match is resolved
//! during monomorphization, so no backend branch survives into the hot path.
//!
//! # Levels
//!
//! ```text
//! Scalar < Sse2 < Sse4 < Avx
//!   |       |      |      +-- 8-lane kernels (two matrix columns per register)
//!   |       |      +-- 4-lane kernels, full-register horizontal sums
//!   |       +-- 4-lane kernels, pairwise horizontal sums
//!   +-- portable reference kernels
//! ```
//!
//! A higher level is interchangeable with a lower one within floating-point
//! rounding. Lanes are expressed through `wide`, which lowers to the native
//! instruction set when the target enables it and emulates it otherwise, so
//! every marker is available on every target.
//!
//! # Default backend
//!
//! [`DefaultBackend`] is fixed at build time. The `force-scalar` feature wins;
//! otherwise the highest of the `avx`/`sse4`/`sse2` features or matching
//! `target_feature`s is used; otherwise [`Scalar`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Rank-ordered SIMD capability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimdLevel {
    /// Portable scalar code; defines the reference semantics.
    Scalar,
    /// 4-lane registers, pairwise horizontal sums.
    Sse2,
    /// 4-lane registers, full-register horizontal sums.
    Sse4,
    /// 8-lane registers.
    Avx,
}

impl SimdLevel {
    /// All levels in rank order.
    pub const ALL: [SimdLevel; 4] = [Self::Scalar, Self::Sse2, Self::Sse4, Self::Avx];

    /// Numeric rank (0 for [`Scalar`](SimdLevel::Scalar)).
    #[inline]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// True for every level except [`Scalar`](SimdLevel::Scalar).
    #[inline]
    pub const fn is_simd(self) -> bool {
        !matches!(self, Self::Scalar)
    }

    /// Widest register, in `f32` lanes, used by this level.
    #[inline]
    pub const fn lanes(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Sse2 | Self::Sse4 => 4,
            Self::Avx => 8,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Sse2 => "sse2",
            Self::Sse4 => "sse4",
            Self::Avx => "avx",
        }
    }

    /// Check if the running CPU executes this level natively.
    ///
    /// Diagnostic only: kernels never consult this at runtime.
    pub fn is_available(self) -> bool {
        self <= host_level()
    }

    fn description(self) -> &'static str {
        match self {
            Self::Scalar => "portable scalar reference kernels",
            Self::Sse2 => "4-lane kernels with pairwise horizontal sums",
            Self::Sse4 => "4-lane kernels with full-register horizontal sums",
            Self::Avx => "8-lane matrix kernels, 4-lane vector kernels",
        }
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimdLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" | "portable" | "none" => Ok(Self::Scalar),
            "sse2" => Ok(Self::Sse2),
            "sse4" | "sse4.1" | "sse41" => Ok(Self::Sse4),
            "avx" | "avx2" => Ok(Self::Avx),
            _ => Err(Error::UnknownLevel(s.to_string())),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Compile-time backend marker.
///
/// Sealed: the four markers below are the closed set of backends.
pub trait Backend:
    sealed::Sealed + Copy + Default + fmt::Debug + Send + Sync + 'static
{
    /// Level implemented by this marker.
    const LEVEL: SimdLevel;
}

macro_rules! backend_marker {
    ($(#[$doc:meta])* $name:ident => $level:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Backend for $name {
            const LEVEL: SimdLevel = SimdLevel::$level;
        }
    };
}

backend_marker!(
    /// Portable scalar backend.
    Scalar => Scalar
);
backend_marker!(
    /// 4-lane backend with pairwise horizontal sums.
    Sse2 => Sse2
);
backend_marker!(
    /// 4-lane backend with full-register horizontal sums.
    Sse4 => Sse4
);
backend_marker!(
    /// 8-lane backend.
    Avx => Avx
);

/// Backend used by operators and methods without an explicit marker.
#[cfg(feature = "force-scalar")]
pub type DefaultBackend = Scalar;

/// Backend used by operators and methods without an explicit marker.
#[cfg(all(
    not(feature = "force-scalar"),
    any(feature = "avx", target_feature = "avx")
))]
pub type DefaultBackend = Avx;

/// Backend used by operators and methods without an explicit marker.
#[cfg(all(
    not(feature = "force-scalar"),
    not(any(feature = "avx", target_feature = "avx")),
    any(feature = "sse4", target_feature = "sse4.1")
))]
pub type DefaultBackend = Sse4;

/// Backend used by operators and methods without an explicit marker.
#[cfg(all(
    not(feature = "force-scalar"),
    not(any(feature = "avx", target_feature = "avx")),
    not(any(feature = "sse4", target_feature = "sse4.1")),
    any(feature = "sse2", target_feature = "sse2")
))]
pub type DefaultBackend = Sse2;

/// Backend used by operators and methods without an explicit marker.
#[cfg(all(
    not(feature = "force-scalar"),
    not(any(feature = "avx", target_feature = "avx")),
    not(any(feature = "sse4", target_feature = "sse4.1")),
    not(any(feature = "sse2", target_feature = "sse2"))
))]
pub type DefaultBackend = Scalar;

/// Level of [`DefaultBackend`].
pub const DEFAULT_LEVEL: SimdLevel = <DefaultBackend as Backend>::LEVEL;

/// Best level the running CPU executes natively.
pub fn host_level() -> SimdLevel {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("avx") {
            return SimdLevel::Avx;
        }
        if is_x86_feature_detected!("sse4.1") {
            return SimdLevel::Sse4;
        }
        if is_x86_feature_detected!("sse2") {
            return SimdLevel::Sse2;
        }
    }
    SimdLevel::Scalar
}

/// Checks that the host can run the compiled-in default level.
///
/// Returns the default level on success. A default above the host level is
/// still executable through `wide`'s emulation, but loses its speed advantage,
/// and a binary built with the matching `target_feature` would fault.
pub fn verify_host() -> Result<SimdLevel> {
    let available = host_level();
    if DEFAULT_LEVEL > available {
        tracing::warn!(
            required = %DEFAULT_LEVEL,
            %available,
            "compiled default SIMD level exceeds host capability"
        );
        return Err(Error::UnsupportedLevel {
            required: DEFAULT_LEVEL,
            available,
        });
    }
    tracing::debug!(compiled = %DEFAULT_LEVEL, host = %available, "SIMD level verified");
    Ok(DEFAULT_LEVEL)
}

/// Information about a backend level on the current host.
#[derive(Debug, Clone)]
pub struct LevelInfo {
    /// Level described.
    pub level: SimdLevel,
    /// Whether the host executes it natively.
    pub available: bool,
    /// Whether it is the compiled-in default.
    pub default: bool,
    /// Description.
    pub description: &'static str,
}

/// Detect native availability of every level, highest first.
pub fn detect_levels() -> Vec<LevelInfo> {
    let host = host_level();
    let mut levels: Vec<LevelInfo> = SimdLevel::ALL
        .iter()
        .map(|&level| LevelInfo {
            level,
            available: level <= host,
            default: level == DEFAULT_LEVEL,
            description: level.description(),
        })
        .collect();

    levels.sort_by(|a, b| b.level.cmp(&a.level));
    levels
}

/// Get description of all levels.
pub fn describe_levels() -> String {
    let mut desc = String::new();

    for info in detect_levels() {
        let status = if info.available { "+" } else { "-" };
        let marker = if info.default { " (default)" } else { "" };
        desc.push_str(&format!(
            "[{}] {} x{}{}: {}\n",
            status,
            info.level,
            info.level.lanes(),
            marker,
            info.description
        ));
    }

    desc
}
