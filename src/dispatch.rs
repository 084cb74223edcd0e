//! Backend selection
//!
//! A [`Dispatcher`] resolves a [`Backend`] to a pair of plain function
//! pointers once; every call after that is a single indirect call with no
//! feature checks. The crate-level [`decode_rgb`](crate::decode_rgb) and
//! [`decode_rgba`](crate::decode_rgba) go through a process-wide dispatcher.
//! Left alone, it resolves from the built-in settings and `HEX_ARGB_BACKEND`
//! without reading any file; [`init_global`] installs one built from a
//! caller-loaded [`DecoderConfig`] instead.

use crate::config::DecoderConfig;
use crate::{scalar, simd};
use std::fmt;
use std::sync::OnceLock;

/// Capability shared by every decoding strategy
pub trait HexDecoder {
    /// Decode `RRGGBB`; alpha is `0xFF`
    fn decode_rgb(&self, hex: &[u8; 6]) -> u32;

    /// Decode `RRGGBBAA`
    fn decode_rgba(&self, hex: &[u8; 8]) -> u32;
}

/// The table-lookup decoder, usable on every target
#[derive(Debug, Clone, Copy, Default)]
pub struct Scalar;

impl HexDecoder for Scalar {
    #[inline]
    fn decode_rgb(&self, hex: &[u8; 6]) -> u32 {
        scalar::decode_rgb(hex)
    }

    #[inline]
    fn decode_rgba(&self, hex: &[u8; 8]) -> u32 {
        scalar::decode_rgba(hex)
    }
}

/// Decoding strategies the dispatcher can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Table lookup, one character at a time
    Scalar,
    /// Vector compare/mask/subtract across all lanes (AVX2 or NEON)
    Simd,
    /// Vector gather from the hex table (AVX2)
    SimdGather,
}

impl Backend {
    /// Every backend, fastest first
    pub const ALL: [Backend; 3] = [Backend::Simd, Backend::SimdGather, Backend::Scalar];

    /// Best backend this CPU can run
    pub fn detect() -> Backend {
        Self::ALL
            .into_iter()
            .find(|backend| backend.is_available())
            .unwrap_or(Backend::Scalar)
    }

    /// Whether this CPU (and build) can run the backend
    pub fn is_available(self) -> bool {
        self.kernels().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Simd => "simd",
            Backend::SimdGather => "simd_gather",
        }
    }

    fn kernels(self) -> Option<Kernels> {
        match self {
            Backend::Scalar => Some(SCALAR_KERNELS),
            Backend::Simd => simd::arith_kernels(),
            Backend::SimdGather => simd::gather_kernels(),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Function pointers for one backend
///
/// Only `Backend::kernels` and the `simd` module construct these, and only
/// for backends the CPU supports.
#[derive(Clone, Copy)]
pub(crate) struct Kernels {
    pub(crate) rgb: fn(&[u8; 6]) -> u32,
    pub(crate) rgba: fn(&[u8; 8]) -> u32,
}

const SCALAR_KERNELS: Kernels = Kernels {
    rgb: scalar::decode_rgb,
    rgba: scalar::decode_rgba,
};

/// A backend resolved once, called through function pointers
#[derive(Clone, Copy)]
pub struct Dispatcher {
    backend: Backend,
    kernels: Kernels,
}

impl Dispatcher {
    /// Dispatcher for `backend`, or `None` if this CPU cannot run it
    pub fn try_new(backend: Backend) -> Option<Self> {
        backend
            .kernels()
            .map(|kernels| Dispatcher { backend, kernels })
    }

    /// Dispatcher for `backend`, falling back to the detected best backend
    pub fn new(backend: Backend) -> Self {
        match Self::try_new(backend) {
            Some(dispatcher) => dispatcher,
            None => {
                let fallback = Self::detect();
                log::warn!(
                    "{} backend is not available on this CPU, using {}",
                    backend,
                    fallback.backend
                );
                fallback
            }
        }
    }

    /// Dispatcher for the best backend this CPU can run
    pub fn detect() -> Self {
        let backend = Backend::detect();
        match Self::try_new(backend) {
            Some(dispatcher) => dispatcher,
            None => Self::scalar(),
        }
    }

    /// Dispatcher for the scalar backend
    pub fn scalar() -> Self {
        Dispatcher {
            backend: Backend::Scalar,
            kernels: SCALAR_KERNELS,
        }
    }

    /// Dispatcher for whatever `config` asks for
    pub fn from_config(config: &DecoderConfig) -> Self {
        match config.effective_backend().requested() {
            Some(backend) => Self::new(backend),
            None => Self::detect(),
        }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}

impl HexDecoder for Dispatcher {
    #[inline(always)]
    fn decode_rgb(&self, hex: &[u8; 6]) -> u32 {
        (self.kernels.rgb)(hex)
    }

    #[inline(always)]
    fn decode_rgba(&self, hex: &[u8; 8]) -> u32 {
        (self.kernels.rgba)(hex)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("backend", &self.backend)
            .finish()
    }
}

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

/// Installs the process-wide dispatcher built from `config`.
///
/// Call before the first decode, typically with
/// [`DecoderConfig::load_with_overrides`], to apply file-based settings.
/// Once a dispatcher is in place it is returned unchanged.
pub fn init_global(config: &DecoderConfig) -> &'static Dispatcher {
    GLOBAL.get_or_init(|| selected(Dispatcher::from_config(config)))
}

/// The process-wide dispatcher, resolved on first use.
///
/// Without a prior [`init_global`], only the built-in settings and the
/// `HEX_ARGB_BACKEND` variable are consulted.
pub fn global() -> &'static Dispatcher {
    GLOBAL.get_or_init(|| {
        let config = DecoderConfig::load_builtin_with_env().unwrap_or_else(|e| {
            log::warn!("failed to load decoder config, using defaults: {}", e);
            DecoderConfig::default()
        });
        selected(Dispatcher::from_config(&config))
    })
}

fn selected(dispatcher: Dispatcher) -> Dispatcher {
    log::debug!("hex color decoding uses the {} backend", dispatcher.backend);
    dispatcher
}
