//! Input annotation for symbolic execution.
//!
//! A program declares its inputs through an [`InputSource`]. Under analysis
//! every declared region is reported to [`symbolic_hook`], which a path
//! exploration tool intercepts to treat the region as unconstrained. When a
//! test case is replayed the region is filled from the recorded file instead.
//!
//! ```no_run
//! use symbolic::{InputSource, Symbolic};
//!
//! let mut source = InputSource::from_env()?;
//! let a = i32::any(&mut source, "a")?;
//! # Ok::<(), symbolic::ReplayError>(())
//! ```
pub mod ktest;
pub mod replay;

use tracing::trace;

pub use ktest::{KTest, KTestError, KTestObject};
pub use replay::{Replay, ReplayConfig, ReplayError, KTEST_FILE_VAR};

/// Values that can be declared as inputs.
pub trait Symbolic: Sized + Copy + Default {
    /// Size of the region in a recorded test case.
    const SIZE: usize;

    /// Decodes recorded bytes, `None` if they do not form a valid value.
    fn from_recorded(bytes: &[u8]) -> Option<Self>;

    /// Bytes as they would be recorded for this value.
    fn to_recorded(self) -> Vec<u8>;

    /// Creates a fresh input called `name`.
    fn any(source: &mut InputSource, name: &str) -> Result<Self, ReplayError> {
        let mut value = Self::default();
        source.make_symbolic(&mut value, name)?;
        Ok(value)
    }
}

macro_rules! impl_symbolic {
    ($($ty:ty),*) => {
        $(
            impl Symbolic for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();

                fn from_recorded(bytes: &[u8]) -> Option<Self> {
                    Some(<$ty>::from_ne_bytes(bytes.try_into().ok()?))
                }

                fn to_recorded(self) -> Vec<u8> {
                    self.to_ne_bytes().to_vec()
                }
            }
        )*
    };
}

impl_symbolic!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl Symbolic for bool {
    const SIZE: usize = 1;

    fn from_recorded(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0] => Some(false),
            [1] => Some(true),
            _ => None,
        }
    }

    fn to_recorded(self) -> Vec<u8> {
        vec![self as u8]
    }
}

/// Arrays are one region, elements laid out back to back.
impl<T: Symbolic, const N: usize> Symbolic for [T; N]
where
    [T; N]: Default,
{
    const SIZE: usize = N * T::SIZE;

    fn from_recorded(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::SIZE {
            return None;
        }
        let mut value = Self::default();
        if T::SIZE > 0 {
            for (element, chunk) in value.iter_mut().zip(bytes.chunks_exact(T::SIZE)) {
                *element = T::from_recorded(chunk)?;
            }
        }
        Some(value)
    }

    fn to_recorded(self) -> Vec<u8> {
        self.into_iter().flat_map(T::to_recorded).collect()
    }
}

/// Where declared inputs get their values from.
#[derive(Debug)]
pub enum InputSource {
    /// Values are left as initialised, an exploration tool supplies them
    /// through [`symbolic_hook`].
    Symbolic,
    /// Values come from a recorded test case.
    Replay(Replay),
}

impl InputSource {
    pub fn from_env() -> Result<Self, ReplayError> {
        Self::from_config(&ReplayConfig::from_env())
    }

    pub fn from_config(cfg: &ReplayConfig) -> Result<Self, ReplayError> {
        match &cfg.ktest_file {
            Some(path) => Ok(Self::Replay(Replay::new(KTest::read_from(path)?))),
            None => Ok(Self::Symbolic),
        }
    }

    pub fn replay(test: KTest) -> Self {
        Self::Replay(Replay::new(test))
    }

    /// Declares `value` as an input called `name`.
    pub fn make_symbolic<T: Symbolic>(
        &mut self,
        value: &mut T,
        name: &str,
    ) -> Result<(), ReplayError> {
        symbolic_hook(core::ptr::addr_of_mut!(*value).cast::<u8>(), T::SIZE, name);

        match self {
            Self::Symbolic => {
                trace!("Declared `{}` ({} bytes) as symbolic", name, T::SIZE);
                Ok(())
            }
            Self::Replay(replay) => {
                let object = replay.next_object(name, T::SIZE)?;
                *value =
                    T::from_recorded(&object.bytes).ok_or_else(|| ReplayError::InvalidValue {
                        name: name.to_owned(),
                    })?;
                Ok(())
            }
        }
    }
}

/// Marks `size` bytes at `address` as an unconstrained input called `name`.
///
/// Does nothing by itself. Exported under a fixed symbol so an exploration
/// tool can hook it.
#[inline(never)]
#[no_mangle]
pub fn symbolic_hook(address: *mut u8, size: usize, name: &str) {
    core::hint::black_box((address, size, name));
}
