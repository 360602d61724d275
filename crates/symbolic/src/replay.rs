//! Concrete replay of recorded test cases.
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::ktest::{KTest, KTestError, KTestObject};

/// Environment variable naming the test case to replay.
pub const KTEST_FILE_VAR: &str = "KTEST_FILE";

/// Objects with this name carry solver metadata, not program input.
const MODEL_VERSION: &str = "model_version";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error(transparent)]
    KTest(#[from] KTestError),

    #[error("Ran out of recorded inputs while replaying `{name}`")]
    OutOfInputs { name: String },

    #[error("Size mismatch for `{name}`: recorded {recorded} bytes, expected {expected}")]
    SizeMismatch {
        name: String,
        recorded: usize,
        expected: usize,
    },

    #[error("Recorded bytes for `{name}` are not a valid value")]
    InvalidValue { name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Test case to replay, `None` when running under analysis.
    pub ktest_file: Option<PathBuf>,
}

impl ReplayConfig {
    /// Reads [`KTEST_FILE_VAR`]. An empty value counts as unset.
    pub fn from_env() -> Self {
        let ktest_file = std::env::var_os(KTEST_FILE_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self { ktest_file }
    }
}

/// Hands out the objects of a test case in the order they were recorded.
#[derive(Debug, Clone)]
pub struct Replay {
    test: KTest,
    position: usize,
}

impl Replay {
    pub fn new(test: KTest) -> Self {
        Self { test, position: 0 }
    }

    pub fn test(&self) -> &KTest {
        &self.test
    }

    /// Next recorded object for the region `name` of `size` bytes.
    ///
    /// Regions are matched by position, a differing name only warns.
    /// Recorded `model_version` objects are skipped unless that is the
    /// region being asked for.
    pub fn next_object(&mut self, name: &str, size: usize) -> Result<&KTestObject, ReplayError> {
        while name != MODEL_VERSION
            && self
                .test
                .objects
                .get(self.position)
                .is_some_and(|object| object.name == MODEL_VERSION)
        {
            self.position += 1;
        }

        let index = self.position;
        let object = self
            .test
            .objects
            .get(index)
            .ok_or_else(|| ReplayError::OutOfInputs {
                name: name.to_owned(),
            })?;

        if object.bytes.len() != size {
            return Err(ReplayError::SizeMismatch {
                name: name.to_owned(),
                recorded: object.bytes.len(),
                expected: size,
            });
        }
        if object.name != name {
            warn!(
                "Replaying object `{}` into region `{}`",
                object.name, name
            );
        }
        debug!("Replaying `{}` from object {}", name, index);

        self.position += 1;
        Ok(&self.test.objects[index])
    }
}
