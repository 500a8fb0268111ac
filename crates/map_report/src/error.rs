//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! registry invariant violations, fixtures reaching a generator that cannot describe them,
//! invalid configuration, IO while emitting output, and generic errors.
use thiserror::Error;

use crate::map::FixtureId;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("fixture id {id} is already present in the registry")]
    DuplicateId { id: FixtureId },

    #[error("{generator} generator cannot describe fixture: {fixture}")]
    UnhandledFixture {
        generator: &'static str,
        fixture: String,
    },

    #[error("no fixture ids are left for fixtures without one")]
    IdsExhausted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns `true` for errors that indicate a defect in fixture modeling rather
    /// than a problem with the input map or the output sink.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Error::DuplicateId { .. } | Error::UnhandledFixture { .. })
    }

    pub(crate) fn unhandled(generator: &'static str, fixture: impl std::fmt::Display) -> Self {
        Error::UnhandledFixture {
            generator,
            fixture: fixture.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn invariant_violations_are_classified() {
        assert!(Error::DuplicateId { id: FixtureId(3) }.is_invariant_violation());
        assert!(Error::unhandled("harvestable", "a wild troll").is_invariant_violation());
        assert!(!Error::InvalidConfig("bad".into()).is_invariant_violation());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert!(!Error::from(io).is_invariant_violation());
    }

    #[test]
    fn unhandled_fixture_message_names_generator() {
        let err = Error::unhandled("village", "Unit Scouts");
        assert_eq!(
            err.to_string(),
            "village generator cannot describe fixture: Unit Scouts"
        );
    }
}
