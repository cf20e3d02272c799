//! The error taxonomy for the planarizer, simplifier and triangulators
//! (spec §7). Plain enums with hand-written `Display`/`Error` impls, the
//! same style the teacher crate uses for its own `TessellationError` —
//! no `thiserror`, since the teacher's tessellation core doesn't reach for
//! one either.

/// Result type returned by the fallible entry points (spec §6).
pub type TessellationResult<T> = Result<T, TessellationError>;

/// A contour or a chunker was malformed (spec §7 `InvalidInput`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InvalidInput {
    /// A contour has fewer than 3 vertices.
    ContourTooShort { contour_index: usize, len: usize },
    /// A chunker's `(offset, length)` entries do not tile its backing buffer.
    MismatchedChunkerOffsets,
}

#[cfg(feature = "std")]
impl core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidInput::ContourTooShort { contour_index, len } => {
                std::write!(f, "contour {contour_index} has only {len} vertices, need >= 3")
            }
            InvalidInput::MismatchedChunkerOffsets => {
                std::write!(f, "chunker offsets do not cover its backing buffer")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidInput {}

/// An invariant of the DCEL was violated. Only ever produced in debug
/// builds (spec §7 `AssertionViolation`); in release builds the violated
/// invariant is simply trusted, matching the teacher's own `debug_assert!`
/// discipline for its mesh invariants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssertionViolation {
    TwinMismatch,
    NextPrevMismatch,
    FaceWalkDidNotClose,
    DegenerateTrapeze,
}

#[cfg(feature = "std")]
impl core::fmt::Display for AssertionViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AssertionViolation::TwinMismatch => std::write!(f, "e.twin.twin != e"),
            AssertionViolation::NextPrevMismatch => std::write!(f, "e.next.prev != e"),
            AssertionViolation::FaceWalkDidNotClose => {
                std::write!(f, "face boundary walk did not return to its start")
            }
            AssertionViolation::DegenerateTrapeze => {
                std::write!(f, "trapeze view could not be derived for this face")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AssertionViolation {}

/// Top level error enum returned by the public entry points (spec §6, §7).
///
/// `DegenerateGeometry` is deliberately absent here: per spec §7 it is not
/// surfaced as an error, the affected triangulator just emits nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TessellationError {
    InvalidInput(InvalidInput),
    Assertion(AssertionViolation),
}

#[cfg(feature = "std")]
impl core::fmt::Display for TessellationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TessellationError::InvalidInput(e) => std::write!(f, "invalid input: {e}"),
            TessellationError::Assertion(e) => std::write!(f, "assertion violated: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TessellationError {}

impl From<InvalidInput> for TessellationError {
    fn from(value: InvalidInput) -> Self {
        TessellationError::InvalidInput(value)
    }
}

impl From<AssertionViolation> for TessellationError {
    fn from(value: AssertionViolation) -> Self {
        TessellationError::Assertion(value)
    }
}
