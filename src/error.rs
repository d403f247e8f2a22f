use std::error::Error;
use std::fmt;

/// Errors surfaced by the allocator.
///
/// Handing the engine a pointer it never issued (or one already released)
/// is not an error value: it is a programming mistake, caught by debug
/// assertions and undefined behavior in release builds, the same contract
/// every system allocator ships with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
  /// The environment cannot extend the arena any further.
  OutOfMemory {
    /// Number of bytes the caller asked for.
    requested: usize,
    /// Unclaimed bytes left in the arena reservation.
    available: usize,
  },
}

impl fmt::Display for AllocError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::OutOfMemory {
        requested,
        available,
      } => {
        write!(
          f,
          "out of memory: requested {requested} bytes, {available} bytes left in the arena"
        )
      }
    }
  }
}

impl Error for AllocError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_names_both_sizes() {
    let err = AllocError::OutOfMemory {
      requested: 4096,
      available: 128,
    };

    let text = err.to_string();

    assert!(text.contains("4096"));
    assert!(text.contains("128"));
  }
}
