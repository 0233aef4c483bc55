use thiserror::Error;

/// Fatal resolution failures. Any of these aborts the run without producing IR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("unresolved reference to model '{name}'")]
  UnresolvedReference { name: String },
  #[error("invalid {which} bound {value}{location}", location = location_suffix(.location))]
  InvalidBound {
    which: BoundKind,
    value: i64,
    location: Option<String>,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum BoundKind {
  Minimum,
  Maximum,
}

fn location_suffix(location: &Option<String>) -> String {
  location.as_ref().map(|l| format!(" at '{l}'")).unwrap_or_default()
}

impl ResolveError {
  pub fn unresolved(name: impl Into<String>) -> Self {
    Self::UnresolvedReference { name: name.into() }
  }

  pub fn invalid_bound(which: BoundKind, value: i64) -> Self {
    Self::InvalidBound {
      which,
      value,
      location: None,
    }
  }

  /// Attaches the schema location to bound errors raised deep in the resolver.
  #[must_use]
  pub fn at(self, location: &str) -> Self {
    match self {
      Self::InvalidBound {
        which,
        value,
        location: None,
      } => Self::InvalidBound {
        which,
        value,
        location: Some(location.to_string()),
      },
      other => other,
    }
  }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
