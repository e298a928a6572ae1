//! Authentication Modes

/// How an outbound request proves its identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// No credential attached.
    None,
    /// Attach the cached bearer token, acquiring it first if the cache is empty.
    CachedBearer,
    /// Attach the caller-supplied static token; never triggers acquisition.
    StaticProvided,
}

impl AuthMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::CachedBearer => "cached_bearer",
            Self::StaticProvided => "static_provided",
        }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
