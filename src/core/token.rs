use secrecy::{ExposeSecret, SecretString};

/// Opaque account-activation token taken from the current route.
///
/// The value is never inspected or validated client-side. It is a credential,
/// so it stays wrapped in a [`SecretString`] and only the request builder sees
/// the raw text.
pub struct ActivationToken(SecretString);

impl ActivationToken {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw: String = raw.into();
        Self(SecretString::new(raw.into_boxed_str()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl Clone for ActivationToken {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl std::fmt::Debug for ActivationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ActivationToken").field(&"<REDACTED>").finish()
    }
}

impl From<&str> for ActivationToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ActivationToken {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
