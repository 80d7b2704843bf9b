use std::sync::Arc;

use zeroize::Zeroizing;

/// Secret payload bytes that are not `Debug`/`Display` printable and are zeroized on drop.
#[derive(Clone)]
pub struct SecretValue(Arc<Zeroizing<Vec<u8>>>);

impl SecretValue {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Arc::new(Zeroizing::new(bytes)))
    }

    pub fn from_string(s: String) -> Self {
        Self::from_bytes(s.into_bytes())
    }

    pub fn expose_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Payload as text; secret payloads are cast from UTF-8.
    pub fn expose_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(self.expose_bytes())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}
