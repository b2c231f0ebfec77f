//! Network-related configuration types

use std::num::NonZeroU16;
use std::str::FromStr;

use crate::types::ValidationError;

/// A searchd API port that cannot be zero
///
/// # Examples
/// ```
/// use sphinx_status_agent::types::Port;
///
/// let port = Port::new(9312).unwrap();
/// assert_eq!(port.get(), 9312);
///
/// assert!(Port::new(0).is_none());
/// ```
#[doc(alias = "tcp_port")]
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port(NonZeroU16);

impl Port {
    /// Sphinx searchd binary API port (9312)
    pub const SPHINX_API: Self =
        Self(NonZeroU16::new(crate::constants::server::DEFAULT_PORT).unwrap());

    /// Create a new port, returning None for 0
    #[must_use]
    pub const fn new(value: u16) -> Option<Self> {
        match NonZeroU16::new(value) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    /// Get the port number
    #[must_use]
    #[inline]
    pub const fn get(&self) -> u16 {
        self.0.get()
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::SPHINX_API
    }
}

impl std::fmt::Display for Port {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.get()
    }
}

impl FromStr for Port {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let port = s
            .trim()
            .parse::<u16>()
            .map_err(|_| ValidationError::UnparsablePort(s.to_string()))?;
        Self::new(port).ok_or(ValidationError::InvalidPort)
    }
}

impl TryFrom<u16> for Port {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ValidationError::InvalidPort)
    }
}

impl serde::Serialize for Port {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u16(self.get())
    }
}

impl<'de> serde::Deserialize<'de> for Port {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u16::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| serde::de::Error::custom("Port cannot be 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sphinx_api_port() {
        assert_eq!(Port::default().get(), 9312);
    }

    #[test]
    fn test_zero_rejected() {
        assert!(Port::new(0).is_none());
        assert_eq!(Port::try_from(0), Err(ValidationError::InvalidPort));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("9312".parse::<Port>().unwrap().get(), 9312);
        assert_eq!(" 9313 ".parse::<Port>().unwrap().get(), 9313);
        assert_eq!("0".parse::<Port>(), Err(ValidationError::InvalidPort));
        assert!(matches!(
            "searchd".parse::<Port>(),
            Err(ValidationError::UnparsablePort(_))
        ));
        assert!("70000".parse::<Port>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Port::new(9312).unwrap().to_string(), "9312");
    }
}
