use serde::{Deserialize, Serialize};

use crate::{Error, Result, VERSION};

const METADATA_KEY: &str = "linked_packets_version";

/// Handshake version wrapper carrying the extension version alongside the
/// wrapped application's own version string.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub linked_packets_version: String,
    #[serde(default)]
    pub app_version: String,
}

impl Metadata {
    pub fn new(app_version: &str) -> Self {
        Self {
            linked_packets_version: VERSION.to_string(),
            app_version: app_version.to_string(),
        }
    }

    /// Parses a handshake version string. Strings that do not mention the
    /// extension key are rejected without attempting a decode.
    pub fn from_version(version: &str) -> Result<Self> {
        if !version.contains(METADATA_KEY) {
            return Err(Error::InvalidVersion(format!(
                "version {:?} does not carry {}",
                version, METADATA_KEY
            )));
        }
        serde_json::from_str(version)
            .map_err(|e| Error::InvalidVersion(format!("failed to decode version metadata: {}", e)))
    }

    pub fn has_supported_version(&self) -> bool {
        self.linked_packets_version == VERSION
    }

    pub fn to_version(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding() -> Result<()> {
        let metadata = Metadata::new("ics20-1");
        assert_eq!(
            metadata.to_version()?,
            r#"{"linked_packets_version":"ics29-1","app_version":"ics20-1"}"#
        );
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<()> {
        let metadata = Metadata::new(r#"{"version":"ics27-1"}"#);
        assert_eq!(Metadata::from_version(&metadata.to_version()?)?, metadata);
        Ok(())
    }

    #[test]
    fn test_from_version() -> Result<()> {
        let metadata = Metadata::from_version(r#"{"linked_packets_version":"ics29-1"}"#)?;
        assert!(metadata.has_supported_version());
        assert_eq!(metadata.app_version, "");

        let other = Metadata::from_version(r#"{"linked_packets_version":"ics29-2","app_version":"x"}"#)?;
        assert!(!other.has_supported_version());
        Ok(())
    }

    #[test]
    fn test_from_version_rejects() {
        assert!(matches!(Metadata::from_version("ics20-1"), Err(Error::InvalidVersion(_))));
        assert!(matches!(Metadata::from_version(""), Err(Error::InvalidVersion(_))));
        assert!(matches!(
            Metadata::from_version("linked_packets_version but not json"),
            Err(Error::InvalidVersion(_))
        ));
    }
}
