use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use libp2p_identity::{Keypair as Libp2pKeypair, PublicKey as Libp2pPublicKey};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub enum KeypairOrPublicKey {
    Keypair(Libp2pKeypair),
    PublicKey(Libp2pPublicKey),
}

/// An account identity. Its public address is what the administrative
/// operations accept as `sender` and `authority`.
#[derive(Clone)]
pub struct Keypair {
    pub inner: KeypairOrPublicKey,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeypairJSON {
    pub id: String,
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl Keypair {
    pub fn new(key: KeypairOrPublicKey) -> Self {
        Self { inner: key }
    }

    pub fn generate() -> Result<Self> {
        let key = Libp2pKeypair::generate_ed25519();
        Ok(Self::new(KeypairOrPublicKey::Keypair(key)))
    }

    fn public_key(&self) -> Libp2pPublicKey {
        match &self.inner {
            KeypairOrPublicKey::Keypair(k) => k.public(),
            KeypairOrPublicKey::PublicKey(pk) => pk.clone(),
        }
    }

    pub fn as_public_address(&self) -> String {
        self.public_key().to_peer_id().to_base58()
    }

    pub fn public_key_as_base64_pad(&self) -> String {
        BASE64.encode(self.public_key().encode_protobuf())
    }

    pub fn private_key_as_base64_pad(&self) -> Result<String> {
        match &self.inner {
            KeypairOrPublicKey::Keypair(k) => Ok(BASE64.encode(k.to_protobuf_encoding()?)),
            KeypairOrPublicKey::PublicKey(_) => Err(anyhow!("No private key available")),
        }
    }

    pub fn from_json(json: &KeypairJSON) -> Result<Self> {
        let keypair = if let Some(private_key) = &json.private_key {
            let key_bytes = BASE64.decode(private_key)?;
            let key = Libp2pKeypair::from_protobuf_encoding(&key_bytes)?;
            Self::new(KeypairOrPublicKey::Keypair(key))
        } else {
            let key_bytes = BASE64.decode(&json.public_key)?;
            let public_key = Libp2pPublicKey::try_decode_protobuf(&key_bytes)?;
            Self::new(KeypairOrPublicKey::PublicKey(public_key))
        };

        if keypair.as_public_address() != json.id {
            return Err(anyhow!(
                "keypair id {} does not match its public key",
                json.id
            ));
        }
        Ok(keypair)
    }

    pub fn from_json_string(json_str: &str) -> Result<Self> {
        let json: KeypairJSON = serde_json::from_str(json_str)?;
        Self::from_json(&json)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::from_json_string(&json_str)
    }

    pub fn as_json(&self) -> Result<KeypairJSON> {
        Ok(KeypairJSON {
            id: self.as_public_address(),
            public_key: self.public_key_as_base64_pad(),
            private_key: self.private_key_as_base64_pad().ok(),
        })
    }

    pub fn as_public_json(&self) -> KeypairJSON {
        KeypairJSON {
            id: self.as_public_address(),
            public_key: self.public_key_as_base64_pad(),
            private_key: None,
        }
    }

    pub fn as_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.as_json()?)?)
    }

    pub fn as_json_file(&self, path: &Path) -> Result<()> {
        fs::write(path, self.as_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() -> Result<()> {
        let keypair = Keypair::generate()?;
        let json = keypair.as_json_string()?;
        let restored = Keypair::from_json_string(&json)?;
        assert_eq!(restored.as_public_address(), keypair.as_public_address());
        assert!(restored.private_key_as_base64_pad().is_ok());
        Ok(())
    }

    #[test]
    fn test_public_only() -> Result<()> {
        let keypair = Keypair::generate()?;
        let public = Keypair::from_json(&keypair.as_public_json())?;
        assert_eq!(public.as_public_address(), keypair.as_public_address());
        assert!(public.private_key_as_base64_pad().is_err());
        Ok(())
    }

    #[test]
    fn test_json_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("id.json");
        let keypair = Keypair::generate()?;
        keypair.as_json_file(&path)?;
        let restored = Keypair::from_json_file(&path)?;
        assert_eq!(restored.as_public_address(), keypair.as_public_address());
        Ok(())
    }
}
