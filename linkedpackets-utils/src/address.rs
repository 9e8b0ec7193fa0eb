//! Account addresses are base58 peer ids of ed25519 identities, the same
//! strings produced by [`crate::keypair::Keypair::as_public_address`].

use std::str::FromStr;

use libp2p_identity::PeerId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,

    #[error("malformed address {address}: {reason}")]
    Malformed { address: String, reason: String },
}

/// Parses an address string, returning the peer id it encodes.
pub fn parse_address(address: &str) -> Result<PeerId, AddressError> {
    if address.trim().is_empty() {
        return Err(AddressError::Empty);
    }
    PeerId::from_str(address).map_err(|e| AddressError::Malformed {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

pub fn is_valid_address(address: &str) -> bool {
    parse_address(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair::Keypair;

    #[test]
    fn test_parse_generated_address() -> anyhow::Result<()> {
        let keypair = Keypair::generate()?;
        let address = keypair.as_public_address();
        let peer_id = parse_address(&address)?;
        assert_eq!(peer_id.to_base58(), address);
        Ok(())
    }

    #[test]
    fn test_reject_malformed() {
        assert_eq!(parse_address(""), Err(AddressError::Empty));
        assert!(matches!(
            parse_address("foo"),
            Err(AddressError::Malformed { .. })
        ));
        assert!(!is_valid_address("not-an-address"));
    }
}
