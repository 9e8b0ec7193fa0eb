pub mod apps;
pub mod chain;
pub mod path;
pub mod relay;

pub use apps::MockApp;
pub use chain::TestChain;
pub use path::Path;
pub use relay::MockRelay;

use anyhow::Result;
use linkedpackets_utils::keypair::Keypair;

pub struct Devnet;

impl Default for Devnet {
    fn default() -> Self {
        Self::new()
    }
}

impl Devnet {
    pub fn new() -> Self {
        Self
    }

    pub fn get_keypairs(&self, count: usize) -> Result<Vec<Keypair>> {
        (0..count).map(|_| Keypair::generate()).collect()
    }

    pub fn get_addresses(&self, count: usize) -> Result<Vec<String>> {
        Ok(self
            .get_keypairs(count)?
            .iter()
            .map(|keypair| keypair.as_public_address())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_addresses() -> Result<()> {
        let addresses = Devnet::new().get_addresses(3)?;
        assert_eq!(addresses.len(), 3);
        assert_ne!(addresses[0], addresses[1]);
        for address in &addresses {
            assert!(linkedpackets_utils::address::is_valid_address(address));
        }
        Ok(())
    }
}
