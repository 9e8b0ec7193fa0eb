pub mod address;
pub mod keypair;
