pub mod encoding;
pub mod web3;
