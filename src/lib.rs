//! Typed, read-only client for the Ethereum beacon node REST API.
//!
//! [`BeaconClient`] wraps each endpoint in a method returning decoded records.
//! Blocks keep their body undecoded until [`BlockResponse::decode_body`] picks
//! the schema of the block's consensus version. The [`slots`] module converts
//! between slots, epochs and wall clock time.

#![recursion_limit = "256"]

pub mod clients;
pub mod env;
pub mod slots;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use clients::{
    beacon::{
        block_body::{decode_block_body, BeaconBlockBody, BlockDecodeError, ConsensusVersion},
        spec::{BlobScheduleEntry, SpecData},
        types::{BlockId, BlockResponse, HealthStatus, PeersFilter},
        BeaconClient, CommonBeaconClient, Config,
    },
    common::{ApiError, ClientError, ClientResult},
};
pub use env::Environment;
pub use slots::SlotClock;
