use std::net::TcpListener;

use axum::Router;
use serde_json::{json, Value};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a compact fmt subscriber once per test binary.
/// Honours `RUST_LOG`, defaults to `beacon_node_client=debug`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("beacon_node_client=debug"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_test_writer())
        .try_init();
}

/// Serves `app` on an ephemeral local port and returns its base URL.
/// Must be called from within a tokio runtime.
pub fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());

    tokio::spawn(async move {
        server.await.unwrap();
    });

    format!("http://{addr}")
}

/// `0x` followed by `len` copies of `byte`.
pub fn hex_bytes(byte: u8, len: usize) -> String {
    format!("0x{}", format!("{byte:02x}").repeat(len))
}

pub fn signed_header_json(slot: u64) -> Value {
    json!({
        "message": {
            "slot": slot.to_string(),
            "proposer_index": "1",
            "parent_root": hex_bytes(0xa1, 32),
            "state_root": hex_bytes(0xa2, 32),
            "body_root": hex_bytes(0xa3, 32)
        },
        "signature": hex_bytes(0xa4, 96)
    })
}

/// `/eth/v2/beacon/blocks` envelope at slot 100 wrapping `body`.
pub fn block_response_json(version: &str, body: Value) -> Value {
    json!({
        "version": version,
        "execution_optimistic": false,
        "finalized": true,
        "data": {
            "message": {
                "slot": "100",
                "proposer_index": "7",
                "parent_root": hex_bytes(0xb1, 32),
                "state_root": hex_bytes(0xb2, 32),
                "body": body
            },
            "signature": hex_bytes(0xb3, 96)
        }
    })
}

/// `/eth/v1/config/spec` payload of a mainnet node.
pub fn mainnet_spec() -> Value {
    json!({
        "CONFIG_NAME": "mainnet",
        "PRESET_BASE": "mainnet",
        "DEPOSIT_CHAIN_ID": "1",
        "DEPOSIT_NETWORK_ID": "1",
        "DEPOSIT_CONTRACT_ADDRESS": "0x00000000219ab540356cbb839cbe05303d7705fa",
        "GENESIS_FORK_VERSION": "0x00000000",
        "ALTAIR_FORK_VERSION": "0x01000000",
        "ALTAIR_FORK_EPOCH": "74240",
        "BELLATRIX_FORK_VERSION": "0x02000000",
        "BELLATRIX_FORK_EPOCH": "144896",
        "CAPELLA_FORK_VERSION": "0x03000000",
        "CAPELLA_FORK_EPOCH": "194048",
        "DENEB_FORK_VERSION": "0x04000000",
        "DENEB_FORK_EPOCH": "269568",
        "ELECTRA_FORK_VERSION": "0x05000000",
        "ELECTRA_FORK_EPOCH": "364032",
        "FULU_FORK_VERSION": "0x06000000",
        "FULU_FORK_EPOCH": "411392",
        "GLOAS_FORK_VERSION": "0x07000000",
        "GLOAS_FORK_EPOCH": "18446744073709551615",
        "SECONDS_PER_SLOT": "12",
        "SLOTS_PER_EPOCH": "32",
        "GENESIS_DELAY": "604800",
        "MIN_GENESIS_TIME": "1606824000",
        "SECONDS_PER_ETH1_BLOCK": "14",
        "MIN_VALIDATOR_WITHDRAWABILITY_DELAY": "256",
        "SHARD_COMMITTEE_PERIOD": "256",
        "ETH1_FOLLOW_DISTANCE": "2048",
        "MIN_GENESIS_ACTIVE_VALIDATOR_COUNT": "16384",
        "FIELD_ELEMENTS_PER_BLOB": "4096",
        "MAX_BLOBS_PER_BLOCK": "6",
        "MAX_BLOBS_PER_BLOCK_ELECTRA": "9",
        "MAX_BLOB_COMMITMENTS_PER_BLOCK": "4096",
        "BLOB_SIDECAR_SUBNET_COUNT": "6",
        "BLOB_SIDECAR_SUBNET_COUNT_ELECTRA": "9",
        "MIN_EPOCHS_FOR_BLOB_SIDECARS_REQUESTS": "4096",
        "MAX_REQUEST_BLOB_SIDECARS": "768",
        "MAX_REQUEST_BLOB_SIDECARS_ELECTRA": "1152",
        "BLOB_SCHEDULE": [
            { "EPOCH": "412672", "MAX_BLOBS_PER_BLOCK": "15" },
            { "EPOCH": "419072", "MAX_BLOBS_PER_BLOCK": "21" }
        ],
        "MAX_EFFECTIVE_BALANCE": "32000000000",
        "MAX_EFFECTIVE_BALANCE_ELECTRA": "2048000000000",
        "MIN_ACTIVATION_BALANCE": "32000000000",
        "EJECTION_BALANCE": "16000000000",
        "EFFECTIVE_BALANCE_INCREMENT": "1000000000",
        "MIN_DEPOSIT_AMOUNT": "1000000000",
        "MAX_COMMITTEES_PER_SLOT": "64",
        "TARGET_COMMITTEE_SIZE": "128",
        "MAX_VALIDATORS_PER_COMMITTEE": "2048",
        "SHUFFLE_ROUND_COUNT": "90",
        "BASE_REWARD_FACTOR": "64",
        "WHISTLEBLOWER_REWARD_QUOTIENT": "512",
        "PROPOSER_REWARD_QUOTIENT": "8",
        "INACTIVITY_PENALTY_QUOTIENT": "67108864",
        "MIN_SLASHING_PENALTY_QUOTIENT": "128",
        "MAX_PROPOSER_SLASHINGS": "16",
        "MAX_ATTESTER_SLASHINGS": "2",
        "MAX_ATTESTATIONS": "128",
        "MAX_DEPOSITS": "16",
        "MAX_VOLUNTARY_EXITS": "16",
        "MAX_BLS_TO_EXECUTION_CHANGES": "16",
        "MAX_WITHDRAWALS_PER_PAYLOAD": "16",
        "SYNC_COMMITTEE_SIZE": "512",
        "EPOCHS_PER_SYNC_COMMITTEE_PERIOD": "256",
        "MIN_SYNC_COMMITTEE_PARTICIPANTS": "1",
        "SYNC_COMMITTEE_SUBNET_COUNT": "4",
        "SUBNETS_PER_NODE": "2",
        "ATTESTATION_PROPAGATION_SLOT_RANGE": "32",
        "MAX_REQUEST_BLOCKS_DENEB": "128",
        "DOMAIN_BEACON_PROPOSER": "0x00000000",
        "BLS_WITHDRAWAL_PREFIX": "0x00"
    })
}
