use std::{fmt, str::FromStr};

use alloy::primitives::{Address, Bytes, FixedBytes, B256};
use reqwest::StatusCode;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::{
    clients::common::ClientResult,
    utils::encoding::{parse_prefixed_hex, HexPrefixed},
};

use super::CommonBeaconClient;

pub type BlsSignature = FixedBytes<96>;
pub type BlsPublicKey = FixedBytes<48>;
pub type KzgCommitment = FixedBytes<48>;
pub type ForkVersion = FixedBytes<4>;

pub const BYTES_PER_BLOB: usize = 131_072;

/// Identifies a block in path segments: `head`, `genesis`, `finalized`, a slot
/// or a `0x` prefixed block root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Head,
    Genesis,
    Finalized,
    Slot(u64),
    Root(B256),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid block id \"{input}\": {reason}")]
pub struct BlockIdParseError {
    pub input: String,
    pub reason: String,
}

/// Standard envelope: a `data` payload plus the chain-view flags.
#[derive(Deserialize, Debug, Clone)]
pub struct Response<T> {
    #[serde(default)]
    pub execution_optimistic: Option<bool>,
    #[serde(default)]
    pub finalized: Option<bool>,
    pub data: T,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GenesisData {
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_time: u64,
    #[serde_as(as = "HexPrefixed")]
    pub genesis_validators_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub genesis_fork_version: ForkVersion,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DepositContractData {
    /// Id of the execution chain the contract is deployed on
    #[serde_as(as = "DisplayFromStr")]
    pub chain_id: u64,
    #[serde_as(as = "HexPrefixed")]
    pub address: Address,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BeaconBlockHeader {
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    #[serde_as(as = "HexPrefixed")]
    pub parent_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub state_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub body_root: B256,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedBeaconBlockHeader {
    pub message: BeaconBlockHeader,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockHeaderData {
    #[serde_as(as = "HexPrefixed")]
    pub root: B256,
    pub canonical: bool,
    pub header: SignedBeaconBlockHeader,
}

pub type BlockHeaderResponse = Response<BlockHeaderData>;

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockRootData {
    #[serde_as(as = "HexPrefixed")]
    pub root: B256,
}

pub type BlockRootResponse = Response<BlockRootData>;

/// Fields shared by every fork's block message. The body is kept undecoded
/// until its consensus version is known, see [`super::block_body`].
#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct BeaconBlock {
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_index: u64,
    #[serde_as(as = "HexPrefixed")]
    pub parent_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub state_root: B256,
    pub body: Box<RawValue>,
}

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

/// Response of `/eth/v2/beacon/blocks/{block_id}`.
///
/// `version` is kept verbatim so an unknown fork name surfaces from the body
/// decoder instead of failing the whole request.
#[derive(Deserialize, Debug, Clone)]
pub struct BlockResponse {
    pub version: String,
    #[serde(default)]
    pub execution_optimistic: Option<bool>,
    #[serde(default)]
    pub finalized: Option<bool>,
    pub data: SignedBeaconBlock,
}

/// A full EIP-4844 blob.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob(Bytes);

pub type BlobsResponse = Response<Vec<Blob>>;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeerState {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeerDirection {
    Inbound,
    Outbound,
}

/// Filters for `/eth/v1/node/peers`. Empty lists are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeersFilter {
    pub states: Vec<PeerState>,
    pub directions: Vec<PeerDirection>,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentityMetadata {
    /// Version of the node's metadata, starting at 0
    #[serde_as(as = "DisplayFromStr")]
    pub seq_number: u64,
    /// Persistent attestation subnet subscriptions
    #[serde_as(as = "HexPrefixed")]
    pub attnets: Bytes,
    /// Sync committee subnet subscriptions (from Altair)
    #[serde_as(as = "Option<HexPrefixed>")]
    pub syncnets: Option<Bytes>,
    /// Custody group count (from Fulu)
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub custody_group_count: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    pub peer_id: String,
    pub enr: String,
    pub p2p_addresses: Vec<String>,
    pub discovery_addresses: Vec<String>,
    pub metadata: NodeIdentityMetadata,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub peer_id: String,
    /// Ethereum node record, `None` when the node doesn't know it
    pub enr: Option<String>,
    pub last_seen_p2p_address: String,
    pub state: PeerState,
    pub direction: PeerDirection,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PeersMeta {
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub count: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PeersResponse {
    pub data: Vec<Peer>,
    pub meta: PeersMeta,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerCount {
    #[serde_as(as = "DisplayFromStr")]
    pub disconnected: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub connecting: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub connected: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub disconnecting: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeVersion {
    pub version: String,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncingStatus {
    /// Head slot the node is trying to reach
    #[serde_as(as = "DisplayFromStr")]
    pub head_slot: u64,
    /// Slots left to process to reach head, 0 when synced
    #[serde_as(as = "DisplayFromStr")]
    pub sync_distance: u64,
    pub is_syncing: bool,
    #[serde(default)]
    pub is_optimistic: Option<bool>,
    #[serde(default)]
    pub el_offline: Option<bool>,
}

/// Outcome of `/eth/v1/node/health`, carried by the HTTP status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// 200
    Ready,
    /// 206: syncing, or the execution node is optimistic or offline
    Syncing,
    /// 503
    NotInitialized,
}

impl BlockId {
    /// Returns the slot this id points to. Slots are returned as is, every
    /// other form is resolved through the block header endpoint.
    pub async fn resolve_to_slot(&self, client: &dyn CommonBeaconClient) -> ClientResult<u64> {
        match self {
            BlockId::Slot(slot) => Ok(*slot),
            _ => {
                let header = client.get_block_header(self).await?;

                Ok(header.data.header.message.slot)
            }
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Head => write!(f, "head"),
            BlockId::Genesis => write!(f, "genesis"),
            BlockId::Finalized => write!(f, "finalized"),
            BlockId::Slot(slot) => write!(f, "{slot}"),
            BlockId::Root(root) => write!(f, "0x{root:x}"),
        }
    }
}

impl FromStr for BlockId {
    type Err = BlockIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| BlockIdParseError {
            input: s.to_string(),
            reason,
        };

        match s {
            "head" => Ok(BlockId::Head),
            "genesis" => Ok(BlockId::Genesis),
            "finalized" => Ok(BlockId::Finalized),
            _ if s.starts_with("0x") => parse_prefixed_hex::<B256>(s)
                .map(BlockId::Root)
                .map_err(parse_error),
            _ => s
                .parse::<u64>()
                .map(BlockId::Slot)
                .map_err(|err| parse_error(err.to_string())),
        }
    }
}

impl From<u64> for BlockId {
    fn from(slot: u64) -> Self {
        BlockId::Slot(slot)
    }
}

impl From<B256> for BlockId {
    fn from(root: B256) -> Self {
        BlockId::Root(root)
    }
}

impl Blob {
    pub fn as_bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blob({} bytes)", self.0.len())
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        let bytes: Bytes = parse_prefixed_hex(&value).map_err(D::Error::custom)?;

        if bytes.len() != BYTES_PER_BLOB {
            return Err(D::Error::invalid_length(bytes.len(), &"131072 bytes"));
        }

        Ok(Self(bytes))
    }
}

impl PeerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerState::Disconnected => "disconnected",
            PeerState::Connecting => "connecting",
            PeerState::Connected => "connected",
            PeerState::Disconnecting => "disconnecting",
        }
    }
}

impl fmt::Display for PeerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PeerDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerDirection::Inbound => "inbound",
            PeerDirection::Outbound => "outbound",
        }
    }
}

impl fmt::Display for PeerDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PeersFilter {
    pub fn with_states(mut self, states: impl IntoIterator<Item = PeerState>) -> Self {
        self.states.extend(states);
        self
    }

    pub fn with_directions(mut self, directions: impl IntoIterator<Item = PeerDirection>) -> Self {
        self.directions.extend(directions);
        self
    }

    /// One query occurrence per filter value, never comma-joined.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let states = self
            .states
            .iter()
            .map(|state| ("state", state.as_str().to_string()));
        let directions = self
            .directions
            .iter()
            .map(|direction| ("direction", direction.as_str().to_string()));

        states.chain(directions).collect()
    }
}

impl HealthStatus {
    pub fn from_status(status: StatusCode) -> Option<Self> {
        match status {
            StatusCode::OK => Some(HealthStatus::Ready),
            StatusCode::PARTIAL_CONTENT => Some(HealthStatus::Syncing),
            StatusCode::SERVICE_UNAVAILABLE => Some(HealthStatus::NotInitialized),
            _ => None,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            HealthStatus::Ready => 200,
            HealthStatus::Syncing => 206,
            HealthStatus::NotInitialized => 503,
        }
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use serde_json::json;

    use crate::{
        clients::beacon::MockCommonBeaconClient,
        test_utils::{hex_bytes, signed_header_json},
    };

    use super::*;

    #[test]
    fn block_id_renders_path_segments() {
        let root = B256::repeat_byte(0xcf);

        assert_eq!(BlockId::Head.to_string(), "head");
        assert_eq!(BlockId::Genesis.to_string(), "genesis");
        assert_eq!(BlockId::Finalized.to_string(), "finalized");
        assert_eq!(BlockId::Slot(12345).to_string(), "12345");
        assert_eq!(
            BlockId::Root(root).to_string(),
            format!("0x{}", "cf".repeat(32))
        );
    }

    #[test]
    fn block_id_parses_all_forms() {
        let root = format!("0x{}", "cf".repeat(32));

        assert_eq!("head".parse::<BlockId>().unwrap(), BlockId::Head);
        assert_eq!("genesis".parse::<BlockId>().unwrap(), BlockId::Genesis);
        assert_eq!("finalized".parse::<BlockId>().unwrap(), BlockId::Finalized);
        assert_eq!("42".parse::<BlockId>().unwrap(), BlockId::Slot(42));
        assert_eq!(
            root.parse::<BlockId>().unwrap(),
            BlockId::Root(B256::repeat_byte(0xcf))
        );
    }

    #[test]
    fn block_id_rejects_garbage() {
        assert!("current".parse::<BlockId>().is_err());
        assert!("0x1234".parse::<BlockId>().is_err());
        assert!("-1".parse::<BlockId>().is_err());
    }

    #[test]
    fn peers_filter_without_values_has_no_query() {
        assert!(PeersFilter::default().to_query().is_empty());
    }

    #[test]
    fn peers_filter_repeats_each_value() {
        let filter = PeersFilter::default()
            .with_states([PeerState::Connected, PeerState::Connecting])
            .with_directions([PeerDirection::Inbound]);

        assert_eq!(
            filter.to_query(),
            vec![
                ("state", "connected".to_string()),
                ("state", "connecting".to_string()),
                ("direction", "inbound".to_string()),
            ]
        );
    }

    #[test]
    fn health_status_maps_known_codes() {
        assert_eq!(
            HealthStatus::from_status(StatusCode::OK),
            Some(HealthStatus::Ready)
        );
        assert_eq!(
            HealthStatus::from_status(StatusCode::PARTIAL_CONTENT),
            Some(HealthStatus::Syncing)
        );
        assert_eq!(
            HealthStatus::from_status(StatusCode::SERVICE_UNAVAILABLE),
            Some(HealthStatus::NotInitialized)
        );
        assert_eq!(HealthStatus::from_status(StatusCode::NOT_FOUND), None);
        assert_eq!(HealthStatus::Syncing.status_code(), 206);
    }

    #[test]
    fn peer_enr_null_is_none() {
        let peer: Peer = serde_json::from_value(json!({
            "peer_id": "16Uiu2HAm",
            "enr": null,
            "last_seen_p2p_address": "/ip4/7.7.7.7/tcp/4242",
            "state": "connected",
            "direction": "outbound"
        }))
        .unwrap();

        assert_eq!(peer.enr, None);
        assert_eq!(peer.state, PeerState::Connected);
        assert_eq!(peer.direction, PeerDirection::Outbound);
    }

    #[test]
    fn peers_meta_count_accepts_number_and_string() {
        let meta: PeersMeta = serde_json::from_value(json!({ "count": 3 })).unwrap();
        assert_eq!(meta.count, 3);

        let meta: PeersMeta = serde_json::from_value(json!({ "count": "7" })).unwrap();
        assert_eq!(meta.count, 7);
    }

    #[test]
    fn quoted_integers_decode_to_native_integers() {
        let count: PeerCount = serde_json::from_value(json!({
            "disconnected": "12",
            "connecting": "34",
            "connected": "56",
            "disconnecting": "78"
        }))
        .unwrap();

        assert_eq!(count.connected, 56);

        let unquoted = serde_json::from_value::<PeerCount>(json!({
            "disconnected": "x",
            "connecting": "34",
            "connected": "56",
            "disconnecting": "78"
        }));

        assert!(unquoted.is_err());
    }

    #[test]
    fn blob_requires_exact_size() {
        let blob: Blob = serde_json::from_value(json!(hex_bytes(0x01, BYTES_PER_BLOB))).unwrap();
        assert_eq!(blob.as_bytes().len(), BYTES_PER_BLOB);

        let short = serde_json::from_value::<Blob>(json!(hex_bytes(0x01, 32)));
        assert!(short.is_err());
    }

    #[test]
    fn envelope_flags_are_optional() {
        let response: Response<BlockRootData> = serde_json::from_value(json!({
            "data": { "root": format!("0x{}", "00".repeat(32)) }
        }))
        .unwrap();

        assert_eq!(response.execution_optimistic, None);
        assert_eq!(response.finalized, None);
    }

    #[tokio::test]
    async fn slot_block_id_resolves_without_requests() {
        let client = MockCommonBeaconClient::new();

        let slot = BlockId::Slot(99).resolve_to_slot(&client).await.unwrap();

        assert_eq!(slot, 99);
    }

    #[tokio::test]
    async fn named_block_id_resolves_through_header() {
        let mut client = MockCommonBeaconClient::new();
        let header: BlockHeaderResponse = serde_json::from_value(json!({
            "execution_optimistic": false,
            "finalized": true,
            "data": {
                "root": format!("0x{}", "cf".repeat(32)),
                "canonical": true,
                "header": signed_header_json(12345)
            }
        }))
        .unwrap();

        client
            .expect_get_block_header()
            .with(eq(BlockId::Finalized))
            .times(1)
            .returning(move |_| Ok(header.clone()));

        let slot = BlockId::Finalized.resolve_to_slot(&client).await.unwrap();

        assert_eq!(slot, 12345);
    }
}
