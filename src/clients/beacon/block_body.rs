//! Fork-specific beacon block bodies.
//!
//! A `/eth/v2/beacon/blocks` response carries a `version` tag next to a body
//! whose schema depends on that tag. [`BeaconBlockBody::decode`] picks exactly
//! one schema per version; body and payload schemas reject unknown fields so a
//! body never decodes under a fork it doesn't belong to.

use std::{fmt, str::FromStr};

use alloy::primitives::{Address, Bloom, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_with::{serde_as, DisplayFromStr};

use crate::utils::{encoding::HexPrefixed, web3::calculate_versioned_hash};

use super::types::{
    BlockResponse, BlsPublicKey, BlsSignature, KzgCommitment, SignedBeaconBlockHeader,
};

/// Consensus fork names, in activation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusVersion {
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
    Electra,
    Fulu,
}

#[derive(Debug, thiserror::Error)]
pub enum BlockDecodeError {
    #[error("unsupported consensus version: {0}")]
    UnsupportedVersion(String),
    #[error("block envelope is nil")]
    MissingEnvelope,
    #[error("failed to decode {version} block body: {source}")]
    Decode {
        version: ConsensusVersion,
        #[source]
        source: serde_json::Error,
    },
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Eth1Data {
    #[serde_as(as = "HexPrefixed")]
    pub deposit_root: B256,
    #[serde_as(as = "DisplayFromStr")]
    pub deposit_count: u64,
    #[serde_as(as = "HexPrefixed")]
    pub block_hash: B256,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
    #[serde_as(as = "HexPrefixed")]
    pub root: B256,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AttestationData {
    #[serde_as(as = "DisplayFromStr")]
    pub slot: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub index: u64,
    #[serde_as(as = "HexPrefixed")]
    pub beacon_block_root: B256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Attestation {
    #[serde_as(as = "HexPrefixed")]
    pub aggregation_bits: Bytes,
    pub data: AttestationData,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

/// Attestation as of Electra (EIP-7549), committee index moved to `committee_bits`.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ElectraAttestation {
    #[serde_as(as = "HexPrefixed")]
    pub aggregation_bits: Bytes,
    pub data: AttestationData,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
    #[serde_as(as = "HexPrefixed")]
    pub committee_bits: Bytes,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct IndexedAttestation {
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub attesting_indices: Vec<u64>,
    pub data: AttestationData,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ProposerSlashing {
    pub signed_header_1: SignedBeaconBlockHeader,
    pub signed_header_2: SignedBeaconBlockHeader,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DepositData {
    #[serde_as(as = "HexPrefixed")]
    pub pubkey: BlsPublicKey,
    #[serde_as(as = "HexPrefixed")]
    pub withdrawal_credentials: B256,
    /// Gwei
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    #[serde_as(as = "Vec<HexPrefixed>")]
    pub proof: Vec<B256>,
    pub data: DepositData,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct VoluntaryExit {
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedVoluntaryExit {
    pub message: VoluntaryExit,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SyncAggregate {
    #[serde_as(as = "HexPrefixed")]
    pub sync_committee_bits: Bytes,
    #[serde_as(as = "HexPrefixed")]
    pub sync_committee_signature: BlsSignature,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    #[serde_as(as = "DisplayFromStr")]
    pub index: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
    #[serde_as(as = "HexPrefixed")]
    pub address: Address,
    /// Gwei
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BlsToExecutionChange {
    #[serde_as(as = "DisplayFromStr")]
    pub validator_index: u64,
    #[serde_as(as = "HexPrefixed")]
    pub from_bls_pubkey: BlsPublicKey,
    #[serde_as(as = "HexPrefixed")]
    pub to_execution_address: Address,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SignedBlsToExecutionChange {
    pub message: BlsToExecutionChange,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BellatrixExecutionPayload {
    #[serde_as(as = "HexPrefixed")]
    pub parent_hash: B256,
    #[serde_as(as = "HexPrefixed")]
    pub fee_recipient: Address,
    #[serde_as(as = "HexPrefixed")]
    pub state_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub receipts_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub logs_bloom: Bloom,
    #[serde_as(as = "HexPrefixed")]
    pub prev_randao: B256,
    #[serde_as(as = "DisplayFromStr")]
    pub block_number: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_limit: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_used: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub timestamp: u64,
    #[serde_as(as = "HexPrefixed")]
    pub extra_data: Bytes,
    #[serde_as(as = "DisplayFromStr")]
    pub base_fee_per_gas: U256,
    #[serde_as(as = "HexPrefixed")]
    pub block_hash: B256,
    #[serde_as(as = "Vec<HexPrefixed>")]
    pub transactions: Vec<Bytes>,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CapellaExecutionPayload {
    #[serde_as(as = "HexPrefixed")]
    pub parent_hash: B256,
    #[serde_as(as = "HexPrefixed")]
    pub fee_recipient: Address,
    #[serde_as(as = "HexPrefixed")]
    pub state_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub receipts_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub logs_bloom: Bloom,
    #[serde_as(as = "HexPrefixed")]
    pub prev_randao: B256,
    #[serde_as(as = "DisplayFromStr")]
    pub block_number: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_limit: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_used: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub timestamp: u64,
    #[serde_as(as = "HexPrefixed")]
    pub extra_data: Bytes,
    #[serde_as(as = "DisplayFromStr")]
    pub base_fee_per_gas: U256,
    #[serde_as(as = "HexPrefixed")]
    pub block_hash: B256,
    #[serde_as(as = "Vec<HexPrefixed>")]
    pub transactions: Vec<Bytes>,
    pub withdrawals: Vec<Withdrawal>,
}

/// Execution payload from Deneb onwards; Electra and Fulu keep this shape.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DenebExecutionPayload {
    #[serde_as(as = "HexPrefixed")]
    pub parent_hash: B256,
    #[serde_as(as = "HexPrefixed")]
    pub fee_recipient: Address,
    #[serde_as(as = "HexPrefixed")]
    pub state_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub receipts_root: B256,
    #[serde_as(as = "HexPrefixed")]
    pub logs_bloom: Bloom,
    #[serde_as(as = "HexPrefixed")]
    pub prev_randao: B256,
    #[serde_as(as = "DisplayFromStr")]
    pub block_number: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_limit: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub gas_used: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub timestamp: u64,
    #[serde_as(as = "HexPrefixed")]
    pub extra_data: Bytes,
    #[serde_as(as = "DisplayFromStr")]
    pub base_fee_per_gas: U256,
    #[serde_as(as = "HexPrefixed")]
    pub block_hash: B256,
    #[serde_as(as = "Vec<HexPrefixed>")]
    pub transactions: Vec<Bytes>,
    pub withdrawals: Vec<Withdrawal>,
    #[serde_as(as = "DisplayFromStr")]
    pub blob_gas_used: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub excess_blob_gas: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DepositRequest {
    #[serde_as(as = "HexPrefixed")]
    pub pubkey: BlsPublicKey,
    #[serde_as(as = "HexPrefixed")]
    pub withdrawal_credentials: B256,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    #[serde_as(as = "HexPrefixed")]
    pub signature: BlsSignature,
    #[serde_as(as = "DisplayFromStr")]
    pub index: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalRequest {
    #[serde_as(as = "HexPrefixed")]
    pub source_address: Address,
    #[serde_as(as = "HexPrefixed")]
    pub validator_pubkey: BlsPublicKey,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationRequest {
    #[serde_as(as = "HexPrefixed")]
    pub source_address: Address,
    #[serde_as(as = "HexPrefixed")]
    pub source_pubkey: BlsPublicKey,
    #[serde_as(as = "HexPrefixed")]
    pub target_pubkey: BlsPublicKey,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequests {
    pub deposits: Vec<DepositRequest>,
    pub withdrawals: Vec<WithdrawalRequest>,
    pub consolidations: Vec<ConsolidationRequest>,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Phase0BeaconBlockBody {
    #[serde_as(as = "HexPrefixed")]
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    #[serde_as(as = "HexPrefixed")]
    pub graffiti: B256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AltairBeaconBlockBody {
    #[serde_as(as = "HexPrefixed")]
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    #[serde_as(as = "HexPrefixed")]
    pub graffiti: B256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    pub sync_aggregate: SyncAggregate,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BellatrixBeaconBlockBody {
    #[serde_as(as = "HexPrefixed")]
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    #[serde_as(as = "HexPrefixed")]
    pub graffiti: B256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: BellatrixExecutionPayload,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CapellaBeaconBlockBody {
    #[serde_as(as = "HexPrefixed")]
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    #[serde_as(as = "HexPrefixed")]
    pub graffiti: B256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: CapellaExecutionPayload,
    pub bls_to_execution_changes: Vec<SignedBlsToExecutionChange>,
}

#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DenebBeaconBlockBody {
    #[serde_as(as = "HexPrefixed")]
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    #[serde_as(as = "HexPrefixed")]
    pub graffiti: B256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<Attestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: DenebExecutionPayload,
    pub bls_to_execution_changes: Vec<SignedBlsToExecutionChange>,
    #[serde_as(as = "Vec<HexPrefixed>")]
    pub blob_kzg_commitments: Vec<KzgCommitment>,
}

/// Electra body, also served for Fulu.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ElectraBeaconBlockBody {
    #[serde_as(as = "HexPrefixed")]
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    #[serde_as(as = "HexPrefixed")]
    pub graffiti: B256,
    pub proposer_slashings: Vec<ProposerSlashing>,
    pub attester_slashings: Vec<AttesterSlashing>,
    pub attestations: Vec<ElectraAttestation>,
    pub deposits: Vec<Deposit>,
    pub voluntary_exits: Vec<SignedVoluntaryExit>,
    pub sync_aggregate: SyncAggregate,
    pub execution_payload: DenebExecutionPayload,
    pub bls_to_execution_changes: Vec<SignedBlsToExecutionChange>,
    #[serde_as(as = "Vec<HexPrefixed>")]
    pub blob_kzg_commitments: Vec<KzgCommitment>,
    pub execution_requests: ExecutionRequests,
}

/// A decoded block body, one variant per consensus version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeaconBlockBody {
    Phase0(Phase0BeaconBlockBody),
    Altair(AltairBeaconBlockBody),
    Bellatrix(BellatrixBeaconBlockBody),
    Capella(CapellaBeaconBlockBody),
    Deneb(DenebBeaconBlockBody),
    Electra(ElectraBeaconBlockBody),
    Fulu(ElectraBeaconBlockBody),
}

impl ConsensusVersion {
    pub const ALL: [ConsensusVersion; 7] = [
        ConsensusVersion::Phase0,
        ConsensusVersion::Altair,
        ConsensusVersion::Bellatrix,
        ConsensusVersion::Capella,
        ConsensusVersion::Deneb,
        ConsensusVersion::Electra,
        ConsensusVersion::Fulu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusVersion::Phase0 => "phase0",
            ConsensusVersion::Altair => "altair",
            ConsensusVersion::Bellatrix => "bellatrix",
            ConsensusVersion::Capella => "capella",
            ConsensusVersion::Deneb => "deneb",
            ConsensusVersion::Electra => "electra",
            ConsensusVersion::Fulu => "fulu",
        }
    }
}

impl fmt::Display for ConsensusVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsensusVersion {
    type Err = BlockDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConsensusVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| BlockDecodeError::UnsupportedVersion(s.to_string()))
    }
}

impl BeaconBlockBody {
    /// Decodes `body` with the schema of `version`.
    pub fn decode(version: ConsensusVersion, body: &RawValue) -> Result<Self, BlockDecodeError> {
        let raw = body.get();

        let decoded = match version {
            ConsensusVersion::Phase0 => serde_json::from_str(raw).map(BeaconBlockBody::Phase0),
            ConsensusVersion::Altair => serde_json::from_str(raw).map(BeaconBlockBody::Altair),
            ConsensusVersion::Bellatrix => {
                serde_json::from_str(raw).map(BeaconBlockBody::Bellatrix)
            }
            ConsensusVersion::Capella => serde_json::from_str(raw).map(BeaconBlockBody::Capella),
            ConsensusVersion::Deneb => serde_json::from_str(raw).map(BeaconBlockBody::Deneb),
            ConsensusVersion::Electra => serde_json::from_str(raw).map(BeaconBlockBody::Electra),
            ConsensusVersion::Fulu => serde_json::from_str(raw).map(BeaconBlockBody::Fulu),
        };

        decoded.map_err(|source| BlockDecodeError::Decode { version, source })
    }

    pub fn version(&self) -> ConsensusVersion {
        match self {
            BeaconBlockBody::Phase0(_) => ConsensusVersion::Phase0,
            BeaconBlockBody::Altair(_) => ConsensusVersion::Altair,
            BeaconBlockBody::Bellatrix(_) => ConsensusVersion::Bellatrix,
            BeaconBlockBody::Capella(_) => ConsensusVersion::Capella,
            BeaconBlockBody::Deneb(_) => ConsensusVersion::Deneb,
            BeaconBlockBody::Electra(_) => ConsensusVersion::Electra,
            BeaconBlockBody::Fulu(_) => ConsensusVersion::Fulu,
        }
    }

    pub fn eth1_data(&self) -> &Eth1Data {
        match self {
            BeaconBlockBody::Phase0(body) => &body.eth1_data,
            BeaconBlockBody::Altair(body) => &body.eth1_data,
            BeaconBlockBody::Bellatrix(body) => &body.eth1_data,
            BeaconBlockBody::Capella(body) => &body.eth1_data,
            BeaconBlockBody::Deneb(body) => &body.eth1_data,
            BeaconBlockBody::Electra(body) | BeaconBlockBody::Fulu(body) => &body.eth1_data,
        }
    }

    /// `None` before Altair.
    pub fn sync_aggregate(&self) -> Option<&SyncAggregate> {
        match self {
            BeaconBlockBody::Phase0(_) => None,
            BeaconBlockBody::Altair(body) => Some(&body.sync_aggregate),
            BeaconBlockBody::Bellatrix(body) => Some(&body.sync_aggregate),
            BeaconBlockBody::Capella(body) => Some(&body.sync_aggregate),
            BeaconBlockBody::Deneb(body) => Some(&body.sync_aggregate),
            BeaconBlockBody::Electra(body) | BeaconBlockBody::Fulu(body) => {
                Some(&body.sync_aggregate)
            }
        }
    }

    /// Hash of the execution block carried by the body, `None` before Bellatrix.
    pub fn execution_block_hash(&self) -> Option<B256> {
        match self {
            BeaconBlockBody::Phase0(_) | BeaconBlockBody::Altair(_) => None,
            BeaconBlockBody::Bellatrix(body) => Some(body.execution_payload.block_hash),
            BeaconBlockBody::Capella(body) => Some(body.execution_payload.block_hash),
            BeaconBlockBody::Deneb(body) => Some(body.execution_payload.block_hash),
            BeaconBlockBody::Electra(body) | BeaconBlockBody::Fulu(body) => {
                Some(body.execution_payload.block_hash)
            }
        }
    }

    /// `None` before Capella.
    pub fn withdrawals(&self) -> Option<&[Withdrawal]> {
        match self {
            BeaconBlockBody::Phase0(_)
            | BeaconBlockBody::Altair(_)
            | BeaconBlockBody::Bellatrix(_) => None,
            BeaconBlockBody::Capella(body) => Some(&body.execution_payload.withdrawals),
            BeaconBlockBody::Deneb(body) => Some(&body.execution_payload.withdrawals),
            BeaconBlockBody::Electra(body) | BeaconBlockBody::Fulu(body) => {
                Some(&body.execution_payload.withdrawals)
            }
        }
    }

    /// `None` before Deneb.
    pub fn blob_kzg_commitments(&self) -> Option<&[KzgCommitment]> {
        match self {
            BeaconBlockBody::Phase0(_)
            | BeaconBlockBody::Altair(_)
            | BeaconBlockBody::Bellatrix(_)
            | BeaconBlockBody::Capella(_) => None,
            BeaconBlockBody::Deneb(body) => Some(&body.blob_kzg_commitments),
            BeaconBlockBody::Electra(body) | BeaconBlockBody::Fulu(body) => {
                Some(&body.blob_kzg_commitments)
            }
        }
    }

    /// Versioned hashes of the body's blob commitments, in commitment order.
    pub fn blob_versioned_hashes(&self) -> Vec<B256> {
        self.blob_kzg_commitments()
            .unwrap_or_default()
            .iter()
            .map(calculate_versioned_hash)
            .collect()
    }
}

impl BlockResponse {
    pub fn consensus_version(&self) -> Result<ConsensusVersion, BlockDecodeError> {
        self.version.parse()
    }

    pub fn decode_body(&self) -> Result<BeaconBlockBody, BlockDecodeError> {
        BeaconBlockBody::decode(self.consensus_version()?, &self.data.message.body)
    }
}

/// Decodes the body of a block envelope according to its version tag.
pub fn decode_block_body(
    envelope: Option<&BlockResponse>,
) -> Result<BeaconBlockBody, BlockDecodeError> {
    envelope
        .ok_or(BlockDecodeError::MissingEnvelope)?
        .decode_body()
}
