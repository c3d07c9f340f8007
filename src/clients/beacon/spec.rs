use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::utils::encoding::HexPrefixed;

use super::{block_body::ConsensusVersion, types::ForkVersion};

/// Protocol parameters served by `/eth/v1/config/spec`.
///
/// Parameters every node has reported since phase0 are required. Anything a
/// later fork introduced is optional, since nodes only report the forks they
/// know about.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SpecData {
    pub config_name: String,
    pub preset_base: String,
    #[serde_as(as = "DisplayFromStr")]
    pub deposit_chain_id: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub deposit_network_id: u64,
    #[serde_as(as = "HexPrefixed")]
    pub deposit_contract_address: Address,

    #[serde_as(as = "HexPrefixed")]
    pub genesis_fork_version: ForkVersion,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub altair_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub altair_fork_epoch: Option<u64>,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub bellatrix_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub bellatrix_fork_epoch: Option<u64>,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub capella_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub capella_fork_epoch: Option<u64>,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub deneb_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub deneb_fork_epoch: Option<u64>,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub electra_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub electra_fork_epoch: Option<u64>,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub fulu_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub fulu_fork_epoch: Option<u64>,
    #[serde_as(as = "Option<HexPrefixed>")]
    pub gloas_fork_version: Option<ForkVersion>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub gloas_fork_epoch: Option<u64>,

    // Timing
    #[serde_as(as = "DisplayFromStr")]
    pub seconds_per_slot: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub slots_per_epoch: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub genesis_delay: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub min_genesis_time: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub seconds_per_eth1_block: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub min_validator_withdrawability_delay: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub shard_committee_period: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub eth1_follow_distance: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub min_genesis_active_validator_count: u64,

    // Blobs
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub field_elements_per_blob: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_blobs_per_block: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_blobs_per_block_electra: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_blob_commitments_per_block: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub blob_sidecar_subnet_count: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub blob_sidecar_subnet_count_electra: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub min_epochs_for_blob_sidecars_requests: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_request_blob_sidecars: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_request_blob_sidecars_electra: Option<u64>,
    #[serde(default)]
    pub blob_schedule: Vec<BlobScheduleEntry>,

    // Balances, in Gwei
    #[serde_as(as = "DisplayFromStr")]
    pub max_effective_balance: u64,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_effective_balance_electra: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub min_activation_balance: Option<u64>,
    #[serde_as(as = "DisplayFromStr")]
    pub ejection_balance: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub effective_balance_increment: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub min_deposit_amount: u64,

    // Committees
    #[serde_as(as = "DisplayFromStr")]
    pub max_committees_per_slot: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub target_committee_size: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_validators_per_committee: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub shuffle_round_count: u64,

    // Rewards and penalties
    #[serde_as(as = "DisplayFromStr")]
    pub base_reward_factor: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub whistleblower_reward_quotient: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub proposer_reward_quotient: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub inactivity_penalty_quotient: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub min_slashing_penalty_quotient: u64,

    // Max operations per block
    #[serde_as(as = "DisplayFromStr")]
    pub max_proposer_slashings: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_attester_slashings: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_attestations: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_deposits: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_voluntary_exits: u64,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_bls_to_execution_changes: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_withdrawals_per_payload: Option<u64>,

    // Sync committee
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub sync_committee_size: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub epochs_per_sync_committee_period: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub min_sync_committee_participants: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub sync_committee_subnet_count: Option<u64>,

    // Networking
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub subnets_per_node: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub attestation_propagation_slot_range: Option<u64>,
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub max_request_blocks_deneb: Option<u64>,
}

/// A `BLOB_SCHEDULE` entry: from `epoch` on, at most `max_blobs_per_block`.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BlobScheduleEntry {
    #[serde_as(as = "DisplayFromStr")]
    pub epoch: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub max_blobs_per_block: u64,
}

impl SpecData {
    /// Blob limit in force at `epoch`.
    ///
    /// The latest schedule entry at or before `epoch` wins. Without one, the
    /// Electra or Deneb constant applies depending on which fork is active.
    /// `None` before Deneb.
    pub fn max_blobs_per_block_at_epoch(&self, epoch: u64) -> Option<u64> {
        let scheduled = self
            .blob_schedule
            .iter()
            .filter(|entry| entry.epoch <= epoch)
            .max_by_key(|entry| entry.epoch);

        if let Some(entry) = scheduled {
            return Some(entry.max_blobs_per_block);
        }

        if is_active(self.electra_fork_epoch, epoch) {
            return self.max_blobs_per_block_electra.or(self.max_blobs_per_block);
        }

        if is_active(self.deneb_fork_epoch, epoch) {
            return self.max_blobs_per_block;
        }

        None
    }

    /// Latest fork activated at or before `epoch`.
    pub fn fork_at_epoch(&self, epoch: u64) -> ConsensusVersion {
        let forks = [
            (ConsensusVersion::Fulu, self.fulu_fork_epoch),
            (ConsensusVersion::Electra, self.electra_fork_epoch),
            (ConsensusVersion::Deneb, self.deneb_fork_epoch),
            (ConsensusVersion::Capella, self.capella_fork_epoch),
            (ConsensusVersion::Bellatrix, self.bellatrix_fork_epoch),
            (ConsensusVersion::Altair, self.altair_fork_epoch),
        ];

        forks
            .into_iter()
            .find(|(_, fork_epoch)| is_active(*fork_epoch, epoch))
            .map(|(version, _)| version)
            .unwrap_or(ConsensusVersion::Phase0)
    }
}

// Unscheduled forks are reported with the far-future epoch (u64::MAX), which
// never compares as active.
fn is_active(fork_epoch: Option<u64>, epoch: u64) -> bool {
    fork_epoch.is_some_and(|fork_epoch| fork_epoch <= epoch)
}
