use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::clients::{beacon::CommonBeaconClient, common::ClientResult};

use super::{
    compute_epoch_at_slot, compute_slot_at_timestamp, compute_start_slot_at_epoch,
    compute_timestamp_at_slot,
};

/// Wall clock view of the chain, from genesis time and slot timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClock {
    pub genesis_time: u64,
    pub seconds_per_slot: u64,
    pub slots_per_epoch: u64,
}

impl SlotClock {
    pub fn new(genesis_time: u64, seconds_per_slot: u64, slots_per_epoch: u64) -> Self {
        Self {
            genesis_time,
            seconds_per_slot,
            slots_per_epoch,
        }
    }

    /// Builds a clock from the node's genesis and spec endpoints.
    pub async fn from_client(client: &dyn CommonBeaconClient) -> ClientResult<Self> {
        let genesis = client.get_genesis().await?;
        let spec = client.get_spec().await?;

        debug!(
            genesis_time = genesis.genesis_time,
            seconds_per_slot = spec.seconds_per_slot,
            slots_per_epoch = spec.slots_per_epoch,
            "Slot clock initialized"
        );

        Ok(Self::new(
            genesis.genesis_time,
            spec.seconds_per_slot,
            spec.slots_per_epoch,
        ))
    }

    pub fn slot_at(&self, time: DateTime<Utc>) -> u64 {
        // Pre-epoch times are before any genesis
        let timestamp = u64::try_from(time.timestamp()).unwrap_or(0);

        compute_slot_at_timestamp(self.genesis_time, timestamp, self.seconds_per_slot)
    }

    pub fn current_slot(&self) -> u64 {
        self.slot_at(Utc::now())
    }

    pub fn epoch_at_slot(&self, slot: u64) -> u64 {
        compute_epoch_at_slot(slot, self.slots_per_epoch)
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch_at_slot(self.current_slot())
    }

    pub fn epoch_start_slot(&self, epoch: u64) -> u64 {
        compute_start_slot_at_epoch(epoch, self.slots_per_epoch)
    }

    /// Start time of `slot`, `None` when it falls outside chrono's range.
    pub fn slot_start(&self, slot: u64) -> Option<DateTime<Utc>> {
        let timestamp = compute_timestamp_at_slot(self.genesis_time, slot, self.seconds_per_slot);

        i64::try_from(timestamp)
            .ok()
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::B256;

    use crate::{
        clients::{
            beacon::{types::GenesisData, MockCommonBeaconClient},
            common::{ApiError, ClientError},
        },
        test_utils::mainnet_spec,
    };

    use super::*;

    fn mainnet_clock() -> SlotClock {
        SlotClock::new(1_606_824_023, 12, 32)
    }

    #[test]
    fn slot_and_start_time_agree() {
        let clock = mainnet_clock();
        let deneb_start = Utc.timestamp_opt(1_710_338_135, 0).unwrap();

        assert_eq!(clock.slot_at(deneb_start), 8_626_176);
        assert_eq!(clock.slot_start(8_626_176), Some(deneb_start));
        assert_eq!(clock.epoch_at_slot(8_626_176), 269_568);
        assert_eq!(clock.epoch_start_slot(269_568), 8_626_176);
    }

    #[test]
    fn times_within_a_slot_map_to_it() {
        let clock = mainnet_clock();
        let mid_slot = Utc.timestamp_opt(1_710_338_135 + 11, 0).unwrap();

        assert_eq!(clock.slot_at(mid_slot), 8_626_176);
    }

    #[test]
    fn times_before_genesis_are_slot_zero() {
        let clock = mainnet_clock();
        let before_genesis = Utc.timestamp_opt(1_500_000_000, 0).unwrap();
        let before_unix_epoch = Utc.timestamp_opt(-1_000, 0).unwrap();

        assert_eq!(clock.slot_at(before_genesis), 0);
        assert_eq!(clock.slot_at(before_unix_epoch), 0);
    }

    #[test]
    fn current_slot_is_past_deneb() {
        let clock = mainnet_clock();

        assert!(clock.current_slot() > 8_626_176);
        assert!(clock.current_epoch() > 269_568);
    }

    #[test]
    fn unrepresentable_start_time_is_none() {
        assert_eq!(mainnet_clock().slot_start(u64::MAX), None);
    }

    #[tokio::test]
    async fn builds_from_client() {
        let mut client = MockCommonBeaconClient::new();

        client.expect_get_genesis().times(1).returning(|| {
            Ok(GenesisData {
                genesis_time: 1_606_824_023,
                genesis_validators_root: B256::ZERO,
                genesis_fork_version: Default::default(),
            })
        });
        client
            .expect_get_spec()
            .times(1)
            .returning(|| Ok(serde_json::from_value(mainnet_spec()).unwrap()));

        let clock = SlotClock::from_client(&client).await.unwrap();

        assert_eq!(clock, mainnet_clock());
    }

    #[tokio::test]
    async fn client_errors_propagate() {
        let mut client = MockCommonBeaconClient::new();

        client.expect_get_genesis().returning(|| {
            Err(ClientError::Api(ApiError {
                code: 503,
                message: "Node is syncing".to_string(),
            }))
        });
        client.expect_get_spec().never();

        let err = SlotClock::from_client(&client).await.unwrap_err();

        assert_eq!(err.api_error().map(|e| e.code), Some(503));
    }
}
