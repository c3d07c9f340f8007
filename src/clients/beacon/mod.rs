use std::time::Duration;

use alloy::primitives::B256;
use anyhow::Context as AnyhowContext;
use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response as HttpResponse, StatusCode, Url};
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::{
    clients::common::{ClientError, ClientResult},
    json_get,
};

use self::{
    spec::SpecData,
    types::{
        BlobsResponse, BlockHeaderResponse, BlockId, BlockResponse, BlockRootResponse,
        DepositContractData, GenesisData, HealthStatus, NodeIdentity, NodeVersion, Peer,
        PeerCount, PeersFilter, PeersResponse, Response, SyncingStatus,
    },
};

pub mod block_body;
pub mod spec;
pub mod types;

#[derive(Debug, Clone)]
pub struct BeaconClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Deadline applied to every request, covering connect and body read.
    pub timeout: Option<Duration>,
}

/// Read-only surface of a beacon node REST API.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommonBeaconClient: Send + Sync {
    async fn get_genesis(&self) -> ClientResult<GenesisData>;
    async fn get_block(&self, block_id: &BlockId) -> ClientResult<BlockResponse>;
    async fn get_block_root(&self, block_id: &BlockId) -> ClientResult<BlockRootResponse>;
    async fn get_block_header(&self, block_id: &BlockId) -> ClientResult<BlockHeaderResponse>;
    /// Blobs of a block, optionally narrowed down to `versioned_hashes`.
    async fn get_blobs(
        &self,
        block_id: &BlockId,
        versioned_hashes: &[B256],
    ) -> ClientResult<BlobsResponse>;
    async fn get_deposit_contract(&self) -> ClientResult<DepositContractData>;
    async fn get_spec(&self) -> ClientResult<SpecData>;
    async fn get_node_identity(&self) -> ClientResult<NodeIdentity>;
    async fn get_peers(&self, filter: &PeersFilter) -> ClientResult<PeersResponse>;
    async fn get_peer(&self, peer_id: &str) -> ClientResult<Peer>;
    async fn get_peer_count(&self) -> ClientResult<PeerCount>;
    async fn get_node_version(&self) -> ClientResult<NodeVersion>;
    async fn get_syncing_status(&self) -> ClientResult<SyncingStatus>;
    async fn get_health(&self) -> ClientResult<HealthStatus>;
}

impl BeaconClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::try_from_config(Config {
            base_url: base_url.into(),
            timeout: None,
        })
    }

    pub fn try_from_config(config: Config) -> ClientResult<Self> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Self::try_with_client(client, config)
    }

    /// Uses `client` as is; `config.timeout` only applies to clients built by
    /// [`BeaconClient::try_from_config`].
    pub fn try_with_client(client: Client, config: Config) -> ClientResult<Self> {
        let base_url = config
            .base_url
            .strip_suffix('/')
            .unwrap_or(&config.base_url)
            .to_string();

        Url::parse(&base_url)
            .with_context(|| format!("Failed to parse base URL \"{}\"", config.base_url))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    async fn send(&self, url: Url) -> ClientResult<HttpResponse> {
        debug!(url = %url, method = "GET", "Dispatching API request");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        Ok(response)
    }

    /// Performs a GET and returns the body of a 200 response.
    ///
    /// Any other status is turned into an error from the body: an [`ApiError`]
    /// when it holds one, [`ClientError::UnexpectedStatus`] otherwise.
    ///
    /// [`ApiError`]: crate::clients::common::ApiError
    pub(crate) async fn execute(&self, path: &str, query: &[(&str, String)]) -> ClientResult<Vec<u8>> {
        let url = self.build_url(path, query)?;
        let response = self.send(url).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status != StatusCode::OK {
            debug!(
                method = "GET",
                path,
                status = status.as_u16(),
                "Request answered with a non-success status"
            );

            return Err(ClientError::from_response(status, &body));
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl CommonBeaconClient for BeaconClient {
    async fn get_genesis(&self) -> ClientResult<GenesisData> {
        json_get!(self, "/eth/v1/beacon/genesis", Response<GenesisData>).map(|res| res.data)
    }

    async fn get_block(&self, block_id: &BlockId) -> ClientResult<BlockResponse> {
        let path = format!("/eth/v2/beacon/blocks/{block_id}");

        json_get!(self, path, BlockResponse)
    }

    async fn get_block_root(&self, block_id: &BlockId) -> ClientResult<BlockRootResponse> {
        let path = format!("/eth/v1/beacon/blocks/{block_id}/root");

        json_get!(self, path, BlockRootResponse)
    }

    async fn get_block_header(&self, block_id: &BlockId) -> ClientResult<BlockHeaderResponse> {
        let path = format!("/eth/v1/beacon/headers/{block_id}");

        json_get!(self, path, BlockHeaderResponse)
    }

    async fn get_blobs(
        &self,
        block_id: &BlockId,
        versioned_hashes: &[B256],
    ) -> ClientResult<BlobsResponse> {
        let path = format!("/eth/v1/beacon/blobs/{block_id}");
        let query = versioned_hashes
            .iter()
            .map(|hash| ("versioned_hashes", format!("0x{hash:x}")))
            .collect::<Vec<_>>();

        json_get!(self, path, BlobsResponse, &query)
    }

    async fn get_deposit_contract(&self) -> ClientResult<DepositContractData> {
        json_get!(
            self,
            "/eth/v1/config/deposit_contract",
            Response<DepositContractData>
        )
        .map(|res| res.data)
    }

    async fn get_spec(&self) -> ClientResult<SpecData> {
        json_get!(self, "/eth/v1/config/spec", Response<SpecData>).map(|res| res.data)
    }

    async fn get_node_identity(&self) -> ClientResult<NodeIdentity> {
        json_get!(self, "/eth/v1/node/identity", Response<NodeIdentity>).map(|res| res.data)
    }

    async fn get_peers(&self, filter: &PeersFilter) -> ClientResult<PeersResponse> {
        json_get!(self, "/eth/v1/node/peers", PeersResponse, &filter.to_query())
    }

    async fn get_peer(&self, peer_id: &str) -> ClientResult<Peer> {
        let path = format!("/eth/v1/node/peers/{peer_id}");

        json_get!(self, path, Response<Peer>).map(|res| res.data)
    }

    async fn get_peer_count(&self) -> ClientResult<PeerCount> {
        json_get!(self, "/eth/v1/node/peer_count", Response<PeerCount>).map(|res| res.data)
    }

    async fn get_node_version(&self) -> ClientResult<NodeVersion> {
        json_get!(self, "/eth/v1/node/version", Response<NodeVersion>).map(|res| res.data)
    }

    async fn get_syncing_status(&self) -> ClientResult<SyncingStatus> {
        json_get!(self, "/eth/v1/node/syncing", Response<SyncingStatus>).map(|res| res.data)
    }

    async fn get_health(&self) -> ClientResult<HealthStatus> {
        let url = self.build_url("/eth/v1/node/health", &[])?;
        let response = self.send(url).await?;
        let status = response.status();

        match HealthStatus::from_status(status) {
            Some(health) => Ok(health),
            None => {
                let body = response.bytes().await?;

                debug!(
                    method = "GET",
                    path = "/eth/v1/node/health",
                    status = status.as_u16(),
                    "Unexpected health status"
                );

                Err(ClientError::from_response(status, &body))
            }
        }
    }
}
