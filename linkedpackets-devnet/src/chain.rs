use std::sync::Arc;

use anyhow::{anyhow, Result};

use linkedpackets_datastore::Datastore;
use linkedpackets_middleware::app::{
    FungibleTokenPacketData, IbcModule, Ics4Wrapper, InterchainAccountPacketData,
};
use linkedpackets_middleware::channel::{Height, Packet};
use linkedpackets_middleware::msg_server::{MsgServer, MsgStartLink, MsgStopLink};
use linkedpackets_middleware::query_server::QueryServer;
use linkedpackets_middleware::{IbcMiddleware, Keeper};
use linkedpackets_utils::keypair::Keypair;

use crate::{MockApp, MockRelay};

/// One chain with a single application, optionally wrapped by the linked
/// packets middleware.
pub struct TestChain {
    pub chain_id: String,
    pub datastore: Arc<Datastore>,
    pub keeper: Keeper,
    pub app: Arc<MockApp>,
    pub relay: Arc<MockRelay>,
    /// Entry point for channel callbacks.
    pub module: Arc<dyn IbcModule>,
    /// Entry point the application sends through.
    pub ics4: Arc<dyn Ics4Wrapper>,
    pub sender: Keypair,
    pub authority: Keypair,
}

impl TestChain {
    pub fn new(chain_id: &str, app: MockApp) -> Result<Self> {
        Self::build(chain_id, app, true)
    }

    /// A chain whose application sits directly on the relay.
    pub fn new_unlinked(chain_id: &str, app: MockApp) -> Result<Self> {
        Self::build(chain_id, app, false)
    }

    fn build(chain_id: &str, app: MockApp, linked: bool) -> Result<Self> {
        let datastore = Arc::new(Datastore::open_temporary()?);
        let authority = Keypair::generate()?;
        let sender = Keypair::generate()?;
        let keeper = Keeper::new(datastore.clone(), &authority.as_public_address())?;
        let app = Arc::new(app);
        let relay = Arc::new(MockRelay::new());

        let (module, ics4): (Arc<dyn IbcModule>, Arc<dyn Ics4Wrapper>) = if linked {
            let middleware = Arc::new(IbcMiddleware::new(app.clone(), relay.clone(), keeper.clone()));
            (middleware.clone(), middleware)
        } else {
            (app.clone(), relay.clone())
        };

        Ok(Self {
            chain_id: chain_id.to_string(),
            datastore,
            keeper,
            app,
            relay,
            module,
            ics4,
            sender,
            authority,
        })
    }

    pub fn port_id(&self) -> &str {
        self.app.port_id()
    }

    pub fn msg_server(&self) -> MsgServer {
        MsgServer::new(self.keeper.clone())
    }

    pub fn query_server(&self) -> QueryServer {
        QueryServer::new(self.keeper.clone())
    }

    pub async fn start_link(&self, link_id: &str) -> Result<()> {
        let msg = MsgStartLink {
            sender: self.sender.as_public_address(),
            link_id: link_id.to_string(),
        };
        Ok(self.msg_server().start_link(&msg).await?)
    }

    pub async fn stop_link(&self) -> Result<()> {
        let msg = MsgStopLink {
            sender: self.sender.as_public_address(),
        };
        Ok(self.msg_server().stop_link(&msg).await?)
    }

    /// Sends raw payload bytes the way the application would.
    pub async fn send_data(&self, channel_id: &str, data: Vec<u8>) -> Result<Packet> {
        self.ics4
            .send_packet(self.port_id(), channel_id, Height::new(0, 100), 0, data)
            .await?;
        self.relay
            .last_sent_packet()
            .await
            .ok_or_else(|| anyhow!("relay recorded no packet"))
    }

    pub async fn send_transfer(&self, channel_id: &str, memo: &str) -> Result<Packet> {
        let data = FungibleTokenPacketData::new(
            "stake",
            "100",
            &self.sender.as_public_address(),
            "receiver",
            memo,
        );
        self.send_data(channel_id, data.to_bytes()?).await
    }

    pub async fn send_ica_tx(&self, channel_id: &str, memo: &str) -> Result<Packet> {
        let data = InterchainAccountPacketData::execute_tx(br#"{"messages":[]}"#.to_vec(), memo);
        self.send_data(channel_id, data.to_bytes()?).await
    }
}
