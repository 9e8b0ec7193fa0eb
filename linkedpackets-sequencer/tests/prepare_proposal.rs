#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::{anyhow, Result};
    use linkedpackets_middleware::app::{FungibleTokenPacketData, InterchainAccountPacketData};
    use linkedpackets_middleware::channel::{Height, Packet};
    use linkedpackets_middleware::{LinkData, PacketIdentifier};
    use linkedpackets_sequencer::encoder::{JsonTxEncoder, TxEncoder};
    use linkedpackets_sequencer::mempool::{InsertionOrderMempool, Mempool};
    use linkedpackets_sequencer::proposal::RequestPrepareProposal;
    use linkedpackets_sequencer::{Msg, MsgRecvPacket, PrepareProposalHandler, Tx};

    fn recv_tx(data: Vec<u8>, sequence: u64) -> Tx {
        Tx::new(vec![Msg::RecvPacket(MsgRecvPacket {
            packet: Packet {
                sequence,
                source_port: "transfer".to_string(),
                source_channel: "channel-0".to_string(),
                destination_port: "transfer".to_string(),
                destination_channel: "channel-0".to_string(),
                data,
                timeout_height: Height::new(0, 100),
                timeout_timestamp: 0,
            },
            proof_height: Height::default(),
            signer: "relayer".to_string(),
        })])
    }

    fn linked_transfer(link_id: &str, index: u64, is_last: bool) -> Result<Tx> {
        let prev = if index == 0 {
            PacketIdentifier::default()
        } else {
            PacketIdentifier::new("transfer", "channel-0", index)
        };
        let memo = LinkData::new(link_id, prev, is_last, index).to_memo()?;
        let data = FungibleTokenPacketData::new("stake", "1", "alice", "bob", &memo);
        Ok(recv_tx(data.to_bytes()?, index + 1).with_memo(&format!("{}-{}", link_id, index)))
    }

    fn plain_transfer(memo: &str) -> Result<Tx> {
        let data = FungibleTokenPacketData::new("stake", "1", "alice", "bob", memo);
        Ok(recv_tx(data.to_bytes()?, 99).with_memo(memo))
    }

    fn other_tx(name: &str) -> Tx {
        Tx::new(vec![Msg::Other {
            type_url: "/cosmos.bank.v1beta1.MsgSend".to_string(),
            value: serde_json::json!({}),
        }])
        .with_memo(name)
    }

    async fn propose(candidates: Vec<Tx>, encoder: Arc<dyn TxEncoder>) -> Result<Vec<String>> {
        let mempool = Arc::new(InsertionOrderMempool::new());
        for tx in candidates {
            mempool.insert(tx).await?;
        }
        let handler = PrepareProposalHandler::new(mempool, encoder);
        let response = handler.prepare_proposal(&RequestPrepareProposal { height: 1 }).await?;
        response
            .txs
            .iter()
            .map(|bytes| -> Result<String> { Ok(serde_json::from_slice::<Tx>(bytes)?.memo) })
            .collect()
    }

    #[tokio::test]
    async fn test_incomplete_link_is_withheld() -> Result<()> {
        let candidates = vec![
            linked_transfer("l", 0, false)?,
            other_tx("x"),
            linked_transfer("l", 1, false)?,
        ];
        assert_eq!(propose(candidates, Arc::new(JsonTxEncoder)).await?, vec!["x"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_gap_below_declared_total_is_withheld() -> Result<()> {
        let candidates = vec![
            linked_transfer("l", 0, false)?,
            linked_transfer("l", 2, true)?,
            other_tx("x"),
        ];
        assert_eq!(propose(candidates, Arc::new(JsonTxEncoder)).await?, vec!["x"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_complete_link_follows_pass_through() -> Result<()> {
        let candidates = vec![
            linked_transfer("l", 2, true)?,
            other_tx("x"),
            linked_transfer("l", 0, false)?,
            plain_transfer("plain")?,
            linked_transfer("l", 1, false)?,
            other_tx("y"),
        ];
        assert_eq!(
            propose(candidates, Arc::new(JsonTxEncoder)).await?,
            vec!["x", "plain", "y", "l-0", "l-1", "l-2"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_links_emitted_in_first_seen_order() -> Result<()> {
        let candidates = vec![
            linked_transfer("second", 0, true)?,
            linked_transfer("first", 1, true)?,
            linked_transfer("first", 0, false)?,
            linked_transfer("open", 0, false)?,
        ];
        assert_eq!(
            propose(candidates, Arc::new(JsonTxEncoder)).await?,
            vec!["second-0", "first-0", "first-1"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_undecodable_memos_pass_through() -> Result<()> {
        let no_index = {
            let mut link = LinkData::new("l", PacketIdentifier::default(), true, 0);
            link.link_index = None;
            let data = FungibleTokenPacketData::new("stake", "1", "alice", "bob", &link.to_memo()?);
            recv_tx(data.to_bytes()?, 1).with_memo("no-index")
        };
        let bad_index = {
            let mut link = LinkData::new("l", PacketIdentifier::default(), true, 0);
            link.link_index = Some("first".to_string());
            let data = FungibleTokenPacketData::new("stake", "1", "alice", "bob", &link.to_memo()?);
            recv_tx(data.to_bytes()?, 2).with_memo("bad-index")
        };
        let opaque = recv_tx(b"\x00\x01".to_vec(), 3).with_memo("opaque");

        let candidates = vec![plain_transfer("not json")?, no_index, bad_index, opaque];
        assert_eq!(
            propose(candidates, Arc::new(JsonTxEncoder)).await?,
            vec!["not json", "no-index", "bad-index", "opaque"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_interchain_account_links() -> Result<()> {
        let mut candidates = Vec::new();
        for index in [1u64, 0] {
            let prev = PacketIdentifier::default();
            let memo = LinkData::new("ica", prev, index == 1, index).to_memo()?;
            let data = InterchainAccountPacketData::execute_tx(vec![7], &memo);
            candidates.push(recv_tx(data.to_bytes()?, index + 1).with_memo(&format!("ica-{}", index)));
        }
        assert_eq!(
            propose(candidates, Arc::new(JsonTxEncoder)).await?,
            vec!["ica-0", "ica-1"]
        );
        Ok(())
    }

    fn linked_msg(link_id: &str, index: u64, is_last: bool, sequence: u64) -> Result<Msg> {
        let memo = LinkData::new(link_id, PacketIdentifier::default(), is_last, index).to_memo()?;
        let data = FungibleTokenPacketData::new("stake", "1", "alice", "bob", &memo);
        let mut tx = recv_tx(data.to_bytes()?, sequence);
        Ok(tx.msgs.remove(0))
    }

    #[tokio::test]
    async fn test_last_packet_at_max_index_is_unlinked() -> Result<()> {
        let overflowing = {
            let mut link = LinkData::new("l", PacketIdentifier::default(), true, 0);
            link.link_index = Some(u64::MAX.to_string());
            let data = FungibleTokenPacketData::new("stake", "1", "alice", "bob", &link.to_memo()?);
            recv_tx(data.to_bytes()?, 1).with_memo("max-index")
        };
        let candidates = vec![other_tx("x"), overflowing, plain_transfer("plain")?];
        assert_eq!(
            propose(candidates, Arc::new(JsonTxEncoder)).await?,
            vec!["x", "max-index", "plain"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_multi_packet_tx_emitted_once() -> Result<()> {
        let whole_link = Tx::new(vec![linked_msg("l", 0, false, 1)?, linked_msg("l", 1, true, 2)?])
            .with_memo("l-both");
        let closes_two = Tx::new(vec![linked_msg("a", 1, true, 4)?, linked_msg("b", 1, true, 5)?])
            .with_memo("a-1+b-1");
        let candidates = vec![
            whole_link,
            linked_transfer("a", 0, false)?,
            linked_transfer("b", 0, false)?,
            closes_two,
            other_tx("x"),
        ];
        assert_eq!(
            propose(candidates, Arc::new(JsonTxEncoder)).await?,
            vec!["x", "l-both", "a-0", "a-1+b-1", "b-0"]
        );
        Ok(())
    }

    struct RejectingEncoder;

    impl TxEncoder for RejectingEncoder {
        fn encode(&self, tx: &Tx) -> Result<Vec<u8>> {
            if tx.memo == "poison" {
                return Err(anyhow!("cannot encode"));
            }
            JsonTxEncoder.encode(tx)
        }
    }

    #[tokio::test]
    async fn test_encode_failure_skips_only_that_tx() -> Result<()> {
        let candidates = vec![other_tx("a"), other_tx("poison"), other_tx("b")];
        assert_eq!(
            propose(candidates, Arc::new(RejectingEncoder)).await?,
            vec!["a", "b"]
        );
        Ok(())
    }
}
