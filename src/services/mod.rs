pub mod eth_rpc;
