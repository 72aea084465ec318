pub mod feeds;
pub mod storage;
