pub mod config;
pub mod dto;
pub mod observe;
pub mod storage;
