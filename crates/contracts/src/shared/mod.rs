pub mod answer_map;
pub mod config;
pub mod field_key;
pub mod fingerprint;
pub mod metadata;
pub mod storage;
