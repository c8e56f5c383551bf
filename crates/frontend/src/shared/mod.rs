pub mod api_utils;
pub mod components;
pub mod fingerprint;
pub mod notification;
pub mod storage;
