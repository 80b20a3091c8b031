pub mod dates;
pub mod models;
pub mod prefs;
pub mod seed;
pub mod service;
pub mod storage;
pub mod store;
pub mod transfer;
pub mod units;
