// src/listfile/mod.rs

//! Listfile loading and per-consumer distribution.
//!
//! The listfile maps numeric file data ids to virtual paths. It is loaded
//! once from `listfile.csv` (plus an optional `custom-listfile.csv` overlay),
//! then filtered into one file per consumer:
//!
//! - SLFiledataADTConverter: model/texture/terrain extensions + Noggit error textures
//! - 7x_TexAdt_MTXP_Adder: `tileset/` entries
//! - Epsilon (optional): everything except a few internal extensions

pub mod distributor;
pub mod subset;
pub mod table;

pub use distributor::{distribute, targets, DistributedListfile, ListfileTarget};
pub use subset::{extension, ListfileSubset};
pub use table::{FileId, Listfile};
