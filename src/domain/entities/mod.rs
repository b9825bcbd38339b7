//! Domain Entities
//!
//! Objects with identity during a single run.
//! - `AssetHandle` - A staged asset resolved by the asset database
//! - `InstanceId` - A transient in-memory instance of an asset
//! - `ContainerRef` / `ContainerManifest` - The committed, packageable unit

mod asset;
mod container;

pub use asset::{AssetHandle, InstanceId, ModelFormat};
pub use container::{ContainerManifest, ContainerRef, ContainerSource, CONTAINER_FORMAT};
