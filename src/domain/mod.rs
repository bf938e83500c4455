//! Domain - configuration, errors and the collaborator contracts
//!
//! Nothing in here touches simulation buffers; systems/ consumes these types.

pub mod config;
pub mod error;
pub mod interaction;
pub mod scene;

pub use config::{MeshSampling, UpdateMode, WaterConfig};
pub use error::{Result, WaterError};
pub use interaction::{
    ActorHandle, InteractionItem, IntrusionHit, IntrusionQuery, LayerMask, NoIntrusions,
    SurfaceTransform, VelocityProvider, VelocitySource,
};
pub use scene::{ActorKind, IntrusionScene, NoiseMotion, SceneActor};
