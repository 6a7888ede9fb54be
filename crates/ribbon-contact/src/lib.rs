//! # ribbon-contact
//!
//! Collision resolution for the ribbon: a ground plane and a moving
//! sphere that exchanges momentum with the particles it touches.
//!
//! Both passes run once per tick, after integration, through
//! [`CollisionPipeline`]. There is no particle–particle collision.

pub mod collision_pipeline;
pub mod config;
pub mod ground_plane;
pub mod response;
pub mod sphere;

pub use collision_pipeline::{CollisionPipeline, CollisionStepResult};
pub use config::ContactConfig;
pub use ground_plane::GroundPlane;
pub use response::ContactResult;
pub use sphere::{KinematicSphere, SphereBody, SphereCollider};
