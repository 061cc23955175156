//! Scene module: scene graph, scene contract, and the scene runtime.
//!
//! Scenes own their graph and cameras. Hosts reach them through the
//! [`SceneRender`] contract, either one at a time ([`SceneDriver`]) or
//! several at once ([`SceneManager`] / [`ComposedStage`]).

mod driver;
mod key_switch;
mod props;
mod scene_graph;
mod scene_manager;
mod scene_render;

pub use driver::{Liveness, SceneDriver};
pub use key_switch::KeySwitch;
pub use props::{Getter, PropValue, Property, PropertyTable, Setter};
pub use scene_graph::{Node, NodeKey, NodeKind, PointCloud, SceneGraph, SphereMesh, Transform};
pub use scene_manager::{ComposedStage, MountedScene, SceneFactory, SceneManager};
pub use scene_render::{FrameContext, SceneRender, SetupContext};
