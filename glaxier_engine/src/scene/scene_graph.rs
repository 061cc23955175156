/// SceneGraph: parent/child node hierarchy for a demo scene.
///
/// Nodes live in a SlotMap so keys stay valid while other nodes are
/// removed. World transforms are derived on demand by walking parents;
/// nothing is cached, so a moved parent is reflected immediately.

use glam::{Mat3, Mat4, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use slotmap::{new_key_type, SlotMap};
use crate::camera::{CameraKey, HelperKey};
use crate::error::Result;
use crate::engine_err;

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeKey;
}

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self { translation, rotation: Quat::IDENTITY }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self { translation: Vec3::ZERO, rotation }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Wireframe UV sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereMesh {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// 0xRRGGBB
    pub color: u32,
    pub wireframe: bool,
}

impl SphereMesh {
    pub fn wireframe(radius: f32, color: u32) -> Self {
        Self {
            radius,
            width_segments: 16,
            height_segments: 8,
            color,
            wireframe: true,
        }
    }
}

/// Static cloud of points
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub color: u32,
}

impl PointCloud {
    /// `count` points uniformly spread in a cube of edge `spread` centered on the origin.
    ///
    /// Seeded so two scenes built with the same seed are identical.
    pub fn random_spread(count: usize, spread: f32, color: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = spread * 0.5;
        let positions = (0..count)
            .map(|_| Vec3::new(
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
                rng.gen_range(-half..=half),
            ))
            .collect();
        Self { positions, color }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// What a node carries
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform node (e.g. a camera rig)
    Group,
    /// Camera attachment point; the projection lives in the rig controller
    Camera(CameraKey),
    /// Frustum visualization of a camera
    Helper(HelperKey),
    Mesh(SphereMesh),
    Points(PointCloud),
}

impl NodeKind {
    /// Whether a surface draws something for this node
    pub fn is_drawable(&self) -> bool {
        matches!(self, NodeKind::Helper(_) | NodeKind::Mesh(_) | NodeKind::Points(_))
    }
}

/// One node of the graph
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
    transform: Transform,
    visible: bool,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Own visibility flag (ancestors not considered)
    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Node hierarchy of a scene
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Node>,
    roots: Vec<NodeKey>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Add a top-level node
    pub fn add_node(&mut self, name: &str, kind: NodeKind, transform: Transform) -> NodeKey {
        let key = self.nodes.insert(Node {
            name: name.to_string(),
            kind,
            transform,
            visible: true,
            parent: None,
            children: Vec::new(),
        });
        self.roots.push(key);
        key
    }

    /// Add a node under `parent`
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        name: &str,
        kind: NodeKind,
        transform: Transform,
    ) -> Result<NodeKey> {
        if !self.nodes.contains_key(parent) {
            return Err(engine_err!("glaxier::SceneGraph", InvalidResource:
                "parent of '{}' is not in the graph", name));
        }
        let key = self.nodes.insert(Node {
            name: name.to_string(),
            kind,
            transform,
            visible: true,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(key);
        Ok(key)
    }

    /// Remove a node and its whole subtree. Returns false for unknown keys.
    pub fn remove_node(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.get(key) else {
            return false;
        };
        match node.parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.children.retain(|c| *c != key);
                }
            }
            None => self.roots.retain(|r| *r != key),
        }
        let mut pending = vec![key];
        while let Some(next) = pending.pop() {
            if let Some(removed) = self.nodes.remove(next) {
                pending.extend(removed.children);
            }
        }
        true
    }

    pub fn node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes in insertion order
    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    /// Find the first node with the given name
    pub fn find(&self, name: &str) -> Option<NodeKey> {
        self.nodes.iter().find(|(_, n)| n.name == name).map(|(k, _)| k)
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node> {
        self.nodes.get_mut(key).ok_or_else(|| {
            engine_err!("glaxier::SceneGraph", InvalidResource: "node key no longer resolves")
        })
    }

    pub fn set_translation(&mut self, key: NodeKey, translation: Vec3) -> Result<()> {
        self.node_mut(key)?.transform.translation = translation;
        Ok(())
    }

    pub fn set_rotation(&mut self, key: NodeKey, rotation: Quat) -> Result<()> {
        self.node_mut(key)?.transform.rotation = rotation;
        Ok(())
    }

    pub fn set_visible(&mut self, key: NodeKey, visible: bool) -> Result<()> {
        self.node_mut(key)?.visible = visible;
        Ok(())
    }

    /// Visible if the node and all of its ancestors are visible
    pub fn is_effectively_visible(&self, key: NodeKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.nodes.get(k) {
                Some(node) if node.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Local-to-world matrix
    pub fn world_matrix(&self, key: NodeKey) -> Result<Mat4> {
        let mut matrix = Mat4::IDENTITY;
        let mut current = Some(key);
        while let Some(k) = current {
            let node = self.nodes.get(k).ok_or_else(|| {
                engine_err!("glaxier::SceneGraph", InvalidResource: "node key no longer resolves")
            })?;
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent;
        }
        Ok(matrix)
    }

    pub fn world_position(&self, key: NodeKey) -> Result<Vec3> {
        Ok(self.world_matrix(key)?.w_axis.truncate())
    }

    /// Rotate a node so that its local +Z axis points at `target` (world space).
    ///
    /// Matches the object convention of common scene graphs: objects face +Z,
    /// cameras face -Z. Cameras parented to a looking node therefore need a
    /// half turn about Y. A target at the node's position leaves it unchanged.
    pub fn look_at(&mut self, key: NodeKey, target: Vec3) -> Result<()> {
        let world = self.world_matrix(key)?;
        let position = world.w_axis.truncate();
        let forward = target - position;
        if forward.length_squared() <= f32::EPSILON {
            return Ok(());
        }
        let z = forward.normalize();
        let up = if z.cross(Vec3::Y).length_squared() <= 1e-8 { Vec3::Z } else { Vec3::Y };
        let x = up.cross(z).normalize();
        let y = z.cross(x);
        let world_rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z));

        let parent_rotation = match self.node(key).and_then(|n| n.parent) {
            Some(parent) => {
                let (_, rotation, _) = self.world_matrix(parent)?.to_scale_rotation_translation();
                rotation
            }
            None => Quat::IDENTITY,
        };
        self.node_mut(key)?.transform.rotation = (parent_rotation.inverse() * world_rotation).normalize();
        Ok(())
    }

    /// Keys of drawable nodes that are effectively visible, in depth-first order from the roots
    pub fn drawable_nodes(&self) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeKey> = self.roots.iter().rev().copied().collect();
        while let Some(key) = stack.pop() {
            let Some(node) = self.nodes.get(key) else { continue };
            if !node.visible {
                continue;
            }
            if node.kind.is_drawable() {
                out.push(key);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "scene_graph_tests.rs"]
mod tests;
