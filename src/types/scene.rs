use crate::types::material::{Material, MaterialId};
use crate::types::mesh::Mesh;

/// Index of a node in `Scene::nodes`.
pub type NodeId = usize;

/// A scene-graph node, optionally carrying a mesh.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    pub mesh: Option<Mesh>,
    /// Node-local material list. Slot `i` refers to scene material `materials[i]`.
    pub materials: Vec<MaterialId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            ..Default::default()
        }
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Local slot of `material`, attaching it if the node does not have it yet.
    pub fn attach_material(&mut self, material: MaterialId) -> usize {
        match self.materials.iter().position(|&m| m == material) {
            Some(slot) => slot,
            None => {
                self.materials.push(material);
                self.materials.len() - 1
            }
        }
    }

    /// Local slot of the first attached material called `name`.
    pub fn index_of_material_named(&self, name: &str, scene_materials: &[Material]) -> Option<usize> {
        self.materials
            .iter()
            .position(|&id| scene_materials.get(id).is_some_and(|m| m.name == name))
    }
}

/// In-memory scene: a global material list plus a node forest.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub materials: Vec<Material>,
    pub nodes: Vec<Node>,
    pub roots: Vec<NodeId>,
}

impl Scene {
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Add a node under `parent`, or as a new root.
    pub fn add_node(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Node ids in depth-first pre-order, children in insertion order.
    pub fn depth_first(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.mesh.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_material_is_idempotent() {
        let mut node = Node::default();
        assert_eq!(node.attach_material(4), 0);
        assert_eq!(node.attach_material(7), 1);
        assert_eq!(node.attach_material(4), 0);
        assert_eq!(node.material_count(), 2);
    }

    #[test]
    fn index_of_material_named() {
        let mut scene = Scene::default();
        let a = scene.add_material(Material::named("a"));
        let b = scene.add_material(Material::named("b"));
        let node = Node {
            materials: vec![b, a],
            ..Default::default()
        };
        assert_eq!(node.index_of_material_named("a", &scene.materials), Some(1));
        assert_eq!(node.index_of_material_named("zzz", &scene.materials), None);
    }

    #[test]
    fn depth_first_order() {
        let mut scene = Scene::default();
        let root = scene.add_node(Node::default(), None);
        let child_a = scene.add_node(Node::default(), Some(root));
        let grandchild = scene.add_node(Node::default(), Some(child_a));
        let child_b = scene.add_node(Node::default(), Some(root));
        let second_root = scene.add_node(Node::default(), None);

        assert_eq!(
            scene.depth_first(),
            vec![root, child_a, grandchild, child_b, second_root]
        );
    }

    #[test]
    fn mesh_count_ignores_empty_nodes() {
        let mut scene = Scene::default();
        scene.add_node(Node::default(), None);
        scene.add_node(Node::with_mesh("m", Mesh::default()), None);
        assert_eq!(scene.mesh_count(), 1);
        assert_eq!(scene.material_count(), 0);
        assert!(scene.material(0).is_none());
    }
}
