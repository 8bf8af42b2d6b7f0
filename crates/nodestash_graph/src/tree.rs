// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tree data structure containing nodes and links.

use crate::link::{Link, LinkId};
use crate::node::{Node, NodeId};
use crate::socket::{SocketDirection, SocketId};
use indexmap::IndexMap;
use nodestash_exchange::TreeKind;
use serde::{Deserialize, Serialize};

/// A node tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTree {
    /// Tree name
    pub name: String,
    /// The kind of tree (decides which document it exchanges with)
    kind: TreeKind,
    /// Nodes in the tree
    nodes: IndexMap<NodeId, Node>,
    /// Links between nodes
    links: IndexMap<LinkId, Link>,
}

impl NodeTree {
    /// Create a new empty tree
    pub fn new(name: impl Into<String>, kind: TreeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            nodes: IndexMap::new(),
            links: IndexMap::new(),
        }
    }

    /// The tree kind
    pub fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Add a node, renaming it if its name is already taken
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        node.name = self.unique_name(&node.name);
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// A node name not currently in use, derived from `base` with a numeric
    /// suffix when needed
    pub fn unique_name(&self, base: &str) -> String {
        if self.node_by_name(base).is_none() {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{base}.{counter:03}");
            if self.node_by_name(&candidate).is_none() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Remove a node and its links
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let removed: Vec<Link> = self
            .links
            .values()
            .filter(|l| l.involves_node(node_id))
            .cloned()
            .collect();
        self.links.retain(|_, l| !l.involves_node(node_id));
        for link in removed {
            self.refresh_link_state(link.from_node, link.from_socket);
            self.refresh_link_state(link.to_node, link.to_socket);
        }
        self.nodes.swap_remove(&node_id)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Get a node by name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Get a mutable node by name
    pub fn node_by_name_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.values_mut().find(|n| n.name == name)
    }

    /// Get all nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the currently selected nodes, in insertion order
    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(|n| n.selected)
    }

    /// Select or deselect a node
    pub fn set_selected(&mut self, node_id: NodeId, selected: bool) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.selected = selected;
        }
    }

    /// Add a link between sockets
    pub fn connect(
        &mut self,
        from_node: NodeId,
        from_socket: SocketId,
        to_node: NodeId,
        to_socket: SocketId,
    ) -> Result<LinkId, LinkError> {
        let source_node = self
            .nodes
            .get(&from_node)
            .ok_or(LinkError::NodeNotFound(from_node))?;
        let target_node = self
            .nodes
            .get(&to_node)
            .ok_or(LinkError::NodeNotFound(to_node))?;

        let source = source_node
            .socket(from_socket)
            .ok_or(LinkError::SocketNotFound(from_socket))?;
        let target = target_node
            .socket(to_socket)
            .ok_or(LinkError::SocketNotFound(to_socket))?;

        if source.direction != SocketDirection::Output
            || target.direction != SocketDirection::Input
        {
            return Err(LinkError::DirectionMismatch);
        }
        if !source.can_connect(target) {
            return Err(LinkError::IncompatibleSockets);
        }
        // Inputs take a single link
        if target.linked {
            return Err(LinkError::InputAlreadyLinked(to_socket));
        }
        if from_node == to_node {
            return Err(LinkError::SelfLoop);
        }

        let link = Link::new(from_node, from_socket, to_node, to_socket);
        let id = link.id;
        self.links.insert(id, link);
        self.mark_linked(from_node, from_socket, true);
        self.mark_linked(to_node, to_socket, true);
        Ok(id)
    }

    /// Remove a link
    pub fn disconnect(&mut self, link_id: LinkId) -> Option<Link> {
        let link = self.links.swap_remove(&link_id)?;
        self.refresh_link_state(link.from_node, link.from_socket);
        self.refresh_link_state(link.to_node, link.to_socket);
        Some(link)
    }

    /// Get all links, in insertion order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Get the number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    fn mark_linked(&mut self, node_id: NodeId, socket_id: SocketId, linked: bool) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            if let Some(socket) = node
                .inputs
                .iter_mut()
                .chain(node.outputs.iter_mut())
                .find(|s| s.id == socket_id)
            {
                socket.linked = linked;
            }
        }
    }

    /// Recompute a socket's link flag after links were removed
    fn refresh_link_state(&mut self, node_id: NodeId, socket_id: SocketId) {
        let linked = self.links.values().any(|l| l.involves_socket(socket_id));
        self.mark_linked(node_id, socket_id, linked);
    }
}

/// Error when creating a link
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Node not found
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Socket not found
    #[error("socket not found: {0:?}")]
    SocketNotFound(SocketId),

    /// Links run from an output socket to an input socket
    #[error("links run from an output socket to an input socket")]
    DirectionMismatch,

    /// Incompatible socket types
    #[error("incompatible socket types")]
    IncompatibleSockets,

    /// Input already takes a link
    #[error("input already linked: {0:?}")]
    InputAlreadyLinked(SocketId),

    /// Self-loop not allowed
    #[error("self-loop not allowed")]
    SelfLoop,
}
