// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export/import of node selections through the exchange core.
//!
//! This is the host-integration layer: it adapts the tree model to the
//! collaborator traits of `nodestash_exchange` and exposes the two
//! user-facing operations, [`export_selection`] and [`import_block`].

use crate::node::{Node, NodeRegistry};
use crate::socket::{SocketType, SocketValue};
use crate::tree::NodeTree;
use nodestash_exchange::{
    self as exchange, CodecError, ExportError, ExportReport, HostNode, HostValue, ImportError,
    ImportOutcome, InputSocket, LinkEndpoints, Prefs, PropValue, PropertyReflect, TreeExport,
    TreeImport, TreeKind, UnknownTypeError,
};

/// Convert a stored value to the codec's host-side representation.
fn to_host_value(value: &SocketValue) -> HostValue {
    match value {
        SocketValue::Bool(v) => HostValue::Bool(*v),
        SocketValue::Int(v) => HostValue::Int(i64::from(*v)),
        SocketValue::Float(v) => HostValue::Float(f64::from(*v)),
        SocketValue::Vector(v) => HostValue::Sequence(v.iter().map(|c| f64::from(*c)).collect()),
        SocketValue::Color([r, g, b, a]) => HostValue::Color {
            r: f64::from(*r),
            g: f64::from(*g),
            b: f64::from(*b),
            a: Some(f64::from(*a)),
        },
        SocketValue::String(v) => HostValue::String(v.clone()),
    }
}

/// Coerce a recorded value into the shape of an existing typed slot.
fn coerce_value(
    target: SocketType,
    value: &PropValue,
    identifier: &str,
) -> Result<SocketValue, CodecError> {
    let mismatch = |expected: &'static str| CodecError::TypeMismatch {
        property: identifier.to_string(),
        expected,
    };
    match target {
        SocketType::Bool => match value {
            PropValue::Bool(v) => Ok(SocketValue::Bool(*v)),
            _ => Err(mismatch("a boolean")),
        },
        SocketType::Int => match value {
            PropValue::Int(v) => i32::try_from(*v)
                .map(SocketValue::Int)
                .map_err(|_| mismatch("a 32-bit integer")),
            _ => Err(mismatch("an integer")),
        },
        SocketType::Float => match value {
            PropValue::Float(v) => Ok(SocketValue::Float(*v as f32)),
            PropValue::Int(v) => Ok(SocketValue::Float(*v as f32)),
            _ => Err(mismatch("a number")),
        },
        SocketType::Vector => match value {
            PropValue::NumberArray(v) if v.len() == 3 => {
                Ok(SocketValue::Vector([v[0] as f32, v[1] as f32, v[2] as f32]))
            }
            _ => Err(mismatch("an array of 3 numbers")),
        },
        SocketType::Color => match value {
            PropValue::NumberArray(v) if v.len() == 4 => Ok(SocketValue::Color([
                v[0] as f32,
                v[1] as f32,
                v[2] as f32,
                v[3] as f32,
            ])),
            // Alpha-less colors get an opaque alpha
            PropValue::NumberArray(v) if v.len() == 3 => {
                Ok(SocketValue::Color([v[0] as f32, v[1] as f32, v[2] as f32, 1.0]))
            }
            _ => Err(mismatch("an array of 3 or 4 numbers")),
        },
        SocketType::String => match value {
            PropValue::String(v) => Ok(SocketValue::String(v.clone())),
            _ => Err(mismatch("a string")),
        },
        SocketType::Geometry | SocketType::Shader => {
            Err(CodecError::NoDefault(identifier.to_string()))
        }
    }
}

impl PropertyReflect for Node {
    fn mutable_properties(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    fn property(&self, name: &str) -> Option<HostValue> {
        self.properties.get(name).map(to_host_value)
    }

    fn set_property(&mut self, name: &str, value: &PropValue) -> Result<(), CodecError> {
        let Some(current) = self.properties.get(name) else {
            return Err(CodecError::UnknownProperty(name.to_string()));
        };
        let next = coerce_value(current.socket_type(), value, name)?;
        self.properties.insert(name.to_string(), next);
        Ok(())
    }
}

impl HostNode for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_id(&self) -> &str {
        &self.node_type
    }

    fn location(&self) -> [f32; 2] {
        self.location
    }

    fn set_location(&mut self, location: [f32; 2]) {
        self.location = location;
    }

    fn input_sockets(&self) -> Vec<InputSocket> {
        self.inputs
            .iter()
            .map(|socket| InputSocket {
                identifier: socket.name.clone(),
                default_value: socket.default_value.as_ref().map(to_host_value),
                is_linked: socket.linked,
            })
            .collect()
    }

    fn output_sockets(&self) -> Vec<String> {
        self.outputs.iter().map(|s| s.name.clone()).collect()
    }

    fn set_input_default(
        &mut self,
        identifier: &str,
        value: &PropValue,
    ) -> Result<(), CodecError> {
        let Some(socket) = self.inputs.iter_mut().find(|s| s.name == identifier) else {
            return Err(CodecError::UnknownProperty(identifier.to_string()));
        };
        if socket.default_value.is_none() {
            return Err(CodecError::NoDefault(identifier.to_string()));
        }
        socket.default_value = Some(coerce_value(socket.socket_type, value, identifier)?);
        Ok(())
    }
}

impl TreeExport for NodeTree {
    type Node = Node;

    fn selected_nodes(&self) -> Vec<&Node> {
        self.nodes().filter(|n| n.selected).collect()
    }

    fn links(&self) -> Vec<LinkEndpoints> {
        // Inherent iterator; endpoints resolved to names for the document.
        self.links()
            .filter_map(|link| {
                let from = self.node(link.from_node)?;
                let to = self.node(link.to_node)?;
                Some(LinkEndpoints {
                    from_node: from.name.clone(),
                    from_socket: from.socket(link.from_socket)?.name.clone(),
                    to_node: to.name.clone(),
                    to_socket: to.socket(link.to_socket)?.name.clone(),
                })
            })
            .collect()
    }
}

/// Couples a tree with the registry used to instantiate nodes on import.
pub struct GraphHost<'a> {
    /// Tree receiving imported nodes
    pub tree: &'a mut NodeTree,
    /// Registry resolving type identifiers
    pub registry: &'a NodeRegistry,
}

impl TreeImport for GraphHost<'_> {
    type Node = Node;

    fn create_node(&mut self, type_id: &str, name: &str) -> Result<String, UnknownTypeError> {
        let mut node = self
            .registry
            .create_node(type_id)
            .ok_or_else(|| UnknownTypeError(type_id.to_string()))?;
        node.name = self.tree.unique_name(name);
        let assigned = node.name.clone();
        self.tree.add_node(node);
        Ok(assigned)
    }

    fn node(&self, name: &str) -> Option<&Node> {
        self.tree.node_by_name(name)
    }

    fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.tree.node_by_name_mut(name)
    }

    fn connect(
        &mut self,
        from_node: &str,
        from_output: usize,
        to_node: &str,
        to_input: usize,
    ) -> bool {
        let Some(from) = self.tree.node_by_name(from_node) else {
            return false;
        };
        let Some(to) = self.tree.node_by_name(to_node) else {
            return false;
        };
        let Some(from_socket) = from.outputs.get(from_output) else {
            return false;
        };
        let Some(to_socket) = to.inputs.get(to_input) else {
            return false;
        };
        let endpoints = (from.id, from_socket.id, to.id, to_socket.id);
        self.tree
            .connect(endpoints.0, endpoints.1, endpoints.2, endpoints.3)
            .is_ok()
    }
}

/// Export the selected nodes of `tree` under `block_name` in the document
/// for `kind`.
///
/// The tree must actually be of the requested kind; exporting a geometry
/// selection into the shader document is rejected before anything is
/// written.
pub fn export_selection(
    tree: &NodeTree,
    prefs: &Prefs,
    kind: TreeKind,
    block_name: &str,
) -> Result<ExportReport, ExportError> {
    if tree.kind() != kind {
        return Err(ExportError::KindMismatch {
            requested: kind,
            found: tree.kind(),
        });
    }
    exchange::export_nodes(tree, &prefs.export_path(kind), block_name)
}

/// Import `block_name` from the document for the tree's kind.
pub fn import_block(
    tree: &mut NodeTree,
    registry: &NodeRegistry,
    prefs: &Prefs,
    block_name: &str,
) -> Result<ImportOutcome, ImportError> {
    let path = prefs.export_path(tree.kind());
    let mut host = GraphHost { tree, registry };
    exchange::import_nodes(&mut host, &path, block_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::geometry::create_geometry_registry;
    use crate::graphs::shader::create_shader_registry;
    use indexmap::IndexMap;
    use nodestash_exchange::{
        list_blocks, Block, Document, ExchangeWarning, ImportReport, LinkRecord, NodeRecord,
    };
    use tempfile::TempDir;

    fn prefs_in(dir: &TempDir) -> Prefs {
        Prefs {
            export_directory: dir.path().to_path_buf(),
        }
    }

    fn expect_imported(outcome: ImportOutcome) -> ImportReport {
        match outcome {
            ImportOutcome::Imported(report) => report,
            ImportOutcome::NotFound => panic!("expected the block to be found"),
        }
    }

    /// Math and Value nodes with one link between them, both selected.
    fn math_fixture() -> (NodeTree, NodeRegistry) {
        let registry = create_geometry_registry();
        let mut tree = NodeTree::new("fixture", TreeKind::Geometry);

        let mut math = registry.create_node("math").unwrap().with_location(0.0, 0.0);
        math.name = "N1".to_string();
        math.properties.insert(
            "operation".to_string(),
            SocketValue::String("multiply".to_string()),
        );
        math.inputs[1].default_value = Some(SocketValue::Float(2.5));
        let math_id = tree.add_node(math);
        tree.set_selected(math_id, true);

        let mut value = registry
            .create_node("value")
            .unwrap()
            .with_location(100.0, 0.0);
        value.name = "N2".to_string();
        let value_id = tree.add_node(value);
        tree.set_selected(value_id, true);

        let from = tree.node(value_id).unwrap().outputs[0].id;
        let to = tree.node(math_id).unwrap().inputs[0].id;
        tree.connect(value_id, from, math_id, to).unwrap();

        (tree, registry)
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (tree, registry) = math_fixture();

        let report = export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();
        assert_eq!(report.node_count, 2);
        assert_eq!(report.link_count, 1);
        assert!(report.warnings.is_empty());

        let mut fresh = NodeTree::new("fresh", TreeKind::Geometry);
        let outcome = import_block(&mut fresh, &registry, &prefs, "mix1").unwrap();
        let report = expect_imported(outcome);
        assert_eq!(report.created, vec!["N1".to_string(), "N2".to_string()]);
        assert_eq!(report.link_count, 1);
        assert!(report.warnings.is_empty());

        let math = fresh.node_by_name("N1").unwrap();
        assert_eq!(math.node_type, "math");
        assert_eq!(math.location, [0.0, 0.0]);
        assert_eq!(
            math.properties.get("operation"),
            Some(&SocketValue::String("multiply".to_string()))
        );
        // The unlinked default came back; the linked input kept its type
        // default and its link.
        assert_eq!(
            math.input_by_name("B").unwrap().default_value,
            Some(SocketValue::Float(2.5))
        );
        assert!(math.input_by_name("A").unwrap().linked);

        let value = fresh.node_by_name("N2").unwrap();
        assert_eq!(value.node_type, "value");
        assert_eq!(value.location, [100.0, 0.0]);

        assert_eq!(fresh.link_count(), 1);
        let link = fresh.links().next().unwrap();
        assert_eq!(fresh.node(link.from_node).unwrap().name, "N2");
        assert_eq!(fresh.node(link.to_node).unwrap().name, "N1");
    }

    #[test]
    fn test_document_shape() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (tree, _) = math_fixture();

        export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();

        let raw =
            std::fs::read_to_string(prefs.export_path(TreeKind::Geometry)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        let nodes = &value["mix1"]["nodes"];
        assert_eq!(nodes[0]["name"], "N1");
        assert_eq!(nodes[0]["type"], "math");
        assert_eq!(nodes[0]["location"][0], 0.0);
        assert_eq!(nodes[0]["properties"]["operation"], "multiply");
        assert_eq!(nodes[0]["properties"]["B"], 2.5);
        // The linked input records no default.
        assert!(nodes[0]["properties"].get("A").is_none());

        let link = &value["mix1"]["links"][0];
        assert_eq!(link["from_node"], "N2");
        assert_eq!(link["from_socket"], "Value");
        assert_eq!(link["to_node"], "N1");
        assert_eq!(link["to_socket"], "A");
    }

    #[test]
    fn test_export_overwrites_block() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (tree, _) = math_fixture();

        export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();
        export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();

        let raw =
            std::fs::read_to_string(prefs.export_path(TreeKind::Geometry)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["mix1"]["nodes"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_boundary_links_are_dropped() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (mut tree, registry) = math_fixture();

        // A third, unselected node fed from the selection.
        let mut outside = registry.create_node("math").unwrap();
        outside.name = "N3".to_string();
        let outside_id = tree.add_node(outside);
        let n1 = tree.node_by_name("N1").unwrap();
        let (n1_id, result) = (n1.id, n1.outputs[0].id);
        let target = tree.node(outside_id).unwrap().inputs[0].id;
        tree.connect(n1_id, result, outside_id, target).unwrap();

        let report = export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();
        assert_eq!(report.node_count, 2);
        assert_eq!(report.link_count, 1, "the boundary link must not be recorded");
    }

    #[test]
    fn test_import_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let registry = create_geometry_registry();
        let mut tree = NodeTree::new("fresh", TreeKind::Geometry);

        let outcome = import_block(&mut tree, &registry, &prefs, "anything").unwrap();
        assert!(matches!(outcome, ImportOutcome::NotFound));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_import_missing_block_is_not_found() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (tree, registry) = math_fixture();
        export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();

        let mut fresh = NodeTree::new("fresh", TreeKind::Geometry);
        let outcome = import_block(&mut fresh, &registry, &prefs, "absent").unwrap();
        assert!(matches!(outcome, ImportOutcome::NotFound));
        assert_eq!(fresh.node_count(), 0);
    }

    #[test]
    fn test_export_preserves_other_blocks() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (tree, _) = math_fixture();

        export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();
        let path = prefs.export_path(TreeKind::Geometry);
        let before: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        export_selection(&tree, &prefs, TreeKind::Geometry, "other").unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(after["mix1"], before["mix1"]);
        assert_eq!(list_blocks(&path), vec!["mix1", "other"]);
    }

    #[test]
    fn test_unknown_type_is_a_hard_failure() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let registry = create_geometry_registry();
        let mut tree = NodeTree::new("fresh", TreeKind::Geometry);

        let mut document = Document::default();
        document.blocks.insert(
            "bad".to_string(),
            Block {
                nodes: vec![
                    NodeRecord {
                        name: "ok".to_string(),
                        node_type: "value".to_string(),
                        location: [0.0, 0.0],
                        properties: IndexMap::new(),
                    },
                    NodeRecord {
                        name: "nope".to_string(),
                        node_type: "bogus".to_string(),
                        location: [0.0, 0.0],
                        properties: IndexMap::new(),
                    },
                ],
                links: vec![],
            },
        );
        document
            .save(&prefs.export_path(TreeKind::Geometry))
            .unwrap();

        let err = import_block(&mut tree, &registry, &prefs, "bad").unwrap_err();
        match err {
            ImportError::UnknownNodeType { node_type, created } => {
                assert_eq!(node_type, "bogus");
                assert_eq!(created, vec!["ok".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Explicitly partial: the first node stays in the tree.
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_bad_records_become_warnings() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let registry = create_geometry_registry();
        let mut tree = NodeTree::new("fresh", TreeKind::Geometry);

        let mut document = Document::default();
        document.blocks.insert(
            "odd".to_string(),
            Block {
                nodes: vec![NodeRecord {
                    name: "M".to_string(),
                    node_type: "math".to_string(),
                    location: [0.0, 0.0],
                    properties: IndexMap::from([
                        // Wrong shape for the operation selector
                        ("operation".to_string(), PropValue::Int(5)),
                        // Matches neither a property nor a socket
                        ("nonsense".to_string(), PropValue::Float(1.0)),
                        // Socket exists, value does not fit
                        ("A".to_string(), PropValue::String("oops".to_string())),
                    ]),
                }],
                links: vec![LinkRecord {
                    from_node: "X".to_string(),
                    from_socket: "Value".to_string(),
                    to_node: "M".to_string(),
                    to_socket: "A".to_string(),
                }],
            },
        );
        document
            .save(&prefs.export_path(TreeKind::Geometry))
            .unwrap();

        let report = expect_imported(
            import_block(&mut tree, &registry, &prefs, "odd").unwrap(),
        );
        assert_eq!(report.created, vec!["M".to_string()]);
        assert_eq!(report.link_count, 0);
        assert_eq!(report.warnings.len(), 4);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, ExchangeWarning::LinkSkipped { .. })));
        // The node itself survived with its defaults intact.
        let node = tree.node_by_name("M").unwrap();
        assert_eq!(
            node.properties.get("operation"),
            Some(&SocketValue::String("add".to_string()))
        );
    }

    #[test]
    fn test_reimport_suffixes_names() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let (mut tree, registry) = math_fixture();

        export_selection(&tree, &prefs, TreeKind::Geometry, "mix1").unwrap();
        let report = expect_imported(
            import_block(&mut tree, &registry, &prefs, "mix1").unwrap(),
        );
        assert_eq!(
            report.created,
            vec!["N1.001".to_string(), "N2.001".to_string()]
        );

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.link_count(), 2);
        // The new link is wired between the renamed copies.
        let copy_link = tree
            .links()
            .find(|l| tree.node(l.from_node).unwrap().name == "N2.001")
            .unwrap();
        assert_eq!(tree.node(copy_link.to_node).unwrap().name, "N1.001");
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let tree = NodeTree::new("shading", TreeKind::Shader);

        let err = export_selection(&tree, &prefs, TreeKind::Geometry, "x").unwrap_err();
        assert!(matches!(err, ExportError::KindMismatch { .. }));
        assert!(!prefs.export_path(TreeKind::Geometry).exists());
    }

    #[test]
    fn test_color_values_round_trip() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_in(&dir);
        let registry = create_shader_registry();
        let mut tree = NodeTree::new("material", TreeKind::Shader);

        let mut rgb = registry.create_node("rgb").unwrap();
        rgb.name = "Tint".to_string();
        rgb.properties.insert(
            "color".to_string(),
            SocketValue::Color([0.1, 0.2, 0.3, 0.5]),
        );
        let rgb_id = tree.add_node(rgb);
        tree.set_selected(rgb_id, true);

        let mut bsdf = registry.create_node("principled_bsdf").unwrap();
        bsdf.name = "Surface".to_string();
        if let Some(socket) = bsdf.inputs.iter_mut().find(|s| s.name == "Base Color") {
            socket.default_value = Some(SocketValue::Color([0.9, 0.1, 0.1, 1.0]));
        }
        let bsdf_id = tree.add_node(bsdf);
        tree.set_selected(bsdf_id, true);

        let from = tree.node(rgb_id).unwrap().outputs[0].id;
        let to = tree
            .node(bsdf_id)
            .unwrap()
            .input_by_name("Emission")
            .unwrap()
            .id;
        tree.connect(rgb_id, from, bsdf_id, to).unwrap();

        export_selection(&tree, &prefs, TreeKind::Shader, "pal").unwrap();

        // Colors land in the file as flat four-number arrays.
        let raw =
            std::fs::read_to_string(prefs.export_path(TreeKind::Shader)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value["pal"]["nodes"][0]["properties"]["color"]
                .as_array()
                .unwrap()
                .len(),
            4
        );

        let mut fresh = NodeTree::new("fresh", TreeKind::Shader);
        expect_imported(import_block(&mut fresh, &registry, &prefs, "pal").unwrap());

        let tint = fresh.node_by_name("Tint").unwrap();
        assert_eq!(
            tint.properties.get("color"),
            Some(&SocketValue::Color([0.1, 0.2, 0.3, 0.5]))
        );
        let surface = fresh.node_by_name("Surface").unwrap();
        assert_eq!(
            surface.input_by_name("Base Color").unwrap().default_value,
            Some(SocketValue::Color([0.9, 0.1, 0.1, 1.0]))
        );
        assert!(surface.input_by_name("Emission").unwrap().linked);
        assert_eq!(fresh.link_count(), 1);
    }
}
