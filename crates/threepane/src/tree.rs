//! UI tree structure with Taffy layout integration.

use crate::style::Style;
use crate::widgets::Widget;
use indexmap::IndexMap;
use taffy::{AvailableSpace, TaffyTree};
use threepane_core::alloc::HashSet;
use threepane_core::geometry::Size;
use threepane_core::math::Vec2;

bitflags::bitflags! {
    /// Reasons a node needs work before the next layout pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const LAYOUT = 1 << 0;
        const STYLE = 1 << 1;
        const CHILDREN_ORDER = 1 << 2;
    }
}

/// Node identifier in the UI tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Layout information computed by Taffy, in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A node in the UI tree.
pub struct UiNode {
    pub widget: Box<dyn Widget>,
    pub taffy_node: taffy::NodeId,
    pub layout: LayoutRect,
    pub dirty_flags: DirtyFlags,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// UI tree managing widgets and layout.
///
/// Nodes are stored in insertion order; removing a subtree destroys its
/// widgets and their Taffy nodes rather than recycling them, matching the
/// docking model where detached content is rebuilt, never reparented.
pub struct UiTree {
    taffy: TaffyTree<()>,
    nodes: IndexMap<NodeId, UiNode>,
    root: Option<NodeId>,
    next_id: usize,
    dirty_nodes: HashSet<NodeId>,
}

impl UiTree {
    /// Create a new UI tree.
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            nodes: IndexMap::new(),
            root: None,
            next_id: 0,
            dirty_nodes: HashSet::new(),
        }
    }

    /// Add a widget to the tree and return its NodeId.
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) -> NodeId {
        let node_id = NodeId(self.next_id);
        self.next_id += 1;

        let style = widget.style().layout.clone();
        let taffy_node = self
            .taffy
            .new_leaf(style)
            .expect("failed to create taffy node");

        let ui_node = UiNode {
            widget,
            taffy_node,
            layout: LayoutRect::default(),
            dirty_flags: DirtyFlags::LAYOUT | DirtyFlags::STYLE,
            parent: None,
            children: Vec::new(),
        };

        self.nodes.insert(node_id, ui_node);
        self.mark_dirty(node_id, DirtyFlags::LAYOUT | DirtyFlags::STYLE);

        node_id
    }

    /// Append a node as the last child of a parent node.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(parent_node), Some(child_node)) =
            (self.nodes.get(&parent), self.nodes.get(&child))
        {
            self.taffy
                .add_child(parent_node.taffy_node, child_node.taffy_node)
                .ok();

            if let Some(child_node) = self.nodes.get_mut(&child) {
                child_node.parent = Some(parent);
            }
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.push(child);
            }

            self.mark_dirty(parent, DirtyFlags::CHILDREN_ORDER);
        }
    }

    /// Insert a node as a child of a parent at a specific index.
    ///
    /// The docking restore path relies on this to put a reattached pane back
    /// at its canonical ordinal position.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        let (Some(parent_node), Some(child_node)) =
            (self.nodes.get(&parent), self.nodes.get(&child))
        else {
            return;
        };
        let index = index.min(parent_node.children.len());

        self.taffy
            .insert_child_at_index(parent_node.taffy_node, index, child_node.taffy_node)
            .ok();

        if let Some(child_node) = self.nodes.get_mut(&child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.insert(index, child);
        }

        self.mark_dirty(parent, DirtyFlags::CHILDREN_ORDER);
    }

    /// Remove a node and its entire subtree, destroying the widgets.
    pub fn remove_subtree(&mut self, node_id: NodeId) {
        let Some((parent, taffy_node)) = self.nodes.get(&node_id).map(|n| (n.parent, n.taffy_node))
        else {
            return;
        };

        // Detach from parent bookkeeping first.
        if let Some(parent) = parent {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != node_id);
                let parent_taffy = parent_node.taffy_node;
                self.taffy.remove_child(parent_taffy, taffy_node).ok();
            }
            self.mark_dirty(parent, DirtyFlags::CHILDREN_ORDER);
        }

        let mut stack = vec![node_id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.shift_remove(&current) {
                stack.extend(node.children.iter().copied());
                self.taffy.remove(node.taffy_node).ok();
                self.dirty_nodes.remove(&current);
            }
        }

        if self.root == Some(node_id) {
            self.root = None;
        }
    }

    /// Set the root node.
    pub fn set_root(&mut self, node_id: NodeId) {
        self.root = Some(node_id);
        self.mark_dirty(node_id, DirtyFlags::LAYOUT);
    }

    /// Get the root node.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree contains a node.
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get the children of a node.
    pub fn children(&self, node_id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node_id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Get the parent of a node.
    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(&node_id).and_then(|n| n.parent)
    }

    /// Replace a node's style and sync it to Taffy.
    pub fn set_style(&mut self, node_id: NodeId, style: Style) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            let taffy_node = node.taffy_node;
            let layout = style.layout.clone();
            *node.widget.style_mut() = style;
            self.taffy.set_style(taffy_node, layout).ok();
            self.mark_dirty(node_id, DirtyFlags::LAYOUT | DirtyFlags::STYLE);
        }
    }

    /// Get a node's current style.
    pub fn style(&self, node_id: NodeId) -> Option<&Style> {
        self.nodes.get(&node_id).map(|n| n.widget.style())
    }

    /// Downcast a node's widget to a concrete type.
    pub fn widget<T: 'static>(&self, node_id: NodeId) -> Option<&T> {
        self.nodes
            .get(&node_id)
            .and_then(|n| n.widget.as_any().downcast_ref::<T>())
    }

    /// Downcast a node's widget to a concrete type, mutably.
    ///
    /// Layout-affecting changes must go through [`UiTree::set_style`].
    pub fn widget_mut<T: 'static>(&mut self, node_id: NodeId) -> Option<&mut T> {
        self.nodes
            .get_mut(&node_id)
            .and_then(|n| n.widget.as_any_mut().downcast_mut::<T>())
    }

    /// Get the computed layout of a node in absolute coordinates.
    pub fn layout(&self, node_id: NodeId) -> LayoutRect {
        self.nodes
            .get(&node_id)
            .map(|n| n.layout)
            .unwrap_or_default()
    }

    fn mark_dirty(&mut self, node_id: NodeId, flags: DirtyFlags) {
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.dirty_flags |= flags;
            self.dirty_nodes.insert(node_id);
        }
    }

    /// Compute layout for the whole tree within the available space.
    pub fn compute_layout(&mut self, available: Size<f32>) {
        let Some(root) = self.root else {
            return;
        };
        let Some(root_node) = self.nodes.get(&root) else {
            return;
        };

        self.taffy
            .compute_layout(
                root_node.taffy_node,
                taffy::geometry::Size {
                    width: AvailableSpace::Definite(available.width),
                    height: AvailableSpace::Definite(available.height),
                },
            )
            .ok();

        // Taffy reports positions relative to the parent; accumulate into
        // absolute coordinates top-down.
        let mut stack = vec![(root, 0.0_f32, 0.0_f32)];
        while let Some((node_id, offset_x, offset_y)) = stack.pop() {
            let Some(node) = self.nodes.get(&node_id) else {
                continue;
            };
            let children = node.children.clone();
            if let Ok(layout) = self.taffy.layout(node.taffy_node) {
                let abs_x = offset_x + layout.location.x;
                let abs_y = offset_y + layout.location.y;
                let rect = LayoutRect {
                    x: abs_x,
                    y: abs_y,
                    width: layout.size.width,
                    height: layout.size.height,
                };
                if let Some(node) = self.nodes.get_mut(&node_id) {
                    node.layout = rect;
                    node.dirty_flags = DirtyFlags::empty();
                }
                stack.extend(children.into_iter().map(|c| (c, abs_x, abs_y)));
            }
        }
        self.dirty_nodes.clear();
    }

    /// Hit-test: deepest node whose layout contains the point.
    pub fn hit_test(&self, point: Vec2) -> Option<NodeId> {
        let root = self.root?;
        if !self.nodes.get(&root)?.layout.contains(point) {
            return None;
        }
        let mut current = root;
        'descend: loop {
            let node = self.nodes.get(&current)?;
            // Later children draw on top; prefer them.
            for &child in node.children.iter().rev() {
                if let Some(child_node) = self.nodes.get(&child)
                    && child_node.layout.contains(point)
                {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Remove every node from the tree.
    pub fn clear(&mut self) {
        for (_, node) in self.nodes.drain(..) {
            self.taffy.remove(node.taffy_node).ok();
        }
        self.root = None;
        self.dirty_nodes.clear();
    }
}

impl Default for UiTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Container;
    use taffy::FlexDirection;

    fn row_with_children(widths: &[f32]) -> (UiTree, NodeId, Vec<NodeId>) {
        let mut tree = UiTree::new();
        let row = tree.add_widget(Box::new(Container::with_style(
            Style::new()
                .width(600.0)
                .height(400.0)
                .flex_direction(FlexDirection::Row),
        )));
        tree.set_root(row);
        let children = widths
            .iter()
            .map(|w| {
                let child = tree.add_widget(Box::new(Container::with_style(
                    Style::new().width(*w).height_full(),
                )));
                tree.add_child(row, child);
                child
            })
            .collect();
        (tree, row, children)
    }

    #[test]
    fn test_layout_positions_are_absolute() {
        let (mut tree, _, children) = row_with_children(&[100.0, 200.0]);
        tree.compute_layout(Size::new(600.0, 400.0));

        assert_eq!(tree.layout(children[0]).x, 0.0);
        assert_eq!(tree.layout(children[1]).x, 100.0);
        assert_eq!(tree.layout(children[1]).width, 200.0);
    }

    #[test]
    fn test_insert_child_ordinal_position() {
        let (mut tree, row, children) = row_with_children(&[100.0, 100.0]);
        let inserted = tree.add_widget(Box::new(Container::with_style(
            Style::new().width(50.0).height_full(),
        )));
        tree.insert_child(row, 0, inserted);

        assert_eq!(tree.children(row), &[inserted, children[0], children[1]]);
        tree.compute_layout(Size::new(600.0, 400.0));
        assert_eq!(tree.layout(inserted).x, 0.0);
        assert_eq!(tree.layout(children[0]).x, 50.0);
    }

    #[test]
    fn test_remove_subtree_destroys_descendants() {
        let (mut tree, row, children) = row_with_children(&[100.0, 100.0]);
        let grandchild = tree.add_widget(Box::new(Container::new()));
        tree.add_child(children[0], grandchild);
        assert_eq!(tree.node_count(), 4);

        tree.remove_subtree(children[0]);

        assert_eq!(tree.node_count(), 2);
        assert!(!tree.contains(children[0]));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.children(row), &[children[1]]);
    }

    #[test]
    fn test_hit_test_prefers_deepest() {
        let (mut tree, row, children) = row_with_children(&[100.0, 200.0]);
        tree.compute_layout(Size::new(600.0, 400.0));

        assert_eq!(tree.hit_test(Vec2::new(50.0, 50.0)), Some(children[0]));
        assert_eq!(tree.hit_test(Vec2::new(150.0, 50.0)), Some(children[1]));
        // Beyond the children but inside the row.
        assert_eq!(tree.hit_test(Vec2::new(500.0, 50.0)), Some(row));
        assert_eq!(tree.hit_test(Vec2::new(700.0, 50.0)), None);
    }
}
