//! Widget tree model for a TkForge design.
//!
//! The design is a tree where nodes are widgets and edges go from a
//! container to the widgets placed in it. All nodes live in one arena; the
//! root canvas is a Frame with the reserved id `#0`. Ids are minted in
//! creation order, and creation order is what the code generator replays.

use crate::error::EditError;
use crate::id::{Name, WidgetId};
use crate::policy::{canonical_property, is_hidden_layout_option};
use crate::registry::{Namespace, WidgetKind};
use crate::schema::{self, LayoutStrategy};
use log::debug;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::Serialize;
use std::collections::BTreeMap;

// ─── Widget nodes ────────────────────────────────────────────────────────

/// One placed widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetNode {
    pub id: WidgetId,

    /// Fixed at creation.
    pub kind: WidgetKind,

    /// Display name, also the attribute name in generated code.
    pub name: Name,

    /// Geometry manager this widget is placed with.
    pub strategy: LayoutStrategy,

    /// Current layout options of `strategy`, `in` excluded.
    pub layout: BTreeMap<String, String>,

    /// Current value of every option the kind declares.
    pub properties: BTreeMap<String, String>,
}

impl WidgetNode {
    /// A widget as a fresh constructor call plus zero placement would leave it.
    pub fn new(id: WidgetId, kind: WidgetKind, name: Name, strategy: LayoutStrategy) -> Self {
        let properties = schema::properties(kind)
            .iter()
            .map(|o| (o.name.to_string(), o.default.to_string()))
            .collect();
        let layout = strategy
            .options()
            .iter()
            .filter(|o| !is_hidden_layout_option(o.name))
            .map(|o| (o.name.to_string(), o.default.to_string()))
            .collect();

        Self {
            id,
            kind,
            name,
            strategy,
            layout,
            properties,
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.kind.namespace()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .get(canonical_property(name))
            .map(String::as_str)
    }

    pub fn layout_param(&self, name: &str) -> Option<&str> {
        self.layout.get(name).map(String::as_str)
    }
}

/// One row of the structural tree view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineRow {
    pub id: WidgetId,
    pub name: Name,
    pub kind: WidgetKind,
    pub parent: WidgetId,
    pub depth: usize,
}

// ─── Design ──────────────────────────────────────────────────────────────

/// The complete design: an arena of `WidgetNode` values rooted at the canvas.
#[derive(Debug, Clone)]
pub struct Design {
    /// Container → child edges.
    graph: StableDiGraph<WidgetNode, ()>,

    /// Id → arena slot, ordered by id (creation order).
    index: BTreeMap<WidgetId, NodeIndex>,

    /// Next id to mint.
    next_id: u32,
}

impl Design {
    /// Create an empty design holding only the root canvas.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let canvas = WidgetNode::new(
            WidgetId::CANVAS,
            WidgetKind::Frame,
            Name::intern("root"),
            LayoutStrategy::Flow,
        );
        let root = graph.add_node(canvas);

        let mut index = BTreeMap::new();
        index.insert(WidgetId::CANVAS, root);

        Self {
            graph,
            index,
            next_id: 1,
        }
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    fn slot(&self, id: WidgetId) -> Result<NodeIndex, EditError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(EditError::UnknownWidget(id))
    }

    /// Look up a widget (or the canvas) by id.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Like `get`, but a missing id is an error.
    pub fn widget(&self, id: WidgetId) -> Result<&WidgetNode, EditError> {
        self.slot(id).map(|idx| &self.graph[idx])
    }

    fn widget_mut(&mut self, id: WidgetId) -> Result<&mut WidgetNode, EditError> {
        if id.is_canvas() {
            return Err(EditError::CanvasIsFixed);
        }
        let idx = self.slot(id)?;
        Ok(&mut self.graph[idx])
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.index.contains_key(&id)
    }

    /// The container a widget is placed in. `None` for the canvas.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        let idx = self.index.get(&id)?;
        self.graph
            .neighbors_directed(*idx, Direction::Incoming)
            .next()
            .map(|p| self.graph[p].id)
    }

    /// Children of a container in creation order.
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        let Some(idx) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut children: Vec<WidgetId> = self
            .graph
            .neighbors_directed(*idx, Direction::Outgoing)
            .map(|c| self.graph[c].id)
            .collect();
        children.sort();
        children
    }

    /// The layout strategy every current child of `parent` shares.
    pub fn child_strategy(&self, parent: WidgetId) -> Option<LayoutStrategy> {
        let first = *self.children(parent).first()?;
        self.get(first).map(|n| n.strategy)
    }

    /// True if the widget is a page of a notebook.
    pub fn is_tab(&self, id: WidgetId) -> bool {
        self.parent(id)
            .and_then(|p| self.get(p))
            .is_some_and(|p| p.kind.is_tabbed())
    }

    /// All widgets in creation order, canvas excluded.
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetNode> + '_ {
        self.index
            .iter()
            .filter(|(id, _)| !id.is_canvas())
            .map(|(_, idx)| &self.graph[*idx])
    }

    /// First widget (in creation order) carrying `name`.
    pub fn find_by_name(&self, name: &str) -> Option<WidgetId> {
        self.widgets()
            .find(|n| n.name.as_str() == name)
            .map(|n| n.id)
    }

    /// Number of widgets, canvas excluded.
    pub fn len(&self) -> usize {
        self.index.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The geometry manager a widget uses. The canvas has no placement of
    /// its own and reports the `Flow` fallback.
    pub fn packing_method(&self, id: WidgetId) -> Result<LayoutStrategy, EditError> {
        let node = self.widget(id)?;
        if id.is_canvas() {
            return Ok(LayoutStrategy::Flow);
        }
        Ok(node.strategy)
    }

    /// Depth-first rows for the structural tree view.
    pub fn outline(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::with_capacity(self.len());
        self.outline_into(WidgetId::CANVAS, 0, &mut rows);
        rows
    }

    fn outline_into(&self, parent: WidgetId, depth: usize, rows: &mut Vec<OutlineRow>) {
        for child in self.children(parent) {
            if let Some(node) = self.get(child) {
                rows.push(OutlineRow {
                    id: child,
                    name: node.name,
                    kind: node.kind,
                    parent,
                    depth,
                });
                self.outline_into(child, depth + 1, rows);
            }
        }
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Create a widget as the last child of `parent`.
    ///
    /// An absent or empty name becomes `<Kind><id>`. Children of a notebook
    /// become pages: they are packed to fill the page whatever `strategy`
    /// asks for.
    pub fn add_widget(
        &mut self,
        kind: WidgetKind,
        name: Option<&str>,
        strategy: LayoutStrategy,
        parent: WidgetId,
    ) -> Result<WidgetId, EditError> {
        if kind.is_toplevel() {
            return Err(EditError::TopLevelWindow { kind });
        }
        let parent_idx = self.slot(parent)?;
        let container = &self.graph[parent_idx];
        if !container.kind.is_container() {
            return Err(EditError::NotAContainer {
                parent: container.name,
                kind: container.kind,
            });
        }

        let tabbed = container.kind.is_tabbed();
        let strategy = if tabbed {
            LayoutStrategy::Flow
        } else {
            strategy
        };
        if let Some(expected) = self.child_strategy(parent)
            && expected != strategy
        {
            return Err(EditError::LayoutMismatch {
                parent: self.graph[parent_idx].name,
                expected,
                requested: strategy,
            });
        }

        let id = WidgetId::new(self.next_id);
        self.next_id += 1;

        let name = match name.filter(|n| !n.is_empty()) {
            Some(n) => Name::intern(n),
            None => Name::intern(&format!("{kind}{}", id.get())),
        };
        let mut node = WidgetNode::new(id, kind, name, strategy);
        if tabbed {
            node.layout.insert("fill".into(), "both".into());
            node.layout.insert("expand".into(), "1".into());
        }

        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent_idx, idx, ());
        self.index.insert(id, idx);
        debug!("added {kind} {id} ({name}) in {parent} with {strategy}");
        Ok(id)
    }

    /// Remove a childless widget, returning it.
    pub fn remove_widget(&mut self, id: WidgetId) -> Result<WidgetNode, EditError> {
        if id.is_canvas() {
            return Err(EditError::CanvasIsFixed);
        }
        let idx = self.slot(id)?;
        let children = self.children(id).len();
        if children > 0 {
            return Err(EditError::HasChildren {
                widget: self.graph[idx].name,
                children,
            });
        }

        let node = self
            .graph
            .remove_node(idx)
            .ok_or(EditError::UnknownWidget(id))?;
        self.index.remove(&id);
        debug!("removed {} {id} ({})", node.kind, node.name);
        Ok(node)
    }

    /// Put a previously removed widget back under `parent`, keeping its id.
    ///
    /// This is the undo path for [`Design::remove_widget`] and repeats none of
    /// the checks of [`Design::add_widget`]: `node` must come from a removal
    /// on this design, and `parent` must be the parent it had then.
    pub fn restore_widget(&mut self, node: WidgetNode, parent: WidgetId) -> Result<(), EditError> {
        if self.index.contains_key(&node.id) {
            return Err(EditError::DuplicateWidget(node.id));
        }
        let parent_idx = self.slot(parent)?;
        let id = node.id;
        self.next_id = self.next_id.max(id.get() + 1);

        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent_idx, idx, ());
        self.index.insert(id, idx);
        debug!("restored {id} in {parent}");
        Ok(())
    }

    /// Set a widget option, returning the previous value.
    /// Tk aliases (`background`) resolve to the declared option (`bg`).
    pub fn set_property(
        &mut self,
        id: WidgetId,
        property: &str,
        value: &str,
    ) -> Result<String, EditError> {
        let node = self.widget_mut(id)?;
        let kind = node.kind;
        let slot = node
            .properties
            .get_mut(canonical_property(property))
            .ok_or_else(|| EditError::UnknownProperty {
                kind,
                property: property.to_string(),
            })?;
        let previous = std::mem::replace(slot, value.to_string());
        debug!("{id}.{property} = {value:?}");
        Ok(previous)
    }

    /// Set a layout option of the widget's strategy, returning the previous value.
    pub fn set_layout_param(
        &mut self,
        id: WidgetId,
        option: &str,
        value: &str,
    ) -> Result<String, EditError> {
        if self.is_tab(id) {
            return Err(EditError::ManagedByNotebook {
                widget: self.widget(id)?.name,
            });
        }
        let node = self.widget_mut(id)?;
        let strategy = node.strategy;
        let slot = node
            .layout
            .get_mut(option)
            .filter(|_| !is_hidden_layout_option(option))
            .ok_or_else(|| EditError::UnknownLayoutOption {
                strategy,
                option: option.to_string(),
            })?;
        let previous = std::mem::replace(slot, value.to_string());
        debug!("{id}.{}({option}={value:?})", strategy.manager());
        Ok(previous)
    }

    /// Change a widget's display name, returning the previous one.
    pub fn rename(&mut self, id: WidgetId, name: &str) -> Result<Name, EditError> {
        let node = self.widget_mut(id)?;
        let previous = std::mem::replace(&mut node.name, Name::intern(name));
        debug!("{id} renamed {previous} -> {name}");
        Ok(previous)
    }
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}
