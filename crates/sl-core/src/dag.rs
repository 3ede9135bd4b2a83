//! Table dependency graph and topological ordering

use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// A directed graph of foreign-key dependencies between tables.
///
/// Edges run from the referenced (parent) table to the referencing (child)
/// table, so a topological sort yields parents first.
#[derive(Debug, Default)]
pub struct TableDag {
    graph: DiGraph<TableName, ()>,
    node_map: HashMap<TableName, NodeIndex>,
}

impl TableDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, returning the existing node if already present
    pub fn add_table(&mut self, name: &TableName) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.clone());
        self.node_map.insert(name.clone(), idx);
        idx
    }

    /// Record that `child` references `parent`
    pub fn add_dependency(&mut self, child: &TableName, parent: &TableName) {
        let child_idx = self.add_table(child);
        let parent_idx = self.add_table(parent);
        self.graph.add_edge(parent_idx, child_idx, ());
    }

    /// Fail with `CyclicSchema` if the edges contain a cycle
    pub fn validate(&self) -> CoreResult<()> {
        self.sorted_indices().map(|_| ())
    }

    fn sorted_indices(&self) -> CoreResult<Vec<NodeIndex>> {
        toposort(&self.graph, None).map_err(|cycle| CoreError::CyclicSchema {
            cycle: self.find_cycle_path(cycle.node_id()),
        })
    }

    /// Walk outgoing edges from `start` until a node repeats, for error reporting
    fn find_cycle_path(&self, start: NodeIndex) -> String {
        let mut path: Vec<String> = vec![self.graph[start].to_string()];
        let mut current = start;
        let mut visited = HashSet::new();
        visited.insert(current);

        while let Some(edge) = self.graph.edges(current).next() {
            let target = edge.target();
            path.push(self.graph[target].to_string());

            if target == start || visited.contains(&target) {
                break;
            }

            visited.insert(target);
            current = target;
        }

        path.join(" -> ")
    }

    /// Parents before children
    pub fn topological_order(&self) -> CoreResult<Vec<TableName>> {
        Ok(self
            .sorted_indices()?
            .into_iter()
            .map(|idx| self.graph[idx].clone())
            .collect())
    }

    /// Children before parents
    pub fn reverse_topological_order(&self) -> CoreResult<Vec<TableName>> {
        let mut order = self.topological_order()?;
        order.reverse();
        Ok(order)
    }
}

#[cfg(test)]
#[path = "dag_test.rs"]
mod tests;
