use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::schema::TableDef;

/// Order tables so every parent precedes its children.
///
/// Ties are broken by position in `tables`, which keeps the order stable
/// across runs.
pub fn dependency_order(tables: &[&'static TableDef]) -> Result<Vec<&'static TableDef>> {
    let graph = build_adjacency(tables);
    let order = toposort(&graph).map_err(Error::Cycle)?;

    Ok(order.into_iter().map(|position| tables[position]).collect())
}

/// Reverse of [`dependency_order`]: children first, safe for `DROP TABLE`.
pub fn drop_order(tables: &[&'static TableDef]) -> Result<Vec<&'static TableDef>> {
    let mut order = dependency_order(tables)?;
    order.reverse();
    Ok(order)
}

/// Edges point from parent position to child positions.
struct Adjacency {
    names: Vec<&'static str>,
    edges: BTreeMap<usize, BTreeSet<usize>>,
}

fn build_adjacency(tables: &[&'static TableDef]) -> Adjacency {
    let names: Vec<&'static str> = tables.iter().map(|table| table.name).collect();
    let mut edges: BTreeMap<usize, BTreeSet<usize>> =
        (0..names.len()).map(|idx| (idx, BTreeSet::new())).collect();

    for (child, table) in tables.iter().enumerate() {
        for fk in table.foreign_keys {
            let Some(parent) = names.iter().position(|name| *name == fk.parent_table) else {
                continue;
            };
            edges.entry(parent).or_default().insert(child);
        }
    }

    Adjacency { names, edges }
}

fn toposort(graph: &Adjacency) -> std::result::Result<Vec<usize>, Vec<String>> {
    let mut indegree: BTreeMap<usize, usize> = graph.edges.keys().map(|node| (*node, 0)).collect();

    for targets in graph.edges.values() {
        for target in targets {
            *indegree.entry(*target).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<usize> = indegree
        .iter()
        .filter_map(|(node, count)| if *count == 0 { Some(*node) } else { None })
        .collect();

    let mut order = Vec::with_capacity(graph.names.len());

    while let Some(node) = ready.pop_first() {
        order.push(node);

        if let Some(targets) = graph.edges.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(*target);
                    }
                }
            }
        }
    }

    if order.len() == graph.names.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter_map(|(node, count)| {
                if count > 0 {
                    Some(graph.names[node].to_string())
                } else {
                    None
                }
            })
            .collect())
    }
}
