use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::visit::{EdgeRef, NodeIndexable};

use super::faces::get_faces;
use crate::{
    embedding::{Planarity, test_planarity},
    error::{Error, Result},
    types::{DiGraph, EdgeLabel},
};

type IndexGraph = petgraph::graph::UnGraph<u32, EdgeLabel>;

fn to_ungraph(graph: &DiGraph) -> IndexGraph {
    let mut g = IndexGraph::new_undirected();
    for v in 0..graph.node_count() {
        g.add_node(v as u32);
    }
    for e in graph.edge_references() {
        let u = e.source();
        let v = e.target();
        if u.index() < v.index() {
            g.add_edge(u, v, *e.weight());
        }
    }
    g
}

fn embed<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> Result<DiGraph> {
    match test_planarity(graph, false) {
        Planarity::Planar(embedding) => Ok(embedding),
        Planarity::NonPlanar(_) => Err(Error::Layout("graph is not planar".into())),
    }
}

fn do_embed(graph: &mut DiGraph) -> Result<()> {
    let labels: HashMap<(usize, usize), EdgeLabel> = graph
        .edge_references()
        .map(|e| ((e.source().index(), e.target().index()), *e.weight()))
        .collect();
    let mut embedding = embed(&to_ungraph(graph))?;
    // the embedding forgets which arcs were added by us
    for eid in embedding.edge_indices().collect::<Vec<_>>() {
        if let Some((u, v)) = embedding.edge_endpoints(eid) {
            if let Some(&label) = labels.get(&(u.index(), v.index())) {
                embedding[eid] = label;
            }
        }
    }
    *graph = embedding;
    Ok(())
}

fn add_virtual_edge(g: &mut DiGraph, u: usize, v: usize) {
    g.add_edge(g.from_index(u), g.from_index(v), EdgeLabel::Virtual);
    g.add_edge(g.from_index(v), g.from_index(u), EdgeLabel::Virtual);
}

/// Adds edges to a planar graph until every face is a triangle and returns its embedding.
/// Added edges are labelled [`EdgeLabel::Virtual`]. Self-loops must be removed beforehand.
///
/// Needs at least three nodes.
pub fn triangulate<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> Result<DiGraph> {
    if graph.node_count() < 3 {
        return Err(Error::Layout("triangulation needs at least three nodes".into()));
    }
    let mut g = embed(graph)?;
    connect_components(&mut g);
    do_embed(&mut g)?;
    make_biconnected(&mut g)?;
    do_embed(&mut g)?;
    triangulate_faces(&mut g)?;
    do_embed(&mut g)?;
    Ok(g)
}

fn connect_components(g: &mut DiGraph) {
    let n = g.node_count();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut roots = Vec::new();

    for i in 0..n {
        if !visited.put(i) {
            roots.push(i);
            let mut stack = vec![i];
            while let Some(u) = stack.pop() {
                for neighbor in g.neighbors(g.from_index(u)) {
                    let v = g.to_index(neighbor);
                    if !visited.put(v) {
                        stack.push(v);
                    }
                }
            }
        }
    }

    for pair in roots.windows(2) {
        add_virtual_edge(g, pair[0], pair[1]);
    }
}

/// Whenever a face boundary passes a node twice, joins the node's neighbours on that boundary.
fn make_biconnected(g: &mut DiGraph) -> Result<()> {
    let mut seen = FixedBitSet::with_capacity(g.node_count());

    for face in get_faces(g)? {
        let boundary = face.order;
        let len = boundary.len();
        if len < 3 {
            continue;
        }

        // successor of every boundary position that is still in the walk
        let mut next: Vec<usize> = (1..=len).map(|p| p % len).collect();
        let mut remaining = len;
        let (first, second) = (boundary[0], boundary[1]);
        let mut p = 0;
        while remaining >= 3 {
            let q = next[p];
            let r = next[q];
            let (a, b, c) = (boundary[p], boundary[q], boundary[r]);
            if b == first && c == second {
                break;
            }
            if seen.put(b) {
                add_virtual_edge(g, a, c);
                next[p] = r;
                remaining -= 1;
            } else {
                p = q;
            }
        }

        for &v in &boundary {
            seen.set(v, false);
        }
    }

    Ok(())
}

/// Splits every face into triangles, fanning out from a node of lowest degree.
fn triangulate_faces(g: &mut DiGraph) -> Result<()> {
    let mut degree: Vec<usize> = g.node_indices().map(|u| g.edges(u).count()).collect();
    let mut adjacent = FixedBitSet::with_capacity(g.node_count());

    for face in get_faces(g)? {
        let boundary = face.order;
        if boundary.len() < 4 {
            continue;
        }

        let start = boundary
            .iter()
            .enumerate()
            .min_by_key(|&(_, &v)| (degree[v], v))
            .map_or(0, |(i, _)| i);
        let centre = boundary[start];
        // rest of the boundary in walking order, next corner at the end
        let mut rest: Vec<usize> = boundary[start + 1..]
            .iter()
            .chain(&boundary[..start])
            .rev()
            .copied()
            .collect();

        let neighbours: Vec<usize> = g.neighbors(g.from_index(centre)).map(|v| g.to_index(v)).collect();
        for &v in &neighbours {
            adjacent.insert(v);
        }
        let mut fanned = Vec::new();

        // a chord from the fan centre would double an edge, cut the other corner instead
        while rest.len() >= 3 {
            let k = rest.len();
            let (b, c, d) = (rest[k - 1], rest[k - 2], rest[k - 3]);
            if adjacent.contains(c) {
                add_virtual_edge(g, b, d);
                degree[b] += 1;
                degree[d] += 1;
                rest.remove(k - 2);
            } else {
                add_virtual_edge(g, centre, c);
                degree[centre] += 1;
                degree[c] += 1;
                adjacent.insert(c);
                fanned.push(c);
                rest.pop();
            }
        }

        for v in neighbours.into_iter().chain(fanned) {
            adjacent.set(v, false);
        }
    }

    Ok(())
}
