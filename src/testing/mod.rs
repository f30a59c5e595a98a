pub(crate) mod graph_enumerator;
pub(crate) mod named_graphs;
pub(crate) mod random_graphs;
