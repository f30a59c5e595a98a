pub(crate) mod constraints;
pub(crate) mod embed;
pub(crate) mod kuratowski;
pub(crate) mod lr_graph;
