pub(crate) mod faces;
pub(crate) mod force;
pub(crate) mod schnyder;
pub(crate) mod triangulate;
