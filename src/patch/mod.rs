pub(crate) mod dsl;
pub(crate) mod graph;
pub(crate) mod layout;
pub(crate) mod node;
