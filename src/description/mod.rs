pub(crate) mod def;
