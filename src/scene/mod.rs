pub(crate) mod chart;
pub(crate) mod dsl;
pub(crate) mod schedule;
pub(crate) mod sequence;
