pub(crate) mod camera;
pub(crate) mod config;
pub(crate) mod reveal;
pub(crate) mod title;
