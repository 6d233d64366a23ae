pub mod buffer;
pub(crate) mod line;
pub(crate) mod partition;
pub mod process;
pub(crate) mod unsafe_slice;
