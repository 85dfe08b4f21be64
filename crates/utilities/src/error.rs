use std::error::Error;

/// The error type used at the boundaries of the toolset, for example by the
/// readers and the tools. Any error can be lifted into it with `?`.
pub type PowersetError = Box<dyn Error>;
