//! Parameter-file persistence: the on-disk table dialect and the builder
//! that assembles, validates, and writes records.

pub mod table;
pub mod writer;

pub use table::{parse_paramfile, read_paramfile, render_paramfile, PARAM_TABLE_NAME};
pub use writer::{ParamFileBuilder, WriteOutcome};
