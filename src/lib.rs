//! Translator from bdnet netlists to structural Verilog.
//!
//! ```
//! use bdnet2verilog::{translate_str, Options};
//!
//! let bdnet = "MODEL top\nINPUT\na :  n1;\nOUTPUT\ny :  n2;\nENDMODEL\n";
//! let opts = Options { implicit_power: false, ..Options::default() };
//! let verilog = translate_str(bdnet, &opts).unwrap();
//! assert_eq!(verilog, "module top (a, y);\ninput a;\noutput y;\nendmodule\n");
//! ```

#[macro_use]
#[allow(dead_code, clippy::all)]
mod atom {
    include!(concat!(env!("OUT_DIR"), "/bdnet_atom.rs"));
}

pub use crate::atom::Atom;

mod error;
pub mod names;
pub mod record;
pub mod scanner;
pub mod scope;
pub mod translator;
pub mod value;

pub use crate::error::{Error, Result};
pub use crate::translator::{translate, translate_str, Options, Translator};
