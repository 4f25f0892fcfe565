//! xlribbon - Excel ribbon custom UI from a YAML model
//!
//! This library turns a declarative ribbon tree into custom-UI XML, generates
//! VBA stubs for every getter/setter the model leaves unset, and packages the
//! result into an `.xlam` add-in.
//!
//! # Features
//!
//! - Typed ribbon model (tabs, groups, buttons, check boxes, combo boxes, ...)
//! - Router check: every callback in the model must have a handler
//! - Automatic getter/setter names with matching VBA procedures
//! - Custom images packaged with their relationships
//!
//! # Example
//!
//! ```no_run
//! use xlribbon::parser::parse_project;
//! use xlribbon::Ribbon;
//! use std::path::Path;
//!
//! let project = parse_project(Path::new("ribbon.yaml"))?;
//! let ribbon = Ribbon::from_project(project)?;
//!
//! println!("{}", ribbon.xml());
//! println!("{}", ribbon.macros_now()?);
//! # Ok::<(), xlribbon::error::RibbonError>(())
//! ```

pub mod binding;
pub mod checks;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod error;
pub mod model;
pub mod package;
pub mod parser;
pub mod ribbon;
pub mod router;
pub mod writer;
pub mod xml;

// Re-export commonly used types
pub use error::{RibbonError, RibbonResult};
pub use model::{Attr, Node, NodeKind};
pub use ribbon::Ribbon;
pub use router::Router;
