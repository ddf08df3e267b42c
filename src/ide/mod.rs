//! Editor-facing queries over analyzed Antimony documents.
//!
//! Each query takes an [`AntFile`] and a 1-based position and returns plain
//! data; conversion to LSP types happens at the server boundary.
//!
//! ## Usage
//!
//! ```ignore
//! use stibium::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! host.set_document("file:///m.ant", 1, "S1 -> S2; k1*S1\n")?;
//!
//! let file = host.document("file:///m.ant")?;
//! let (locations, _) = file.read().goto(SrcPosition::new(1, 1));
//! ```

mod completion;
mod file;
mod goto;
mod host;
mod hover;

pub use completion::{CompletionItem, CompletionKind, completions};
pub use file::AntFile;
pub use goto::{Location, goto};
pub use host::{AnalysisHost, DocumentHandle, HostError};
pub use hover::{HoverResult, hover};
