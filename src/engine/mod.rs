//! View controllers and the session that ties them together.

pub mod accordion;
pub mod session;
pub mod tabs;

pub use accordion::{AccordionController, PanelHeight};
pub use session::Session;
pub use tabs::{ManifestStatus, TabController};
