//! Book Sidebar - table-of-contents navigation for generated documentation books
//!
//! Renders a fixed navigation tree into a sidebar container and layers the
//! per-page state on top of it:
//! - the entry for the current page is marked active and its sections expanded
//! - the panel scroll offset survives exactly one navigation
//! - section toggles expand and collapse chapters
//!
//! ## Example
//! ```rust
//! use book_sidebar::prelude::*;
//!
//! let navigator = SidebarNavigator::book();
//! let mut store = MemoryStore::new();
//! let mut panel = PanelState::default();
//!
//! let page = PageContext::new("https://docs.example.com/book/properties.html", "");
//! let sidebar = navigator.attach(&page, &mut store, &mut panel);
//!
//! assert_eq!(sidebar.active_href(), Some("properties.html"));
//! assert_eq!(panel.centered_on, sidebar.active());
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod links;
pub mod navigator;
pub mod render;
pub mod store;
pub mod tree;

// Re-export common types
pub mod prelude {
    pub use crate::config::{FoldConfig, SidebarConfig};
    pub use crate::dom::{Document, NodeId};
    pub use crate::error::{SidebarError, SidebarResult};
    pub use crate::navigator::{
        ClickOutcome, PageContext, PanelState, ScrollOutcome, ScrollPanel, Sidebar,
        SidebarNavigator,
    };
    pub use crate::store::{MemoryStore, SessionStore};
    pub use crate::tree::{EntryKind, NavigationEntry, NavigationTree};
}

#[cfg(feature = "wasm")]
pub mod wasm;
