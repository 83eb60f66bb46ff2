//! Sidebar navigator - renders the table of contents and tracks the active page

use crate::config::SidebarConfig;
use crate::dom::{Document, NodeId};
use crate::links::PageAddress;
use crate::render::{render_tree, RenderedSidebar};
use crate::store::{record_scroll, take_scroll, SessionStore};
use crate::tree::NavigationTree;

/// Tag of the container element the sidebar lives in
pub const SCROLLBOX_TAG: &str = "sidebar-scrollbox";

/// What the host page tells the sidebar about itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Absolute address of the current page, if the host knows it
    pub location: Option<String>,
    /// Prefix from the current page's directory to the book root
    pub path_to_root: String,
}

impl PageContext {
    pub fn new(location: &str, path_to_root: &str) -> Self {
        Self {
            location: Some(location.to_string()),
            path_to_root: path_to_root.to_string(),
        }
    }

    /// A page whose address is unknown
    pub fn without_location(path_to_root: &str) -> Self {
        Self {
            location: None,
            path_to_root: path_to_root.to_string(),
        }
    }
}

/// The scrollable panel hosting the sidebar
pub trait ScrollPanel {
    fn scroll_top(&self) -> f64;
    fn set_scroll_top(&mut self, offset: f64);
    /// Scroll so that `node` sits in the vertical centre of the panel
    fn scroll_into_view_centered(&mut self, node: NodeId);
}

/// Panel that only remembers what was asked of it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub scroll_top: f64,
    pub centered_on: Option<NodeId>,
}

impl ScrollPanel for PanelState {
    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, offset: f64) {
        self.scroll_top = offset;
    }

    fn scroll_into_view_centered(&mut self, node: NodeId) {
        self.centered_on = Some(node);
    }
}

/// How the panel position was decided on attach
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// A stored offset from the previous page was applied
    Restored(f64),
    /// No stored offset; the active entry was scrolled into view
    CenteredOn(NodeId),
    /// Nothing to restore and nothing active
    Unchanged,
}

/// Effect of a click inside the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClickOutcome {
    /// Offset recorded for the next page load
    pub recorded_scroll: Option<f64>,
    /// New expanded state of a toggled section
    pub toggled: Option<bool>,
}

/// Renders a fixed navigation tree and layers per-page state on top of it
#[derive(Debug, Clone)]
pub struct SidebarNavigator {
    tree: NavigationTree,
    config: SidebarConfig,
}

impl Default for SidebarNavigator {
    fn default() -> Self {
        Self::book()
    }
}

impl SidebarNavigator {
    pub fn new(tree: NavigationTree, config: SidebarConfig) -> Self {
        Self { tree, config }
    }

    /// Navigator over the compiled-in book tree with default settings
    pub fn book() -> Self {
        Self::new(NavigationTree::book(), SidebarConfig::default())
    }

    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    /// Render the sidebar for `page`, mark the active entry and position the panel.
    ///
    /// A stored scroll offset is consumed: it is removed from `store` whether
    /// or not it could be used.
    pub fn attach<S, P>(&self, page: &PageContext, store: &mut S, panel: &mut P) -> Sidebar
    where
        S: SessionStore + ?Sized,
        P: ScrollPanel + ?Sized,
    {
        let mut document = Document::new(SCROLLBOX_TAG);
        let root = document.root();
        let rendered = render_tree(&mut document, root, &self.tree, &self.config, &page.path_to_root);

        let address = page
            .location
            .as_deref()
            .and_then(|location| PageAddress::parse(location, &self.config.index_page));

        let active = address
            .as_ref()
            .and_then(|address| find_active(&document, &rendered.links, address, &page.path_to_root));

        match active {
            Some(link) => {
                log::debug!(
                    "Active entry: {}",
                    document.attr(link, "href").unwrap_or_default()
                );
                mark_active(&mut document, link);
            }
            None => log::debug!("No sidebar entry matches {:?}", page.location),
        }

        let scroll = match take_scroll(store, &self.config.storage_key) {
            Some(offset) => {
                panel.set_scroll_top(offset);
                ScrollOutcome::Restored(offset)
            }
            None => match active {
                Some(link) => {
                    panel.scroll_into_view_centered(link);
                    ScrollOutcome::CenteredOn(link)
                }
                None => ScrollOutcome::Unchanged,
            },
        };
        log::debug!("Sidebar scroll: {:?}", scroll);

        Sidebar {
            document,
            rendered,
            active,
            scroll,
            storage_key: self.config.storage_key.clone(),
        }
    }
}

/// First link pointing at the current page.
///
/// At the book root the index page stands in for the first chapter.
fn find_active(
    document: &Document,
    links: &[NodeId],
    address: &PageAddress,
    path_to_root: &str,
) -> Option<NodeId> {
    links.iter().enumerate().find_map(|(i, &link)| {
        let aliases_first = i == 0 && path_to_root.is_empty() && address.is_index();
        let matches = document
            .attr(link, "href")
            .is_some_and(|href| address.matches(href));
        (matches || aliases_first).then_some(link)
    })
}

/// Flag `link` active and expand the chapter items leading to it.
///
/// The link's own item is expanded when it is a chapter item; then at every
/// `li` on the way up, a chapter item immediately preceding it is expanded.
fn mark_active(document: &mut Document, link: NodeId) {
    document.add_class(link, "active");

    let mut parent = document.parent(link);
    if let Some(item) = parent {
        if document.has_class(item, "chapter-item") {
            document.add_class(item, "expanded");
        }
    }

    while let Some(node) = parent {
        if document.tag_name(node) == Some("li") {
            if let Some(previous) = document.previous_element_sibling(node) {
                if document.has_class(previous, "chapter-item") {
                    document.add_class(previous, "expanded");
                }
            }
        }
        parent = document.parent(node);
    }
}

/// A sidebar attached to one page load
#[derive(Debug, Clone)]
pub struct Sidebar {
    document: Document,
    rendered: RenderedSidebar,
    active: Option<NodeId>,
    scroll: ScrollOutcome,
    storage_key: String,
}

impl Sidebar {
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Rendered markup of the container's content
    pub fn html(&self) -> String {
        self.document.inner_html(self.document.root())
    }

    pub fn links(&self) -> &[NodeId] {
        &self.rendered.links
    }

    pub fn toggles(&self) -> &[NodeId] {
        &self.rendered.toggles
    }

    pub fn chapter_items(&self) -> &[NodeId] {
        &self.rendered.chapter_items
    }

    /// The link marked active, if any page matched
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn active_href(&self) -> Option<&str> {
        self.active.and_then(|link| self.document.attr(link, "href"))
    }

    pub fn scroll_outcome(&self) -> ScrollOutcome {
        self.scroll
    }

    pub fn is_expanded(&self, item: NodeId) -> bool {
        self.document.has_class(item, "expanded")
    }

    /// Chapter items currently expanded, in tree order
    pub fn expanded_items(&self) -> Vec<NodeId> {
        self.rendered
            .chapter_items
            .iter()
            .copied()
            .filter(|&item| self.is_expanded(item))
            .collect()
    }

    /// Label of a chapter item without its section number
    pub fn label(&self, item: NodeId) -> Option<String> {
        let host = *self.document.children(item).first()?;
        let mut text = self.document.text_content(host);
        if let Some(&first) = self.document.children(host).first() {
            if self.document.tag_name(first) == Some("strong") {
                let number = self.document.text_content(first);
                text = text.strip_prefix(number.as_str()).unwrap_or(&text).to_string();
            }
        }
        Some(text.trim().to_string())
    }

    /// Chapter item whose label is `label`
    pub fn find_item(&self, label: &str) -> Option<NodeId> {
        self.rendered
            .chapter_items
            .iter()
            .copied()
            .find(|&item| self.label(item).as_deref() == Some(label))
    }

    /// Link whose (rewritten) target is exactly `href`
    pub fn find_link(&self, href: &str) -> Option<NodeId> {
        self.rendered
            .links
            .iter()
            .copied()
            .find(|&link| self.document.attr(link, "href") == Some(href))
    }

    /// Handle a click on `target`.
    ///
    /// Clicking a link remembers the panel offset for the next page load;
    /// clicking inside a toggle flips its section.
    pub fn handle_click<S, P>(&mut self, target: NodeId, store: &mut S, panel: &P) -> ClickOutcome
    where
        S: SessionStore + ?Sized,
        P: ScrollPanel + ?Sized,
    {
        let mut outcome = ClickOutcome::default();

        if self.document.tag_name(target) == Some("a") {
            let offset = panel.scroll_top();
            record_scroll(store, &self.storage_key, offset);
            outcome.recorded_scroll = Some(offset);
        }

        let toggle = self
            .document
            .closest(target, |doc, id| doc.tag_name(id) == Some("a") && doc.has_class(id, "toggle"));
        if let Some(toggle) = toggle {
            outcome.toggled = self.toggle_section(toggle);
        }

        outcome
    }

    /// Flip the section a toggle control belongs to.
    ///
    /// Returns the new expanded state, or `None` if `toggle` is not one of
    /// this sidebar's toggles.
    pub fn toggle_section(&mut self, toggle: NodeId) -> Option<bool> {
        if !self.rendered.toggles.contains(&toggle) {
            return None;
        }
        let section = self.document.parent(toggle)?;
        let expanded = self.document.toggle_class(section, "expanded");
        log::trace!("Section toggled, expanded = {}", expanded);
        Some(expanded)
    }
}
