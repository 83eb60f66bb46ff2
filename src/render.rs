//! Builds sidebar markup from a navigation tree
//!
//! The produced structure is the one book themes style against:
//!
//! ```text
//! ol.chapter
//!   li.chapter-item[.expanded]   a[href] | div, optional a.toggle
//!   li                           ol.section (children of the item above)
//!   li.part-title
//!   li.spacer
//! ```

use crate::config::SidebarConfig;
use crate::dom::{Document, NodeId};
use crate::links::rewrite_href;
use crate::tree::{EntryKind, NavigationEntry, NavigationTree, SectionNumber};

/// Glyph shown inside section toggles
pub const TOGGLE_GLYPH: &str = "\u{2771}";

/// Handles to the interesting nodes of a freshly rendered sidebar
#[derive(Debug, Clone, Default)]
pub struct RenderedSidebar {
    /// Top-level `ol.chapter`
    pub list: Option<NodeId>,
    /// Every `li.chapter-item`, in tree order
    pub chapter_items: Vec<NodeId>,
    /// Navigable `a[href]` elements, in tree order
    pub links: Vec<NodeId>,
    /// `a.toggle` controls, in tree order
    pub toggles: Vec<NodeId>,
}

struct Renderer<'a> {
    doc: &'a mut Document,
    config: &'a SidebarConfig,
    path_to_root: &'a str,
    out: RenderedSidebar,
}

/// Replace the content of `container` with the rendered tree.
///
/// Link targets are rewritten with `path_to_root` from the pristine tree,
/// so rendering twice with the same prefix yields identical markup.
pub fn render_tree(
    doc: &mut Document,
    container: NodeId,
    tree: &NavigationTree,
    config: &SidebarConfig,
    path_to_root: &str,
) -> RenderedSidebar {
    doc.clear_children(container);

    let mut renderer = Renderer {
        doc,
        config,
        path_to_root,
        out: RenderedSidebar::default(),
    };
    let numbering = config.numbered.then(SectionNumber::default);
    let list = renderer.render_list(container, tree.entries(), 0, numbering.as_ref());
    renderer.out.list = Some(list);

    log::trace!(
        "Rendered {} chapter items, {} links, {} toggles",
        renderer.out.chapter_items.len(),
        renderer.out.links.len(),
        renderer.out.toggles.len()
    );
    renderer.out
}

impl Renderer<'_> {
    fn starts_expanded(&self, depth: usize) -> bool {
        !self.config.fold.enable || depth < self.config.fold.level
    }

    fn render_list(
        &mut self,
        parent: NodeId,
        entries: &[NavigationEntry],
        depth: usize,
        numbering: Option<&SectionNumber>,
    ) -> NodeId {
        let list = self.doc.create_element(parent, "ol");
        self.doc
            .add_class(list, if depth == 0 { "chapter" } else { "section" });

        let mut counter = 0;
        for entry in entries {
            match entry.kind {
                EntryKind::Separator => {
                    let item = self.doc.create_element(list, "li");
                    self.doc.add_class(item, "spacer");
                }
                EntryKind::PartTitle => {
                    let item = self.doc.create_element(list, "li");
                    self.doc.add_class(item, "part-title");
                    self.doc.append_text(item, &entry.label);
                }
                EntryKind::Chapter => {
                    let number = match numbering {
                        Some(prefix) if entry.numbered => {
                            counter += 1;
                            Some(prefix.child(counter))
                        }
                        _ => None,
                    };
                    self.render_chapter(list, entry, depth, number);
                }
            }
        }
        list
    }

    fn render_chapter(
        &mut self,
        list: NodeId,
        entry: &NavigationEntry,
        depth: usize,
        number: Option<SectionNumber>,
    ) {
        let item = self.doc.create_element(list, "li");
        self.doc.add_class(item, "chapter-item");
        if self.starts_expanded(depth) {
            self.doc.add_class(item, "expanded");
        }

        let label_host = match &entry.path {
            Some(path) => {
                let link = self.doc.create_element(item, "a");
                self.doc
                    .set_attr(link, "href", &rewrite_href(self.path_to_root, path));
                self.out.links.push(link);
                link
            }
            None => self.doc.create_element(item, "div"),
        };

        match &number {
            Some(number) => {
                let strong = self.doc.create_element(label_host, "strong");
                self.doc.set_attr(strong, "aria-hidden", "true");
                self.doc.append_text(strong, &number.to_string());
                self.doc.append_text(label_host, &format!(" {}", entry.label));
            }
            None => {
                self.doc.append_text(label_host, &entry.label);
            }
        }

        if self.config.fold.enable && entry.has_children() {
            let toggle = self.doc.create_element(item, "a");
            self.doc.add_class(toggle, "toggle");
            let glyph = self.doc.create_element(toggle, "div");
            self.doc.append_text(glyph, TOGGLE_GLYPH);
            self.out.toggles.push(toggle);
        }

        self.out.chapter_items.push(item);

        if entry.has_children() {
            let wrapper = self.doc.create_element(list, "li");
            self.render_list(wrapper, &entry.children, depth + 1, number.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_tree() -> NavigationTree {
        NavigationTree::new(vec![
            NavigationEntry::link("Introduction", "intro.html").unnumbered(),
            NavigationEntry::header("Mesh").with_children([
                NavigationEntry::link("Parts", "parts.html"),
                NavigationEntry::link("Properties", "properties.html"),
            ]),
            NavigationEntry::separator(),
            NavigationEntry::part_title("Extras"),
            NavigationEntry::link("External", "https://example.com/"),
            NavigationEntry::link("Anchor", "#top"),
        ])
    }

    fn render(config: &SidebarConfig, path_to_root: &str) -> (Document, RenderedSidebar) {
        let mut doc = Document::new("sidebar-scrollbox");
        let root = doc.root();
        let rendered = render_tree(&mut doc, root, &small_tree(), config, path_to_root);
        (doc, rendered)
    }

    #[test]
    fn test_markup_structure() {
        let (doc, rendered) = render(&SidebarConfig::default(), "");
        assert_eq!(
            doc.inner_html(doc.root()),
            concat!(
                "<ol class=\"chapter\">",
                "<li class=\"chapter-item expanded\"><a href=\"intro.html\">Introduction</a></li>",
                "<li class=\"chapter-item expanded\"><div><strong aria-hidden=\"true\">1.</strong> Mesh</div></li>",
                "<li><ol class=\"section\">",
                "<li class=\"chapter-item expanded\"><a href=\"parts.html\"><strong aria-hidden=\"true\">1.1.</strong> Parts</a></li>",
                "<li class=\"chapter-item expanded\"><a href=\"properties.html\"><strong aria-hidden=\"true\">1.2.</strong> Properties</a></li>",
                "</ol></li>",
                "<li class=\"spacer\"></li>",
                "<li class=\"part-title\">Extras</li>",
                "<li class=\"chapter-item expanded\"><a href=\"https://example.com/\"><strong aria-hidden=\"true\">2.</strong> External</a></li>",
                "<li class=\"chapter-item expanded\"><a href=\"#top\"><strong aria-hidden=\"true\">3.</strong> Anchor</a></li>",
                "</ol>"
            )
        );
        assert_eq!(rendered.links.len(), 5);
        assert_eq!(rendered.chapter_items.len(), 6);
        assert!(rendered.toggles.is_empty());
    }

    #[test]
    fn test_path_to_root_prefixes_relative_links_only() {
        let (doc, rendered) = render(&SidebarConfig::default(), "../../");
        let hrefs: Vec<_> = rendered
            .links
            .iter()
            .map(|&link| doc.attr(link, "href").unwrap().to_string())
            .collect();
        assert_eq!(
            hrefs,
            vec![
                "../../intro.html",
                "../../parts.html",
                "../../properties.html",
                "https://example.com/",
                "#top",
            ]
        );
    }

    #[test]
    fn test_rerender_is_identical() {
        let config = SidebarConfig::default();
        let tree = small_tree();
        let mut doc = Document::new("nav");
        let root = doc.root();
        render_tree(&mut doc, root, &tree, &config, "../");
        let first = doc.inner_html(root);
        render_tree(&mut doc, root, &tree, &config, "../");
        assert_eq!(doc.inner_html(root), first);
    }

    #[test]
    fn test_folding_adds_toggles_and_collapses() {
        let config = SidebarConfig::default().with_folding(0);
        let (doc, rendered) = render(&config, "");
        assert_eq!(rendered.toggles.len(), 1);
        let toggle = rendered.toggles[0];
        assert_eq!(doc.text_content(toggle), TOGGLE_GLYPH);
        let mesh_item = doc.parent(toggle).unwrap();
        assert!(doc.has_class(mesh_item, "chapter-item"));
        assert!(rendered
            .chapter_items
            .iter()
            .all(|&item| !doc.has_class(item, "expanded")));
    }

    #[test]
    fn test_fold_level_expands_shallow_items() {
        let config = SidebarConfig::default().with_folding(1);
        let (doc, rendered) = render(&config, "");
        let expanded: Vec<_> = rendered
            .chapter_items
            .iter()
            .filter(|&&item| doc.has_class(item, "expanded"))
            .map(|&item| doc.text_content(item))
            .collect();
        assert_eq!(expanded, vec!["Introduction", "1. Mesh\u{2771}", "2. External", "3. Anchor"]);
    }

    #[test]
    fn test_numbering_disabled() {
        let config = SidebarConfig {
            numbered: false,
            ..SidebarConfig::default()
        };
        let (doc, _) = render(&config, "");
        assert!(doc.elements_by_tag(doc.root(), "strong").is_empty());
    }

    #[test]
    fn test_unnumbered_parent_leaves_children_unnumbered() {
        let tree = NavigationTree::new(vec![NavigationEntry::link("Appendix", "appendix.html")
            .unnumbered()
            .with_child(NavigationEntry::link("Glossary", "glossary.html"))]);
        let mut doc = Document::new("nav");
        let root = doc.root();
        render_tree(&mut doc, root, &tree, &SidebarConfig::default(), "");
        assert!(doc.elements_by_tag(root, "strong").is_empty());
    }
}
