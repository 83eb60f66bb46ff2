use book_sidebar::links::{is_absolute, is_fragment};
use book_sidebar::prelude::*;
use book_sidebar::store::record_scroll;

const BOOK: &str = "https://docs.example.com/mesh-book/";

fn attach(navigator: &SidebarNavigator, page: &PageContext, store: &mut MemoryStore) -> (Sidebar, PanelState) {
    let mut panel = PanelState::default();
    let sidebar = navigator.attach(page, store, &mut panel);
    (sidebar, panel)
}

fn active_count(sidebar: &Sidebar) -> usize {
    let doc = sidebar.document();
    doc.elements_by_class(doc.root(), "active").len()
}

#[test]
fn every_book_page_highlights_its_first_link() {
    let navigator = SidebarNavigator::book();

    for (_, entry) in navigator.tree().walk() {
        let path = entry.path.as_deref().unwrap();
        let page = PageContext::new(&format!("{BOOK}{path}"), "");
        let (sidebar, _) = attach(&navigator, &page, &mut MemoryStore::new());

        assert_eq!(active_count(&sidebar), 1, "page {path}");
        // Duplicated targets resolve to the first link in tree order.
        let first = sidebar.find_link(path).unwrap();
        assert_eq!(sidebar.active(), Some(first), "page {path}");
    }
}

#[test]
fn directory_address_behaves_like_index_page() {
    let tree = NavigationTree::new(vec![
        NavigationEntry::link("Overview", "overview.html"),
        NavigationEntry::link("Guide", "guide/index.html")
            .with_child(NavigationEntry::link("Setup", "guide/setup.html")),
    ]);
    let navigator = SidebarNavigator::new(tree, SidebarConfig::default().with_folding(0));

    let with_slash = PageContext::new(&format!("{BOOK}guide/"), "../");
    let with_index = PageContext::new(&format!("{BOOK}guide/index.html"), "../");

    let (a, _) = attach(&navigator, &with_slash, &mut MemoryStore::new());
    let (b, _) = attach(&navigator, &with_index, &mut MemoryStore::new());

    assert_eq!(a.active_href(), Some("../guide/index.html"));
    assert_eq!(a.html(), b.html());
}

#[test]
fn root_index_page_highlights_first_chapter() {
    let navigator = SidebarNavigator::book();
    let (sidebar, panel) = attach(&navigator, &PageContext::new(BOOK, ""), &mut MemoryStore::new());
    assert_eq!(sidebar.active_href(), Some("intro.html"));
    assert_eq!(panel.centered_on, sidebar.active());
}

#[test]
fn links_gain_root_prefix_exactly_once() {
    let tree = NavigationTree::new(vec![
        NavigationEntry::link("Intro", "intro.html"),
        NavigationEntry::link("Repository", "https://github.com/example/mesh"),
        NavigationEntry::link("CDN", "//cdn.example.com/viewer.html"),
        NavigationEntry::link("Top", "#top"),
        NavigationEntry::link("Nested", "guide/setup.html"),
    ]);
    let navigator = SidebarNavigator::new(tree.clone(), SidebarConfig::default());
    let page = PageContext::new(&format!("{BOOK}a/b/page.html"), "../../");

    let (first, _) = attach(&navigator, &page, &mut MemoryStore::new());
    let (second, _) = attach(&navigator, &page, &mut MemoryStore::new());
    assert_eq!(first.html(), second.html());

    let doc = first.document();
    for ((_, entry), &link) in tree.walk().iter().zip(first.links()) {
        let target = entry.path.as_deref().unwrap();
        let href = doc.attr(link, "href").unwrap();
        if is_fragment(target) || is_absolute(target) {
            assert_eq!(href, target);
        } else {
            assert_eq!(href, format!("../../{target}"));
        }
    }
}

#[test]
fn mesh_properties_scenario() {
    let navigator = SidebarNavigator::new(NavigationTree::book(), SidebarConfig::default().with_folding(0));
    let page = PageContext::new(&format!("{BOOK}properties.html"), "");
    let (sidebar, _) = attach(&navigator, &page, &mut MemoryStore::new());

    let properties = sidebar.find_item("Properties").unwrap();
    let mesh = sidebar.find_item("Mesh").unwrap();
    assert!(sidebar.document().has_class(sidebar.active().unwrap(), "active"));
    assert_eq!(sidebar.document().parent(sidebar.active().unwrap()), Some(properties));
    assert!(sidebar.is_expanded(mesh));
    assert!(sidebar.is_expanded(sidebar.find_item("Definitions").unwrap()));

    // Unrelated chapters keep their collapsed default.
    for label in ["Introduction", "Import", "Query", "Statistics"] {
        assert!(!sidebar.is_expanded(sidebar.find_item(label).unwrap()), "{label}");
    }
}

#[test]
fn unmatched_page_without_stored_scroll_does_nothing() {
    let navigator = SidebarNavigator::new(NavigationTree::book(), SidebarConfig::default().with_folding(0));
    let page = PageContext::new(&format!("{BOOK}print.html"), "");
    let (sidebar, panel) = attach(&navigator, &page, &mut MemoryStore::new());

    assert_eq!(active_count(&sidebar), 0);
    assert!(sidebar.expanded_items().is_empty());
    assert_eq!(panel.centered_on, None);
    assert_eq!(sidebar.scroll_outcome(), ScrollOutcome::Unchanged);
}

#[test]
fn scroll_offset_survives_exactly_one_navigation() {
    let navigator = SidebarNavigator::book();
    let mut store = MemoryStore::new();

    // Click a link while the panel sits at 200.
    let (mut first, _) = attach(&navigator, &PageContext::new(&format!("{BOOK}intro.html"), ""), &mut store);
    let panel = PanelState {
        scroll_top: 200.0,
        centered_on: None,
    };
    let target = first.find_link("kdtree.html").unwrap();
    first.handle_click(target, &mut store, &panel);

    let (second, second_panel) = attach(&navigator, &PageContext::new(&format!("{BOOK}kdtree.html"), ""), &mut store);
    assert_eq!(second.scroll_outcome(), ScrollOutcome::Restored(200.0));
    assert_eq!(second_panel.scroll_top, 200.0);
    assert_eq!(second_panel.centered_on, None);

    // Arriving via next/previous buttons: nothing stored, centre on the page.
    let (third, third_panel) = attach(&navigator, &PageContext::new(&format!("{BOOK}bsptree.html"), ""), &mut store);
    assert_eq!(third.scroll_outcome(), ScrollOutcome::CenteredOn(third.active().unwrap()));
    assert_eq!(third_panel.scroll_top, 0.0);
}

#[test]
fn custom_storage_key_is_honoured() {
    let config = SidebarConfig {
        storage_key: "mesh-book-scroll".to_string(),
        ..SidebarConfig::default()
    };
    let navigator = SidebarNavigator::new(NavigationTree::book(), config);
    let mut store = MemoryStore::new();
    record_scroll(&mut store, "sidebar-scroll", 50.0);
    record_scroll(&mut store, "mesh-book-scroll", 80.0);

    let (sidebar, _) = attach(&navigator, &PageContext::new(&format!("{BOOK}stl.html"), ""), &mut store);
    assert_eq!(sidebar.scroll_outcome(), ScrollOutcome::Restored(80.0));
    assert_eq!(store.get_item("sidebar-scroll").as_deref(), Some("50"));
}

#[test]
fn tree_loaded_from_json_drives_the_sidebar() {
    let tree = NavigationTree::from_json(
        r#"[
            {"label": "Preface", "path": "preface.html", "numbered": false},
            {"label": "Reference", "kind": "part-title"},
            {"label": "Shapes", "children": [
                {"label": "Cube", "path": "shapes/cube.html"},
                {"label": "Torus", "path": "shapes/torus.html"}
            ]},
            {"kind": "separator"},
            {"label": "License", "path": "LICENSE.html", "numbered": false}
        ]"#,
    )
    .unwrap();
    let navigator = SidebarNavigator::new(tree, SidebarConfig::default().with_folding(0));
    let page = PageContext::new(&format!("{BOOK}shapes/torus.html"), "../");
    let (sidebar, _) = attach(&navigator, &page, &mut MemoryStore::new());

    assert_eq!(sidebar.active_href(), Some("../shapes/torus.html"));
    assert!(sidebar.is_expanded(sidebar.find_item("Shapes").unwrap()));
    assert!(sidebar.html().contains("<li class=\"part-title\">Reference</li>"));
    assert!(sidebar.html().contains("<li class=\"spacer\"></li>"));
    assert_eq!(sidebar.toggles().len(), 1);
}
