//! Navigation tree - the table of contents shown in the sidebar

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{SidebarError, SidebarResult};

/// Kind of row an entry renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// A chapter, navigable when it has a path, a section header otherwise
    #[default]
    Chapter,
    /// Heading row between groups of chapters
    PartTitle,
    /// Empty spacer row
    Separator,
}

fn default_numbered() -> bool {
    true
}

fn is_chapter(kind: &EntryKind) -> bool {
    *kind == EntryKind::Chapter
}

fn is_true(value: &bool) -> bool {
    *value
}

/// One node of the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Link target relative to the book root; `None` for section headers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Nested entries, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationEntry>,
    #[serde(default, skip_serializing_if = "is_chapter")]
    pub kind: EntryKind,
    /// Whether the entry takes part in section numbering
    #[serde(default = "default_numbered", skip_serializing_if = "is_true")]
    pub numbered: bool,
}

impl NavigationEntry {
    /// A navigable chapter
    pub fn link(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: Some(path.to_string()),
            children: Vec::new(),
            kind: EntryKind::Chapter,
            numbered: true,
        }
    }

    /// A non-navigable section header
    pub fn header(label: &str) -> Self {
        Self {
            label: label.to_string(),
            path: None,
            children: Vec::new(),
            kind: EntryKind::Chapter,
            numbered: true,
        }
    }

    pub fn part_title(label: &str) -> Self {
        Self {
            label: label.to_string(),
            path: None,
            children: Vec::new(),
            kind: EntryKind::PartTitle,
            numbered: false,
        }
    }

    pub fn separator() -> Self {
        Self {
            label: String::new(),
            path: None,
            children: Vec::new(),
            kind: EntryKind::Separator,
            numbered: false,
        }
    }

    /// Exclude this entry from section numbering (prefix and suffix chapters)
    pub fn unnumbered(mut self) -> Self {
        self.numbered = false;
        self
    }

    pub fn with_child(mut self, child: NavigationEntry) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NavigationEntry>) -> Self {
        self.children.extend(children);
        self
    }

    /// True for chapters that carry a link target
    pub fn is_navigable(&self) -> bool {
        self.kind == EntryKind::Chapter && self.path.is_some()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn validate(&self, trail: &str) -> SidebarResult<()> {
        match self.kind {
            EntryKind::Chapter | EntryKind::PartTitle if self.label.trim().is_empty() => {
                return Err(SidebarError::InvalidTree(format!(
                    "entry {trail} has an empty label"
                )));
            }
            EntryKind::PartTitle | EntryKind::Separator
                if self.path.is_some() || self.has_children() =>
            {
                return Err(SidebarError::InvalidTree(format!(
                    "entry {trail} is a {:?} and cannot have a path or children",
                    self.kind
                )));
            }
            _ => {}
        }

        if let Some(path) = &self.path {
            if path.trim().is_empty() {
                return Err(SidebarError::InvalidTree(format!(
                    "entry {trail} ('{}') has an empty path",
                    self.label
                )));
            }
        }

        for (i, child) in self.children.iter().enumerate() {
            child.validate(&format!("{trail}.{}", i + 1))?;
        }
        Ok(())
    }
}

/// Dotted chapter number such as `2.1.`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionNumber(Vec<u32>);

impl SectionNumber {
    /// Number of the `index`-th (1-based) numbered child below this one
    pub fn child(&self, index: u32) -> Self {
        let mut parts = self.0.clone();
        parts.push(index);
        Self(parts)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.0 {
            write!(f, "{part}.")?;
        }
        Ok(())
    }
}

/// Ordered forest of navigation entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationTree {
    entries: Vec<NavigationEntry>,
}

impl NavigationTree {
    pub fn new(entries: Vec<NavigationEntry>) -> Self {
        Self { entries }
    }

    /// Parse and validate a tree from its JSON form
    pub fn from_json(json: &str) -> SidebarResult<Self> {
        let tree: NavigationTree = serde_json::from_str(json)?;
        tree.validate()?;
        Ok(tree)
    }

    pub fn from_file(path: impl AsRef<Path>) -> SidebarResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> SidebarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SidebarResult<()> {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.validate(&(i + 1).to_string())?;
        }
        Ok(())
    }

    /// Top-level entries
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in tree order, paired with their depth (0 for top level)
    pub fn walk(&self) -> Vec<(usize, &NavigationEntry)> {
        fn visit<'a>(
            entries: &'a [NavigationEntry],
            depth: usize,
            out: &mut Vec<(usize, &'a NavigationEntry)>,
        ) {
            for entry in entries {
                out.push((depth, entry));
                visit(&entry.children, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        visit(&self.entries, 0, &mut out);
        out
    }

    /// Total number of entries at every depth
    pub fn len(&self) -> usize {
        self.walk().len()
    }

    /// First entry (in tree order) linking to `path`
    pub fn find_by_path(&self, path: &str) -> Option<&NavigationEntry> {
        self.walk()
            .into_iter()
            .map(|(_, entry)| entry)
            .find(|entry| entry.path.as_deref() == Some(path))
    }

    /// The table of contents of the mesh library book
    pub fn book() -> Self {
        let link = NavigationEntry::link;
        Self::new(vec![
            link("Introduction", "intro.html"),
            link("Definitions", "start.html").with_child(
                link("Mesh", "mesh.html").with_children([
                    link("Parts", "parts.html"),
                    link("Properties", "properties.html"),
                    link("Attributes", "attributes.html"),
                    link("Query", "query.html"),
                    link("Statistics", "statistics.html"),
                ]),
            ),
            link("Import", "import.html").with_children([
                link("STL", "stl.html"),
                link("PLY", "ply.html"),
                link("OBJ", "obj.html"),
            ]),
            link("Visualization", "visualization.html")
                .with_child(link("Options", "options.html")),
            link("Mesh manipulation", "mesh_manipul.html").with_children([
                link("Basic Geometries", "basic_geometries.html"),
                link("Parametric Geometric Objects", "parametric_geometric_objects.html"),
                link("Explicit Structured Grid", "explicit_structured_grid.html"),
                link("Structured Surface", "structured_surface.html"),
                link("Triangulated Surface", "triangulated_surface.html"),
                link("Platonic Solids", "platonic_solids.html"),
                link("Point Cloud", "point_cloud.html"),
            ]),
            link("Mesh filtering", "mesh_filtering.html").with_children([
                link("Boolean Operations", "boolean_operations.html"),
                link("Extract Cell Centers", "extract_cell_centers.html"),
                link("Clipping with a Surface, plane and boxes", "clipping.html"),
                link("Collision Detection", "collision_detection.html"),
                link("Volumetric Analysis", "volumetric_analysis.html"),
                link("Find and label connected regions", "connected_regions.html"),
                link("Decimate a mesh", "decimate_mesh.html"),
                link("Extract Edges", "extract_edges.html"),
                link("Extract Surface", "extract_surface.html"),
                link("Gaussian Smoothing", "gaussian_smoothing.html"),
                link("Geodesic Paths", "geodesic_paths.html"),
                link("Interpolating", "interpolating.html"),
                link("Computing Mesh Quality", "mesh_quality.html"),
                link("Resampling", "resampling.html"),
                link("Surface Smoothing", "surface_smoothing.html"),
                link("Surface Reconstruction", "surface_reconstruction.html"),
                link("Voxelize a Surface Mesh", "voxelize_mesh.html"),
                link("Subdivide Cells", "subdivide_cells.html"),
            ]),
            link("Geometric quantities", "quantities.html").with_children([
                link("Laplacian smoothing", "laplacian_smoothing.html"),
                link("Gaussian Curvature", "curvature.html"),
                link("Gradient", "gradient.html"),
            ]),
            link("Ray tracing", "ray_tracing.html").with_children([
                link("Ray Casting", "ray_casting.html"),
                link("Ray Tracing", "ray_tracing.html"),
            ]),
            link("Visualize the Moeller-Trumbore Algorithm", "moeller_trumbore.html"),
            link("Tesselate", "tesselate.html"),
            link("Auxiliary Tools and Structures", "auxiliary.html").with_children([
                link("KDTree", "kdtree.html"),
                link("BSP Tree", "bsptree.html"),
            ]),
            link("Contributing", "CONTRIBUTING.html"),
            link("License", "LICENSE.html"),
        ])
    }
}
