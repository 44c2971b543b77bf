//! Object-name classification.
//!
//! Two independent questions are answered for every object-typed node,
//! from its owning name alone:
//!
//! 1. Does it count toward one of the six tracked resource categories
//!    (exact match, or broad substring match with exclusions)?
//! 2. If not, is it worth reporting in the open-ended constructor
//!    breakdown, and if so is it a known three.js class or presumed
//!    application code?
//!
//! The classifier is a plain value holding prebuilt lookup sets; the
//! operator denylist path is injected at construction, never read from
//! a global.

mod denylist;
mod tables;

pub use denylist::load_manual_excludes;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The six tracked resource categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Geometry,
    Material,
    Texture,
    RenderTarget,
    Mesh,
    Group,
}

impl ResourceKind {
    /// All kinds, in report order.
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Geometry,
        ResourceKind::Material,
        ResourceKind::Texture,
        ResourceKind::RenderTarget,
        ResourceKind::Mesh,
        ResourceKind::Group,
    ];

    /// Human-readable label for logs and warnings.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Geometry => "Geometry",
            ResourceKind::Material => "Material",
            ResourceKind::Texture => "Texture",
            ResourceKind::RenderTarget => "RenderTarget",
            ResourceKind::Mesh => "Mesh",
            ResourceKind::Group => "Group",
        }
    }
}

/// Constructor-report bucket for a relevant instance name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Known three.js class.
    ThreeJs,
    /// Presumed application-defined class.
    Game,
}

/// Outcome of classifying one owning name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Counts toward a tracked resource category. Resource-matched
    /// names are deliberately kept out of the constructor report.
    Resource(ResourceKind),
    /// Reported in the open-ended constructor breakdown.
    Constructor(Bucket),
    /// Engine-internal, built-in, or operator-excluded name.
    Ignored,
}

/// Names that map to a resource kind only when matched exactly.
const EXACT_RESOURCE_TYPES: &[(&str, ResourceKind)] = &[
    ("BufferGeometry", ResourceKind::Geometry),
    ("Mesh", ResourceKind::Mesh),
    ("Group", ResourceKind::Group),
];

/// Base types matched as substrings, with exclusion substrings that
/// veto the match ("MaterialLoader" is not a material). Order matters
/// for tie-breaks; first match wins.
const BROAD_RESOURCE_TYPES: &[(&str, ResourceKind, &[&str])] = &[
    ("Material", ResourceKind::Material, &["Loader", "Definition", "Creator"]),
    ("Texture", ResourceKind::Texture, &["Loader", "Encoding"]),
    ("WebGLRenderTarget", ResourceKind::RenderTarget, &[]),
];

/// Name classifier with all lookup tables prebuilt.
pub struct Classifier {
    known_threejs: HashSet<&'static str>,
    builtin_excludes: HashSet<&'static str>,
    manual_excludes: HashSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    /// Creates a classifier with the fixed tables and no operator
    /// denylist.
    pub fn new() -> Self {
        let builtin_excludes = tables::ALL_EXCLUDE_TABLES
            .iter()
            .flat_map(|table| table.iter().copied())
            .collect();
        Self {
            known_threejs: tables::KNOWN_THREEJS_TYPES.iter().copied().collect(),
            builtin_excludes,
            manual_excludes: HashSet::new(),
        }
    }

    /// Creates a classifier that additionally excludes the names listed
    /// in the operator denylist file at `path`.
    pub fn with_denylist(path: &Path) -> Self {
        let mut classifier = Self::new();
        classifier.manual_excludes = load_manual_excludes(path);
        classifier
    }

    /// Classifies an owning name.
    pub fn classify(&self, name: &str) -> Classification {
        if let Some(kind) = self.resource_kind(name) {
            return Classification::Resource(kind);
        }
        match self.constructor_bucket(name) {
            Some(bucket) => Classification::Constructor(bucket),
            None => Classification::Ignored,
        }
    }

    /// Maps a name to its tracked resource category, if any.
    pub fn resource_kind(&self, name: &str) -> Option<ResourceKind> {
        for &(exact, kind) in EXACT_RESOURCE_TYPES {
            if name == exact {
                return Some(kind);
            }
        }
        for &(base, kind, exclusions) in BROAD_RESOURCE_TYPES {
            if name.contains(base) && !exclusions.iter().any(|ex| name.contains(ex)) {
                return Some(kind);
            }
        }
        None
    }

    /// Decides whether `name` belongs in the constructor report, and in
    /// which bucket. Callers counting resources use [`classify`], which
    /// keeps resource-matched names out of this path.
    ///
    /// [`classify`]: Classifier::classify
    fn constructor_bucket(&self, name: &str) -> Option<Bucket> {
        if self.is_excluded(name) {
            return None;
        }
        if self.known_threejs.contains(name) {
            Some(Bucket::ThreeJs)
        } else {
            Some(Bucket::Game)
        }
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.builtin_excludes.contains(name)
            // Synthetic engine node names: "(compiled code)", "system / Context", "v8::...".
            || name.starts_with('(')
            || name.starts_with("system /")
            || name.starts_with("v8")
            // Single- and two-character names are noise; "_" falls through
            // to the fixed tables, which exclude it anyway.
            || (name.chars().count() <= 2 && name != "_")
            || self.manual_excludes.contains(name)
            || name.contains(' ')
            || name.contains('/')
    }
}
