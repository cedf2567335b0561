//! In-memory CAD document and workspace.

use chrono::{DateTime, Utc};
use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::document::{CadHost, DocumentError, DocumentResult, Handle, NamePolicy};
use crate::geometry::{world_bounds, Bounds, Color, Dimensions, Placement, PrimitiveKind};

/// One solid in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentObject {
    /// Unique object name.
    pub name: String,
    /// Parametric size; fixes the kind.
    pub dimensions: Dimensions,
    /// World placement.
    pub placement: Placement,
    /// Display colour.
    pub color: Color,
    /// World bounds from the last recompute, `None` while the object is touched.
    pub bounds: Option<Bounds>,
}

impl DocumentObject {
    fn new(name: String, kind: PrimitiveKind) -> Self {
        Self {
            name,
            dimensions: default_dimensions(kind),
            placement: Placement::default(),
            color: Color::DEFAULT,
            bounds: None,
        }
    }

    /// Primitive kind.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        self.dimensions.kind()
    }

    /// Returns `true` if the object changed since the last recompute.
    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.bounds.is_none()
    }
}

/// Size a freshly created primitive gets before its geometry is set.
const fn default_dimensions(kind: PrimitiveKind) -> Dimensions {
    match kind {
        PrimitiveKind::Box => Dimensions::cuboid(10.0, 10.0, 10.0),
        PrimitiveKind::Cylinder => Dimensions::cylinder(2.0, 10.0),
    }
}

/// An in-memory CAD document.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    uid: Uuid,
    created: DateTime<Utc>,
    policy: NamePolicy,
    objects: IndexMap<String, DocumentObject>,
    view: Option<Bounds>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new(name: impl Into<String>, policy: NamePolicy) -> Self {
        Self {
            name: name.into(),
            uid: Uuid::new_v4(),
            created: Utc::now(),
            policy,
            objects: IndexMap::new(),
            view: None,
        }
    }

    /// Document name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique document identifier.
    #[must_use]
    pub const fn uid(&self) -> Uuid {
        self.uid
    }

    /// Creation time.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Name collision policy.
    #[must_use]
    pub const fn policy(&self) -> NamePolicy {
        self.policy
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if the document has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &DocumentObject> {
        self.objects.values()
    }

    /// Looks up an object by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocumentObject> {
        self.objects.get(name)
    }

    /// Looks up an object by handle.
    #[must_use]
    pub fn object(&self, handle: Handle) -> Option<&DocumentObject> {
        self.objects.get_index(handle.index()).map(|(_, obj)| obj)
    }

    /// Bounds the view was last fitted to, if the document has been recomputed.
    #[must_use]
    pub const fn view(&self) -> Option<Bounds> {
        self.view
    }

    /// Returns `true` if any object changed since the last recompute.
    #[must_use]
    pub fn needs_recompute(&self) -> bool {
        self.objects.values().any(DocumentObject::is_touched)
    }

    fn object_mut(&mut self, handle: Handle) -> DocumentResult<&mut DocumentObject> {
        self.objects
            .get_index_mut(handle.index())
            .map(|(_, obj)| obj)
            .ok_or_else(|| DocumentError::unknown_handle(handle))
    }

    /// Returns a name derived from `base` that no object uses yet.
    ///
    /// Appends a counter padded to three digits: `PCB001`, `PCB002`, ...
    fn unique_name(&self, base: &str) -> String {
        let mut counter: u32 = 1;
        loop {
            let candidate = format!("{base}{counter:03}");
            if !self.objects.contains_key(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}

impl CadHost for Document {
    fn create_primitive(&mut self, kind: PrimitiveKind, name: &str) -> DocumentResult<Handle> {
        if let Some(index) = self.objects.get_index_of(name) {
            match self.policy {
                NamePolicy::Reuse => {
                    debug!(name, %kind, "Reusing existing object");
                    let obj = self.object_mut(Handle::new(index))?;
                    if obj.kind() != kind {
                        obj.dimensions = default_dimensions(kind);
                    }
                    obj.bounds = None;
                    return Ok(Handle::new(index));
                }
                NamePolicy::Rename => {
                    let renamed = self.unique_name(name);
                    warn!(requested = name, name = %renamed, "Object name taken, renaming");
                    let (index, _) = self
                        .objects
                        .insert_full(renamed.clone(), DocumentObject::new(renamed, kind));
                    return Ok(Handle::new(index));
                }
            }
        }

        debug!(name, %kind, "Creating object");
        let (index, _) = self
            .objects
            .insert_full(name.to_string(), DocumentObject::new(name.to_string(), kind));
        Ok(Handle::new(index))
    }

    fn set_geometry(&mut self, handle: Handle, dimensions: Dimensions) -> DocumentResult<()> {
        let obj = self.object_mut(handle)?;
        if obj.kind() != dimensions.kind() {
            return Err(DocumentError::GeometryMismatch {
                object: obj.name.clone(),
                expected: obj.kind(),
                given: dimensions.kind(),
            });
        }
        obj.dimensions = dimensions;
        obj.bounds = None;
        Ok(())
    }

    fn set_placement(&mut self, handle: Handle, placement: Placement) -> DocumentResult<()> {
        let obj = self.object_mut(handle)?;
        obj.placement = placement;
        obj.bounds = None;
        Ok(())
    }

    fn set_color(&mut self, handle: Handle, color: Color) -> DocumentResult<()> {
        self.object_mut(handle)?.color = color;
        Ok(())
    }

    fn recompute_and_fit_view(&mut self) -> DocumentResult<()> {
        let mut view: Option<Bounds> = None;
        for obj in self.objects.values_mut() {
            let bounds = world_bounds(&obj.dimensions, &obj.placement);
            trace!(name = %obj.name, ?bounds, "Recomputed object");
            obj.bounds = Some(bounds);
            view = Some(view.map_or(bounds, |v| v.union(&bounds)));
        }
        self.view = view;
        debug!(document = %self.name, objects = self.objects.len(), "Recomputed document");
        Ok(())
    }

    fn object_name(&self, handle: Handle) -> Option<&str> {
        self.object(handle).map(|obj| obj.name.as_str())
    }
}

/// Outcome of [`Workspace::lookup_or_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The document already existed.
    Found,
    /// A new, empty document was created.
    Created,
}

/// A set of named documents.
#[derive(Debug, Default)]
pub struct Workspace {
    policy: NamePolicy,
    documents: IndexMap<String, Document>,
}

impl Workspace {
    /// Creates an empty workspace whose new documents use `policy`.
    #[must_use]
    pub fn new(policy: NamePolicy) -> Self {
        Self {
            policy,
            documents: IndexMap::new(),
        }
    }

    /// Looks up a document by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.get(name)
    }

    /// Looks up a document by name for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Document> {
        self.documents.get_mut(name)
    }

    /// Returns the named document, creating it if it does not exist.
    pub fn lookup_or_create(&mut self, name: &str) -> (Lookup, &mut Document) {
        let policy = self.policy;
        match self.documents.entry(name.to_string()) {
            Entry::Occupied(entry) => (Lookup::Found, entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!(document = name, "Creating document");
                (Lookup::Created, entry.insert(Document::new(name, policy)))
            }
        }
    }

    /// Documents in creation order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }
}
