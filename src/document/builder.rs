//! Drives a [`CadHost`] with a list of placed primitives.

use tracing::{debug, info};

use crate::document::{CadHost, DocumentResult, Handle, Lookup, Workspace};
use crate::geometry::{BoardSpec, PlacedPrimitive};
use crate::layout;

/// Summary of a [`build_beacon`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Whether the document existed before the build.
    pub lookup: Lookup,
    /// Document the assembly was built into.
    pub document: String,
    /// Object names the host used, in layout order.
    pub objects: Vec<String>,
}

/// Creates every primitive in `primitives` on `host`, then recomputes once.
///
/// Each primitive is created, sized, placed and coloured in that order.
/// Returns the handles in the same order as `primitives`.
///
/// # Errors
///
/// Stops at and returns the first error the host reports; objects created
/// before the failure stay in the document.
pub fn build_assembly<H>(host: &mut H, primitives: &[PlacedPrimitive]) -> DocumentResult<Vec<Handle>>
where
    H: CadHost + ?Sized,
{
    let mut handles = Vec::with_capacity(primitives.len());

    for primitive in primitives {
        let handle = host.create_primitive(primitive.kind(), &primitive.name)?;
        host.set_geometry(handle, primitive.dimensions)?;
        host.set_placement(handle, primitive.placement)?;
        host.set_color(handle, primitive.color)?;
        debug!(
            name = %primitive.name,
            kind = %primitive.kind(),
            position = %primitive.placement.position,
            "Placed primitive"
        );
        handles.push(handle);
    }

    host.recompute_and_fit_view()?;
    Ok(handles)
}

/// Builds the beacon assembly for `board` into the named workspace document.
///
/// The document is created if it does not exist yet. Rebuilding into an
/// existing document follows the document's [`NamePolicy`](crate::document::NamePolicy).
///
/// # Errors
///
/// Returns the first error the document reports.
pub fn build_beacon(
    workspace: &mut Workspace,
    document_name: &str,
    board: &BoardSpec,
) -> DocumentResult<BuildReport> {
    let (lookup, doc) = workspace.lookup_or_create(document_name);
    let primitives = layout::generate(board);

    info!(
        document = document_name,
        ?lookup,
        parts = primitives.len(),
        width = board.width,
        depth = board.depth,
        thickness = board.thickness,
        "Building beacon assembly"
    );

    let handles = build_assembly(doc, &primitives)?;
    let objects = handles
        .iter()
        .filter_map(|h| doc.object_name(*h).map(str::to_string))
        .collect();

    Ok(BuildReport {
        lookup,
        document: document_name.to_string(),
        objects,
    })
}
