//! The shared overlay layer.

use highlighter_types::HighlighterConfig;
use tracing::debug;

use crate::document::Document;
use crate::error::{HighlightError, HostError};

use super::style::container_style;

/// Handle to the single overlay container for one render pass.
///
/// Looked up by id first, so repeated passes share one container.
#[derive(Debug, Clone)]
pub struct OverlayContext<N> {
    container: N,
    created: bool,
}

impl<N: Clone + PartialEq + std::fmt::Debug> OverlayContext<N> {
    /// Find the container by id or create it, sized to the full document and
    /// appended to body.
    pub fn acquire<D>(doc: &mut D, config: &HighlighterConfig) -> Result<Self, HighlightError>
    where
        D: Document<Node = N>,
    {
        if let Some(container) = doc.element_by_id(&config.container_id) {
            if config.clear_previous {
                debug!(id = %config.container_id, "Clearing previous overlays");
                doc.remove_children(&container)?;
            }
            return Ok(Self {
                container,
                created: false,
            });
        }

        let body = doc
            .body()
            .ok_or_else(|| HostError::new("document has no body"))?;
        let height = doc.metrics().document_height();

        let container = doc.create_element("div")?;
        doc.set_attribute(&container, "id", &config.container_id)?;
        doc.set_attribute(&container, "style", &container_style(height).to_string())?;
        doc.append_child(&body, &container)?;
        debug!(id = %config.container_id, height, "Created overlay container");

        Ok(Self {
            container,
            created: true,
        })
    }

    pub fn container(&self) -> &N {
        &self.container
    }

    /// Whether this pass created the container (false when reused)
    pub fn created(&self) -> bool {
        self.created
    }

    pub fn append<D>(&self, doc: &mut D, node: &N) -> Result<(), HostError>
    where
        D: Document<Node = N>,
    {
        doc.append_child(&self.container, node)
    }

    /// Whether the node is the container or one of the overlays inside it
    pub fn owns<D>(&self, doc: &D, node: &N) -> bool
    where
        D: Document<Node = N>,
    {
        doc.is_inclusive_descendant(node, &self.container)
    }
}
