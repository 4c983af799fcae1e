use highlighter_types::{HighlightMode, HighlighterConfig, ModeSet, RuleGroup};
use tracing::{debug, info};

use crate::document::Document;
use crate::error::HighlightError;
use crate::selector::SelectorList;

use super::context::OverlayContext;
use super::palette::{Palette, RandomPalette};
use super::style::{box_style, label_style};
use super::{LabelPlacement, OverlayEntry, RenderReport};

/// Read the active modes from the page's marker attribute.
///
/// The first element carrying the attribute wins. A missing or empty value
/// falls back to the configured default mode.
pub fn select_mode<D: Document>(doc: &D, config: &HighlighterConfig) -> ModeSet {
    let marker = &config.marker_attribute;
    let value = doc
        .first_with_attribute(marker)
        .and_then(|node| doc.attribute(&node, marker))
        .filter(|value| !value.trim().is_empty());

    match value {
        Some(value) => {
            debug!(%value, "Highlight mode read from marker");
            ModeSet::parse(&value)
        }
        None => ModeSet::parse(&config.default_mode),
    }
}

/// Elements selected for one mode, with the rule group that selected them
struct Selection<'c, N> {
    elements: Vec<N>,
    group: Option<&'c RuleGroup>,
}

/// Paints outline boxes and labels for the selected elements.
pub struct OverlayRenderer<'c, P = RandomPalette> {
    config: &'c HighlighterConfig,
    ignore: SelectorList,
    offset: SelectorList,
    palette: P,
}

impl<'c> OverlayRenderer<'c, RandomPalette> {
    pub fn new(config: &'c HighlighterConfig) -> Result<Self, HighlightError> {
        Self::with_palette(config, RandomPalette)
    }
}

impl<'c, P: Palette> OverlayRenderer<'c, P> {
    /// Build a renderer, parsing the ignore and offset selector lists once.
    pub fn with_palette(config: &'c HighlighterConfig, palette: P) -> Result<Self, HighlightError> {
        let ignore = SelectorList::parse(&config.ignore_selectors).map_err(|source| {
            HighlightError::Selector {
                which: "ignore",
                source,
            }
        })?;
        let offset = SelectorList::parse(&config.offset_selectors).map_err(|source| {
            HighlightError::Selector {
                which: "offset",
                source,
            }
        })?;

        Ok(Self {
            config,
            ignore,
            offset,
            palette,
        })
    }

    pub fn config(&self) -> &HighlighterConfig {
        self.config
    }

    /// Render every active mode into the shared overlay container.
    ///
    /// Running twice without `clear_previous` appends a second set of entries.
    pub fn run<D: Document>(
        &mut self,
        doc: &mut D,
        modes: ModeSet,
    ) -> Result<RenderReport, HighlightError> {
        doc.set_body_overflow_x("hidden")?;

        let context = OverlayContext::acquire(doc, self.config)?;
        let viewport_width = doc.metrics().viewport_width;
        let mut report = RenderReport {
            container_created: context.created(),
            ..Default::default()
        };

        for mode in modes.modes() {
            for selection in self.select(&*doc, mode) {
                for element in &selection.elements {
                    if context.owns(&*doc, element) {
                        continue;
                    }
                    if doc.matches(element, &self.ignore) {
                        report.ignored += 1;
                        continue;
                    }

                    let inset = if doc.matches(element, &self.offset) {
                        self.config.inset_px
                    } else {
                        0
                    };

                    let entry = self.paint(
                        doc,
                        &context,
                        mode,
                        element,
                        selection.group,
                        inset,
                        viewport_width,
                    )?;
                    debug!(%mode, label = %entry.label, color = %entry.color, inset, "Highlighted element");
                    report.entries.push(entry);
                }
            }
        }

        info!(
            modes = ?modes,
            entries = report.entries.len(),
            ignored = report.ignored,
            "Rendered element overlays"
        );
        Ok(report)
    }

    /// Element collections for a mode, each snapshot before anything is painted.
    fn select<D: Document>(&self, doc: &D, mode: HighlightMode) -> Vec<Selection<'c, D::Node>> {
        let config = self.config;
        match mode {
            HighlightMode::Semantics => {
                let elements = doc
                    .body()
                    .map(|body| doc.descendants(&body))
                    .unwrap_or_default();
                vec![Selection {
                    elements,
                    group: None,
                }]
            }
            HighlightMode::Module | HighlightMode::Grid => config
                .modes
                .groups(mode)
                .iter()
                .map(|group| Selection {
                    elements: doc.elements_with_any_class(&group.classes),
                    group: Some(group),
                })
                .collect(),
        }
    }

    fn paint<D: Document>(
        &mut self,
        doc: &mut D,
        context: &OverlayContext<D::Node>,
        mode: HighlightMode,
        element: &D::Node,
        group: Option<&RuleGroup>,
        inset: u32,
        viewport_width: f64,
    ) -> Result<OverlayEntry, HighlightError> {
        let color = self.palette.next_color()?;
        let tag = doc.tag_name(element);
        let label = match group {
            Some(group) => group.label_for(&tag, &doc.classes(element)),
            None => tag.to_uppercase(),
        };
        let rect = doc.rect(element);
        let label_placement = LabelPlacement::for_element(rect, inset, viewport_width);

        let outline = doc.create_element("div")?;
        doc.set_attribute(&outline, "class", &self.config.box_class)?;
        doc.set_attribute(
            &outline,
            "style",
            &box_style(rect, color, self.config.outline_width_px, inset).to_string(),
        )?;

        let tab = doc.create_element("span")?;
        doc.set_attribute(&tab, "class", &self.config.label_class)?;
        doc.set_attribute(&tab, "style", &label_style(color, label_placement).to_string())?;
        doc.set_text(&tab, &label)?;

        context.append(doc, &outline)?;
        context.append(doc, &tab)?;

        Ok(OverlayEntry {
            mode,
            tag,
            label,
            color,
            inset,
            rect,
            label_placement,
        })
    }
}
