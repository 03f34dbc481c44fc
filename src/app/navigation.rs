// SPDX-License-Identifier: MPL-2.0
//! Mobile menu and scroll-spy state.
//!
//! Scroll events only record the latest offset and ask for a frame; the
//! active link is recomputed once per frame, however many scroll events
//! arrived in between.

use crate::dom::{Document, NodeId};

/// Class carried by the navigation container while the mobile menu is open.
pub const OPEN_CLASS: &str = "open";

/// Class carried by the navigation link of the section under the anchor line.
pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    pub menu_open: bool,
    pub scroll_y: f32,
    pub frame_requested: bool,
}

impl NavState {
    /// Records a scroll offset. Returns `true` when this scroll scheduled a
    /// new frame, `false` when one was already pending.
    pub fn record_scroll(&mut self, scroll_y: f32) -> bool {
        self.scroll_y = scroll_y;
        let newly_requested = !self.frame_requested;
        self.frame_requested = true;
        newly_requested
    }

    /// Consumes the pending frame request, if any.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }
}

/// Marks at most one link under `nav` as active: the one whose target section
/// spans `anchor` (half-open, `top <= anchor < top + height`).
///
/// Links whose `href` does not name an element on the page are skipped and
/// keep whatever state they had.
pub fn update_active_link(doc: &mut Document, nav: NodeId, anchor: f32) {
    let links = doc.find_all(nav, |e| e.tag() == "a");
    for link in links {
        let Some(section) = doc
            .attribute(link, "href")
            .map(|href| href.trim_start_matches('#').to_string())
            .and_then(|id| doc.element_by_id(&id))
        else {
            continue;
        };
        let active = doc.layout(section).contains(anchor);
        doc.toggle_class(link, ACTIVE_CLASS, Some(active));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::LayoutBox;

    fn doc() -> (Document, NodeId) {
        let doc = crate::dom::parse(
            r##"<html><body>
                <nav id="nav-links">
                    <a href="#about">About</a>
                    <a href="#skills">Skills</a>
                    <a href="#ghost">Ghost</a>
                </nav>
                <section id="about"></section>
                <section id="skills"></section>
            </body></html>"##,
        )
        .expect("parses");
        let nav = doc.element_by_id("nav-links").expect("nav");
        (doc, nav)
    }

    fn with_layout(mut doc: Document) -> Document {
        let about = doc.element_by_id("about").expect("about");
        let skills = doc.element_by_id("skills").expect("skills");
        doc.set_layout(about, LayoutBox::new(0.0, 500.0));
        doc.set_layout(skills, LayoutBox::new(500.0, 400.0));
        doc
    }

    fn active_hrefs(doc: &Document, nav: NodeId) -> Vec<String> {
        doc.find_all(nav, |e| e.tag() == "a" && e.has_class(ACTIVE_CLASS))
            .into_iter()
            .filter_map(|a| doc.attribute(a, "href").map(str::to_string))
            .collect()
    }

    #[test]
    fn scrolls_coalesce_into_one_frame() {
        let mut nav = NavState::default();
        assert!(nav.record_scroll(10.0));
        assert!(!nav.record_scroll(20.0));
        assert!(!nav.record_scroll(30.0));
        assert_eq!(nav.scroll_y, 30.0);
        assert!(nav.take_frame());
        assert!(!nav.take_frame());
    }

    #[test]
    fn anchor_inside_section_activates_its_link() {
        let (doc, nav) = doc();
        let mut doc = with_layout(doc);
        update_active_link(&mut doc, nav, 620.0);
        assert_eq!(active_hrefs(&doc, nav), vec!["#skills".to_string()]);
    }

    #[test]
    fn section_bounds_are_half_open() {
        let (doc, nav) = doc();
        let mut doc = with_layout(doc);
        update_active_link(&mut doc, nav, 500.0);
        assert_eq!(active_hrefs(&doc, nav), vec!["#skills".to_string()]);
        update_active_link(&mut doc, nav, 900.0);
        assert!(active_hrefs(&doc, nav).is_empty());
    }

    #[test]
    fn active_link_moves_with_scroll() {
        let (doc, nav) = doc();
        let mut doc = with_layout(doc);
        update_active_link(&mut doc, nav, 120.0);
        assert_eq!(active_hrefs(&doc, nav), vec!["#about".to_string()]);
        update_active_link(&mut doc, nav, 700.0);
        assert_eq!(active_hrefs(&doc, nav), vec!["#skills".to_string()]);
    }

    #[test]
    fn link_without_section_is_left_alone() {
        let (doc, nav) = doc();
        let mut doc = with_layout(doc);
        let ghost = doc
            .find_first(|e| e.attribute("href") == Some("#ghost"))
            .expect("ghost link");
        doc.toggle_class(ghost, ACTIVE_CLASS, Some(true));
        update_active_link(&mut doc, nav, 100.0);
        assert!(doc.has_class(ghost, ACTIVE_CLASS));
    }
}
