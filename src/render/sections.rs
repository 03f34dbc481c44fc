// SPDX-License-Identifier: MPL-2.0
//! Node builders for the structured sections.
//!
//! Every builder appends one entry to an already-cleared container and
//! assigns text through text nodes only.

use crate::content::schema::{Certificate, EducationEntry, ExperienceEntry, Project, SkillCategory};
use crate::dom::{Document, NodeId};

/// Separator between the two halves of a timeline subtitle.
const SUBTITLE_SEPARATOR: &str = " · ";

fn text_element(doc: &mut Document, parent: NodeId, tag: &str, class: &str, text: &str) -> NodeId {
    let id = doc.append_element(parent, tag, class);
    doc.set_text_content(id, text);
    id
}

fn badge_row(doc: &mut Document, parent: NodeId, items: &[String]) {
    let row = doc.append_element(parent, "div", "tag-row");
    for item in items {
        text_element(doc, row, "span", "skill-badge", item);
    }
}

pub fn build_skill_card(doc: &mut Document, container: NodeId, category: &SkillCategory) {
    let card = doc.append_element(container, "div", "card");
    let header = doc.append_element(card, "div", "section-header");
    text_element(doc, header, "h3", "section-title", &category.name);
    badge_row(doc, card, &category.items);
}

/// `div.timeline-head` with a title, a muted subtitle and a period badge.
fn timeline_head(doc: &mut Document, item: NodeId, title: &str, subtitle: &str, period: &str) {
    let head = doc.append_element(item, "div", "timeline-head");
    let heading = doc.append_element(head, "div", "");
    text_element(doc, heading, "h3", "section-title", title);
    text_element(doc, heading, "p", "muted", subtitle);
    text_element(doc, head, "span", "badge", period);
}

pub fn build_experience_item(doc: &mut Document, container: NodeId, entry: &ExperienceEntry) {
    let item = doc.append_element(container, "div", "card timeline-item");
    let subtitle = format!("{}{}{}", entry.company, SUBTITLE_SEPARATOR, entry.location);
    timeline_head(doc, item, &entry.role, &subtitle, &entry.period);

    let list = doc.append_element(item, "ul", "list");
    for highlight in &entry.highlights {
        text_element(doc, list, "li", "", highlight);
    }
}

pub fn build_project_card(doc: &mut Document, container: NodeId, project: &Project) {
    let card = doc.append_element(container, "div", "card project-card");

    let header = doc.append_element(card, "div", "section-header");
    text_element(doc, header, "h3", "section-title", &project.name);
    if let Some(primary) = project.tech.first() {
        text_element(doc, header, "span", "badge", primary);
    }

    text_element(doc, card, "p", "muted", &project.description);
    badge_row(doc, card, &project.tech);

    let actions = doc.append_element(card, "div", "project-actions");
    for (label, href) in [("Repo", project.repo()), ("Demo", project.demo())] {
        if let Some(href) = href {
            let link = text_element(doc, actions, "a", "link-btn", label);
            doc.set_attribute(link, "href", href);
            doc.set_attribute(link, "target", "_blank");
            doc.set_attribute(link, "rel", "noreferrer");
        }
    }
}

pub fn build_education_item(doc: &mut Document, container: NodeId, entry: &EducationEntry) {
    let item = doc.append_element(container, "div", "card timeline-item");
    let subtitle = format!("{}{}{}", entry.degree, SUBTITLE_SEPARATOR, entry.location);
    timeline_head(doc, item, &entry.institution, &subtitle, &entry.period);
    text_element(doc, item, "p", "muted", &entry.details);
}

pub fn build_certificate(doc: &mut Document, container: NodeId, certificate: &Certificate) {
    text_element(doc, container, "li", "", &certificate.0);
}
