// SPDX-License-Identifier: MPL-2.0
//! Paints a language's content tree onto the page.
//!
//! A pass runs these steps in order and stops at the first failure:
//!
//! 1. text lookups for every `[data-i18n]` element
//! 2. skills, experience, projects, education, certificates
//! 3. about details (mirrored into several elements) and contact
//! 4. page metadata
//!
//! Re-applying the language toggles happens before the pass, in
//! [`crate::app::preferences`]. Each structured container is cleared, then
//! filled entry by entry; a malformed entry stops the pass with the entries
//! before it already in place. Running a pass twice with the same tree yields
//! the same page.

pub mod sections;

use crate::content::schema::{self, About, Contact, Meta};
use crate::content::lookup_str;
use crate::dom::{Document, NodeId};
use crate::error::RenderError;
use crate::page::view::{self, require, I18N_ATTRIBUTE, LANG_ATTRIBUTE};
use crate::page::Page;
use serde_json::Value;

/// Runs a full render pass for `tree`.
pub fn render(page: &mut Page, tree: &Value) -> Result<(), RenderError> {
    apply_text_content(page, tree);

    let container = require(page.view.skills_list, view::SKILLS_LIST)?;
    rebuild(page, container, tree, ("skills", "categories"), sections::build_skill_card)?;

    let container = require(page.view.experience_list, view::EXPERIENCE_LIST)?;
    rebuild(page, container, tree, ("experience", "entries"), sections::build_experience_item)?;

    let container = require(page.view.projects_list, view::PROJECTS_LIST)?;
    rebuild(page, container, tree, ("projects", "items"), sections::build_project_card)?;

    let container = require(page.view.education_list, view::EDUCATION_LIST)?;
    rebuild(page, container, tree, ("education", "entries"), sections::build_education_item)?;

    let container = require(page.view.certificate_list, view::CERTIFICATE_LIST)?;
    rebuild(page, container, tree, ("certificates", "items"), sections::build_certificate)?;

    let about: About = schema::section(tree, "about")?;
    render_about_details(page, &about)?;
    let contact: Contact = schema::section(tree, "contact")?;
    render_contact(page, &contact, &about)?;

    update_meta(page, tree)?;
    Ok(())
}

/// Clears `container` and appends one child per entry of `section.list`.
fn rebuild<T: serde::de::DeserializeOwned>(
    page: &mut Page,
    container: NodeId,
    tree: &Value,
    (section, list): (&'static str, &str),
    build: fn(&mut Document, NodeId, &T),
) -> Result<(), RenderError> {
    page.document.clear_children(container);
    for value in schema::entries(tree, section, list)? {
        let entry: T = schema::entry(value, section)?;
        build(&mut page.document, container, &entry);
    }
    Ok(())
}

/// Marks the toggle whose `data-lang` equals `lang` as pressed and active,
/// and every other toggle as not.
pub fn apply_language_toggles(page: &mut Page, lang: &str) {
    for &button in &page.view.lang_buttons {
        let active = page.document.attribute(button, LANG_ATTRIBUTE) == Some(lang);
        page.document
            .set_attribute(button, "aria-pressed", if active { "true" } else { "false" });
        page.document.toggle_class(button, "active", Some(active));
    }
}

/// Replaces the text of every `[data-i18n]` element whose path resolves to a
/// string. Anything else leaves the element as it was.
pub fn apply_text_content(page: &mut Page, tree: &Value) {
    let doc = &mut page.document;
    let targets = doc.find_all(doc.root(), |e| e.attribute(I18N_ATTRIBUTE).is_some());
    for id in targets {
        let Some(path) = doc.attribute(id, I18N_ATTRIBUTE) else {
            continue;
        };
        if let Some(text) = lookup_str(tree, path) {
            doc.set_text_content(id, text);
        }
    }
}

fn render_about_details(page: &mut Page, about: &About) -> Result<(), RenderError> {
    let details = &about.details;
    let bindings = &page.view;
    let targets = [
        (bindings.about_location, view::ABOUT_LOCATION, &details.location),
        (bindings.about_detail_location, view::ABOUT_DETAIL_LOCATION, &details.location),
        (bindings.contact_location, view::CONTACT_LOCATION, &details.location),
        (bindings.about_email, view::ABOUT_EMAIL, &details.email),
        (bindings.about_detail_email, view::ABOUT_DETAIL_EMAIL, &details.email),
        (bindings.about_phone, view::ABOUT_PHONE, &details.phone),
        (bindings.about_detail_phone, view::ABOUT_DETAIL_PHONE, &details.phone),
    ];
    for (binding, id, text) in targets {
        let node = require(binding, id)?;
        page.document.set_text_content(node, text);
    }

    if let Some(link) = page.view.contact_email {
        page.document
            .set_attribute(link, "href", &format!("mailto:{}", details.email));
    }
    Ok(())
}

fn render_contact(page: &mut Page, contact: &Contact, about: &About) -> Result<(), RenderError> {
    let location = require(page.view.contact_location, view::CONTACT_LOCATION)?;
    page.document.set_text_content(location, &contact.location);

    let link = require(page.view.contact_email, view::CONTACT_EMAIL)?;
    page.document
        .set_attribute(link, "href", &format!("mailto:{}", about.details.email));
    Ok(())
}

/// Copies `meta` into the document title and description/Open Graph tags.
/// Missing fields and missing tags are skipped.
pub fn update_meta(page: &mut Page, tree: &Value) -> Result<(), RenderError> {
    if tree.get("meta").is_none_or(Value::is_null) {
        return Ok(());
    }
    let meta: Meta = schema::section(tree, "meta")?;
    let doc = &mut page.document;

    if let Some(title) = &meta.title {
        doc.set_title(title);
    }

    let tags = [
        ("name", "description", &meta.description),
        ("property", "og:title", &meta.og_title),
        ("property", "og:description", &meta.og_description),
    ];
    for (attr, key, value) in tags {
        let Some(value) = value else {
            continue;
        };
        let tag = doc.find_first(|e| e.tag() == "meta" && e.attribute(attr) == Some(key));
        if let Some(tag) = tag {
            doc.set_attribute(tag, "content", value);
        }
    }
    Ok(())
}
