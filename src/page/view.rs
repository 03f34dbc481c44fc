// SPDX-License-Identifier: MPL-2.0
//! Element handles the renderer and event binder work with, looked up once
//! when the page is loaded.

use crate::dom::{Document, NodeId};
use crate::error::RenderError;

pub const THEME_TOGGLE: &str = "theme-toggle";
pub const NAV_LINKS: &str = "nav-links";
pub const MENU_TOGGLE: &str = "menu-toggle";
pub const YEAR: &str = "year";
pub const ABOUT_LOCATION: &str = "about-location";
pub const ABOUT_EMAIL: &str = "about-email";
pub const ABOUT_PHONE: &str = "about-phone";
pub const ABOUT_DETAIL_LOCATION: &str = "about-detail-location";
pub const ABOUT_DETAIL_EMAIL: &str = "about-detail-email";
pub const ABOUT_DETAIL_PHONE: &str = "about-detail-phone";
pub const CONTACT_LOCATION: &str = "contact-location";
pub const CONTACT_EMAIL: &str = "contact-email";
pub const SKILLS_LIST: &str = "skills-list";
pub const EXPERIENCE_LIST: &str = "experience-list";
pub const PROJECTS_LIST: &str = "projects-list";
pub const EDUCATION_LIST: &str = "education-list";
pub const CERTIFICATE_LIST: &str = "certificate-list";

/// Attribute naming the content path of a text element.
pub const I18N_ATTRIBUTE: &str = "data-i18n";

/// Attribute carrying the language code of a language toggle.
pub const LANG_ATTRIBUTE: &str = "data-lang";

/// Resolved element handles. Absent elements are `None`; the scaffold is not
/// validated up front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewBindings {
    /// Every `.toggle-btn[data-lang]`, in document order.
    pub lang_buttons: Vec<NodeId>,
    pub theme_button: Option<NodeId>,
    pub nav_links: Option<NodeId>,
    pub menu_toggle: Option<NodeId>,
    pub year: Option<NodeId>,
    pub about_location: Option<NodeId>,
    pub about_email: Option<NodeId>,
    pub about_phone: Option<NodeId>,
    pub about_detail_location: Option<NodeId>,
    pub about_detail_email: Option<NodeId>,
    pub about_detail_phone: Option<NodeId>,
    pub contact_location: Option<NodeId>,
    pub contact_email: Option<NodeId>,
    pub skills_list: Option<NodeId>,
    pub experience_list: Option<NodeId>,
    pub projects_list: Option<NodeId>,
    pub education_list: Option<NodeId>,
    pub certificate_list: Option<NodeId>,
}

impl ViewBindings {
    #[must_use]
    pub fn resolve(doc: &Document) -> Self {
        let by_id = |id: &str| doc.element_by_id(id);
        Self {
            lang_buttons: doc.find_all(doc.root(), |e| {
                e.has_class("toggle-btn") && e.attribute(LANG_ATTRIBUTE).is_some()
            }),
            theme_button: by_id(THEME_TOGGLE),
            nav_links: by_id(NAV_LINKS),
            menu_toggle: by_id(MENU_TOGGLE),
            year: by_id(YEAR),
            about_location: by_id(ABOUT_LOCATION),
            about_email: by_id(ABOUT_EMAIL),
            about_phone: by_id(ABOUT_PHONE),
            about_detail_location: by_id(ABOUT_DETAIL_LOCATION),
            about_detail_email: by_id(ABOUT_DETAIL_EMAIL),
            about_detail_phone: by_id(ABOUT_DETAIL_PHONE),
            contact_location: by_id(CONTACT_LOCATION),
            contact_email: by_id(CONTACT_EMAIL),
            skills_list: by_id(SKILLS_LIST),
            experience_list: by_id(EXPERIENCE_LIST),
            projects_list: by_id(PROJECTS_LIST),
            education_list: by_id(EDUCATION_LIST),
            certificate_list: by_id(CERTIFICATE_LIST),
        }
    }
}

/// Unwraps a binding the current step cannot do without.
pub fn require(binding: Option<NodeId>, id: &'static str) -> Result<NodeId, RenderError> {
    binding.ok_or(RenderError::MissingElement(id))
}
