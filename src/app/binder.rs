// SPDX-License-Identifier: MPL-2.0
//! Maps host events onto application messages.
//!
//! Listeners are attached once, from the view bindings: one per language
//! toggle, the theme button, the menu button and the navigation container.
//! A click is offered to every bound control from the target outwards, the
//! way DOM events bubble, so a click inside the navigation container on a
//! nested control can produce more than one message.

use super::Message;
use crate::dom::{Document, NodeId};
use crate::page::view::LANG_ATTRIBUTE;
use crate::page::Page;

/// Events a host feeds into the application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomEvent {
    Click { target: NodeId },
    Scroll { scroll_y: f32 },
    AnimationFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listener {
    Language,
    Theme,
    Menu,
    Navigation,
}

/// The set of attached listeners.
#[derive(Debug, Clone, Default)]
pub struct EventBinder {
    listeners: Vec<(NodeId, Listener)>,
}

impl EventBinder {
    #[must_use]
    pub fn bind(page: &Page) -> Self {
        let view = &page.view;
        let mut listeners: Vec<(NodeId, Listener)> = view
            .lang_buttons
            .iter()
            .map(|button| (*button, Listener::Language))
            .collect();
        listeners.extend(view.theme_button.map(|id| (id, Listener::Theme)));
        listeners.extend(view.menu_toggle.map(|id| (id, Listener::Menu)));
        listeners.extend(view.nav_links.map(|id| (id, Listener::Navigation)));
        tracing::debug!(count = listeners.len(), "bound page listeners");
        Self { listeners }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Messages produced by `event`, innermost listener first.
    #[must_use]
    pub fn route(&self, doc: &Document, event: DomEvent) -> Vec<Message> {
        match event {
            DomEvent::Scroll { scroll_y } => vec![Message::Scrolled { scroll_y }],
            DomEvent::AnimationFrame => vec![Message::AnimationFrame],
            DomEvent::Click { target } => self.route_click(doc, target),
        }
    }

    fn route_click(&self, doc: &Document, target: NodeId) -> Vec<Message> {
        let mut messages = Vec::new();
        let mut current = Some(target);
        while let Some(node) = current {
            for (_, listener) in self.listeners.iter().filter(|(id, _)| *id == node) {
                if let Some(message) = Self::fire(doc, *listener, node, target) {
                    messages.push(message);
                }
            }
            current = doc.parent(node);
        }
        messages
    }

    fn fire(doc: &Document, listener: Listener, node: NodeId, target: NodeId) -> Option<Message> {
        match listener {
            Listener::Language => doc
                .attribute(node, LANG_ATTRIBUTE)
                .map(|lang| Message::LanguageSelected(lang.to_string())),
            Listener::Theme => Some(Message::ThemeToggled),
            Listener::Menu => Some(Message::MenuToggled),
            Listener::Navigation => Some(Message::NavClicked {
                on_anchor: doc.tag(target) == Some("a"),
            }),
        }
    }
}
