// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! This module contains the main `update` function and one handler per
//! control the event binder listens to.

use super::navigation::{self, OPEN_CLASS};
use super::{App, Message};
use crate::error::Result;

impl App {
    /// Handles one message. Only a language switch can fail, when the
    /// re-render does.
    pub fn update(&mut self, message: Message) -> Result<()> {
        match message {
            Message::LanguageSelected(lang) => self.handle_language_selected(&lang)?,
            Message::ThemeToggled => {
                let theme = self.preferences.toggle_theme(&mut self.page);
                tracing::debug!(%theme, "theme toggled");
            }
            Message::MenuToggled => self.handle_menu_toggled(),
            Message::NavClicked { on_anchor } => self.handle_nav_clicked(on_anchor),
            Message::Scrolled { scroll_y } => {
                self.nav.record_scroll(scroll_y);
            }
            Message::AnimationFrame => self.handle_animation_frame(),
        }
        Ok(())
    }

    /// Before the content document has loaded there is nothing to repaint;
    /// the language is only recorded.
    fn handle_language_selected(&mut self, lang: &str) -> Result<()> {
        match self.content.cached() {
            Some(document) => self.render_language(&document, lang),
            None => {
                tracing::debug!(lang, "language selected before content loaded");
                self.preferences.set_language(lang, &mut self.page);
                Ok(())
            }
        }
    }

    fn handle_menu_toggled(&mut self) {
        let Some(nav) = self.page.view.nav_links else {
            return;
        };
        let open = self.page.document.toggle_class(nav, OPEN_CLASS, None);
        self.set_menu_open(open);
    }

    fn handle_nav_clicked(&mut self, on_anchor: bool) {
        let Some(nav) = self.page.view.nav_links else {
            return;
        };
        if on_anchor && self.page.document.has_class(nav, OPEN_CLASS) {
            self.page.document.toggle_class(nav, OPEN_CLASS, Some(false));
            self.set_menu_open(false);
        }
    }

    fn set_menu_open(&mut self, open: bool) {
        self.nav.menu_open = open;
        if let Some(toggle) = self.page.view.menu_toggle {
            let expanded = if open { "true" } else { "false" };
            self.page.document.set_attribute(toggle, "aria-expanded", expanded);
        }
    }

    fn handle_animation_frame(&mut self) {
        if !self.nav.take_frame() {
            return;
        }
        if let Some(nav) = self.page.view.nav_links {
            let anchor = self.nav.scroll_y + self.config.anchor_offset();
            navigation::update_active_link(&mut self.page.document, nav, anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::config::Config;
    use crate::app::environment::Environment;
    use crate::app::preferences::{PreferenceState, Theme};
    use crate::app::storage::MemoryStore;
    use crate::app::{App, DomEvent, Message};
    use crate::content::{ContentSource, ContentStore};
    use crate::dom::LayoutBox;
    use crate::page::{view, Page};
    use std::fs;

    const SCAFFOLD: &str = r##"<html><head><title>t</title></head><body>
        <nav id="nav-links">
            <a href="#about">About</a>
            <a href="#skills">Skills</a>
        </nav>
        <button id="menu-toggle" aria-expanded="false">Menu</button>
        <button id="theme-toggle">?</button>
        <button class="toggle-btn" data-lang="tr">TR</button>
        <button class="toggle-btn" data-lang="en">EN</button>
        <section id="about"><h1 id="hero" data-i18n="hero.title">x</h1></section>
        <section id="skills"><div id="skills-list"></div></section>
        <div id="experience-list"></div>
        <div id="projects-list"></div>
        <div id="education-list"></div>
        <ul id="certificate-list"></ul>
        <span id="about-location"></span><span id="about-email"></span>
        <span id="about-phone"></span><span id="about-detail-location"></span>
        <span id="about-detail-email"></span><span id="about-detail-phone"></span>
        <span id="contact-location"></span><a id="contact-email"></a>
    </body></html>"##;

    const CONTENT: &str = r#"{
        "tr": {
            "hero": {"title": "Merhaba"},
            "skills": {"categories": []}, "experience": {"entries": []},
            "projects": {"items": []}, "education": {"entries": []},
            "certificates": {"items": []},
            "about": {"details": {"location": "İstanbul", "email": "a@b.c", "phone": "1"}},
            "contact": {"location": "İstanbul"}
        },
        "en": {
            "hero": {"title": "Hello"},
            "skills": {"categories": []}, "experience": {"entries": []},
            "projects": {"items": []}, "education": {"entries": []},
            "certificates": {"items": []},
            "about": {"details": {"location": "Istanbul", "email": "a@b.c", "phone": "1"}},
            "contact": {"location": "Istanbul"}
        }
    }"#;

    fn env() -> Environment {
        Environment {
            locale: Some("tr-TR".to_string()),
            prefers_light: false,
            prefers_reduced_motion: false,
        }
    }

    fn app(store: ContentStore) -> App {
        let page = Page::from_markup(SCAFFOLD).expect("parses");
        let prefs = PreferenceState::load(Box::new(MemoryStore::new()), &env());
        App::new(page, prefs, store, Config::default(), &env())
    }

    async fn started_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("i18n.json");
        fs::write(&path, CONTENT).expect("write");
        let mut app = app(ContentStore::new(ContentSource::File(path)));
        app.start().await.expect("start");
        (dir, app)
    }

    fn hero_text(app: &App) -> String {
        let doc = &app.page().document;
        doc.text_content(doc.element_by_id("hero").expect("hero"))
    }

    fn button(app: &App, id: &str) -> crate::dom::NodeId {
        app.page().document.element_by_id(id).expect("button")
    }

    #[tokio::test]
    async fn language_click_rerenders_from_cache() {
        let (_dir, mut app) = started_app().await;
        assert_eq!(hero_text(&app), "Merhaba");

        let en = app.page().view.lang_buttons[1];
        app.dispatch(DomEvent::Click { target: en }).expect("dispatch");

        assert_eq!(app.language(), "en");
        assert_eq!(hero_text(&app), "Hello");
        let doc = &app.page().document;
        assert_eq!(doc.attribute(doc.root(), "lang"), Some("en"));
    }

    #[test]
    fn language_click_before_load_only_records_language() {
        let mut app = app(ContentStore::default());
        app.update(Message::LanguageSelected("en".to_string()))
            .expect("update");
        assert_eq!(app.language(), "en");
        assert_eq!(hero_text(&app), "x");
    }

    #[tokio::test]
    async fn theme_click_does_not_rerender() {
        let (_dir, mut app) = started_app().await;
        let hero = app.page().document.element_by_id("hero").expect("hero");
        app.page_mut().document.set_text_content(hero, "edited");

        let toggle = button(&app, view::THEME_TOGGLE);
        app.dispatch(DomEvent::Click { target: toggle }).expect("dispatch");

        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(hero_text(&app), "edited");
    }

    #[test]
    fn menu_toggle_opens_and_closes() {
        let mut app = app(ContentStore::default());
        let toggle = button(&app, view::MENU_TOGGLE);
        let nav = button(&app, view::NAV_LINKS);

        app.dispatch(DomEvent::Click { target: toggle }).expect("open");
        assert!(app.page().document.has_class(nav, "open"));
        assert_eq!(app.page().document.attribute(toggle, "aria-expanded"), Some("true"));
        assert!(app.nav().menu_open);

        app.dispatch(DomEvent::Click { target: toggle }).expect("close");
        assert!(!app.page().document.has_class(nav, "open"));
        assert_eq!(app.page().document.attribute(toggle, "aria-expanded"), Some("false"));
    }

    #[test]
    fn nav_link_click_closes_open_menu() {
        let mut app = app(ContentStore::default());
        let toggle = button(&app, view::MENU_TOGGLE);
        let nav = button(&app, view::NAV_LINKS);
        let link = app.page().document.first_by_tag("a").expect("link");

        app.dispatch(DomEvent::Click { target: nav }).expect("click nav");
        assert!(!app.page().document.has_class(nav, "open"));

        app.dispatch(DomEvent::Click { target: toggle }).expect("open");
        app.dispatch(DomEvent::Click { target: nav }).expect("click nav");
        assert!(app.page().document.has_class(nav, "open"));

        app.dispatch(DomEvent::Click { target: link }).expect("click link");
        assert!(!app.page().document.has_class(nav, "open"));
        assert_eq!(app.page().document.attribute(toggle, "aria-expanded"), Some("false"));
    }

    #[test]
    fn scroll_spy_runs_once_per_frame() {
        let mut app = app(ContentStore::default());
        let doc = &mut app.page_mut().document;
        let about = doc.element_by_id("about").expect("about");
        let skills = doc.element_by_id("skills").expect("skills");
        doc.set_layout(about, LayoutBox::new(0.0, 600.0));
        doc.set_layout(skills, LayoutBox::new(600.0, 600.0));

        app.dispatch(DomEvent::Scroll { scroll_y: 100.0 }).expect("scroll");
        app.dispatch(DomEvent::Scroll { scroll_y: 500.0 }).expect("scroll");
        // Nothing is recomputed until the frame.
        let active = |app: &App| {
            let doc = &app.page().document;
            doc.find_all(doc.root(), |e| e.tag() == "a" && e.has_class("active"))
                .into_iter()
                .filter_map(|a| doc.attribute(a, "href").map(str::to_string))
                .collect::<Vec<_>>()
        };
        assert!(active(&app).is_empty());

        app.dispatch(DomEvent::AnimationFrame).expect("frame");
        assert_eq!(active(&app), vec!["#skills".to_string()]);
        assert!(!app.nav().frame_requested);
    }

    #[test]
    fn frame_without_scroll_changes_nothing() {
        let mut app = app(ContentStore::default());
        let about = app.page().document.element_by_id("about").expect("about");
        app.page_mut()
            .document
            .set_layout(about, LayoutBox::new(0.0, 600.0));
        app.dispatch(DomEvent::AnimationFrame).expect("frame");
        let link = app.page().document.first_by_tag("a").expect("link");
        assert!(!app.page().document.has_class(link, "active"));
    }
}
