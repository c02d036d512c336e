//! GTK presenter
//!
//! Pops up a `gtk::Menu` at the pointer: one submenu per category, one item
//! per program. Activating an item records its command and leaves the main
//! loop; Escape or losing focus leaves it with nothing recorded.

use anyhow::{anyhow, Result};
use gtk::gdk_pixbuf::{Colorspace, InterpType, Pixbuf};
use gtk::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::core::model::MenuTree;
use crate::ui::Presenter;

pub struct GtkPresenter {
    icon_size: i32,
}

impl GtkPresenter {
    pub fn new(icon_size: i32) -> Self {
        Self { icon_size }
    }

    /// Scaled icon, or a transparent square of the same size so labels line up
    fn icon_image(&self, icon: Option<&str>) -> gtk::Image {
        let size = self.icon_size;
        let scaled = icon.and_then(|path| match Pixbuf::from_file(path) {
            Ok(pixbuf) => pixbuf.scale_simple(size, size, InterpType::Hyper),
            Err(err) => {
                warn!(icon = path, error = %err, "could not load icon");
                None
            }
        });

        let pixbuf = scaled.or_else(|| {
            let blank = Pixbuf::new(Colorspace::Rgb, true, 8, size, size)?;
            blank.fill(0);
            Some(blank)
        });

        let image = gtk::Image::from_pixbuf(pixbuf.as_ref());
        image.show();
        image
    }

    fn icon_item(&self, icon: Option<&str>, label: &str) -> gtk::MenuItem {
        let item = gtk::MenuItem::new();
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 5);
        row.set_halign(gtk::Align::Start);

        row.add(&self.icon_image(icon));
        let text = gtk::Label::new(Some(label));
        text.show();
        row.add(&text);
        row.show();

        item.add(&row);
        item.show();
        item
    }

    fn build_menu(&self, tree: &MenuTree, selection: &Rc<RefCell<Option<String>>>) -> gtk::Menu {
        let root = gtk::Menu::new();

        for category in &tree.categories {
            let item = self.icon_item(category.icon.as_deref(), &category.name);
            let submenu = gtk::Menu::new();

            for entry in &category.entries {
                let leaf = self.icon_item(entry.icon.as_deref(), &entry.name);
                let command = entry.command.clone();
                let selection = Rc::clone(selection);
                leaf.connect_activate(move |_| {
                    debug!(command = %command, "menu item activated");
                    *selection.borrow_mut() = Some(command.clone());
                    quit();
                });
                submenu.append(&leaf);
            }

            item.set_submenu(Some(&submenu));
            root.append(&item);
        }

        root
    }
}

fn quit() {
    if gtk::main_level() > 0 {
        gtk::main_quit();
    }
}

impl Presenter for GtkPresenter {
    fn present(&mut self, tree: &MenuTree) -> Result<Option<String>> {
        gtk::init().map_err(|err| anyhow!("failed to initialize GTK: {}", err))?;

        if tree.is_empty() {
            warn!("menu is empty, nothing to show");
            return Ok(None);
        }

        let selection = Rc::new(RefCell::new(None));
        let menu = self.build_menu(tree, &selection);
        menu.connect_cancel(|_| quit());
        menu.connect_deactivate(|_| quit());

        // No triggering event exists at startup, so popup_at_pointer would
        // have nothing to anchor to. popup_easy places the menu at the
        // pointer without one.
        menu.popup_easy(0, gtk::current_event_time());

        gtk::main();

        let chosen = selection.borrow_mut().take();
        Ok(chosen)
    }
}
