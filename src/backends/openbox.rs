//! Openbox pipe-menu parser
//!
//! `xdg_menu --format openbox3-pipe` prints:
//!
//! ```xml
//! <openbox_pipe_menu>
//!   <menu id="..." label="Internet" icon="/path/net.png">
//!     <item label="Browser" icon="/path/firefox.png">
//!       <action name="Execute"><command>firefox %U</command></action>
//!     </item>
//!   </menu>
//! </openbox_pipe_menu>
//! ```
//!
//! Direct `menu` children of `openbox_pipe_menu` become categories, their
//! direct `item` children become programs. The command is all text inside the
//! item, trimmed. Deeper nesting (submenus) is ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::error::PappyError;
use crate::core::model::{Category, MenuCache, Program};

const ROOT_TAG: &[u8] = b"openbox_pipe_menu";
const MENU_TAG: &[u8] = b"menu";
const ITEM_TAG: &[u8] = b"item";

struct OpenCategory {
    name: String,
    depth: usize,
    category: Category,
}

struct OpenItem {
    name: String,
    icon: String,
    depth: usize,
    text: String,
}

/// Parse the tool's XML output into a menu cache
pub fn parse_menu_xml(xml: &str) -> Result<MenuCache, PappyError> {
    let mut reader = Reader::from_str(xml);
    let mut cache = MenuCache::new();

    // Element names from the document root down to the current element
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;
    let mut category: Option<OpenCategory> = None;
    let mut item: Option<OpenItem> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event()
            .map_err(|e| PappyError::parse(position, e.to_string()))?;

        match event {
            Event::Start(ref e) => {
                if stack.is_empty() {
                    if saw_root {
                        return Err(PappyError::parse(position, "multiple root elements"));
                    }
                    saw_root = true;
                }
                let name = e.name().as_ref().to_vec();
                let depth = stack.len() + 1;

                if item.is_none() {
                    if is_category(&stack, &name, category.is_some()) {
                        let (label, icon) = label_and_icon(e, position)?;
                        category = Some(OpenCategory {
                            name: label,
                            depth,
                            category: Category::new(icon),
                        });
                    } else if is_item(&stack, &name, category.as_ref()) {
                        let (label, icon) = label_and_icon(e, position)?;
                        item = Some(OpenItem {
                            name: label,
                            icon,
                            depth,
                            text: String::new(),
                        });
                    }
                }

                stack.push(name);
            }

            Event::Empty(ref e) => {
                if stack.is_empty() {
                    if saw_root {
                        return Err(PappyError::parse(position, "multiple root elements"));
                    }
                    saw_root = true;
                }
                let qname = e.name();
                let name = qname.as_ref();

                if item.is_none() {
                    if is_category(&stack, name, category.is_some()) {
                        let (label, icon) = label_and_icon(e, position)?;
                        cache.insert(label, Category::new(icon));
                    } else if let Some(open) = category.as_mut() {
                        if is_item(&stack, name, Some(&*open)) {
                            let (label, icon) = label_and_icon(e, position)?;
                            open.category.insert(label, Program::new(icon, ""));
                        }
                    }
                }
            }

            Event::End(_) => {
                let depth = stack.len();
                stack.pop();

                if item.as_ref().is_some_and(|open| open.depth == depth) {
                    if let (Some(done), Some(open)) = (item.take(), category.as_mut()) {
                        let command = done.text.trim().to_string();
                        open.category
                            .insert(done.name, Program::new(done.icon, command));
                    }
                } else if category.as_ref().is_some_and(|open| open.depth == depth) {
                    if let Some(done) = category.take() {
                        cache.insert(done.name, done.category);
                    }
                }
            }

            Event::Text(ref t) => {
                if let Some(open) = item.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| PappyError::parse(position, e.to_string()))?;
                    open.text.push_str(&text);
                }
            }

            Event::CData(ref c) => {
                if let Some(open) = item.as_mut() {
                    let bytes: &[u8] = c;
                    open.text.push_str(&String::from_utf8_lossy(bytes));
                }
            }

            Event::Eof => break,

            _ => {}
        }
    }

    if !stack.is_empty() {
        let open = String::from_utf8_lossy(stack.last().map(Vec::as_slice).unwrap_or_default())
            .to_string();
        return Err(PappyError::parse(
            reader.buffer_position() as u64,
            format!("unexpected end of document inside <{}>", open),
        ));
    }
    if !saw_root {
        return Err(PappyError::parse(0, "document has no root element"));
    }

    Ok(cache)
}

/// A `menu` whose parent is the pipe-menu root
fn is_category(stack: &[Vec<u8>], name: &[u8], inside_category: bool) -> bool {
    !inside_category
        && name == MENU_TAG
        && stack.last().is_some_and(|parent| parent.as_slice() == ROOT_TAG)
}

/// An `item` directly under the open category
fn is_item(stack: &[Vec<u8>], name: &[u8], category: Option<&OpenCategory>) -> bool {
    match category {
        Some(open) => name == ITEM_TAG && stack.len() == open.depth,
        None => false,
    }
}

fn label_and_icon(e: &BytesStart<'_>, position: u64) -> Result<(String, String), PappyError> {
    let mut label = None;
    let mut icon = String::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| PappyError::parse(position, err.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|err| PappyError::parse(position, err.to_string()))?
            .to_string();
        match attr.key.as_ref() {
            b"label" => label = Some(value),
            b"icon" => icon = value,
            _ => {}
        }
    }

    let label = label.ok_or_else(|| {
        PappyError::parse(
            position,
            format!(
                "<{}> is missing the label attribute",
                String::from_utf8_lossy(e.name().as_ref())
            ),
        )
    })?;
    Ok((label, icon))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/openbox3-pipe.xml");

    #[test]
    fn test_single_category_example() {
        let xml = r#"<openbox_pipe_menu>
  <menu id="internet" label="Internet">
    <item label="Browser">
      <action name="Execute"><command>firefox %U</command></action>
    </item>
  </menu>
</openbox_pipe_menu>"#;

        let cache = parse_menu_xml(xml).unwrap();
        assert_eq!(
            serde_json::to_string(&cache).unwrap(),
            r#"{"Internet":["",{"Browser":["","firefox %U"]}]}"#
        );
    }

    #[test]
    fn test_fixture_categories_and_programs() {
        let cache = parse_menu_xml(FIXTURE).unwrap();

        let names: Vec<_> = cache.categories().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Development", "Graphics", "Internet", "Utilities"]);

        let internet = cache.get("Internet").unwrap();
        assert_eq!(internet.icon(), Some("/usr/share/icons/hicolor/16x16/categories/applications-internet.png"));
        assert_eq!(internet.programs().len(), 2);

        let firefox = &internet.programs()["Firefox Web Browser"];
        assert_eq!(firefox.icon(), Some("/usr/share/icons/hicolor/16x16/apps/firefox.png"));
        assert_eq!(firefox.command(), "firefox %u");

        let mail = &internet.programs()["Thunderbird"];
        assert_eq!(mail.icon(), None);
        assert_eq!(mail.command(), "thunderbird %u");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let cache = parse_menu_xml(FIXTURE).unwrap();
        let dev = cache.get("Development").unwrap();

        let shell = &dev.programs()["Shell & Tools"];
        assert_eq!(shell.command(), r#"sh -c "echo 'a < b' && read x""#);
    }

    #[test]
    fn test_nested_submenus_are_ignored() {
        let cache = parse_menu_xml(FIXTURE).unwrap();
        let utilities = cache.get("Utilities").unwrap();

        let names: Vec<_> = utilities.programs().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Calculator", "Terminal"]);
        assert!(cache.get("Accessibility").is_none());
    }

    #[test]
    fn test_empty_category_and_empty_item() {
        let xml = r#"<openbox_pipe_menu>
  <menu label="Games" icon="/g.png"/>
  <menu label="Misc"><item label="Nothing"/></menu>
</openbox_pipe_menu>"#;

        let cache = parse_menu_xml(xml).unwrap();
        let games = cache.get("Games").unwrap();
        assert_eq!(games.icon(), Some("/g.png"));
        assert!(games.programs().is_empty());
        assert_eq!(cache.get("Misc").unwrap().programs()["Nothing"].command(), "");
    }

    #[test]
    fn test_cdata_command() {
        let xml = r#"<openbox_pipe_menu><menu label="A"><item label="B"><![CDATA[ run --flag "x y" ]]></item></menu></openbox_pipe_menu>"#;
        let cache = parse_menu_xml(xml).unwrap();
        assert_eq!(
            cache.get("A").unwrap().programs()["B"].command(),
            r#"run --flag "x y""#
        );
    }

    #[test]
    fn test_duplicate_labels_last_write_wins() {
        let xml = r#"<openbox_pipe_menu>
  <menu label="A"><item label="X">first</item><item label="X">second</item></menu>
  <menu label="A"><item label="Y">only</item></menu>
</openbox_pipe_menu>"#;

        let cache = parse_menu_xml(xml).unwrap();
        assert_eq!(cache.len(), 1);
        let a = cache.get("A").unwrap();
        assert_eq!(a.programs().len(), 1);
        assert_eq!(a.programs()["Y"].command(), "only");
    }

    #[test]
    fn test_empty_root() {
        let cache = parse_menu_xml("<openbox_pipe_menu></openbox_pipe_menu>").unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = parse_menu_xml("<openbox_pipe_menu><menu label=\"A\"></item>").unwrap_err();
        assert!(matches!(err, PappyError::Parse { .. }));
    }

    #[test]
    fn test_truncated_document_is_parse_error() {
        let err = parse_menu_xml("<openbox_pipe_menu><menu label=\"A\">").unwrap_err();
        assert!(matches!(err, PappyError::Parse { .. }));
    }

    #[test]
    fn test_empty_output_is_parse_error() {
        assert!(matches!(parse_menu_xml(""), Err(PappyError::Parse { .. })));
        assert!(matches!(parse_menu_xml("   \n"), Err(PappyError::Parse { .. })));
    }

    #[test]
    fn test_missing_label_is_parse_error() {
        let err = parse_menu_xml("<openbox_pipe_menu><menu icon=\"x\"></menu></openbox_pipe_menu>")
            .unwrap_err();
        assert!(err.to_string().contains("label"));
    }
}
