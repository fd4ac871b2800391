//! Conversion of element trees into [`MessageContent`].

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ReplyMarkup};
use url::Url;

use telegum_tgx::{ButtonElement, Node, PhotoElement};

use crate::content::MessageContent;
use crate::error::ContentError;
use crate::html::render_html;

/// Converts an element tree to [`MessageContent`], detecting the content type.
///
/// Root nodes are sorted into text, photos, videos and at most one keyboard.
/// A single photo yields a photo message with the text as caption; no media
/// yields a text message. Anything else is an error.
pub fn to_message_content(root: Node) -> Result<MessageContent, ContentError> {
    let mut keyboard: Option<InlineKeyboardMarkup> = None;
    let mut rest = Vec::new();
    let mut photos: Vec<PhotoElement> = Vec::new();
    let mut videos = 0usize;

    for node in flatten(root) {
        match node {
            Node::Photo(photo) => photos.push(photo),
            Node::Video { .. } => videos += 1,
            Node::Keyboard { children } => {
                if keyboard.is_some() {
                    return Err(ContentError::MultipleKeyboards);
                }
                keyboard = Some(build_keyboard(children)?);
            }
            Node::Button(_) => return Err(ContentError::ButtonOutsideKeyboard),
            Node::Text { .. } | Node::Plain { .. } | Node::Br => rest.push(node),
            Node::Fragment { .. } => {
                return Err(ContentError::UnsupportedElement { kind: node.kind() });
            }
        }
    }

    let text_html = render_html(&rest)?;
    let reply_markup = keyboard.map(ReplyMarkup::InlineKeyboard);

    match (photos.pop(), videos) {
        (Some(_), _) if !photos.is_empty() || videos > 0 => {
            Err(ContentError::MediaGroupUnsupported)
        }
        (None, n) if n > 1 => Err(ContentError::MediaGroupUnsupported),
        (None, 1) => Err(ContentError::VideoUnsupported),
        (Some(photo), _) => {
            let mut caption = render_html(&photo.children)?;
            caption.push_str(&text_html);
            Ok(MessageContent::Photo {
                file: photo.file,
                caption: (!caption.is_empty()).then_some(caption),
                has_spoiler: photo.spoiler,
                reply_markup,
            })
        }
        (None, _) if text_html.is_empty() => Err(ContentError::EmptyContent),
        (None, _) => Ok(MessageContent::Text {
            text: text_html,
            reply_markup,
        }),
    }
}

/// Expands fragments in place, returning the non-fragment nodes in document order.
///
/// Each fragment is replaced by its children and the scan resumes at the same
/// index, so nested fragments unfold depth-first, left to right.
pub fn flatten(root: Node) -> Vec<Node> {
    let mut nodes = vec![root];
    let mut i = 0;
    while i < nodes.len() {
        match std::mem::take(&mut nodes[i]) {
            Node::Fragment { children } => {
                nodes.splice(i..=i, children);
            }
            node => {
                nodes[i] = node;
                i += 1;
            }
        }
    }
    nodes
}

/// Builds an inline keyboard from the children of a `keyboard` node.
///
/// Buttons fill the current row and `br` starts a new one; empty rows are
/// dropped. Inert plain values are ignored.
pub fn build_keyboard(children: Vec<Node>) -> Result<InlineKeyboardMarkup, ContentError> {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut row = Vec::new();

    for child in children.into_iter().flat_map(flatten) {
        match child {
            Node::Button(button) => row.push(keyboard_button(button)?),
            Node::Br => {
                if !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                }
            }
            Node::Plain { value } if value.is_inert() => {}
            Node::Plain { value } => {
                return Err(ContentError::DisallowedKeyboardValue {
                    value: value.to_string(),
                });
            }
            other => {
                return Err(ContentError::DisallowedKeyboardChild { kind: other.kind() });
            }
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    Ok(InlineKeyboardMarkup::new(rows))
}

fn keyboard_button(button: ButtonElement) -> Result<InlineKeyboardButton, ContentError> {
    let ButtonElement { text, data, url } = button;
    match (data, url) {
        (Some(data), None) => Ok(InlineKeyboardButton::callback(text, data)),
        (None, Some(url)) => match Url::parse(&url) {
            Ok(parsed) => Ok(InlineKeyboardButton::url(text, parsed)),
            Err(e) => Err(ContentError::InvalidButtonUrl {
                label: text,
                url,
                reason: e.to_string(),
            }),
        },
        _ => Err(ContentError::AmbiguousButton { label: text }),
    }
}
