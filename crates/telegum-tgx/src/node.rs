use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::entity::TextEntity;

/// One node of a message element tree.
///
/// Trees are transient: they are built per render call, converted into a
/// message, and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    /// A primitive leaf value.
    Plain {
        #[serde(default)]
        value: PlainValue,
    },
    /// Children wrapped in a single styling entity.
    Text {
        entity: TextEntity,
        #[serde(default)]
        children: Vec<Node>,
    },
    /// A line break in text, or a row break inside a keyboard.
    Br,
    /// A transparent group; flattening replaces it with its children.
    Fragment {
        #[serde(default)]
        children: Vec<Node>,
    },
    Photo(PhotoElement),
    /// Detected, but not sendable yet.
    Video { file: FileSource },
    /// An inline keyboard. Children are buttons, `br` row breaks and inert plain values.
    Keyboard {
        #[serde(default)]
        children: Vec<Node>,
    },
    Button(ButtonElement),
}

/// The default node is an inert plain value.
impl Default for Node {
    fn default() -> Self {
        Self::Plain {
            value: PlainValue::Nothing,
        }
    }
}

impl Node {
    /// Kind name used in serialized trees and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain { .. } => "plain",
            Self::Text { .. } => "text",
            Self::Br => "br",
            Self::Fragment { .. } => "fragment",
            Self::Photo(_) => "photo",
            Self::Video { .. } => "video",
            Self::Keyboard { .. } => "keyboard",
            Self::Button(_) => "button",
        }
    }

    /// Returns true for plain leaves that render to nothing (booleans and nothing).
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Plain { value } if value.is_inert())
    }

    /// An empty fragment.
    pub fn empty() -> Self {
        Self::Fragment {
            children: Vec::new(),
        }
    }

    /// Splits the node into a child list: a fragment yields its children,
    /// anything else yields itself.
    pub(crate) fn into_children(self) -> Vec<Node> {
        match self {
            Self::Fragment { children } => children,
            other => vec![other],
        }
    }
}

/// Value carried by a `plain` node.
///
/// `Bool` and `Nothing` are inert: they never render and are skipped inside
/// keyboards, so conditional children (`Option`, `bool`) can sit in a tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlainValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    #[default]
    Nothing,
}

impl PlainValue {
    pub fn is_inert(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Nothing)
    }
}

impl fmt::Display for PlainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write_number(f, *x),
            Self::Text(s) => f.write_str(s),
            Self::Nothing => f.write_str("null"),
        }
    }
}

/// Formats a float the way JavaScript's `String(number)` does: exponent
/// notation outside `[1e-6, 1e21)`, no sign on zero, `Infinity` spelled out.
fn write_number(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x == 0.0 {
        return f.write_str("0");
    }
    if x.is_infinite() {
        return f.write_str(if x < 0.0 { "-Infinity" } else { "Infinity" });
    }
    let magnitude = x.abs();
    if x.is_nan() || (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{x}");
    }
    let exp = format!("{x:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exp),
    }
}

/// Where a photo or video comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSource {
    /// A `file_id` of a file already stored on Telegram servers.
    FileId(String),
    /// An HTTP URL Telegram downloads the file from.
    Url(String),
    /// A local file uploaded with the request.
    Path(PathBuf),
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// A photo node.
///
/// The caption is built from `children` followed by the text nodes that sit
/// next to the photo at the root of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoElement {
    pub file: FileSource,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl PhotoElement {
    pub fn new(file: FileSource) -> Self {
        Self {
            file,
            spoiler: false,
            children: Vec::new(),
        }
    }

    /// Hide the photo behind a spoiler animation.
    pub fn spoiler(mut self, spoiler: bool) -> Self {
        self.spoiler = spoiler;
        self
    }

    /// Set caption children rendered ahead of the sibling text.
    pub fn caption(mut self, caption: impl Into<Node>) -> Self {
        self.children = caption.into().into_children();
        self
    }
}

impl From<PhotoElement> for Node {
    fn from(photo: PhotoElement) -> Self {
        Self::Photo(photo)
    }
}

/// A keyboard button node.
///
/// Exactly one of `data` and `url` must be set when the keyboard is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonElement {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<ButtonElement> for Node {
    fn from(button: ButtonElement) -> Self {
        Self::Button(button)
    }
}

impl From<PlainValue> for Node {
    fn from(value: PlainValue) -> Self {
        Self::Plain { value }
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        PlainValue::Text(s.to_string()).into()
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        PlainValue::Text(s).into()
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        PlainValue::Bool(b).into()
    }
}

impl From<f64> for Node {
    fn from(x: f64) -> Self {
        PlainValue::Float(x).into()
    }
}

macro_rules! integer_into_node {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(n: $t) -> Self {
                    PlainValue::Integer(i64::from(n)).into()
                }
            }
        )*
    };
}

integer_into_node!(i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(
            Self::Plain {
                value: PlainValue::Nothing,
            },
            Into::into,
        )
    }
}

impl From<Vec<Node>> for Node {
    fn from(children: Vec<Node>) -> Self {
        Self::Fragment { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_display_matches_bot_text() {
        assert_eq!(PlainValue::Integer(42).to_string(), "42");
        assert_eq!(PlainValue::Float(2.0).to_string(), "2");
        assert_eq!(PlainValue::Float(0.5).to_string(), "0.5");
        assert_eq!(PlainValue::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(PlainValue::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(PlainValue::Text("a & b".into()).to_string(), "a & b");
    }

    #[test]
    fn floats_use_exponent_outside_plain_range() {
        let show = |x: f64| PlainValue::Float(x).to_string();
        assert_eq!(show(1e21), "1e+21");
        assert_eq!(show(1.5e300), "1.5e+300");
        assert_eq!(show(1e-7), "1e-7");
        assert_eq!(show(-2.5e-9), "-2.5e-9");
        assert_eq!(show(-0.0), "0");
        assert_eq!(show(1e20), "100000000000000000000");
        assert_eq!(show(0.000_001), "0.000001");
    }

    #[test]
    fn bools_and_nothing_are_inert() {
        assert!(Node::from(true).is_inert());
        assert!(Node::from(false).is_inert());
        assert!(Node::from(None::<String>).is_inert());
        assert!(!Node::from(0).is_inert());
        assert!(!Node::from("").is_inert());
        assert!(!Node::Br.is_inert());
    }

    #[test]
    fn default_node_is_inert() {
        assert!(Node::default().is_inert());
    }

    #[test]
    fn option_some_converts_to_inner_node() {
        assert_eq!(Node::from(Some("x")), Node::from("x"));
    }

    #[test]
    fn deserializes_tagged_tree() {
        let json = r#"{
            "type": "fragment",
            "children": [
                {"type": "text", "entity": {"type": "bold"}, "children": [{"type": "plain", "value": "hi"}]},
                {"type": "br"},
                {"type": "plain", "value": 3},
                {"type": "plain", "value": null},
                {"type": "photo", "file": {"url": "https://example.com/cat.jpg"}, "spoiler": true},
                {"type": "keyboard", "children": [{"type": "button", "text": "Go", "url": "https://t.me"}]}
            ]
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let Node::Fragment { children } = node else {
            panic!("expected fragment");
        };
        assert_eq!(children.len(), 6);
        assert_eq!(
            children[0],
            Node::Text {
                entity: TextEntity::Bold,
                children: vec![Node::from("hi")],
            }
        );
        assert_eq!(children[1], Node::Br);
        assert_eq!(children[2], Node::from(3));
        assert!(children[3].is_inert());
        assert_eq!(
            children[4],
            Node::Photo(
                PhotoElement::new(FileSource::Url("https://example.com/cat.jpg".into()))
                    .spoiler(true)
            )
        );
        assert_eq!(children[5].kind(), "keyboard");
    }

    #[test]
    fn serialized_button_omits_missing_fields() {
        let node = Node::Button(ButtonElement {
            text: "Open".into(),
            data: None,
            url: Some("https://t.me".into()),
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "button", "text": "Open", "url": "https://t.me"})
        );
    }

    #[test]
    fn caption_unwraps_fragment() {
        let photo = PhotoElement::new(FileSource::FileId("abc".into()))
            .caption(vec![Node::from("a"), Node::from("b")]);
        assert_eq!(photo.children, vec![Node::from("a"), Node::from("b")]);
    }
}
