//! Constructors that make element trees read like markup.

use crate::entity::TextEntity;
use crate::node::{ButtonElement, FileSource, Node, PhotoElement};

pub fn plain(value: impl Into<Node>) -> Node {
    value.into()
}

/// Wrap `child` in a styling entity. A fragment child contributes its children directly.
pub fn text(entity: TextEntity, child: impl Into<Node>) -> Node {
    Node::Text {
        entity,
        children: child.into().into_children(),
    }
}

pub fn bold(child: impl Into<Node>) -> Node {
    text(TextEntity::Bold, child)
}

pub fn italic(child: impl Into<Node>) -> Node {
    text(TextEntity::Italic, child)
}

pub fn underline(child: impl Into<Node>) -> Node {
    text(TextEntity::Underline, child)
}

pub fn strikethrough(child: impl Into<Node>) -> Node {
    text(TextEntity::Strikethrough, child)
}

pub fn spoiler(child: impl Into<Node>) -> Node {
    text(TextEntity::Spoiler, child)
}

pub fn blockquote(child: impl Into<Node>) -> Node {
    text(TextEntity::Blockquote, child)
}

pub fn link(url: impl Into<String>, child: impl Into<Node>) -> Node {
    text(TextEntity::Link { url: url.into() }, child)
}

pub fn custom_emoji(id: impl Into<String>, child: impl Into<Node>) -> Node {
    text(TextEntity::CustomEmoji { id: id.into() }, child)
}

pub fn code(child: impl Into<Node>) -> Node {
    text(TextEntity::Code, child)
}

pub fn codeblock(language: Option<&str>, child: impl Into<Node>) -> Node {
    text(
        TextEntity::Codeblock {
            language: language.map(str::to_string),
        },
        child,
    )
}

pub fn br() -> Node {
    Node::Br
}

pub fn fragment<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Node::Fragment {
        children: children.into_iter().map(Into::into).collect(),
    }
}

/// A photo without spoiler or caption children. See [`PhotoElement`] for the builder form.
pub fn photo(file: FileSource) -> Node {
    PhotoElement::new(file).into()
}

pub fn video(file: FileSource) -> Node {
    Node::Video { file }
}

pub fn keyboard<I>(children: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Node>,
{
    Node::Keyboard {
        children: children.into_iter().map(Into::into).collect(),
    }
}

/// A callback button carrying already-encoded callback data.
pub fn button_data(label: impl Into<String>, data: impl Into<String>) -> Node {
    ButtonElement {
        text: label.into(),
        data: Some(data.into()),
        url: None,
    }
    .into()
}

/// A button that opens `url`.
pub fn button_url(label: impl Into<String>, url: impl Into<String>) -> Node {
    ButtonElement {
        text: label.into(),
        data: None,
        url: Some(url.into()),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_flattens_direct_fragment_child() {
        let node = bold(vec![Node::from("a"), italic("b")]);
        let Node::Text { entity, children } = node else {
            panic!("expected text");
        };
        assert_eq!(entity, TextEntity::Bold);
        assert_eq!(children.len(), 2);
        assert_eq!(children[1].kind(), "text");
    }

    #[test]
    fn codeblock_carries_language() {
        let node = codeblock(Some("rust"), "fn main() {}");
        assert_eq!(
            node,
            Node::Text {
                entity: TextEntity::Codeblock {
                    language: Some("rust".into())
                },
                children: vec![Node::from("fn main() {}")],
            }
        );
    }

    #[test]
    fn fragment_accepts_mixed_primitives() {
        let node = fragment([Node::from("count: "), Node::from(3), Node::from(false)]);
        let Node::Fragment { children } = node else {
            panic!("expected fragment");
        };
        assert_eq!(children.len(), 3);
        assert!(children[2].is_inert());
    }

    #[test]
    fn buttons_set_exactly_one_target() {
        let Node::Button(b) = button_data("Yes", "#abcdef01:") else {
            panic!("expected button");
        };
        assert_eq!(b.data.as_deref(), Some("#abcdef01:"));
        assert!(b.url.is_none());

        let Node::Button(b) = button_url("Docs", "https://core.telegram.org") else {
            panic!("expected button");
        };
        assert!(b.data.is_none());
        assert_eq!(b.url.as_deref(), Some("https://core.telegram.org"));
    }
}
