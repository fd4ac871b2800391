//! Rendering of text nodes into Telegram's HTML parse mode.

use telegum_tgx::{Node, TextEntity};

use crate::error::ContentError;

/// Escape special HTML characters for Telegram's HTML parse mode.
///
/// Telegram requires `<`, `>`, and `&` to be escaped in HTML-formatted messages.
/// `&` goes first so the entities produced for `<` and `>` stay intact.
pub fn sanitize_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render text-context nodes into an HTML string.
///
/// Plain values are escaped; the tags generated for text entities are not.
/// Inert plain values vanish and `br` becomes a newline. Media, keyboards and
/// buttons are rejected.
pub fn render_html(nodes: &[Node]) -> Result<String, ContentError> {
    let mut html = String::new();
    render_into(nodes, &mut html)?;
    Ok(html)
}

fn render_into(nodes: &[Node], html: &mut String) -> Result<(), ContentError> {
    for node in nodes {
        match node {
            Node::Plain { value } if value.is_inert() => {}
            Node::Plain { value } => html.push_str(&sanitize_html(&value.to_string())),
            Node::Fragment { children } => render_into(children, html)?,
            Node::Text { entity, children } => {
                let inner = render_html(children)?;
                html.push_str(&wrap_with_entity(&inner, entity));
            }
            Node::Br => html.push('\n'),
            other => {
                return Err(ContentError::UnsupportedInText { kind: other.kind() });
            }
        }
    }
    Ok(())
}

/// Wrap already-rendered HTML in the tag for `entity`.
pub fn wrap_with_entity(text: &str, entity: &TextEntity) -> String {
    match entity {
        TextEntity::Bold => format!("<b>{text}</b>"),
        TextEntity::Italic => format!("<i>{text}</i>"),
        TextEntity::Underline => format!("<u>{text}</u>"),
        TextEntity::Strikethrough => format!("<s>{text}</s>"),
        TextEntity::Spoiler => format!("<tg-spoiler>{text}</tg-spoiler>"),
        TextEntity::Blockquote => format!("<blockquote>{text}</blockquote>"),
        TextEntity::Link { url } => format!("<a href=\"{url}\">{text}</a>"),
        TextEntity::CustomEmoji { id } => format!("<tg-emoji emoji-id=\"{id}\">{text}</tg-emoji>"),
        TextEntity::Code => format!("<code>{text}</code>"),
        TextEntity::Codeblock {
            language: Some(language),
        } => format!("<pre><code class=\"language-{language}\">{text}</code></pre>"),
        TextEntity::Codeblock { language: None } => format!("<pre>{text}</pre>"),
    }
}
