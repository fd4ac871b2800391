use serde::{Deserialize, Serialize};

/// Styling applied to the children of a `text` node.
///
/// Each variant corresponds to one tag of Telegram's HTML parse mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TextEntity {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Blockquote,
    Link {
        url: String,
    },
    CustomEmoji {
        id: String,
    },
    Code,
    Codeblock {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

impl TextEntity {
    /// Short lowercase name of the entity, as used in serialized trees.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Spoiler => "spoiler",
            Self::Blockquote => "blockquote",
            Self::Link { .. } => "link",
            Self::CustomEmoji { .. } => "custom-emoji",
            Self::Code => "code",
            Self::Codeblock { .. } => "codeblock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kebab_case_tag() {
        let json = serde_json::to_value(TextEntity::CustomEmoji {
            id: "5368324170671202286".to_string(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "custom-emoji", "id": "5368324170671202286"})
        );
    }

    #[test]
    fn codeblock_language_is_optional() {
        let entity: TextEntity = serde_json::from_str(r#"{"type":"codeblock"}"#).unwrap();
        assert_eq!(entity, TextEntity::Codeblock { language: None });

        let json = serde_json::to_string(&entity).unwrap();
        assert_eq!(json, r#"{"type":"codeblock"}"#);
    }

    #[test]
    fn name_matches_serialized_tag() {
        let entity = TextEntity::Link {
            url: "https://t.me".to_string(),
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], entity.name());
    }
}
