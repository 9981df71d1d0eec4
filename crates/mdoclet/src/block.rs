//! Per-symbol documentation block supplied by the driver.

/// A named piece of metadata attached to a documentation block.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocTag {
    name: String,
    text: String,
}

impl DocTag {
    /// Create a tag from its name and markup text.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Tag name, e.g. `param` or `author`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw markup text of the tag.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A symbol's raw documentation: description text plus ordered tags.
///
/// Tag order is significant and preserved in the rendered output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocBlock {
    description: String,
    tags: Vec<DocTag>,
}

impl DocBlock {
    /// Create a block from its raw description text.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tags: Vec::new(),
        }
    }

    /// Append a tag, keeping insertion order.
    #[must_use]
    pub fn with_tag(mut self, tag: DocTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Raw description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Tags in their original order.
    #[must_use]
    pub fn tags(&self) -> &[DocTag] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_order_preserved() {
        let block = DocBlock::new("desc")
            .with_tag(DocTag::new("param", "x"))
            .with_tag(DocTag::new("return", "y"));
        let names: Vec<&str> = block.tags().iter().map(DocTag::name).collect();
        assert_eq!(names, vec!["param", "return"]);
    }
}
