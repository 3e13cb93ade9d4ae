//! The poem being rendered.

use serde::Deserialize;

use crate::error::SenryuError;

/// A three-line poem and its author.
///
/// All four fields are non-empty. There is no length limit: text longer than
/// the card runs off the canvas rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Senryu {
    first_sentence: String,
    second_sentence: String,
    third_sentence: String,
    author_name: String,
}

impl Senryu {
    /// Build a poem, rejecting empty fields with [`SenryuError::MissingInput`].
    pub fn new(
        first_sentence: impl Into<String>,
        second_sentence: impl Into<String>,
        third_sentence: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Result<Self, SenryuError> {
        let senryu = Self {
            first_sentence: first_sentence.into(),
            second_sentence: second_sentence.into(),
            third_sentence: third_sentence.into(),
            author_name: author_name.into(),
        };

        let missing: Vec<&str> = senryu
            .fields()
            .into_iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(SenryuError::MissingInput(missing.join(", ")));
        }
        Ok(senryu)
    }

    pub fn first_sentence(&self) -> &str {
        &self.first_sentence
    }

    pub fn second_sentence(&self) -> &str {
        &self.second_sentence
    }

    pub fn third_sentence(&self) -> &str {
        &self.third_sentence
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("first_sentence", self.first_sentence.as_str()),
            ("second_sentence", self.second_sentence.as_str()),
            ("third_sentence", self.third_sentence.as_str()),
            ("author_name", self.author_name.as_str()),
        ]
    }
}

/// Poem fields as they arrive from a request; any may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SenryuParams {
    pub first_sentence: Option<String>,
    pub second_sentence: Option<String>,
    pub third_sentence: Option<String>,
    pub author_name: Option<String>,
}

impl TryFrom<SenryuParams> for Senryu {
    type Error = SenryuError;

    fn try_from(params: SenryuParams) -> Result<Self, Self::Error> {
        Senryu::new(
            params.first_sentence.unwrap_or_default(),
            params.second_sentence.unwrap_or_default(),
            params.third_sentence.unwrap_or_default(),
            params.author_name.unwrap_or_default(),
        )
    }
}
