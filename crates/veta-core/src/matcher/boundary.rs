//! Word-boundary rules applied around every candidate match.

use std::collections::BTreeSet;

use crate::VetaError;

/// Common Chinese function characters that may touch a matched phrase.
const ZH_ADJOINING: &[char] = &[
    '的', '了', '着', '过', '地', '得', '很', '也', '都', '就', '又', '还', '吗', '呢', '吧', '啊',
    '和', '与', '我', '你', '他', '她', '它', '们', '是', '在', '不', '太', '真', '最', '有', '被',
];

/// Japanese particles and copula fragments that may touch a matched phrase.
const JA_ADJOINING: &[char] = &[
    'は', 'が', 'を', 'に', 'で', 'と', 'の', 'も', 'へ', 'や', 'か', 'ね', 'よ', 'な', 'た', 'て',
    'だ', 'す', 'ま', 'し', 'い', 'く',
];

/// Characters that belong to a phrase; anything else is a boundary.
#[must_use]
pub fn is_phrase_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '_'
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryRules {
    adjoining: BTreeSet<char>,
    unsegmented: bool,
}

impl Default for BoundaryRules {
    fn default() -> Self {
        Self::strict()
    }
}

impl BoundaryRules {
    /// Whitespace-delimited languages: a match must touch a non-phrase character or a string edge.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            adjoining: BTreeSet::new(),
            unsegmented: false,
        }
    }

    /// Rules for a language tag. Unknown tags get [`BoundaryRules::strict`].
    #[must_use]
    pub fn for_language(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh-tw" | "chinese" => Self {
                adjoining: ZH_ADJOINING.iter().copied().collect(),
                unsegmented: true,
            },
            "ja" | "japanese" => Self {
                adjoining: JA_ADJOINING.iter().copied().collect(),
                unsegmented: false,
            },
            _ => Self::strict(),
        }
    }

    /// Build custom rules.
    ///
    /// `unsegmented` enables back-to-back matches and the adjacency correction
    /// used for scripts written without word separators.
    ///
    /// # Errors
    ///
    /// Returns [`VetaError::InvalidInput`] if the set is empty or contains
    /// whitespace or control characters.
    pub fn custom<I>(adjoining: I, unsegmented: bool) -> Result<Self, VetaError>
    where
        I: IntoIterator<Item = char>,
    {
        let adjoining: BTreeSet<char> = adjoining.into_iter().collect();
        if adjoining.is_empty() {
            return Err(VetaError::InvalidInput(
                "custom boundary rules need at least one adjoining character".to_string(),
            ));
        }
        if let Some(bad) = adjoining
            .iter()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(VetaError::InvalidInput(format!(
                "adjoining character {bad:?} is already a separator"
            )));
        }
        Ok(Self {
            adjoining,
            unsegmented,
        })
    }

    /// Whether `neighbor` (the character just outside a match) keeps the boundary intact.
    #[must_use]
    pub fn permits(&self, neighbor: Option<char>) -> bool {
        match neighbor {
            None => true,
            Some(c) => !is_phrase_char(c) || self.adjoining.contains(&c),
        }
    }

    #[must_use]
    pub fn is_unsegmented(&self) -> bool {
        self.unsegmented
    }
}
