//! Character trie over every lexicon phrase.

use std::collections::HashMap;

use super::boundary::BoundaryRules;

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, usize>,
    /// Index into the lexicon's entry list of the phrase ending here.
    terminal: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct PhraseTrie {
    nodes: Vec<Node>,
}

/// One accepted, non-overlapping match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Occurrence {
    pub start: usize,
    pub end: usize,
    pub entry: usize,
}

impl PhraseTrie {
    /// Build from `(phrase, entry index)` pairs.
    ///
    /// Phrases are inserted longest first; when a phrase repeats, the first
    /// inserted entry keeps the terminal.
    pub(crate) fn build(phrases: &[(Vec<char>, usize)]) -> Self {
        let mut order: Vec<&(Vec<char>, usize)> = phrases.iter().collect();
        order.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut trie = Self {
            nodes: vec![Node::default()],
        };
        for (chars, entry) in order {
            let mut cursor = 0;
            for &c in chars {
                cursor = match trie.nodes[cursor].children.get(&c) {
                    Some(&next) => next,
                    None => {
                        trie.nodes.push(Node::default());
                        let next = trie.nodes.len() - 1;
                        trie.nodes[cursor].children.insert(c, next);
                        next
                    }
                };
            }
            trie.nodes[cursor].terminal.get_or_insert(*entry);
        }
        trie
    }

    /// Longest phrase starting at `start` whose right edge is boundary-valid.
    ///
    /// For unsegmented scripts a right edge is also valid when a
    /// boundary-valid phrase starts there. `memo` caches results per start.
    fn longest_at(
        &self,
        text: &[char],
        start: usize,
        rules: &BoundaryRules,
        memo: &mut [Option<Option<(usize, usize)>>],
    ) -> Option<(usize, usize)> {
        if let Some(cached) = memo[start] {
            return cached;
        }
        let mut cursor = 0;
        let mut best = None;
        for (offset, c) in text[start..].iter().enumerate() {
            let Some(&next) = self.nodes[cursor].children.get(c) else {
                break;
            };
            cursor = next;
            if let Some(entry) = self.nodes[cursor].terminal {
                let end = start + offset + 1;
                let right_ok = rules.permits(text.get(end).copied())
                    || (rules.is_unsegmented() && self.longest_at(text, end, rules, memo).is_some());
                if right_ok {
                    best = Some((end, entry));
                }
            }
        }
        memo[start] = Some(best);
        best
    }

    /// Scan left to right and return non-overlapping occurrences.
    ///
    /// At each boundary-valid start the longest valid phrase wins, and any
    /// candidate starting inside an accepted occurrence is discarded. For
    /// unsegmented scripts a phrase may also end where another boundary-valid
    /// phrase begins, and may begin where the previous accepted occurrence ended.
    pub(crate) fn scan(&self, text: &[char], rules: &BoundaryRules) -> Vec<Occurrence> {
        let mut accepted: Vec<Occurrence> = Vec::new();
        let mut memo = vec![None; text.len() + 1];
        let mut i = 0;
        while i < text.len() {
            let chained = rules.is_unsegmented() && accepted.last().is_some_and(|o| o.end == i);
            let left_ok = chained || rules.permits(i.checked_sub(1).map(|p| text[p]));
            if left_ok {
                if let Some((end, entry)) = self.longest_at(text, i, rules, &mut memo) {
                    accepted.push(Occurrence {
                        start: i,
                        end,
                        entry,
                    });
                    i = end;
                    continue;
                }
            }
            i += 1;
        }
        accepted
    }
}
