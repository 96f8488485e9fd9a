//! Word and whitespace region expansion used by double-click selection.

use std::collections::BTreeSet;

/// Codepoints that split words in addition to whitespace.
///
/// The default set holds only `-`, so `snake_case` selects as one word while
/// `kebab-case` selects piecewise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSeparators {
    chars: BTreeSet<char>,
}

impl WordSeparators {
    /// A set with no separators; only whitespace splits words.
    pub fn none() -> Self {
        Self {
            chars: BTreeSet::new(),
        }
    }

    /// Add a separator.
    pub fn with(mut self, c: char) -> Self {
        self.chars.insert(c);
        self
    }

    /// Whether `c` is a separator. Whitespace is never reported here.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl Default for WordSeparators {
    fn default() -> Self {
        Self::none().with('-')
    }
}

impl FromIterator<char> for WordSeparators {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

/// What a [`TextRegion`] is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Whitespace,
    Word,
    Separator,
}

/// A half-open codepoint range `[start, end)` within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRegion {
    pub start: usize,
    pub end: usize,
    pub kind: RegionKind,
}

impl TextRegion {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The region as a `(start, end)` pair.
    pub fn bounds(&self) -> (usize, usize) {
        (self.start, self.end)
    }
}

fn classify(c: char, separators: &WordSeparators) -> RegionKind {
    if c.is_whitespace() {
        RegionKind::Whitespace
    } else if separators.contains(c) {
        RegionKind::Separator
    } else {
        RegionKind::Word
    }
}

/// Expand `index` to the maximal run of codepoints of the same kind.
///
/// A negative index has no region. An index at or past the end selects the
/// trailing whitespace run, which is empty when the text does not end in
/// whitespace.
pub fn text_region_at(text: &[char], index: isize, separators: &WordSeparators) -> Option<TextRegion> {
    let index = usize::try_from(index).ok()?;
    let len = text.len();

    if index >= len {
        let start = text
            .iter()
            .rposition(|c| !c.is_whitespace())
            .map_or(0, |i| i + 1);
        return Some(TextRegion {
            start,
            end: len,
            kind: RegionKind::Whitespace,
        });
    }

    let kind = classify(text[index], separators);
    let same = |c: &char| classify(*c, separators) == kind;
    let start = text[..index]
        .iter()
        .rposition(|c| !same(c))
        .map_or(0, |i| i + 1);
    let end = text[index..]
        .iter()
        .position(|c| !same(c))
        .map_or(len, |i| index + i);

    Some(TextRegion { start, end, kind })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn bounds(text: &[char], index: isize) -> Option<(usize, usize)> {
        text_region_at(text, index, &WordSeparators::default()).map(|r| r.bounds())
    }

    #[test]
    fn test_mixed_script_regions() {
        let text = chars(" fish 日本語日  \t  test 本日本 moose  \t");
        assert_eq!(text.len(), 32);

        assert_eq!(bounds(&text, -1), None);
        assert_eq!(bounds(&text, 32), Some((29, 32)));
        assert_eq!(bounds(&text, 132), Some((29, 32)));
        assert_eq!(bounds(&text, 0), Some((0, 1)));
        assert_eq!(bounds(&text, 1), Some((1, 5)));
        assert_eq!(bounds(&text, 4), Some((1, 5)));
        assert_eq!(bounds(&text, 6), Some((6, 10)));
        assert_eq!(bounds(&text, 9), Some((6, 10)));
        assert_eq!(bounds(&text, 10), Some((10, 15)));
        assert_eq!(bounds(&text, 30), Some((29, 32)));
    }

    #[test]
    fn test_separators_split_words() {
        let text = chars("This-is_a-test");
        let region = text_region_at(&text, 6, &WordSeparators::default());
        assert_eq!(
            region,
            Some(TextRegion {
                start: 5,
                end: 9,
                kind: RegionKind::Word
            })
        );

        let dash = text_region_at(&text, 4, &WordSeparators::default()).map(|r| (r.bounds(), r.kind));
        assert_eq!(dash, Some(((4, 5), RegionKind::Separator)));
    }

    #[test]
    fn test_custom_separators() {
        let text = chars("This-is_a-test");
        let separators: WordSeparators = ['_'].into_iter().collect();
        let region = text_region_at(&text, 6, &separators).map(|r| r.bounds());
        assert_eq!(region, Some((0, 7)));

        let region = text_region_at(&text, 6, &WordSeparators::none()).map(|r| r.bounds());
        assert_eq!(region, Some((0, 14)));
    }

    #[test]
    fn test_end_without_trailing_whitespace_is_empty() {
        let text = chars("fish");
        let region = text_region_at(&text, 4, &WordSeparators::default());
        assert!(region.is_some_and(|r| r.is_empty() && r.start == 4));

        let empty = text_region_at(&[], 0, &WordSeparators::default());
        assert_eq!(empty.map(|r| r.bounds()), Some((0, 0)));
    }

    #[test]
    fn test_all_whitespace() {
        let text = chars("   ");
        assert_eq!(bounds(&text, 1), Some((0, 3)));
        assert_eq!(bounds(&text, 3), Some((0, 3)));
    }
}
