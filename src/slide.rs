use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use crate::error::{Result, ShowcaseError};

/// Stable string key of one full-viewport section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlideId(String);

impl SlideId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, immutable list of slides for one presentation session.
///
/// Always holds at least one slide, so `last_index()` is always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSequence {
    slides: Vec<SlideId>,
}

impl SlideSequence {
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slides = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (position, id) in ids.into_iter().enumerate() {
            let id = id.into().trim().to_string();
            if id.is_empty() {
                return Err(ShowcaseError::BlankSlideId(position));
            }
            if let Some(&first) = seen.get(&id) {
                return Err(ShowcaseError::DuplicateSlideId {
                    id,
                    first,
                    second: position,
                });
            }
            seen.insert(id.clone(), position);
            slides.push(SlideId(id));
        }

        if slides.is_empty() {
            return Err(ShowcaseError::EmptySequence);
        }

        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    // Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&SlideId> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideId> {
        self.slides.iter()
    }
}

impl Index<usize> for SlideSequence {
    type Output = SlideId;

    fn index(&self, index: usize) -> &SlideId {
        &self.slides[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order_and_trims_ids() {
        let seq = SlideSequence::new([" hero", "brain ", "summary"]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.last_index(), 2);
        assert_eq!(seq.get(1).map(SlideId::as_str), Some("brain"));
        assert_eq!(seq.get(3), None);
    }

    #[test]
    fn rejects_empty_sequence() {
        let ids: Vec<String> = Vec::new();
        assert_eq!(SlideSequence::new(ids), Err(ShowcaseError::EmptySequence));
    }

    #[test]
    fn rejects_blank_and_duplicate_ids() {
        assert_eq!(
            SlideSequence::new(["hero", "  "]),
            Err(ShowcaseError::BlankSlideId(1))
        );
        assert_eq!(
            SlideSequence::new(["hero", "brain", "hero"]),
            Err(ShowcaseError::DuplicateSlideId {
                id: "hero".into(),
                first: 0,
                second: 2,
            })
        );
    }
}
