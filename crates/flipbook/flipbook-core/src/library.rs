//! Named store of authored sequences shared by many players.

use crate::error::FlipbookError;
use crate::sequence::SpriteSequence;
use crate::Result;

/// Sequences keyed by name, in insertion order.
#[derive(Clone, Debug)]
pub struct SequenceLibrary<I> {
    items: Vec<SpriteSequence<I>>,
}

impl<I> Default for SequenceLibrary<I> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<I> SequenceLibrary<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sequence; fails if the name is taken.
    pub fn insert(&mut self, sequence: SpriteSequence<I>) -> Result<()> {
        if self.contains(sequence.name()) {
            return Err(FlipbookError::DuplicateSequence {
                name: sequence.name().to_string(),
            });
        }
        self.items.push(sequence);
        Ok(())
    }

    /// Add a sequence, returning the one it replaced.
    pub fn insert_or_replace(&mut self, sequence: SpriteSequence<I>) -> Option<SpriteSequence<I>> {
        match self.items.iter_mut().find(|s| s.name() == sequence.name()) {
            Some(slot) => Some(std::mem::replace(slot, sequence)),
            None => {
                self.items.push(sequence);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SpriteSequence<I>> {
        self.items.iter().find(|s| s.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<SpriteSequence<I>> {
        let pos = self.items.iter().position(|s| s.name() == name)?;
        Some(self.items.remove(pos))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpriteSequence<I>> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use crate::sequence::LoopMode;

    fn seq(name: &str, fps: u32) -> SpriteSequence<u8> {
        SpriteSequence::new(name, fps, LoopMode::Single, vec![Frame::new(0)]).unwrap()
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut lib = SequenceLibrary::new();
        lib.insert(seq("walk", 10)).unwrap();
        assert_eq!(
            lib.insert(seq("walk", 12)),
            Err(FlipbookError::DuplicateSequence {
                name: "walk".into()
            })
        );
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn replace_get_remove() {
        let mut lib = SequenceLibrary::new();
        assert!(lib.insert_or_replace(seq("walk", 10)).is_none());
        let old = lib.insert_or_replace(seq("walk", 12)).unwrap();
        assert_eq!(old.fps(), 10);
        assert_eq!(lib.get("walk").map(|s| s.fps()), Some(12));
        lib.insert(seq("run", 20)).unwrap();
        assert_eq!(lib.names().collect::<Vec<_>>(), vec!["walk", "run"]);
        assert!(lib.remove("walk").is_some());
        assert!(lib.get("walk").is_none());
        assert!(!lib.is_empty());
    }
}
