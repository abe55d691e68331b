use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use vocab_types::{GameError, WordEntry, WordId};

use crate::{RandomSource, SourceRng};

/// The words currently in scope. Cloning shares the underlying storage, so a
/// session's copy is a snapshot that later `set_words` calls cannot touch.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    words: Arc<[WordEntry]>,
}

impl WordPool {
    pub fn new(words: Vec<WordEntry>) -> Self {
        Self {
            words: words.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.words.get(id.0)
    }

    /// Ids handed out by this pool are always in range.
    pub fn entry(&self, id: WordId) -> &WordEntry {
        &self.words[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = WordId> + '_ {
        (0..self.words.len()).map(WordId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &WordEntry)> {
        self.words.iter().enumerate().map(|(i, w)| (WordId(i), w))
    }

    pub fn shares_storage_with(&self, other: &WordPool) -> bool {
        Arc::ptr_eq(&self.words, &other.words)
    }

    /// Random permutation of every id in the pool.
    pub fn shuffled_copy(&self, rng: &mut dyn RandomSource) -> Vec<WordId> {
        let mut ids: Vec<WordId> = self.ids().collect();
        ids.shuffle(&mut SourceRng::new(rng));
        ids
    }

    /// Uniform pick; repeated calls may return the same id.
    pub fn sample_one(&self, rng: &mut dyn RandomSource) -> Result<WordId, GameError> {
        if self.is_empty() {
            return Err(GameError::SamplingExhausted {
                requested: 1,
                available: 0,
            });
        }
        Ok(WordId(SourceRng::new(rng).gen_range(0..self.len())))
    }

    /// `n` distinct ids, none of them in `excluding`.
    ///
    /// Callers must make sure enough candidates remain; if they do not, this
    /// returns `SamplingExhausted` rather than retrying forever.
    pub fn sample_distinct(
        &self,
        n: usize,
        excluding: &[WordId],
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<WordId>, GameError> {
        let excluded: HashSet<WordId> = excluding.iter().copied().collect();
        let mut candidates: Vec<WordId> = self.ids().filter(|id| !excluded.contains(id)).collect();

        if candidates.len() < n {
            return Err(GameError::SamplingExhausted {
                requested: n,
                available: candidates.len(),
            });
        }

        let (picked, _) = candidates.partial_shuffle(&mut SourceRng::new(rng), n);
        Ok(picked.to_vec())
    }

    /// The first `min(n, len)` ids of a fresh shuffle.
    pub fn sample_subset(&self, n: usize, rng: &mut dyn RandomSource) -> Vec<WordId> {
        let mut ids = self.shuffled_copy(rng);
        ids.truncate(n);
        ids
    }
}

impl From<Vec<WordEntry>> for WordPool {
    fn from(words: Vec<WordEntry>) -> Self {
        Self::new(words)
    }
}
