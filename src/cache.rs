use std::collections::HashMap;
use std::rc::Rc;

use crate::types::*;

///The state a word-level search frame is in, as far as its completions are concerned
#[derive(Clone,Debug,PartialEq,Eq,Hash)]
pub struct CacheKey {
    ///Anagram value of the letters that remain to be used
    pub letters: AnaValue,
    ///The first word ID that may still be used
    pub start: WordId,
    ///Number of words that may still be used (None if unlimited)
    pub budget: Option<usize>,
}

///All completions (sequences of word IDs) of a single state
pub type Completions = Rc<Vec<Vec<WordId>>>;

///Memoizes the completions of word-level search states. Only complete results are stored.
#[derive(Default)]
pub struct AnagramCache {
    entries: HashMap<CacheKey, Completions>,
    max_size: usize,
    pub hits: usize,
    pub misses: usize,
}

impl AnagramCache {
    ///Creates a cache that is cleared by `check()` once it holds more than `max_size` entries (0 for no limit)
    pub fn new(max_size: usize) -> AnagramCache {
        AnagramCache {
            entries: HashMap::new(),
            max_size,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<Completions> {
        match self.entries.get(key) {
            Some(completions) => {
                self.hits += 1;
                Some(completions.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, completions: Vec<Vec<WordId>>) {
        self.entries.insert(key, Rc::new(completions));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    ///Enforces the maximum size, must only be called between searches
    pub fn check(&mut self) {
        if self.max_size > 0 && (self.entries.len() > self.max_size) {
            self.entries.clear();
        }
    }
}

///Per-caller state for word-level searches: the parameters and the cache that is valid for them.
///A session must only be used with a single word list.
#[derive(Default)]
pub struct SearchSession {
    params: SearchParameters,
    pub cache: AnagramCache,
}

impl SearchSession {
    pub fn new(params: SearchParameters) -> Self {
        SearchSession {
            params,
            cache: AnagramCache::default(),
        }
    }

    pub fn with_cache(params: SearchParameters, cache: AnagramCache) -> Self {
        SearchSession {
            params,
            cache,
        }
    }

    pub fn params(&self) -> &SearchParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::*;

    fn key(text: &str, start: WordId) -> CacheKey {
        CacheKey { letters: text.letters().anahash(), start, budget: None }
    }

    #[test]
    fn keys_ignore_letter_order() {
        let mut cache = AnagramCache::new(0);
        cache.insert(key("tac", 0), vec!(vec!(1)));
        assert_eq!(cache.get(&key("act", 0)).map(|c| c.len()), Some(1));
        assert!(cache.get(&key("act", 1)).is_none());
        assert_eq!((cache.hits, cache.misses), (1, 1));
    }

    #[test]
    fn check_clears_when_full() {
        let mut cache = AnagramCache::new(1);
        cache.insert(key("a", 0), vec!());
        cache.check();
        assert_eq!(cache.len(), 1);
        cache.insert(key("b", 0), vec!());
        cache.check();
        assert!(cache.is_empty());
    }
}
