use std::collections::HashMap;

use crate::types::*;
use crate::letters::*;

#[derive(Clone,Debug)]
pub struct WordEntry {
    pub text: String,

    /// The letters of the text, precomputed for containment tests
    pub letters: LetterMultiset,
}

///Map integers (indices correspond to WordId) to words with their letters
pub type WordDecoder = Vec<WordEntry>;

///Maps strings to integers
pub type WordEncoder = HashMap<String, WordId>;

///An ordered list of distinct words, in the order they were added
#[derive(Clone,Debug,Default)]
pub struct IndexedWordList {
    decoder: WordDecoder,
    encoder: WordEncoder,
}

impl IndexedWordList {
    pub fn new() -> Self {
        Self::default()
    }

    ///Builds a word list, words are lowercased and duplicates are ignored
    pub fn from_words<I, S>(words: I) -> Result<Self, AnagramError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut wordlist = Self::new();
        for word in words {
            wordlist.add(word.as_ref())?;
        }
        Ok(wordlist)
    }

    ///Adds a word (folded to lowercase), returns its ID. If the word was already present, the
    ///existing ID is returned.
    pub fn add(&mut self, text: &str) -> Result<WordId, AnagramError> {
        let text = text.to_lowercase();
        if let Some(word_id) = self.encoder.get(&text) {
            return Ok(*word_id);
        }
        let letters = LetterMultiset::from_word(&text)?;
        let word_id = self.decoder.len() as WordId;
        self.encoder.insert(text.clone(), word_id);
        self.decoder.push(WordEntry {
            text,
            letters,
        });
        Ok(word_id)
    }

    pub fn get(&self, word_id: WordId) -> Option<&WordEntry> {
        self.decoder.get(word_id as usize)
    }

    pub fn id_of(&self, text: &str) -> Option<WordId> {
        self.encoder.get(text).copied()
    }

    pub fn len(&self) -> usize {
        self.decoder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoder.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordEntry> {
        self.decoder.iter()
    }

    ///Returns, in order, the IDs of all words from `start` onward that fit in the given letters
    ///and are at least `min_length` letters long
    pub fn candidates(&self, letters: &LetterMultiset, start: usize, min_length: usize) -> Vec<WordId> {
        self.decoder.iter().enumerate().skip(start)
            .filter(|(_, entry)| !entry.letters.is_empty() && entry.letters.len() >= min_length && entry.letters.fits_in(letters))
            .map(|(word_id, _)| word_id as WordId)
            .collect()
    }
}

pub struct WordlistParams {
    ///Column containing the word (0-indexed, columns are tab separated)
    pub text_column: u8,
}

impl Default for WordlistParams {
    fn default() -> Self {
        Self {
            text_column: 0,
        }
    }
}
