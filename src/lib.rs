extern crate ibig;
extern crate num_traits;

use std::fs::File;
use std::io::{BufReader,BufRead,Read};
use std::collections::HashSet;

pub mod types;
pub mod letters;
pub mod trie;
pub mod iterators;
pub mod vocab;
pub mod cache;


pub use crate::types::*;
pub use crate::letters::*;
pub use crate::trie::*;
pub use crate::iterators::*;
pub use crate::vocab::*;
pub use crate::cache::*;


///The lexicon both searches draw from: a trie for letter-by-letter search and an indexed word
///list for word-by-word search, always holding the same words.
pub struct Dictionary {
    pub trie: Trie,

    pub wordlist: IndexedWordList,

    ///Words that will be skipped when loading word lists
    pub ignore: HashSet<String>,

    /// Stores the names of the loaded word lists
    pub wordlists: Vec<String>,

    pub debug: bool
}

impl Dictionary {
    pub fn new(debug: bool) -> Dictionary {
        Dictionary {
            trie: Trie::new(),
            wordlist: IndexedWordList::new(),
            ignore: HashSet::new(),
            wordlists: Vec::new(),
            debug,
        }
    }

    pub fn from_words<I, S>(words: I) -> Result<Dictionary, AnagramError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Dictionary::new(false);
        for word in words {
            dictionary.add_word(word.as_ref())?;
        }
        Ok(dictionary)
    }

    ///Adds a word to both the trie and the word list. Returns false if the word was ignored or
    ///already present.
    pub fn add_word(&mut self, text: &str) -> Result<bool, AnagramError> {
        let text = text.to_lowercase();
        if self.ignore.contains(&text) || self.wordlist.id_of(&text).is_some() {
            return Ok(false);
        }
        //validates the word before anything is added
        self.wordlist.add(&text)?;
        self.trie.insert(&text)?;
        if self.debug {
            eprintln!(" -- Added to dictionary: {}", text);
        }
        Ok(true)
    }

    ///Tests if the dictionary has a specific word
    pub fn has(&self, text: &str) -> bool {
        self.trie.contains(text)
    }

    ///Read a word list from file, one word per line.
    ///Lines are trimmed and lowercased, entries that are not purely alphabetic are skipped.
    pub fn read_wordlist(&mut self, filename: &str, params: &WordlistParams) -> Result<(), AnagramError> {
        if self.debug {
            eprintln!("Reading word list from {}...", filename);
        }
        let f = File::open(filename)?;
        self.read_wordlist_from(f, params)?;
        self.wordlists.push(filename.to_string());
        Ok(())
    }

    ///Read a word list from any reader, see `read_wordlist()`.
    ///Returns the number of words added.
    pub fn read_wordlist_from(&mut self, input: impl Read, params: &WordlistParams) -> Result<usize, AnagramError> {
        let f_buffer = BufReader::new(input);
        let mut added = 0;
        let mut skipped = 0;
        for line in f_buffer.lines() {
            let line = line?;
            let text = match line.split('\t').nth(params.text_column as usize) {
                Some(text) => text.trim(),
                None => continue,
            };
            if text.is_empty() {
                continue;
            }
            match self.add_word(text) {
                Ok(true) => added += 1,
                Ok(false) => {},
                Err(AnagramError::InvalidWord(word)) => {
                    if self.debug {
                        eprintln!(" -- Skipping invalid word: {}", word);
                    }
                    skipped += 1;
                },
                Err(e) => return Err(e),
            }
        }
        if self.debug {
            eprintln!(" - Read {} words ({} skipped), dictionary size is now {} words in {} trie nodes", added, skipped, self.wordlist.len(), self.trie.len());
        }
        Ok(added)
    }

    ///Read a list of words to ignore, one per line. Only affects word lists read afterwards.
    pub fn read_ignorelist(&mut self, filename: &str) -> Result<(), AnagramError> {
        if self.debug {
            eprintln!("Reading ignore list from {}...", filename);
        }
        let f = File::open(filename)?;
        self.read_ignorelist_from(f)
    }

    pub fn read_ignorelist_from(&mut self, input: impl Read) -> Result<(), AnagramError> {
        let f_buffer = BufReader::new(input);
        for line in f_buffer.lines() {
            let line = line?;
            let text = line.trim();
            if !text.is_empty() {
                self.ignore.insert(text.to_lowercase());
            }
        }
        if self.debug {
            eprintln!(" - Ignoring {} words", self.ignore.len());
        }
        Ok(())
    }

    ///Find all anagrams of the phrase letter by letter, through the trie.
    ///Only the letters of the phrase count, case is ignored.
    pub fn char_anagrams(&self, phrase: &str, params: &SearchParameters) -> CharAnagrams<'_> {
        let letters = phrase.letters();
        if self.debug {
            eprintln!("(searching anagrams of {} letter by letter)", letters);
        }
        CharAnagrams::new(&self.trie, letters, params)
    }

    ///Find all anagrams of the phrase word by word, through the word list, using (and
    ///filling) the cache of the session
    pub fn word_anagrams<'a>(&'a self, phrase: &str, session: &'a mut SearchSession) -> WordAnagrams<'a> {
        let letters = phrase.letters();
        if self.debug {
            eprintln!("(searching anagrams of {} word by word, cache holds {} states, {} hits, {} misses)", letters, session.cache.len(), session.cache.hits, session.cache.misses);
        }
        WordAnagrams::new(&self.wordlist, letters, 0, session)
    }
}
