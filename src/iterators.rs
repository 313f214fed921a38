use std::mem;

use crate::types::*;
use crate::letters::*;
use crate::trie::*;
use crate::vocab::*;
use crate::cache::*;

///////////////////////////////////////////////////////////////////////////////////////

#[derive(Clone,Copy,Debug)]
enum Stage {
    ///Frame was just pushed
    Enter,
    ///Next letter to try extending the current word with
    Letter(CharIndexType),
    ///All letters tried, try closing the current word
    Close,
    ///Nothing left to try, undo the entry and pop
    Done,
}

///How a frame was entered; this is exactly what gets undone when it is popped
#[derive(Clone,Copy,Debug)]
enum Entry {
    Start,
    Letter(CharIndexType),
    Close,
}

#[derive(Debug)]
struct CharFrame {
    node: NodeId,
    ///Ordering constraint: index into the completed words and the offset in that word
    constraint: Option<(usize, usize)>,
    entry: Entry,
    stage: Stage,
}

/// Finds anagrams letter by letter, walking the trie.
///
/// Each yielded anagram is a sequence of words whose letters are exactly the available
/// letters. A word that starts after a completed word may not, at any position the two
/// words share, have a letter that comes before the letter of the completed word at that
/// position. This prunes most reorderings of the same words.
///
/// The search is depth-first and explores letters in alphabetical order before it
/// considers ending the current word. The letter budget is owned by the iterator and every
/// frame undoes its own change when it is popped, so the iterator may be dropped at any point.
pub struct CharAnagrams<'a> {
    trie: &'a Trie,
    available: LetterMultiset,
    stack: Vec<CharFrame>,
    words: Vec<String>,
    current: String,
    budget: Option<usize>,
    min_word_length: usize,
}

impl<'a> CharAnagrams<'a> {
    pub fn new(trie: &'a Trie, available: LetterMultiset, params: &SearchParameters) -> CharAnagrams<'a> {
        CharAnagrams {
            trie,
            available,
            stack: vec!(CharFrame {
                node: trie.root(),
                constraint: None,
                entry: Entry::Start,
                stage: Stage::Enter,
            }),
            words: Vec::new(),
            current: String::new(),
            budget: params.word_budget(),
            min_word_length: params.min_word_length,
        }
    }

    ///The smallest letter allowed by an ordering constraint
    fn minimum_letter(&self, constraint: Option<(usize, usize)>) -> CharIndexType {
        match constraint {
            Some((word, offset)) => self.words[word].as_bytes()[offset] - b'a',
            None => 0,
        }
    }

    ///Moves the constraint one letter further along the completed word, dropping it at the end
    fn advance_constraint(&self, constraint: Option<(usize, usize)>) -> Option<(usize, usize)> {
        constraint.and_then(|(word, offset)| {
            if offset + 1 < self.words[word].len() {
                Some((word, offset + 1))
            } else {
                None
            }
        })
    }

    fn long_enough(&self) -> bool {
        self.current.len() >= self.min_word_length
    }

    ///May we complete the current word and start another one?
    fn may_close(&self, node: NodeId) -> bool {
        self.trie.is_end(node)
            && !self.current.is_empty()
            && self.long_enough()
            && self.budget.map_or(true, |budget| self.words.len() + 2 <= budget)
    }

    fn solution(&self) -> Anagram {
        let mut anagram = self.words.clone();
        if !self.current.is_empty() {
            anagram.push(self.current.clone());
        }
        anagram
    }
}

impl<'a> Iterator for CharAnagrams<'a> {
    type Item = Anagram;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.len().checked_sub(1)?;
            let (node, constraint, stage) = {
                let frame = &self.stack[top];
                (frame.node, frame.constraint, frame.stage)
            };
            match stage {
                Stage::Enter => {
                    if self.available.is_empty() {
                        //all letters used: a solution if a word may end here
                        self.stack[top].stage = Stage::Done;
                        if self.trie.is_end(node) && (self.current.is_empty() || self.long_enough()) {
                            return Some(self.solution());
                        }
                    } else {
                        self.stack[top].stage = Stage::Letter(self.minimum_letter(constraint));
                    }
                },
                Stage::Letter(index) => {
                    self.stack[top].stage = if (index as usize) + 1 < ALPHABET_SIZE {
                        Stage::Letter(index + 1)
                    } else {
                        Stage::Close
                    };
                    if let Some(child) = self.trie.child(node, index) {
                        if self.available.take(index) {
                            self.current.push(index_char(index));
                            let constraint = self.advance_constraint(constraint);
                            self.stack.push(CharFrame {
                                node: child,
                                constraint,
                                entry: Entry::Letter(index),
                                stage: Stage::Enter,
                            });
                        }
                    }
                },
                Stage::Close => {
                    self.stack[top].stage = Stage::Done;
                    if self.may_close(node) {
                        let word = mem::take(&mut self.current);
                        self.words.push(word);
                        self.stack.push(CharFrame {
                            node: self.trie.root_of(node),
                            constraint: Some((self.words.len() - 1, 0)),
                            entry: Entry::Close,
                            stage: Stage::Enter,
                        });
                    }
                },
                Stage::Done => {
                    if let Some(frame) = self.stack.pop() {
                        match frame.entry {
                            Entry::Start => {},
                            Entry::Letter(index) => {
                                self.available.take_back(index);
                                self.current.pop();
                            },
                            Entry::Close => {
                                self.current = self.words.pop().unwrap_or_default();
                            }
                        }
                    }
                }
            }
        }
    }
}

///////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
struct WordFrame {
    key: CacheKey,
    available: LetterMultiset,
    ///Position (in the candidates) of the next word to try
    next: usize,
    budget: Option<usize>,
    ///Completions found so far, relative to this frame
    found: Vec<Vec<WordId>>,
    ///Set when the completions of this frame come from the cache
    replay: Option<(Completions, usize)>,
}

/// Finds anagrams word by word, trying the words of the word list in order.
///
/// Within an anagram, words never come from an earlier position in the word list than the
/// word before them, so each combination of words is produced once. Unless the session
/// parameters forbid it, a word may be used more than once.
///
/// The completions of every state (remaining letters, first admissible word, word budget) are
/// stored in the session cache once the state has been fully explored, and replayed when the
/// same state is reached again, in this search or a later one on the same session.
pub struct WordAnagrams<'a> {
    wordlist: &'a IndexedWordList,
    session: &'a mut SearchSession,
    ///IDs of all words that fit in the initial letters, in word list order
    candidates: Vec<WordId>,
    allow_repeats: bool,
    stack: Vec<WordFrame>,
    ///The word chosen in each frame on the stack, except the top one
    path: Vec<WordId>,
    ///The initial letters were empty; yield a single empty anagram
    pending_empty: bool,
}

impl<'a> WordAnagrams<'a> {
    ///Starts a search over the words of the word list from position `start` onward
    pub fn new(wordlist: &'a IndexedWordList, available: LetterMultiset, start: usize, session: &'a mut SearchSession) -> WordAnagrams<'a> {
        let params = session.params().clone();
        let candidates = wordlist.candidates(&available, start, params.min_word_length);
        let mut iterator = WordAnagrams {
            wordlist,
            session,
            candidates,
            allow_repeats: params.allow_repeats,
            stack: Vec::new(),
            path: Vec::new(),
            pending_empty: available.is_empty(),
        };
        if !iterator.pending_empty {
            iterator.enter(available, 0, params.word_budget());
        }
        iterator
    }

    ///Pushes a frame for the given state, unless the word budget is used up.
    ///Returns whether a frame was pushed.
    fn enter(&mut self, available: LetterMultiset, position: usize, budget: Option<usize>) -> bool {
        if budget == Some(0) {
            return false;
        }
        let key = CacheKey {
            letters: available.anahash(),
            start: self.candidates.get(position).copied().unwrap_or(WordId::MAX),
            budget,
        };
        let replay = self.session.cache.get(&key).map(|completions| (completions, 0));
        self.stack.push(WordFrame {
            key,
            available,
            next: position,
            budget,
            found: Vec::new(),
            replay,
        });
        true
    }

    ///Adds a completion to the first `frames` frames on the stack, each prefixed with the
    ///words chosen from that frame onward
    fn record(&mut self, frames: usize, tail: &[WordId]) {
        for k in 0..frames {
            let mut completion = self.path[k..].to_vec();
            completion.extend_from_slice(tail);
            self.stack[k].found.push(completion);
        }
    }

    ///Pops the top frame, storing its completions unless they came from the cache
    fn finish(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if frame.replay.is_none() {
                self.session.cache.insert(frame.key, frame.found);
            }
            if !self.stack.is_empty() {
                self.path.pop();
            }
        }
    }

    fn decode(&self, word_ids: &[WordId]) -> Vec<&'a str> {
        let wordlist: &'a IndexedWordList = self.wordlist;
        word_ids.iter().filter_map(|word_id| wordlist.get(*word_id)).map(|entry| entry.text.as_str()).collect()
    }
}

impl<'a> Iterator for WordAnagrams<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending_empty {
            self.pending_empty = false;
            return Some(Vec::new());
        }
        loop {
            let top = self.stack.len().checked_sub(1)?;

            //replaying cached completions
            let replayed = match &mut self.stack[top].replay {
                Some((completions, pos)) => {
                    let completion = completions.get(*pos).cloned();
                    *pos += 1;
                    Some(completion)
                },
                None => None
            };
            match replayed {
                Some(Some(completion)) => {
                    self.record(top, &completion);
                    let mut solution = self.path.clone();
                    solution.extend(completion);
                    return Some(self.decode(&solution));
                },
                Some(None) => {
                    self.finish();
                    continue;
                },
                None => {}
            }

            let frame = &mut self.stack[top];
            if frame.next >= self.candidates.len() {
                self.finish();
                continue;
            }
            let position = frame.next;
            frame.next += 1;
            let budget = frame.budget.map(|budget| budget - 1);
            let word_id = self.candidates[position];
            let remaining = match self.wordlist.get(word_id).and_then(|entry| frame.available.subtract(&entry.letters)) {
                Some(remaining) => remaining,
                None => continue,
            };

            self.path.push(word_id);
            if remaining.is_empty() {
                self.record(top + 1, &[]);
                let solution = self.decode(&self.path);
                self.path.pop();
                return Some(solution);
            }
            let start = if self.allow_repeats { position } else { position + 1 };
            if !self.enter(remaining, start, budget) {
                self.path.pop();
            }
        }
    }
}
