use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::types::*;

///The root always lives at the start of the arena
pub const ROOT: NodeId = 0;

///A single node in the trie
#[derive(Clone,Debug)]
pub struct TrieNode {
    ///Is it valid for a word to end here?
    pub end: bool,

    ///Child node per letter (indexed by alphabet index)
    children: [Option<NodeId>; ALPHABET_SIZE],

    ///Handle to the root of the trie this node belongs to
    root: NodeId,
}

impl TrieNode {
    fn new(root: NodeId) -> Self {
        TrieNode {
            end: false,
            children: [None; ALPHABET_SIZE],
            root,
        }
    }
}

///A prefix tree over lowercase words. Nodes are kept in a flat arena and refer to each other
///(and back to the root) by index.
#[derive(Clone,Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    ///Creates an empty trie (a lone root that is not a word ending)
    pub fn new() -> Self {
        Trie {
            nodes: vec!(TrieNode::new(ROOT)),
        }
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, AnagramError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref())?;
        }
        Ok(trie)
    }

    ///Adds a word to the trie, returns the node where it ends.
    ///The word is validated entirely before the trie is touched.
    pub fn insert(&mut self, word: &str) -> Result<NodeId, AnagramError> {
        let indices = word.chars().map(char_index).collect::<Option<Vec<CharIndexType>>>()
            .ok_or_else(|| AnagramError::InvalidWord(word.to_string()))?;
        let mut node = ROOT;
        for index in indices {
            node = match self.nodes[node as usize].children[index as usize] {
                Some(child) => child,
                None => {
                    let child = self.nodes.len() as NodeId;
                    let root = self.nodes[node as usize].root;
                    self.nodes.push(TrieNode::new(root));
                    self.nodes[node as usize].children[index as usize] = Some(child);
                    child
                }
            };
        }
        self.nodes[node as usize].end = true;
        Ok(node)
    }

    ///Is the given word in the trie?
    pub fn contains(&self, word: &str) -> bool {
        let mut node = ROOT;
        for c in word.chars() {
            match char_index(c).and_then(|index| self.child(node, index)) {
                Some(child) => node = child,
                None => return false,
            }
        }
        self.is_end(node)
    }

    pub fn root(&self) -> NodeId {
        ROOT
    }

    ///The root of the trie the node belongs to
    pub fn root_of(&self, node: NodeId) -> NodeId {
        self.nodes[node as usize].root
    }

    pub fn node(&self, node: NodeId) -> &TrieNode {
        &self.nodes[node as usize]
    }

    pub fn is_end(&self, node: NodeId) -> bool {
        self.nodes[node as usize].end
    }

    pub fn child(&self, node: NodeId, index: CharIndexType) -> Option<NodeId> {
        self.nodes[node as usize].children[index as usize]
    }

    ///Iterates over all valid next letters from this node and their child nodes, in alphabetical order
    pub fn children_of(&self, node: NodeId) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.nodes[node as usize].children.iter().enumerate()
            .filter_map(|(index, child)| child.map(|child| (index_char(index as CharIndexType), child)))
    }

    ///Number of nodes (including the root)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    ///A trie with only a root that is not a word ending
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && !self.nodes[0].end
    }

    ///Returns a serializable view of the trie, from the root
    pub fn export(&self) -> TrieExport<'_> {
        TrieExport { trie: self, node: ROOT }
    }

    ///Renders the trie as nested JSON objects
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.export())
    }
}

///Serializable view on a trie node: a map from every valid next letter to the
///rendering of its child, plus `"end": true` when a word may end here
pub struct TrieExport<'a> {
    trie: &'a Trie,
    node: NodeId,
}

impl Serialize for TrieExport<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.trie.node(self.node);
        let mut map = serializer.serialize_map(None)?;
        if node.end {
            map.serialize_entry("end", &true)?;
        }
        for (c, child) in self.trie.children_of(self.node) {
            map.serialize_entry(&c, &TrieExport { trie: self.trie, node: child })?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_shares_prefixes() {
        let trie = Trie::from_words(["car", "cart", "cat"]).unwrap();
        //root, c, a, r, t (cart), t (cat)
        assert_eq!(trie.len(), 6);
        assert!(trie.contains("car"));
        assert!(!trie.contains("ca"));
    }

    #[test]
    fn rejected_word_leaves_trie_untouched() {
        let mut trie = Trie::new();
        assert!(matches!(trie.insert("ab1"), Err(AnagramError::InvalidWord(_))));
        assert_eq!(trie.len(), 1);
        assert!(!trie.contains("ab"));
    }

    #[test]
    fn every_node_knows_its_root() {
        let trie = Trie::from_words(["abc"]).unwrap();
        let mut node = trie.root();
        for index in 0..3 {
            node = trie.child(node, index).unwrap();
            assert_eq!(trie.root_of(node), ROOT);
        }
        assert_eq!(trie.root_of(ROOT), ROOT);
    }

    #[test]
    fn children_in_alphabetical_order() {
        let trie = Trie::from_words(["zoo", "ant", "moo"]).unwrap();
        let letters: Vec<char> = trie.children_of(ROOT).map(|(c, _)| c).collect();
        assert_eq!(letters, vec!('a', 'm', 'z'));
    }
}
