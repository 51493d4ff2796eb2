//! 三分探索木(TST)の構築
//!
//! 単語をUTF-16コードユニット単位で挿入し、各ノードに優先度を付与します。
//! ノードはアリーナ上のインデックスで参照され、同じ位置で分岐する兄弟ノードの集合を
//! 「レベル」と呼びます。各レベルは記号の昇順に並んでおり、探索順(プローブチェイン)は
//! [`TrieBuilder::finish()`] で別途計算されます。

use std::cmp::Reverse;

use crate::num::Priority;

/// ノードのインデックス
pub type NodeId = usize;

/// 木の1つの位置に置かれる記号
///
/// 単語終端(End-Of-Word)はどの文字よりも小さいものとして順序付けられます。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// 単語の終端
    EndOfWord,

    /// UTF-16コードユニット
    Char(u16),
}

impl Symbol {
    /// 文字ノードならそのコードユニットを返します。
    #[inline(always)]
    pub const fn code_unit(self) -> Option<u16> {
        match self {
            Self::EndOfWord => None,
            Self::Char(c) => Some(c),
        }
    }
}

/// TSTのノード
#[derive(Clone, Debug)]
pub struct Node {
    symbol: Symbol,
    priority: Priority,
    center: Vec<NodeId>,
    next: Option<NodeId>,
}

impl Node {
    fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            priority: Priority::MIN,
            center: vec![],
            next: None,
        }
    }

    /// ノードの記号
    #[inline(always)]
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// ノードの優先度
    ///
    /// このノードを経由して到達できる単語の優先度の最大値です。
    #[inline(always)]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// 次の位置の兄弟ノード集合(記号の昇順)
    ///
    /// 単語終端ノードでは常に空です。
    #[inline(always)]
    pub fn center(&self) -> &[NodeId] {
        &self.center
    }

    /// プローブチェインにおける次の兄弟ノード
    #[inline(always)]
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }
}

/// 単語を挿入してTSTを構築するビルダー
#[derive(Default)]
pub struct TrieBuilder {
    nodes: Vec<Node>,
    root: Vec<NodeId>,
    num_words: usize,
}

impl TrieBuilder {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// 単語を挿入します。
    ///
    /// 同じ単語が複数回挿入された場合、終端ノードの優先度は最大値が採用されます。
    /// 単語長の検証は呼び出し側で済ませておく必要があります。
    ///
    /// # 戻り値
    ///
    /// 新しい単語であれば`true`、既に挿入済みの単語であれば`false`
    pub fn insert<I>(&mut self, word: I, priority: Priority) -> bool
    where
        I: IntoIterator<Item = u16>,
    {
        let mut parent = None;
        for c in word {
            parent = Some(self.find_or_insert(parent, Symbol::Char(c)).0);
        }
        let (eow, created) = self.find_or_insert(parent, Symbol::EndOfWord);
        let node = &mut self.nodes[eow];
        node.priority = node.priority.max(priority);
        if created {
            self.num_words += 1;
        }
        created
    }

    /// 挿入された単語の異なり数
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    fn level_mut(&mut self, parent: Option<NodeId>) -> &mut Vec<NodeId> {
        match parent {
            Some(p) => &mut self.nodes[p].center,
            None => &mut self.root,
        }
    }

    fn find_or_insert(&mut self, parent: Option<NodeId>, symbol: Symbol) -> (NodeId, bool) {
        let new_id = self.nodes.len();
        let nodes = &self.nodes;
        let pos = match parent {
            Some(p) => &nodes[p].center,
            None => &self.root,
        }
        .binary_search_by_key(&symbol, |&id| nodes[id].symbol);

        match pos {
            Ok(i) => (self.level_mut(parent)[i], false),
            Err(i) => {
                self.level_mut(parent).insert(i, new_id);
                self.nodes.push(Node::new(symbol));
                (new_id, true)
            }
        }
    }

    /// 優先度を葉から根へ伝播させ、各レベルのプローブチェインを計算します。
    pub fn finish(mut self) -> Trie {
        // 子ノードは常に親ノードより後に作られるので、逆順に走査すれば
        // 子の優先度は親より先に確定している
        for id in (0..self.nodes.len()).rev() {
            if self.nodes[id].symbol == Symbol::EndOfWord {
                continue;
            }
            let nodes = &self.nodes;
            let priority = nodes[id]
                .center
                .iter()
                .map(|&c| nodes[c].priority)
                .max()
                .unwrap_or(Priority::MIN);
            self.nodes[id].priority = priority;
        }

        let root_chain = self.link_level(None);
        for id in 0..self.nodes.len() {
            self.link_level(Some(id));
        }

        log::debug!(
            "[fxdict] built a trie with {} nodes for {} words",
            self.nodes.len(),
            self.num_words
        );

        Trie {
            nodes: self.nodes,
            root: self.root,
            root_head: root_chain,
            num_words: self.num_words,
        }
    }

    /// 1つのレベルのプローブチェインを構築し、先頭のノードを返します。
    ///
    /// 優先度の降順に並べ、同じ優先度では記号の昇順に並べます。
    fn link_level(&mut self, parent: Option<NodeId>) -> Option<NodeId> {
        let mut chain = match parent {
            Some(p) => self.nodes[p].center.clone(),
            None => self.root.clone(),
        };
        let nodes = &self.nodes;
        chain.sort_by_key(|&id| {
            let n = &nodes[id];
            (Reverse(n.priority), n.symbol)
        });
        for pair in chain.windows(2) {
            self.nodes[pair[0]].next = Some(pair[1]);
        }
        chain.first().copied()
    }
}

/// 優先度とプローブチェインが確定したTST
pub struct Trie {
    nodes: Vec<Node>,
    root: Vec<NodeId>,
    root_head: Option<NodeId>,
    num_words: usize,
}

impl Trie {
    /// ノードを取得します。
    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// 根のレベルのノード集合(記号の昇順)
    #[inline(always)]
    pub fn root(&self) -> &[NodeId] {
        &self.root
    }

    /// 根のプローブチェインの先頭
    ///
    /// 単語が1つもなければ`None`です。
    #[inline(always)]
    pub fn root_head(&self) -> Option<NodeId> {
        self.root_head
    }

    /// 指定したレベルのプローブチェインの先頭を返します。
    ///
    /// チェインの先頭は、優先度が最大のノードのうち記号が最小のものです。
    pub fn head_of(&self, level: &[NodeId]) -> Option<NodeId> {
        level
            .iter()
            .copied()
            .min_by_key(|&id| {
                let n = self.node(id);
                (Reverse(n.priority), n.symbol)
            })
    }

    /// ノード数
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// 単語の異なり数
    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// 指定したレベルのプローブチェインを先頭から順に返します。
    pub fn chain<'a>(&'a self, level: &[NodeId]) -> impl Iterator<Item = NodeId> + 'a {
        std::iter::successors(self.head_of(level), move |&id| self.node(id).next)
    }
}
