//! Headed containers that render nothing when empty.
//!
//! A [`HeadedList`] or [`HeadedMap`] collects raw values during a pass and turns them
//! into report blocks only when asked, through a caller-supplied per-item renderer.
//! Composing many possibly-empty containers therefore never produces a bare header.
use std::collections::BTreeMap;

use crate::error::Result;
use crate::output::{Block, Item};

/// An ordered list tagged with a display header.
#[derive(Clone, Debug)]
pub struct HeadedList<T> {
    header: String,
    items: Vec<T>,
}

impl<T> HeadedList<T> {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders as a heading of `level` followed by a list, or nothing if empty.
    pub fn render_blocks(
        self,
        level: u8,
        render: impl FnMut(T) -> Result<Item>,
    ) -> Result<Vec<Block>> {
        if self.items.is_empty() {
            return Ok(Vec::new());
        }
        let items = self.items.into_iter().map(render).collect::<Result<Vec<_>>>()?;
        Ok(vec![Block::heading(level, self.header), Block::List(items)])
    }

    /// Renders as a list entry whose text is the header and whose children are the
    /// items, or `None` if empty.
    pub fn render_item(self, render: impl FnMut(T) -> Result<Item>) -> Result<Option<Item>> {
        if self.items.is_empty() {
            return Ok(None);
        }
        let items = self.items.into_iter().map(render).collect::<Result<Vec<_>>>()?;
        Ok(Some(Item::new(self.header).with_child(Block::List(items))))
    }
}

impl<T> Extend<T> for HeadedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

/// A key-ordered mapping tagged with a display header.
#[derive(Clone, Debug)]
pub struct HeadedMap<K, V> {
    header: String,
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> HeadedMap<K, V> {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Mutable access to the value for `key`, inserting a default if missing.
    pub fn entry_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entries.entry(key).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders as a heading of `level` followed by one entry per key, or nothing if empty.
    pub fn render_blocks(
        self,
        level: u8,
        mut render: impl FnMut(K, V) -> Result<Item>,
    ) -> Result<Vec<Block>> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        let items = self
            .entries
            .into_iter()
            .map(|(k, v)| render(k, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(vec![Block::heading(level, self.header), Block::List(items)])
    }

    /// Renders as a list entry headed by the header, or `None` if empty.
    pub fn render_item(self, mut render: impl FnMut(K, V) -> Result<Item>) -> Result<Option<Item>> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        let items = self
            .entries
            .into_iter()
            .map(|(k, v)| render(k, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Item::new(self.header).with_child(Block::List(items))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::output::render_html;
    use crate::output::Document;

    #[test]
    fn empty_list_renders_nothing() {
        let list: HeadedList<u32> = HeadedList::new("Numbers");
        let blocks = list
            .render_blocks(4, |n| Ok(Item::new(n.to_string())))
            .unwrap();
        assert!(blocks.is_empty());

        let mut doc = Document::new("t");
        doc.push_section("numbers", blocks);
        assert_eq!(render_html(&doc), "");
    }

    #[test]
    fn empty_list_renderer_is_never_called() {
        let list: HeadedList<u32> = HeadedList::new("Numbers");
        let item = list
            .render_item(|_| Err(Error::Other("should not render".into())))
            .unwrap();
        assert!(item.is_none());
    }

    #[test]
    fn list_renders_header_then_items_in_insertion_order() {
        let mut list = HeadedList::new("Numbers");
        list.extend([1, 2]);
        list.push(3);
        let blocks = list
            .render_blocks(4, |n| Ok(Item::new(n.to_string())))
            .unwrap();
        assert_eq!(blocks[0], Block::heading(4, "Numbers"));
        match &blocks[1] {
            Block::List(items) => {
                let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
                assert_eq!(texts, vec!["1", "2", "3"]);
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn renderer_errors_propagate() {
        let mut list = HeadedList::new("Numbers");
        list.push(1);
        let err = list
            .render_blocks(4, |_| Err(Error::Other("boom".into())))
            .expect_err("error propagates");
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn map_renders_in_key_order() {
        let mut map: HeadedMap<String, Vec<u32>> = HeadedMap::new("Kinds");
        map.entry_or_default("wolf".into()).push(2);
        map.entry_or_default("bear".into()).push(1);
        map.entry_or_default("wolf".into()).push(3);
        assert_eq!(map.len(), 2);
        let item = map
            .render_item(|k, v| Ok(Item::new(format!("{k}: {}", v.len()))))
            .unwrap()
            .expect("non-empty");
        assert_eq!(item.text, "Kinds");
        match &item.children[0] {
            Block::List(items) => {
                assert_eq!(items[0].text, "bear: 1");
                assert_eq!(items[1].text, "wolf: 2");
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn empty_map_renders_nothing() {
        let map: HeadedMap<String, u32> = HeadedMap::new("Kinds");
        assert!(map
            .render_blocks(4, |k, _| Ok(Item::new(k)))
            .unwrap()
            .is_empty());
    }
}
