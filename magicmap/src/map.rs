//! The wrapped mapping.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::Error;
use crate::hook::{self, Memo};
use crate::key::Key;
use crate::path;
use crate::value::{List, Value};

/// Why a [`MagicMap`] instance exists.
///
/// Placeholders materialized by the forgiving lookup surfaces carry the
/// reason they exist; a placeholder can never be both "from null" and
/// "from missing", which this enum encodes by construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Origin {
    /// An ordinary, mutable map.
    Normal,
    /// Placeholder materialized for a key whose value was null.
    FromNone,
    /// Placeholder materialized for a key that did not exist.
    FromMissing,
}

impl Origin {
    /// Placeholders are protected: they reject every mutation.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Origin::Normal)
    }
}

pub(crate) struct MagicInner {
    pub(crate) entries: IndexMap<Key, Value>,
    pub(crate) origin: Origin,
}

/// A forgiving, recursively wrapped mapping.
///
/// Values stored in a `MagicMap` are always hooked: any plain map that
/// arrives through a mutating call is recursively converted before it is
/// stored. Lookups come in two flavors with different failure policies:
///
/// - [`get`](MagicMap::get) is strict (a `Result`, like ordinary bracket
///   access), and understands dotted-path strings such as
///   `"users.0.name"`;
/// - [`attr`](MagicMap::attr) and [`mget`](MagicMap::mget) are forgiving:
///   they never fail, returning a fresh protected placeholder for missing
///   keys and null values so navigation can continue safely to any depth.
///
/// Cloning a `MagicMap` clones the handle: both clones see the same
/// entries, which is what lets a map graph share nodes and contain cycles.
///
/// ```
/// use magicmap::magic;
///
/// let md = magic! {
///     "user": { "name": "Alice", "id": 1, "nickname": null },
/// };
///
/// assert_eq!(md.attr("user").attr("name").as_str(), Some("Alice"));
/// assert_eq!(md.get("user.id").unwrap().as_i64(), Some(1));
///
/// // missing paths degrade to protected empty maps instead of failing
/// let missing = md.attr("user").attr("address").attr("city");
/// assert!(missing.attr("_from_missing").as_bool().unwrap());
/// ```
#[derive(Clone)]
pub struct MagicMap {
    inner: Rc<RefCell<MagicInner>>,
}

impl MagicMap {
    /// Creates a new empty, ordinary map.
    #[must_use]
    pub fn new() -> Self {
        MagicMap::with_origin(Origin::Normal)
    }

    pub(crate) fn with_origin(origin: Origin) -> Self {
        MagicMap {
            inner: Rc::new(RefCell::new(MagicInner {
                entries: IndexMap::new(),
                origin,
            })),
        }
    }

    /// Fresh protected placeholder. Placeholders are never shared: every
    /// materialization returns a distinct (but content-equal) instance.
    pub(crate) fn placeholder(origin: Origin) -> Self {
        debug_assert!(origin.is_protected());
        MagicMap::with_origin(origin)
    }

    /// Builds a map from key/value pairs, hooking every value.
    ///
    /// All pairs share one memo, so sharing (and cycles) across the input
    /// values survive the conversion.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        let map = MagicMap::new();
        let mut memo = Memo::new();
        for (key, value) in pairs {
            let hooked = hook::hook_with(value.into(), &mut memo);
            map.inner.borrow_mut().entries.insert(key.into(), hooked);
        }
        map
    }

    /// Builds a map with every key in `keys` bound to `value`.
    ///
    /// The value is hooked once per key, so each key gets its own wrapped
    /// copy of a plain map while shared mutable sequences stay shared.
    pub fn from_keys<K, V>(keys: impl IntoIterator<Item = K>, value: V) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        let template: Value = value.into();
        let map = MagicMap::new();
        for key in keys {
            let hooked = hook::hook(template.clone());
            map.inner.borrow_mut().entries.insert(key.into(), hooked);
        }
        map
    }

    /// Decoder-callback factory: builds a map from pairs whose values were
    /// already materialized by a decoder working bottom-up.
    ///
    /// Values are expected to be hooked already (a decoder wired through
    /// this callback produces children before parents); a plain map passed
    /// here is hooked defensively.
    pub fn object_hook(pairs: impl IntoIterator<Item = (Key, Value)>) -> Self {
        let map = MagicMap::new();
        for (key, value) in pairs {
            let value = match value {
                Value::Map(plain) => hook::hook(Value::Map(plain)),
                other => other,
            };
            map.insert_raw(key, value);
        }
        map
    }

    // === Sentinel state ===

    /// True if this is a placeholder materialized from a null value.
    #[must_use]
    pub fn is_from_none(&self) -> bool {
        self.inner.borrow().origin == Origin::FromNone
    }

    /// True if this is a placeholder materialized from a missing key.
    #[must_use]
    pub fn is_from_missing(&self) -> bool {
        self.inner.borrow().origin == Origin::FromMissing
    }

    /// True if this map rejects mutation (either placeholder flavor).
    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.origin().is_protected()
    }

    pub(crate) fn origin(&self) -> Origin {
        self.inner.borrow().origin
    }

    fn guard(&self) -> Result<(), Error> {
        let origin = self.origin();
        if origin.is_protected() {
            return Err(Error::protected(origin));
        }
        Ok(())
    }

    // === Read surface ===

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().entries.is_empty()
    }

    /// Returns `true` if `key` is literally present (no dotted-path walk).
    #[must_use]
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.inner.borrow().entries.contains_key(&key.into())
    }

    /// Snapshot of the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        self.inner.borrow().entries.keys().cloned().collect()
    }

    /// Snapshot of the values in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.inner.borrow().entries.values().cloned().collect()
    }

    /// Snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.inner
            .borrow()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // === Lookup resolver ===

    /// Strict lookup: the bracket-access surface.
    ///
    /// A literal hit wins, even for keys that contain the separator. A
    /// `Str` key containing `.` that is not literally present is walked as
    /// a dotted path (`"users.0.name"` indexes into sequences); any
    /// missing or invalid step is an error, never a silent empty result.
    pub fn get(&self, key: impl Into<Key>) -> Result<Value, Error> {
        let key = key.into();
        if let Some(value) = self.raw_get(&key) {
            return Ok(value);
        }
        if let Some(dotted) = key.dotted() {
            return path::walk_dotted(&Value::Magic(self.clone()), dotted);
        }
        Err(Error::missing(key))
    }

    /// Strict lookup from explicit path segments, without string
    /// splitting: `get_path(&["users", "0", "name"])` is
    /// `get("users.0.name")`.
    pub fn get_path(&self, segments: &[&str]) -> Result<Value, Error> {
        path::walk_segments(&Value::Magic(self.clone()), segments)
    }

    /// Forgiving attribute-style lookup. Never fails.
    ///
    /// - the reserved names `_from_none` and `_from_missing` report the
    ///   sentinel flags as booleans;
    /// - a present key with a null value yields a fresh from-none
    ///   placeholder (bracket access still sees the literal null);
    /// - a missing key yields a fresh from-missing placeholder.
    #[must_use]
    pub fn attr(&self, name: &str) -> Value {
        match name {
            "_from_none" => return Value::Bool(self.is_from_none()),
            "_from_missing" => return Value::Bool(self.is_from_missing()),
            _ => {}
        }
        match self.raw_get(&Key::from(name)) {
            Some(Value::Null) => Value::Magic(MagicMap::placeholder(Origin::FromNone)),
            Some(value) => value,
            None => Value::Magic(MagicMap::placeholder(Origin::FromMissing)),
        }
    }

    /// Safe get: like [`attr`](MagicMap::attr) but for arbitrary keys.
    ///
    /// Present non-null values are returned as-is; a present null and a
    /// missing key both degrade to the matching protected placeholder.
    #[must_use]
    pub fn mget(&self, key: impl Into<Key>) -> Value {
        match self.raw_get(&key.into()) {
            Some(Value::Null) => Value::Magic(MagicMap::placeholder(Origin::FromNone)),
            Some(value) => value,
            None => Value::Magic(MagicMap::placeholder(Origin::FromMissing)),
        }
    }

    /// Safe get with an explicit default.
    ///
    /// The explicit default always wins over placeholder substitution: it
    /// is returned both for a missing key and for a present key whose
    /// value is null — including a literal `Null` default, which is
    /// honored as-is.
    #[must_use]
    pub fn mget_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        match self.raw_get(&key.into()) {
            Some(Value::Null) | None => default.into(),
            Some(value) => value,
        }
    }

    /// Shorthand for [`mget`](MagicMap::mget).
    #[must_use]
    pub fn mg(&self, key: impl Into<Key>) -> Value {
        self.mget(key)
    }

    /// Literal lookup with the lazy-hook fallback: a stored plain map is
    /// hooked on first access and the hooked node written back, so the
    /// invariant "stored values are always hooked" self-heals.
    pub(crate) fn raw_get(&self, key: &Key) -> Option<Value> {
        let found = self.inner.borrow().entries.get(key).cloned();
        match found {
            Some(Value::Map(plain)) => {
                let hooked = hook::hook(Value::Map(plain));
                self.inner
                    .borrow_mut()
                    .entries
                    .insert(key.clone(), hooked.clone());
                Some(hooked)
            }
            other => other,
        }
    }

    // === Mutation guard ===

    /// Inserts an entry, hooking the value first. Returns the previous
    /// value for the key.
    ///
    /// Fails with a protected error if this map is a placeholder; the map
    /// is left untouched.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Result<Option<Value>, Error> {
        self.guard()?;
        let hooked = hook::hook(value.into());
        Ok(self.inner.borrow_mut().entries.insert(key.into(), hooked))
    }

    /// Removes an entry, preserving the order of the rest. Returns the
    /// removed value if the key was present.
    pub fn remove(&self, key: impl Into<Key>) -> Result<Option<Value>, Error> {
        self.guard()?;
        Ok(self.inner.borrow_mut().entries.shift_remove(&key.into()))
    }

    /// Removes and returns the most recently inserted entry.
    pub fn pop_last(&self) -> Result<Option<(Key, Value)>, Error> {
        self.guard()?;
        Ok(self.inner.borrow_mut().entries.pop())
    }

    /// Removes all entries.
    pub fn clear(&self) -> Result<(), Error> {
        self.guard()?;
        self.inner.borrow_mut().entries.clear();
        Ok(())
    }

    /// Merges `pairs` into this map, hooking every value.
    pub fn update<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<(), Error>
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        self.guard()?;
        for (key, value) in pairs {
            let hooked = hook::hook(value.into());
            self.inner.borrow_mut().entries.insert(key.into(), hooked);
        }
        Ok(())
    }

    /// Returns the value for `key`, inserting the hooked `default` first
    /// if the key is absent.
    pub fn set_default(&self, key: impl Into<Key>, default: impl Into<Value>) -> Result<Value, Error> {
        self.guard()?;
        let key = key.into();
        if let Some(value) = self.raw_get(&key) {
            return Ok(value);
        }
        let hooked = hook::hook(default.into());
        self.inner
            .borrow_mut()
            .entries
            .insert(key, hooked.clone());
        Ok(hooked)
    }

    /// Bypasses guard and hook: for engine use, where values are hooked by
    /// construction and the destination is never protected.
    pub(crate) fn insert_raw(&self, key: Key, value: Value) {
        self.inner.borrow_mut().entries.insert(key, value);
    }

    // === Copies and conversion ===

    /// Shallow copy: a fresh ordinary map sharing this map's values.
    /// Copying a placeholder yields an ordinary (unprotected) empty map.
    #[must_use]
    pub fn shallow_copy(&self) -> MagicMap {
        let copy = MagicMap::new();
        for (key, value) in self.entries() {
            copy.insert_raw(key, value);
        }
        copy
    }

    /// Deep copy: a structurally identical graph with no storage shared
    /// with the original. Cycles, shared nodes and placeholder origins are
    /// preserved.
    #[must_use]
    pub fn deep_copy(&self) -> MagicMap {
        match crate::copy::deep_copy_value(&Value::Magic(self.clone()))
        {
            Value::Magic(map) => map,
            _ => unreachable!("deep copy preserves the value kind"),
        }
    }

    /// Converts this map (and every nested wrapped map) back into a plain
    /// mapping graph. Cycle-safe; see [`disenchant`](crate::disenchant).
    #[must_use]
    pub fn disenchant(&self) -> Value {
        crate::disenchant(Value::Magic(self.clone()))
    }

    /// Rebuilds this map keeping only the entries `pred` accepts,
    /// recursing into nested wrapped maps and lists. Cycle-safe.
    #[must_use]
    pub fn filter<F>(&self, pred: F) -> MagicMap
    where
        F: Fn(&Key, &Value) -> bool,
    {
        let mut memo = HashMap::new();
        filter_map(self, &pred, false, &mut memo)
    }

    /// Rebuilds this map dropping null entries and empty containers, at
    /// every level.
    #[must_use]
    pub fn compact(&self) -> MagicMap {
        let mut memo = HashMap::new();
        filter_map(self, &|_, value| !value.is_null(), true, &mut memo)
    }

    pub(crate) fn entries_ref(&self) -> Ref<'_, IndexMap<Key, Value>> {
        Ref::map(self.inner.borrow(), |inner| &inner.entries)
    }

    /// Stable identity of the backing storage, for memo keys.
    pub(crate) fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }

    /// Drains this map's values into a teardown worklist if this is the
    /// last handle. See [`crate::value::reclaim`].
    pub(crate) fn reclaim_into(&self, stack: &mut Vec<Value>) {
        if Rc::strong_count(&self.inner) != 1 {
            return;
        }
        stack.extend(
            self.inner
                .borrow_mut()
                .entries
                .drain(..)
                .map(|(_, v)| v),
        );
    }
}

impl Drop for MagicMap {
    fn drop(&mut self) {
        if Rc::strong_count(&self.inner) != 1 {
            return;
        }
        let values: Vec<Value> = self
            .inner
            .borrow_mut()
            .entries
            .drain(..)
            .map(|(_, v)| v)
            .collect();
        if !values.is_empty() {
            crate::value::reclaim(values);
        }
    }
}

fn filter_map(
    src: &MagicMap,
    pred: &dyn Fn(&Key, &Value) -> bool,
    drop_empty: bool,
    memo: &mut HashMap<usize, Value>,
) -> MagicMap {
    if let Some(Value::Magic(done)) = memo.get(&src.ptr_id()) {
        return done.clone();
    }
    let dst = MagicMap::new();
    memo.insert(src.ptr_id(), Value::Magic(dst.clone()));
    for (key, value) in src.entries() {
        if !pred(&key, &value) {
            continue;
        }
        let kept = filter_value(&value, pred, drop_empty, memo);
        if drop_empty && is_droppable_empty(&kept) {
            continue;
        }
        dst.insert_raw(key, kept);
    }
    dst
}

fn filter_value(
    value: &Value,
    pred: &dyn Fn(&Key, &Value) -> bool,
    drop_empty: bool,
    memo: &mut HashMap<usize, Value>,
) -> Value {
    match value {
        Value::Magic(map) => Value::Magic(filter_map(map, pred, drop_empty, memo)),
        Value::List(list) => {
            if let Some(done) = memo.get(&list.ptr_id()) {
                return done.clone();
            }
            let out = List::new();
            memo.insert(list.ptr_id(), Value::List(out.clone()));
            for elem in list.to_vec() {
                let kept = filter_value(&elem, pred, drop_empty, memo);
                if drop_empty && (kept.is_null() || is_droppable_empty(&kept)) {
                    continue;
                }
                out.push(kept);
            }
            Value::List(out)
        }
        other => other.clone(),
    }
}

fn is_droppable_empty(value: &Value) -> bool {
    match value {
        Value::Magic(map) => map.is_empty(),
        Value::Map(map) => map.is_empty(),
        Value::List(list) => list.is_empty(),
        _ => false,
    }
}

impl Default for MagicMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MagicMap {
    // content equality: sentinel flags are invisible to comparison, so a
    // placeholder equals any other empty mapping
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        match crate::value::eq_enter(self.ptr_id(), other.ptr_id()) {
            None => true,
            Some(_mark) => *self.entries_ref() == *other.entries_ref(),
        }
    }
}

impl Debug for MagicMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(_mark) = crate::value::fmt_enter(self.ptr_id()) else {
            return f.write_str("MagicMap({...})");
        };
        f.write_str("MagicMap(")?;
        f.debug_map().entries(self.entries_ref().iter()).finish()?;
        f.write_str(")")
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for MagicMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MagicMap::from_pairs(iter)
    }
}

impl From<crate::value::PlainMap> for MagicMap {
    fn from(plain: crate::value::PlainMap) -> Self {
        hook::hook_plain_map(plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_fresh_and_content_equal() {
        let map = MagicMap::new();
        let a = map.attr("missing");
        let b = map.attr("missing");
        let (a, b) = (a.as_magic().unwrap().clone(), b.as_magic().unwrap().clone());
        assert_ne!(a.ptr_id(), b.ptr_id());
        assert_eq!(a, b);
        assert_eq!(a, MagicMap::new());
    }

    #[test]
    fn guard_blocks_every_mutation() {
        let ph = MagicMap::placeholder(Origin::FromNone);
        assert!(ph.insert("a", 1).unwrap_err().is_protected());
        assert!(ph.remove("a").unwrap_err().is_protected());
        assert!(ph.clear().unwrap_err().is_protected());
        assert!(ph.pop_last().unwrap_err().is_protected());
        assert!(ph.set_default("a", 1).unwrap_err().is_protected());
        assert!(ph.update([("a", 1)]).unwrap_err().is_protected());
        assert!(ph.is_empty());
    }

    #[test]
    fn reserved_names_report_flags() {
        let ph = MagicMap::placeholder(Origin::FromNone);
        assert_eq!(ph.attr("_from_none"), Value::Bool(true));
        assert_eq!(ph.attr("_from_missing"), Value::Bool(false));
        let normal = MagicMap::new();
        assert_eq!(normal.attr("_from_none"), Value::Bool(false));
    }

    #[test]
    fn mget_or_explicit_default_always_wins() {
        let map = MagicMap::from_pairs([("nick", Value::Null)]);
        assert_eq!(map.mget_or("nick", "anon"), Value::from("anon"));
        assert_eq!(map.mget_or("nick", Value::Null), Value::Null);
        assert_eq!(map.mget_or("gone", "anon"), Value::from("anon"));
    }

    #[test]
    fn set_default_inserts_once() {
        let map = MagicMap::new();
        assert_eq!(map.set_default("n", 1).unwrap(), Value::Int(1));
        assert_eq!(map.set_default("n", 2).unwrap(), Value::Int(1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn debug_of_self_referential_map_prints_a_marker() {
        let md = MagicMap::new();
        md.insert("me", md.clone()).unwrap();
        let text = format!("{md:?}");
        assert_eq!(text, r#"MagicMap({"me": MagicMap({...})})"#);
    }

    #[test]
    fn distinct_cyclic_graphs_compare_without_overflowing() {
        let a = MagicMap::from_pairs([("n", 1)]);
        a.insert("me", a.clone()).unwrap();
        let b = MagicMap::from_pairs([("n", 1)]);
        b.insert("me", b.clone()).unwrap();
        assert_eq!(a, b);

        b.insert("extra", 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn filter_drops_rejected_entries() {
        let map = MagicMap::from_pairs([
            ("keep", Value::Int(1)),
            ("null", Value::Null),
        ]);
        let filtered = map.filter(|_, v| !v.is_null());
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("keep"));
    }
}
