//! The dynamic value graph.
//!
//! A [`Value`] models arbitrarily nested, heterogeneous data the way a
//! dynamic language would: scalars, mutable shareable lists, immutable
//! tuples (optionally with named fields), sets, plain maps and wrapped
//! [`MagicMap`]s. Containers are reference-counted with interior
//! mutability, so a graph can share nodes and even contain cycles; the
//! hook and disenchant engines are what move a graph between its plain
//! (`Value::Map`) and wrapped (`Value::Magic`) forms.

use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

use bytes::Bytes;
use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};

use crate::key::Key;
use crate::map::{MagicMap, Origin};

/// A dynamic value.
#[derive(Clone, Default)]
pub enum Value {
    /// The null value.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text scalar.
    Str(CompactString),
    /// Binary scalar.
    Bytes(Bytes),
    /// Mutable, shareable, order-preserving sequence.
    List(List),
    /// Immutable fixed-size sequence, optionally with named fields.
    Tuple(Tuple),
    /// Set-like collection of hashable keys.
    Set(Set),
    /// Plain (un-hooked) ordered mapping.
    Map(PlainMap),
    /// Wrapped mapping.
    Magic(MagicMap),
}

/// Enum distinguishing the value kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// Null value.
    Null,
    /// Boolean.
    Bool,
    /// Integer.
    Int,
    /// Floating-point number.
    Float,
    /// Text.
    Str,
    /// Binary data.
    Bytes,
    /// Mutable sequence.
    List,
    /// Immutable fixed-size sequence.
    Tuple,
    /// Set-like collection.
    Set,
    /// Plain mapping.
    Map,
    /// Wrapped mapping.
    Magic,
}

impl ValueKind {
    /// Human-readable kind name, used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::Bytes => "bytes",
            ValueKind::List => "list",
            ValueKind::Tuple => "tuple",
            ValueKind::Set => "set",
            ValueKind::Map => "map",
            ValueKind::Magic => "wrapped map",
        }
    }
}

impl Value {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::List(_) => ValueKind::List,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Set(_) => ValueKind::Set,
            Value::Map(_) => ValueKind::Map,
            Value::Magic(_) => ValueKind::Magic,
        }
    }

    /// Returns `true` if this is the null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric payload as a float (integers widen).
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the binary payload, if any.
    #[must_use]
    pub const fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the list payload, if any.
    #[must_use]
    pub const fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the tuple payload, if any.
    #[must_use]
    pub const fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Value::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the set payload, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&Set> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the plain-map payload, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&PlainMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the wrapped-map payload, if any.
    #[must_use]
    pub const fn as_magic(&self) -> Option<&MagicMap> {
        match self {
            Value::Magic(m) => Some(m),
            _ => None,
        }
    }

    /// Forgiving attribute-style access, chainable at any depth.
    ///
    /// On a wrapped map this is [`MagicMap::attr`]. On a plain map the map
    /// is hooked first (the defensive lazy path). On anything else a fresh
    /// missing-placeholder is returned, so a chain like
    /// `v.attr("a").attr("b").attr("c")` is total: it resolves to a
    /// protected empty map instead of failing, no matter where it went
    /// astray.
    #[must_use]
    pub fn attr(&self, name: &str) -> Value {
        match self {
            Value::Magic(map) => map.attr(name),
            Value::Map(plain) => crate::hook(Value::Map(plain.clone())).attr(name),
            _ => Value::Magic(MagicMap::placeholder(Origin::FromMissing)),
        }
    }
}

// === List ===

/// A mutable, shareable, order-preserving sequence of values.
///
/// Lists are reference-counted: cloning a `List` clones the handle, not
/// the storage, which is what lets the hook engine rewrite a shared list
/// in place without breaking aliases elsewhere in the graph.
#[derive(Clone, Default)]
pub struct List(pub(crate) Rc<RefCell<Vec<Value>>>);

impl List {
    /// Creates a new empty list.
    #[must_use]
    pub fn new() -> Self {
        List(Rc::new(RefCell::new(Vec::new())))
    }

    /// Creates a list from a vector of values.
    #[must_use]
    pub fn from_vec(items: Vec<Value>) -> Self {
        List(Rc::new(RefCell::new(items)))
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a clone of the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Appends an element.
    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Overwrites the element at `index`. Returns `false` if out of range.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        let mut items = self.0.borrow_mut();
        match items.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Returns a snapshot of the elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Stable identity of the backing storage, for memo keys.
    pub(crate) fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from_vec(iter.into_iter().collect())
    }
}

impl Drop for List {
    fn drop(&mut self) {
        if Rc::strong_count(&self.0) != 1 {
            return;
        }
        let items: Vec<Value> = self.0.borrow_mut().drain(..).collect();
        if !items.is_empty() {
            reclaim(items);
        }
    }
}

// === Tuple ===

/// An immutable fixed-size sequence, optionally carrying named fields.
///
/// A tuple with field names models a record: the hook and disenchant
/// engines rebuild it with its names intact rather than degrading it to an
/// anonymous tuple.
#[derive(Clone)]
pub struct Tuple {
    pub(crate) fields: Option<Rc<[CompactString]>>,
    pub(crate) items: Rc<[Value]>,
}

impl Tuple {
    /// Creates an anonymous tuple.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = Value>) -> Self {
        Tuple {
            fields: None,
            items: items.into_iter().collect(),
        }
    }

    /// Creates a named tuple. Field count must match item count.
    #[must_use]
    pub fn named(
        fields: impl IntoIterator<Item = impl Into<CompactString>>,
        items: impl IntoIterator<Item = Value>,
    ) -> Self {
        Tuple {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            items: items.into_iter().collect(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the tuple has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the elements.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Returns the field names, if this tuple is named.
    #[must_use]
    pub fn fields(&self) -> Option<&[CompactString]> {
        self.fields.as_deref()
    }

    pub(crate) fn fields_rc(&self) -> Option<Rc<[CompactString]>> {
        self.fields.clone()
    }
}

// === Set ===

/// A set-like collection of hashable keys.
///
/// Elements are [`Key`]s — the hashable subset of the value universe —
/// so membership is well defined. The `frozen` flag is carried through
/// disenchanting untouched; the hook engine passes sets through unchanged
/// since they cannot contain mappings.
#[derive(Clone)]
pub struct Set {
    pub(crate) frozen: bool,
    pub(crate) items: Rc<IndexSet<Key>>,
}

impl Set {
    /// Creates a mutable-flavored set.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        Set {
            frozen: false,
            items: Rc::new(items.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates a frozen set.
    #[must_use]
    pub fn frozen(items: impl IntoIterator<Item = impl Into<Key>>) -> Self {
        Set {
            frozen: true,
            items: Rc::new(items.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns `true` if this set is frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.items.contains(key)
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.items.iter()
    }

    pub(crate) fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.items) as *const u8 as usize
    }

    /// A freshly allocated set with the same elements and frozen-ness.
    pub(crate) fn rebuilt(&self) -> Set {
        Set {
            frozen: self.frozen,
            items: Rc::new((*self.items).clone()),
        }
    }
}

// === PlainMap ===

/// A plain (un-hooked) ordered mapping.
///
/// This is what parsers and builders produce before hooking and what
/// disenchanting produces on the way back out. Like [`List`], it is a
/// reference-counted handle, so plain maps can be shared and can contain
/// themselves.
#[derive(Clone, Default)]
pub struct PlainMap(pub(crate) Rc<RefCell<IndexMap<Key, Value>>>);

impl PlainMap {
    /// Creates a new empty plain map.
    #[must_use]
    pub fn new() -> Self {
        PlainMap(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Inserts an entry. Returns the previous value for the key, if any.
    pub fn insert(&self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Returns a clone of the value for `key`.
    #[must_use]
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.0.borrow().get(&key.into()).cloned()
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.0.borrow().contains_key(&key.into())
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns a snapshot of the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Stable identity of the backing storage, for memo keys.
    pub(crate) fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for PlainMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = PlainMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Drop for PlainMap {
    fn drop(&mut self) {
        if Rc::strong_count(&self.0) != 1 {
            return;
        }
        let values: Vec<Value> = self.0.borrow_mut().drain(..).map(|(_, v)| v).collect();
        if !values.is_empty() {
            reclaim(values);
        }
    }
}

// === Teardown ===

/// Iterative teardown of a value graph.
///
/// Compiler-generated drop glue recurses once per nesting level, which
/// overflows the stack on very deep graphs; the container `Drop` impls
/// instead drain their children into a flat worklist when they hold the
/// last reference. Containers kept alive elsewhere (including through a
/// reference cycle) are left alone.
pub(crate) fn reclaim(mut stack: Vec<Value>) {
    while let Some(value) = stack.pop() {
        match value {
            Value::List(list) => {
                if Rc::strong_count(&list.0) == 1 {
                    stack.append(&mut list.0.borrow_mut());
                }
            }
            Value::Map(map) => {
                if Rc::strong_count(&map.0) == 1 {
                    stack.extend(map.0.borrow_mut().drain(..).map(|(_, v)| v));
                }
            }
            Value::Magic(map) => map.reclaim_into(&mut stack),
            _ => {}
        }
    }
}

// === Cycle marks ===

// Debug and PartialEq walk the graph through ordinary recursion; these
// thread-local in-progress stacks let them notice a node they are already
// inside of and stop. Marks are strictly nested, so popping the tail on
// drop is enough.
thread_local! {
    static FMT_MARKS: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    static EQ_MARKS: RefCell<Vec<(usize, usize)>> = const { RefCell::new(Vec::new()) };
}

pub(crate) struct FmtMark;

impl Drop for FmtMark {
    fn drop(&mut self) {
        FMT_MARKS.with(|marks| {
            marks.borrow_mut().pop();
        });
    }
}

/// Marks `id` as being formatted. `None` means formatting of that node is
/// already in progress further up the stack; the caller prints a cycle
/// marker instead of recursing.
pub(crate) fn fmt_enter(id: usize) -> Option<FmtMark> {
    FMT_MARKS.with(|marks| {
        let mut marks = marks.borrow_mut();
        if marks.contains(&id) {
            return None;
        }
        marks.push(id);
        Some(FmtMark)
    })
}

pub(crate) struct EqMark;

impl Drop for EqMark {
    fn drop(&mut self) {
        EQ_MARKS.with(|marks| {
            marks.borrow_mut().pop();
        });
    }
}

/// Marks the pair as being compared. `None` means this very comparison is
/// already in progress further up the stack; no difference has been found
/// on the way here, so the caller treats the pair as equal.
pub(crate) fn eq_enter(a: usize, b: usize) -> Option<EqMark> {
    EQ_MARKS.with(|marks| {
        let mut marks = marks.borrow_mut();
        if marks.contains(&(a, b)) {
            return None;
        }
        marks.push((a, b));
        Some(EqMark)
    })
}

// === Comparison ===

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // numbers compare across representations, like 1 == 1.0
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // named and anonymous tuples compare by content
            (Value::Tuple(a), Value::Tuple(b)) => *a.items == *b.items,
            (Value::Set(a), Value::Set(b)) => *a.items == *b.items,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Magic(a), Value::Magic(b)) => a == b,
            // a placeholder is content-equal to any other empty mapping
            (Value::Map(a), Value::Magic(b)) | (Value::Magic(b), Value::Map(a)) => {
                match eq_enter(a.ptr_id(), b.ptr_id()) {
                    None => true,
                    Some(_mark) => *a.0.borrow() == *b.entries_ref(),
                }
            }
            _ => false,
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match eq_enter(self.ptr_id(), other.ptr_id()) {
            None => true,
            Some(_mark) => *self.0.borrow() == *other.0.borrow(),
        }
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        *self.items == *other.items
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        *self.items == *other.items
    }
}

impl PartialEq for PlainMap {
    fn eq(&self, other: &Self) -> bool {
        if Rc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match eq_enter(self.ptr_id(), other.ptr_id()) {
            None => true,
            Some(_mark) => *self.0.borrow() == *other.0.borrow(),
        }
    }
}

// === Debug ===

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::Bytes(b) => write!(f, "{b:?}"),
            Value::List(list) => Debug::fmt(list, f),
            Value::Tuple(t) => Debug::fmt(t, f),
            Value::Set(s) => Debug::fmt(s, f),
            Value::Map(m) => Debug::fmt(m, f),
            Value::Magic(m) => Debug::fmt(m, f),
        }
    }
}

impl Debug for List {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(_mark) = fmt_enter(self.ptr_id()) else {
            return f.write_str("[...]");
        };
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

impl Debug for Tuple {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut tup = f.debug_tuple("");
        for item in self.items.iter() {
            tup.field(item);
        }
        tup.finish()
    }
}

impl Debug for Set {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl Debug for PlainMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Some(_mark) = fmt_enter(self.ptr_id()) else {
            return f.write_str("{...}");
        };
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

// === From implementations ===

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Int(n as i64)
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(CompactString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(CompactString::from(s))
    }
}

impl From<CompactString> for Value {
    fn from(s: CompactString) -> Self {
        Value::Str(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(List::from_vec(items))
    }
}

impl From<Tuple> for Value {
    fn from(t: Tuple) -> Self {
        Value::Tuple(t)
    }
}

impl From<Set> for Value {
    fn from(s: Set) -> Self {
        Value::Set(s)
    }
}

impl From<PlainMap> for Value {
    fn from(m: PlainMap) -> Self {
        Value::Map(m)
    }
}

impl From<MagicMap> for Value {
    fn from(m: MagicMap) -> Self {
        Value::Magic(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind().name(), "null");
        assert_eq!(Value::from("x").kind().name(), "str");
        assert_eq!(Value::Map(PlainMap::new()).kind().name(), "map");
    }

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Float(1.5));
    }

    #[test]
    fn shared_lists_alias() {
        let list = List::from_vec(vec![Value::Int(1)]);
        let alias = list.clone();
        list.push(Value::Int(2));
        assert_eq!(alias.len(), 2);
        assert_eq!(alias.get(1), Some(Value::Int(2)));
    }

    #[test]
    fn named_tuple_equals_anonymous() {
        let named = Tuple::named(["x", "y"], [Value::Int(1), Value::Int(2)]);
        let anon = Tuple::new([Value::Int(1), Value::Int(2)]);
        assert_eq!(Value::Tuple(named), Value::Tuple(anon));
    }

    #[test]
    fn debug_of_self_referential_list_prints_a_marker() {
        let list = List::new();
        list.push(Value::List(list.clone()));
        assert_eq!(format!("{list:?}"), "[[...]]");
    }

    #[test]
    fn self_referential_lists_compare_without_overflowing() {
        let a = List::from_vec(vec![Value::Int(1)]);
        a.push(Value::List(a.clone()));
        let b = List::from_vec(vec![Value::Int(1)]);
        b.push(Value::List(b.clone()));
        assert_eq!(a, b);

        b.push(Value::Int(2));
        assert_ne!(a, b);
    }

    #[test]
    fn option_conversion_models_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
