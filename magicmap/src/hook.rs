//! The hook engine: recursive conversion of plain mapping graphs into
//! wrapped ones.
//!
//! Conversion is memoized on container identity, so shared nodes convert
//! once and cycles terminate: every container is registered in the memo
//! *before* its contents are processed. Traversal runs on an explicit
//! work queue rather than the call stack, so arbitrarily deep input
//! cannot overflow.

use std::collections::{HashMap, VecDeque};

use crate::map::MagicMap;
use crate::value::{List, PlainMap, Tuple, Value};

/// Identity-keyed conversion memo.
///
/// Keys are the addresses of container storage, values the converted
/// counterpart. A single memo shared across several roots preserves
/// sharing between them.
pub(crate) struct Memo {
    done: HashMap<usize, Value>,
    maps: usize,
    lists: usize,
}

impl Memo {
    pub(crate) fn new() -> Self {
        Memo {
            done: HashMap::new(),
            maps: 0,
            lists: 0,
        }
    }

    fn recall(&self, id: usize) -> Option<Value> {
        self.done.get(&id).cloned()
    }

    fn remember(&mut self, id: usize, value: Value) {
        self.done.insert(id, value);
    }
}

enum Job {
    Map { src: PlainMap, dst: MagicMap },
    List { list: List },
}

/// Recursively converts every plain map reachable from `value` into a
/// wrapped [`MagicMap`].
///
/// - plain maps become fresh wrapped maps; a map reached twice converts to
///   the same wrapped instance, and self-reference terminates;
/// - lists are rewritten **in place**, preserving their identity, so
///   aliases of a list elsewhere in the graph observe the conversion;
/// - tuples are rebuilt (they are immutable), keeping their field names;
/// - already-wrapped maps, sets and scalars pass through unchanged, which
///   makes the conversion idempotent.
#[must_use]
pub fn hook(value: Value) -> Value {
    let mut memo = Memo::new();
    let out = hook_with(value, &mut memo);
    if memo.maps + memo.lists > 0 {
        log::trace!(
            "hooked {} map(s) and rewrote {} list(s)",
            memo.maps,
            memo.lists
        );
    }
    out
}

/// [`hook`] against a caller-supplied memo, so conversions of several
/// sibling values can preserve the sharing between them.
pub(crate) fn hook_with(value: Value, memo: &mut Memo) -> Value {
    let mut queue = VecDeque::new();
    let out = shallow(value, memo, &mut queue);
    drain(memo, &mut queue);
    out
}

/// Converts `plain` into a wrapped map.
pub(crate) fn hook_plain_map(plain: PlainMap) -> MagicMap {
    match hook(Value::Map(plain)) {
        Value::Magic(map) => map,
        _ => unreachable!("hooking a plain map yields a wrapped map"),
    }
}

/// Converts one node and queues its contents.
fn shallow(value: Value, memo: &mut Memo, queue: &mut VecDeque<Job>) -> Value {
    match value {
        Value::Map(src) => {
            if let Some(done) = memo.recall(src.ptr_id()) {
                return done;
            }
            let dst = MagicMap::new();
            // registered before its entries are walked, so a map that
            // reaches itself finds the wrapper already in the memo
            memo.remember(src.ptr_id(), Value::Magic(dst.clone()));
            memo.maps += 1;
            queue.push_back(Job::Map {
                src,
                dst: dst.clone(),
            });
            Value::Magic(dst)
        }
        Value::List(list) => {
            if let Some(done) = memo.recall(list.ptr_id()) {
                return done;
            }
            memo.remember(list.ptr_id(), Value::List(list.clone()));
            memo.lists += 1;
            queue.push_back(Job::List { list: list.clone() });
            Value::List(list)
        }
        Value::Tuple(tuple) => {
            // immutable, so rebuilt rather than rewritten; nesting along a
            // tuple spine recurses directly, everything else goes through
            // the queue
            let items: Vec<Value> = tuple
                .items()
                .iter()
                .map(|item| shallow(item.clone(), memo, queue))
                .collect();
            Value::Tuple(match tuple.fields_rc() {
                Some(fields) => Tuple {
                    fields: Some(fields),
                    items: items.into(),
                },
                None => Tuple::new(items),
            })
        }
        // already wrapped, or cannot contain a mapping
        passthrough => passthrough,
    }
}

fn drain(memo: &mut Memo, queue: &mut VecDeque<Job>) {
    while let Some(job) = queue.pop_front() {
        match job {
            Job::Map { src, dst } => {
                for (key, value) in src.entries() {
                    let converted = shallow(value, memo, queue);
                    dst.insert_raw(key, converted);
                }
            }
            Job::List { list } => {
                for index in 0..list.len() {
                    if let Some(elem) = list.get(index) {
                        let converted = shallow(elem, memo, queue);
                        list.set(index, converted);
                    }
                }
            }
        }
    }
}
